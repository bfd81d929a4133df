//! Batch encryption, decryption and digesting of files.
//!
//! Files are handled strictly in argument order. A file that cannot be
//! processed is logged and recorded as an [`Outcome`]; the batch always moves
//! on. Only internal consistency failures are returned as errors.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

use crate::cipher::{Cipher, Digest, DigestAlgorithm};
use crate::file::File;
use crate::shred::shred_and_delete;
use crate::types::{CipherFlags, Outcome, ProcessorMode, SkipReason};

/// Where the transformed bytes go.
#[derive(Debug)]
enum Target {
    File(File),
    Stdout,
}

/// Applies one cipher direction to a batch of files.
#[derive(Debug)]
pub struct Processor {
    cipher: Cipher,
    mode: ProcessorMode,
    flags: CipherFlags,
    no_delete: bool,
}

impl Processor {
    pub fn new(cipher: Cipher, mode: ProcessorMode, flags: CipherFlags, no_delete: bool) -> Self {
        Self { cipher, mode, flags, no_delete }
    }

    /// Processes every file in order. Viewed plaintext goes to `out`.
    pub async fn run<W: AsyncWrite + Unpin>(&self, files: &[PathBuf], out: &mut W) -> Result<Vec<Outcome>> {
        let mut outcomes = Vec::with_capacity(files.len());
        for path in files {
            outcomes.push(self.process(path, out).await?);
        }
        Ok(outcomes)
    }

    /// Processes a single file.
    ///
    /// # Errors
    ///
    /// Only when the written output does not have the expected length.
    pub async fn process<W: AsyncWrite + Unpin>(&self, path: &Path, out: &mut W) -> Result<Outcome> {
        let source = File::new(path);

        let target = match self.plan(&source).await {
            Ok(target) => target,
            Err(reason) => {
                warn!("{} ignored: {reason}", path.display());
                return Ok(Outcome::Skipped(reason));
            }
        };

        let output = match self.transform(&source).await {
            Ok(output) => output,
            Err(err) => {
                warn!("could not {} {}: {err:#}", self.mode, path.display());
                return Ok(Outcome::Failed);
            }
        };

        match &target {
            Target::File(dest) => {
                if let Err(err) = dest.write_all(&output).await {
                    warn!("could not {} {}: {err:#}", self.mode, path.display());
                    return Ok(Outcome::Failed);
                }

                verify_written(dest, output.len()).await?;
                info!("{} -> {}", path.display(), dest.path().display());
            }
            Target::Stdout => {
                if let Err(err) = Self::emit(out, &output).await {
                    warn!("could not write {} to stdout: {err:#}", path.display());
                    return Ok(Outcome::Failed);
                }
            }
        }

        let removed = self.flags.nopreserve && shred_and_delete(&source, self.no_delete).await.deleted;

        Ok(Outcome::Done { removed })
    }

    /// Checks the suffix, flag and overwrite rules and picks the target.
    async fn plan(&self, source: &File) -> Result<Target, SkipReason> {
        let CipherFlags { force, nopreserve, view } = self.flags;

        let target = match self.mode {
            ProcessorMode::Encrypt => {
                if view {
                    return Err(SkipReason::ViewWhileEncrypting);
                }
                if source.is_encrypted() {
                    return Err(SkipReason::AlreadyEncrypted);
                }
                Target::File(File::new(source.output_path(ProcessorMode::Encrypt)))
            }
            ProcessorMode::Decrypt => {
                if !source.is_encrypted() {
                    return Err(SkipReason::NotEncrypted);
                }
                if view {
                    if nopreserve {
                        return Err(SkipReason::ViewWithNoPreserve);
                    }
                    if force {
                        return Err(SkipReason::ViewWithForce);
                    }
                    Target::Stdout
                } else {
                    Target::File(File::new(source.output_path(ProcessorMode::Decrypt)))
                }
            }
        };

        if let Target::File(dest) = &target {
            if !force && dest.exists().await {
                return Err(SkipReason::DestinationExists(dest.path().to_path_buf()));
            }
        }

        Ok(target)
    }

    async fn transform(&self, source: &File) -> Result<Vec<u8>> {
        let input = source.read_all().await?;
        self.cipher.apply(self.mode, &input)
    }

    async fn emit<W: AsyncWrite + Unpin>(out: &mut W, data: &[u8]) -> Result<()> {
        out.write_all(data).await?;
        out.flush().await?;
        Ok(())
    }
}

/// Checks that `dest` holds exactly `expected` bytes after a write.
///
/// # Errors
///
/// When the length differs or cannot be read back. Both are fatal.
pub async fn verify_written(dest: &File, expected: usize) -> Result<()> {
    let written = dest.size().await.context("cannot verify written output")?;
    ensure!(
        written == expected as u64,
        "unexpected # of bytes written to {}: {written}, expected {expected}",
        dest.path().display()
    );
    Ok(())
}

/// Digests each file and writes `<name>: <hex>` lines to `out`. Returns the
/// number of files digested; unreadable files are logged and skipped.
pub async fn digest_files<W: AsyncWrite + Unpin>(algorithm: DigestAlgorithm, files: &[PathBuf], out: &mut W) -> Result<usize> {
    let mut digested = 0;

    for path in files {
        let file = File::new(path);
        let contents = match file.read_all().await {
            Ok(contents) => contents,
            Err(err) => {
                warn!("could not digest: {err:#}");
                continue;
            }
        };

        let line = format!("{}: {}\n", file.name(), Digest::compute(algorithm, &contents).to_hex());
        out.write_all(line.as_bytes()).await.context("failed to write digest")?;
        digested += 1;
    }

    out.flush().await?;
    Ok(digested)
}
