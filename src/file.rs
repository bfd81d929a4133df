//! File abstraction for the cipher, digest and shred operations.
//!
//! Every operation works on whole files: contents are read in one call and
//! written in one call. Naming follows a fixed suffix convention, see
//! [`File::output_path`].

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::config::FILE_EXTENSION;
use crate::types::ProcessorMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    path: PathBuf,
}

impl File {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component, or the whole path when there is none.
    pub fn name(&self) -> String {
        self.path.file_name().map_or_else(|| self.path.display().to_string(), |name| name.to_string_lossy().into_owned())
    }

    /// Whether the path ends with the encrypted-file suffix.
    #[inline]
    pub fn is_encrypted(&self) -> bool {
        self.path.as_os_str().as_encoded_bytes().ends_with(FILE_EXTENSION.as_bytes())
    }

    /// Destination for `mode`: the suffix is appended when encrypting and
    /// stripped when decrypting. A path without the suffix is returned
    /// unchanged for decryption.
    pub fn output_path(&self, mode: ProcessorMode) -> PathBuf {
        match mode {
            ProcessorMode::Encrypt => {
                let mut name = self.path.as_os_str().to_os_string();
                name.push(FILE_EXTENSION);
                PathBuf::from(name)
            }
            ProcessorMode::Decrypt => match self.path.as_os_str().as_encoded_bytes().strip_suffix(FILE_EXTENSION.as_bytes()) {
                // SAFETY: the bytes come from an `OsStr` and are cut right
                // before an ASCII suffix, which is a valid split point.
                Some(stem) => PathBuf::from(unsafe { OsStr::from_encoded_bytes_unchecked(stem) }),
                None => self.path.clone(),
            },
        }
    }

    /// Existence check that treats an unreadable path as present, so callers
    /// guarding against overwrites stay on the safe side.
    pub async fn exists(&self) -> bool {
        !matches!(fs::try_exists(&self.path).await, Ok(false))
    }

    pub async fn size(&self) -> Result<u64> {
        let meta = fs::metadata(&self.path).await.with_context(|| format!("failed to get metadata: {}", self.path.display()))?;
        Ok(meta.len())
    }

    pub async fn read_all(&self) -> Result<Vec<u8>> {
        fs::read(&self.path).await.with_context(|| format!("failed to read file: {}", self.path.display()))
    }

    /// Creates or truncates the file and writes `data` in a single write.
    pub async fn write_all(&self, data: &[u8]) -> Result<()> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .await
            .with_context(|| format!("failed to create file: {}", self.path.display()))?;

        file.write_all(data).await.with_context(|| format!("failed to write file: {}", self.path.display()))?;
        file.flush().await.with_context(|| format!("failed to flush file: {}", self.path.display()))?;

        Ok(())
    }

    /// Overwrites every byte of the file in place with `byte` and syncs it
    /// to disk. The file keeps its length.
    pub async fn fill(&self, byte: u8) -> Result<()> {
        let len = usize::try_from(self.size().await?).context("file too large to shred")?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .open(&self.path)
            .await
            .with_context(|| format!("failed to open file for shredding: {}", self.path.display()))?;

        file.write_all(&vec![byte; len]).await.with_context(|| format!("failed to overwrite file: {}", self.path.display()))?;
        file.flush().await?;
        file.sync_all().await.with_context(|| format!("failed to sync file: {}", self.path.display()))?;

        Ok(())
    }

    pub async fn delete(&self) -> Result<()> {
        fs::remove_file(&self.path).await.with_context(|| format!("failed to delete file: {}", self.path.display()))
    }
}
