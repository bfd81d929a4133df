//! Subcommand dispatch and process exit mapping.

use std::ffi::OsString;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{Level, debug, error};

use crate::cipher::{Cipher, Digest};
use crate::cli::{CipherArgs, Cli, Commands, UsageError};
use crate::config::LOG_LEVEL_ENV;
use crate::crypt::{self, PerlCrypt};
use crate::key::padded_key;
use crate::processor::{Processor, digest_files};
use crate::secret::Passphrase;
use crate::settings::Settings;
use crate::types::ProcessorMode;
use crate::ui;

/// Installs the stderr log subscriber. The level comes from `CRYPTO_LOG`
/// and defaults to `info`.
pub fn init_logging() -> Result<()> {
    let level = std::env::var(LOG_LEVEL_ENV).ok().and_then(|value| Level::from_str(value.trim()).ok()).unwrap_or(Level::INFO);

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// One invocation of the tool. Regular output goes to `out`.
pub struct App<W> {
    settings: Settings,
    out: W,
}

impl<W: AsyncWrite + Unpin> App<W> {
    pub fn new(settings: Settings, out: W) -> Self {
        Self { settings, out }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs the command line and maps the result to an exit code. Usage
    /// errors print the usage screen; every failure exits with status 1.
    pub async fn run<I, T>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let Err(err) = self.execute(args).await else {
            return ExitCode::SUCCESS;
        };

        match err.downcast_ref::<UsageError>() {
            Some(usage) => {
                ui::show_usage_error(&usage.to_string());
                if let Err(err) = self.write(&ui::usage()).await {
                    error!("{err:#}");
                }
            }
            None => error!("{err:#}"),
        }

        ExitCode::FAILURE
    }

    /// Parses the arguments and runs the selected subcommand.
    ///
    /// # Errors
    ///
    /// [`UsageError`] for a malformed command line, any other error for a
    /// fatal condition. Per-file failures are logged and do not surface here.
    pub async fn execute<I, T>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let cli = Cli::parse_args(args)?;

        match cli.command {
            Commands::Encrypt(args) => self.run_cipher(ProcessorMode::Encrypt, args).await,
            Commands::Decrypt(args) => self.run_cipher(ProcessorMode::Decrypt, args).await,
            Commands::Digest { files } => {
                let algorithm = self.settings.digest_algorithm()?;
                let digested = digest_files(algorithm, &files, &mut self.out).await?;
                debug!("digested {digested} of {} file(s) with {algorithm}", files.len());
                Ok(())
            }
            Commands::Digestkey { key } => {
                let algorithm = self.settings.digest_algorithm()?;
                let key = Passphrase::from_string(key);
                let digest = Digest::compute(algorithm, key.expose_secret().as_bytes());
                self.write(&format!("{}\n", digest.to_hex())).await
            }
            Commands::Crypt { key, salt } => {
                let backend = PerlCrypt::new(self.settings.interpreter());
                crypt::run(&backend, &Passphrase::from_string(key), &salt, &mut self.out).await
            }
            Commands::Version => {
                let text = ui::version(&self.settings);
                self.write(&text).await
            }
            Commands::Help => self.write(&ui::usage()).await,
        }
    }

    async fn run_cipher(&mut self, mode: ProcessorMode, args: CipherArgs) -> Result<()> {
        let flags = args.flags();
        let passphrase = Passphrase::from_string(args.key);

        let key = padded_key(&self.settings, &passphrase)?;
        let cipher = Cipher::new(&self.settings, key)?;
        debug!("{mode} with {}", cipher.transformation());

        let processor = Processor::new(cipher, mode, flags, self.settings.no_delete());
        let outcomes = processor.run(&args.files, &mut self.out).await?;

        if !flags.view && !outcomes.is_empty() {
            ui::show_summary(mode, &outcomes);
        }

        Ok(())
    }

    async fn write(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes()).await.context("failed to write output")?;
        self.out.flush().await.context("failed to flush output")?;
        Ok(())
    }
}
