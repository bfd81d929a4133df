//! Command-line grammar.
//!
//! The tool keeps its historical single-dash flags (`-key`, `-force`, ...).
//! [`normalize`] rewrites the leading flag region into clap's long-flag form
//! and inserts `--` before the first file, so everything after it is a file
//! name even when it looks like a flag.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::config::APP_NAME;
use crate::types::CipherFlags;

/// Flags that take a value.
const VALUE_FLAGS: &[&str] = &["key", "salt"];

/// Flags without a value.
const SWITCHES: &[&str] = &["force", "nopreserve", "view"];

/// A malformed command line. Always reported with the usage text.
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("invalid arguments: {0}")]
    Invalid(String),
}

#[derive(Debug, Parser)]
#[command(name = APP_NAME, disable_help_flag = true, disable_version_flag = true, disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Encrypt files with the configured cipher.
    Encrypt(CipherArgs),

    /// Decrypt files produced by `encrypt`.
    Decrypt(CipherArgs),

    /// Print the digest of each file.
    Digest {
        files: Vec<PathBuf>,
    },

    /// Print the digest of a key.
    Digestkey {
        #[arg(long)]
        key: String,
    },

    /// Compute the salted crypt of a key.
    Crypt {
        #[arg(long)]
        key: String,

        #[arg(long)]
        salt: String,
    },

    /// Show the version and the loaded settings.
    Version,

    /// Show usage.
    Help,
}

#[derive(Debug, Args)]
pub struct CipherArgs {
    #[arg(long)]
    pub key: String,

    #[arg(long)]
    pub force: bool,

    #[arg(long)]
    pub nopreserve: bool,

    #[arg(long)]
    pub view: bool,

    pub files: Vec<PathBuf>,
}

impl CipherArgs {
    #[inline]
    pub fn flags(&self) -> CipherFlags {
        CipherFlags { force: self.force, nopreserve: self.nopreserve, view: self.view }
    }
}

impl Cli {
    /// Parses the arguments that follow the program name.
    pub fn parse_args<I, T>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let argv = std::iter::once(OsString::from(APP_NAME)).chain(normalize(args));
        Self::try_parse_from(argv).map_err(|err| UsageError::Invalid(describe(&err)))
    }
}

/// First line of clap's message without the `error:` prefix, so the
/// offending token stays visible.
fn describe(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let line = rendered.lines().map(str::trim).find(|line| !line.is_empty()).unwrap_or_default();
    let line = line.strip_prefix("error:").map_or(line, str::trim_start);

    if line.is_empty() { err.kind().to_string() } else { line.to_owned() }
}

/// Maps legacy flags to clap's syntax.
///
/// The first token is the subcommand. Recognised `-flag` tokens after it
/// become `--flag`, and a value flag swallows the following token as
/// `--flag=value`. The first token that is not a flag starts the file list
/// and is preceded by `--`. Unknown dash-prefixed tokens are passed through
/// so that clap rejects them. `help` and `version` ignore anything after
/// them.
pub fn normalize<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut out: Vec<OsString> = args.next().into_iter().collect();
    if out.first().is_some_and(|command| command == "help" || command == "version") {
        return out;
    }

    while let Some(arg) = args.next() {
        let flag = arg.to_str().and_then(|s| s.strip_prefix('-')).filter(|name| !name.starts_with('-'));

        match flag {
            Some(name) if VALUE_FLAGS.contains(&name) => {
                let mut long = OsString::from(format!("--{name}"));
                if let Some(value) = args.next() {
                    long.push("=");
                    long.push(value);
                }
                out.push(long);
            }
            Some(name) if SWITCHES.contains(&name) => out.push(OsString::from(format!("--{name}"))),
            _ if arg.to_string_lossy().starts_with('-') => out.push(arg),
            _ => {
                out.push(OsString::from("--"));
                out.push(arg);
                out.extend(args.by_ref());
                break;
            }
        }
    }

    out
}
