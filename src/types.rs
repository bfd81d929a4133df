//! Common type definitions.
//!
//! - [`ProcessorMode`]: encryption or decryption
//! - [`CipherFlags`]: the `-force`, `-nopreserve` and `-view` switches
//! - [`Outcome`] and [`SkipReason`]: what happened to one file of a batch

use std::fmt::{Display, Formatter, Result};
use std::path::PathBuf;

/// Direction of a cipher operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorMode {
    /// Encrypt the file, producing a `.X` output.
    Encrypt,

    /// Decrypt the file, removing the `.X` suffix.
    Decrypt,
}

impl ProcessorMode {
    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            Self::Encrypt => "encrypt",
            Self::Decrypt => "decrypt",
        }
    }
}

impl Display for ProcessorMode {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.label())
    }
}

/// Switches accepted by `encrypt` and `decrypt`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CipherFlags {
    /// Overwrite an existing destination.
    pub force: bool,

    /// Shred and delete the source after a successful operation.
    pub nopreserve: bool,

    /// Write decrypted bytes to stdout instead of a file.
    pub view: bool,
}

/// Why a file was left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyEncrypted,
    NotEncrypted,
    ViewWhileEncrypting,
    ViewWithNoPreserve,
    ViewWithForce,
    DestinationExists(PathBuf),
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::AlreadyEncrypted => f.write_str("already carries the encrypted suffix"),
            Self::NotEncrypted => f.write_str("does not carry the encrypted suffix"),
            Self::ViewWhileEncrypting => f.write_str("-view used while encrypting"),
            Self::ViewWithNoPreserve => f.write_str("-view used with -nopreserve"),
            Self::ViewWithForce => f.write_str("-view used with -force"),
            Self::DestinationExists(path) => write!(f, "{} already exists", path.display()),
        }
    }
}

/// Result of processing a single file. Fatal errors never end up here;
/// they abort the whole run instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A precondition failed; nothing was read or written.
    Skipped(SkipReason),

    /// Reading, transforming or writing failed; the batch moved on.
    Failed,

    /// Output was produced. `removed` is true when the source was shredded
    /// and deleted afterwards.
    Done { removed: bool },
}

impl Outcome {
    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done { .. })
    }
}
