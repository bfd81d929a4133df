//! Global configuration constants.
//!
//! Compile-time parameters of the tool: version, file naming, passphrase
//! policy, shred patterns and the names of the runtime properties read by
//! [`crate::settings::Settings`].

/// Application name used in usage and version output.
pub const APP_NAME: &str = "crypto";

/// Tool version reported by the `version` subcommand.
pub const VERSION: &str = "1.20";

/// Suffix appended to encrypted files and stripped on decryption.
pub const FILE_EXTENSION: &str = ".X";

/// Passphrases shorter than this many characters are rejected.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Byte used to right-pad passphrases up to the configured key size.
pub const KEY_PAD_BYTE: u8 = b'0';

/// Fill bytes written over a file, in order, before it is deleted.
pub const SHRED_PATTERNS: [u8; 4] = [0x00, 0x55, 0xAA, 0xFF];

/// Block size of the supported block cipher (AES) in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Environment variable that overrides the compiled-in properties resource.
pub const PROPERTIES_ENV: &str = "CRYPTO_PROPERTIES";

/// Environment variable holding the maximum log level.
pub const LOG_LEVEL_ENV: &str = "CRYPTO_LOG";

/// Properties resource shipped inside the binary.
pub const DEFAULT_PROPERTIES: &str = include_str!("../crypto.properties");

/// Interpreter used for `crypt` when none is configured.
pub const DEFAULT_INTERPRETER: &str = "perl";

// === Property names ===
// Kept identical to the historical resource so existing files keep working.

pub const PROP_TRANSFORMATION: &str = "crypto.cipher.transformation";
pub const PROP_ALGORITHM: &str = "crypto.cipher.algorithm";
pub const PROP_KEY_SIZE: &str = "crypto.cipher.keysize";
pub const PROP_IV: &str = "crypto.cipher.iv";
pub const PROP_DIGEST_ALGORITHM: &str = "crypto.digest.algorithm";
pub const PROP_NO_DELETE: &str = "crypto.nodelete";
pub const PROP_INTERPRETER: &str = "crypto.crypt.interpreter";
