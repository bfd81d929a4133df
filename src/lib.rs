//! crypto - file encryption, digests and salted crypt from the command line.
//!
//! - AES in ECB or CBC mode with PKCS#5 or no padding, configured through a
//!   properties resource
//! - passphrases padded to the configured key size
//! - optional shredding of source files after a successful operation
//! - MD5, SHA-1, SHA-2 and BLAKE3 digests of files and keys
//! - salted crypt through an external interpreter

pub mod app;
pub mod cipher;
pub mod cli;
pub mod config;
pub mod crypt;
pub mod file;
pub mod key;
pub mod padding;
pub mod processor;
pub mod secret;
pub mod settings;
pub mod shred;
pub mod types;
pub mod ui;
