//! Passphrase normalisation.
//!
//! The configured key size is fixed, so every passphrase is stretched or cut
//! to exactly that many bytes: right-padded with `'0'` and then truncated.
//! This is not a key derivation function; it reproduces the historical key
//! layout so that previously encrypted files stay readable.

use anyhow::{Result, ensure};

use crate::config::{KEY_PAD_BYTE, PASSWORD_MIN_LENGTH};
use crate::secret::{Passphrase, SecretBytes};
use crate::settings::Settings;

/// Pads `passphrase` to the key length configured in `settings`.
pub fn padded_key(settings: &Settings, passphrase: &Passphrase) -> Result<SecretBytes> {
    ensure!(passphrase.expose_secret().chars().count() >= PASSWORD_MIN_LENGTH, "key length too short");
    let key_len = settings.key_size_bytes()?;
    Ok(pad_key(passphrase, key_len))
}

/// Right-pads with `'0'` up to `key_len` bytes, then truncates to `key_len`.
pub fn pad_key(passphrase: &Passphrase, key_len: usize) -> SecretBytes {
    let mut bytes = passphrase.expose_secret().as_bytes().to_vec();
    bytes.resize(key_len, KEY_PAD_BYTE);
    SecretBytes::from_vec(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(bits: u32) -> Settings {
        Settings::parse(&format!("crypto.cipher.keysize={bits}"))
    }

    #[test]
    fn test_short_passphrase_rejected() {
        let err = padded_key(&settings(128), &Passphrase::new("short")).unwrap_err();
        assert!(err.to_string().contains("too short"));
    }

    #[test]
    fn test_pads_with_zero_characters() {
        let key = padded_key(&settings(128), &Passphrase::new("abcdef")).unwrap();
        assert_eq!(key.expose_secret(), b"abcdef0000000000");
    }

    #[test]
    fn test_truncates_long_passphrase() {
        let key = padded_key(&settings(64), &Passphrase::new("abcdefghijkl")).unwrap();
        assert_eq!(key.expose_secret(), b"abcdefgh");
    }

    #[test]
    fn test_length_always_matches_key_size() {
        for bits in [64, 128, 192, 256, 512] {
            for passphrase in ["abcdef", "a much longer passphrase than any key size we support", "exactly-sixteen!"] {
                let key = padded_key(&settings(bits), &Passphrase::new(passphrase)).unwrap();
                assert_eq!(key.len(), bits as usize / 8);
            }
        }
    }

    #[test]
    fn test_invalid_key_size_is_error() {
        assert!(padded_key(&settings(100), &Passphrase::new("abcdef")).is_err());
        assert!(padded_key(&Settings::default(), &Passphrase::new("abcdef")).is_err());
    }

    #[test]
    fn test_short_passphrase_checked_before_settings() {
        let err = padded_key(&Settings::default(), &Passphrase::new("abc")).unwrap_err();
        assert!(err.to_string().contains("too short"));
    }
}
