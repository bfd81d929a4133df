//! # Cipher and digest engines
//!
//! [`Cipher`] binds a configured transformation to a padded key and runs
//! whole-buffer encryption or decryption. [`Digest`] hashes byte buffers with
//! the configured digest algorithm.
//!
//! Everything that can be validated up front (transformation syntax, key
//! algorithm, key length, IV) is checked in [`Cipher::new`], so a bad
//! configuration stops the run before any file is read.

use anyhow::{Result, bail, ensure};

mod block;
mod digest;
mod transformation;

pub use digest::{Digest, DigestAlgorithm};
pub use transformation::{Algorithm, Mode, PaddingScheme, Transformation};

use crate::config::{BLOCK_SIZE, PROP_ALGORITHM, PROP_IV, PROP_TRANSFORMATION};
use crate::padding;
use crate::secret::SecretBytes;
use crate::settings::Settings;
use crate::types::ProcessorMode;

/// A block cipher ready to transform whole buffers.
#[derive(Debug)]
pub struct Cipher {
    transformation: Transformation,
    key: SecretBytes,
    iv: Option<Vec<u8>>,
}

impl Cipher {
    /// Builds a cipher from the transformation, algorithm and IV settings.
    ///
    /// # Errors
    ///
    /// Fails when a required setting is missing, names something
    /// unsupported, or disagrees with the key or IV it is paired with.
    pub fn new(settings: &Settings, key: SecretBytes) -> Result<Self> {
        let transformation: Transformation = settings.require(PROP_TRANSFORMATION)?.parse()?;

        let algorithm = settings.require(PROP_ALGORITHM)?.trim();
        let algorithm: Algorithm = algorithm.parse().map_err(|_| anyhow::anyhow!("{PROP_ALGORITHM} not supported: {algorithm}"))?;
        ensure!(
            algorithm == transformation.algorithm,
            "{PROP_ALGORITHM} {algorithm} does not match transformation {transformation}"
        );

        ensure!(block::is_valid_key_length(key.len()), "{algorithm} does not accept a {}-bit key", key.len() * 8);

        let iv = settings.iv().map(<[u8]>::to_vec);
        match (&iv, transformation.mode.uses_iv()) {
            (None, true) => bail!("{PROP_IV} not defined; required by {transformation}"),
            (Some(iv), true) if iv.len() != BLOCK_SIZE => bail!("{PROP_IV} must be {BLOCK_SIZE} bytes, got {}", iv.len()),
            (Some(_), false) => bail!("{PROP_IV} not allowed with {transformation}"),
            _ => {}
        }

        Ok(Self { transformation, key, iv })
    }

    #[inline]
    pub fn transformation(&self) -> Transformation {
        self.transformation
    }

    /// Encrypts or decrypts `data` in one shot.
    pub fn apply(&self, direction: ProcessorMode, data: &[u8]) -> Result<Vec<u8>> {
        match direction {
            ProcessorMode::Encrypt => self.encrypt(data),
            ProcessorMode::Decrypt => self.decrypt(data),
        }
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let padded = match self.transformation.padding {
            PaddingScheme::Pkcs5 => padding::pad(plaintext)?,
            PaddingScheme::None => plaintext.to_vec(),
        };
        self.run(ProcessorMode::Encrypt, &padded)
    }

    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let plaintext = self.run(ProcessorMode::Decrypt, ciphertext)?;
        match self.transformation.padding {
            PaddingScheme::Pkcs5 => padding::unpad(&plaintext),
            PaddingScheme::None => Ok(plaintext),
        }
    }

    fn run(&self, direction: ProcessorMode, data: &[u8]) -> Result<Vec<u8>> {
        block::apply(self.transformation.mode, direction, self.key.expose_secret(), self.iv.as_deref(), data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(len: usize) -> SecretBytes {
        SecretBytes::from_vec(vec![b'k'; len])
    }

    fn settings(text: &str) -> Settings {
        Settings::parse(text)
    }

    const CBC: &str = "crypto.cipher.transformation=AES/CBC/PKCS5Padding\ncrypto.cipher.algorithm=AES\ncrypto.cipher.iv=0123456789abcdef\n";
    const ECB: &str = "crypto.cipher.transformation=AES/ECB/PKCS5Padding\ncrypto.cipher.algorithm=AES\n";

    #[test]
    fn test_roundtrip_cbc() {
        let cipher = Cipher::new(&settings(CBC), key(32)).unwrap();
        let plaintext = b"Hello, World! This is a test file for encryption.";

        let ciphertext = cipher.encrypt(plaintext).unwrap();
        assert_eq!(ciphertext.len() % BLOCK_SIZE, 0);
        assert_eq!(cipher.decrypt(&ciphertext).unwrap(), plaintext);
    }

    #[test]
    fn test_roundtrip_ecb_empty() {
        let cipher = Cipher::new(&settings(ECB), key(16)).unwrap();
        let ciphertext = cipher.encrypt(b"").unwrap();
        assert_eq!(ciphertext.len(), BLOCK_SIZE);
        assert!(cipher.decrypt(&ciphertext).unwrap().is_empty());
    }

    #[test]
    fn test_no_padding_requires_aligned_input() {
        let text = "crypto.cipher.transformation=AES/ECB/NoPadding\ncrypto.cipher.algorithm=AES\n";
        let cipher = Cipher::new(&settings(text), key(16)).unwrap();

        assert!(cipher.encrypt(b"not sixteen").is_err());
        let ciphertext = cipher.encrypt(b"exactly sixteen!").unwrap();
        assert_eq!(ciphertext.len(), 16);
        assert_eq!(cipher.decrypt(&ciphertext).unwrap(), b"exactly sixteen!");
    }

    #[test]
    fn test_wrong_key_fails_padding_check() {
        let good = Cipher::new(&settings(ECB), key(16)).unwrap();
        let bad = Cipher::new(&settings(ECB), SecretBytes::from_vec(vec![b'x'; 16])).unwrap();

        let ciphertext = good.encrypt(b"some plaintext of moderate length").unwrap();
        if let Ok(plaintext) = bad.decrypt(&ciphertext) {
            assert_ne!(plaintext, b"some plaintext of moderate length");
        }
    }

    #[test]
    fn test_rejects_misaligned_ciphertext() {
        let cipher = Cipher::new(&settings(CBC), key(16)).unwrap();
        assert!(cipher.decrypt(&[0u8; 20]).is_err());
    }

    #[test]
    fn test_missing_settings_are_errors() {
        assert!(Cipher::new(&settings("crypto.cipher.algorithm=AES"), key(16)).is_err());
        assert!(Cipher::new(&settings("crypto.cipher.transformation=AES"), key(16)).is_err());
    }

    #[test]
    fn test_algorithm_mismatch() {
        let text = "crypto.cipher.transformation=AES\ncrypto.cipher.algorithm=DES\n";
        assert!(Cipher::new(&settings(text), key(16)).is_err());
    }

    #[test]
    fn test_key_size_must_fit_algorithm() {
        assert!(Cipher::new(&settings(ECB), key(8)).is_err());
        assert!(Cipher::new(&settings(ECB), key(24)).is_ok());
    }

    #[test]
    fn test_iv_rules() {
        let no_iv = "crypto.cipher.transformation=AES/CBC/PKCS5Padding\ncrypto.cipher.algorithm=AES\n";
        assert!(Cipher::new(&settings(no_iv), key(16)).is_err());

        let short_iv = format!("{no_iv}crypto.cipher.iv=short\n");
        assert!(Cipher::new(&settings(&short_iv), key(16)).is_err());

        let ecb_with_iv = format!("{ECB}crypto.cipher.iv=0123456789abcdef\n");
        assert!(Cipher::new(&settings(&ecb_with_iv), key(16)).is_err());
    }
}
