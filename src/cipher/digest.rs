//! Message digests rendered as lowercase hex.

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest as _, Sha224, Sha256, Sha384, Sha512};
use strum::{Display, EnumString};

/// Digest algorithms accepted by `crypto.digest.algorithm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum DigestAlgorithm {
    #[strum(to_string = "MD5")]
    Md5,
    #[strum(to_string = "SHA-1", serialize = "SHA1", serialize = "SHA")]
    Sha1,
    #[strum(to_string = "SHA-224", serialize = "SHA224")]
    Sha224,
    #[strum(to_string = "SHA-256", serialize = "SHA256")]
    Sha256,
    #[strum(to_string = "SHA-384", serialize = "SHA384")]
    Sha384,
    #[strum(to_string = "SHA-512", serialize = "SHA512")]
    Sha512,
    #[strum(to_string = "BLAKE3")]
    Blake3,
}

impl DigestAlgorithm {
    /// Length of the raw digest in bytes.
    pub fn output_len(self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha1 => 20,
            Self::Sha224 => 28,
            Self::Sha256 | Self::Blake3 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

/// A computed digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    bytes: Vec<u8>,
}

impl Digest {
    pub fn compute(algorithm: DigestAlgorithm, data: &[u8]) -> Self {
        let bytes = match algorithm {
            DigestAlgorithm::Md5 => Md5::digest(data).to_vec(),
            DigestAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
            DigestAlgorithm::Sha224 => Sha224::digest(data).to_vec(),
            DigestAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            DigestAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
            DigestAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
            DigestAlgorithm::Blake3 => blake3::hash(data).as_bytes().to_vec(),
        };
        Self { bytes }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Two lowercase hex digits per byte.
    #[inline]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [DigestAlgorithm; 7] = [
        DigestAlgorithm::Md5,
        DigestAlgorithm::Sha1,
        DigestAlgorithm::Sha224,
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha384,
        DigestAlgorithm::Sha512,
        DigestAlgorithm::Blake3,
    ];

    #[test]
    fn test_known_vectors() {
        assert_eq!(Digest::compute(DigestAlgorithm::Md5, b"abc").to_hex(), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(Digest::compute(DigestAlgorithm::Sha1, b"abc").to_hex(), "a9993e364706816aba3e25717850c26c9cd0d89d");
        assert_eq!(
            Digest::compute(DigestAlgorithm::Sha256, b"abc").to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hex_length_is_twice_output() {
        for algorithm in ALL {
            let digest = Digest::compute(algorithm, b"some file contents");
            assert_eq!(digest.as_bytes().len(), algorithm.output_len());
            assert_eq!(digest.to_hex().len(), 2 * algorithm.output_len());
        }
    }

    #[test]
    fn test_deterministic_and_lowercase() {
        for algorithm in ALL {
            let first = Digest::compute(algorithm, b"same bytes").to_hex();
            let second = Digest::compute(algorithm, b"same bytes").to_hex();
            assert_eq!(first, second);
            assert!(first.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("SHA".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha1);
        assert_eq!("sha-256".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha256);
        assert_eq!("Blake3".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Blake3);
        assert!("SHA-3".parse::<DigestAlgorithm>().is_err());
        assert_eq!(DigestAlgorithm::Sha512.to_string(), "SHA-512");
    }
}
