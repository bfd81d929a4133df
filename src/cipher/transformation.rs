//! Parsing of `ALGORITHM/MODE/PADDING` transformation strings.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::{Error, Result, anyhow, bail};
use strum::{Display as StrumDisplay, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum Algorithm {
    #[strum(to_string = "AES", serialize = "Rijndael")]
    Aes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum Mode {
    #[strum(to_string = "ECB")]
    Ecb,
    #[strum(to_string = "CBC")]
    Cbc,
}

impl Mode {
    #[inline]
    pub fn uses_iv(self) -> bool {
        matches!(self, Self::Cbc)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum PaddingScheme {
    #[strum(to_string = "PKCS5Padding", serialize = "PKCS7Padding")]
    Pkcs5,
    #[strum(to_string = "NoPadding")]
    None,
}

/// A parsed transformation. A bare algorithm name means ECB with PKCS#5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transformation {
    pub algorithm: Algorithm,
    pub mode: Mode,
    pub padding: PaddingScheme,
}

impl FromStr for Transformation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split('/').map(str::trim).collect();

        let (algorithm, mode, padding) = match parts.as_slice() {
            [algorithm] => (*algorithm, "ECB", "PKCS5Padding"),
            [algorithm, mode, padding] => (*algorithm, *mode, *padding),
            _ => bail!("malformed transformation: {s}"),
        };

        Ok(Self {
            algorithm: algorithm.parse().map_err(|_| anyhow!("unsupported cipher algorithm: {algorithm}"))?,
            mode: mode.parse().map_err(|_| anyhow!("unsupported cipher mode: {mode}"))?,
            padding: padding.parse().map_err(|_| anyhow!("unsupported padding: {padding}"))?,
        })
    }
}

impl Display for Transformation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.algorithm, self.mode, self.padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let t: Transformation = "AES/CBC/PKCS5Padding".parse().unwrap();
        assert_eq!(t, Transformation { algorithm: Algorithm::Aes, mode: Mode::Cbc, padding: PaddingScheme::Pkcs5 });
    }

    #[test]
    fn test_parse_bare_algorithm_defaults() {
        let t: Transformation = "aes".parse().unwrap();
        assert_eq!(t.mode, Mode::Ecb);
        assert_eq!(t.padding, PaddingScheme::Pkcs5);
        assert_eq!(t.to_string(), "AES/ECB/PKCS5Padding");
    }

    #[test]
    fn test_parse_case_insensitive() {
        let t: Transformation = "aes/ecb/nopadding".parse().unwrap();
        assert_eq!(t.padding, PaddingScheme::None);
    }

    #[test]
    fn test_parse_rejects_unsupported() {
        assert!("DES/CBC/PKCS5Padding".parse::<Transformation>().is_err());
        assert!("AES/GCM/NoPadding".parse::<Transformation>().is_err());
        assert!("AES/CBC".parse::<Transformation>().is_err());
        assert!("".parse::<Transformation>().is_err());
    }
}
