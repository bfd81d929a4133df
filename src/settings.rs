//! Runtime settings loaded from a properties resource.
//!
//! The resource is read once at startup and never mutated afterwards. Each
//! accessor validates the value it returns, so an operation that needs a
//! setting fails before it touches any file.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, ensure};
use hashbrown::HashMap;

use crate::cipher::DigestAlgorithm;
use crate::config::{
    DEFAULT_INTERPRETER, DEFAULT_PROPERTIES, PROP_DIGEST_ALGORITHM, PROP_INTERPRETER, PROP_IV, PROP_KEY_SIZE, PROP_NO_DELETE, PROPERTIES_ENV,
};

/// Immutable view over the loaded properties.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    entries: HashMap<String, String>,
}

impl Settings {
    /// Loads the file named by `CRYPTO_PROPERTIES`, or the compiled-in
    /// resource when the variable is unset.
    pub fn load() -> Result<Self> {
        Self::resolve(std::env::var_os(PROPERTIES_ENV).as_deref())
    }

    /// Reads `path` when given, otherwise parses the compiled-in resource.
    pub fn resolve(path: Option<&OsStr>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(Path::new(path)),
            None => Ok(Self::parse(DEFAULT_PROPERTIES)),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("cannot load properties: {}", path.display()))?;
        Ok(Self::parse(&text))
    }

    /// Parses `.properties` text. Later duplicates replace earlier entries.
    pub fn parse(text: &str) -> Self {
        let mut entries = HashMap::new();
        let mut lines = text.lines();

        while let Some(line) = lines.next() {
            let mut logical = line.trim_start().to_owned();
            if logical.is_empty() || logical.starts_with('#') || logical.starts_with('!') {
                continue;
            }

            while continues(&logical) {
                logical.pop();
                match lines.next() {
                    Some(next) => logical.push_str(next.trim_start()),
                    None => break,
                }
            }

            let (key, value) = split_entry(&logical);
            entries.insert(unescape(key), unescape(value));
        }

        Self { entries }
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the value of a setting that must be present.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).with_context(|| format!("{key} not defined"))
    }

    /// Key length in bytes, derived from the key size in bits.
    pub fn key_size_bytes(&self) -> Result<usize> {
        let raw = self.require(PROP_KEY_SIZE)?.trim();
        let bits: usize = raw.parse().with_context(|| format!("{PROP_KEY_SIZE} not an integer: {raw}"))?;

        ensure!(bits > 0, "{PROP_KEY_SIZE} must be positive: {raw}");
        ensure!(bits % 8 == 0, "{PROP_KEY_SIZE} not divisible by 8: {raw}");

        Ok(bits / 8)
    }

    /// Fixed initialization vector, if one is configured.
    pub fn iv(&self) -> Option<&[u8]> {
        self.get(PROP_IV).filter(|iv| !iv.is_empty()).map(str::as_bytes)
    }

    pub fn digest_algorithm(&self) -> Result<DigestAlgorithm> {
        let name = self.require(PROP_DIGEST_ALGORITHM)?.trim();
        DigestAlgorithm::from_str(name).map_err(|_| anyhow!("{PROP_DIGEST_ALGORITHM} not supported: {name}"))
    }

    /// Whether shredded files stay on disk instead of being deleted.
    pub fn no_delete(&self) -> bool {
        self.get(PROP_NO_DELETE).is_some_and(|value| value.trim() == "true")
    }

    pub fn interpreter(&self) -> &str {
        self.get(PROP_INTERPRETER).map(str::trim).filter(|value| !value.is_empty()).unwrap_or(DEFAULT_INTERPRETER)
    }

    /// All entries sorted by key.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        entries.sort_unstable_by_key(|&(key, _)| key);
        entries
    }
}

/// An odd run of trailing backslashes continues the logical line.
fn continues(line: &str) -> bool {
    line.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut end = line.len();

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                end = i;
                break;
            }
            c if c.is_whitespace() => {
                end = i;
                break;
            }
            _ => {}
        }
    }

    let rest = line[end..].trim_start();
    let value = rest.strip_prefix(&['=', ':'][..]).unwrap_or(rest).trim_start();
    (&line[..end], value)
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let code: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&code, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&code);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    out
}
