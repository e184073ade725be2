//! Switch identifier format, validation and generation.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Maximum (and generated) identifier length.
pub const ID_LEN: usize = 32;

/// Maximum length of a switch password.
pub const PASSWORD_LEN: usize = 32;

/// Characters allowed in a switch identifier.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890";

const ALLOWED: [bool; 256] = build_allowed_table();

const fn build_allowed_table() -> [bool; 256] {
    let mut table = [false; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = true;
        i += 1;
    }
    table
}

#[inline]
fn is_allowed(ch: char) -> bool {
    ch.is_ascii() && ALLOWED[ch as usize]
}

/// Returns true when `raw` is a well-formed switch identifier.
///
/// The empty string passes; callers that treat it as "no identifier" must
/// check for it themselves.
pub fn is_valid(raw: &str) -> bool {
    // Multi-byte UTF-8 sequences only contain bytes >= 0x80, which the table rejects.
    raw.len() <= ID_LEN && raw.bytes().all(|b| ALLOWED[b as usize])
}

/// Reason a candidate identifier was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidId {
    #[error("identifier too long: limit={limit} actual={actual}")]
    TooLong { limit: usize, actual: usize },

    #[error("identifier contains {ch:?} at byte {index}")]
    InvalidChar { ch: char, index: usize },
}

fn check(raw: &str) -> Result<(), InvalidId> {
    if raw.len() > ID_LEN {
        return Err(InvalidId::TooLong {
            limit: ID_LEN,
            actual: raw.len(),
        });
    }

    match raw.char_indices().find(|(_, ch)| !is_allowed(*ch)) {
        Some((index, ch)) => Err(InvalidId::InvalidChar { ch, index }),
        None => Ok(()),
    }
}

/// A validated switch identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SwitchId(String);

impl SwitchId {
    /// Validates `raw` and wraps it.
    pub fn parse(raw: impl Into<String>) -> Result<Self, InvalidId> {
        let raw = raw.into();
        check(&raw)?;
        Ok(Self(raw))
    }

    /// Generates a full-length identifier from the thread-local RNG.
    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    /// Generates a full-length identifier, each character drawn uniformly
    /// from [`ALPHABET`].
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let id = (0..ID_LEN)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SwitchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SwitchId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for SwitchId {
    type Err = InvalidId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SwitchId {
    type Error = InvalidId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for SwitchId {
    type Error = InvalidId;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<SwitchId> for String {
    fn from(id: SwitchId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn table_matches_alphabet() {
        for b in 0u8..=255 {
            assert_eq!(ALLOWED[b as usize], ALPHABET.contains(&b), "byte {b:#04x}");
        }
    }

    #[test]
    fn alphabet_has_no_duplicates() {
        let mut seen = [false; 256];
        for &b in ALPHABET {
            assert!(!seen[b as usize], "duplicate {}", b as char);
            seen[b as usize] = true;
        }
    }

    #[test]
    fn empty_is_valid() {
        assert!(is_valid(""));
        assert!(SwitchId::parse("").unwrap().is_empty());
    }

    #[test]
    fn reports_first_bad_char() {
        let err = SwitchId::parse("bad id").unwrap_err();
        assert_eq!(err, InvalidId::InvalidChar { ch: ' ', index: 3 });
    }

    #[test]
    fn reports_length_before_chars() {
        let raw = "-".repeat(ID_LEN + 1);
        let err = SwitchId::parse(raw).unwrap_err();
        assert_eq!(
            err,
            InvalidId::TooLong {
                limit: ID_LEN,
                actual: ID_LEN + 1
            }
        );
    }

    #[test]
    fn non_ascii_rejected() {
        assert!(!is_valid("caf\u{e9}"));
        let err = SwitchId::parse("caf\u{e9}").unwrap_err();
        assert_eq!(err, InvalidId::InvalidChar { ch: '\u{e9}', index: 3 });
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let a = SwitchId::random_with(&mut StdRng::seed_from_u64(7));
        let b = SwitchId::random_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), ID_LEN);
    }

    #[test]
    fn serde_revalidates() {
        let id: SwitchId = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(id.as_str(), "abc123");
        assert!(serde_json::from_str::<SwitchId>("\"bad id\"").is_err());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123\"");
    }
}
