use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fingerprint of one source line: `<hash hex>:<occurrence ordinal>`.
///
/// The hex form is the lowercase, unpadded rendering of the unsigned 64-bit rolling hash.
/// The ordinal is 1-based and counts how many lines of the same file, up to and including
/// this one, produced the same hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct LineFingerprint {
    pub hash: u64,
    pub ordinal: u32,
}

impl LineFingerprint {
    pub fn new(hash: u64, ordinal: u32) -> Self {
        Self { hash, ordinal }
    }
}

impl fmt::Display for LineFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}:{}", self.hash, self.ordinal)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseFingerprintError {
    #[error("missing ':' separator in fingerprint {0:?}")]
    MissingSeparator(String),
    #[error("invalid hash hex in fingerprint {0:?}")]
    InvalidHash(String),
    #[error("invalid occurrence ordinal in fingerprint {0:?}")]
    InvalidOrdinal(String),
}

impl FromStr for LineFingerprint {
    type Err = ParseFingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hash, ordinal) = s
            .split_once(':')
            .ok_or_else(|| ParseFingerprintError::MissingSeparator(s.to_string()))?;
        let hash = u64::from_str_radix(hash, 16)
            .map_err(|_| ParseFingerprintError::InvalidHash(s.to_string()))?;
        let ordinal = ordinal
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ParseFingerprintError::InvalidOrdinal(s.to_string()))?;
        Ok(Self { hash, ordinal })
    }
}

impl From<LineFingerprint> for String {
    fn from(value: LineFingerprint) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for LineFingerprint {
    type Error = ParseFingerprintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
