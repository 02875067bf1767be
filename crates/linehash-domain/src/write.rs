//! First-writer-wins recording of a computed fingerprint onto a result.

use linehash_types::{LineFingerprint, SarifResult};
use serde_json::Value as JsonValue;

/// What happened when a fingerprint was offered to a result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FingerprintWrite {
    /// The result had no line hash; it now carries the computed one.
    Set,
    /// The result already carried exactly this value.
    Unchanged,
    /// The result carries a different value, which is kept.
    Conflict { existing: String },
}

/// Offer `fingerprint` to `result`.
///
/// An existing, non-empty `primaryLocationLineHash` is never overwritten.
pub fn record_fingerprint(
    result: &mut SarifResult,
    fingerprint: &LineFingerprint,
) -> FingerprintWrite {
    let computed = fingerprint.to_string();
    let existing = result.line_hash().map(|v| match v {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    });

    match existing {
        None => {
            result.set_line_hash(computed);
            FingerprintWrite::Set
        }
        Some(existing) if existing == computed => FingerprintWrite::Unchanged,
        Some(existing) => FingerprintWrite::Conflict { existing },
    }
}
