//! Pure fingerprinting logic (no IO).
//!
//! Input: file contents and already-resolved result targets, supplied elsewhere.
//! Output: per-line fingerprints and the writes they imply on the report.

#![forbid(unsafe_code)]

pub mod hasher;
pub mod plan;
pub mod write;

#[cfg(test)]
mod proptest;

pub use hasher::{BLOCK_SIZE, LineHasher, hash_lines};
pub use plan::{FileTargets, FingerprintPlan, LineMatch, ResultRef, target_line};
pub use write::{FingerprintWrite, record_fingerprint};
