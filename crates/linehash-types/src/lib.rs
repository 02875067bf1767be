//! Stable DTOs and IDs used across the linehash workspace.
//!
//! This crate is intentionally boring:
//! - the subset of the SARIF report shape that fingerprinting reads and writes
//! - the `hash:ordinal` line fingerprint value
//! - stable string IDs

#![forbid(unsafe_code)]

pub mod fingerprint;
pub mod ids;
pub mod sarif;

pub use fingerprint::{LineFingerprint, ParseFingerprintError};
pub use sarif::{
    Artifact, ArtifactLocation, Location, PhysicalLocation, Region, Run, SarifLog, SarifResult,
};
