//! Config parsing and resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::LinehashConfigV1;
pub use resolve::{EffectiveConfig, OutputStyle, Overrides, ResolvedConfig};

use camino::Utf8Path;

/// Parse `linehash.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<LinehashConfigV1> {
    let cfg: LinehashConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config (defaults + config file + overrides).
///
/// `config_dir` is the directory relative paths in the config file are taken from.
pub fn resolve_config(
    cfg: LinehashConfigV1,
    config_dir: &Utf8Path,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, config_dir, overrides)
}
