use crate::model::LinehashConfigV1;
use camino::{Utf8Path, Utf8PathBuf};
use linehash_types::ids::SCHEMA_CONFIG_V1;

const DEFAULT_ANNOTATIONS_MAX: usize = 10;

/// Serialization style of the annotated report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputStyle {
    #[default]
    Compact,
    Pretty,
}

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub source_root: Option<Utf8PathBuf>,
    pub output: Option<String>,
    pub parallel: Option<bool>,
    pub annotations_max: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveConfig {
    /// `None` when neither the command line nor the config file names one; the caller
    /// picks a fallback.
    pub source_root: Option<Utf8PathBuf>,
    pub output: OutputStyle,
    pub parallel: bool,
    pub annotations_max: usize,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            source_root: None,
            output: OutputStyle::Compact,
            parallel: true,
            annotations_max: DEFAULT_ANNOTATIONS_MAX,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: LinehashConfigV1,
    config_dir: &Utf8Path,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_CONFIG_V1
    {
        anyhow::bail!("unknown config schema: {schema} (expected {SCHEMA_CONFIG_V1})");
    }

    let mut effective = EffectiveConfig::default();

    // Command-line paths are taken as given; config paths are relative to the config file.
    effective.source_root = match overrides.source_root {
        Some(root) => Some(root),
        None => cfg.source_root.as_deref().map(|r| config_dir.join(r)),
    };

    if let Some(output) = overrides.output.as_deref().or(cfg.output.as_deref()) {
        effective.output = parse_output(output)?;
    }

    if let Some(parallel) = overrides.parallel.or(cfg.parallel) {
        effective.parallel = parallel;
    }

    if let Some(max) = overrides.annotations_max.or(cfg.annotations_max) {
        effective.annotations_max = max as usize;
    }

    Ok(ResolvedConfig { effective })
}

fn parse_output(v: &str) -> anyhow::Result<OutputStyle> {
    match v {
        "compact" => Ok(OutputStyle::Compact),
        "pretty" => Ok(OutputStyle::Pretty),
        other => anyhow::bail!("unknown output: {other} (expected compact|pretty)"),
    }
}
