use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `linehash.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LinehashConfigV1 {
    /// Optional schema string for tooling (`linehash.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Directory that report URIs are resolved against. Relative to the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,

    /// How to write the annotated report: `compact` (default) or `pretty`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Hash distinct files concurrently (default true).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,

    /// How many fingerprint conflicts to emit as CI annotations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations_max: Option<u32>,
}
