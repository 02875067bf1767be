//! Stable string IDs. Changing any of these is a breaking change for consumers of the output.

/// Key under `result.partialFingerprints` that carries the line hash.
pub const PRIMARY_LOCATION_LINE_HASH: &str = "primaryLocationLineHash";

/// Scheme prefix accepted (and stripped) on artifact URIs.
pub const FILE_URI_PREFIX: &str = "file://";

/// Schema id of the `linehash.toml` config file.
pub const SCHEMA_CONFIG_V1: &str = "linehash.config.v1";
