//! The subset of the SARIF log shape that fingerprinting reads and writes.
//!
//! Every object keeps its unknown members in a flattened `extra` map, so a parse/serialize
//! round trip never drops data. Location objects are kept as raw JSON on the result and
//! parsed into typed views on demand: a malformed location only disqualifies its own result,
//! never the whole report.

use crate::ids::PRIMARY_LOCATION_LINE_HASH;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SarifLog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runs: Option<Vec<Run>>,

    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl SarifLog {
    pub fn runs(&self) -> &[Run] {
        self.runs.as_deref().unwrap_or_default()
    }

    pub fn runs_mut(&mut self) -> &mut [Run] {
        self.runs.as_deref_mut().unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// Shared artifact table that locations may point into by index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<Vec<Artifact>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<SarifResult>>,

    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Run {
    pub fn artifacts(&self) -> &[Artifact] {
        self.artifacts.as_deref().unwrap_or_default()
    }

    pub fn results(&self) -> &[SarifResult] {
        self.results.as_deref().unwrap_or_default()
    }

    pub fn results_mut(&mut self) -> &mut [SarifResult] {
        self.results.as_deref_mut().unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<JsonValue>,

    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Artifact {
    /// The artifact's location, if it is a well-formed location object.
    pub fn artifact_location(&self) -> Option<ArtifactLocation> {
        match &self.location {
            Some(v @ JsonValue::Object(_)) => serde_json::from_value(v.clone()).ok(),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<JsonValue>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial_fingerprints: Option<Map<String, JsonValue>>,

    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl SarifResult {
    /// Raw JSON of the first location, if any.
    pub fn primary_location_raw(&self) -> Option<&JsonValue> {
        self.locations.as_ref().and_then(|l| l.first())
    }

    /// Typed view of the first location, if it parses.
    pub fn primary_location(&self) -> Option<Location> {
        self.primary_location_raw()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// The current `primaryLocationLineHash`, if present and non-empty.
    pub fn line_hash(&self) -> Option<&JsonValue> {
        self.partial_fingerprints
            .as_ref()
            .and_then(|m| m.get(PRIMARY_LOCATION_LINE_HASH))
            .filter(|v| !is_blank(v))
    }

    pub fn set_line_hash(&mut self, value: String) {
        self.partial_fingerprints
            .get_or_insert_with(Map::new)
            .insert(PRIMARY_LOCATION_LINE_HASH.to_string(), JsonValue::String(value));
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_location: Option<PhysicalLocation>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_location: Option<ArtifactLocation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
}

/// A reference to a file: either an inline `uri`, or an `index` into the run's artifacts.
///
/// Both members are kept as raw JSON so that wrongly-typed values can be reported and
/// skipped rather than failing the parse.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<JsonValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<JsonValue>,
}

impl ArtifactLocation {
    pub fn with_uri(uri: impl Into<String>) -> Self {
        Self {
            uri: Some(JsonValue::String(uri.into())),
            index: None,
        }
    }

    pub fn with_index(index: u64) -> Self {
        Self {
            uri: None,
            index: Some(JsonValue::from(index)),
        }
    }

    /// Index addressing applies only when there is no usable inline URI.
    pub fn has_uri(&self) -> bool {
        self.uri.as_ref().is_some_and(|v| !is_blank(v))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_line: Option<u32>,
}

fn is_blank(v: &JsonValue) -> bool {
    match v {
        JsonValue::Null => true,
        JsonValue::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trip_keeps_unknown_members() {
        let input = json!({
            "$schema": "https://json.schemastore.org/sarif-2.1.0.json",
            "version": "2.1.0",
            "runs": [{
                "tool": { "driver": { "name": "scanner" } },
                "artifacts": [{ "location": { "uri": "a.js" }, "length": 10 }],
                "results": [{
                    "ruleId": "js/unused",
                    "message": { "text": "unused" },
                    "locations": [{
                        "physicalLocation": {
                            "artifactLocation": { "uri": "a.js", "uriBaseId": "%SRCROOT%" },
                            "region": { "startLine": 3, "startColumn": 1 }
                        }
                    }]
                }]
            }]
        });

        let log: SarifLog = serde_json::from_value(input.clone()).expect("parse");
        let back = serde_json::to_value(&log).expect("serialize");
        assert_eq!(back, input);
    }

    #[test]
    fn primary_location_reads_region_start_line() {
        let result: SarifResult = serde_json::from_value(json!({
            "locations": [
                {
                    "physicalLocation": {
                        "artifactLocation": { "uri": "a.js" },
                        "region": { "startLine": 7 }
                    }
                },
                { "physicalLocation": { "artifactLocation": { "uri": "b.js" } } }
            ]
        }))
        .expect("parse");

        let loc = result.primary_location().expect("primary location");
        let phys = loc.physical_location.expect("physical");
        assert_eq!(phys.region.and_then(|r| r.start_line), Some(7));
        assert_eq!(
            phys.artifact_location.and_then(|a| a.uri),
            Some(json!("a.js"))
        );
    }

    #[test]
    fn malformed_location_is_isolated_to_its_result() {
        let log: SarifLog = serde_json::from_value(json!({
            "runs": [{
                "results": [
                    { "locations": ["not an object"] },
                    { "locations": [{ "physicalLocation": { "region": { "startLine": "x" } } }] },
                    { "locations": [{ "physicalLocation": { "artifactLocation": { "uri": 1 } } }] }
                ]
            }]
        }))
        .expect("parse");

        let results = log.runs()[0].results();
        assert!(results[0].primary_location().is_none());
        assert!(results[1].primary_location().is_none());
        let third = results[2].primary_location().expect("typed view");
        let uri = third
            .physical_location
            .and_then(|p| p.artifact_location)
            .and_then(|a| a.uri);
        assert_eq!(uri, Some(json!(1)));
    }

    #[test]
    fn missing_collections_stay_missing() {
        let log: SarifLog = serde_json::from_value(json!({ "version": "2.1.0" })).expect("parse");
        assert!(log.runs().is_empty());
        let back = serde_json::to_value(&log).expect("serialize");
        assert_eq!(back, json!({ "version": "2.1.0" }));
    }

    #[test]
    fn line_hash_treats_blank_as_absent() {
        let mut result = SarifResult::default();
        assert!(result.line_hash().is_none());

        result.partial_fingerprints = Some(Map::from_iter([(
            PRIMARY_LOCATION_LINE_HASH.to_string(),
            json!(""),
        )]));
        assert!(result.line_hash().is_none());

        result.set_line_hash("abc:1".to_string());
        assert_eq!(result.line_hash(), Some(&json!("abc:1")));
    }

    #[test]
    fn artifact_location_requires_object() {
        let good = Artifact {
            location: Some(json!({ "uri": "src/a.rs" })),
            ..Artifact::default()
        };
        let bad = Artifact {
            location: Some(json!("src/a.rs")),
            ..Artifact::default()
        };
        assert_eq!(
            good.artifact_location(),
            Some(ArtifactLocation::with_uri("src/a.rs"))
        );
        assert!(bad.artifact_location().is_none());
    }

    #[test]
    fn has_uri_ignores_null_and_empty() {
        assert!(ArtifactLocation::with_uri("a").has_uri());
        assert!(!ArtifactLocation::with_index(0).has_uri());
        let null_uri = ArtifactLocation {
            uri: Some(JsonValue::Null),
            index: Some(json!(0)),
        };
        assert!(!null_uri.has_uri());
        let empty = ArtifactLocation {
            uri: Some(json!("")),
            index: None,
        };
        assert!(!empty.has_uri());
    }
}
