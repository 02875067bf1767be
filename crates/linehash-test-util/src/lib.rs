//! Shared test utilities for the linehash workspace.
//!
//! The app, CLI and fuzz crates all build small SARIF reports against throwaway source trees;
//! the helpers live here so each of them does it the same way.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Key of the fingerprint linehash writes.
const LINE_HASH_KEY: &str = "primaryLocationLineHash";

/// A temporary directory used as a source root. Removed on drop.
pub struct SourceTree {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl SourceTree {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 temp dir");
        Self { _dir: dir, root }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Write `contents` to `rel` under the root, creating parent directories.
    pub fn write(&self, rel: &str, contents: &str) -> Utf8PathBuf {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(&path, contents).expect("write source file");
        path
    }
}

impl Default for SourceTree {
    fn default() -> Self {
        Self::new()
    }
}

/// A single-run SARIF 2.1.0 report holding `results`.
pub fn sarif_with_results(results: Vec<Value>) -> Value {
    json!({
        "$schema": "https://json.schemastore.org/sarif-2.1.0.json",
        "version": "2.1.0",
        "runs": [{
            "tool": { "driver": { "name": "fixture" } },
            "results": results
        }]
    })
}

/// A result whose primary location is `uri`, optionally at `line`.
pub fn result_at(uri: &str, line: Option<u32>) -> Value {
    let mut physical = json!({ "artifactLocation": { "uri": uri } });
    if let Some(line) = line {
        physical["region"] = json!({ "startLine": line });
    }
    json!({
        "ruleId": "fixture/rule",
        "message": { "text": "fixture" },
        "locations": [{ "physicalLocation": physical }]
    })
}

/// The line hash of `runs[run].results[result]`, if it is a string.
pub fn line_hash(report: &Value, run: usize, result: usize) -> Option<&str> {
    report
        .get("runs")?
        .get(run)?
        .get("results")?
        .get(result)?
        .get("partialFingerprints")?
        .get(LINE_HASH_KEY)?
        .as_str()
}

/// Remove every line hash from a report, dropping `partialFingerprints` objects left empty.
///
/// Lets a golden comparison focus on "nothing else changed".
pub fn strip_line_hashes(mut report: Value) -> Value {
    let Some(runs) = report.get_mut("runs").and_then(Value::as_array_mut) else {
        return report;
    };
    for run in runs {
        let Some(results) = run.get_mut("results").and_then(Value::as_array_mut) else {
            continue;
        };
        for result in results {
            let Some(obj) = result.as_object_mut() else {
                continue;
            };
            let fingerprints = obj
                .get_mut("partialFingerprints")
                .and_then(Value::as_object_mut);
            let now_empty = match fingerprints {
                Some(fps) => {
                    fps.remove(LINE_HASH_KEY);
                    fps.is_empty()
                }
                None => false,
            };
            if now_empty {
                obj.remove("partialFingerprints");
            }
        }
    }
    report
}
