//! Grouping of fingerprint targets by resolved file.
//!
//! Each distinct file is hashed once, no matter how many results point into it.

use crate::hasher::hash_lines;
use camino::{Utf8Path, Utf8PathBuf};
use linehash_types::{LineFingerprint, PhysicalLocation};
use std::collections::BTreeMap;

/// Position of a result inside a report: `runs[run].results[result]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResultRef {
    pub run: usize,
    pub result: usize,
}

impl ResultRef {
    pub fn new(run: usize, result: usize) -> Self {
        Self { run, result }
    }
}

/// The line a result is anchored to.
///
/// Results without a region pertain to the whole file and use line 1.
pub fn target_line(location: &PhysicalLocation) -> u32 {
    location
        .region
        .as_ref()
        .and_then(|r| r.start_line)
        .unwrap_or(1)
}

/// Results waiting for a fingerprint from one file, keyed by target line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileTargets {
    lines: BTreeMap<u32, Vec<ResultRef>>,
}

impl FileTargets {
    pub fn push(&mut self, line: u32, result: ResultRef) {
        self.lines.entry(line).or_default().push(result);
    }

    /// Number of results (not lines) targeting this file.
    pub fn len(&self) -> usize {
        self.lines.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Hash `content` once and pair each target with the fingerprint of its line.
    ///
    /// Targets whose line does not exist in `content` are left out.
    pub fn fingerprints(&self, content: &str) -> Vec<LineMatch> {
        let mut out = Vec::with_capacity(self.len());
        for (line, fingerprint) in hash_lines(content) {
            let Some(results) = self.lines.get(&line) else {
                continue;
            };
            out.extend(results.iter().map(|&result| LineMatch {
                result,
                line,
                fingerprint,
            }));
        }
        out
    }
}

/// A computed fingerprint destined for one result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineMatch {
    pub result: ResultRef,
    pub line: u32,
    pub fingerprint: LineFingerprint,
}

/// All fingerprint targets of a report, grouped by resolved file path.
///
/// Iteration is in path order so that applying the plan is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FingerprintPlan {
    files: BTreeMap<Utf8PathBuf, FileTargets>,
}

impl FingerprintPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: Utf8PathBuf, line: u32, result: ResultRef) {
        self.files.entry(path).or_default().push(line, result);
    }

    /// Number of distinct files to hash.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Number of results with a resolved target.
    pub fn target_count(&self) -> usize {
        self.files.values().map(FileTargets::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn files(&self) -> impl Iterator<Item = (&Utf8Path, &FileTargets)> {
        self.files.iter().map(|(p, t)| (p.as_path(), t))
    }
}
