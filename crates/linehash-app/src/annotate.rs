//! The `annotate` use case: add `primaryLocationLineHash` to every result we can anchor.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use linehash_domain::{
    FileTargets, FingerprintPlan, FingerprintWrite, LineMatch, ResultRef, record_fingerprint,
    target_line,
};
use linehash_repo::{SourceRoot, open_source_root, read_source, resolve_location};
use linehash_settings::OutputStyle;
use linehash_types::{LineFingerprint, SarifLog, SarifResult};
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Input for the annotate use case.
#[derive(Clone, Debug)]
pub struct AnnotateInput<'a> {
    /// Directory all report URIs are resolved against.
    pub source_root: &'a Utf8Path,
    /// Hash distinct files concurrently.
    pub parallel: bool,
}

/// A result whose stored line hash was kept although it differs from the computed one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FingerprintConflict {
    pub path: Utf8PathBuf,
    pub line: u32,
    pub existing: String,
    pub computed: LineFingerprint,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnnotateSummary {
    /// Source root the report was resolved against.
    pub source_root: SourceRoot,
    pub results_total: u32,
    /// Results that received a line hash in this pass.
    pub fingerprinted: u32,
    /// Results that already carried the computed line hash.
    pub unchanged: u32,
    /// Results left without a computed line hash (unresolvable location, unreadable file,
    /// or a line past the end of the file).
    pub skipped: u32,
    pub files_hashed: u32,
    pub conflicts: Vec<FingerprintConflict>,
}

/// Output from [`annotate_sarif_json`].
#[derive(Clone, Debug)]
pub struct AnnotateOutput {
    /// The annotated report, serialized.
    pub json: String,
    pub summary: AnnotateSummary,
}

/// Parse a SARIF document, annotate it, and serialize it again.
pub fn annotate_sarif_json(
    text: &str,
    input: &AnnotateInput<'_>,
    style: OutputStyle,
) -> anyhow::Result<AnnotateOutput> {
    let mut report: SarifLog = serde_json::from_str(text).context("parse SARIF json")?;
    let summary = annotate_report(&mut report, input)?;
    let json = match style {
        OutputStyle::Compact => serde_json::to_string(&report),
        OutputStyle::Pretty => serde_json::to_string_pretty(&report),
    }
    .context("serialize SARIF json")?;
    Ok(AnnotateOutput { json, summary })
}

/// Annotate `report` in place.
///
/// Per-result problems never fail the call: such results are logged at debug level and left
/// without a line hash. Only an unusable source root is an error.
pub fn annotate_report(
    report: &mut SarifLog,
    input: &AnnotateInput<'_>,
) -> anyhow::Result<AnnotateSummary> {
    let source_root = open_source_root(input.source_root).context("open source root")?;

    let plan = plan_report(report, &source_root);
    let results_total = report
        .runs()
        .iter()
        .map(|r| r.results().len() as u32)
        .sum::<u32>();

    let files: Vec<(&Utf8Path, &FileTargets)> = plan.files().collect();
    let hashed: Vec<(&Utf8Path, Option<Vec<LineMatch>>)> = if input.parallel {
        files
            .into_par_iter()
            .map(|(path, targets)| (path, hash_file(path, targets)))
            .collect()
    } else {
        files
            .into_iter()
            .map(|(path, targets)| (path, hash_file(path, targets)))
            .collect()
    };

    let mut summary = AnnotateSummary {
        source_root,
        results_total,
        ..AnnotateSummary::default()
    };

    // Applied in path order, so output does not depend on hashing order.
    for (path, matches) in hashed {
        let Some(matches) = matches else {
            continue;
        };
        summary.files_hashed += 1;

        for m in matches {
            let Some(result) = result_mut(report, m.result) else {
                continue;
            };
            match record_fingerprint(result, &m.fingerprint) {
                FingerprintWrite::Set => summary.fingerprinted += 1,
                FingerprintWrite::Unchanged => summary.unchanged += 1,
                FingerprintWrite::Conflict { existing } => {
                    warn!(
                        file = %path,
                        line = m.line,
                        existing = %existing,
                        computed = %m.fingerprint,
                        "calculated fingerprint differs from existing inconsistent fingerprint; keeping existing value"
                    );
                    summary.conflicts.push(FingerprintConflict {
                        path: path.to_path_buf(),
                        line: m.line,
                        existing,
                        computed: m.fingerprint,
                    });
                }
            }
        }
    }

    let anchored = summary.fingerprinted + summary.unchanged + summary.conflicts.len() as u32;
    summary.skipped = results_total.saturating_sub(anchored);

    info!(
        results = summary.results_total,
        fingerprinted = summary.fingerprinted,
        unchanged = summary.unchanged,
        skipped = summary.skipped,
        conflicts = summary.conflicts.len(),
        files = summary.files_hashed,
        "annotated report"
    );

    Ok(summary)
}

/// Resolve every result's primary location and group the targets by file.
fn plan_report(report: &SarifLog, source_root: &SourceRoot) -> FingerprintPlan {
    let mut plan = FingerprintPlan::new();

    for (run_idx, run) in report.runs().iter().enumerate() {
        let artifacts = run.artifacts();

        for (result_idx, result) in run.results().iter().enumerate() {
            let physical = result
                .primary_location()
                .and_then(|l| l.physical_location)
                .filter(|p| p.artifact_location.is_some());
            let Some(physical) = physical else {
                let raw = result
                    .primary_location_raw()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "<missing>".to_string());
                debug!(location = %raw, "unable to compute fingerprint for invalid location");
                continue;
            };
            let Some(artifact_location) = physical.artifact_location.as_ref() else {
                continue;
            };

            let Some(path) = resolve_location(artifact_location, artifacts, source_root) else {
                continue;
            };
            plan.add(
                path,
                target_line(&physical),
                ResultRef::new(run_idx, result_idx),
            );
        }
    }

    debug!(
        files = plan.file_count(),
        targets = plan.target_count(),
        "planned fingerprinting"
    );
    plan
}

fn hash_file(path: &Utf8Path, targets: &FileTargets) -> Option<Vec<LineMatch>> {
    match read_source(path) {
        Ok(content) => Some(targets.fingerprints(&content)),
        Err(err) => {
            debug!(file = %path, error = %format!("{err:#}"), "unable to read source file");
            None
        }
    }
}

fn result_mut(report: &mut SarifLog, at: ResultRef) -> Option<&mut SarifResult> {
    report
        .runs_mut()
        .get_mut(at.run)?
        .results_mut()
        .get_mut(at.result)
}
