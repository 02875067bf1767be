use crate::annotate::AnnotateSummary;
use linehash_render::{
    RenderableConflict, RenderableCounts, RenderableSummary, render_github_annotations,
    render_summary_markdown,
};

/// Convert a summary into the render layer's model.
///
/// Conflict paths become relative to the source root, with forward slashes.
pub fn to_renderable(summary: &AnnotateSummary) -> RenderableSummary {
    let conflicts = summary
        .conflicts
        .iter()
        .map(|c| {
            let rel = summary
                .source_root
                .relative(&c.path)
                .unwrap_or(c.path.as_path());
            RenderableConflict {
                path: rel.as_str().replace('\\', "/"),
                line: c.line,
                existing: c.existing.clone(),
                computed: c.computed.to_string(),
            }
        })
        .collect();

    RenderableSummary {
        counts: RenderableCounts {
            results_total: summary.results_total,
            fingerprinted: summary.fingerprinted,
            unchanged: summary.unchanged,
            skipped: summary.skipped,
            conflicts: summary.conflicts.len() as u32,
            files_hashed: summary.files_hashed,
        },
        conflicts,
    }
}

pub fn render_markdown(summary: &AnnotateSummary) -> String {
    render_summary_markdown(&to_renderable(summary))
}

/// GitHub workflow commands for at most `max` conflicts.
pub fn render_annotations(summary: &AnnotateSummary, max: usize) -> Vec<String> {
    let mut lines = render_github_annotations(&to_renderable(summary));
    lines.truncate(max);
    lines
}
