use crate::RenderableSummary;

/// Render fingerprint conflicts as GitHub Actions workflow command annotations.
///
/// Format:
/// `::warning file={path},line={line}::{message}`
pub fn render_github_annotations(summary: &RenderableSummary) -> Vec<String> {
    summary
        .conflicts
        .iter()
        .map(|c| {
            let message = format!(
                "Calculated fingerprint {} but found existing inconsistent fingerprint {}",
                c.computed, c.existing
            );
            format!(
                "::warning file={},line={}::{}",
                escape_property(&c.path),
                c.line,
                escape_data(&message)
            )
        })
        .collect()
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
