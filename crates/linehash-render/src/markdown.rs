use crate::RenderableSummary;

pub fn render_summary_markdown(summary: &RenderableSummary) -> String {
    let c = &summary.counts;
    let mut out = String::new();

    out.push_str("# Linehash fingerprints\n\n");
    out.push_str(&format!(
        "- Results: {}\n- Fingerprinted: {} (new) / {} (already present)\n- Skipped: {}\n- Files hashed: {}\n\n",
        c.results_total, c.fingerprinted, c.unchanged, c.skipped, c.files_hashed
    ));

    if summary.conflicts.is_empty() {
        out.push_str("No inconsistent fingerprints.\n");
        return out;
    }

    out.push_str("## Inconsistent fingerprints\n\n");
    out.push_str("| File | Line | Existing | Computed |\n");
    out.push_str("|---|---|---|---|\n");
    for conflict in &summary.conflicts {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            code_cell(&conflict.path),
            conflict.line,
            code_cell(&conflict.existing),
            code_cell(&conflict.computed)
        ));
    }

    out
}

/// Render `text` as an inline code span that is safe inside a table cell.
///
/// Pipes are escaped, line breaks become spaces, and the backtick fence is made longer than
/// any backtick run in `text`.
fn code_cell(text: &str) -> String {
    let text = text
        .replace('|', "\\|")
        .replace("\r\n", " ")
        .replace(['\r', '\n'], " ");

    let mut longest = 0;
    let mut run = 0;
    for c in text.chars() {
        run = if c == '`' { run + 1 } else { 0 };
        longest = longest.max(run);
    }

    if longest == 0 {
        return format!("`{text}`");
    }
    let fence = "`".repeat(longest + 1);
    format!("{fence} {text} {fence}")
}
