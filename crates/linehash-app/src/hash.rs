use anyhow::Context;
use camino::Utf8Path;
use linehash_domain::hash_lines;
use linehash_repo::read_source;
use linehash_types::LineFingerprint;

/// Hash every line of the file at `path`.
pub fn run_hash_file(path: &Utf8Path) -> anyhow::Result<Vec<(u32, LineFingerprint)>> {
    let content = read_source(path).context("hash file")?;
    Ok(hash_lines(&content).collect())
}

/// One `line<TAB>hash:ordinal` row per line, newline terminated.
pub fn format_line_hashes(hashes: &[(u32, LineFingerprint)]) -> String {
    let mut out = String::new();
    for (line, fingerprint) in hashes {
        out.push_str(&format!("{line}\t{fingerprint}\n"));
    }
    out
}
