#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderableCounts {
    pub results_total: u32,
    pub fingerprinted: u32,
    pub unchanged: u32,
    pub skipped: u32,
    pub conflicts: u32,
    pub files_hashed: u32,
}

/// A result whose stored line hash disagrees with the computed one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableConflict {
    /// Path relative to the source root, forward slashes.
    pub path: String,
    pub line: u32,
    pub existing: String,
    pub computed: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderableSummary {
    pub counts: RenderableCounts,
    pub conflicts: Vec<RenderableConflict>,
}
