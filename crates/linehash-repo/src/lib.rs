//! Source tree adapters: resolve report locations to files, read source text.
//!
//! This crate is allowed to do filesystem IO. It never follows a location outside the
//! source root and never spawns processes.

#![forbid(unsafe_code)]

mod resolve;
mod source;

pub use resolve::{Unresolvable, normalize_lexically, resolve_location, try_resolve_location};
pub use source::{SourceRoot, SourceRootError, open_source_root, read_source};

/// Fuzz-friendly API for testing resolution robustness.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use camino::Utf8Path;
    use linehash_types::ArtifactLocation;

    /// Resolve an arbitrary URI string against a root that does not exist.
    ///
    /// Always returns `None` (nothing exists under the root), but walks every rejection
    /// branch on the way. **Never panics** on any input.
    pub fn resolve_uri(uri: &str) -> Option<String> {
        let root = Utf8Path::new("/nonexistent/linehash-fuzz-root");
        let root = super::SourceRoot::from_declared(root);
        super::resolve_location(&ArtifactLocation::with_uri(uri), &[], &root)
            .map(|p| p.into_string())
    }

    /// Lexically normalize an arbitrary path. **Never panics** on any input.
    pub fn normalize(path: &str) -> String {
        super::normalize_lexically(Utf8Path::new(path)).into_string()
    }
}
