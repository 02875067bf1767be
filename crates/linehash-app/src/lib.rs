//! Use case orchestration for linehash.
//!
//! This crate provides the application layer: use cases that coordinate the domain, repo, and
//! render layers. It is intentionally thin and delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod annotate;
mod hash;
mod render;

pub use annotate::{
    AnnotateInput, AnnotateOutput, AnnotateSummary, FingerprintConflict, annotate_report,
    annotate_sarif_json,
};
pub use hash::{format_line_hashes, run_hash_file};
pub use render::{render_annotations, render_markdown, to_renderable};
