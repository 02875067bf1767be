//! Rendering utilities for CI surfaces (Markdown step summary, GitHub annotations).

#![forbid(unsafe_code)]

mod gha;
mod markdown;
mod model;

pub use gha::render_github_annotations;
pub use markdown::render_summary_markdown;
pub use model::{RenderableConflict, RenderableCounts, RenderableSummary};
