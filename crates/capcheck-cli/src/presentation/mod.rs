//! Shared CLI presentation utilities.
//!
//! Rendering functions return `String`s; handlers decide where they go.
//!
//! # Guidelines
//!
//! - Keep this module format-only: no domain transforms
//! - Verdicts come from the evaluator, never recomputed here

pub mod report;
pub mod snapshot;
pub mod tables;

// Re-export commonly used items
pub use report::render_report;
pub use snapshot::render_snapshot;
pub use tables::{Palette, format_optional, separator, truncate_string, yes_no};
