//! Terminal output.
//!
//! - [`display`]: usage and version text, usage errors, batch summaries

pub mod display;

pub use display::{show_summary, show_usage_error, usage, version};
