//! Utility functions for rule implementations.

pub mod jinja;
pub mod skips;

// Re-export commonly used utilities for rule implementations
#[doc(inline)]
pub use jinja::unjinja;
#[doc(inline)]
pub use skips::{rule_skips_from_line, SkipDirective};
