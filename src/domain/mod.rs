//! Domain layer for trunk-yls
//!
//! CDD Principle: Domain Model - Pure types for directive diagnostics
//! - Contains diagnostics, ranges, lint reports and the error taxonomy
//! - Independent of file systems, YAML parsing and terminal output

pub mod diagnostics;

// Re-export main domain types for convenience
pub use diagnostics::*;
