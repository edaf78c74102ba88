//! Detection of missing-dot SwiftUI modifiers.
//!
//! - `modifiers`: the catalog of known modifier names
//! - `scope`: which declarations and statements are searched
//! - `missing_dot`: the traversal itself
//! - `suppress`: inline `dotcheck:ignore` comments
//! - `runner`: scanning files and merging results

pub mod missing_dot;
pub mod modifiers;
mod runner;
pub mod scope;
mod suppress;
mod types;

pub use missing_dot::{scan, ChainVisitor, MissingDotConfig, RuleDescription, RuleKind, DESCRIPTION};
pub use modifiers::ModifierCatalog;
pub use runner::Runner;
pub use scope::{ScopeDirective, MARKER_TYPE};
pub use suppress::{
    filter_suppressed, matches_suppression, parse_suppressions, SuppressedViolation, Suppression,
    SuppressionType,
};
pub use types::{DetectionResult, Severity, Violation, ViolationRule};
