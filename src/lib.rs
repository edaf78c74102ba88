//! dotcheck - missing-dot lint for SwiftUI modifier chains.
//!
//! Inside a `some View` body, `Text("Hi") padding()` compiles into two
//! separate expressions instead of one modified view. dotcheck flags bare
//! calls to known SwiftUI modifiers that are missing their leading dot.
//!
//! # Architecture
//!
//! The codebase uses tree-sitter for AST-based analysis:
//!
//! - `analysis`: Swift parsing and the token stream used for adjacency checks
//! - `detect`: The modifier catalog, scope gate, chain visitor and runner
//! - `config`: YAML configuration schema and discovery
//! - `report`: Output formatting (pretty, JSON, SARIF)
//! - `cli`: Command-line entry points

pub mod analysis;
pub mod cli;
pub mod config;
pub mod detect;
pub mod report;

pub use analysis::{ParsedFile, SwiftParser, TokenContext};
pub use config::Config;
pub use detect::{scan, DetectionResult, MissingDotConfig, ModifierCatalog, Runner, Violation};
