//! Syntax-level analysis of Swift sources.
//!
//! - `swift`: tree-sitter parser producing a [`ParsedFile`]
//! - `tokens`: token adjacency over the parsed tree ([`TokenContext`])

mod parsed;
mod swift;
mod tokens;

pub use parsed::ParsedFile;
pub use swift::{SwiftParser, SWIFT_EXTENSIONS};
pub use tokens::{Token, TokenContext};
