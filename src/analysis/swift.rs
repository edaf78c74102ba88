//! Swift parsing using tree-sitter.

use std::path::Path;

use tree_sitter::{Language, Parser};

use super::ParsedFile;

/// File extensions handled by the Swift parser (without dot).
pub const SWIFT_EXTENSIONS: &[&str] = &["swift"];

/// Parses Swift source into a [`ParsedFile`].
///
/// `tree_sitter::Parser` is not `Sync`, so a fresh parser is created per
/// call. This keeps `SwiftParser` shareable across rayon workers.
pub struct SwiftParser {
    language: Language,
}

impl SwiftParser {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_swift::LANGUAGE.into(),
        }
    }

    fn create_parser(&self) -> anyhow::Result<Parser> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }

    /// Parse a source file.
    ///
    /// Syntax errors do not fail the parse: the tree is returned with
    /// `ERROR` nodes wherever the parser recovered.
    pub fn parse(&self, path: &Path, source: &[u8]) -> anyhow::Result<ParsedFile> {
        let mut parser = self.create_parser()?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse Swift source: {}", path.display()))?;

        Ok(ParsedFile {
            tree,
            source: source.to_vec(),
            path: path.to_string_lossy().to_string(),
        })
    }
}

impl Default for SwiftParser {
    fn default() -> Self {
        Self::new()
    }
}
