//! Token adjacency queries.
//!
//! Tree-sitter has no separate token stream; the leaves of the tree play
//! that role. `TokenContext` flattens the leaves once, in source order, and
//! answers "which token comes right before/after this node" by binary
//! search. Comments are trivia and never returned.

use tree_sitter::Node;

use super::ParsedFile;

/// Leaf kinds that are skipped when looking for neighbours.
const TRIVIA_KINDS: &[&str] = &["comment", "multiline_comment"];

/// A lexical token borrowed from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start_byte: usize,
    pub end_byte: usize,
}

/// Read-only view over the tokens of a parsed file.
pub struct TokenContext<'a> {
    tokens: Vec<Token<'a>>,
}

impl<'a> TokenContext<'a> {
    /// Collect the non-trivia leaves of `parsed` in source order.
    pub fn new(parsed: &'a ParsedFile) -> Self {
        let mut tokens = Vec::new();
        let mut cursor = parsed.tree.walk();
        let mut ascending = false;

        loop {
            if !ascending {
                let node = cursor.node();
                let trivia = TRIVIA_KINDS.contains(&node.kind());
                if !trivia && node.child_count() == 0 {
                    // Zero-width leaves are MISSING nodes inserted by error recovery.
                    if node.end_byte() > node.start_byte() {
                        tokens.push(Token {
                                text: node.utf8_text(&parsed.source).unwrap_or(""),
                            start_byte: node.start_byte(),
                            end_byte: node.end_byte(),
                        });
                    }
                } else if !trivia && cursor.goto_first_child() {
                    continue;
                }
            }

            if cursor.goto_next_sibling() {
                ascending = false;
            } else if cursor.goto_parent() {
                ascending = true;
            } else {
                break;
            }
        }

        Self { tokens }
    }

    /// The token immediately before `node`, or `None` at the start of the file.
    pub fn previous_token(&self, node: Node) -> Option<&Token<'a>> {
        let start = node.start_byte();
        let idx = self.tokens.partition_point(|t| t.end_byte <= start);
        idx.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    /// The token immediately after `node`, or `None` at the end of the file.
    pub fn next_token(&self, node: Node) -> Option<&Token<'a>> {
        let end = node.end_byte();
        let idx = self.tokens.partition_point(|t| t.start_byte < end);
        self.tokens.get(idx)
    }
}
