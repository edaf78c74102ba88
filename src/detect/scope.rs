//! Scope gating for the missing-dot check.
//!
//! Decides, node by node, whether a subtree can contain a modifier chain.
//! Only bodies declared to produce `some View` are checked; type and
//! initializer bodies, `do`/`catch` blocks, `await` expressions and
//! statement conditions are skipped because bare calls are normal there.

use tree_sitter::Node;

/// Declared type that marks a body as a modifier chain.
pub const MARKER_TYPE: &str = "some View";

/// Traversal decision for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeDirective {
    /// Skip the node and its whole subtree.
    Prune,
    /// Visit children in the enclosing scope.
    PassThrough,
    /// Visit children with checking switched off.
    EnterOpaque,
    /// Visit children with checking switched on.
    EnterChecked,
}

/// Keywords that introduce a `class_declaration` in tree-sitter-swift.
const TYPE_KEYWORDS: &[&str] = &["class", "struct", "actor", "enum", "extension"];

/// Statements whose condition list is skipped.
const CONDITION_OWNERS: &[&str] = &["if_statement", "guard_statement", "while_statement"];

/// Classify a node.
pub fn classify(node: Node, source: &[u8]) -> ScopeDirective {
    match node.kind() {
        "class_declaration" => match type_keyword(node) {
            Some("class" | "actor") => ScopeDirective::Prune,
            _ => ScopeDirective::PassThrough,
        },
        "init_declaration" | "protocol_declaration" | "subscript_declaration" => {
            ScopeDirective::Prune
        }
        "do_statement" | "catch_block" | "await_expression" => ScopeDirective::Prune,
        "function_declaration" => marker_scope(return_type_text(node, source)),
        "property_declaration" => marker_scope(annotation_text(node, source)),
        _ => ScopeDirective::PassThrough,
    }
}

fn marker_scope(declared: Option<&str>) -> ScopeDirective {
    if declared == Some(MARKER_TYPE) {
        ScopeDirective::EnterChecked
    } else {
        ScopeDirective::EnterOpaque
    }
}

/// `class`, `struct`, `actor`, `enum` or `extension`.
fn type_keyword(node: Node) -> Option<&'static str> {
    if let Some(kind) = node.child_by_field_name("declaration_kind") {
        return Some(kind.kind());
    }
    let mut cursor = node.walk();
    let keyword = node
        .children(&mut cursor)
        .map(|child| child.kind())
        .find(|kind| TYPE_KEYWORDS.contains(kind));
    keyword
}

/// Text of a function's return type, from after `->` up to the body.
fn return_type_text<'s>(node: Node, source: &'s [u8]) -> Option<&'s str> {
    let mut cursor = node.walk();
    let mut children = node.children(&mut cursor);
    children.by_ref().find(|child| child.kind() == "->")?;

    let mut start = None;
    let mut end = None;
    for child in children {
        if matches!(child.kind(), "function_body" | "type_constraints" | "where_clause") {
            break;
        }
        if matches!(child.kind(), "comment" | "multiline_comment") {
            continue;
        }
        start.get_or_insert(child.start_byte());
        end = Some(child.end_byte());
    }

    let text = std::str::from_utf8(source.get(start?..end?)?).ok()?;
    Some(text.trim())
}

/// Text of the first binding's type annotation, without the colon.
fn annotation_text<'s>(node: Node, source: &'s [u8]) -> Option<&'s str> {
    let mut cursor = node.walk();
    let annotation = node
        .children(&mut cursor)
        .take_while(|child| child.kind() != ",")
        .find(|child| child.kind() == "type_annotation")?;

    let text = annotation.utf8_text(source).ok()?;
    Some(text.trim().trim_start_matches(':').trim())
}

/// Children of `node` that the visitor should descend into.
///
/// For `if`, `guard` and `while` statements the condition list is dropped:
/// children in the `condition` field, and anything ending before the body's
/// opening brace.
pub fn visible_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    if !CONDITION_OWNERS.contains(&node.kind()) {
        return node.children(&mut cursor).collect();
    }

    let body_start = node
        .children(&mut cursor)
        .find(|child| child.kind() == "{")
        .map(|brace| brace.start_byte());

    let mut visible = Vec::new();
    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            let in_condition = cursor.field_name() == Some("condition")
                || body_start.is_some_and(|start| child.end_byte() <= start);
            if !in_condition {
                visible.push(child);
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }
    visible
}
