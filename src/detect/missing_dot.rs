//! Missing leading dot on SwiftUI modifiers.
//!
//! Flags a bare call to a known modifier inside a body that builds a view,
//! where a `.` was almost certainly intended:
//!
//! ```swift
//! var body: some View {
//!     Text("Hello World")
//!         padding()        // should be `.padding()`
//! }
//! ```
//!
//! The check is a heuristic. It looks at the tokens around an identifier,
//! not at types, so a local function that shares a modifier's name can still
//! be reported, and a chain broken by more than one token is missed.

use serde::{Deserialize, Serialize};
use tree_sitter::Node;

use crate::analysis::{ParsedFile, TokenContext};

use super::modifiers::ModifierCatalog;
use super::scope::{self, ScopeDirective};
use super::{Severity, Violation, ViolationRule};

/// Settings for the missing-dot rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MissingDotConfig {
    #[serde(default = "default_severity")]
    pub severity: Severity,
    /// Extra modifier names, e.g. custom `View` extensions.
    #[serde(default)]
    pub additional_modifiers: Vec<String>,
}

fn default_severity() -> Severity {
    Severity::Error
}

impl Default for MissingDotConfig {
    fn default() -> Self {
        Self {
            severity: default_severity(),
            additional_modifiers: Vec::new(),
        }
    }
}

/// Kind of rule, as listed by `dotcheck rules`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Lint,
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleKind::Lint => write!(f, "lint"),
        }
    }
}

/// Static metadata describing a rule.
#[derive(Debug)]
pub struct RuleDescription {
    pub identifier: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: RuleKind,
    /// Sources that must produce no violation.
    pub non_triggering_examples: &'static [&'static str],
    /// Sources that must produce at least one violation.
    pub triggering_examples: &'static [&'static str],
}

pub static DESCRIPTION: RuleDescription = RuleDescription {
    identifier: "missing_dot_swiftui_modifier",
    name: "Missing Dot SwiftUI Modifier",
    description: "Missing leading dot in SwiftUI modifiers",
    kind: RuleKind::Lint,
    non_triggering_examples: &[
        r#"
struct ContentView: View {
    var body: some View {
        Text("Hello World")
            .padding()
    }
}
"#,
        r#"
struct ContentView: View {
    func header() -> Int {
        padding()
    }
}
"#,
        r#"
final class Coordinator {
    var body: some View {
        Text("Hello World")
            padding()
    }
}
"#,
        r#"
struct ContentView: View {
    var body: some View {
        Text("Hello World")
            .background(Color.red)
            .frame(width: 10)
    }
}
"#,
    ],
    triggering_examples: &[
        r#"
struct ContentView: View {
    var body: some View {
        Text("Hello World")
            padding()
    }
}
"#,
        r#"
struct ContentView: View {
    func header() -> some View {
        Image("logo")
            frame(width: 20, height: 20)
    }
}
"#,
        r#"
struct ContentView: View {
    var body: some View {
        Text("Hello World")
            overlay {
                Circle()
            }
    }
}
"#,
    ],
};

/// Parent node kinds under which a `simple_identifier` names something
/// rather than referring to it.
const NON_REFERENCE_PARENTS: &[&str] = &[
    "capture_list_item",
    "enum_entry",
    "function_declaration",
    "identifier",
    "import_declaration",
    "lambda_parameter",
    "navigation_suffix",
    "operator_declaration",
    "parameter",
    "pattern",
    "precedence_group_declaration",
    "protocol_function_declaration",
    "statement_label",
    "value_argument_label",
];

/// Scan a parsed file for modifier calls missing their leading dot.
///
/// Violations are returned in source order.
pub fn scan(parsed: &ParsedFile, config: &MissingDotConfig) -> Vec<Violation> {
    ChainVisitor::new(parsed, config).walk()
}

/// Depth-first walker holding the per-file state of one scan.
///
/// A visitor is built for a single file and consumed by [`walk`](Self::walk).
pub struct ChainVisitor<'a> {
    parsed: &'a ParsedFile,
    tokens: TokenContext<'a>,
    catalog: ModifierCatalog<'a>,
    severity: Severity,
    violations: Vec<Violation>,
}

impl<'a> ChainVisitor<'a> {
    pub fn new(parsed: &'a ParsedFile, config: &'a MissingDotConfig) -> Self {
        Self {
            parsed,
            tokens: TokenContext::new(parsed),
            catalog: ModifierCatalog::new(&config.additional_modifiers),
            severity: config.severity,
            violations: Vec::new(),
        }
    }

    /// Walk the whole tree and return the violations found.
    ///
    /// Uses an explicit stack, so deeply nested sources cannot exhaust the
    /// call stack. Children are pushed in reverse to keep pre-order.
    pub fn walk(mut self) -> Vec<Violation> {
        let parsed = self.parsed;
        let mut stack = vec![(parsed.tree.root_node(), false)];

        while let Some((node, checked)) = stack.pop() {
            let checked = match scope::classify(node, &parsed.source) {
                ScopeDirective::Prune => continue,
                ScopeDirective::PassThrough => checked,
                ScopeDirective::EnterOpaque => false,
                ScopeDirective::EnterChecked => true,
            };

            if checked && node.kind() == "simple_identifier" {
                self.check_identifier(node);
            }

            let children = scope::visible_children(node);
            stack.extend(children.into_iter().rev().map(|child| (child, checked)));
        }

        self.violations
    }

    fn check_identifier(&mut self, node: Node<'a>) {
        if !is_reference(node) {
            return;
        }

        let parsed = self.parsed;
        let name = parsed.node_text(node);
        if !self.catalog.contains(name) {
            return;
        }

        let previous = self.tokens.previous_token(node).map(|t| t.text);
        // `switch mask {` names a value, not a modifier.
        if previous == Some("switch") {
            return;
        }
        // String interpolation opens with a single `\(` token.
        if matches!(previous, Some("." | "(" | "\\(" | ":")) {
            return;
        }
        if !matches!(self.tokens.next_token(node).map(|t| t.text), Some("(" | "{")) {
            return;
        }

        let position = node.start_position();
        self.violations.push(Violation {
            rule: ViolationRule::MissingDotSwiftUIModifier,
            message: format!("Missing '{}' leading dot", name),
            file: parsed.path.clone(),
            line: position.row + 1,
            column: position.column + 1,
            offset: node.start_byte(),
            severity: self.severity,
        });
    }
}

/// Whether an identifier refers to a value rather than declaring a name.
fn is_reference(node: Node) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    if NON_REFERENCE_PARENTS.contains(&parent.kind()) {
        return false;
    }
    parent
        .child_by_field_name("name")
        .map_or(true, |name| name.id() != node.id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SwiftParser;
    use std::path::Path;

    fn parse(source: &str) -> ParsedFile {
        SwiftParser::new()
            .parse(Path::new("ContentView.swift"), source.as_bytes())
            .unwrap()
    }

    fn scan_source(source: &str) -> Vec<Violation> {
        scan(&parse(source), &MissingDotConfig::default())
    }

    fn scan_with(source: &str, additional: &[&str]) -> Vec<Violation> {
        let config = MissingDotConfig {
            additional_modifiers: additional.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        scan(&parse(source), &config)
    }

    fn in_body(lines: &str) -> String {
        format!(
            "struct ContentView: View {{\n    var body: some View {{\n{}\n    }}\n}}\n",
            lines
        )
    }

    #[test]
    fn test_leading_dot_is_clean() {
        let source = in_body("        Text(\"Hello World\")\n            .padding()");
        assert!(scan_source(&source).is_empty());
    }

    #[test]
    fn test_missing_dot_is_reported() {
        let source = in_body("        Text(\"Hello World\")\n            padding()");
        let violations = scan_source(&source);

        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.message, "Missing 'padding' leading dot");
        assert_eq!(v.severity, Severity::Error);
        assert_eq!(v.rule, ViolationRule::MissingDotSwiftUIModifier);
        assert_eq!(v.offset, source.find("padding").unwrap());
        assert_eq!(v.line, 4);
        assert_eq!(v.column, 13);
    }

    #[test]
    fn test_non_marker_function_is_ignored() {
        let source = r#"
struct ContentView: View {
    func count() -> Int {
        Text("Hello World")
            padding()
        return 1
    }
}
"#;
        assert!(scan_source(source).is_empty());
    }

    #[test]
    fn test_marker_function_is_checked() {
        let source = r#"
struct ContentView: View {
    func header() -> some View {
        Text("Hello World")
            padding()
    }
}
"#;
        assert_eq!(scan_source(source).len(), 1);
    }

    #[test]
    fn test_switch_subject_is_ignored() {
        let source = in_body(
            r#"        switch mask {
        case .full:
            Text("full")
        default:
            EmptyView()
        }"#,
        );
        assert!(scan_source(&source).is_empty());
    }

    #[test]
    fn test_argument_and_label_positions_are_ignored() {
        let source = in_body(
            r#"        Text("Hello World")
            .background(overlay())
            .modifier(style: padding())"#,
        );
        assert!(scan_source(&source).is_empty());
    }

    #[test]
    fn test_interpolation_is_ignored() {
        let source = in_body("        Text(\"a \\(offset(1))\")");
        assert!(scan_source(&source).is_empty());

        let source = in_body("        Text(\"a \\(value)\")\n            offset(x: 1)");
        assert_eq!(scan_source(&source).len(), 1);
    }

    #[test]
    fn test_adjacency_rejections_hold_for_every_builtin() {
        for name in crate::detect::modifiers::builtin_names() {
            let source = in_body(&format!(
                "        Text(\"Hello World\")\n            .{name}()\n            .background({name}())\n            .modifier(style: {name}())"
            ));
            let violations = scan_source(&source);
            assert!(violations.is_empty(), "{}: {:?}", name, violations);
        }
    }

    #[test]
    fn test_bare_mention_is_ignored() {
        let source = in_body("        Text(\"Hello World\")\n            padding");
        assert!(scan_source(&source).is_empty());
    }

    #[test]
    fn test_trailing_closure_is_reported() {
        let source = in_body(
            "        Text(\"Hello World\")\n            overlay {\n                Circle()\n            }",
        );
        let violations = scan_source(&source);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Missing 'overlay' leading dot");
    }

    #[test]
    fn test_pruned_declarations_are_never_reported() {
        for header in [
            "class Holder",
            "final class Holder",
            "actor Holder",
        ] {
            let source = format!(
                "{} {{\n    var body: some View {{\n        Text(\"a\")\n            padding()\n    }}\n}}\n",
                header
            );
            assert!(scan_source(&source).is_empty(), "{} should be skipped", header);
        }
    }

    #[test]
    fn test_initializer_and_subscript_are_skipped() {
        let source = r#"
struct ContentView: View {
    init() {
        padding()
    }
    subscript(index: Int) -> some View {
        Text("a")
            padding()
    }
}
"#;
        assert!(scan_source(source).is_empty());
    }

    #[test]
    fn test_extension_body_is_checked() {
        let source = r#"
extension ContentView {
    var footer: some View {
        Text("footer")
            padding()
    }
}
"#;
        assert_eq!(scan_source(source).len(), 1);
    }

    #[test]
    fn test_statement_contexts_are_skipped() {
        let source = r#"
struct ContentView: View {
    func load() async -> some View {
        do {
            padding()
        } catch {
            padding()
        }
        await padding()
        if disabled(true) {
            Text("a")
        }
        return Text("b")
    }
}
"#;
        assert!(scan_source(source).is_empty());
    }

    #[test]
    fn test_condition_body_is_still_checked() {
        let source = in_body(
            r#"        if disabled(true) {
            Text("a")
                padding()
        }"#,
        );
        let violations = scan_source(&source);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Missing 'padding' leading dot");
    }

    #[test]
    fn test_declarations_are_not_references() {
        let source = r#"
struct ContentView: View {
    func padding() -> some View {
        Text("a")
    }
}
"#;
        assert!(scan_source(source).is_empty());
    }

    #[test]
    fn test_unknown_names_are_ignored() {
        let source = in_body("        Text(\"Hello World\")\n            cardStyle()");
        assert!(scan_source(&source).is_empty());
    }

    #[test]
    fn test_additional_modifiers() {
        let source = in_body("        Text(\"Hello World\")\n            cardStyle()");
        let violations = scan_with(&source, &["cardStyle"]);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Missing 'cardStyle' leading dot");

        assert!(scan_with(&source, &["cardstyle"]).is_empty());
        assert!(scan_with(&source, &[""]).is_empty());
    }

    #[test]
    fn test_configured_severity() {
        let source = in_body("        Text(\"Hello World\")\n            padding()");
        let config = MissingDotConfig {
            severity: Severity::Warning,
            additional_modifiers: Vec::new(),
        };
        let violations = scan(&parse(&source), &config);
        assert_eq!(violations[0].severity, Severity::Warning);
    }

    #[test]
    fn test_order_and_idempotence() {
        let source = r#"
struct ContentView: View {
    var body: some View {
        VStack {
            Text("one")
                padding()
            Text("two")
                frame(width: 10)
        }
        background {
            Color.red
        }
    }

    var footer: some View {
        Text("three")
            opacity(0.5)
    }
}
"#;
        let parsed = parse(source);
        let config = MissingDotConfig::default();
        let first = scan(&parsed, &config);
        let second = scan(&parsed, &config);

        assert_eq!(first, second);
        let names: Vec<_> = first.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Missing 'padding' leading dot",
                "Missing 'frame' leading dot",
                "Missing 'background' leading dot",
                "Missing 'opacity' leading dot",
            ]
        );
        assert!(first.windows(2).all(|w| w[0].offset <= w[1].offset));
    }

    #[test]
    fn test_comments_between_tokens() {
        let source = in_body(
            "        Text(\"Hello World\")\n            . /* spaced */ padding()\n            // padding()\n",
        );
        assert!(scan_source(&source).is_empty());
    }

    #[test]
    fn test_broken_source_does_not_panic() {
        let sources = [
            "",
            "var body: some View {",
            "struct A: View { var body: some View { Text(\"a\") padding( } }",
            "}}}} padding() {{{{",
        ];
        for source in sources {
            let _ = scan_source(source);
        }
    }

    #[test]
    fn test_description_metadata() {
        assert_eq!(DESCRIPTION.identifier, ViolationRule::MissingDotSwiftUIModifier.as_str());
        assert_eq!(DESCRIPTION.kind, RuleKind::Lint);
        assert!(!DESCRIPTION.triggering_examples.is_empty());
        assert!(!DESCRIPTION.non_triggering_examples.is_empty());
    }
}
