//! Core types for detection results.

use serde::{Deserialize, Serialize};

/// Severity levels for violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// Rule names for different violation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ViolationRule {
    #[serde(rename = "missing_dot_swiftui_modifier")]
    MissingDotSwiftUIModifier,
}

impl ViolationRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationRule::MissingDotSwiftUIModifier => "missing_dot_swiftui_modifier",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "missing_dot_swiftui_modifier" => Some(ViolationRule::MissingDotSwiftUIModifier),
            _ => None,
        }
    }
}

impl std::fmt::Display for ViolationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single detected issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub rule: ViolationRule,
    pub message: String,
    pub file: String,
    /// 1-indexed line.
    pub line: usize,
    /// 1-indexed column, in bytes.
    pub column: usize,
    /// Byte offset from the start of the file.
    pub offset: usize,
    pub severity: Severity,
}

/// Results of running detection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionResult {
    pub violations: Vec<Violation>,
    /// Violations that were suppressed by inline comments
    #[serde(default)]
    pub suppressed: Vec<super::SuppressedViolation>,
    /// Number of files scanned
    pub scanned: usize,
    /// Files that could not be read or parsed
    #[serde(default)]
    pub skipped: Vec<String>,
}

impl DetectionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: DetectionResult) {
        self.violations.extend(other.violations);
        self.suppressed.extend(other.suppressed);
        self.skipped.extend(other.skipped);
        self.scanned += other.scanned;
    }

    /// Order violations by file, then by position within the file.
    pub fn sort(&mut self) {
        self.violations
            .sort_by(|a, b| a.file.cmp(&b.file).then(a.offset.cmp(&b.offset)));
        self.suppressed.sort_by(|a, b| {
            a.violation
                .file
                .cmp(&b.violation.file)
                .then(a.violation.offset.cmp(&b.violation.offset))
        });
        self.skipped.sort();
    }

    /// Number of suppressed violations.
    pub fn suppressed_count(&self) -> usize {
        self.suppressed.len()
    }

    /// Check if there are any error-severity violations.
    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == Severity::Error)
    }

    /// Number of violations with the given severity.
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }
}
