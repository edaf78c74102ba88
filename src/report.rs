//! Output formatting for dotcheck results.
//!
//! Supports three output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use colored::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::detect::{
    DetectionResult, Severity, SuppressedViolation, SuppressionType, Violation, ViolationRule,
    DESCRIPTION,
};

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON report.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
    pub files_scanned: usize,
    pub violations: Vec<JsonViolation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suppressed: Vec<JsonSuppressedViolation>,
    pub suppressed_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

/// A violation in the JSON report.
#[derive(Serialize, Deserialize)]
pub struct JsonViolation {
    pub rule: String,
    pub severity: String,
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// Suppressed violation with suppression info.
#[derive(Serialize, Deserialize)]
pub struct JsonSuppressedViolation {
    pub violation: JsonViolation,
    pub suppression: JsonSuppression,
}

/// Suppression directive info.
#[derive(Serialize, Deserialize)]
pub struct JsonSuppression {
    pub rule: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,
    pub file: String,
    pub line: usize,
    #[serde(rename = "type")]
    pub suppression_type: String,
}

/// Build the JSON report.
pub fn json_report(path: &str, config_path: Option<&str>, result: &DetectionResult) -> JsonReport {
    let suppressed = result
        .suppressed
        .iter()
        .map(|sv| JsonSuppressedViolation {
            violation: violation_to_json(&sv.violation),
            suppression: JsonSuppression {
                rule: sv.suppression.rule.clone(),
                reason: sv.suppression.reason.clone(),
                file: sv.suppression.file.clone(),
                line: sv.suppression.line,
                suppression_type: format!("{:?}", sv.suppression.suppression_type).to_lowercase(),
            },
        })
        .collect();

    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        config: config_path.map(str::to_string),
        files_scanned: result.scanned,
        violations: result.violations.iter().map(violation_to_json).collect(),
        suppressed,
        suppressed_count: result.suppressed.len(),
        skipped: result.skipped.clone(),
    }
}

/// Write results in JSON format.
pub fn write_json(
    path: &str,
    config_path: Option<&str>,
    result: &DetectionResult,
) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&json_report(path, config_path, result))?;
    println!("{}", json);
    Ok(())
}

fn violation_to_json(v: &Violation) -> JsonViolation {
    JsonViolation {
        rule: v.rule.as_str().to_string(),
        severity: v.severity.to_string(),
        file: v.file.clone(),
        line: v.line,
        column: v.column,
        message: v.message.clone(),
    }
}

// =============================================================================
// SARIF Format
// =============================================================================

const SARIF_VERSION: &str = "2.1.0";
const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const TOOL_NAME: &str = "dotcheck";
const INFO_URI: &str = "https://github.com/zen-systems/dotcheck";

#[derive(Serialize, Deserialize)]
pub struct SarifReport {
    pub version: String,
    #[serde(rename = "$schema")]
    pub schema: String,
    pub runs: Vec<SarifRun>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifRun {
    pub tool: SarifTool,
    pub results: Vec<SarifResult>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifTool {
    pub driver: SarifDriver,
}

#[derive(Serialize, Deserialize)]
pub struct SarifDriver {
    pub name: String,
    pub version: String,
    #[serde(rename = "informationUri")]
    pub information_uri: String,
    pub rules: Vec<SarifRule>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifRule {
    pub id: String,
    pub name: String,
    #[serde(rename = "shortDescription")]
    pub short_description: SarifMessage,
    #[serde(rename = "fullDescription", skip_serializing_if = "Option::is_none")]
    pub full_description: Option<SarifMessage>,
    #[serde(rename = "helpUri", skip_serializing_if = "Option::is_none")]
    pub help_uri: Option<String>,
    #[serde(rename = "defaultConfiguration")]
    pub default_config: SarifRuleConfig,
}

#[derive(Serialize, Deserialize)]
pub struct SarifRuleConfig {
    pub level: String,
}

#[derive(Serialize, Deserialize)]
pub struct SarifResult {
    #[serde(rename = "ruleId")]
    pub rule_id: String,
    pub level: String,
    pub message: SarifMessage,
    pub locations: Vec<SarifLocation>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifMessage {
    pub text: String,
}

#[derive(Serialize, Deserialize)]
pub struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    pub physical_location: SarifPhysicalLocation,
}

#[derive(Serialize, Deserialize)]
pub struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    pub artifact_location: SarifArtifact,
    pub region: SarifRegion,
}

#[derive(Serialize, Deserialize)]
pub struct SarifArtifact {
    pub uri: String,
}

#[derive(Serialize, Deserialize)]
pub struct SarifRegion {
    #[serde(rename = "startLine")]
    pub start_line: usize,
    #[serde(rename = "startColumn")]
    pub start_column: usize,
}

fn sarif_rule(rule: ViolationRule) -> SarifRule {
    match rule {
        ViolationRule::MissingDotSwiftUIModifier => SarifRule {
            id: rule.as_str().to_string(),
            name: "MissingDotSwiftUIModifier".to_string(),
            short_description: SarifMessage {
                text: DESCRIPTION.description.to_string(),
            },
            full_description: Some(SarifMessage {
                text: "Identifies calls to known SwiftUI modifiers inside `some View` bodies that are written without the leading dot, so they are parsed as separate statements instead of continuing the modifier chain.".to_string(),
            }),
            help_uri: Some(format!("{}#{}", INFO_URI, rule.as_str())),
            default_config: SarifRuleConfig {
                level: "error".to_string(),
            },
        },
    }
}

fn map_severity_to_level(severity: &Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    }
}

pub(crate) fn make_relative_path(file_path: &str, base_path: &Path) -> String {
    if base_path.to_string_lossy().is_empty() {
        return file_path.to_string();
    }

    let file = Path::new(file_path);

    // If they're the same (single file scan), return just the filename
    if file == base_path {
        return file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.to_string());
    }

    file.strip_prefix(base_path)
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_else(|_| file_path.to_string())
}

/// Build the SARIF report. File URIs are made relative to `base_path`.
pub fn sarif_report(base_path: &Path, result: &DetectionResult) -> SarifReport {
    let rules: Vec<SarifRule> = result
        .violations
        .iter()
        .map(|v| v.rule)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(sarif_rule)
        .collect();

    let results = result
        .violations
        .iter()
        .map(|v| SarifResult {
            rule_id: v.rule.as_str().to_string(),
            level: map_severity_to_level(&v.severity).to_string(),
            message: SarifMessage {
                text: v.message.clone(),
            },
            locations: vec![SarifLocation {
                physical_location: SarifPhysicalLocation {
                    artifact_location: SarifArtifact {
                        uri: make_relative_path(&v.file, base_path),
                    },
                    region: SarifRegion {
                        start_line: v.line.max(1),
                        start_column: v.column.max(1),
                    },
                },
            }],
        })
        .collect();

    SarifReport {
        version: SARIF_VERSION.to_string(),
        schema: SARIF_SCHEMA.to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: TOOL_NAME.to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    information_uri: INFO_URI.to_string(),
                    rules,
                },
            },
            results,
        }],
    }
}

/// Write results in SARIF format.
pub fn write_sarif(base_path: &Path, result: &DetectionResult) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&sarif_report(base_path, result))?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(
    path: &str,
    config_path: Option<&str>,
    result: &DetectionResult,
    passed: bool,
    show_suppressed: bool,
) {
    println!();
    print!("  ");
    print!("{}", "dotcheck".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Scanning: ".dimmed());
    println!("{}", path);
    print!("  {}", "Config:   ".dimmed());
    println!("{}", config_path.unwrap_or("(defaults)"));
    println!();

    if !result.violations.is_empty() {
        write_violations(&result.violations);
        println!();
    }

    if !result.suppressed.is_empty() {
        write_suppressed_summary(&result.suppressed, show_suppressed);
        println!();
    }

    if !result.skipped.is_empty() {
        println!("  {} ({}):", "Skipped".yellow(), result.skipped.len());
        for file in &result.skipped {
            println!("    {}", file.dimmed());
        }
        println!();
    }

    write_final_status(result, passed);
    println!();
}

fn write_violations(violations: &[Violation]) {
    println!("  {} ({}):", "Violations".bold(), violations.len());
    println!();

    for v in violations {
        write_severity_tag(&v.severity);
        print!("   ");
        print!("{}", v.file.blue());
        print!("{}", format!(":{}:{}", v.line, v.column).dimmed());
        println!();

        println!("            {}", v.message);
        println!();
    }
}

fn write_severity_tag(severity: &Severity) {
    match severity {
        Severity::Error => print!("    {} ", "ERROR".red()),
        Severity::Warning => print!("    {} ", "WARN ".yellow()),
    }
}

fn write_final_status(result: &DetectionResult, passed: bool) {
    let errors = result.count_by_severity(Severity::Error);
    let warnings = result.count_by_severity(Severity::Warning);

    print!("  ");
    if passed {
        print!("{}", "✓ PASS".green());
    } else {
        print!("{}", "✗ FAIL".red());
    }
    print!(
        "  {} file(s), {} error(s), {} warning(s)",
        result.scanned, errors, warnings
    );
    if !result.suppressed.is_empty() {
        print!(
            "  {}",
            format!("({} suppressed)", result.suppressed.len()).dimmed()
        );
    }
    println!();
}

fn write_suppressed_summary(suppressed: &[SuppressedViolation], show_details: bool) {
    println!("  {} ({}):", "Suppressed".dimmed(), suppressed.len());

    if !show_details {
        println!("    {}", "(use --show-suppressed to see details)".dimmed());
        return;
    }

    println!();
    for sv in suppressed {
        let v = &sv.violation;
        let s = &sv.suppression;

        print!("    {}", v.file.blue());
        if s.suppression_type == SuppressionType::File {
            print!("{}", ":* (file)".dimmed());
        } else {
            print!("{}", format!(":{}", v.line).dimmed());
        }
        println!();
        println!("            {}", v.message.dimmed());

        if !s.reason.is_empty() {
            println!("            {}", format!("reason: {:?}", s.reason).dimmed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_relative_path() {
        let base = Path::new("/work/App");
        assert_eq!(make_relative_path("/work/App/Views/Home.swift", base), "Views/Home.swift");
        assert_eq!(make_relative_path("/elsewhere/Home.swift", base), "/elsewhere/Home.swift");
        assert_eq!(
            make_relative_path("/work/App/Home.swift", Path::new("/work/App/Home.swift")),
            "Home.swift"
        );
        assert_eq!(make_relative_path("Home.swift", Path::new("")), "Home.swift");
    }

    #[test]
    fn test_severity_levels() {
        assert_eq!(map_severity_to_level(&Severity::Error), "error");
        assert_eq!(map_severity_to_level(&Severity::Warning), "warning");
    }
}
