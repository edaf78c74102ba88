//! Integration tests for the full detection pipeline.
//!
//! These tests validate that file collection, configuration and the
//! missing-dot check work together against the testdata fixtures.

use std::path::{Path, PathBuf};

use dotcheck::cli::collect_files;
use dotcheck::config::{self, Config};
use dotcheck::detect::{DetectionResult, Runner, Severity, ViolationRule};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn load_config() -> Config {
    let path = testdata_path().join("dotcheck.yml");
    let config = Config::parse_file(&path).expect("should parse config");
    config::validate(&config).expect("config should be valid");
    config
}

fn file_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}

/// Collect testdata with its config and run detection.
fn run_detection() -> DetectionResult {
    let testdata = testdata_path();
    let config = load_config();
    let files = collect_files(&testdata, &config).expect("should collect files");

    Runner::new(config)
        .run(&files)
        .expect("detection should succeed")
}

#[test]
fn test_config_is_discovered() {
    let found = config::discover(&testdata_path()).expect("should find dotcheck.yml");
    assert_eq!(found.file_name().unwrap(), "dotcheck.yml");
}

#[test]
fn test_collects_only_lintable_files() {
    let testdata = testdata_path();
    let files = collect_files(&testdata, &load_config()).unwrap();

    let mut names: Vec<_> = files
        .iter()
        .map(|f| f.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    names.sort();

    assert_eq!(
        names,
        vec![
            "CardView.swift",
            "CleanView.swift",
            "ContentView.swift",
            "Suppressed.swift",
            "ViewModel.swift",
        ],
        "Generated/ is excluded and AppTests/ is a test directory"
    );
}

#[test]
fn test_detection_finds_missing_dots() {
    let result = run_detection();

    assert_eq!(result.scanned, 5);
    assert!(result.skipped.is_empty());

    let found: Vec<_> = result
        .violations
        .iter()
        .map(|v| (file_name(&v.file), v.line, v.column, v.message.as_str()))
        .collect();

    assert_eq!(
        found,
        vec![
            ("CardView.swift", 6, 13, "Missing 'cardStyle' leading dot"),
            ("ContentView.swift", 7, 17, "Missing 'font' leading dot"),
            ("ContentView.swift", 11, 9, "Missing 'padding' leading dot"),
        ]
    );

    for v in &result.violations {
        assert_eq!(v.rule, ViolationRule::MissingDotSwiftUIModifier);
        assert_eq!(v.severity, Severity::Error);
    }
    assert!(result.has_errors());
}

#[test]
fn test_clean_and_class_files_have_no_violations() {
    let result = run_detection();

    for name in ["CleanView.swift", "ViewModel.swift"] {
        assert!(
            !result.violations.iter().any(|v| file_name(&v.file) == name),
            "{} should be clean",
            name
        );
    }
}

#[test]
fn test_suppressions_are_reported_separately() {
    let result = run_detection();

    assert_eq!(result.suppressed_count(), 2);
    let mut lines: Vec<_> = result
        .suppressed
        .iter()
        .map(|sv| {
            assert_eq!(file_name(&sv.violation.file), "Suppressed.swift");
            sv.violation.line
        })
        .collect();
    lines.sort();
    assert_eq!(lines, vec![7, 9]);

    let reasons: Vec<_> = result
        .suppressed
        .iter()
        .map(|sv| sv.suppression.reason.as_str())
        .collect();
    assert!(reasons.contains(&"kept for layout parity"));
}

#[test]
fn test_additional_modifiers_come_from_config() {
    let testdata = testdata_path();
    let card = testdata.join("Views").join("CardView.swift");

    let result = Runner::new(Config::default()).run(&[card.clone()]).unwrap();
    assert!(result.violations.is_empty(), "cardStyle is not a built-in");

    let result = Runner::new(load_config()).run(&[card]).unwrap();
    assert_eq!(result.violations.len(), 1);
}

#[test]
fn test_severity_override() {
    let mut config = load_config();
    config.missing_dot_swiftui_modifier.severity = Severity::Warning;

    let files = collect_files(&testdata_path(), &config).unwrap();
    let result = Runner::new(config).run(&files).unwrap();

    assert_eq!(result.violations.len(), 3);
    assert_eq!(result.count_by_severity(Severity::Warning), 3);
    assert!(!result.has_errors());
}

#[test]
fn test_including_test_files() {
    let mut config = load_config();
    config.include_test_files = Some(true);

    let files = collect_files(&testdata_path(), &config).unwrap();
    assert_eq!(files.len(), 6);

    let result = Runner::new(config).run(&files).unwrap();
    assert!(result
        .violations
        .iter()
        .any(|v| file_name(&v.file) == "SnapshotTests.swift"));
}

#[test]
fn test_results_are_deterministic() {
    let testdata = testdata_path();
    let config = load_config();
    let files = collect_files(&testdata, &config).unwrap();

    let parallel = Runner::new(config.clone()).run(&files).unwrap();
    let sequential = Runner::new(config).parallel(false).run(&files).unwrap();

    assert_eq!(parallel.violations, sequential.violations);
}
