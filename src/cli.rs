//! Command-line interface for dotcheck.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::analysis::SWIFT_EXTENSIONS;
use crate::config::{self, Config};
use crate::detect::{DetectionResult, Runner, Severity, DESCRIPTION};
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Directories never descended into.
const SKIPPED_DIRS: &[&str] = &["Pods", "Carthage", ".build", "DerivedData"];

/// Lint SwiftUI view bodies for modifiers missing their leading dot.
///
/// A modifier written as `padding()` instead of `.padding()` inside a
/// `some View` body silently becomes a new view expression rather than
/// continuing the modifier chain. dotcheck finds those calls.
#[derive(Parser)]
#[command(name = "dotcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable info-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug-level logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lint Swift sources for missing leading dots
    #[command(visible_alias = "check")]
    Lint(LintArgs),
    /// Write a default configuration file
    Init(InitArgs),
    /// List the available rules
    Rules,
}

/// Arguments for the lint command.
#[derive(Parser)]
pub struct LintArgs {
    /// Path to check (file or directory)
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty, json, or sarif
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Extra modifier name to check (repeatable)
    #[arg(short = 'm', long = "additional-modifier", value_name = "NAME")]
    pub additional_modifiers: Vec<String>,

    /// Override the rule severity: warning or error
    #[arg(short, long)]
    pub severity: Option<String>,

    /// Fail on warnings as well as errors
    #[arg(long)]
    pub strict: bool,

    /// Show suppressed violations in output
    #[arg(long)]
    pub show_suppressed: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = ".dotcheck.yml")]
    pub output: PathBuf,
}

const DEFAULT_CONFIG: &str = include_str!("templates/default.yml");

fn is_swift_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| SWIFT_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Test sources: `*Tests.swift`, `*Test.swift`, or anything under a `*Tests` directory.
pub(crate) fn is_test_path(relative: &Path) -> bool {
    let stem = relative
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("");
    if stem.ends_with("Tests") || stem.ends_with("Test") {
        return true;
    }
    relative
        .parent()
        .map(|dir| {
            dir.components()
                .any(|c| c.as_os_str().to_string_lossy().ends_with("Tests"))
        })
        .unwrap_or(false)
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref())
}

/// Collect Swift files under `root`, applying directory skips, exclusions and test filtering.
pub fn collect_files(root: &Path, config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    let excluded = config.exclusion_matcher()?;
    let include_tests = config.should_include_test_files();

    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e))
    {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_swift_file(entry.path()) {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);

        if excluded.is_match(relative) {
            tracing::debug!(path = %relative.display(), "excluded by config");
            continue;
        }
        if !include_tests && is_test_path(relative) {
            tracing::debug!(path = %relative.display(), "skipping test file");
            continue;
        }

        files.push(path.to_path_buf());
    }

    Ok(files)
}

/// Load the config named on the command line, or discover one next to `dir`.
fn load_config(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<(Config, Option<PathBuf>)> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => config::discover(dir),
    };

    let config = match &path {
        Some(p) => {
            tracing::info!(path = %p.display(), "loading config");
            Config::parse_file(p)?
        }
        None => Config::default(),
    };

    config::validate(&config)?;
    Ok((config, path))
}

/// Exit code for a finished run.
pub fn exit_code(result: &DetectionResult, strict: bool) -> i32 {
    let failed = if strict {
        !result.violations.is_empty()
    } else {
        result.has_errors()
    };
    if failed {
        EXIT_FAILED
    } else {
        EXIT_SUCCESS
    }
}

/// Run the lint command.
pub fn run_lint(args: &LintArgs) -> anyhow::Result<i32> {
    // Validate format
    if args.format != "pretty" && args.format != "json" && args.format != "sarif" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty', 'json', or 'sarif'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let severity_override = match args.severity.as_deref().map(str::parse::<Severity>) {
        None => None,
        Some(Ok(s)) => Some(s),
        Some(Err(e)) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    // Resolve path
    let abs_path = match args.path.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let is_dir = abs_path.is_dir();
    let config_dir = if is_dir {
        abs_path.clone()
    } else {
        abs_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| abs_path.clone())
    };

    let (mut config, config_path) = match load_config(args.config.as_deref(), &config_dir) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return Ok(EXIT_ERROR);
        }
    };

    // CLI flags extend the file
    config
        .missing_dot_swiftui_modifier
        .additional_modifiers
        .extend(args.additional_modifiers.iter().cloned());
    if let Some(severity) = severity_override {
        config.missing_dot_swiftui_modifier.severity = severity;
    }

    // Collect files to scan
    let files = if is_dir {
        collect_files(&abs_path, &config)
            .with_context(|| format!("walking {}", abs_path.display()))?
    } else {
        vec![abs_path.clone()]
    };

    if files.is_empty() {
        tracing::warn!(path = %abs_path.display(), "no Swift files to scan");
    }

    let runner = Runner::new(config);
    let result = runner.run(&files)?;
    let code = exit_code(&result, args.strict);

    let config_path_str = config_path.map(|p| p.to_string_lossy().to_string());
    let path_str = args.path.to_string_lossy().to_string();

    match args.format.as_str() {
        "json" => {
            report::write_json(&path_str, config_path_str.as_deref(), &result)?;
        }
        "sarif" => {
            report::write_sarif(&config_dir, &result)?;
        }
        _ => {
            report::write_pretty(
                &path_str,
                config_path_str.as_deref(),
                &result,
                code == EXIT_SUCCESS,
                args.show_suppressed,
            );
        }
    }

    Ok(code)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // Check if output already exists
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, DEFAULT_CONFIG) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Add project-specific modifiers to additional_modifiers");
    println!("  2. Run: dotcheck lint . --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}

/// Run the rules command.
pub fn run_rules() -> anyhow::Result<i32> {
    println!("Available rules:");
    println!();
    println!(
        "  {:<32} {:<6} {}",
        DESCRIPTION.identifier,
        DESCRIPTION.kind.to_string(),
        DESCRIPTION.name
    );
    println!("  {:<32} {:<6} {}", "", "", DESCRIPTION.description);
    println!();
    println!("Suppress with:");
    println!("  // dotcheck:ignore {} - reason", DESCRIPTION.identifier);

    Ok(EXIT_SUCCESS)
}
