//! Configuration file for dotcheck.
//!
//! ```yaml
//! excluded:
//!   - "Generated/**"
//! include_test_files: false
//! missing_dot_swiftui_modifier:
//!   severity: warning
//!   additional_modifiers:
//!     - cardStyle
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::detect::MissingDotConfig;

/// Config file names searched for, in order.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &[".dotcheck.yml", ".dotcheck.yaml", "dotcheck.yml"];

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid exclude pattern {pattern:?}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct Config {
    /// Glob patterns for paths to exclude from analysis (e.g., "Pods/**")
    #[serde(default)]
    pub excluded: Vec<String>,
    /// Whether to scan test sources (default: false)
    #[serde(default)]
    pub include_test_files: Option<bool>,
    #[serde(default)]
    pub missing_dot_swiftui_modifier: MissingDotConfig,
}

impl Config {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parse a configuration from YAML text. An empty document is the default config.
    pub fn parse_str(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Returns whether to include test files (defaults to false).
    pub fn should_include_test_files(&self) -> bool {
        self.include_test_files.unwrap_or(false)
    }

    /// Compile the `excluded` patterns.
    pub fn exclusion_matcher(&self) -> Result<GlobSet, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded {
            let glob = Glob::new(pattern).map_err(|source| ConfigError::Glob {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|source| ConfigError::Glob {
            pattern: self.excluded.join(", "),
            source,
        })
    }

}

/// Validate a configuration.
///
/// Invalid glob patterns are errors. Empty modifier names are harmless (they
/// can never match an identifier) and only produce a warning.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    config.exclusion_matcher()?;

    let empty = config
        .missing_dot_swiftui_modifier
        .additional_modifiers
        .iter()
        .filter(|name| name.trim().is_empty())
        .count();
    if empty > 0 {
        tracing::warn!(count = empty, "ignoring empty entries in additional_modifiers");
    }

    Ok(())
}

/// Find a config file in `dir`, then in the current directory.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    let mut roots = vec![dir.to_path_buf()];
    if let Ok(cwd) = std::env::current_dir() {
        if cwd != dir {
            roots.push(cwd);
        }
    }

    roots.iter().find_map(|root| {
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(|name| root.join(name))
            .find(|candidate| candidate.is_file())
    })
}
