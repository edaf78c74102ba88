//! Detection runner that scans a set of Swift files.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::analysis::SwiftParser;
use crate::config::Config;

use super::{filter_suppressed, missing_dot, parse_suppressions, DetectionResult};

/// Executes the missing-dot check against a set of files.
///
/// Files are independent, so they are scanned in parallel; each worker owns
/// its parse tree and visitor and only the configuration is shared.
pub struct Runner {
    config: Config,
    parallel: bool,
}

impl Runner {
    /// Create a new detection runner.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            parallel: true,
        }
    }

    /// Set whether files are scanned on the rayon thread pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Scan every file and merge the results.
    ///
    /// A file that cannot be read or parsed is logged and listed in
    /// `skipped`; it never aborts the run. Violations come back ordered by
    /// file, then by position.
    pub fn run(&self, files: &[PathBuf]) -> anyhow::Result<DetectionResult> {
        let parser = SwiftParser::new();

        let per_file: Vec<DetectionResult> = if self.parallel {
            files
                .par_iter()
                .map(|path| self.scan_file(&parser, path))
                .collect()
        } else {
            files
                .iter()
                .map(|path| self.scan_file(&parser, path))
                .collect()
        };

        let mut result = DetectionResult::new();
        for file_result in per_file {
            result.merge(file_result);
        }
        result.sort();

        tracing::info!(
            scanned = result.scanned,
            violations = result.violations.len(),
            suppressed = result.suppressed.len(),
            skipped = result.skipped.len(),
            "scan complete"
        );
        Ok(result)
    }

    fn scan_file(&self, parser: &SwiftParser, path: &Path) -> DetectionResult {
        let mut result = DetectionResult::new();
        let source = match std::fs::read(path) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "skipping unreadable file");
                result.skipped.push(path.to_string_lossy().to_string());
                return result;
            }
        };

        match self.scan_source(parser, path, &source) {
            Ok(file_result) => file_result,
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "skipping file that failed to parse");
                result.skipped.push(path.to_string_lossy().to_string());
                result
            }
        }
    }

    /// Scan in-memory source as if it were the file at `path`.
    ///
    /// Invalid UTF-8 is scanned as-is; only suppression comments are read
    /// through a lossy conversion.
    pub fn scan_source(
        &self,
        parser: &SwiftParser,
        path: &Path,
        source: &[u8],
    ) -> anyhow::Result<DetectionResult> {
        let parsed = parser.parse(path, source)?;
        if parsed.has_errors() {
            tracing::debug!(file = %parsed.path, "parsed with recovered syntax errors");
        }

        let violations = missing_dot::scan(&parsed, &self.config.missing_dot_swiftui_modifier);
        tracing::debug!(file = %parsed.path, violations = violations.len(), "scanned file");

        let suppressions = parse_suppressions(&parsed.path, &String::from_utf8_lossy(source));
        let (active, suppressed) = filter_suppressed(violations, &suppressions);

        Ok(DetectionResult {
            violations: active,
            suppressed,
            scanned: 1,
            skipped: Vec::new(),
        })
    }
}
