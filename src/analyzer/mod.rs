//! Main analysis orchestrator for trunk-yls
//!
//! CDD Principle: Domain Services - Analyzer runs the directive rules over files
//! - Reads each file, rejects malformed YAML, scans documents and applies the rules
//! - Per-file failures become skip notices so one bad file never hides the others
//! - Optional parallelism never changes the order of the results

pub mod document;

use crate::analyzer::document::{check_syntax, scan_documents};
use crate::config::YlsConfig;
use crate::domain::diagnostics::{Diagnostic, LintReport, YlsError, YlsResult};
use crate::rules::validate_document;
use rayon::prelude::*;
use std::fs;
use std::path::Path;

/// Main analyzer that lints YAML files against the directive rules
pub struct Analyzer {
    /// Exclusion configuration for this run
    config: YlsConfig,
}

/// Options for customizing analysis behavior
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Whether to lint files in parallel
    pub parallel: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl Analyzer {
    /// Create a new analyzer with the given configuration
    pub fn new(config: YlsConfig) -> Self {
        Self { config }
    }

    /// Create an analyzer with an empty exclusion list
    pub fn with_defaults() -> Self {
        Self::new(YlsConfig::default())
    }

    /// Configuration used by this analyzer
    pub fn config(&self) -> &YlsConfig {
        &self.config
    }

    /// Lint YAML source text. `file` is only used in error messages.
    pub fn analyze_str(&self, file: &str, content: &str) -> YlsResult<Vec<Diagnostic>> {
        check_syntax(file, content)?;

        let diagnostics: Vec<Diagnostic> = scan_documents(content)
            .iter()
            .filter_map(|document| validate_document(document, &self.config))
            .collect();

        tracing::debug!("{}: {} diagnostic(s)", file, diagnostics.len());
        Ok(diagnostics)
    }

    /// Lint a single file and return its diagnostics
    pub fn analyze_file<P: AsRef<Path>>(&self, file_path: P) -> YlsResult<Vec<Diagnostic>> {
        let file_path = file_path.as_ref();

        if !file_path.is_file() {
            return Err(YlsError::not_found(file_path));
        }

        let content = fs::read_to_string(file_path)
            .map_err(|e| YlsError::read(file_path.display().to_string(), e.to_string()))?;

        self.analyze_str(&file_path.display().to_string(), &content)
    }

    /// Lint files in argument order and collect a report
    pub fn analyze_paths<P: AsRef<Path> + Sync>(
        &self,
        paths: &[P],
        options: &AnalysisOptions,
    ) -> LintReport {
        let outcomes: Vec<YlsResult<Vec<Diagnostic>>> = if options.parallel && paths.len() > 1 {
            paths.par_iter().map(|path| self.analyze_file(path)).collect()
        } else {
            paths.iter().map(|path| self.analyze_file(path)).collect()
        };

        let mut report = LintReport::new();
        for (path, outcome) in paths.iter().zip(outcomes) {
            let path = path.as_ref();
            match outcome {
                Ok(diagnostics) => report.add_file(path, diagnostics),
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", path.display(), e);
                    report.add_skipped(path, &e);
                }
            }
        }

        report
    }
}
