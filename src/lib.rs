//! trunk-yls - lint YAML files for a leading yaml-language-server directive
//!
//! Architecture: Clean Architecture - Library interface serves as the application layer
//! - Pure directive rules separated from file reading and output concerns
//! - The CLI is a thin driver over [`YlsLinter`]

pub mod analyzer;
pub mod config;
pub mod domain;
pub mod report;
pub mod rules;

// Re-export main types for convenient access
pub use domain::diagnostics::{
    Diagnostic, DiagnosticCode, FileDiagnostic, LintReport, Position, Range, Severity,
    SkippedFile, YlsError, YlsResult,
};

pub use config::{ConfigBuilder, YlsConfig, DEFAULT_CONFIG_FILE};

pub use analyzer::document::Document;
pub use analyzer::{AnalysisOptions, Analyzer};

pub use report::{OutputFormat, ReportFormatter, ReportOptions};

pub use rules::validate_document;

use std::path::Path;

/// Main linter providing high-level lint operations
pub struct YlsLinter {
    analyzer: Analyzer,
    report_formatter: ReportFormatter,
}

impl YlsLinter {
    /// Create a new linter with the given configuration
    pub fn new_with_config(config: YlsConfig) -> Self {
        Self {
            analyzer: Analyzer::new(config),
            report_formatter: ReportFormatter::default(),
        }
    }

    /// Create a linter with an empty exclusion list
    pub fn new() -> Self {
        Self::new_with_config(YlsConfig::default())
    }

    /// Create a linter loading configuration from file
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> YlsResult<Self> {
        let config = YlsConfig::load_from_file(path)?;
        Ok(Self::new_with_config(config))
    }

    /// Set custom report formatter
    pub fn with_report_formatter(mut self, formatter: ReportFormatter) -> Self {
        self.report_formatter = formatter;
        self
    }

    /// Configuration used by this linter
    pub fn config(&self) -> &YlsConfig {
        self.analyzer.config()
    }

    /// Lint files in order. Missing or malformed files are recorded as skipped.
    pub fn lint_paths<P: AsRef<Path> + Sync>(
        &self,
        paths: &[P],
        options: &AnalysisOptions,
    ) -> LintReport {
        self.analyzer.analyze_paths(paths, options)
    }

    /// Lint a single file
    pub fn lint_file<P: AsRef<Path>>(&self, file_path: P) -> YlsResult<LintReport> {
        let file_path = file_path.as_ref();
        let diagnostics = self.analyzer.analyze_file(file_path)?;

        let mut report = LintReport::new();
        report.add_file(file_path, diagnostics);
        Ok(report)
    }

    /// Lint YAML source held in memory
    pub fn lint_str(&self, content: &str) -> YlsResult<Vec<Diagnostic>> {
        self.analyzer.analyze_str("<input>", content)
    }

    /// Format a lint report for output
    pub fn format_report(&self, report: &LintReport, format: OutputFormat) -> YlsResult<String> {
        self.report_formatter.format_report(report, format)
    }

    /// Write a formatted report to `writer`; nothing is written when it is empty
    pub fn write_report<W: std::io::Write>(
        &self,
        report: &LintReport,
        format: OutputFormat,
        writer: W,
    ) -> YlsResult<()> {
        self.report_formatter.write_report(report, format, writer)
    }
}

impl Default for YlsLinter {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to lint files with an empty exclusion list
pub fn lint_files<P: AsRef<Path> + Sync>(files: &[P]) -> LintReport {
    YlsLinter::new().lint_paths(files, &AnalysisOptions::default())
}
