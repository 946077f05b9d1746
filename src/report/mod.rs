//! Report generation with multiple output formats
//!
//! CDD Principle: Anti-Corruption Layer - Formatters translate lint reports to external formats
//! - JSON is the editor-facing contract: a bare array of diagnostics
//! - Human and GitHub formats attribute diagnostics to files and use 1-based positions

use crate::domain::diagnostics::{FileDiagnostic, LintReport, YlsError, YlsResult};
use std::io::Write;

#[cfg(feature = "colors")]
use colored::Colorize;

/// Supported output formats for lint reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON array of diagnostics
    Json,
    /// Human-readable format grouped by file
    Human,
    /// GitHub Actions workflow commands
    GitHub,
}

/// Options for customizing report output
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Whether to use colored output (for human format)
    pub use_colors: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

/// Main report formatter that dispatches to specific formatters
pub struct ReportFormatter {
    options: ReportOptions,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new(ReportOptions::default())
    }
}

impl ReportFormatter {
    /// Create a new report formatter with options
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Format a lint report in the specified format.
    ///
    /// JSON and GitHub output are empty when there are no diagnostics.
    pub fn format_report(&self, report: &LintReport, format: OutputFormat) -> YlsResult<String> {
        match format {
            OutputFormat::Json => self.format_json(report),
            OutputFormat::Human => Ok(self.format_human(report)),
            OutputFormat::GitHub => Ok(self.format_github(report)),
        }
    }

    /// Write a formatted report to a writer, followed by a newline
    pub fn write_report<W: Write>(
        &self,
        report: &LintReport,
        format: OutputFormat,
        mut writer: W,
    ) -> YlsResult<()> {
        let formatted = self.format_report(report, format)?;
        if !formatted.is_empty() {
            writeln!(writer, "{formatted}")?;
        }
        Ok(())
    }

    fn format_json(&self, report: &LintReport) -> YlsResult<String> {
        if !report.has_diagnostics() {
            return Ok(String::new());
        }

        let diagnostics: Vec<_> = report.bare_diagnostics().collect();
        serde_json::to_string_pretty(&diagnostics)
            .map_err(|e| YlsError::report(format!("JSON serialization failed: {e}")))
    }

    fn format_human(&self, report: &LintReport) -> String {
        let mut output = String::new();

        if !report.has_diagnostics() {
            output.push_str(&format!("✅ {}\n", self.green("No YLS directive problems found")));
        } else {
            output.push_str(&format!("❌ {}\n\n", self.red("YLS Directive Problems Found")));

            let mut current_file = None;
            for entry in &report.diagnostics {
                if current_file != Some(&entry.file_path) {
                    if current_file.is_some() {
                        output.push('\n');
                    }
                    output.push_str(&format!("📁 {}\n", entry.file_path.display()));
                    current_file = Some(&entry.file_path);
                }
                output.push_str(&self.format_human_entry(entry));
            }
            output.push('\n');
        }

        output.push_str(&self.format_summary(report));
        output
    }

    fn format_human_entry(&self, entry: &FileDiagnostic) -> String {
        let diagnostic = &entry.diagnostic;
        let start = diagnostic.range.start;
        let position = format!("{}:{}", start.line + 1, start.character + 1);

        format!(
            "  {} [{}] {} {}\n",
            self.dim(&position),
            self.red(diagnostic.severity.as_str()),
            diagnostic.message,
            self.dim(&format!("({})", diagnostic.code)),
        )
    }

    fn format_github(&self, report: &LintReport) -> String {
        report
            .diagnostics
            .iter()
            .map(|entry| {
                let diagnostic = &entry.diagnostic;
                format!(
                    "::{} file={},line={},col={},title={}::{}\n",
                    diagnostic.severity.as_str(),
                    entry.file_path.display(),
                    diagnostic.range.start.line + 1,
                    diagnostic.range.start.character + 1,
                    diagnostic.code,
                    diagnostic.message
                )
            })
            .collect()
    }

    /// Format the summary section
    fn format_summary(&self, report: &LintReport) -> String {
        let total = report.diagnostics.len();
        let mut summary = format!(
            "📊 Summary: {} in {} of {} file{}",
            if total == 0 {
                self.green("0 errors")
            } else {
                self.red(&format!("{} error{}", total, if total == 1 { "" } else { "s" }))
            },
            report.files_with_diagnostics(),
            report.files_linted,
            if report.files_linted == 1 { "" } else { "s" }
        );

        if !report.skipped.is_empty() {
            summary.push_str(&format!(", {} skipped", report.skipped.len()));
        }
        summary.push('\n');
        summary
    }

    fn red(&self, text: &str) -> String {
        #[cfg(feature = "colors")]
        {
            if self.options.use_colors {
                return text.red().to_string();
            }
        }
        text.to_string()
    }

    fn green(&self, text: &str) -> String {
        #[cfg(feature = "colors")]
        {
            if self.options.use_colors {
                return text.green().to_string();
            }
        }
        text.to_string()
    }

    fn dim(&self, text: &str) -> String {
        #[cfg(feature = "colors")]
        {
            if self.options.use_colors {
                return text.dimmed().to_string();
            }
        }
        text.to_string()
    }
}
