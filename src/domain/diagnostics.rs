//! Core domain models for YLS directive diagnostics and lint results
//!
//! Architecture: Rich Domain Models - Diagnostics carry their own range and classification
//! - Diagnostic mirrors the range-addressed shape editors consume
//! - LintReport acts as an aggregate root over per-file diagnostics and skipped files
//! - Errors are typed so the driver decides what is fatal and what is a notice

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Severity of a diagnostic. Every current rule reports errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
pub enum Severity {
    /// Problems that make the directive unusable for editor tooling
    Error,
}

impl Severity {
    /// Convert to string for display
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
        }
    }
}

/// Fixed set of codes emitted by the directive rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    /// Document has no leading comment at all
    NoComment,
    /// Leading comment is not a yaml-language-server directive
    NoYls,
    /// Directive does not name a schema
    NoSchema,
    /// Schema is served from an excluded domain
    WrongSchema,
}

impl DiagnosticCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoComment => "no-comment",
            Self::NoYls => "no-yls",
            Self::NoSchema => "no-schema",
            Self::WrongSchema => "wrong-schema",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zero-based line/character position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Half-open span between two positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Span on a single line between two character offsets
    pub fn on_line(line: u32, start: u32, end: u32) -> Self {
        Self {
            start: Position::new(line, start),
            end: Position::new(line, end),
        }
    }
}

/// A single rule violation, serialized exactly as emitted on stdout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Human-readable description of the violation
    pub message: String,
    /// Rule that produced this diagnostic
    pub code: DiagnosticCode,
    /// Severity level of this diagnostic
    pub severity: Severity,
    /// Where the violation sits in the source file
    pub range: Range,
}

impl Diagnostic {
    /// Create an error diagnostic on one line of the source
    pub fn new(
        code: DiagnosticCode,
        line: u32,
        start: u32,
        end: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            code,
            severity: Severity::Error,
            range: Range::on_line(line, start, end),
        }
    }
}

/// A diagnostic together with the file it was found in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiagnostic {
    pub file_path: PathBuf,
    pub diagnostic: Diagnostic,
}

/// A file that was not linted, with the notice shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub file_path: PathBuf,
    pub reason: String,
}

impl fmt::Display for SkippedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

/// Outcome of linting a set of files, in argument order
#[derive(Debug, Clone, Default)]
pub struct LintReport {
    /// Every diagnostic produced, in file then document order
    pub diagnostics: Vec<FileDiagnostic>,
    /// Files that could not be linted
    pub skipped: Vec<SkippedFile>,
    /// Number of files that were read and scanned
    pub files_linted: usize,
}

impl LintReport {
    /// Create a new empty lint report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the diagnostics of one successfully linted file
    pub fn add_file(&mut self, file_path: &Path, diagnostics: Vec<Diagnostic>) {
        self.files_linted += 1;
        self.diagnostics
            .extend(diagnostics.into_iter().map(|diagnostic| FileDiagnostic {
                file_path: file_path.to_path_buf(),
                diagnostic,
            }));
    }

    /// Record a file that was skipped because of an error
    pub fn add_skipped(&mut self, file_path: &Path, error: &YlsError) {
        self.skipped.push(SkippedFile {
            file_path: file_path.to_path_buf(),
            reason: error.to_string(),
        });
    }

    /// Whether the report contains any diagnostics
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Diagnostics without their file attribution
    pub fn bare_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().map(|d| &d.diagnostic)
    }

    /// Number of distinct files with at least one diagnostic
    pub fn files_with_diagnostics(&self) -> usize {
        let mut files: Vec<&Path> = self.diagnostics.iter().map(|d| d.file_path.as_path()).collect();
        files.dedup();
        files.len()
    }
}

/// Error types that can occur while linting
#[derive(Debug, thiserror::Error)]
pub enum YlsError {
    /// Configuration file could not be loaded or parsed
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// An explicitly requested configuration file does not exist
    #[error("Config file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// Input file does not exist
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Input file exists but could not be read
    #[error("Failed to read {file}: {message}")]
    Read { file: String, message: String },

    /// Input file is not well-formed YAML
    #[error("Failed to parse {file}: {message}")]
    Parse { file: String, message: String },

    /// Report could not be rendered
    #[error("Report error: {message}")]
    Report { message: String },

    /// Underlying IO failure
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl YlsError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a file-not-found error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a read error
    pub fn read(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Read {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a report rendering error
    pub fn report(message: impl Into<String>) -> Self {
        Self::Report {
            message: message.into(),
        }
    }
}

/// Result type for trunk-yls operations
pub type YlsResult<T> = Result<T, YlsError>;
