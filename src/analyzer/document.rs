//! YAML document scanning
//!
//! Code Quality Principle: Specialized Analysis Services - the scanner knows just enough YAML
//! - serde_yaml decides whether the file is well-formed
//! - A line scanner recovers what serde_yaml drops: comments and document start lines

use crate::domain::diagnostics::{YlsError, YlsResult};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

lazy_static! {
    /// `---` at column 0, optionally followed by content or a comment
    static ref DOCUMENT_START: Regex = Regex::new(r"^---(?:[ \t](?P<rest>.*))?$").unwrap();
    /// `...` at column 0
    static ref DOCUMENT_END: Regex = Regex::new(r"^\.\.\.(?:[ \t].*)?$").unwrap();
}

/// One document of a (possibly multi-document) YAML stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Zero-based line where the document's content begins
    pub line_number: u32,
    /// First comment line before the content, trimmed
    pub leading_comment: Option<String>,
}

impl Document {
    pub fn new(line_number: u32, leading_comment: Option<&str>) -> Self {
        Self {
            line_number,
            leading_comment: leading_comment.map(str::to_string),
        }
    }
}

/// Check that `content` is well-formed YAML, document by document
pub fn check_syntax(file: &str, content: &str) -> YlsResult<()> {
    for document in serde_yaml::Deserializer::from_str(content) {
        serde_yaml::Value::deserialize(document)
            .map_err(|e| YlsError::parse(file, e.to_string()))?;
    }
    Ok(())
}

/// Documents under construction while scanning
#[derive(Debug, Default)]
struct PendingDocument {
    leading_comment: Option<String>,
    content_line: Option<u32>,
    first_content: String,
    more_content: bool,
    explicit_start: bool,
}

impl PendingDocument {
    fn note_comment(&mut self, comment: &str) {
        if self.content_line.is_none() && self.leading_comment.is_none() {
            self.leading_comment = Some(comment.trim().to_string());
        }
    }

    fn note_content(&mut self, line_number: u32, text: &str) {
        if self.content_line.is_none() {
            self.content_line = Some(line_number);
            self.first_content = text.to_string();
        } else {
            self.more_content = true;
        }
    }

    /// Content is a single null scalar, so the document holds no value
    fn is_null(&self) -> bool {
        let value = self.first_content.split(" #").next().unwrap_or_default().trim();
        !self.more_content && matches!(value, "~" | "null" | "Null" | "NULL")
    }

    fn finish(self, documents: &mut Vec<Document>) {
        // Empty and null documents carry nothing to check
        if self.is_null() {
            return;
        }
        if let Some(line_number) = self.content_line {
            documents.push(Document {
                line_number,
                leading_comment: self.leading_comment,
            });
        }
    }
}

/// Split a YAML stream into documents, recording where each one's content
/// starts and the first comment line that precedes it.
///
/// Comments above the first `---` marker belong to the first document.
/// Comments after a document's content are never leading comments.
pub fn scan_documents(content: &str) -> Vec<Document> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut documents = Vec::new();
    let mut current = PendingDocument::default();

    for (index, line) in content.lines().enumerate() {
        let line_number = index as u32;

        if let Some(captures) = DOCUMENT_START.captures(line) {
            let carried_comment = if documents.is_empty()
                && current.content_line.is_none()
                && !current.explicit_start
            {
                current.leading_comment.take()
            } else {
                None
            };
            std::mem::take(&mut current).finish(&mut documents);
            current.explicit_start = true;
            current.leading_comment = carried_comment;

            let rest = captures.name("rest").map_or("", |m| m.as_str()).trim();
            if rest.starts_with('#') {
                current.note_comment(rest);
            } else if !rest.is_empty() {
                current.note_content(line_number, rest);
            }
            continue;
        }

        if DOCUMENT_END.is_match(line) {
            std::mem::take(&mut current).finish(&mut documents);
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || (trimmed.starts_with('%') && !current.explicit_start) {
            continue;
        }

        if trimmed.starts_with('#') {
            current.note_comment(trimmed);
        } else {
            if current.content_line.is_none() {
                tracing::trace!("Document content begins on line {}", line_number);
            }
            current.note_content(line_number, trimmed);
        }
    }

    current.finish(&mut documents);
    documents
}
