//! Directive rules for YAML documents
//!
//! Architectural Principle: Service Layer - the rule chain classifies one document at a time
//! - Rules run in a fixed order and the first failing rule wins
//! - Each document yields at most one diagnostic
//! - Rules are pure over the document and the exclusion config

use crate::analyzer::document::Document;
use crate::config::YlsConfig;
use crate::domain::diagnostics::{Diagnostic, DiagnosticCode};
use lazy_static::lazy_static;
use regex::Regex;

/// Marker every directive comment starts with
pub const YLS_PREFIX: &str = "# yaml-language-server";

/// Key introducing the schema reference inside the directive
pub const SCHEMA_KEY: &str = "$schema=";

/// Column assumed to hold the first character of the schema reference.
///
/// This is where the value lands in `# yaml-language-server: $schema=`
/// written with a single space after the colon. It is not computed from the
/// actual comment.
pub const SCHEMA_VALUE_COLUMN: u32 = 32;

lazy_static! {
    // Optional scheme, then `//authority` up to the path, query or fragment
    static ref NETWORK_LOCATION: Regex =
        Regex::new(r"^(?:[A-Za-z][A-Za-z0-9+.\-]*:)?//(?P<netloc>[^/?#]*)").unwrap();
}

/// Validate the leading directive of one document
pub fn validate_document(document: &Document, config: &YlsConfig) -> Option<Diagnostic> {
    let line = document.line_number;

    let Some(comment) = document.leading_comment.as_deref() else {
        return Some(Diagnostic::new(
            DiagnosticCode::NoComment,
            line,
            0,
            0,
            "No YLS Comment found beginning document",
        ));
    };
    let comment = comment.trim();

    if !comment.starts_with(YLS_PREFIX) {
        return Some(Diagnostic::new(
            DiagnosticCode::NoYls,
            line,
            0,
            0,
            "YLS not found in top comment",
        ));
    }

    let Some(reference) = schema_reference(comment) else {
        return Some(Diagnostic::new(
            DiagnosticCode::NoSchema,
            line,
            char_len(YLS_PREFIX),
            char_len(comment),
            "Schema not found in top comment",
        ));
    };

    let domain = schema_domain(reference);
    if config.is_excluded(&domain) {
        tracing::debug!("Schema {} is served from excluded domain {}", reference, domain);
        return Some(Diagnostic::new(
            DiagnosticCode::WrongSchema,
            line,
            SCHEMA_VALUE_COLUMN,
            SCHEMA_VALUE_COLUMN + char_len(reference),
            format!("{domain} is not allowed in the schema"),
        ));
    }

    None
}

/// Text following the first `$schema=`, up to any repeated key, trimmed
pub fn schema_reference(comment: &str) -> Option<&str> {
    comment.split(SCHEMA_KEY).nth(1).map(str::trim)
}

/// Network location (`[userinfo@]host[:port]`) of a schema reference.
///
/// Taken verbatim from the reference text: no case folding, port
/// normalization or IDNA conversion. Empty when the reference has no
/// `//authority`, such as a relative file path.
pub fn schema_domain(reference: &str) -> String {
    NETWORK_LOCATION
        .captures(reference)
        .and_then(|caps| caps.name("netloc"))
        .map(|netloc| netloc.as_str().to_string())
        .unwrap_or_default()
}

fn char_len(text: &str) -> u32 {
    text.chars().count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;
    use crate::domain::diagnostics::{Range, Severity};
    use rstest::rstest;

    fn excluding(domains: &[&str]) -> YlsConfig {
        domains
            .iter()
            .fold(ConfigBuilder::new(), |builder, d| builder.exclude_domain(*d))
            .build()
    }

    fn check(comment: Option<&str>, config: &YlsConfig) -> Option<Diagnostic> {
        validate_document(&Document::new(7, comment), config)
    }

    #[test]
    fn test_valid_schema_passes() {
        let config = excluding(&["kubernetes-schemas.io"]);
        assert_eq!(
            check(Some("# yaml-language-server: $schema=https://example.com/schema.json"), &config),
            None
        );
    }

    #[test]
    fn test_missing_comment() {
        let diagnostic = check(None, &YlsConfig::default()).unwrap();

        assert_eq!(diagnostic.code, DiagnosticCode::NoComment);
        assert_eq!(diagnostic.message, "No YLS Comment found beginning document");
        assert_eq!(diagnostic.severity, Severity::Error);
        assert_eq!(diagnostic.range, Range::on_line(7, 0, 0));
    }

    #[rstest]
    #[case("# some other comment")]
    #[case("#yaml-language-server: $schema=https://a.io/s.json")]
    #[case("# YAML-language-server: $schema=https://a.io/s.json")]
    #[case("# note: # yaml-language-server $schema=x")]
    fn test_not_a_directive(#[case] comment: &str) {
        let diagnostic = check(Some(comment), &excluding(&["a.io"])).unwrap();

        assert_eq!(diagnostic.code, DiagnosticCode::NoYls);
        assert_eq!(diagnostic.message, "YLS not found in top comment");
        assert_eq!(diagnostic.range, Range::on_line(7, 0, 0));
    }

    #[rstest]
    #[case("# yaml-language-server")]
    #[case("# yaml-language-server: schema=https://a.io/s.json")]
    #[case("# yaml-language-server: $schema https://a.io/s.json")]
    fn test_missing_schema_key(#[case] comment: &str) {
        let diagnostic = check(Some(comment), &YlsConfig::default()).unwrap();

        assert_eq!(diagnostic.code, DiagnosticCode::NoSchema);
        assert_eq!(diagnostic.message, "Schema not found in top comment");
        assert_eq!(
            diagnostic.range,
            Range::on_line(7, 22, comment.chars().count() as u32)
        );
    }

    #[test]
    fn test_excluded_domain() {
        let comment = "# yaml-language-server: $schema=https://kubernetes-schemas.io/x.json";
        let diagnostic = check(Some(comment), &excluding(&["kubernetes-schemas.io"])).unwrap();

        assert_eq!(diagnostic.code, DiagnosticCode::WrongSchema);
        assert_eq!(diagnostic.message, "kubernetes-schemas.io is not allowed in the schema");
        let reference_len = "https://kubernetes-schemas.io/x.json".len() as u32;
        assert_eq!(diagnostic.range, Range::on_line(7, 32, 32 + reference_len));
    }

    #[test]
    fn test_excluded_domain_with_port_and_userinfo() {
        let config = excluding(&["user@schemas.local:8443"]);
        let diagnostic = check(
            Some("# yaml-language-server: $schema=https://user@schemas.local:8443/s.json"),
            &config,
        )
        .unwrap();

        assert_eq!(diagnostic.code, DiagnosticCode::WrongSchema);
        assert!(diagnostic.message.starts_with("user@schemas.local:8443 "));
    }

    #[test]
    fn test_host_match_is_exact() {
        let config = excluding(&["schemas.io"]);
        assert_eq!(
            check(Some("# yaml-language-server: $schema=https://cdn.schemas.io/s.json"), &config),
            None
        );
        assert_eq!(
            check(Some("# yaml-language-server: $schema=https://schemas.io:8080/s.json"), &config),
            None
        );
    }

    #[test]
    fn test_scheme_relative_reference_is_checked() {
        let config = excluding(&["kubernetes-schemas.io"]);
        let diagnostic =
            check(Some("# yaml-language-server: $schema=//kubernetes-schemas.io/x.json"), &config)
                .unwrap();

        assert_eq!(diagnostic.code, DiagnosticCode::WrongSchema);
        assert_eq!(diagnostic.message, "kubernetes-schemas.io is not allowed in the schema");
    }

    #[test]
    fn test_explicit_port_is_kept() {
        let comment = "# yaml-language-server: $schema=https://kubernetes-schemas.io:443/x.json";

        let diagnostic = check(Some(comment), &excluding(&["kubernetes-schemas.io:443"])).unwrap();
        assert_eq!(diagnostic.code, DiagnosticCode::WrongSchema);
        assert_eq!(diagnostic.message, "kubernetes-schemas.io:443 is not allowed in the schema");

        assert_eq!(check(Some(comment), &excluding(&["kubernetes-schemas.io"])), None);
    }

    #[test]
    fn test_domain_is_reported_as_written() {
        let diagnostic = check(
            Some("# yaml-language-server: $schema=https://bücher.de/s.json"),
            &excluding(&["bücher.de"]),
        )
        .unwrap();
        assert_eq!(diagnostic.message, "bücher.de is not allowed in the schema");

        assert_eq!(
            check(
                Some("# yaml-language-server: $schema=https://Example.COM/s.json"),
                &excluding(&["example.com"])
            ),
            None
        );
    }

    #[test]
    fn test_relative_schema_is_never_excluded() {
        let config = excluding(&["schemas"]);
        assert_eq!(
            check(Some("# yaml-language-server: $schema=../schemas/app.json"), &config),
            None
        );
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let config = excluding(&["a.io"]);
        let diagnostic =
            check(Some("   # yaml-language-server: $schema=  https://a.io/s.json  "), &config)
                .unwrap();

        assert_eq!(diagnostic.code, DiagnosticCode::WrongSchema);
        assert_eq!(diagnostic.range.end.character, 32 + "https://a.io/s.json".len() as u32);
    }

    #[rstest]
    #[case("https://example.com/schema.json", "example.com")]
    #[case("http://localhost:8080/s.json", "localhost:8080")]
    #[case("https://user:pw@host.io/s.json", "user:pw@host.io")]
    #[case("https://Example.COM/s.json", "Example.COM")]
    #[case("https://kubernetes-schemas.io:443/x.json", "kubernetes-schemas.io:443")]
    #[case("//kubernetes-schemas.io/x.json", "kubernetes-schemas.io")]
    #[case("https://bücher.de/s.json", "bücher.de")]
    #[case("https://host:99999/s", "host:99999")]
    #[case("https://a.io?x=1", "a.io")]
    #[case("schema.json", "")]
    #[case("../schemas/s.json", "")]
    #[case("", "")]
    fn test_schema_domain(#[case] reference: &str, #[case] expected: &str) {
        assert_eq!(schema_domain(reference), expected);
    }

    #[test]
    fn test_schema_reference_stops_at_repeated_key() {
        assert_eq!(
            schema_reference("# yaml-language-server: $schema=a.json $schema=b.json"),
            Some("a.json")
        );
        assert_eq!(schema_reference("# yaml-language-server"), None);
    }

    #[test]
    fn test_at_most_one_diagnostic_per_document() {
        // A comment failing several checks still reports only the first
        let diagnostic = check(Some("# kubernetes-schemas.io"), &excluding(&["kubernetes-schemas.io"]));
        assert_eq!(diagnostic.map(|d| d.code), Some(DiagnosticCode::NoYls));
    }
}
