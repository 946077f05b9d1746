//! trunk-yls CLI - lint YAML files for a leading yaml-language-server directive
//!
//! CDD Principle: Application Layer - CLI coordinates user interactions with domain services
//! - Translates arguments into a config lookup and a lint run
//! - Handles process exit codes and terminal output

use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::process;
use trunk_yls::{
    AnalysisOptions, OutputFormat, ReportFormatter, ReportOptions, YlsConfig, YlsLinter,
    YlsResult,
};

/// trunk-yls - check YAML files for a yaml-language-server schema directive
#[derive(Parser)]
#[command(name = "trunk-yls")]
#[command(version = "0.1.0")]
#[command(about = "Check YAML files for a leading yaml-language-server schema directive")]
#[command(long_about = "trunk-yls checks that every YAML document starts with a \
`# yaml-language-server: $schema=<url>` comment and that the schema is not served \
from an excluded domain. Diagnostics are printed as a JSON array.")]
struct Cli {
    /// YAML files to check
    files: Vec<PathBuf>,

    /// Exclusion config file (defaults to ./trunk-yls.yaml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormatArg,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Check files one at a time
    #[arg(long)]
    no_parallel: bool,
}

#[derive(Copy, Clone, ValueEnum, PartialEq)]
enum OutputFormatArg {
    Json,
    Human,
    Github,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Github => OutputFormat::GitHub,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli) {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> YlsResult<i32> {
    if cli.files.is_empty() {
        eprintln!("Usage: trunk-yls [OPTIONS] <FILES>...");
        return Ok(1);
    }

    run_check(
        cli.config,
        &cli.files,
        cli.format,
        !cli.no_color,
        !cli.no_parallel,
        std::io::stdout().lock(),
    )?;

    Ok(0)
}

/// Lint `files` and write the report to `out`. Skipped files are reported on
/// stderr.
fn run_check<W: Write>(
    config_path: Option<PathBuf>,
    files: &[PathBuf],
    format: OutputFormatArg,
    use_colors: bool,
    parallel: bool,
    out: W,
) -> YlsResult<()> {
    let config = YlsConfig::resolve(config_path.as_deref())?;

    let linter = YlsLinter::new_with_config(config)
        .with_report_formatter(ReportFormatter::new(ReportOptions { use_colors }));

    let report = linter.lint_paths(files, &AnalysisOptions { parallel });

    for skipped in &report.skipped {
        eprintln!("{}", skipped);
    }

    linter.write_report(&report, format.into(), out)
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use trunk_yls::YlsError;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("trunk-yls").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_files_exits_with_one() {
        assert_eq!(run(parse(&[])).unwrap(), 1);
    }

    #[test]
    fn test_missing_explicit_config_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.yaml");
        fs::write(&file, "key: 1\n").unwrap();
        let config = temp_dir.path().join("missing-config.yaml");

        let cli = parse(&[
            "--config",
            config.to_str().unwrap(),
            file.to_str().unwrap(),
        ]);
        let err = run(cli).unwrap_err();
        assert!(matches!(err, YlsError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_violation_then_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.yaml");
        fs::write(&file, "key: 1\n").unwrap();
        let missing = temp_dir.path().join("missing.yaml");

        let mut output = Vec::new();
        run_check(
            None,
            &[file.clone(), missing.clone()],
            OutputFormatArg::Json,
            false,
            true,
            &mut output,
        )
        .unwrap();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["code"], "no-comment");

        let cli = parse(&[file.to_str().unwrap(), missing.to_str().unwrap()]);
        assert_eq!(run(cli).unwrap(), 0);
    }

    #[test]
    fn test_excluded_domain_from_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("trunk-yls.yaml");
        fs::write(&config, "excluded_domains:\n  - kubernetes-schemas.io\n").unwrap();
        let file = temp_dir.path().join("deploy.yaml");
        fs::write(
            &file,
            "# yaml-language-server: $schema=https://kubernetes-schemas.io/x.json\nkind: Pod\n",
        )
        .unwrap();

        let mut output = Vec::new();
        run_check(Some(config), &[file], OutputFormatArg::Json, false, false, &mut output)
            .unwrap();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json[0]["code"], "wrong-schema");
        assert_eq!(json[0]["message"], "kubernetes-schemas.io is not allowed in the schema");
        assert_eq!(json[0]["range"]["start"]["character"], 32);
    }

    #[test]
    fn test_clean_files_print_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("ok.yaml");
        fs::write(&file, "# yaml-language-server: $schema=https://example.com/schema.json\nkey: 1\n")
            .unwrap();

        let mut output = Vec::new();
        run_check(None, &[file], OutputFormatArg::Json, false, true, &mut output).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_config_with_url_entry_still_runs() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("trunk-yls.yaml");
        fs::write(&config, "excluded_domains:\n  - https://a.io/x\n  - a.io\n").unwrap();
        let file = temp_dir.path().join("a.yaml");
        fs::write(&file, "# yaml-language-server: $schema=https://a.io/s.json\nkey: 1\n")
            .unwrap();

        let mut output = Vec::new();
        run_check(
            Some(config.clone()),
            &[file.clone()],
            OutputFormatArg::Json,
            false,
            true,
            &mut output,
        )
        .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json[0]["code"], "wrong-schema");

        let cli = parse(&["--config", config.to_str().unwrap(), file.to_str().unwrap()]);
        assert_eq!(run(cli).unwrap(), 0);
    }

    #[test]
    fn test_format_flag() {
        let cli = parse(&["--format", "github", "--no-color", "--no-parallel", "a.yaml"]);
        assert!(cli.format == OutputFormatArg::Github);
        assert!(cli.no_color);
        assert!(cli.no_parallel);
        assert_eq!(cli.files, vec![PathBuf::from("a.yaml")]);
    }
}
