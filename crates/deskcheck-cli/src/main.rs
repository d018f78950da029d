//! deskcheck CLI - validate freedesktop.org desktop entry files

mod json;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use deskcheck_core::{
    config::LintConfig,
    diagnostics::{Diagnostic, DiagnosticLevel},
    validate_paths, ValidationReport,
};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "deskcheck")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Validate freedesktop.org desktop entry files",
    long_about = "Validate desktop entry files against the Desktop Entry Specification.\n\nValidates: .desktop • .directory • .kdelnk"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Files or directories to validate (defaults to current directory)
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Warn about keys and values reserved for KDE
    #[arg(long, global = true)]
    warn_kde: bool,

    /// Do not warn about deprecated usage
    #[arg(long, global = true)]
    no_warn_deprecated: bool,

    /// Do not print hints
    #[arg(long, global = true)]
    no_hints: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Verbose output (show rule ids)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate desktop entry files
    Validate {
        /// Files or directories to validate
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,
    },

    /// Initialize config file
    Init {
        /// Output path for config
        #[arg(default_value = "deskcheck.toml")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with reports
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let result = match &cli.command {
        Some(Commands::Validate { paths }) => validate_command(paths, &cli),
        Some(Commands::Init { output }) => init_command(output),
        None => validate_command(&cli.paths, &cli),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

/// Config from `--config`, else the per-user file when present, with
/// command line flags applied on top.
fn load_config(cli: &Cli) -> anyhow::Result<LintConfig> {
    let mut config = match &cli.config {
        Some(path) => LintConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => {
            let default = LintConfig::default_path().filter(|p| p.is_file());
            LintConfig::load_or_default(default.as_deref())
        }
    };

    if cli.warn_kde {
        config.warn_vendor_reserved = true;
    }
    if cli.no_warn_deprecated {
        config.suppress_deprecated_warnings = true;
    }
    if cli.no_hints {
        config.suppress_hints = true;
    }

    Ok(config)
}

/// Returns whether every file is valid.
fn validate_command(paths: &[PathBuf], cli: &Cli) -> anyhow::Result<bool> {
    let config = load_config(cli)?;
    let reports = validate_paths(paths, &config)?;
    let all_valid = reports.iter().all(|r| r.valid);

    match cli.format {
        OutputFormat::Json => {
            let base = match paths {
                [single] if single.is_dir() => single.as_path(),
                _ => Path::new(""),
            };
            let output = json::reports_to_json(&reports, base);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => print_text(&reports, cli.verbose),
    }

    Ok(all_valid)
}

fn level_label(level: DiagnosticLevel) -> ColoredString {
    match level {
        DiagnosticLevel::Error => "error".red().bold(),
        DiagnosticLevel::FutureError => "error".red(),
        DiagnosticLevel::Warning => "warning".yellow().bold(),
        DiagnosticLevel::Hint => "hint".blue().bold(),
    }
}

fn format_diagnostic(diag: &Diagnostic, verbose: bool) -> String {
    let location = if diag.line > 0 {
        format!("{}:{}", diag.file.display(), diag.line)
    } else {
        diag.file.display().to_string()
    };
    let future = if diag.level == DiagnosticLevel::FutureError {
        "(will be fatal in the future): "
    } else {
        ""
    };
    let rule = if verbose {
        format!(" [{}]", diag.rule).dimmed().to_string()
    } else {
        String::new()
    };

    format!(
        "{}: {}: {}{}{}",
        location.dimmed(),
        level_label(diag.level),
        future,
        diag.message,
        rule
    )
}

fn print_text(reports: &[ValidationReport], verbose: bool) {
    for report in reports {
        for diag in &report.diagnostics {
            println!("{}", format_diagnostic(diag, verbose));
        }
    }

    let count = |level: DiagnosticLevel| reports.iter().map(|r| r.count(level)).sum::<usize>();
    let errors = count(DiagnosticLevel::Error) + count(DiagnosticLevel::FutureError);
    let warnings = count(DiagnosticLevel::Warning);
    let invalid = reports.iter().filter(|r| !r.valid).count();

    if reports.is_empty() {
        println!("{}", "No desktop entry files found".yellow());
        return;
    }

    if errors == 0 && warnings == 0 {
        println!(
            "{} {} checked, no issues found",
            "✓".green().bold(),
            plural(reports.len(), "file", "files")
        );
        return;
    }

    println!("{}", "─".repeat(60).dimmed());
    println!(
        "Found {}, {} in {} ({} invalid)",
        plural(errors, "error", "errors"),
        plural(warnings, "warning", "warnings"),
        plural(reports.len(), "file", "files"),
        invalid
    );
}

fn plural(n: usize, one: &str, many: &str) -> String {
    format!("{} {}", n, if n == 1 { one } else { many })
}

fn init_command(output: &Path) -> anyhow::Result<bool> {
    let toml_content = LintConfig::default().to_toml()?;

    std::fs::write(output, toml_content)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "{} Created config file: {}",
        "✓".green().bold(),
        output.display()
    );

    Ok(true)
}
