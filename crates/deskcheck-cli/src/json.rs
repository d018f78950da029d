//! JSON output format support.
//!
//! Provides a simple, human-readable JSON output format for deskcheck reports.

use deskcheck_core::{DiagnosticLevel, ValidationReport};
use serde::Serialize;
use std::path::Path;

/// Root structure for JSON output.
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    /// Version of deskcheck that produced this output.
    pub version: String,
    /// Number of files checked.
    pub files_checked: usize,
    /// One entry per file, in path order.
    pub files: Vec<JsonFile>,
    /// Summary counts by level.
    pub summary: JsonSummary,
}

/// Verdict and diagnostics for one file.
#[derive(Debug, Serialize)]
pub struct JsonFile {
    /// File path (forward slashes for cross-platform consistency).
    pub file: String,
    pub valid: bool,
    pub diagnostics: Vec<JsonDiagnostic>,
}

/// A single diagnostic in JSON format.
#[derive(Debug, Serialize)]
pub struct JsonDiagnostic {
    /// Severity level: error, future-error, warning, or hint.
    pub level: String,
    /// Rule identifier (e.g., DF-EX-006).
    pub rule: String,
    /// Line number (1-based), 0 for findings about the whole file.
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Diagnostic message.
    pub message: String,
}

/// Summary counts by diagnostic level.
#[derive(Debug, Default, Serialize)]
pub struct JsonSummary {
    pub errors: usize,
    pub future_errors: usize,
    pub warnings: usize,
    pub hints: usize,
    /// Files with at least one error.
    pub invalid_files: usize,
}

fn path_to_string(path: &Path, base_path: &Path) -> String {
    // Convert to relative path if possible, use forward slashes for cross-platform consistency
    path.strip_prefix(base_path)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Convert reports to JSON output format.
pub fn reports_to_json(reports: &[ValidationReport], base_path: &Path) -> JsonOutput {
    let mut summary = JsonSummary::default();

    let files = reports
        .iter()
        .map(|report| {
            if !report.valid {
                summary.invalid_files += 1;
            }
            let diagnostics = report
                .diagnostics
                .iter()
                .map(|diag| {
                    match diag.level {
                        DiagnosticLevel::Error => summary.errors += 1,
                        DiagnosticLevel::FutureError => summary.future_errors += 1,
                        DiagnosticLevel::Warning => summary.warnings += 1,
                        DiagnosticLevel::Hint => summary.hints += 1,
                    }
                    JsonDiagnostic {
                        level: diag.level.as_str().to_string(),
                        rule: diag.rule.clone(),
                        line: diag.line,
                        group: diag.group.clone(),
                        key: diag.key.clone(),
                        message: diag.message.clone(),
                    }
                })
                .collect();
            JsonFile {
                file: path_to_string(&report.file, base_path),
                valid: report.valid,
                diagnostics,
            }
        })
        .collect();

    JsonOutput {
        version: env!("CARGO_PKG_VERSION").to_string(),
        files_checked: reports.len(),
        files,
        summary,
    }
}
