//! # deskcheck-core
//!
//! Validation engine for freedesktop.org desktop entry files.
//!
//! Validates:
//! - Application, link and directory entries (`.desktop`, `.directory`)
//! - Legacy KDE entries (`.kdelnk`, `KDE Desktop Entry`)
//! - Desktop actions and D-Bus interface groups
//! - Exec command lines, categories, MIME types and autostart conditions

pub mod config;
pub mod diagnostics;
pub mod file_utils;
pub mod parsers;
mod regex_util;
pub mod rules;
pub mod schemas;

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info};

pub use config::LintConfig;
pub use diagnostics::{Diagnostic, DiagnosticLevel, LintError, LintResult, ValidationReport};
pub use rules::{desktop_entry::DesktopEntryValidator, Validator};
pub use schemas::mime::{MimeTypeClassifier, MimeValidity, StandardMimeClassifier};

/// Extensions of files picked up when walking a directory
pub const DESKTOP_FILE_EXTENSIONS: &[&str] = &["desktop", "directory", "kdelnk"];

/// Whether `path` names a desktop entry, judged by its extension
pub fn is_desktop_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DESKTOP_FILE_EXTENSIONS.contains(&ext))
}

/// Validate an in-memory buffer. `path` is only used for the filename
/// checks and to label diagnostics.
pub fn validate_bytes(path: &Path, content: &[u8], config: &LintConfig) -> ValidationReport {
    DesktopEntryValidator::new().validate(path, content, config)
}

/// Like [`validate_bytes`], judging `MimeType` items with `mime`.
pub fn validate_bytes_with_classifier(
    path: &Path,
    content: &[u8],
    config: &LintConfig,
    mime: Box<dyn MimeTypeClassifier>,
) -> ValidationReport {
    DesktopEntryValidator::with_mime_classifier(mime).validate(path, content, config)
}

/// Validate a single file
pub fn validate_file(path: &Path, config: &LintConfig) -> LintResult<ValidationReport> {
    let content = file_utils::safe_read_bytes_with_limit(path, config.max_file_size)?;
    Ok(validate_bytes(path, &content, config))
}

fn compile_excludes(config: &LintConfig) -> LintResult<Vec<glob::Pattern>> {
    config
        .exclude
        .iter()
        .map(|p| {
            glob::Pattern::new(p).map_err(|source| LintError::InvalidExcludePattern {
                pattern: p.clone(),
                source,
            })
        })
        .collect()
}

/// Collect the desktop entries under `root`, honoring ignore files and the
/// configured exclude patterns. Patterns match paths relative to `root`.
fn collect_desktop_files(root: &Path, excludes: &[glob::Pattern]) -> Vec<PathBuf> {
    use ignore::WalkBuilder;

    let mut paths: Vec<PathBuf> = WalkBuilder::new(root)
        .standard_filters(true)
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file() && is_desktop_file(entry.path()))
        .filter(|entry| {
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            !excludes.iter().any(|p| p.matches_path(relative))
        })
        .map(|entry| entry.path().to_path_buf())
        .collect();
    paths.sort();
    paths
}

/// Validate files and directories. Files are validated whatever their
/// name; directories are walked for desktop entries. Unreadable files get a
/// report of their own instead of aborting the run.
///
/// Reports are sorted by file path.
pub fn validate_paths(paths: &[PathBuf], config: &LintConfig) -> LintResult<Vec<ValidationReport>> {
    let excludes = compile_excludes(config)?;

    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(collect_desktop_files(path, &excludes));
        } else {
            files.push(path.clone());
        }
    }
    debug!(files = files.len(), "collected files to validate");

    // Validate files in parallel
    let mut reports: Vec<ValidationReport> = files
        .par_iter()
        .map(|file| match validate_file(file, config) {
            Ok(report) => report,
            Err(e) => ValidationReport::unreadable(file, &e),
        })
        .collect();

    reports.sort_by(|a, b| a.file.cmp(&b.file));

    let invalid = reports.iter().filter(|r| !r.valid).count();
    info!(files = reports.len(), invalid, "validation finished");

    Ok(reports)
}

/// Main entry point for validating a directory tree
pub fn validate_project(path: &Path, config: &LintConfig) -> LintResult<Vec<ValidationReport>> {
    validate_paths(&[path.to_path_buf()], config)
}
