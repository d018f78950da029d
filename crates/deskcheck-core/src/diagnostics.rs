//! Diagnostic types and error reporting

use crate::config::LintConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type LintResult<T> = Result<T, LintError>;

/// A diagnostic message from the validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    pub file: PathBuf,
    /// 1-based source line, 0 for findings about the whole file
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub rule: String,
}

/// Severity of a diagnostic, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticLevel {
    /// Makes the file invalid.
    Error,
    /// Reported as an error, but does not affect the verdict yet.
    FutureError,
    Warning,
    Hint,
}

impl DiagnosticLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticLevel::Error => "error",
            DiagnosticLevel::FutureError => "future-error",
            DiagnosticLevel::Warning => "warning",
            DiagnosticLevel::Hint => "hint",
        }
    }
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Diagnostic {
    pub fn new(
        level: DiagnosticLevel,
        file: PathBuf,
        line: usize,
        rule: &str,
        message: String,
    ) -> Self {
        Self {
            level,
            message,
            file,
            line,
            group: None,
            key: None,
            rule: rule.to_string(),
        }
    }

    pub fn error(file: PathBuf, line: usize, rule: &str, message: String) -> Self {
        Self::new(DiagnosticLevel::Error, file, line, rule, message)
    }

    pub fn future_error(file: PathBuf, line: usize, rule: &str, message: String) -> Self {
        Self::new(DiagnosticLevel::FutureError, file, line, rule, message)
    }

    pub fn warning(file: PathBuf, line: usize, rule: &str, message: String) -> Self {
        Self::new(DiagnosticLevel::Warning, file, line, rule, message)
    }

    pub fn hint(file: PathBuf, line: usize, rule: &str, message: String) -> Self {
        Self::new(DiagnosticLevel::Hint, file, line, rule, message)
    }

    pub fn with_group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }
}

/// Outcome of validating one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub file: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
    /// True when no error-level diagnostic was recorded.
    pub valid: bool,
}

impl ValidationReport {
    /// Report for a file that could not be read at all.
    pub fn unreadable(file: &Path, error: &LintError) -> Self {
        Self {
            file: file.to_path_buf(),
            diagnostics: vec![Diagnostic::error(
                file.to_path_buf(),
                0,
                "DF-IO-001",
                format!("while reading the file: {}", error),
            )],
            valid: false,
        }
    }

    pub fn count(&self, level: DiagnosticLevel) -> usize {
        self.diagnostics.iter().filter(|d| d.level == level).count()
    }
}

/// Where a finding was made.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Location<'a> {
    pub line: usize,
    pub group: Option<&'a str>,
    pub key: Option<&'a str>,
}

impl<'a> Location<'a> {
    pub fn file() -> Self {
        Self::default()
    }

    pub fn line(line: usize) -> Self {
        Self {
            line,
            ..Self::default()
        }
    }

    pub fn group(line: usize, group: &'a str) -> Self {
        Self {
            line,
            group: Some(group),
            key: None,
        }
    }

    pub fn entry(line: usize, group: &'a str, key: &'a str) -> Self {
        Self {
            line,
            group: Some(group),
            key: Some(key),
        }
    }
}

/// Collects diagnostics for one validation run.
///
/// Severity filtering from [`LintConfig`] is applied here, so callers report
/// every finding and let the sink decide what is kept. The verdict only ever
/// moves from valid to invalid.
pub struct DiagnosticSink<'a> {
    file: PathBuf,
    config: &'a LintConfig,
    diagnostics: Vec<Diagnostic>,
    fatal: bool,
}

impl<'a> DiagnosticSink<'a> {
    pub fn new(file: &Path, config: &'a LintConfig) -> Self {
        Self {
            file: file.to_path_buf(),
            config,
            diagnostics: Vec::new(),
            fatal: false,
        }
    }

    pub fn config(&self) -> &LintConfig {
        self.config
    }

    fn push(&mut self, level: DiagnosticLevel, at: Location<'_>, rule: &str, message: String) {
        let mut diagnostic = Diagnostic::new(level, self.file.clone(), at.line, rule, message);
        if let Some(group) = at.group {
            diagnostic = diagnostic.with_group(group);
        }
        if let Some(key) = at.key {
            diagnostic = diagnostic.with_key(key);
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn fatal(&mut self, at: Location<'_>, rule: &str, message: String) {
        self.fatal = true;
        self.push(DiagnosticLevel::Error, at, rule, message);
    }

    pub fn future_fatal(&mut self, at: Location<'_>, rule: &str, message: String) {
        self.push(DiagnosticLevel::FutureError, at, rule, message);
    }

    pub fn warning(&mut self, at: Location<'_>, rule: &str, message: String) {
        self.push(DiagnosticLevel::Warning, at, rule, message);
    }

    /// Warning about deprecated usage, dropped when deprecation warnings are suppressed.
    pub fn deprecated(&mut self, at: Location<'_>, rule: &str, message: String) {
        if !self.config.suppress_deprecated_warnings {
            self.warning(at, rule, message);
        }
    }

    /// Warning about KDE-reserved usage, only kept when opted in.
    pub fn vendor_reserved(&mut self, at: Location<'_>, rule: &str, message: String) {
        if self.config.warn_vendor_reserved {
            self.warning(at, rule, message);
        }
    }

    /// Warning about legacy KDE conventions (the old main group name, the
    /// `.kdelnk` extension). Kept if either deprecation or KDE warnings are on.
    pub fn legacy(&mut self, at: Location<'_>, rule: &str, message: String) {
        if self.config.warn_vendor_reserved || !self.config.suppress_deprecated_warnings {
            self.warning(at, rule, message);
        }
    }

    pub fn hint(&mut self, at: Location<'_>, rule: &str, message: String) {
        if !self.config.suppress_hints {
            self.push(DiagnosticLevel::Hint, at, rule, message);
        }
    }

    pub fn has_fatal(&self) -> bool {
        self.fatal
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn finish(self) -> ValidationReport {
        ValidationReport {
            file: self.file,
            diagnostics: self.diagnostics,
            valid: !self.fatal,
        }
    }
}

/// Errors that prevent a file from being validated at all
#[derive(Error, Debug)]
pub enum LintError {
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File is not a regular file: {path}")]
    FileNotRegular { path: PathBuf },

    #[error("File too large: {path} ({size} bytes, limit {limit} bytes)")]
    FileTooBig {
        path: PathBuf,
        size: u64,
        limit: u64,
    },

    #[error("Invalid exclude pattern in config: {pattern}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}
