//! Validation rules

pub mod autostart;
pub mod categories;
pub mod context;
pub mod cross_ref;
pub mod desktop_entry;
pub mod document;
pub mod exec;
pub mod handlers;
pub mod keys;
pub mod values;

use crate::{config::LintConfig, diagnostics::ValidationReport};
use std::path::Path;

/// Trait for file validators
pub trait Validator {
    fn validate(&self, path: &Path, content: &[u8], config: &LintConfig) -> ValidationReport;
}

/// Items of a `;` separated list. The separator may terminate the list, so a
/// trailing empty item is dropped; empty items elsewhere are kept.
pub(crate) fn list_items(value: &str) -> Vec<&str> {
    if value.is_empty() {
        return Vec::new();
    }
    let mut items: Vec<&str> = value.split(';').collect();
    if items.last() == Some(&"") {
        items.pop();
    }
    items
}
