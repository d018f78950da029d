//! Per-run validation state

use crate::{
    diagnostics::{DiagnosticSink, Location},
    schemas::{mime::MimeTypeClassifier, types::DesktopType},
};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

pub const DESKTOP_ENTRY_GROUP: &str = "Desktop Entry";
pub const KDE_DESKTOP_ENTRY_GROUP: &str = "KDE Desktop Entry";
pub const DESKTOP_ACTION_PREFIX: &str = "Desktop Action ";

/// Keys only meaningful for one entry type, collected while validating the
/// main group and checked once the final `Type` is known.
#[derive(Debug, Default)]
pub struct TypeSpecificKeys {
    pub application: Vec<String>,
    pub link: Vec<String>,
    pub fs_device: Vec<String>,
    pub mime_type: Vec<String>,
}

/// Everything a single run accumulates besides the parsed groups.
pub struct ValidationContext<'a> {
    pub sink: DiagnosticSink<'a>,
    pub path: &'a Path,
    pub mime: &'a dyn MimeTypeClassifier,
    /// Last `Type=` value seen, `Invalid` until one matches.
    pub desktop_type: DesktopType,
    /// Name of the last main group header seen.
    pub main_group: Option<&'static str>,
    pub type_keys: TypeSpecificKeys,
    pub declared_actions: BTreeSet<String>,
    pub action_groups: BTreeSet<String>,
    pub interfaces: BTreeSet<String>,
}

impl<'a> ValidationContext<'a> {
    pub fn new(sink: DiagnosticSink<'a>, path: &'a Path, mime: &'a dyn MimeTypeClassifier) -> Self {
        Self {
            sink,
            path,
            mime,
            desktop_type: DesktopType::Invalid,
            main_group: None,
            type_keys: TypeSpecificKeys::default(),
            declared_actions: BTreeSet::new(),
            action_groups: BTreeSet::new(),
            interfaces: BTreeSet::new(),
        }
    }

    /// Base name of the validated file, as used in filename checks.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// One key/value pair as seen by value checks.
#[derive(Debug, Clone, Copy)]
pub struct EntryRef<'e> {
    pub line: usize,
    pub group: &'e str,
    /// Key as written, locale suffix included.
    pub raw_key: &'e str,
    pub value: &'e str,
    pub value_is_utf8: bool,
}

impl<'e> EntryRef<'e> {
    pub fn at(&self) -> Location<'e> {
        Location::entry(self.line, self.group, self.raw_key)
    }

    /// `value "V" for key "K" in group "G"`, the opening of most value messages.
    pub fn describe(&self) -> String {
        format!(
            "value \"{}\" for key \"{}\" in group \"{}\"",
            self.value, self.raw_key, self.group
        )
    }
}

/// Key lookups across the whole group being validated.
pub struct GroupScope<'e> {
    pub name: &'e str,
    /// Raw key to value; the last occurrence wins.
    values: HashMap<&'e str, &'e str>,
    /// `OnlyShowIn` or `NotShowIn` already handled in this pass.
    pub show_in_seen: bool,
}

impl<'e> GroupScope<'e> {
    pub fn new(name: &'e str, entries: impl IntoIterator<Item = (&'e str, &'e str)>) -> Self {
        Self {
            name,
            values: entries.into_iter().collect(),
            show_in_seen: false,
        }
    }

    pub fn value(&self, raw_key: &str) -> Option<&'e str> {
        self.values.get(raw_key).copied()
    }

    pub fn contains(&self, raw_key: &str) -> bool {
        self.values.contains_key(raw_key)
    }
}
