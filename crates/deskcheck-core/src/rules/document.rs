//! Group model: groups in file order, classified by name (DF-GR-001 to DF-GR-008)
//!
//! [`build_document`] also reports line-level problems (DF-SY-001 to
//! DF-SY-007) while feeding the builder.
//!
//! Entries of a group are validated when the group is left, since several
//! checks need to see sibling keys. A repeated group header is reported and
//! its entries are merged into the first occurrence; only entries added since
//! the last pass are validated again.

use crate::{
    diagnostics::Location,
    parsers::{classify::is_space, classify_line, locale_key::is_valid_identifier, split_lines, LineKind},
    rules::{
        context::{
            ValidationContext, DESKTOP_ACTION_PREFIX, DESKTOP_ENTRY_GROUP, KDE_DESKTOP_ENTRY_GROUP,
        },
        keys::validate_entries,
    },
};
use std::collections::HashSet;
use tracing::debug;

/// Role of a group, derived from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupKind {
    MainEntry,
    /// `KDE Desktop Entry`
    LegacyMainEntry,
    Action(String),
    /// Named after an interface listed in `Implements`.
    Interface,
    Extension,
    Invalid,
}

impl GroupKind {
    pub fn is_main(&self) -> bool {
        matches!(self, GroupKind::MainEntry | GroupKind::LegacyMainEntry)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub line: usize,
    /// Key as written, locale suffix included.
    pub raw_key: String,
    pub value: String,
    pub value_is_utf8: bool,
}

#[derive(Debug, Clone)]
pub struct Group {
    pub name: String,
    /// Line of the first header.
    pub line: usize,
    pub kind: GroupKind,
    pub entries: Vec<Entry>,
    /// Entries before this index have already been validated.
    validated: usize,
    /// Raw keys already reported as duplicated.
    reported_duplicates: HashSet<String>,
}

impl Group {
    fn new(name: String, line: usize, kind: GroupKind) -> Self {
        Self {
            name,
            line,
            kind,
            entries: Vec::new(),
            validated: 0,
            reported_duplicates: HashSet::new(),
        }
    }

    pub fn has_key(&self, raw_key: &str) -> bool {
        self.entries.iter().any(|e| e.raw_key == raw_key)
    }
}

/// Parsed document, groups in file order.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub groups: Vec<Group>,
}

impl Document {
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }
}

/// Builds a [`Document`] from classified lines.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    groups: Vec<Group>,
    current: Option<usize>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_group(&self) -> bool {
        self.current.is_some()
    }

    pub fn open_group(&mut self, ctx: &mut ValidationContext<'_>, name: String, line: usize) {
        if self.current.is_none()
            && self.groups.is_empty()
            && name != DESKTOP_ENTRY_GROUP
            && name != KDE_DESKTOP_ENTRY_GROUP
        {
            // DF-GR-001
            ctx.sink.fatal(
                Location::line(line),
                "DF-GR-001",
                format!("first group is not \"{}\"", DESKTOP_ENTRY_GROUP),
            );
        }

        self.flush(ctx);

        if let Some(index) = self.groups.iter().position(|g| g.name == name) {
            // DF-GR-002
            ctx.sink.fatal(
                Location::group(line, &name),
                "DF-GR-002",
                format!(
                    "file contains multiple groups named \"{}\", but multiple groups may not have the same name",
                    name
                ),
            );
            self.current = Some(index);
            return;
        }

        let kind = classify_group(ctx, &name, line);
        debug!(group = %name, ?kind, line, "opened group");
        self.groups.push(Group::new(name, line, kind));
        self.current = Some(self.groups.len() - 1);
    }

    /// Add an entry to the current group. Callers report entries seen before
    /// any group themselves.
    pub fn add_entry(&mut self, entry: Entry) {
        if let Some(index) = self.current {
            self.groups[index].entries.push(entry);
        }
    }

    /// Validate the entries of the current group not seen by a previous pass.
    fn flush(&mut self, ctx: &mut ValidationContext<'_>) {
        let Some(index) = self.current.take() else {
            return;
        };
        let group = &mut self.groups[index];
        let start = group.validated;
        let mut reported = std::mem::take(&mut group.reported_duplicates);

        validate_entries(ctx, group, start, &mut reported);

        group.reported_duplicates = reported;
        group.validated = group.entries.len();
    }

    pub fn finish(mut self, ctx: &mut ValidationContext<'_>) -> Document {
        self.flush(ctx);
        Document {
            groups: self.groups,
        }
    }
}

/// Classify a group by name, reporting names that are not allowed.
fn classify_group(ctx: &mut ValidationContext<'_>, name: &str, line: usize) -> GroupKind {
    let at = Location::group(line, name);

    if name.chars().any(|c| c.is_ascii_control() || c == '[' || c == ']') {
        // DF-GR-003
        ctx.sink.fatal(
            at,
            "DF-GR-003",
            format!(
                "file contains group \"{}\", but group names may contain all ASCII characters except for [ and ] and control characters",
                name
            ),
        );
        return GroupKind::Invalid;
    }

    if name.starts_with("X-") {
        return GroupKind::Extension;
    }

    if name == DESKTOP_ENTRY_GROUP {
        if ctx.main_group == Some(KDE_DESKTOP_ENTRY_GROUP) {
            same_role(ctx, at, KDE_DESKTOP_ENTRY_GROUP, DESKTOP_ENTRY_GROUP);
        }
        ctx.main_group = Some(DESKTOP_ENTRY_GROUP);
        return GroupKind::MainEntry;
    }

    if name == KDE_DESKTOP_ENTRY_GROUP {
        // DF-GR-005
        ctx.sink.legacy(
            at,
            "DF-GR-005",
            format!(
                "file contains group \"{}\", which is deprecated in favor of \"{}\"",
                name, DESKTOP_ENTRY_GROUP
            ),
        );
        if ctx.main_group == Some(DESKTOP_ENTRY_GROUP) {
            same_role(ctx, at, DESKTOP_ENTRY_GROUP, KDE_DESKTOP_ENTRY_GROUP);
        }
        ctx.main_group = Some(KDE_DESKTOP_ENTRY_GROUP);
        return GroupKind::LegacyMainEntry;
    }

    if let Some(action) = name.strip_prefix(DESKTOP_ACTION_PREFIX) {
        if action.is_empty() {
            // DF-GR-006
            ctx.sink.fatal(
                at,
                "DF-GR-006",
                format!(
                    "file contains group \"{}\", which is an action group with no action name",
                    name
                ),
            );
            return GroupKind::Invalid;
        }

        if !is_valid_identifier(action) {
            // DF-GR-007
            ctx.sink.fatal(
                at,
                "DF-GR-007",
                format!(
                    "file contains group \"{}\", which has an invalid action identifier, only alphanumeric characters and '-' are allowed",
                    name
                ),
            );
            return GroupKind::Invalid;
        }

        ctx.action_groups.insert(action.to_string());
        return GroupKind::Action(action.to_string());
    }

    if ctx.interfaces.contains(name) {
        return GroupKind::Interface;
    }

    // DF-GR-008
    ctx.sink.fatal(
        at,
        "DF-GR-008",
        format!(
            "file contains group \"{}\", but groups extending the format should start with \"X-\"",
            name
        ),
    );
    GroupKind::Invalid
}

/// DF-GR-004: both main group names are used
fn same_role(ctx: &mut ValidationContext<'_>, at: Location<'_>, first: &str, second: &str) {
    ctx.sink.warning(
        at,
        "DF-GR-004",
        format!(
            "file contains groups \"{}\" and \"{}\", which play the same role",
            first, second
        ),
    );
}

/// Split and classify `content`, building the group model. Every line-level
/// problem is reported and parsing continues with the line fixed up or
/// skipped.
pub fn build_document(ctx: &mut ValidationContext<'_>, content: &[u8]) -> Document {
    let mut builder = DocumentBuilder::new();

    if content.is_empty() {
        // DF-SY-001
        ctx.sink
            .fatal(Location::file(), "DF-SY-001", "file is empty".to_string());
        return builder.finish(ctx);
    }

    let split = split_lines(content);

    if let Some(line) = split.first_non_utf8_line {
        // DF-SY-002
        ctx.sink.warning(
            Location::line(line),
            "DF-SY-002",
            "file contains lines that are not UTF-8 encoded. There is no guarantee the validator will correctly work."
                .to_string(),
        );
    }

    if let Some(cr) = &split.carriage_return {
        // DF-SY-003
        let ending = if cr.before_line_feed {
            "a carriage return before the line feed"
        } else {
            "a carriage return"
        };
        ctx.sink.warning(
            Location::line(cr.line),
            "DF-SY-003",
            format!(
                "file contains at least one line ending with {}, while lines should only be separated by a line feed character. First such line is: \"{}\"",
                ending, cr.text
            ),
        );
    }

    for line in &split.lines {
        let classified = classify_line(line.bytes);

        if classified.leading_space {
            // DF-SY-004
            ctx.sink.fatal(
                Location::line(line.number),
                "DF-SY-004",
                format!(
                    "line \"{}\" starts with a space. Comment, group and key-value lines should not start with a space. The validation will continue, with the leading spaces ignored.",
                    line.text()
                ),
            );
        }

        match classified.kind {
            LineKind::Comment => {}
            LineKind::Group {
                name,
                trailing_space,
            } => {
                if trailing_space {
                    // DF-SY-005
                    let text = line.text();
                    ctx.sink.fatal(
                        Location::line(line.number),
                        "DF-SY-005",
                        format!(
                            "line \"{}\" ends with a space, but looks like a group. The validation will continue, with the trailing spaces ignored.",
                            text.trim_start_matches(|c: char| c.is_ascii() && is_space(c as u8))
                        ),
                    );
                }
                builder.open_group(ctx, name, line.number);
            }
            LineKind::Entry {
                key,
                value,
                value_is_utf8,
            } => {
                if !builder.in_group() {
                    // DF-SY-006
                    ctx.sink.fatal(
                        Location::line(line.number),
                        "DF-SY-006",
                        format!(
                            "file contains entry \"{}={}\" before the first group, but only comments are accepted before the first group",
                            key, value
                        ),
                    );
                    continue;
                }
                builder.add_entry(Entry {
                    line: line.number,
                    raw_key: key,
                    value,
                    value_is_utf8,
                });
            }
            LineKind::Invalid => {
                // DF-SY-007
                ctx.sink.fatal(
                    Location::line(line.number),
                    "DF-SY-007",
                    format!(
                        "file contains line \"{}\", which is not a comment, a group or an entry",
                        line.text()
                    ),
                );
            }
        }
    }

    builder.finish(ctx)
}
