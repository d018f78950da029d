//! Value type checks (DF-VL-001 to DF-VL-007)
//!
//! Every registered key is checked against its declared type before any
//! key-specific handler runs.

use crate::{
    regex_util::static_regex,
    rules::context::{EntryRef, GroupScope, ValidationContext},
    schemas::keys::ValueType,
};
use regex::Regex;

// What `%f` in scanf consumes: optional blanks, then a decimal or the
// special values.
static_regex!(
    fn float_prefix_re,
    r"^[\t\n\x0B\x0C\r ]*[+-]?(?:(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?|(?i:inf|nan))"
);

/// Check `entry` against `value_type`. `base` is the key without its locale.
pub fn check_value_type(
    ctx: &mut ValidationContext<'_>,
    scope: &GroupScope<'_>,
    entry: EntryRef<'_>,
    base: &str,
    value_type: ValueType,
) {
    match value_type {
        ValueType::String => check_string(ctx, entry, base),
        ValueType::LocaleString => check_locale_string(ctx, scope, entry, base, "locale string"),
        ValueType::LocaleStringList => {
            check_locale_string(ctx, scope, entry, base, "locale string list")
        }
        ValueType::Boolean => check_boolean(ctx, entry, base),
        ValueType::Numeric => check_numeric(ctx, entry, base),
        ValueType::StringList => check_list(ctx, entry, base, "string"),
        ValueType::RegexpList => check_list(ctx, entry, base, "regexp"),
    }
}

/// First ASCII control character in `value`.
fn first_control_char(value: &str) -> Option<char> {
    value.chars().find(|c| c.is_ascii_control())
}

/// DF-VL-001: string values may not contain control characters
fn check_string(ctx: &mut ValidationContext<'_>, entry: EntryRef<'_>, base: &str) {
    if first_control_char(entry.value).is_some() {
        ctx.sink.fatal(
            entry.at(),
            "DF-VL-001",
            format!(
                "value \"{}\" for string key \"{}\" in group \"{}\" contains invalid characters, \
                 string values may contain all ASCII characters except for control characters",
                entry.value, base, entry.group
            ),
        );
    }
}

/// DF-VL-002 / DF-VL-003: UTF-8 and presence of the unlocalized key
fn check_locale_string(
    ctx: &mut ValidationContext<'_>,
    scope: &GroupScope<'_>,
    entry: EntryRef<'_>,
    base: &str,
    kind: &str,
) {
    if !entry.value_is_utf8 {
        ctx.sink.fatal(
            entry.at(),
            "DF-VL-002",
            format!(
                "value \"{}\" for {} key \"{}\" in group \"{}\" contains invalid UTF-8 characters, \
                 {} values should be encoded in UTF-8",
                entry.value, kind, entry.raw_key, entry.group, kind
            ),
        );
        return;
    }

    if !scope.contains(base) {
        ctx.sink.fatal(
            entry.at(),
            "DF-VL-003",
            format!(
                "key \"{}\" in group \"{}\" is a localized key, but there is no non-localized key \"{}\"",
                entry.raw_key, entry.group, base
            ),
        );
    }
}

/// DF-VL-004 / DF-VL-005: `true` or `false`, with `0`/`1` deprecated
fn check_boolean(ctx: &mut ValidationContext<'_>, entry: EntryRef<'_>, base: &str) {
    match entry.value {
        "true" | "false" => {}
        "0" | "1" => ctx.sink.deprecated(
            entry.at(),
            "DF-VL-005",
            format!(
                "boolean key \"{}\" in group \"{}\" has value \"{}\", which is deprecated: \
                 boolean values should be \"false\" or \"true\"",
                base, entry.group, entry.value
            ),
        ),
        _ => ctx.sink.fatal(
            entry.at(),
            "DF-VL-004",
            format!(
                "value \"{}\" for boolean key \"{}\" in group \"{}\" contains invalid characters, \
                 boolean values must be \"false\" or \"true\"",
                entry.value, base, entry.group
            ),
        ),
    }
}

/// Whether scanf's `%f` would accept `value`. Blank input counts as accepted
/// since scanf reports end of input there rather than a mismatch.
pub fn looks_numeric(value: &str) -> bool {
    value.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b').is_empty()
        || float_prefix_re().is_match(value)
}

/// DF-VL-006: numeric values must parse as floating point
fn check_numeric(ctx: &mut ValidationContext<'_>, entry: EntryRef<'_>, base: &str) {
    if !looks_numeric(entry.value) {
        ctx.sink.fatal(
            entry.at(),
            "DF-VL-006",
            format!(
                "value \"{}\" for numeric key \"{}\" in group \"{}\" contains invalid characters, \
                 numeric values must be valid floating point numbers",
                entry.value, base, entry.group
            ),
        );
    }
}

/// DF-VL-007: list values may not contain control characters
fn check_list(ctx: &mut ValidationContext<'_>, entry: EntryRef<'_>, base: &str, kind: &str) {
    if let Some(c) = first_control_char(entry.value) {
        ctx.sink.fatal(
            entry.at(),
            "DF-VL-007",
            format!(
                "value \"{}\" for {} list key \"{}\" in group \"{}\" contains invalid character '{}', \
                 {} list values may contain all ASCII characters except for control characters",
                entry.value,
                kind,
                base,
                entry.group,
                c.escape_default(),
                kind
            ),
        );
    }
}
