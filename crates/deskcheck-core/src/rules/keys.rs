//! Key checks of a group (DF-KY-001 to DF-KY-006)

use crate::{
    parsers::LocaleKey,
    rules::{
        context::{
            EntryRef, GroupScope, ValidationContext, DESKTOP_ACTION_PREFIX, DESKTOP_ENTRY_GROUP,
            KDE_DESKTOP_ENTRY_GROUP,
        },
        document::Group,
        handlers::run_handler,
        values::check_value_type,
    },
    schemas::keys::{self, KeyDefinition, ACTION_KEYS, DESKTOP_KEYS},
};
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Key table that applies to a group, by name.
pub fn table_for(group: &str) -> Option<&'static [KeyDefinition]> {
    if group == DESKTOP_ENTRY_GROUP || group == KDE_DESKTOP_ENTRY_GROUP {
        Some(DESKTOP_KEYS)
    } else if group.starts_with(DESKTOP_ACTION_PREFIX) {
        Some(ACTION_KEYS)
    } else {
        None
    }
}

/// Validate the entries of `group` from index `start` on.
///
/// Sibling lookups see every entry of the group, so a key repeated in a
/// later occurrence of the group shadows the earlier value. Raw keys in
/// `reported` were already flagged as duplicates and are not flagged again.
pub fn validate_entries(
    ctx: &mut ValidationContext<'_>,
    group: &Group,
    start: usize,
    reported: &mut HashSet<String>,
) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in &group.entries {
        *counts.entry(entry.raw_key.as_str()).or_default() += 1;
    }

    let mut scope = GroupScope::new(
        &group.name,
        group
            .entries
            .iter()
            .map(|e| (e.raw_key.as_str(), e.value.as_str())),
    );
    let table = table_for(&group.name);

    trace!(
        group = %group.name,
        pending = group.entries.len().saturating_sub(start),
        "validating group entries"
    );

    for entry in group.entries.iter().skip(start) {
        let entry = EntryRef {
            line: entry.line,
            group: &group.name,
            raw_key: &entry.raw_key,
            value: &entry.value,
            value_is_utf8: entry.value_is_utf8,
        };

        let Ok(key) = LocaleKey::parse(entry.raw_key) else {
            // DF-KY-001
            ctx.sink.fatal(
                entry.at(),
                "DF-KY-001",
                format!(
                    "file contains key \"{}\" in group \"{}\", but key names must contain only the characters A-Za-z0-9- (they may have a \"[LOCALE]\" postfix)",
                    entry.raw_key, entry.group
                ),
            );
            continue;
        };

        if counts.get(entry.raw_key).copied().unwrap_or(0) > 1
            && reported.insert(entry.raw_key.to_string())
        {
            // DF-KY-002
            ctx.sink.fatal(
                entry.at(),
                "DF-KY-002",
                format!(
                    "file contains multiple keys named \"{}\" in group \"{}\"",
                    entry.raw_key, entry.group
                ),
            );
        }

        if let Some(table) = table {
            validate_known_key(ctx, &mut scope, table, entry, &key);
        }
    }
}

fn validate_known_key(
    ctx: &mut ValidationContext<'_>,
    scope: &mut GroupScope<'_>,
    table: &'static [KeyDefinition],
    entry: EntryRef<'_>,
    key: &LocaleKey,
) {
    let extension = key.base.starts_with("X-");

    let Some(definition) = keys::find(table, &key.base) else {
        if !extension {
            // DF-KY-003
            ctx.sink.fatal(
                entry.at(),
                "DF-KY-003",
                format!(
                    "file contains key \"{}\" in group \"{}\", but keys extending the format should start with \"X-\"",
                    key.base, entry.group
                ),
            );
        }
        return;
    };

    if key.locale.is_some() && !definition.value_type.is_localized() {
        if extension {
            return;
        }
        // DF-KY-004
        ctx.sink.fatal(
            entry.at(),
            "DF-KY-004",
            format!(
                "file contains key \"{}\" in group \"{}\", but \"{}\" is not defined as a locale string",
                entry.raw_key, entry.group, key.base
            ),
        );
        return;
    }

    if definition.deprecated {
        // DF-KY-005
        ctx.sink.deprecated(
            entry.at(),
            "DF-KY-005",
            format!(
                "key \"{}\" in group \"{}\" is deprecated",
                entry.raw_key, entry.group
            ),
        );
    }

    if definition.vendor_reserved {
        // DF-KY-006
        ctx.sink.vendor_reserved(
            entry.at(),
            "DF-KY-006",
            format!(
                "key \"{}\" in group \"{}\" is a reserved key for KDE",
                entry.raw_key, entry.group
            ),
        );
    }

    if extension {
        return;
    }

    check_value_type(ctx, scope, entry, &key.base, definition.value_type);

    if let Some(handler) = definition.handler {
        run_handler(ctx, scope, entry, key, handler);
    }
}
