//! Document-wide checks once every group has been seen
//!
//! Required keys, keys used with the wrong `Type` (DF-XR-001, DF-XR-002),
//! actions without groups and the reverse (DF-AC-004, DF-AC-005), and the
//! file extension (DF-FN-001 to DF-FN-003).

use crate::{
    diagnostics::Location,
    rules::{
        context::{ValidationContext, DESKTOP_ACTION_PREFIX},
        document::{Document, Group},
    },
    schemas::{
        keys::{self, KeyDefinition, ACTION_KEYS, DESKTOP_KEYS},
        types::DesktopType,
    },
};
use tracing::debug;

pub fn check_document(ctx: &mut ValidationContext<'_>, document: &Document) {
    if let Some(main) = ctx.main_group.and_then(|name| document.group(name)) {
        check_required_keys(ctx, main, DESKTOP_KEYS);
        check_type_keys(ctx, main);
    }

    check_actions(ctx, document);
    check_filename(ctx);
}

/// DF-XR-001
fn check_required_keys(ctx: &mut ValidationContext<'_>, group: &Group, table: &'static [KeyDefinition]) {
    for required in keys::required_keys(table) {
        if !group.has_key(required) {
            ctx.sink.fatal(
                Location::group(group.line, &group.name),
                "DF-XR-001",
                format!(
                    "required key \"{}\" in group \"{}\" is not present",
                    required, group.name
                ),
            );
        }
    }
}

/// DF-XR-002: keys only meaningful for another `Type`
fn check_type_keys(ctx: &mut ValidationContext<'_>, main: &Group) {
    let desktop_type = ctx.desktop_type;
    if desktop_type == DesktopType::Invalid {
        return;
    }

    let lists = [
        (DesktopType::Application, std::mem::take(&mut ctx.type_keys.application)),
        (DesktopType::Link, std::mem::take(&mut ctx.type_keys.link)),
        (DesktopType::FsDevice, std::mem::take(&mut ctx.type_keys.fs_device)),
        (DesktopType::MimeType, std::mem::take(&mut ctx.type_keys.mime_type)),
    ];

    for (valid_for, keys) in lists {
        if valid_for == desktop_type {
            continue;
        }
        for key in &keys {
            ctx.sink.fatal(
                Location::entry(main.line, &main.name, key),
                "DF-XR-002",
                format!(
                    "key \"{}\" is present in group \"{}\", but the type is \"{}\" while this key is only valid for type \"{}\"",
                    key,
                    main.name,
                    desktop_type.as_str(),
                    valid_for.as_str()
                ),
            );
        }
    }
}

/// DF-AC-004 / DF-AC-005, plus required keys of matched action groups
fn check_actions(ctx: &mut ValidationContext<'_>, document: &Document) {
    let mut declared = std::mem::take(&mut ctx.declared_actions);
    let mut groups = std::mem::take(&mut ctx.action_groups);

    let matched: Vec<String> = declared.intersection(&groups).cloned().collect();
    for action in &matched {
        let name = format!("{}{}", DESKTOP_ACTION_PREFIX, action);
        if let Some(group) = document.group(&name) {
            check_required_keys(ctx, group, ACTION_KEYS);
        }
        declared.remove(action);
        groups.remove(action);
    }
    debug!(matched = matched.len(), "matched actions with their groups");

    for action in &declared {
        ctx.sink.fatal(
            Location::file(),
            "DF-AC-004",
            format!(
                "action \"{}\" is defined, but there is no matching \"{}{}\" group",
                action, DESKTOP_ACTION_PREFIX, action
            ),
        );
    }

    for action in &groups {
        let name = format!("{}{}", DESKTOP_ACTION_PREFIX, action);
        let line = document.group(&name).map_or(0, |g| g.line);
        ctx.sink.fatal(
            Location::group(line, &name),
            "DF-AC-005",
            format!(
                "action group \"{}{}\" exists, but there is no matching action \"{}\"",
                DESKTOP_ACTION_PREFIX, action, action
            ),
        );
    }
}

/// DF-FN-001 to DF-FN-003
fn check_filename(ctx: &mut ValidationContext<'_>) {
    let file_name = ctx.file_name();

    if ctx.desktop_type == DesktopType::Directory {
        if !file_name.ends_with(".directory") {
            ctx.sink.fatal(
                Location::file(),
                "DF-FN-001",
                "file is of type \"Directory\", but filename does not have a .directory extension"
                    .to_string(),
            );
        }
        return;
    }

    if file_name.ends_with(".desktop") {
        return;
    }

    if file_name.ends_with(".kdelnk") {
        ctx.sink.legacy(
            Location::file(),
            "DF-FN-002",
            "filename has a .kdelnk extension, which is deprecated in favor of .desktop".to_string(),
        );
        return;
    }

    ctx.sink.fatal(
        Location::file(),
        "DF-FN-003",
        "filename does not have a .desktop extension".to_string(),
    );
}
