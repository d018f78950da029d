//! Categories checks (DF-CA-001 to DF-CA-008)

use crate::{
    rules::{
        context::{EntryRef, GroupScope, ValidationContext},
        list_items,
    },
    schemas::categories::{self, CategoryDescriptor},
};
use std::collections::HashSet;

/// Whether every member of one of `alternatives` is present.
fn any_alternative_met(alternatives: &[&[&str]], present: &HashSet<&str>) -> bool {
    alternatives
        .iter()
        .any(|set| set.iter().all(|member| present.contains(member)))
}

/// A main category only counts on its own when none of the categories it
/// requires is itself a main category that is present.
fn counts_as_main(category: &CategoryDescriptor, present: &HashSet<&str>) -> bool {
    category.main
        && !category
            .requires
            .iter()
            .flat_map(|set| set.iter())
            .filter(|member| present.contains(*member))
            .any(|member| categories::lookup(member).is_some_and(|c| c.main))
}

pub fn check_categories(ctx: &mut ValidationContext<'_>, scope: &GroupScope<'_>, entry: EntryRef<'_>) {
    // An empty value is the same as having no category at all
    if entry.value.is_empty() {
        return;
    }

    let mut present = HashSet::new();
    let mut distinct = Vec::new();
    for item in list_items(entry.value) {
        if present.insert(item) {
            distinct.push(item);
        } else {
            // DF-CA-001
            ctx.sink.warning(
                entry.at(),
                "DF-CA-001",
                format!("{} contains \"{}\" more than once", entry.describe(), item),
            );
        }
    }

    let mut main_count = 0;
    for item in distinct {
        if item.starts_with("X-") {
            continue;
        }

        let Some(category) = categories::lookup(item) else {
            // DF-CA-002
            ctx.sink.fatal(
                entry.at(),
                "DF-CA-002",
                format!(
                    "{} contains an unregistered value \"{}\"; values extending the format should start with \"X-\"",
                    entry.describe(),
                    item
                ),
            );
            continue;
        };

        if counts_as_main(category, &present) {
            main_count += 1;
        }

        if category.main && main_count > 1 {
            // DF-CA-003
            ctx.sink.hint(
                entry.at(),
                "DF-CA-003",
                format!(
                    "{} contains more than one main category; application might appear more than once in the application menu",
                    entry.describe()
                ),
            );
        }

        if category.deprecated {
            // DF-CA-004
            ctx.sink.deprecated(
                entry.at(),
                "DF-CA-004",
                format!("{} contains a deprecated value \"{}\"", entry.describe(), item),
            );
        }

        if category.requires_only_show_in && !scope.contains("OnlyShowIn") {
            // DF-CA-005
            ctx.sink.fatal(
                entry.at(),
                "DF-CA-005",
                format!(
                    "value item \"{}\" in key \"{}\" in group \"{}\" is a reserved category, so a \"OnlyShowIn\" key must be included",
                    item, entry.raw_key, entry.group
                ),
            );
        }

        if !category.requires.is_empty() && !any_alternative_met(category.requires, &present) {
            // DF-CA-006
            ctx.sink.future_fatal(
                entry.at(),
                "DF-CA-006",
                format!(
                    "value item \"{}\" in key \"{}\" in group \"{}\" requires another category to be present among the following categories: {}",
                    item,
                    entry.raw_key,
                    entry.group,
                    CategoryDescriptor::describe(category.requires)
                ),
            );
        }

        if !category.suggests.is_empty() && !any_alternative_met(category.suggests, &present) {
            // DF-CA-007
            ctx.sink.hint(
                entry.at(),
                "DF-CA-007",
                format!(
                    "value item \"{}\" in key \"{}\" in group \"{}\" can be extended with another category among the following categories: {}",
                    item,
                    entry.raw_key,
                    entry.group,
                    CategoryDescriptor::describe(category.suggests)
                ),
            );
        }
    }

    if main_count == 0 {
        // DF-CA-008
        ctx.sink.hint(
            entry.at(),
            "DF-CA-008",
            format!(
                "{} does not contain a registered main category; application might only show up in a \"catch-all\" section of the application menu",
                entry.describe()
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::LintConfig,
        diagnostics::{DiagnosticLevel, DiagnosticSink},
        schemas::mime::StandardMimeClassifier,
    };
    use std::path::Path;

    fn run(value: &str, siblings: &[(&str, &str)]) -> Vec<(DiagnosticLevel, String, String)> {
        let config = LintConfig::default();
        let path = Path::new("test.desktop");
        let mime = StandardMimeClassifier;
        let mut ctx = ValidationContext::new(DiagnosticSink::new(path, &config), path, &mime);
        let mut keys = vec![("Categories", value)];
        keys.extend_from_slice(siblings);
        let scope = GroupScope::new("Desktop Entry", keys);
        let entry = EntryRef {
            line: 5,
            group: "Desktop Entry",
            raw_key: "Categories",
            value,
            value_is_utf8: true,
        };
        check_categories(&mut ctx, &scope, entry);
        ctx.sink
            .finish()
            .diagnostics
            .into_iter()
            .map(|d| (d.level, d.rule, d.message))
            .collect()
    }

    fn rules(value: &str) -> Vec<String> {
        run(value, &[]).into_iter().map(|(_, rule, _)| rule).collect()
    }

    #[test]
    fn test_well_formed_categories() {
        assert!(rules("Development;IDE;").is_empty());
        assert!(rules("AudioVideo;Audio;Player;").is_empty());
        assert!(rules("").is_empty());
    }

    #[test]
    fn test_duplicate_category() {
        assert_eq!(rules("Utility;Utility;"), vec!["DF-CA-001"]);
    }

    #[test]
    fn test_unregistered_category() {
        let found = run("Utility;Toys;", &[]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, DiagnosticLevel::Error);
        assert!(found[0].2.contains("unregistered value \"Toys\""));
    }

    #[test]
    fn test_extension_categories_are_skipped() {
        assert_eq!(rules("X-Custom;"), vec!["DF-CA-008"]);
    }

    #[test]
    fn test_multiple_main_categories() {
        assert_eq!(rules("Office;Graphics;"), vec!["DF-CA-003"]);
    }

    #[test]
    fn test_required_main_category_not_double_counted() {
        // Audio requires AudioVideo, which is present and main
        assert!(rules("AudioVideo;Audio;").is_empty());
    }

    #[test]
    fn test_missing_required_category() {
        let found = run("Audio;", &[]);
        let required: Vec<_> = found.iter().filter(|d| d.1 == "DF-CA-006").collect();
        assert_eq!(required.len(), 1);
        assert_eq!(required[0].0, DiagnosticLevel::FutureError);
        assert!(required[0].2.ends_with("following categories: AudioVideo"));
    }

    #[test]
    fn test_suggested_category() {
        let found = run("Utility;Debugger;", &[]);
        let suggested: Vec<_> = found.iter().filter(|d| d.1 == "DF-CA-007").collect();
        assert_eq!(suggested.len(), 1);
        assert_eq!(suggested[0].0, DiagnosticLevel::Hint);
        assert!(suggested[0].2.contains("\"Debugger\""));
    }

    #[test]
    fn test_reserved_category_needs_only_show_in() {
        assert!(rules("Utility;TrayIcon;").contains(&"DF-CA-005".to_string()));
        let found = run("Utility;TrayIcon;", &[("OnlyShowIn", "KDE;")]);
        assert!(found.iter().all(|d| d.1 != "DF-CA-005"));
    }

    #[test]
    fn test_deprecated_category() {
        assert!(rules("Utility;Applications;").contains(&"DF-CA-004".to_string()));
    }

    #[test]
    fn test_no_main_category_hint() {
        let found = run("Debugger;", &[]);
        assert!(found.iter().any(|d| d.1 == "DF-CA-008"));
    }
}
