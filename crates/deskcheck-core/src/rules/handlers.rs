//! Key-specific checks that run after the value type check

use crate::{
    parsers::{locale_key::is_valid_identifier, LocaleKey},
    regex_util::static_regex,
    rules::{
        autostart::check_autostart_condition,
        categories::check_categories,
        context::{EntryRef, GroupScope, ValidationContext},
        exec::check_exec,
        list_items,
    },
    schemas::{
        environments::is_registered_environment,
        keys::Handler,
        mime::MimeValidity,
        types::{self, DesktopType},
    },
};
use regex::Regex;
use std::collections::HashSet;
use tracing::trace;

static_regex!(
    fn interface_name_re,
    r"^[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)+$"
);

const MAX_INTERFACE_NAME_LEN: usize = 255;

/// Run the check registered for a key.
pub fn run_handler(
    ctx: &mut ValidationContext<'_>,
    scope: &mut GroupScope<'_>,
    entry: EntryRef<'_>,
    key: &LocaleKey,
    handler: Handler,
) {
    trace!(key = entry.raw_key, ?handler, "running key handler");

    match handler {
        Handler::Type => check_type(ctx, entry),
        Handler::Version => check_version(ctx, entry),
        Handler::Comment => check_comment(ctx, scope, entry, key),
        Handler::Icon => check_icon(ctx, entry),
        Handler::ShowIn => check_show_in(ctx, scope, entry),
        Handler::DesktopExec => {
            application_key(ctx, entry);
            check_exec(ctx, entry);
        }
        Handler::ActionExec => check_exec(ctx, entry),
        Handler::Path => {
            application_key(ctx, entry);
            check_absolute_path(ctx, entry);
        }
        Handler::MimeType => {
            application_key(ctx, entry);
            check_mime_types(ctx, entry);
        }
        Handler::Categories => {
            application_key(ctx, entry);
            check_categories(ctx, scope, entry);
        }
        Handler::Actions => {
            application_key(ctx, entry);
            check_actions(ctx, entry);
        }
        Handler::Implements => check_implements(ctx, entry),
        Handler::DBusActivatable => check_dbus_activatable(ctx, entry),
        Handler::Dev | Handler::MountPoint => {
            ctx.type_keys.fs_device.push(entry.raw_key.to_string());
            check_absolute_path(ctx, entry);
        }
        Handler::Encoding => check_encoding(ctx, entry),
        Handler::AutostartCondition => {
            application_key(ctx, entry);
            check_autostart_condition(ctx, entry);
        }
        Handler::ApplicationOnly => application_key(ctx, entry),
        Handler::LinkOnly => ctx.type_keys.link.push(entry.raw_key.to_string()),
        Handler::FsDeviceOnly => ctx.type_keys.fs_device.push(entry.raw_key.to_string()),
        Handler::MimeTypeOnly => ctx.type_keys.mime_type.push(entry.raw_key.to_string()),
    }
}

fn application_key(ctx: &mut ValidationContext<'_>, entry: EntryRef<'_>) {
    ctx.type_keys.application.push(entry.raw_key.to_string());
}

/// DF-TY-001 to DF-TY-003: registered `Type` values
fn check_type(ctx: &mut ValidationContext<'_>, entry: EntryRef<'_>) {
    let Some(registered) = types::lookup(entry.value) else {
        ctx.desktop_type = DesktopType::Invalid;
        ctx.sink.fatal(
            entry.at(),
            "DF-TY-001",
            format!(
                "{} is not a registered type value (\"Application\", \"Link\" and \"Directory\")",
                entry.describe()
            ),
        );
        return;
    };

    if registered.vendor_reserved {
        ctx.sink.vendor_reserved(
            entry.at(),
            "DF-TY-002",
            format!("{} is a reserved value for KDE", entry.describe()),
        );
    }

    if registered.deprecated {
        ctx.sink.deprecated(
            entry.at(),
            "DF-TY-003",
            format!("{} is deprecated", entry.describe()),
        );
    }

    ctx.desktop_type = registered.desktop_type;
}

/// Known values of the `Version` key, including the pre-1.0 `0.9.x` series.
pub fn is_known_version(value: &str) -> bool {
    match value {
        "1.0" | "1.1" | "1.2" | "1.3" | "1.4" | "1.5" => true,
        _ => value
            .strip_prefix("0.9.")
            .is_some_and(|minor| matches!(minor, "3" | "4" | "5" | "6" | "7" | "8")),
    }
}

/// DF-TY-004
fn check_version(ctx: &mut ValidationContext<'_>, entry: EntryRef<'_>) {
    if !is_known_version(entry.value) {
        ctx.sink.fatal(
            entry.at(),
            "DF-TY-004",
            format!("{} is not a known version", entry.describe()),
        );
    }
}

/// DF-CM-001: a comment repeating `Name` or `GenericName` in the same locale
fn check_comment(ctx: &mut ValidationContext<'_>, scope: &GroupScope<'_>, entry: EntryRef<'_>, key: &LocaleKey) {
    for sibling in ["Name", "GenericName"] {
        let sibling_key = key.with_base(sibling);
        let Some(other) = scope.value(&sibling_key) else {
            continue;
        };
        if entry.value.eq_ignore_ascii_case(other) {
            ctx.sink.warning(
                entry.at(),
                "DF-CM-001",
                format!(
                    "{} looks the same as that of key \"{}\"",
                    entry.describe(),
                    sibling_key
                ),
            );
            return;
        }
    }
}

/// DF-IC-001 to DF-IC-003: absolute icon path or bare icon name
fn check_icon(ctx: &mut ValidationContext<'_>, entry: EntryRef<'_>) {
    let value = entry.value;

    if value.starts_with('/') {
        if value.ends_with('/') {
            ctx.sink.fatal(
                entry.at(),
                "DF-IC-001",
                format!(
                    "{} is an absolute path to a directory, instead of being an absolute path to an icon or an icon name",
                    entry.describe()
                ),
            );
        }
        return;
    }

    if value.contains('/') {
        ctx.sink.fatal(
            entry.at(),
            "DF-IC-002",
            format!(
                "{} looks like a relative path, instead of being an absolute path to an icon or an icon name",
                entry.describe()
            ),
        );
        return;
    }

    if [".png", ".xpm", ".svg"].iter().any(|ext| value.ends_with(ext)) {
        ctx.sink.future_fatal(
            entry.at(),
            "DF-IC-003",
            format!(
                "{} is an icon name with an extension, but there should be no extension as described in the Icon Theme Specification if the value is not an absolute path",
                entry.describe()
            ),
        );
    }
}

/// DF-SH-001 to DF-SH-003: `OnlyShowIn` / `NotShowIn`
fn check_show_in(ctx: &mut ValidationContext<'_>, scope: &mut GroupScope<'_>, entry: EntryRef<'_>) {
    if scope.show_in_seen {
        ctx.sink.fatal(
            entry.at(),
            "DF-SH-001",
            format!(
                "only one of \"OnlyShowIn\" and \"NotShowIn\" keys may appear in group \"{}\"",
                entry.group
            ),
        );
    }
    scope.show_in_seen = true;

    let mut seen = HashSet::new();
    for item in list_items(entry.value) {
        if !seen.insert(item) {
            ctx.sink.warning(
                entry.at(),
                "DF-SH-002",
                format!("{} contains \"{}\" more than once", entry.describe(), item),
            );
            continue;
        }

        if !item.starts_with("X-") && !is_registered_environment(item) {
            ctx.sink.fatal(
                entry.at(),
                "DF-SH-003",
                format!(
                    "{} contains an unregistered value \"{}\"; values extending the format should start with \"X-\"",
                    entry.describe(),
                    item
                ),
            );
        }
    }
}

/// DF-PA-001
fn check_absolute_path(ctx: &mut ValidationContext<'_>, entry: EntryRef<'_>) {
    if !entry.value.starts_with('/') {
        ctx.sink.warning(
            entry.at(),
            "DF-PA-001",
            format!("{} does not look like an absolute path", entry.describe()),
        );
    }
}

/// DF-MT-001 to DF-MT-003: each listed MIME type
fn check_mime_types(ctx: &mut ValidationContext<'_>, entry: EntryRef<'_>) {
    let mut seen = HashSet::new();
    for item in list_items(entry.value) {
        if !seen.insert(item) {
            ctx.sink.warning(
                entry.at(),
                "DF-MT-003",
                format!("{} contains \"{}\" more than once", entry.describe(), item),
            );
            continue;
        }

        match ctx.mime.classify(item) {
            MimeValidity::Valid => {}
            MimeValidity::Discouraged(reason) => ctx.sink.warning(
                entry.at(),
                "DF-MT-001",
                format!(
                    "{} contains value \"{}\" which is a MIME type that should probably not be used: {}",
                    entry.describe(),
                    item,
                    reason
                ),
            ),
            MimeValidity::Invalid(reason) => ctx.sink.future_fatal(
                entry.at(),
                "DF-MT-002",
                format!(
                    "{} contains value \"{}\" which is an invalid MIME type: {}",
                    entry.describe(),
                    item,
                    reason
                ),
            ),
        }
    }
}

/// DF-AC-001 to DF-AC-003: action identifiers declared by `Actions`
fn check_actions(ctx: &mut ValidationContext<'_>, entry: EntryRef<'_>) {
    for item in list_items(entry.value) {
        if item.is_empty() {
            ctx.sink.fatal(
                entry.at(),
                "DF-AC-001",
                format!("{} contains an empty action", entry.describe()),
            );
            return;
        }

        if ctx.declared_actions.contains(item) {
            ctx.sink.warning(
                entry.at(),
                "DF-AC-002",
                format!("{} contains action \"{}\" more than once", entry.describe(), item),
            );
            continue;
        }

        if !is_valid_identifier(item) {
            ctx.sink.fatal(
                entry.at(),
                "DF-AC-003",
                format!(
                    "{} contains invalid action identifier \"{}\", only alphanumeric characters and '-' are allowed",
                    entry.describe(),
                    item
                ),
            );
            return;
        }

        ctx.declared_actions.insert(item.to_string());
    }
}

/// D-Bus interface name: at least two dot-separated elements, no element
/// starting with a digit.
pub fn is_interface_name(name: &str) -> bool {
    name.len() <= MAX_INTERFACE_NAME_LEN && interface_name_re().is_match(name)
}

/// DF-IM-001 / DF-IM-002: interfaces listed in `Implements`
fn check_implements(ctx: &mut ValidationContext<'_>, entry: EntryRef<'_>) {
    for item in list_items(entry.value) {
        if !is_interface_name(item) {
            ctx.sink.fatal(
                entry.at(),
                "DF-IM-001",
                format!("{} contains an invalid interface name \"{}\"", entry.describe(), item),
            );
            return;
        }

        if !ctx.interfaces.insert(item.to_string()) {
            ctx.sink.warning(
                entry.at(),
                "DF-IM-002",
                format!("{} contains interface \"{}\" more than once", entry.describe(), item),
            );
        }
    }
}

/// DF-DB-001: D-Bus activatable entries need a reverse-DNS file name
fn check_dbus_activatable(ctx: &mut ValidationContext<'_>, entry: EntryRef<'_>) {
    if !matches!(entry.value, "true" | "1") {
        return;
    }

    // Two dots at least, the one of the extension included
    let file_name = ctx.file_name();
    if file_name.matches('.').count() < 2 {
        ctx.sink.fatal(
            entry.at(),
            "DF-DB-001",
            "DBusActivatable filename must conform to reverse-DNS notation".to_string(),
        );
    }
}

/// DF-EN-001
fn check_encoding(ctx: &mut ValidationContext<'_>, entry: EntryRef<'_>) {
    if !matches!(entry.value, "UTF-8" | "Legacy-Mixed") {
        ctx.sink.fatal(
            entry.at(),
            "DF-EN-001",
            format!(
                "{} is not a registered encoding value (\"UTF-8\", and \"Legacy-Mixed\")",
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

    struct Harness {
        config: LintConfig,
        mime: StandardMimeClassifier,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                config: LintConfig::default(),
                mime: StandardMimeClassifier,
            }
        }

        fn context<'a>(&'a self, path: &'a Path) -> ValidationContext<'a> {
            ValidationContext::new(DiagnosticSink::new(path, &self.config), path, &self.mime)
        }
    }

    fn entry<'e>(raw_key: &'e str, value: &'e str) -> EntryRef<'e> {
        EntryRef {
            line: 3,
            group: "Desktop Entry",
            raw_key,
            value,
            value_is_utf8: true,
        }
    }

    fn run_one(raw_key: &str, value: &str, handler: Handler) -> Vec<(DiagnosticLevel, String, String)> {
        let harness = Harness::new();
        let path = Path::new("org.example.App.desktop");
        let mut ctx = harness.context(path);
        let mut scope = GroupScope::new("Desktop Entry", vec![(raw_key, value)]);
        let key = LocaleKey::parse(raw_key).unwrap();
        run_handler(&mut ctx, &mut scope, entry(raw_key, value), &key, handler);
        ctx.sink
            .finish()
            .diagnostics
            .into_iter()
            .map(|d| (d.level, d.rule, d.message))
            .collect()
    }

    fn rules(raw_key: &str, value: &str, handler: Handler) -> Vec<String> {
        run_one(raw_key, value, handler)
            .into_iter()
            .map(|(_, rule, _)| rule)
            .collect()
    }

    #[test]
    fn test_type_values() {
        assert!(rules("Type", "Application", Handler::Type).is_empty());
        assert_eq!(rules("Type", "Program", Handler::Type), vec!["DF-TY-001"]);
        assert_eq!(rules("Type", "MimeType", Handler::Type), vec!["DF-TY-003"]);
        // KDE types are only reported when KDE warnings are enabled
        assert!(rules("Type", "Service", Handler::Type).is_empty());
    }

    #[test]
    fn test_kde_type_warns_when_enabled() {
        let harness = Harness {
            config: LintConfig {
                warn_vendor_reserved: true,
                ..LintConfig::default()
            },
            mime: StandardMimeClassifier,
        };
        let path = Path::new("a.desktop");
        let mut ctx = harness.context(path);
        let mut scope = GroupScope::new("Desktop Entry", vec![("Type", "Service")]);
        let key = LocaleKey::parse("Type").unwrap();
        run_handler(&mut ctx, &mut scope, entry("Type", "Service"), &key, Handler::Type);

        let report = ctx.sink.finish();
        assert!(report.valid);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].level, DiagnosticLevel::Warning);
        assert_eq!(report.diagnostics[0].rule, "DF-TY-002");
    }

    #[test]
    fn test_type_sets_desktop_type() {
        let harness = Harness::new();
        let path = Path::new("a.desktop");
        let mut ctx = harness.context(path);
        let mut scope = GroupScope::new("Desktop Entry", vec![("Type", "Link")]);
        let key = LocaleKey::parse("Type").unwrap();
        run_handler(&mut ctx, &mut scope, entry("Type", "Link"), &key, Handler::Type);
        assert_eq!(ctx.desktop_type, DesktopType::Link);

        // An unknown value resets the resolved type
        run_handler(&mut ctx, &mut scope, entry("Type", "Program"), &key, Handler::Type);
        assert_eq!(ctx.desktop_type, DesktopType::Invalid);
    }

    #[test]
    fn test_versions() {
        for version in ["1.0", "1.5", "0.9.4", "0.9.8"] {
            assert!(is_known_version(version), "{}", version);
        }
        for version in ["1.6", "0.9.2", "0.9.10", "2", ""] {
            assert!(!is_known_version(version), "{}", version);
        }
        assert_eq!(rules("Version", "1.7", Handler::Version), vec!["DF-TY-004"]);
    }

    #[test]
    fn test_comment_same_as_name() {
        let harness = Harness::new();
        let path = Path::new("a.desktop");
        let mut ctx = harness.context(path);
        let mut scope = GroupScope::new(
            "Desktop Entry",
            vec![("Name[fr]", "Éditeur"), ("Comment[fr]", "éditeur")],
        );
        let key = LocaleKey::parse("Comment[fr]").unwrap();
        run_handler(&mut ctx, &mut scope, entry("Comment[fr]", "éditeur"), &key, Handler::Comment);
        // Only ASCII letters compare case-insensitively
        assert!(ctx.sink.diagnostics().is_empty());

        let mut scope = GroupScope::new(
            "Desktop Entry",
            vec![("GenericName", "Text Editor"), ("Comment", "text editor")],
        );
        let key = LocaleKey::parse("Comment").unwrap();
        run_handler(&mut ctx, &mut scope, entry("Comment", "text editor"), &key, Handler::Comment);
        let found = ctx.sink.diagnostics();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].rule, "DF-CM-001");
        assert!(found[0].message.ends_with("looks the same as that of key \"GenericName\""));
    }

    #[test]
    fn test_icons() {
        assert!(rules("Icon", "accessories-text-editor", Handler::Icon).is_empty());
        assert!(rules("Icon", "/usr/share/pixmaps/foo.png", Handler::Icon).is_empty());
        assert_eq!(rules("Icon", "/usr/share/pixmaps/", Handler::Icon), vec!["DF-IC-001"]);
        assert_eq!(rules("Icon", "pixmaps/foo", Handler::Icon), vec!["DF-IC-002"]);

        let found = run_one("Icon", "foo.svg", Handler::Icon);
        assert_eq!(found[0].0, DiagnosticLevel::FutureError);
        assert_eq!(found[0].1, "DF-IC-003");
    }

    #[test]
    fn test_show_in_values() {
        assert!(rules("OnlyShowIn", "GNOME;X-Mine;", Handler::ShowIn).is_empty());
        assert_eq!(rules("OnlyShowIn", "GNOME;GNOME;", Handler::ShowIn), vec!["DF-SH-002"]);
        assert_eq!(rules("NotShowIn", "Windows;", Handler::ShowIn), vec!["DF-SH-003"]);
        // Interior empty items are still checked
        assert_eq!(rules("NotShowIn", "KDE;;XFCE;", Handler::ShowIn), vec!["DF-SH-003"]);
    }

    #[test]
    fn test_show_in_only_once_per_group() {
        let harness = Harness::new();
        let path = Path::new("a.desktop");
        let mut ctx = harness.context(path);
        let mut scope = GroupScope::new(
            "Desktop Entry",
            vec![("OnlyShowIn", "GNOME;"), ("NotShowIn", "KDE;")],
        );
        let only = LocaleKey::parse("OnlyShowIn").unwrap();
        let not = LocaleKey::parse("NotShowIn").unwrap();
        run_handler(&mut ctx, &mut scope, entry("OnlyShowIn", "GNOME;"), &only, Handler::ShowIn);
        run_handler(&mut ctx, &mut scope, entry("NotShowIn", "KDE;"), &not, Handler::ShowIn);
        let found = ctx.sink.diagnostics();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].rule, "DF-SH-001");
    }

    #[test]
    fn test_paths() {
        assert!(rules("Path", "/opt/app", Handler::Path).is_empty());
        assert_eq!(rules("Path", "opt/app", Handler::Path), vec!["DF-PA-001"]);
        assert_eq!(rules("Dev", "sdb1", Handler::Dev), vec!["DF-PA-001"]);
    }

    #[test]
    fn test_mime_types() {
        assert!(rules("MimeType", "text/plain;image/png;", Handler::MimeType).is_empty());
        assert_eq!(
            rules("MimeType", "text/plain;text/plain;", Handler::MimeType),
            vec!["DF-MT-003"]
        );

        let found = run_one("MimeType", "textplain;", Handler::MimeType);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, DiagnosticLevel::FutureError);
        assert_eq!(found[0].1, "DF-MT-002");
    }

    #[test]
    fn test_discouraged_mime_type_warns() {
        let harness = Harness::new();
        let path = Path::new("a.desktop");
        let mut ctx = harness.context(path);
        let mut scope = GroupScope::new("Desktop Entry", vec![("MimeType", "x-directory/normal;")]);
        let key = LocaleKey::parse("MimeType").unwrap();
        run_handler(
            &mut ctx,
            &mut scope,
            entry("MimeType", "x-directory/normal;"),
            &key,
            Handler::MimeType,
        );

        let report = ctx.sink.finish();
        assert!(report.valid);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].level, DiagnosticLevel::Warning);
        assert_eq!(report.diagnostics[0].rule, "DF-MT-001");
    }

    #[test]
    fn test_actions() {
        assert!(rules("Actions", "new-window;private;", Handler::Actions).is_empty());
        assert_eq!(rules("Actions", "a;;b;", Handler::Actions), vec!["DF-AC-001"]);
        assert_eq!(rules("Actions", "a;a;", Handler::Actions), vec!["DF-AC-002"]);
        assert_eq!(rules("Actions", "new_window;other;", Handler::Actions), vec!["DF-AC-003"]);
    }

    #[test]
    fn test_actions_recorded() {
        let harness = Harness::new();
        let path = Path::new("a.desktop");
        let mut ctx = harness.context(path);
        let mut scope = GroupScope::new("Desktop Entry", vec![("Actions", "b;a;")]);
        let key = LocaleKey::parse("Actions").unwrap();
        run_handler(&mut ctx, &mut scope, entry("Actions", "b;a;"), &key, Handler::Actions);
        let declared: Vec<_> = ctx.declared_actions.iter().cloned().collect();
        assert_eq!(declared, vec!["a", "b"]);
        assert_eq!(ctx.type_keys.application, vec!["Actions"]);
    }

    #[test]
    fn test_interface_names() {
        assert!(is_interface_name("org.freedesktop.Application"));
        assert!(is_interface_name("org._private.Foo2"));
        assert!(!is_interface_name("org"));
        assert!(!is_interface_name("org..Foo"));
        assert!(!is_interface_name("org.1foo"));
        assert!(!is_interface_name("org.foo-bar"));
        assert!(!is_interface_name(&format!("org.{}", "a".repeat(255))));
    }

    #[test]
    fn test_implements() {
        assert!(rules("Implements", "org.gnome.Shell.SearchProvider2;", Handler::Implements).is_empty());
        assert_eq!(rules("Implements", "nodots;", Handler::Implements), vec!["DF-IM-001"]);
        assert_eq!(rules("Implements", "org.A;org.A", Handler::Implements), vec!["DF-IM-002"]);
    }

    #[test]
    fn test_dbus_activatable_file_name() {
        let harness = Harness::new();
        for (name, expected) in [("org.example.App.desktop", 0), ("app.desktop", 1)] {
            let path = Path::new(name);
            let mut ctx = harness.context(path);
            let mut scope = GroupScope::new("Desktop Entry", vec![("DBusActivatable", "true")]);
            let key = LocaleKey::parse("DBusActivatable").unwrap();
            run_handler(&mut ctx, &mut scope, entry("DBusActivatable", "true"), &key, Handler::DBusActivatable);
            assert_eq!(ctx.sink.diagnostics().len(), expected, "{}", name);
        }

        let harness = Harness::new();
        let path = Path::new("app.desktop");
        let mut ctx = harness.context(path);
        let mut scope = GroupScope::new("Desktop Entry", vec![("DBusActivatable", "false")]);
        let key = LocaleKey::parse("DBusActivatable").unwrap();
        run_handler(&mut ctx, &mut scope, entry("DBusActivatable", "false"), &key, Handler::DBusActivatable);
        assert!(ctx.sink.diagnostics().is_empty());
    }

    #[test]
    fn test_encoding() {
        assert!(rules("Encoding", "UTF-8", Handler::Encoding).is_empty());
        assert_eq!(rules("Encoding", "Latin1", Handler::Encoding), vec!["DF-EN-001"]);
    }

    #[test]
    fn test_type_specific_keys_recorded() {
        let harness = Harness::new();
        let path = Path::new("a.desktop");
        let mut ctx = harness.context(path);
        let mut scope = GroupScope::new("Desktop Entry", vec![("URL", "https://example.org")]);
        let key = LocaleKey::parse("URL").unwrap();
        run_handler(&mut ctx, &mut scope, entry("URL", "https://example.org"), &key, Handler::LinkOnly);
        assert_eq!(ctx.type_keys.link, vec!["URL"]);
        assert!(ctx.type_keys.application.is_empty());
    }
}
