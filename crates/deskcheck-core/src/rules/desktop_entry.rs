//! Desktop entry validator

use crate::{
    config::LintConfig,
    diagnostics::{DiagnosticSink, ValidationReport},
    rules::{
        context::ValidationContext, cross_ref::check_document, document::build_document,
        Validator,
    },
    schemas::mime::{MimeTypeClassifier, StandardMimeClassifier},
};
use std::path::Path;
use tracing::debug;

/// Validates one desktop entry buffer: lines, groups, keys, then the
/// document-wide checks.
pub struct DesktopEntryValidator {
    mime: Box<dyn MimeTypeClassifier>,
}

impl Default for DesktopEntryValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl DesktopEntryValidator {
    pub fn new() -> Self {
        Self::with_mime_classifier(Box::new(StandardMimeClassifier))
    }

    /// Use `mime` to judge the items of `MimeType` keys.
    pub fn with_mime_classifier(mime: Box<dyn MimeTypeClassifier>) -> Self {
        Self { mime }
    }
}

impl Validator for DesktopEntryValidator {
    fn validate(&self, path: &Path, content: &[u8], config: &LintConfig) -> ValidationReport {
        let sink = DiagnosticSink::new(path, config);
        let mut ctx = ValidationContext::new(sink, path, self.mime.as_ref());

        let document = build_document(&mut ctx, content);
        check_document(&mut ctx, &document);

        let report = ctx.sink.finish();
        debug!(
            file = %path.display(),
            diagnostics = report.diagnostics.len(),
            valid = report.valid,
            "validated desktop entry"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{diagnostics::DiagnosticLevel, schemas::mime::MimeValidity};

    fn validate_named(name: &str, content: &str) -> ValidationReport {
        DesktopEntryValidator::new().validate(
            Path::new(name),
            content.as_bytes(),
            &LintConfig::default(),
        )
    }

    fn validate(content: &str) -> ValidationReport {
        validate_named("app.desktop", content)
    }

    fn fatal_rules(report: &ValidationReport) -> Vec<&str> {
        report
            .diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Error)
            .map(|d| d.rule.as_str())
            .collect()
    }

    #[test]
    fn test_minimal_entry_is_valid() {
        let report = validate("[Desktop Entry]\nType=Application\nName=Editor\n");
        assert!(report.valid);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_complete_application() {
        let report = validate(
            "[Desktop Entry]\n\
             Version=1.5\n\
             Type=Application\n\
             Name=Text Editor\n\
             Name[de]=Texteditor\n\
             GenericName=Editor\n\
             Comment=Edit text files\n\
             Icon=accessories-text-editor\n\
             Exec=editor --new-window %U\n\
             TryExec=editor\n\
             Terminal=false\n\
             MimeType=text/plain;text/x-csrc;\n\
             Categories=Utility;TextEditor;\n\
             Keywords=text;plaintext;\n\
             Actions=new-window;\n\
             StartupNotify=true\n\
             \n\
             [Desktop Action new-window]\n\
             Name=New Window\n\
             Exec=editor --new-window\n",
        );
        assert!(report.valid, "{:?}", report.diagnostics);
        assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);
    }

    #[test]
    fn test_duplicate_groups_counted_per_extra_occurrence() {
        let report = validate(
            "[Desktop Entry]\nType=Application\nName=x\n\
             [X-A]\nK=1\n[X-A]\nK=2\n[X-A]\nL=3\n[Desktop Entry]\n",
        );
        let duplicates = report
            .diagnostics
            .iter()
            .filter(|d| d.rule == "DF-GR-002")
            .count();
        assert_eq!(duplicates, 3);
    }

    #[test]
    fn test_validation_is_deterministic() {
        let content = "[Desktop Entry]\nType=Application\nName=x\nActions=b;a;\nCategories=Audio;\n\
                       [Desktop Action c]\nName=c\nExec=c\n";
        assert_eq!(validate(content), validate(content));
    }

    #[test]
    fn test_boolean_values() {
        for value in ["true", "false"] {
            let report = validate(&format!(
                "[Desktop Entry]\nType=Application\nName=x\nTerminal={}\n",
                value
            ));
            assert!(report.diagnostics.is_empty());
        }
        for value in ["0", "1"] {
            let report = validate(&format!(
                "[Desktop Entry]\nType=Application\nName=x\nTerminal={}\n",
                value
            ));
            assert!(report.valid);
            assert_eq!(report.diagnostics.len(), 1);
            assert_eq!(report.diagnostics[0].rule, "DF-VL-005");
        }
        let report = validate("[Desktop Entry]\nType=Application\nName=x\nTerminal=yes\n");
        assert_eq!(fatal_rules(&report), vec!["DF-VL-004"]);
    }

    #[test]
    fn test_exec_field_codes() {
        let exec = |cmd: &str| {
            validate(&format!(
                "[Desktop Entry]\nType=Application\nName=x\nExec={}\n",
                cmd
            ))
        };
        assert_eq!(fatal_rules(&exec("cmd %f %u")), vec!["DF-EX-005"]);
        assert!(exec("cmd \"%f\"").valid);
        assert_eq!(fatal_rules(&exec("cmd %z")), vec!["DF-EX-006"]);
    }

    #[test]
    fn test_categories_main_tally() {
        let report = validate("[Desktop Entry]\nType=Application\nName=x\nCategories=Audio;AudioVideo;\n");
        assert!(report.valid);
        assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);

        let report = validate("[Desktop Entry]\nType=Application\nName=x\nCategories=Audio;\n");
        assert!(report.valid);
        assert_eq!(report.count(DiagnosticLevel::FutureError), 1);
    }

    #[test]
    fn test_actions_and_groups() {
        let head = "[Desktop Entry]\nType=Application\nName=x\nExec=x\n";
        let group = "[Desktop Action run]\nName=Run\nExec=x --run\n";

        let report = validate(&format!("{}Actions=run;\n", head));
        assert_eq!(fatal_rules(&report), vec!["DF-AC-004"]);

        let report = validate(&format!("{}{}", head, group));
        assert_eq!(fatal_rules(&report), vec!["DF-AC-005"]);

        let report = validate(&format!("{}Actions=run;\n{}", head, group));
        assert!(report.valid);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_directory_filename() {
        let content = "[Desktop Entry]\nType=Directory\nName=Games\n";
        assert_eq!(fatal_rules(&validate_named("games.desktop", content)), vec!["DF-FN-001"]);
        assert!(validate_named("games.directory", content).valid);
    }

    #[test]
    fn test_empty_file_still_checks_filename() {
        let report = validate_named("empty.txt", "");
        assert_eq!(fatal_rules(&report), vec!["DF-SY-001", "DF-FN-003"]);
    }

    #[test]
    fn test_dbus_activatable_needs_reverse_dns_name() {
        let content = "[Desktop Entry]\nType=Application\nName=x\nDBusActivatable=true\n";
        assert_eq!(fatal_rules(&validate_named("app.desktop", content)), vec!["DF-DB-001"]);
        assert!(validate_named("org.example.App.desktop", content).valid);
    }

    #[test]
    fn test_implements_enables_interface_group() {
        let report = validate(
            "[Desktop Entry]\nType=Application\nName=x\nImplements=org.example.Search;\n\
             [org.example.Search]\nX-Provider=yes\n",
        );
        assert!(report.valid, "{:?}", report.diagnostics);
    }

    struct RejectAll;

    impl MimeTypeClassifier for RejectAll {
        fn classify(&self, _mime_type: &str) -> MimeValidity {
            MimeValidity::Invalid("rejected".to_string())
        }
    }

    #[test]
    fn test_custom_mime_classifier() {
        let validator = DesktopEntryValidator::with_mime_classifier(Box::new(RejectAll));
        let report = validator.validate(
            Path::new("app.desktop"),
            b"[Desktop Entry]\nType=Application\nName=x\nMimeType=text/plain;\n",
            &LintConfig::default(),
        );
        assert!(report.valid);
        let future: Vec<_> = report
            .diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::FutureError)
            .collect();
        assert_eq!(future.len(), 1);
        assert!(future[0].message.ends_with("which is an invalid MIME type: rejected"));
    }
}
