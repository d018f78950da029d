//! Registered keys of the main group and of action groups

/// Value type a key is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
    LocaleString,
    Boolean,
    Numeric,
    StringList,
    RegexpList,
    LocaleStringList,
}

impl ValueType {
    /// Only localized types may carry a `[locale]` suffix.
    pub fn is_localized(self) -> bool {
        matches!(self, ValueType::LocaleString | ValueType::LocaleStringList)
    }
}

/// Key-specific checks that run after the type check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Type,
    Version,
    Comment,
    Icon,
    ShowIn,
    /// `Exec` in the main group: also an application-only key.
    DesktopExec,
    /// `Exec` in an action group.
    ActionExec,
    Path,
    MimeType,
    Categories,
    Actions,
    Implements,
    DBusActivatable,
    Dev,
    MountPoint,
    Encoding,
    AutostartCondition,
    ApplicationOnly,
    LinkOnly,
    FsDeviceOnly,
    MimeTypeOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDefinition {
    pub name: &'static str,
    pub value_type: ValueType,
    pub required: bool,
    pub deprecated: bool,
    /// Reserved for KDE.
    pub vendor_reserved: bool,
    pub handler: Option<Handler>,
}

const fn key(name: &'static str, value_type: ValueType, handler: Option<Handler>) -> KeyDefinition {
    KeyDefinition {
        name,
        value_type,
        required: false,
        deprecated: false,
        vendor_reserved: false,
        handler,
    }
}

const fn required(name: &'static str, value_type: ValueType, handler: Option<Handler>) -> KeyDefinition {
    KeyDefinition {
        required: true,
        ..key(name, value_type, handler)
    }
}

const fn deprecated(name: &'static str, value_type: ValueType, handler: Option<Handler>) -> KeyDefinition {
    KeyDefinition {
        deprecated: true,
        ..key(name, value_type, handler)
    }
}

const fn kde(name: &'static str, value_type: ValueType, handler: Option<Handler>) -> KeyDefinition {
    KeyDefinition {
        vendor_reserved: true,
        ..key(name, value_type, handler)
    }
}

use self::Handler as H;
use self::ValueType as T;

pub const DESKTOP_KEYS: &[KeyDefinition] = &[
    required("Type", T::String, Some(H::Type)),
    // Numeric in recent versions, but older files use 0.9.x
    key("Version", T::String, Some(H::Version)),
    required("Name", T::LocaleString, None),
    key("GenericName", T::LocaleString, None),
    key("NoDisplay", T::Boolean, None),
    key("Comment", T::LocaleString, Some(H::Comment)),
    key("Icon", T::LocaleString, Some(H::Icon)),
    key("Hidden", T::Boolean, None),
    key("OnlyShowIn", T::StringList, Some(H::ShowIn)),
    key("NotShowIn", T::StringList, Some(H::ShowIn)),
    key("TryExec", T::String, Some(H::ApplicationOnly)),
    key("Exec", T::String, Some(H::DesktopExec)),
    key("Path", T::String, Some(H::Path)),
    key("Terminal", T::Boolean, Some(H::ApplicationOnly)),
    key("MimeType", T::StringList, Some(H::MimeType)),
    key("Categories", T::StringList, Some(H::Categories)),
    key("StartupNotify", T::Boolean, Some(H::ApplicationOnly)),
    key("StartupWMClass", T::String, Some(H::ApplicationOnly)),
    key("URL", T::String, Some(H::LinkOnly)),
    key("Keywords", T::LocaleStringList, None),
    key("Actions", T::StringList, Some(H::Actions)),
    key("Implements", T::StringList, Some(H::Implements)),
    key("DBusActivatable", T::Boolean, Some(H::DBusActivatable)),
    key("PrefersNonDefaultGPU", T::Boolean, None),
    key("SingleMainWindow", T::Boolean, None),
    kde("ServiceTypes", T::String, None),
    kde("DocPath", T::String, None),
    kde("InitialPreference", T::String, None),
    kde("Dev", T::String, Some(H::Dev)),
    kde("FSType", T::String, Some(H::FsDeviceOnly)),
    kde("MountPoint", T::String, Some(H::MountPoint)),
    kde("ReadOnly", T::Boolean, Some(H::FsDeviceOnly)),
    kde("UnmountIcon", T::String, Some(H::FsDeviceOnly)),
    deprecated("Protocols", T::String, None),
    deprecated("Extensions", T::String, None),
    deprecated("BinaryPattern", T::String, None),
    deprecated("MapNotify", T::String, None),
    deprecated("Patterns", T::RegexpList, Some(H::MimeTypeOnly)),
    deprecated("DefaultApp", T::String, Some(H::MimeTypeOnly)),
    deprecated("MiniIcon", T::String, None),
    deprecated("TerminalOptions", T::String, None),
    deprecated("Encoding", T::String, Some(H::Encoding)),
    deprecated("SwallowTitle", T::LocaleString, None),
    deprecated("SwallowExec", T::String, None),
    deprecated("SortOrder", T::StringList, None),
    deprecated("FilePattern", T::RegexpList, None),
    deprecated("X-KDE-RunOnDiscreteGpu", T::Boolean, None),
    // Autostart
    key("AutostartCondition", T::String, Some(H::AutostartCondition)),
];

pub const ACTION_KEYS: &[KeyDefinition] = &[
    required("Name", T::LocaleString, None),
    key("Icon", T::LocaleString, Some(H::Icon)),
    deprecated("OnlyShowIn", T::StringList, Some(H::ShowIn)),
    deprecated("NotShowIn", T::StringList, Some(H::ShowIn)),
    required("Exec", T::String, Some(H::ActionExec)),
];

/// Look a base key up in a key table.
pub fn find(table: &'static [KeyDefinition], name: &str) -> Option<&'static KeyDefinition> {
    table.iter().find(|def| def.name == name)
}

/// Names of the required keys of a table, in table order.
pub fn required_keys(table: &'static [KeyDefinition]) -> impl Iterator<Item = &'static str> {
    table.iter().filter(|def| def.required).map(|def| def.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_key_names_are_unique() {
        for table in [DESKTOP_KEYS, ACTION_KEYS] {
            let mut seen = HashSet::new();
            for def in table {
                assert!(seen.insert(def.name), "duplicate key {}", def.name);
            }
        }
    }

    #[test]
    fn test_required_main_keys() {
        let required: Vec<_> = required_keys(DESKTOP_KEYS).collect();
        assert_eq!(required, vec!["Type", "Name"]);
    }

    #[test]
    fn test_required_action_keys() {
        let required: Vec<_> = required_keys(ACTION_KEYS).collect();
        assert_eq!(required, vec!["Name", "Exec"]);
    }

    #[test]
    fn test_find_is_case_sensitive() {
        assert!(find(DESKTOP_KEYS, "Exec").is_some());
        assert!(find(DESKTOP_KEYS, "exec").is_none());
    }

    #[test]
    fn test_show_in_is_deprecated_only_in_actions() {
        assert!(!find(DESKTOP_KEYS, "OnlyShowIn").unwrap().deprecated);
        assert!(find(ACTION_KEYS, "OnlyShowIn").unwrap().deprecated);
    }

    #[test]
    fn test_kde_keys_are_flagged() {
        for name in ["ServiceTypes", "Dev", "FSType", "MountPoint", "ReadOnly"] {
            assert!(find(DESKTOP_KEYS, name).unwrap().vendor_reserved, "{}", name);
        }
    }

    #[test]
    fn test_localized_types() {
        assert!(ValueType::LocaleString.is_localized());
        assert!(ValueType::LocaleStringList.is_localized());
        assert!(!ValueType::StringList.is_localized());
        assert!(!ValueType::Boolean.is_localized());
    }
}
