//! Registered values of the `Type` key

use std::fmt;

/// Resolved type of a desktop entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DesktopType {
    /// No `Type` key yet, or the last one had an unknown value.
    #[default]
    Invalid,
    Application,
    Link,
    Directory,
    Service,
    ServiceType,
    FsDevice,
    MimeType,
}

impl DesktopType {
    pub fn as_str(self) -> &'static str {
        match self {
            DesktopType::Invalid => "Invalid",
            DesktopType::Application => "Application",
            DesktopType::Link => "Link",
            DesktopType::Directory => "Directory",
            DesktopType::Service => "Service",
            DesktopType::ServiceType => "ServiceType",
            DesktopType::FsDevice => "FSDevice",
            DesktopType::MimeType => "MimeType",
        }
    }
}

impl fmt::Display for DesktopType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopTypeDescriptor {
    pub desktop_type: DesktopType,
    /// Reserved for KDE.
    pub vendor_reserved: bool,
    pub deprecated: bool,
}

pub const REGISTERED_TYPES: &[DesktopTypeDescriptor] = &[
    registered(DesktopType::Application, false, false),
    registered(DesktopType::Link, false, false),
    registered(DesktopType::Directory, false, false),
    registered(DesktopType::Service, true, false),
    registered(DesktopType::ServiceType, true, false),
    registered(DesktopType::FsDevice, true, false),
    registered(DesktopType::MimeType, false, true),
];

const fn registered(
    desktop_type: DesktopType,
    vendor_reserved: bool,
    deprecated: bool,
) -> DesktopTypeDescriptor {
    DesktopTypeDescriptor {
        desktop_type,
        vendor_reserved,
        deprecated,
    }
}

/// Find the registered type spelled exactly `value`.
pub fn lookup(value: &str) -> Option<&'static DesktopTypeDescriptor> {
    REGISTERED_TYPES
        .iter()
        .find(|desc| desc.desktop_type.as_str() == value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_registered() {
        assert_eq!(lookup("Application").unwrap().desktop_type, DesktopType::Application);
        assert_eq!(lookup("FSDevice").unwrap().desktop_type, DesktopType::FsDevice);
        assert!(lookup("FSDevice").unwrap().vendor_reserved);
        assert!(lookup("MimeType").unwrap().deprecated);
    }

    #[test]
    fn test_lookup_rejects_unknown_and_case() {
        assert!(lookup("application").is_none());
        assert!(lookup("Invalid").is_none());
        assert!(lookup("").is_none());
    }
}
