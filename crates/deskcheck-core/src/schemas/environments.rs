//! Registered desktop environments and autostart conditions

/// Desktop environment names accepted by `OnlyShowIn`/`NotShowIn`.
pub const REGISTERED_ENVIRONMENTS: &[&str] = &[
    "COSMIC",
    "GNOME",
    "GNOME-Classic",
    "GNOME-Flashback",
    "KDE",
    "LXDE",
    "LXQt",
    "MATE",
    "Razor",
    "ROX",
    "TDE",
    "Unity",
    "XFCE",
    "EDE",
    "Cinnamon",
    "Pantheon",
    "Budgie",
    "Enlightenment",
    "DDE",
    "Endless",
    "Old",
];

pub fn is_registered_environment(name: &str) -> bool {
    REGISTERED_ENVIRONMENTS.contains(&name)
}

/// A named `AutostartCondition` with a fixed argument shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutostartCondition {
    pub name: &'static str,
    /// When non-empty, the first argument must be one of these.
    pub first_args: &'static [&'static str],
    /// Arguments expected after the optional first argument.
    pub additional_args: usize,
}

pub const AUTOSTART_CONDITIONS: &[AutostartCondition] = &[
    AutostartCondition {
        name: "GNOME",
        first_args: &[],
        additional_args: 1,
    },
    AutostartCondition {
        name: "GNOME3",
        first_args: &["if-session", "unless-session"],
        additional_args: 1,
    },
    AutostartCondition {
        name: "GSettings",
        first_args: &[],
        additional_args: 2,
    },
];

pub fn lookup_autostart_condition(name: &str) -> Option<&'static AutostartCondition> {
    AUTOSTART_CONDITIONS.iter().find(|cond| cond.name == name)
}
