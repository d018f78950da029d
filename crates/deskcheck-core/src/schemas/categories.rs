//! Registered menu categories and the implications between them
//!
//! Each category may list alternative sets of categories it requires or
//! suggests. An alternative is satisfied when every member of the set is
//! present; a list of alternatives is satisfied when any alternative is.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDescriptor {
    pub name: &'static str,
    pub main: bool,
    /// Reserved categories: only valid together with an `OnlyShowIn` key.
    pub requires_only_show_in: bool,
    pub deprecated: bool,
    pub requires: &'static [&'static [&'static str]],
    pub suggests: &'static [&'static [&'static str]],
}

impl CategoryDescriptor {
    /// Render alternatives as `A, or B;C`.
    pub fn describe(alternatives: &[&[&str]]) -> String {
        alternatives
            .iter()
            .map(|set| set.join(";"))
            .collect::<Vec<_>>()
            .join(", or ")
    }
}

const fn main_category(name: &'static str, requires: &'static [&'static [&'static str]]) -> CategoryDescriptor {
    CategoryDescriptor {
        name,
        main: true,
        requires_only_show_in: false,
        deprecated: false,
        requires,
        suggests: &[],
    }
}

const fn additional(name: &'static str, suggests: &'static [&'static [&'static str]]) -> CategoryDescriptor {
    CategoryDescriptor {
        name,
        main: false,
        requires_only_show_in: false,
        deprecated: false,
        requires: &[],
        suggests,
    }
}

const fn reserved(name: &'static str) -> CategoryDescriptor {
    CategoryDescriptor {
        requires_only_show_in: true,
        ..additional(name, &[])
    }
}

const fn deprecated(name: &'static str) -> CategoryDescriptor {
    CategoryDescriptor {
        deprecated: true,
        ..additional(name, &[])
    }
}

const DEVELOPMENT: &[&[&str]] = &[&["Development"]];
const OFFICE: &[&[&str]] = &[&["Office"]];
const GRAPHICS: &[&[&str]] = &[&["Graphics"]];
const GRAPHICS_2D: &[&[&str]] = &[&["Graphics", "2DGraphics"]];
const GRAPHICS_OR_OFFICE: &[&[&str]] = &[&["Graphics"], &["Office"]];
const SETTINGS: &[&[&str]] = &[&["Settings"]];
const NETWORK: &[&[&str]] = &[&["Network"]];
const AUDIO: &[&[&str]] = &[&["AudioVideo", "Audio"]];
const AUDIO_VIDEO_ANY: &[&[&str]] = &[&["Audio"], &["Video"], &["AudioVideo"]];
const GAME: &[&[&str]] = &[&["Game"]];
const EDUCATION_OR_SCIENCE: &[&[&str]] = &[&["Education"], &["Science"]];
const EDUCATION_SCIENCE_OR_UTILITY: &[&[&str]] = &[&["Education"], &["Science"], &["Utility"]];
const UTILITY: &[&[&str]] = &[&["Utility"]];
const SYSTEM: &[&[&str]] = &[&["System"]];
const QT: &[&[&str]] = &[&["Qt"]];
const GTK: &[&[&str]] = &[&["GTK"]];

pub const REGISTERED_CATEGORIES: &[CategoryDescriptor] = &[
    main_category("AudioVideo", &[]),
    main_category("Audio", &[&["AudioVideo"]]),
    main_category("Video", &[&["AudioVideo"]]),
    main_category("Development", &[]),
    main_category("Education", &[]),
    main_category("Game", &[]),
    main_category("Graphics", &[]),
    main_category("Network", &[]),
    main_category("Office", &[]),
    main_category("Science", &[]),
    main_category("Settings", &[]),
    main_category("System", &[]),
    main_category("Utility", &[]),
    additional("Building", DEVELOPMENT),
    additional("Debugger", DEVELOPMENT),
    additional("IDE", DEVELOPMENT),
    additional("GUIDesigner", DEVELOPMENT),
    additional("Profiling", DEVELOPMENT),
    additional("RevisionControl", DEVELOPMENT),
    additional("Translation", DEVELOPMENT),
    additional("Calendar", OFFICE),
    additional("ContactManagement", OFFICE),
    additional("Database", &[&["Office"], &["Development"], &["AudioVideo"]]),
    additional("Dictionary", &[&["Office"], &["TextTools"]]),
    additional("Chart", OFFICE),
    additional("Email", &[&["Office"], &["Network"]]),
    additional("Finance", OFFICE),
    additional("FlowChart", OFFICE),
    additional("PDA", OFFICE),
    additional("ProjectManagement", &[&["Office"], &["Development"]]),
    additional("Presentation", OFFICE),
    additional("Spreadsheet", OFFICE),
    additional("WordProcessor", OFFICE),
    additional("2DGraphics", GRAPHICS),
    additional("VectorGraphics", GRAPHICS_2D),
    additional("RasterGraphics", GRAPHICS_2D),
    additional("3DGraphics", GRAPHICS),
    additional("Scanning", GRAPHICS),
    additional("OCR", &[&["Graphics", "Scanning"]]),
    additional("Photography", GRAPHICS_OR_OFFICE),
    additional("Publishing", GRAPHICS_OR_OFFICE),
    additional("Viewer", GRAPHICS_OR_OFFICE),
    additional("TextTools", UTILITY),
    additional("DesktopSettings", SETTINGS),
    additional("HardwareSettings", SETTINGS),
    additional("Printing", &[&["HardwareSettings", "Settings"]]),
    additional("PackageManager", SETTINGS),
    additional("Dialup", NETWORK),
    additional("InstantMessaging", NETWORK),
    additional("Chat", NETWORK),
    additional("IRCClient", NETWORK),
    additional("Feed", NETWORK),
    additional("FileTransfer", NETWORK),
    additional("HamRadio", &[&["Network"], &["Audio"]]),
    additional("News", NETWORK),
    additional("P2P", NETWORK),
    additional("RemoteAccess", NETWORK),
    additional("Telephony", NETWORK),
    additional("TelephonyTools", UTILITY),
    additional("VideoConference", NETWORK),
    additional("WebBrowser", NETWORK),
    additional("WebDevelopment", &[&["Network"], &["Development"]]),
    additional("Midi", AUDIO),
    additional("Mixer", AUDIO),
    additional("Sequencer", AUDIO),
    additional("Tuner", AUDIO),
    additional("TV", &[&["AudioVideo", "Video"]]),
    additional("AudioVideoEditing", AUDIO_VIDEO_ANY),
    additional("Player", AUDIO_VIDEO_ANY),
    additional("Recorder", AUDIO_VIDEO_ANY),
    additional("DiscBurning", AUDIO_VIDEO_ANY),
    additional("ActionGame", GAME),
    additional("AdventureGame", GAME),
    additional("ArcadeGame", GAME),
    additional("BoardGame", GAME),
    additional("BlocksGame", GAME),
    additional("CardGame", GAME),
    additional("KidsGame", GAME),
    additional("LogicGame", GAME),
    additional("RolePlaying", GAME),
    additional("Shooter", GAME),
    additional("Simulation", GAME),
    additional("SportsGame", GAME),
    additional("StrategyGame", GAME),
    additional("Art", EDUCATION_OR_SCIENCE),
    additional("Construction", EDUCATION_OR_SCIENCE),
    additional("Music", &[&["AudioVideo"], &["Education"]]),
    additional("Languages", EDUCATION_OR_SCIENCE),
    additional("ArtificialIntelligence", EDUCATION_OR_SCIENCE),
    additional("Astronomy", EDUCATION_OR_SCIENCE),
    additional("Biology", EDUCATION_OR_SCIENCE),
    additional("Chemistry", EDUCATION_OR_SCIENCE),
    additional("ComputerScience", EDUCATION_OR_SCIENCE),
    additional("DataVisualization", EDUCATION_OR_SCIENCE),
    additional("Economy", EDUCATION_OR_SCIENCE),
    additional("Electricity", EDUCATION_OR_SCIENCE),
    additional("Geography", EDUCATION_OR_SCIENCE),
    additional("Geology", EDUCATION_OR_SCIENCE),
    additional("Geoscience", EDUCATION_OR_SCIENCE),
    additional("History", EDUCATION_OR_SCIENCE),
    additional("Humanities", EDUCATION_OR_SCIENCE),
    additional("ImageProcessing", EDUCATION_OR_SCIENCE),
    additional("Literature", EDUCATION_OR_SCIENCE),
    additional("Maps", EDUCATION_SCIENCE_OR_UTILITY),
    additional("Math", EDUCATION_OR_SCIENCE),
    additional("NumericalAnalysis", &[&["Education", "Math"], &["Science", "Math"]]),
    additional("MedicalSoftware", EDUCATION_OR_SCIENCE),
    additional("Physics", EDUCATION_OR_SCIENCE),
    additional("Robotics", EDUCATION_OR_SCIENCE),
    additional("Spirituality", EDUCATION_SCIENCE_OR_UTILITY),
    additional("Sports", EDUCATION_OR_SCIENCE),
    additional(
        "ParallelComputing",
        &[&["Education", "ComputerScience"], &["Science", "ComputerScience"]],
    ),
    additional("Amusement", &[]),
    additional("Archiving", UTILITY),
    additional("Compression", &[&["Utility", "Archiving"]]),
    additional("Electronics", &[]),
    additional("Emulator", &[&["System"], &["Game"]]),
    additional("Engineering", &[]),
    additional("FileTools", &[&["Utility"], &["System"]]),
    additional("FileManager", &[&["System", "FileTools"]]),
    additional("TerminalEmulator", SYSTEM),
    additional("Filesystem", SYSTEM),
    additional("Monitor", &[&["System"], &["Network"]]),
    additional("Security", &[&["Settings"], &["System"]]),
    additional("Accessibility", &[&["Settings"], &["Utility"]]),
    additional("Calculator", UTILITY),
    additional("Clock", UTILITY),
    additional("TextEditor", UTILITY),
    additional("Documentation", &[]),
    additional("Adult", &[]),
    additional("Core", &[]),
    additional("COSMIC", &[]),
    additional("KDE", QT),
    additional("GNOME", GTK),
    additional("XFCE", GTK),
    additional("DDE", QT),
    additional("LXQt", QT),
    additional("GTK", &[]),
    additional("Qt", &[]),
    additional("Motif", &[]),
    additional("Java", &[]),
    additional("ConsoleOnly", &[]),
    reserved("Screensaver"),
    reserved("TrayIcon"),
    reserved("Applet"),
    reserved("Shell"),
    deprecated("Application"),
    deprecated("Applications"),
];

pub fn lookup(name: &str) -> Option<&'static CategoryDescriptor> {
    REGISTERED_CATEGORIES.iter().find(|cat| cat.name == name)
}
