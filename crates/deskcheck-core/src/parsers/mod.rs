//! Line-level parsing of desktop entry files

pub mod classify;
pub mod lines;
pub mod locale_key;

pub use classify::{classify_line, ClassifiedLine, LineKind};
pub use lines::{split_lines, CarriageReturn, RawLine, SplitLines};
pub use locale_key::{LocaleKey, MalformedKey};
