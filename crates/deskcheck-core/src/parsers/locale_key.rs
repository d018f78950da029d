//! Splits `Key[locale]` into its base key and locale tag

use std::fmt;

/// A key name with its optional locale suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleKey {
    pub base: String,
    pub locale: Option<String>,
}

/// The raw key is not `Base` or `Base[locale]` with valid characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedKey;

/// Base keys and action identifiers: ASCII alphanumerics and `-`.
pub fn is_valid_identifier(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

fn is_locale_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'@')
}

impl LocaleKey {
    pub fn parse(raw: &str) -> Result<Self, MalformedKey> {
        let Some(open) = raw.rfind('[') else {
            if !is_valid_identifier(raw) {
                return Err(MalformedKey);
            }
            return Ok(Self {
                base: raw.to_string(),
                locale: None,
            });
        };

        let (base, suffix) = raw.split_at(open);
        if !is_valid_identifier(base) {
            return Err(MalformedKey);
        }

        let locale = suffix
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .filter(|tag| !tag.is_empty() && tag.bytes().all(is_locale_char))
            .ok_or(MalformedKey)?;

        Ok(Self {
            base: base.to_string(),
            locale: Some(locale.to_string()),
        })
    }

    /// The key spelled with `base` instead of this key's base, same locale.
    pub fn with_base(&self, base: &str) -> String {
        match &self.locale {
            Some(locale) => format!("{}[{}]", base, locale),
            None => base.to_string(),
        }
    }
}

impl fmt::Display for LocaleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.locale {
            Some(locale) => write!(f, "{}[{}]", self.base, locale),
            None => f.write_str(&self.base),
        }
    }
}
