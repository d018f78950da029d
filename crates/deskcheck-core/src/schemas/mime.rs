//! MIME type classification for the `MimeType` key

/// Verdict on a single MIME type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MimeValidity {
    Valid,
    /// Usable, but should probably be replaced. Carries the reason.
    Discouraged(String),
    Invalid(String),
}

/// Classifies MIME type strings.
///
/// The validator only depends on this trait, so callers with access to a
/// MIME database can plug in a stricter implementation.
pub trait MimeTypeClassifier: Send + Sync {
    fn classify(&self, mime_type: &str) -> MimeValidity;
}

/// Media types used by freedesktop.org specifications.
const DESKTOP_MEDIA_TYPES: &[&str] = &["inode", "x-content", "x-scheme-handler", "chemical"];

const OLD_DESKTOP_MEDIA_TYPES: &[&str] = &["x-directory"];

const DISCRETE_MEDIA_TYPES: &[&str] = &[
    "application",
    "audio",
    "font",
    "image",
    "model",
    "text",
    "video",
];

const COMPOSITE_MEDIA_TYPES: &[&str] = &["message", "multipart"];

const UNUSABLE_MEDIA_TYPES: &[&str] = &["example"];

/// Accepted even though their media type alone would not be.
const VALID_EXCEPTIONS: &[&str] = &["message/rfc822", "multipart/related", "misc/ultravox"];

/// Aliases that have a proper registered replacement.
const ALIASES: &[(&str, &str)] = &[
    ("flv-application/octet-stream", "video/x-flv"),
    ("zz-application/zz-winassoc-123", "application/vnd.lotus-1-2-3"),
    ("zz-application/zz-winassoc-cab", "application/vnd.ms-cab-compressed"),
    ("zz-application/zz-winassoc-cdr", "application/vnd.corel-draw"),
    ("zz-application/zz-winassoc-doc", "application/vnd.ms-word"),
    ("zz-application/zz-winassoc-hlp", "application/winhlp"),
    ("zz-application/zz-winassoc-ini", "text/plain"),
    ("zz-application/zz-winassoc-lwp", "application/vnd.lotus-wordpro"),
    ("zz-application/zz-winassoc-lzh", "application/x-lzh-compressed"),
    ("zz-application/zz-winassoc-mdb", "application/vnd.ms-access"),
    ("zz-application/zz-winassoc-uu", "text/x-uuencode"),
    ("zz-application/zz-winassoc-xls", "application/vnd.ms-excel"),
];

/// RFC 2045 token characters: no controls, no space, no tspecials.
fn is_token_char(c: char) -> bool {
    c > ' ' && c != '\u{7f}' && !"()<>@,;:\\\"/[]?=".contains(c)
}

/// Classifier built from the registered IANA top-level media types and
/// the conventions of the freedesktop.org shared MIME database.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMimeClassifier;

impl StandardMimeClassifier {
    fn classify_media_type(media_type: &str) -> MimeValidity {
        if DESKTOP_MEDIA_TYPES.contains(&media_type) {
            return MimeValidity::Valid;
        }

        if OLD_DESKTOP_MEDIA_TYPES.contains(&media_type) {
            return MimeValidity::Discouraged(format!(
                "\"{}\" is an old media type that should be replaced with a modern equivalent",
                media_type
            ));
        }

        let lowered_prefix = media_type.get(..2).map(str::to_ascii_lowercase);
        if lowered_prefix.as_deref() == Some("x-") {
            if !media_type[2..].chars().all(is_token_char) {
                return MimeValidity::Invalid(format!(
                    "\"{}\" a media type that contains an invalid character",
                    media_type
                ));
            }
            return MimeValidity::Discouraged(format!(
                "the use of \"{}\" as media type is strongly discouraged in favor of a subtype of the \"application\" media type",
                media_type
            ));
        }

        if DISCRETE_MEDIA_TYPES.contains(&media_type) {
            return MimeValidity::Valid;
        }

        if COMPOSITE_MEDIA_TYPES.contains(&media_type) {
            return MimeValidity::Discouraged(format!(
                "\"{}\" is a media type that probably does not make sense in this context",
                media_type
            ));
        }

        if UNUSABLE_MEDIA_TYPES.contains(&media_type) {
            return MimeValidity::Invalid(format!(
                "\"{}\" is a media type that must not be used",
                media_type
            ));
        }

        MimeValidity::Invalid(format!("\"{}\" is an unregistered media type", media_type))
    }
}

impl MimeTypeClassifier for StandardMimeClassifier {
    fn classify(&self, mime_type: &str) -> MimeValidity {
        let Some((media_type, subtype)) = mime_type.split_once('/') else {
            return MimeValidity::Invalid(format!("\"{}\" does not contain a subtype", mime_type));
        };

        if subtype.is_empty() {
            return MimeValidity::Invalid(format!("\"{}\" contains an empty subtype", mime_type));
        }

        if !subtype.chars().all(is_token_char) {
            return MimeValidity::Invalid(format!(
                "\"{}\" contains an invalid character in the subtype",
                mime_type
            ));
        }

        let validity = Self::classify_media_type(media_type);

        if validity != MimeValidity::Valid && VALID_EXCEPTIONS.contains(&mime_type) {
            return MimeValidity::Valid;
        }

        // Already-discouraged types keep their own reason.
        if matches!(validity, MimeValidity::Invalid(_)) {
            if let Some((_, replacement)) = ALIASES.iter().find(|(alias, _)| *alias == mime_type) {
                return MimeValidity::Discouraged(format!(
                    "\"{}\" should be replaced with \"{}\"",
                    mime_type, replacement
                ));
            }
        }

        validity
    }
}
