//! Classifies a logical line as comment, group header or entry

/// ASCII whitespace as understood by C's `isspace`, vertical tab included.
pub fn is_space(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == 0x0b
}

fn trim_start(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| !is_space(*b)).unwrap_or(bytes.len());
    &bytes[start..]
}

fn trim_end(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|b| !is_space(*b)).map_or(0, |i| i + 1);
    &bytes[..end]
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Comment,
    Group {
        name: String,
        /// Whitespace followed the closing bracket.
        trailing_space: bool,
    },
    Entry {
        key: String,
        value: String,
        value_is_utf8: bool,
    },
    /// Neither comment, group nor entry.
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub kind: LineKind,
    /// Non-blank line that started with whitespace.
    pub leading_space: bool,
}

pub fn classify_line(line: &[u8]) -> ClassifiedLine {
    let stripped = trim_start(line);

    if stripped.is_empty() {
        return ClassifiedLine {
            kind: LineKind::Comment,
            leading_space: false,
        };
    }

    ClassifiedLine {
        kind: classify_stripped(stripped),
        leading_space: stripped.len() != line.len(),
    }
}

fn classify_stripped(line: &[u8]) -> LineKind {
    if line[0] == b'#' {
        return LineKind::Comment;
    }

    let chomped = trim_end(line);
    if chomped.len() >= 2 && chomped[0] == b'[' && chomped[chomped.len() - 1] == b']' {
        return LineKind::Group {
            name: lossy(&chomped[1..chomped.len() - 1]),
            trailing_space: chomped.len() != line.len(),
        };
    }

    match line.iter().position(|b| *b == b'=') {
        Some(eq) if eq > 0 => {
            let value = trim_start(&line[eq + 1..]);
            LineKind::Entry {
                key: lossy(trim_end(&line[..eq])),
                value: lossy(value),
                value_is_utf8: std::str::from_utf8(value).is_ok(),
            }
        }
        _ => LineKind::Invalid,
    }
}
