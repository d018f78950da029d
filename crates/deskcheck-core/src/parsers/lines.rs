//! Splits a raw buffer into logical lines
//!
//! LF terminates a line. A CR directly before LF is dropped, and a bare CR
//! also terminates a line; either way the first occurrence is remembered so
//! it can be reported once. Empty lines are dropped, but still advance the
//! line counter.

/// One non-empty logical line, without its terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    /// 1-based line number.
    pub number: usize,
    pub bytes: &'a [u8],
}

impl RawLine<'_> {
    pub fn is_utf8(&self) -> bool {
        std::str::from_utf8(self.bytes).is_ok()
    }

    /// Line text for messages, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(self.bytes).into_owned()
    }
}

/// First line that used a carriage return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarriageReturn {
    pub line: usize,
    /// CR LF pair rather than a bare CR.
    pub before_line_feed: bool,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitLines<'a> {
    pub lines: Vec<RawLine<'a>>,
    pub carriage_return: Option<CarriageReturn>,
    /// First line containing bytes that are not valid UTF-8.
    pub first_non_utf8_line: Option<usize>,
}

pub fn split_lines(data: &[u8]) -> SplitLines<'_> {
    let mut split = SplitLines::default();
    let mut number = 1;
    let mut start = 0;
    let mut i = 0;

    while i < data.len() {
        let byte = data[i];
        if byte != b'\n' && byte != b'\r' {
            i += 1;
            continue;
        }

        let crlf = byte == b'\r' && data.get(i + 1) == Some(&b'\n');
        let bytes = &data[start..i];

        if byte == b'\r' && split.carriage_return.is_none() {
            split.carriage_return = Some(CarriageReturn {
                line: number,
                before_line_feed: crlf,
                text: String::from_utf8_lossy(bytes).into_owned(),
            });
        }

        push_line(&mut split, number, bytes);
        number += 1;
        i += if crlf { 2 } else { 1 };
        start = i;
    }

    push_line(&mut split, number, &data[start..]);
    split
}

fn push_line<'a>(split: &mut SplitLines<'a>, number: usize, bytes: &'a [u8]) {
    if bytes.is_empty() {
        return;
    }
    let line = RawLine { number, bytes };
    if split.first_non_utf8_line.is_none() && !line.is_utf8() {
        split.first_non_utf8_line = Some(number);
    }
    split.lines.push(line);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers_and_text(data: &[u8]) -> Vec<(usize, String)> {
        split_lines(data)
            .lines
            .iter()
            .map(|l| (l.number, l.text()))
            .collect()
    }

    #[test]
    fn test_lf_lines() {
        assert_eq!(
            numbers_and_text(b"a\nb\n"),
            vec![(1, "a".to_string()), (2, "b".to_string())]
        );
    }

    #[test]
    fn test_last_line_without_terminator() {
        assert_eq!(
            numbers_and_text(b"a\nb"),
            vec![(1, "a".to_string()), (2, "b".to_string())]
        );
    }

    #[test]
    fn test_empty_lines_skipped_but_counted() {
        assert_eq!(
            numbers_and_text(b"a\n\n\nb\n"),
            vec![(1, "a".to_string()), (4, "b".to_string())]
        );
    }

    #[test]
    fn test_crlf_counts_as_one_terminator() {
        let split = split_lines(b"a\r\nb\r\n");
        let lines: Vec<_> = split.lines.iter().map(|l| (l.number, l.text())).collect();
        assert_eq!(lines, vec![(1, "a".to_string()), (2, "b".to_string())]);

        let cr = split.carriage_return.unwrap();
        assert_eq!(cr.line, 1);
        assert!(cr.before_line_feed);
        assert_eq!(cr.text, "a");
    }

    #[test]
    fn test_bare_cr_terminates_line() {
        let split = split_lines(b"a\rb\n");
        assert_eq!(split.lines.len(), 2);
        assert_eq!(split.lines[1].number, 2);
        assert!(!split.carriage_return.unwrap().before_line_feed);
    }

    #[test]
    fn test_only_first_cr_recorded() {
        let split = split_lines(b"a\nb\r\nc\rd");
        let cr = split.carriage_return.unwrap();
        assert_eq!(cr.line, 2);
        assert_eq!(cr.text, "b");
    }

    #[test]
    fn test_non_utf8_line_recorded() {
        let split = split_lines(b"ok\nbad\xff\nalso\xfe\n");
        assert_eq!(split.first_non_utf8_line, Some(2));
        assert_eq!(split.lines.len(), 3);
    }

    #[test]
    fn test_empty_input() {
        let split = split_lines(b"");
        assert!(split.lines.is_empty());
        assert!(split.carriage_return.is_none());
    }
}
