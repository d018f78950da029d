//! Exec command line checks (DF-EX-001 to DF-EX-009)
//!
//! Walks the command line once, tracking whether the cursor is inside a
//! double-quoted argument, whether the previous backslash pair escaped the
//! next character, and whether a `%` field code is pending.

use crate::rules::context::{EntryRef, ValidationContext};

/// Characters that must be quoted when used in an argument.
const RESERVED: &[char] = &[
    '\t', '\n', '\'', '>', '<', '~', '|', '&', ';', '*', '?', '#', '(', ')',
];

/// Characters allowed to follow a pending `%` without being an invalid field code.
fn continues_field_code(c: char) -> bool {
    matches!(
        c,
        ' ' | '%' | 'f' | 'u' | 'F' | 'U' | 'i' | 'c' | 'k' | 'd' | 'D' | 'n' | 'N' | 'v' | 'm'
    )
}

pub fn check_exec(ctx: &mut ValidationContext<'_>, entry: EntryRef<'_>) {
    let chars: Vec<char> = entry.value.chars().collect();
    let mut in_quote = false;
    let mut escaped = false;
    let mut field_code = false;
    let mut file_uri = false;

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];

        // DF-EX-006: a pending `%` followed by something that is no field code
        if field_code && !continues_field_code(c) {
            ctx.sink.fatal(
                entry.at(),
                "DF-EX-006",
                format!("{} contains an invalid field code \"%{}\"", entry.describe(), c),
            );
            field_code = false;
            i += 1;
            continue;
        }

        match c {
            '"' => {
                if in_quote {
                    if !escaped {
                        in_quote = false;
                    }
                } else if !escaped {
                    in_quote = true;
                } else {
                    // DF-EX-001
                    ctx.sink.fatal(
                        entry.at(),
                        "DF-EX-001",
                        format!(
                            "{} contains an escaped double quote (\\\\\") outside of a quote, \
                             but the double quote is a reserved character",
                            entry.describe()
                        ),
                    );
                }
                escaped = false;
            }
            '`' | '$' => {
                if in_quote {
                    if escaped {
                        escaped = false;
                    } else {
                        // DF-EX-002
                        ctx.sink.fatal(
                            entry.at(),
                            "DF-EX-002",
                            format!(
                                "{} contains a non-escaped character '{}' in a quote, \
                                 but it should be escaped with two backslashes (\"\\\\{}\")",
                                entry.describe(),
                                c,
                                c
                            ),
                        );
                    }
                } else {
                    reserved_outside_quote(ctx, entry, c);
                }
            }
            '\\' => {
                if i + 1 == chars.len() {
                    // DF-EX-004
                    ctx.sink.fatal(
                        entry.at(),
                        "DF-EX-004",
                        format!("{} ends in an incomplete escape sequence", entry.describe()),
                    );
                    break;
                }
                i += 1;
                if chars[i] == '\\' && in_quote {
                    escaped = !escaped;
                }
            }
            ' ' => {}
            '%' => field_code = !field_code,
            'f' | 'u' | 'F' | 'U' => {
                if field_code {
                    if file_uri {
                        // DF-EX-005
                        ctx.sink.fatal(
                            entry.at(),
                            "DF-EX-005",
                            format!(
                                "{} may contain at most one \"%f\", \"%u\", \"%F\" or \"%U\" field code",
                                entry.describe()
                            ),
                        );
                    }
                    file_uri = true;
                    field_code = false;
                }
            }
            'i' | 'c' | 'k' => field_code = false,
            'd' | 'D' | 'n' | 'N' | 'v' | 'm' => {
                if field_code {
                    // DF-EX-007
                    ctx.sink.deprecated(
                        entry.at(),
                        "DF-EX-007",
                        format!("{} contains a deprecated field code \"%{}\"", entry.describe(), c),
                    );
                    field_code = false;
                }
            }
            c if RESERVED.contains(&c) => {
                if !in_quote {
                    reserved_outside_quote(ctx, entry, c);
                }
            }
            _ => {}
        }

        i += 1;
    }

    if in_quote {
        // DF-EX-008
        ctx.sink.fatal(
            entry.at(),
            "DF-EX-008",
            format!("{} contains a quote which is not closed", entry.describe()),
        );
    }

    if field_code {
        // DF-EX-009
        ctx.sink.fatal(
            entry.at(),
            "DF-EX-009",
            format!("{} contains a non-complete field code", entry.describe()),
        );
    }
}

/// DF-EX-003: reserved character outside of a quoted argument
fn reserved_outside_quote(ctx: &mut ValidationContext<'_>, entry: EntryRef<'_>, c: char) {
    ctx.sink.fatal(
        entry.at(),
        "DF-EX-003",
        format!(
            "{} contains a reserved character '{}' outside of a quote",
            entry.describe(),
            c
        ),
    );
}
