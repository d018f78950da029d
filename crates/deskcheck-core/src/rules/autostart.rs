//! AutostartCondition checks (DF-AS-001 to DF-AS-010)
//!
//! A condition is a name followed by space separated arguments. File tests
//! (`if-exists`, `unless-exists`) take a path relative to `$XDG_CONFIG_HOME`,
//! registered conditions have a fixed argument shape, desktop environment
//! names take an optional free-form test, and `X-` conditions are opaque.

use crate::{
    rules::context::{EntryRef, ValidationContext},
    schemas::environments::{is_registered_environment, lookup_autostart_condition},
};

/// Split `value` into the condition name and everything after the first
/// run of spaces. `None` when there is no space at all.
fn split_condition(value: &str) -> (&str, Option<&str>) {
    match value.split_once(' ') {
        Some((condition, rest)) => (condition, Some(rest.trim_start_matches(' '))),
        None => (value, None),
    }
}

fn has_trailing_space(ctx: &mut ValidationContext<'_>, entry: EntryRef<'_>, argument: Option<&str>) {
    if argument == Some("") {
        // DF-AS-004
        ctx.sink.warning(
            entry.at(),
            "DF-AS-004",
            format!("{} has trailing space(s)", entry.describe()),
        );
    }
}

pub fn check_autostart_condition(ctx: &mut ValidationContext<'_>, entry: EntryRef<'_>) {
    let (condition, argument) = split_condition(entry.value);

    match condition {
        "if-exists" | "unless-exists" => check_file_test(ctx, entry, argument),
        c if c.starts_with("X-") => has_trailing_space(ctx, entry, argument),
        c => match lookup_autostart_condition(c) {
            Some(registered) => {
                let mut argument = argument;

                if !registered.first_args.is_empty() {
                    let rest = argument.and_then(|arg| {
                        registered.first_args.iter().find_map(|first| {
                            let after = arg.strip_prefix(first)?;
                            (after.is_empty() || after.starts_with(' '))
                                .then(|| after.trim_start_matches(' '))
                        })
                    });

                    match rest {
                        Some(rest) => argument = Some(rest),
                        None => {
                            // DF-AS-005
                            ctx.sink.fatal(
                                entry.at(),
                                "DF-AS-005",
                                format!(
                                    "{} does not contain a valid first argument for condition \"{}\"; valid first arguments are: {}",
                                    entry.describe(),
                                    condition,
                                    registered.first_args.join(", or ")
                                ),
                            );
                            return;
                        }
                    }
                }

                check_argument_count(ctx, entry, condition, argument, registered.additional_args);
            }
            None => {
                if !is_registered_environment(c) {
                    // DF-AS-010
                    ctx.sink.fatal(
                        entry.at(),
                        "DF-AS-010",
                        format!(
                            "{} contains an unregistered value \"{}\" for the condition; values extending the format should start with \"X-\"",
                            entry.describe(),
                            condition
                        ),
                    );
                }
                has_trailing_space(ctx, entry, argument);
            }
        },
    }
}

/// DF-AS-001 to DF-AS-003: path argument of a file test
fn check_file_test(ctx: &mut ValidationContext<'_>, entry: EntryRef<'_>, argument: Option<&str>) {
    match argument {
        None | Some("") => ctx.sink.fatal(
            entry.at(),
            "DF-AS-001",
            format!(
                "{} does not contain a path to a file to test the condition",
                entry.describe()
            ),
        ),
        Some(path) if path.starts_with('/') => ctx.sink.fatal(
            entry.at(),
            "DF-AS-002",
            format!(
                "{} contains a path \"{}\" that is absolute, while it should be relative (to $XDG_CONFIG_HOME)",
                entry.describe(),
                path
            ),
        ),
        Some(path) if path == ".." || path.starts_with("../") => ctx.sink.warning(
            entry.at(),
            "DF-AS-003",
            format!(
                "{} contains a path \"{}\" that depends on the value of $XDG_CONFIG_HOME (\"..\" should be avoided)",
                entry.describe(),
                path
            ),
        ),
        Some(_) => {}
    }
}

/// DF-AS-006 to DF-AS-009: arguments after the optional first argument
fn check_argument_count(
    ctx: &mut ValidationContext<'_>,
    entry: EntryRef<'_>,
    condition: &str,
    argument: Option<&str>,
    expected: usize,
) {
    let argument = argument.unwrap_or("");

    match expected {
        // No registered condition takes zero arguments at the moment
        0 if !argument.is_empty() => ctx.sink.fatal(
            entry.at(),
            "DF-AS-006",
            format!(
                "{} has too many arguments for condition \"{}\"",
                entry.describe(),
                condition
            ),
        ),
        // Spaces are allowed in a single last argument, so it is not split
        1 if argument.is_empty() => ctx.sink.fatal(
            entry.at(),
            "DF-AS-007",
            format!(
                "{} is missing a last argument for condition \"{}\"",
                entry.describe(),
                condition
            ),
        ),
        0 | 1 => {}
        _ => {
            let found = argument.split(' ').filter(|arg| !arg.is_empty()).count();
            if found > expected {
                ctx.sink.fatal(
                    entry.at(),
                    "DF-AS-008",
                    format!(
                        "{} has {} too many arguments for condition \"{}\"",
                        entry.describe(),
                        found - expected,
                        condition
                    ),
                );
            } else if found < expected {
                ctx.sink.fatal(
                    entry.at(),
                    "DF-AS-009",
                    format!(
                        "{} has {} too few arguments for condition \"{}\"",
                        entry.describe(),
                        expected - found,
                        condition
                    ),
                );
            }
        }
    }
}
