//! Command line classifier
//!
//! Pure functions: a received line in, a [`Command`] out. Malformed input
//! never errors. Unknown text is [`Command::None`] and a bad argument
//! reads as `0`.

use crate::command::{Command, Keyword, KEYWORDS};

/// Scan a decimal number starting at byte `start`
///
/// Stops at the first non-digit or the end of the string. A start past the
/// end yields `0`. Overflow wraps; there is no sign handling.
pub fn parse_int(s: &str, start: usize) -> i32 {
    let Some(digits) = s.as_bytes().get(start..) else {
        return 0;
    };

    digits
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0i32, |acc, &b| acc.wrapping_mul(10).wrapping_add(i32::from(b - b'0')))
}

/// Classify an optional line; no input is [`Command::None`]
pub fn classify(line: Option<&str>) -> Command {
    line.map_or(Command::None, classify_line)
}

/// Classify one received line
pub fn classify_line(line: &str) -> Command {
    let bytes = line.as_bytes();

    for (text, keyword) in KEYWORDS {
        if !starts_with_ignore_case(bytes, text.as_bytes()) {
            continue;
        }
        return match keyword {
            Keyword::Plain(cmd) => *cmd,
            Keyword::Numeric(build) => build(argument(line, text.len())),
        };
    }

    Command::None
}

fn starts_with_ignore_case(line: &[u8], keyword: &[u8]) -> bool {
    line.get(..keyword.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(keyword))
}

/// Argument following a keyword of length `end`
///
/// Exactly one `=` or space separator is accepted; any other byte in that
/// position means no argument.
fn argument(line: &str, end: usize) -> i32 {
    match line.as_bytes().get(end) {
        Some(b'=') | Some(b' ') => parse_int(line, end + 1),
        _ => 0,
    }
}
