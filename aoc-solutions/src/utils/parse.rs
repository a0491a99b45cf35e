//! Text helpers shared by the daily parsers

use std::str::FromStr;

use anyhow::{Context, Result};
use aoc_solver::ParseError;

/// Every signed integer in `line`, ignoring any other text
///
/// A `-` counts as a sign only when it directly precedes a digit and does not
/// follow one, so `3-4` yields `3, 4`. A run of digits that does not fit `T`
/// is skipped rather than reported, so positional callers should check the
/// count they get back.
pub fn numbers<T: FromStr>(line: &str) -> Vec<T> {
    let bytes = line.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let negative = bytes[i] == b'-'
            && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)
            && (i == 0 || !bytes[i - 1].is_ascii_digit());
        if bytes[i].is_ascii_digit() || negative {
            let start = i;
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if let Ok(n) = line[start..i].parse() {
                out.push(n);
            }
        } else {
            i += 1;
        }
    }
    out
}

/// Blank-line separated sections, each trimmed of surrounding newlines
pub fn blocks(input: &str) -> Vec<&str> {
    let input = input.trim_matches(|c| c == '\n' || c == '\r');
    let mut out = Vec::new();
    let mut start = 0;
    let mut offset = 0;
    let mut previous_blank = false;
    for line in input.split_inclusive('\n') {
        let blank = line.trim().is_empty();
        if blank && !previous_blank {
            out.push(input[start..offset].trim_end());
        }
        if !blank && previous_blank {
            start = offset;
        }
        previous_blank = blank;
        offset += line.len();
    }
    out.push(input[start..].trim_end());
    out.retain(|b| !b.is_empty());
    out
}

/// Non-empty lines with trailing whitespace removed
pub fn lines(input: &str) -> impl Iterator<Item = &str> {
    input.lines().map(str::trim_end).filter(|l| !l.is_empty())
}

/// Parse each non-empty line with `f`, attaching the line number to failures
pub fn parse_lines<T>(input: &str, mut f: impl FnMut(&str) -> Result<T>) -> Result<Vec<T>, ParseError> {
    input
        .lines()
        .enumerate()
        .map(|(i, l)| (i, l.trim_end()))
        .filter(|(_, l)| !l.is_empty())
        .map(|(i, l)| f(l).with_context(|| format!("line {}: {l:?}", i + 1)))
        .collect::<Result<Vec<T>>>()
        .map_err(invalid)
}

/// Convert an `anyhow` chain into `ParseError::InvalidFormat`
pub fn invalid(err: anyhow::Error) -> ParseError {
    ParseError::InvalidFormat(format!("{err:#}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    #[test]
    fn numbers_handles_signs_and_separators() {
        assert_eq!(numbers::<i64>("p=0,4 v=-3,3"), vec![0, 4, -3, 3]);
        assert_eq!(numbers::<i64>("3-4 -5"), vec![3, 4, -5]);
        assert_eq!(numbers::<u32>("Time:      7  15   30"), vec![7, 15, 30]);
        assert!(numbers::<i32>("no digits").is_empty());
    }

    #[test]
    fn numbers_skip_values_too_wide_for_the_type() {
        assert_eq!(numbers::<u8>("7,300,-1,9"), vec![7, 9]);
        assert_eq!(numbers::<i64>("99999999999999999999 5"), vec![5]);
    }

    #[test]
    fn blocks_split_on_blank_lines() {
        let text = "\na\nb\n\n\nc\n  \nd\n";
        assert_eq!(blocks(text), vec!["a\nb", "c", "d"]);
        assert_eq!(blocks("single"), vec!["single"]);
        assert!(blocks("\n\n").is_empty());
    }

    #[test]
    fn parse_lines_reports_line_number() {
        let err = parse_lines("1\n\nx\n", |l| match l.parse::<u8>() {
            Ok(n) => Ok(n),
            Err(_) => bail!("not a number"),
        })
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid format: line 3: \"x\": not a number"
        );
    }
}
