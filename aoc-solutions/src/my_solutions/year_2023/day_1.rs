use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 1, tags = ["2023", "parsing"])]
pub struct Solver;

const WORDS: [&str; 9] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

impl AocParser for Solver {
    type SharedData<'a> = Vec<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let document: Vec<&str> = lines(input).collect();
        if document.is_empty() {
            return Err(ParseError::MissingData("empty calibration document".into()));
        }
        Ok(document)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        calibration_sum(shared, false)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        calibration_sum(shared, true)
    }
}

fn calibration_sum(document: &[&str], spelled: bool) -> Result<String, SolveError> {
    document
        .iter()
        .map(|line| {
            let mut found = line
                .char_indices()
                .filter_map(|(i, _)| digit_at(&line[i..], spelled));
            let first = found
                .next()
                .ok_or_else(|| SolveError::failed(format!("no digit in {line:?}")))?;
            let last = found.last().unwrap_or(first);
            Ok(first * 10 + last)
        })
        .sum::<Result<u32, _>>()
        .map(|s| s.to_string())
}

/// The digit starting `rest`, optionally spelled out; spelled digits may overlap
fn digit_at(rest: &str, spelled: bool) -> Option<u32> {
    let first = rest.as_bytes()[0];
    if first.is_ascii_digit() {
        return Some(u32::from(first - b'0'));
    }
    if !spelled {
        return None;
    }
    WORDS
        .iter()
        .position(|w| rest.starts_with(w))
        .map(|i| i as u32 + 1)
}
