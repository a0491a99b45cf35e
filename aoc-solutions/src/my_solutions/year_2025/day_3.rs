use anyhow::bail;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 3, tags = ["2025", "greedy"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<u8>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            if let Some(c) = line.chars().find(|c| !c.is_ascii_digit()) {
                bail!("battery ratings must be digits, found {c:?}");
            }
            Ok(line.bytes().map(|b| b - b'0').collect())
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_joltage(shared, 2).map(|j| j.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_joltage(shared, 12).map(|j| j.to_string())
    }
}

fn total_joltage(banks: &[Vec<u8>], batteries: usize) -> Result<u64, SolveError> {
    banks
        .iter()
        .map(|bank| {
            max_joltage(bank, batteries).ok_or_else(|| {
                SolveError::failed(format!(
                    "bank of {} batteries cannot supply {batteries}",
                    bank.len()
                ))
            })
        })
        .sum()
}

/// Largest number formed by keeping `keep` digits of `bank` in order
///
/// Monotonic stack: drop a smaller digit whenever a larger one follows and
/// enough digits remain to still fill `keep` places.
fn max_joltage(bank: &[u8], keep: usize) -> Option<u64> {
    if keep == 0 || bank.len() < keep {
        return None;
    }
    let mut can_drop = bank.len() - keep;
    let mut stack: Vec<u8> = Vec::with_capacity(bank.len());
    for &digit in bank {
        while can_drop > 0 && stack.last().is_some_and(|&top| top < digit) {
            stack.pop();
            can_drop -= 1;
        }
        stack.push(digit);
    }
    Some(
        stack[..keep]
            .iter()
            .fold(0u64, |acc, &d| acc * 10 + u64::from(d)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EXAMPLE: &str = "987654321111111\n811111111111119\n234234234234278\n818181911112111\n";

    #[test]
    fn example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "357");
        assert_eq!(
            <Solver as PartSolver<2>>::solve(&mut shared).unwrap(),
            "3121910778619"
        );
    }

    #[test]
    fn short_bank_fails() {
        let mut shared = Solver::parse("12345").unwrap();
        assert!(<Solver as PartSolver<2>>::solve(&mut shared).is_err());
    }

    proptest! {
        #[test]
        fn two_digit_greedy_matches_brute_force(bank in prop::collection::vec(1u8..=9, 2..16)) {
            let mut best = 0u64;
            for i in 0..bank.len() {
                for j in i + 1..bank.len() {
                    best = best.max(u64::from(bank[i]) * 10 + u64::from(bank[j]));
                }
            }
            prop_assert_eq!(max_joltage(&bank, 2), Some(best));
        }
    }
}
