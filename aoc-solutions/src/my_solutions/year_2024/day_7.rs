use anyhow::Context;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::{numbers, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 7, tags = ["2024", "search"])]
pub struct Solver;

#[derive(Debug)]
pub struct Equation {
    target: u64,
    operands: Vec<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Equation>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let (target, rest) = line.split_once(':').context("missing ':'")?;
            Ok(Equation {
                target: target.trim().parse()?,
                operands: numbers(rest),
            })
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(calibration(shared, false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(calibration(shared, true).to_string())
    }
}

fn calibration(equations: &[Equation], concat: bool) -> u64 {
    equations
        .iter()
        .filter(|e| match e.operands.split_last() {
            Some((&last, rest)) => solvable(e.target, last, rest, concat),
            None => false,
        })
        .map(|e| e.target)
        .sum()
}

/// Works right to left, undoing each operator
///
/// The last operand can only have been added if `target >= last`, multiplied
/// if it divides `target`, and concatenated if `target` ends with its digits.
fn solvable(target: u64, last: u64, rest: &[u64], concat: bool) -> bool {
    let Some((&next, rest)) = rest.split_last() else {
        return target == last;
    };

    if target >= last && solvable(target - last, next, rest, concat) {
        return true;
    }
    if last != 0 && target % last == 0 && solvable(target / last, next, rest, concat) {
        return true;
    }
    if concat {
        let shift = 10u64.pow(last.checked_ilog10().unwrap_or(0) + 1);
        if target % shift == last && solvable(target / shift, next, rest, concat) {
            return true;
        }
    }
    false
}
