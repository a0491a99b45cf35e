use std::sync::LazyLock;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 3, tags = ["2024", "regex"])]
pub struct Solver;

static INSTRUCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"mul\((\d{1,3}),(\d{1,3})\)|do\(\)|don't\(\)").expect("instruction pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Mul(u64, u64),
    Do,
    Dont,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instruction>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        INSTRUCTION
            .captures_iter(input)
            .map(|caps| match (caps.get(1), caps.get(2)) {
                (Some(a), Some(b)) => {
                    let operand = |m: regex::Match<'_>| {
                        m.as_str()
                            .parse()
                            .map_err(|e| ParseError::InvalidFormat(format!("mul operand: {e}")))
                    };
                    Ok(Instruction::Mul(operand(a)?, operand(b)?))
                }
                _ if &caps[0] == "do()" => Ok(Instruction::Do),
                _ => Ok(Instruction::Dont),
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(run(shared, false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(run(shared, true).to_string())
    }
}

fn run(program: &[Instruction], conditionals: bool) -> u64 {
    let mut enabled = true;
    let mut total = 0;
    for &instruction in program {
        match instruction {
            Instruction::Mul(a, b) if enabled || !conditionals => total += a * b,
            Instruction::Mul(..) => {}
            Instruction::Do => enabled = true,
            Instruction::Dont => enabled = false,
        }
    }
    total
}
