use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::Grid;
use crate::utils::parse::blocks;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 13, tags = ["2023", "grid", "bits"])]
pub struct Solver;

/// A pattern as bitmasks of its rocks, row by row and column by column
#[derive(Debug)]
pub struct Pattern {
    rows: Vec<u64>,
    cols: Vec<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Pattern>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        blocks(input)
            .into_iter()
            .map(|block| {
                let grid = Grid::parse(block)?;
                if grid.width() > 64 || grid.height() > 64 {
                    return Err(ParseError::InvalidFormat(format!(
                        "pattern {}x{} is too large",
                        grid.width(),
                        grid.height()
                    )));
                }
                let mut rows = vec![0u64; grid.height()];
                let mut cols = vec![0u64; grid.width()];
                for (p, &c) in grid.iter() {
                    if c == b'#' {
                        rows[p.y as usize] |= 1 << p.x;
                        cols[p.x as usize] |= 1 << p.y;
                    }
                }
                Ok(Pattern { rows, cols })
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        summarize(shared, 0)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        summarize(shared, 1)
    }
}

fn summarize(patterns: &[Pattern], smudges: u32) -> Result<String, SolveError> {
    patterns
        .iter()
        .enumerate()
        .map(|(i, p)| {
            mirror(&p.cols, smudges)
                .or_else(|| mirror(&p.rows, smudges).map(|r| r * 100))
                .ok_or_else(|| {
                    SolveError::failed(format!("pattern {} has no mirror line", i + 1))
                })
        })
        .sum::<Result<usize, _>>()
        .map(|s| s.to_string())
}

/// Lines before the mirror whose reflection differs in exactly `smudges` cells
fn mirror(lines: &[u64], smudges: u32) -> Option<usize> {
    (1..lines.len()).find(|&split| {
        let (before, after) = lines.split_at(split);
        before
            .iter()
            .rev()
            .zip(after)
            .map(|(a, b)| (a ^ b).count_ones())
            .sum::<u32>()
            == smudges
    })
}
