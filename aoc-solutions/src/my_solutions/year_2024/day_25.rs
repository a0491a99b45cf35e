use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::Grid;
use crate::utils::parse::blocks;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2024, day = 25, tags = ["2024", "bits"])]
pub struct Solver;

/// Schematics as bitmasks of their `#` cells
#[derive(Debug, Default)]
pub struct Schematics {
    locks: Vec<u64>,
    keys: Vec<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = Schematics;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut schematics = Schematics::default();
        let mut shape = None;
        for block in blocks(input) {
            let grid = Grid::parse(block)?;
            let size = (grid.width(), grid.height());
            if grid.width() * grid.height() > 64 {
                return Err(ParseError::InvalidFormat(format!(
                    "schematic {}x{} does not fit a 64-bit mask",
                    size.0, size.1
                )));
            }
            if *shape.get_or_insert(size) != size {
                return Err(ParseError::InvalidFormat(
                    "schematics differ in size".into(),
                ));
            }

            let mask = grid
                .iter()
                .enumerate()
                .filter(|&(_, (_, &c))| c == b'#')
                .fold(0u64, |m, (i, _)| m | 1 << i);
            if grid.row(0).iter().all(|&c| c == b'#') {
                schematics.locks.push(mask);
            } else if grid.row(grid.height() - 1).iter().all(|&c| c == b'#') {
                schematics.keys.push(mask);
            } else {
                return Err(ParseError::InvalidFormat(
                    "schematic is neither a lock nor a key".into(),
                ));
            }
        }
        Ok(schematics)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let fitting = shared
            .locks
            .iter()
            .cartesian_product(&shared.keys)
            .filter(|&(lock, key)| lock & key == 0)
            .count();
        Ok(fitting.to_string())
    }
}
