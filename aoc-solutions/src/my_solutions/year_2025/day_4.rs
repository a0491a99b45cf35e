use std::collections::VecDeque;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::{Grid, Pos};

const ROLL: u8 = b'@';
const CROWDED: usize = 4;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 4, tags = ["2025", "grid", "simulation"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse(input)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let counts = neighbour_counts(shared);
        let accessible = shared
            .iter()
            .filter(|&(pos, &c)| c == ROLL && counts[pos] < CROWDED)
            .count();
        Ok(accessible.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(remove_until_stable(shared).to_string())
    }
}

fn neighbour_counts(grid: &Grid<u8>) -> Grid<usize> {
    Grid::from_fn(grid.width(), grid.height(), |pos| {
        grid.neighbours8(pos).filter(|&n| grid[n] == ROLL).count()
    })
}

/// Remove accessible rolls until none remain accessible
///
/// Removing a roll only lowers its neighbours' counts, so a work queue of
/// newly accessible rolls reaches the same fixed point as repeated sweeps.
fn remove_until_stable(grid: &Grid<u8>) -> usize {
    let mut counts = neighbour_counts(grid);
    let mut present = grid.map(|&c| c == ROLL);
    let mut queue: VecDeque<Pos> = grid
        .positions()
        .filter(|&p| present[p] && counts[p] < CROWDED)
        .collect();

    let mut removed = 0;
    while let Some(pos) = queue.pop_front() {
        if !present[pos] {
            continue;
        }
        present[pos] = false;
        removed += 1;
        for n in pos.neighbours8() {
            if present.get(n) == Some(&true) {
                counts[n] -= 1;
                if counts[n] == CROWDED - 1 {
                    queue.push_back(n);
                }
            }
        }
    }
    removed
}
