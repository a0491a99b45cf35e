use std::collections::HashSet;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 10, tags = ["2024", "grid", "dfs"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        if let Some((pos, &c)) = grid.iter().find(|(_, c)| !c.is_ascii_digit() && **c != b'.') {
            return Err(ParseError::InvalidFormat(format!(
                "unexpected height {:?} at {},{}",
                c as char, pos.x, pos.y
            )));
        }
        // impassable '.' tiles become an unreachable height
        Ok(grid.map(|&c| if c == b'.' { u8::MAX } else { c - b'0' }))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let grid: &Grid<u8> = shared;
        let score: usize = trailheads(grid)
            .map(|start| {
                let mut peaks = HashSet::new();
                climb(grid, start, &mut |peak| {
                    peaks.insert(peak);
                });
                peaks.len()
            })
            .sum();
        Ok(score.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let grid: &Grid<u8> = shared;
        let rating: usize = trailheads(grid)
            .map(|start| {
                let mut trails = 0;
                climb(grid, start, &mut |_| trails += 1);
                trails
            })
            .sum();
        Ok(rating.to_string())
    }
}

fn trailheads(grid: &Grid<u8>) -> impl Iterator<Item = Pos> + '_ {
    grid.iter().filter(|&(_, &h)| h == 0).map(|(p, _)| p)
}

/// Follow every gradual uphill path, reporting each time a 9 is reached
fn climb(grid: &Grid<u8>, pos: Pos, on_peak: &mut impl FnMut(Pos)) {
    let height = grid[pos];
    if height == 9 {
        on_peak(pos);
        return;
    }
    for next in grid.neighbours4(pos) {
        if grid[next] == height + 1 {
            climb(grid, next, on_peak);
        }
    }
}
