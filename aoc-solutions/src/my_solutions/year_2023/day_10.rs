use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::{Dir, Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 10, tags = ["2023", "grid", "geometry"])]
pub struct Solver;

impl AocParser for Solver {
    /// Tiles of the main loop in walking order, starting at `S`
    type SharedData<'a> = Vec<Pos>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        let start = grid.require(b'S')?;
        trace_loop(&grid, start)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok((shared.len() / 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // Pick's theorem: A = i + b/2 - 1, with the area from the shoelace formula
        let twice_area = shared
            .iter()
            .circular_tuple_windows()
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum::<i64>()
            .abs();
        let boundary = shared.len() as i64;
        Ok((twice_area / 2 - boundary / 2 + 1).to_string())
    }
}

/// Directions a pipe tile connects
fn openings(tile: u8) -> &'static [Dir] {
    match tile {
        b'|' => &[Dir::N, Dir::S],
        b'-' => &[Dir::E, Dir::W],
        b'L' => &[Dir::N, Dir::E],
        b'J' => &[Dir::N, Dir::W],
        b'7' => &[Dir::S, Dir::W],
        b'F' => &[Dir::S, Dir::E],
        _ => &[],
    }
}

fn trace_loop(grid: &Grid<u8>, start: Pos) -> Result<Vec<Pos>, ParseError> {
    // S connects to whichever neighbours point back at it
    let Some(mut heading) = Dir::ALL.into_iter().find(|&d| {
        grid.get(start.step(d))
            .is_some_and(|&t| openings(t).contains(&d.opposite()))
    }) else {
        return Err(ParseError::InvalidFormat("no pipe connects to S".into()));
    };

    let mut path = vec![start];
    let mut here = start.step(heading);
    while here != start {
        path.push(here);
        let came_from = heading.opposite();
        heading = openings(grid[here])
            .iter()
            .copied()
            .find(|&d| d != came_from)
            .ok_or_else(|| ParseError::InvalidFormat(format!("loop breaks at {here:?}")))?;
        let next = here.step(heading);
        let connects = grid
            .get(next)
            .is_some_and(|&t| t == b'S' || openings(t).contains(&heading.opposite()));
        if !connects {
            return Err(ParseError::InvalidFormat(format!("loop breaks at {here:?}")));
        }
        here = next;
    }
    Ok(path)
}
