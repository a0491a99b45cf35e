use std::collections::BTreeSet;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
use crate::utils::{Dir, Grid, Pos};

const SPLITTER: u8 = b'^';

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 7, tags = ["2025", "grid", "dp"])]
pub struct Solver;

pub struct Manifold {
    grid: Grid<u8>,
    start: Pos,
}

impl AocParser for Solver {
    type SharedData<'a> = Manifold;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        let start = grid.require(b'S')?;
        Ok(Manifold { grid, start })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_splits(shared).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let cache = DpCache::new(HashMapBackend::new(), Timelines { grid: &shared.grid });
        Ok(cache.get(&shared.start).to_string())
    }
}

/// Sweep the beam front row by row, counting splitters it hits
fn count_splits(manifold: &Manifold) -> usize {
    let grid = &manifold.grid;
    let mut beams = BTreeSet::from([manifold.start.x]);
    let mut splits = 0;
    for y in manifold.start.y + 1..grid.height() as i64 {
        let mut next = BTreeSet::new();
        for x in beams {
            if grid.get(Pos::new(x, y)) == Some(&SPLITTER) {
                splits += 1;
                next.extend([x - 1, x + 1]);
            } else {
                next.insert(x);
            }
        }
        beams = next;
    }
    splits
}

/// Number of distinct paths a particle at a position can still take
struct Timelines<'g> {
    grid: &'g Grid<u8>,
}

impl DpProblem<Pos, u64> for Timelines<'_> {
    fn deps(&self, pos: &Pos) -> Vec<Pos> {
        let below = pos.step(Dir::S);
        match self.grid.get(below) {
            Some(&SPLITTER) => vec![
                Pos::new(below.x - 1, below.y),
                Pos::new(below.x + 1, below.y),
            ],
            Some(&b'.') => vec![below],
            _ => vec![],
        }
    }

    fn compute(&self, _pos: &Pos, deps: Vec<u64>) -> u64 {
        if deps.is_empty() { 1 } else { deps.iter().sum() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
.......S.......
...............
.......^.......
...............
......^.^......
...............
.....^.^.^.....
...............
....^.^...^....
...............
...^.^...^.^...
...............
..^...^.....^..
...............
.^.^.^.^.^...^.
...............
";

    #[test]
    fn example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "21");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "40");
    }

    #[test]
    fn missing_start_is_reported() {
        assert!(matches!(
            Solver::parse("...\n.^.\n"),
            Err(ParseError::MissingData(_))
        ));
    }
}
