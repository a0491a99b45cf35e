use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 4, tags = ["2024", "grid", "word-search"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse(input)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let grid: &Grid<u8> = shared;
        let directions = Pos::default().neighbours8();
        let found: usize = grid
            .positions()
            .filter(|&p| grid[p] == b'X')
            .map(|p| directions.iter().filter(|&&d| spells(grid, p, d, b"XMAS")).count())
            .sum();
        Ok(found.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let grid: &Grid<u8> = shared;
        let crosses = grid
            .positions()
            .filter(|&p| grid[p] == b'A' && is_mas_cross(grid, p))
            .count();
        Ok(crosses.to_string())
    }
}

/// Whether `word` reads from `start` stepping by `delta`
fn spells(grid: &Grid<u8>, start: Pos, delta: Pos, word: &[u8]) -> bool {
    let mut pos = start;
    for &letter in word {
        if grid.get(pos) != Some(&letter) {
            return false;
        }
        pos += delta;
    }
    true
}

/// Both diagonals through the `A` at `centre` read `MAS` one way or the other
fn is_mas_cross(grid: &Grid<u8>, centre: Pos) -> bool {
    let diagonal = |from: Pos, to: Pos| {
        let ends = (grid.get(centre + from).copied(), grid.get(centre + to).copied());
        matches!(ends, (Some(b'M'), Some(b'S')) | (Some(b'S'), Some(b'M')))
    };
    diagonal(Pos::new(-1, -1), Pos::new(1, 1)) && diagonal(Pos::new(1, -1), Pos::new(-1, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
MMMSXXMASM
MSAMXMSMSA
AMXSXMAAMM
MSAMASMSMX
XMASAMXAMM
XXAMMXXAMA
SMSMSASXSS
SAXAMASAAA
MAMMMXMMMM
MXMXAXMASX
";

    #[test]
    fn example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "18");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "9");
    }
}
