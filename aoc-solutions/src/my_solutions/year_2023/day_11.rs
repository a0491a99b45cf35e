use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 11, tags = ["2023", "grid", "math"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Pos>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let image = Grid::parse(input)?;
        Ok(image
            .iter()
            .filter(|&(_, &c)| c == b'#')
            .map(|(p, _)| p)
            .collect())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_distance(shared, 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_distance(shared, 1_000_000).to_string())
    }
}

/// Sum of pairwise distances once every empty row and column is `factor` wide
///
/// Manhattan distance splits per axis, so each axis is expanded and summed
/// independently.
fn total_distance(galaxies: &[Pos], factor: i64) -> i64 {
    axis_distance(galaxies.iter().map(|p| p.x).collect(), factor)
        + axis_distance(galaxies.iter().map(|p| p.y).collect(), factor)
}

fn axis_distance(mut coords: Vec<i64>, factor: i64) -> i64 {
    coords.sort_unstable();

    let mut expanded = Vec::with_capacity(coords.len());
    let mut shift = 0;
    for (i, &c) in coords.iter().enumerate() {
        if i > 0 {
            let gap = c - coords[i - 1] - 1;
            shift += gap.max(0) * (factor - 1);
        }
        expanded.push(c + shift);
    }

    // Each coordinate is subtracted by those after it and added by those before
    expanded
        .iter()
        .enumerate()
        .map(|(i, &c)| c * (2 * i as i64 - expanded.len() as i64 + 1))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
...#......
.......#..
#.........
..........
......#...
.#........
.........#
..........
.......#..
#...#.....
";

    #[test]
    fn example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "374");
        assert_eq!(total_distance(&shared, 10), 1030);
        assert_eq!(total_distance(&shared, 100), 8410);
    }

    #[test]
    fn no_galaxies() {
        let mut shared = Solver::parse("...\n...\n").unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "0");
    }
}
