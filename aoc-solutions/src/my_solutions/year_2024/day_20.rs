use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;

use crate::utils::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 20, tags = ["2024", "grid", "shortest-path"])]
pub struct Solver;

impl AocParser for Solver {
    /// Track cells in race order, start first
    type SharedData<'a> = Vec<Pos>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let map = Grid::parse(input)?;
        let start = map.require(b'S')?;
        let end = map.require(b'E')?;
        trace_track(&map, start, end)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_cheats(shared, 2, 100).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_cheats(shared, 20, 100).to_string())
    }
}

/// Follow the single-lane track from `start` to `end`
fn trace_track(map: &Grid<u8>, start: Pos, end: Pos) -> Result<Vec<Pos>, ParseError> {
    let mut track = vec![start];
    let mut prev = None;
    let mut here = start;
    while here != end {
        let mut open = map
            .neighbours4(here)
            .filter(|&n| map[n] != b'#' && Some(n) != prev);
        let next = open.next().ok_or_else(|| {
            ParseError::InvalidFormat(format!("track dead-ends at {here:?}"))
        })?;
        if open.next().is_some() {
            return Err(ParseError::InvalidFormat(format!("track forks at {here:?}")));
        }
        prev = Some(here);
        here = next;
        track.push(here);
    }
    Ok(track)
}

/// Cheats of at most `max_cheat` picoseconds that save at least `min_saving`
///
/// A cheat from track index `i` to `j` costs the manhattan distance between
/// the cells and saves `j - i` minus that cost.
fn count_cheats(track: &[Pos], max_cheat: u64, min_saving: usize) -> usize {
    (0..track.len())
        .into_par_iter()
        .map(|i| {
            track[i..]
                .iter()
                .enumerate()
                .skip(min_saving)
                .filter(|&(ahead, &to)| {
                    let cost = track[i].manhattan(to);
                    cost <= max_cheat && ahead - cost as usize >= min_saving
                })
                .count()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
###############
#...#...#.....#
#.#.#.#.#.###.#
#S#...#.#.#...#
#######.#.#.###
#######.#.#...#
#######.#.###.#
###..E#...#...#
###.#######.###
#...###...#...#
#.#####.#.###.#
#.#...#.#.#...#
#.#.#.#.#.#.###
#...#...#...###
###############
";

    #[test]
    fn track_length() {
        let track = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(track.len() - 1, 84);
    }

    #[test]
    fn short_cheats() {
        let track = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(count_cheats(&track, 2, 64), 1);
        assert_eq!(count_cheats(&track, 2, 40), 2);
        assert_eq!(count_cheats(&track, 2, 20), 5);
        assert_eq!(count_cheats(&track, 2, 2), 44);
    }

    #[test]
    fn long_cheats() {
        let track = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(count_cheats(&track, 20, 76), 3);
        assert_eq!(count_cheats(&track, 20, 74), 7);
        assert_eq!(count_cheats(&track, 20, 50), 285);
    }

    #[test]
    fn forked_track_is_rejected() {
        assert!(Solver::parse("#####\n#S..#\n#.#.#\n#..E#\n#####\n").is_err());
    }
}
