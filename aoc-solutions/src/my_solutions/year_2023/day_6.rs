use anyhow::{ensure, Context};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::parse::{invalid, lines, numbers};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 6, tags = ["2023", "math"])]
pub struct Solver;

pub struct Races {
    times: Vec<u64>,
    records: Vec<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = Races;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let read = || -> anyhow::Result<Races> {
            let (time, distance) = lines(input)
                .collect_tuple()
                .context("expected a `Time:` row and a `Distance:` row")?;
            let times = numbers::<u64>(time);
            let records = numbers::<u64>(distance);
            ensure!(!times.is_empty(), "no races");
            ensure!(times.len() == records.len(), "every race needs a time and a record");
            Ok(Races { times, records })
        };
        read().map_err(invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let product: u64 = shared
            .times
            .iter()
            .zip(&shared.records)
            .map(|(&t, &d)| ways_to_win(t, d))
            .product();
        Ok(product.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // The spaces were kerning: one long race
        let time = join_digits(&shared.times)?;
        let record = join_digits(&shared.records)?;
        Ok(ways_to_win(time, record).to_string())
    }
}

fn join_digits(values: &[u64]) -> Result<u64, SolveError> {
    values
        .iter()
        .join("")
        .parse()
        .map_err(|e| SolveError::SolveFailed(Box::new(e)))
}

/// Hold times `h` with `h * (time - h) > record`
///
/// The winning holds form one interval symmetric about `time / 2`; its lower
/// edge is estimated from the quadratic and then corrected exactly.
fn ways_to_win(time: u64, record: u64) -> u64 {
    let beats = |h: u64| h * (time - h) > record;
    let disc = (time as f64).powi(2) - 4.0 * record as f64;
    if disc < 0.0 {
        return 0;
    }
    let mut low = ((time as f64 - disc.sqrt()) / 2.0).floor().max(0.0) as u64;
    while low <= time / 2 && !beats(low) {
        low += 1;
    }
    while low > 0 && beats(low - 1) {
        low -= 1;
    }
    if low > time / 2 {
        return 0;
    }
    time - 2 * low + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EXAMPLE: &str = "Time:      7  15   30\nDistance:  9  40  200\n";

    #[test]
    fn example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "288");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "71503");
    }

    #[test]
    fn unbeatable_record() {
        assert_eq!(ways_to_win(4, 4), 0);
        assert_eq!(ways_to_win(4, 3), 1);
    }

    #[test]
    fn mismatched_rows_are_rejected() {
        assert!(Solver::parse("Time: 1 2\nDistance: 3\n").is_err());
        assert!(Solver::parse("Time: 1\n").is_err());
    }

    proptest! {
        #[test]
        fn interval_matches_scan(time in 0u64..200, record in 0u64..10_000) {
            let scanned = (0..=time).filter(|h| h * (time - h) > record).count() as u64;
            prop_assert_eq!(ways_to_win(time, record), scanned);
        }
    }
}
