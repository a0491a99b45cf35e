use anyhow::Context;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::{blocks, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 5, tags = ["2025", "intervals"])]
pub struct Solver;

#[derive(Debug)]
pub struct Inventory {
    /// Sorted, non-overlapping, inclusive
    fresh: Vec<(u64, u64)>,
    available: Vec<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = Inventory;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let sections = blocks(input);
        let [ranges, ids] = sections[..] else {
            return Err(ParseError::InvalidFormat(format!(
                "expected a range block and an id block, found {} blocks",
                sections.len()
            )));
        };

        let ranges = parse_lines(ranges, |line| {
            let (lo, hi) = line.split_once('-').context("range without '-'")?;
            Ok((lo.trim().parse::<u64>()?, hi.trim().parse::<u64>()?))
        })?;
        let available = parse_lines(ids, |line| Ok(line.trim().parse::<u64>()?))?;

        Ok(Inventory {
            fresh: merge(ranges),
            available,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let fresh = shared
            .available
            .iter()
            .filter(|&&id| is_fresh(&shared.fresh, id))
            .count();
        Ok(fresh.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(fresh_count(&shared.fresh).to_string())
    }
}

/// IDs covered by merged ranges; the full `u64` span needs one more bit
fn fresh_count(merged: &[(u64, u64)]) -> u128 {
    merged
        .iter()
        .map(|&(lo, hi)| u128::from(hi - lo) + 1)
        .sum()
}

/// Sort and coalesce overlapping or touching inclusive ranges
fn merge(mut ranges: Vec<(u64, u64)>) -> Vec<(u64, u64)> {
    ranges.retain(|(lo, hi)| lo <= hi);
    ranges.sort_unstable();
    let mut merged: Vec<(u64, u64)> = Vec::with_capacity(ranges.len());
    for (lo, hi) in ranges {
        match merged.last_mut() {
            Some((_, end)) if lo <= end.saturating_add(1) => *end = (*end).max(hi),
            _ => merged.push((lo, hi)),
        }
    }
    merged
}

fn is_fresh(merged: &[(u64, u64)], id: u64) -> bool {
    let after = merged.partition_point(|&(lo, _)| lo <= id);
    after > 0 && merged[after - 1].1 >= id
}
