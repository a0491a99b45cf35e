use std::collections::BTreeSet;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 2, tags = ["2025", "math"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<(u64, u64)>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(|range| {
                let (lo, hi) = range
                    .split_once('-')
                    .ok_or_else(|| ParseError::InvalidFormat(format!("range without '-': {range}")))?;
                let bound = |s: &str| {
                    s.parse::<u64>()
                        .map_err(|e| ParseError::InvalidFormat(format!("range {range}: {e}")))
                };
                let (lo, hi) = (bound(lo)?, bound(hi)?);
                if lo > hi {
                    return Err(ParseError::InvalidFormat(format!("reversed range {range}")));
                }
                Ok((lo, hi))
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_invalid(shared, false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_invalid(shared, true).to_string())
    }
}

fn sum_invalid(ranges: &[(u64, u64)], any_repeat: bool) -> u64 {
    ranges
        .iter()
        .map(|&(lo, hi)| repeated_ids(lo, hi, any_repeat).iter().sum::<u64>())
        .sum()
}

fn digits(n: u64) -> u32 {
    n.checked_ilog10().unwrap_or(0) + 1
}

/// IDs in `lo..=hi` made of one digit block repeated; twice only unless `any_repeat`
///
/// Every such ID is `seed * (1 + 10^p + 10^2p + ...)` for a `p`-digit seed, so
/// the candidates are generated instead of scanned.
fn repeated_ids(lo: u64, hi: u64, any_repeat: bool) -> BTreeSet<u64> {
    let mut ids = BTreeSet::new();
    for len in digits(lo)..=digits(hi) {
        for repeats in 2..=len {
            if len % repeats != 0 || (!any_repeat && repeats != 2) {
                continue;
            }
            let block = len / repeats;
            let multiplier: u64 = (0..repeats).map(|i| 10u64.pow(block * i)).sum();
            let first_seed = 10u64.pow(block - 1).max(lo.div_ceil(multiplier));
            let last_seed = (10u64.pow(block) - 1).min(hi / multiplier);
            ids.extend((first_seed..=last_seed).map(|seed| seed * multiplier));
        }
    }
    ids
}
