use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 22, tags = ["2024", "simulation", "bits"])]
pub struct Solver;

const ROUNDS: usize = 2000;
const PRUNE: u64 = 1 << 24;
/// Four changes in `-9..=9`, packed base 19
const SEQUENCES: usize = 19 * 19 * 19 * 19;

impl AocParser for Solver {
    type SharedData<'a> = Vec<u64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| Ok(line.trim().parse::<u64>()?))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared
            .par_iter()
            .map(|&seed| secrets(seed).nth(ROUNDS - 1).unwrap_or(seed))
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let bananas = shared
            .par_iter()
            .fold(
                || vec![0u32; SEQUENCES],
                |mut totals, &seed| {
                    add_first_sales(&mut totals, seed);
                    totals
                },
            )
            .reduce(
                || vec![0u32; SEQUENCES],
                |mut a, b| {
                    a.iter_mut().zip(b).for_each(|(x, y)| *x += y);
                    a
                },
            );
        let best = bananas.into_iter().max().unwrap_or(0);
        Ok(best.to_string())
    }
}

fn next_secret(mut secret: u64) -> u64 {
    secret = (secret ^ (secret << 6)) % PRUNE;
    secret = (secret ^ (secret >> 5)) % PRUNE;
    (secret ^ (secret << 11)) % PRUNE
}

/// The secrets following `seed`, not including it
fn secrets(seed: u64) -> impl Iterator<Item = u64> {
    std::iter::successors(Some(seed), |&s| Some(next_secret(s))).skip(1)
}

/// Credit the price at the first occurrence of every change sequence
fn add_first_sales(totals: &mut [u32], seed: u64) {
    let mut seen = vec![false; SEQUENCES];
    let mut window = 0usize;
    let mut price = seed % 10;

    for (i, secret) in secrets(seed).take(ROUNDS).enumerate() {
        let next = secret % 10;
        let change = (next + 9 - price) as usize;
        window = (window * 19 + change) % SEQUENCES;
        price = next;
        if i >= 3 && !seen[window] {
            seen[window] = true;
            totals[window] += price as u32;
        }
    }
}
