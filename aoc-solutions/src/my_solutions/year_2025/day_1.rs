use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::parse_lines;

const DIAL_SIZE: i64 = 100;
const DIAL_START: i64 = 50;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 1, tags = ["2025", "simulation"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    rotations: Vec<i64>,
    counts: Option<ZeroCounts>,
}

#[derive(Debug, Clone, Copy)]
struct ZeroCounts {
    landed: u64,
    passed: u64,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let rotations = parse_lines(input, |line| {
            let sign = match line.as_bytes()[0] {
                b'L' => -1,
                b'R' => 1,
                other => bail!("rotation must start with 'L' or 'R', got {:?}", other as char),
            };
            let clicks: i64 = line[1..]
                .parse()
                .map_err(|e| anyhow!("bad click count: {e}"))?;
            if clicks < 0 {
                bail!("click count must be non-negative");
            }
            Ok(sign * clicks)
        })?;

        Ok(SharedData {
            rotations,
            counts: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(zero_counts(shared).landed.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(zero_counts(shared).passed.to_string())
    }
}

fn zero_counts(shared: &mut SharedData) -> ZeroCounts {
    *shared.counts.get_or_insert_with(|| {
        let mut dial = DIAL_START;
        let mut landed = 0;
        let mut passed = 0;
        for &rotation in &shared.rotations {
            passed += clicks_through_zero(dial, rotation);
            dial = (dial + rotation).rem_euclid(DIAL_SIZE);
            if dial == 0 {
                landed += 1;
            }
        }
        ZeroCounts { landed, passed }
    })
}

/// Clicks that point at 0 while turning `rotation` from `dial`
fn clicks_through_zero(dial: i64, rotation: i64) -> u64 {
    let hits = if rotation >= 0 {
        (dial + rotation) / DIAL_SIZE
    } else {
        let clicks = -rotation;
        match dial {
            0 => clicks / DIAL_SIZE,
            d if clicks >= d => (clicks - d) / DIAL_SIZE + 1,
            _ => 0,
        }
    };
    hits as u64
}
