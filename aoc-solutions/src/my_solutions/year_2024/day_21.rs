use anyhow::ensure;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::Pos;
use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
use crate::utils::parse::{lines, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 21, tags = ["2024", "dp", "shortest-path"])]
pub struct Solver;

const NUMERIC: [&[u8]; 4] = [b"789", b"456", b"123", b" 0A"];
const DIRECTIONAL: [&[u8]; 2] = [b" ^A", b"<v>"];

/// `(level, from, to)`
type Move = (usize, u8, u8);
type Cache = DpCache<Move, u64, HashMapBackend<Move, u64>, Keypads>;

impl AocParser for Solver {
    type SharedData<'a> = Vec<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            ensure!(
                line.bytes().all(|b| b != b' ' && locate(&NUMERIC, b).is_some()),
                "code has keys missing from the door keypad"
            );
            ensure!(line.ends_with('A'), "code must end with A");
            Ok(())
        })?;
        Ok(lines(input).collect())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_complexity(shared, 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_complexity(shared, 25).to_string())
    }
}

fn total_complexity(codes: &[&str], robots: usize) -> u64 {
    let cache = DpCache::new(HashMapBackend::new(), Keypads { top: robots + 1 });
    codes
        .iter()
        .map(|code| {
            let value: u64 = code.trim_end_matches('A').parse().unwrap_or(0);
            presses(&cache, robots + 1, code.as_bytes()) * value
        })
        .sum()
}

/// Human presses needed to type `keys` on the keypad at `level`, starting on `A`
fn presses(cache: &Cache, level: usize, keys: &[u8]) -> u64 {
    std::iter::once(b'A')
        .chain(keys.iter().copied())
        .tuple_windows()
        .map(|(from, to)| cache.get(&(level, from, to)))
        .sum()
}

/// Where `key` sits on `pad`; the blank marks the gap no arm may cross
fn locate(pad: &[&[u8]], key: u8) -> Option<Pos> {
    pad.iter().enumerate().find_map(|(y, row)| {
        row.iter()
            .position(|&k| k == key)
            .map(|x| Pos::new(x as i64, y as i64))
    })
}

/// Keypad chain: level 0 is the human, each level above is a robot arm
/// driven by the directional keypad one level down, and `top` faces the door.
struct Keypads {
    top: usize,
}

impl Keypads {
    /// Key sequences (ending in `A`) the level below can type to move from
    /// `from` to `to` and press it: all horizontal moves first or all
    /// vertical moves first, skipping any order that crosses the gap.
    fn routes(&self, level: usize, from: u8, to: u8) -> Vec<Vec<u8>> {
        let pad: &[&[u8]] = if level == self.top { &NUMERIC } else { &DIRECTIONAL };
        let (Some(a), Some(b), Some(gap)) = (locate(pad, from), locate(pad, to), locate(pad, b' '))
        else {
            return vec![];
        };

        let d = b - a;
        let horizontal = vec![if d.x < 0 { b'<' } else { b'>' }; d.x.unsigned_abs() as usize];
        let vertical = vec![if d.y < 0 { b'^' } else { b'v' }; d.y.unsigned_abs() as usize];

        let mut routes = Vec::new();
        if Pos::new(b.x, a.y) != gap {
            routes.push([&horizontal[..], &vertical[..], b"A"].concat());
        }
        if Pos::new(a.x, b.y) != gap {
            routes.push([&vertical[..], &horizontal[..], b"A"].concat());
        }
        routes.dedup();
        routes
    }
}

impl DpProblem<Move, u64> for Keypads {
    fn deps(&self, &(level, from, to): &Move) -> Vec<Move> {
        if level == 0 {
            return vec![];
        }
        self.routes(level, from, to)
            .iter()
            .flat_map(|route| {
                std::iter::once(b'A')
                    .chain(route.iter().copied())
                    .tuple_windows()
                    .map(|(f, t)| (level - 1, f, t))
                    .collect_vec()
            })
            .collect()
    }

    fn compute(&self, &(level, from, to): &Move, deps: Vec<u64>) -> u64 {
        if level == 0 {
            return 1;
        }
        let mut costs = deps.into_iter();
        self.routes(level, from, to)
            .iter()
            .map(|route| costs.by_ref().take(route.len()).sum::<u64>())
            .min()
            .unwrap_or(u64::MAX)
    }
}
