use std::collections::{HashMap, VecDeque};

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

use crate::utils::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 21, tags = ["2023", "grid", "bfs", "extrapolation"])]
pub struct Solver;

pub struct Garden {
    rocks: Grid<bool>,
    start: Pos,
}

impl Garden {
    fn is_rock(&self, p: Pos, infinite: bool) -> bool {
        if infinite {
            let w = self.rocks.width() as i64;
            let h = self.rocks.height() as i64;
            self.rocks[Pos::new(p.x.rem_euclid(w), p.y.rem_euclid(h))]
        } else {
            self.rocks.get(p).is_none_or(|&r| r)
        }
    }

    /// Step counts from the start to every plot within `limit` steps
    fn distances(&self, limit: u64, infinite: bool) -> HashMap<Pos, u64> {
        let mut dist = HashMap::from([(self.start, 0)]);
        let mut queue = VecDeque::from([self.start]);
        while let Some(p) = queue.pop_front() {
            let d = dist[&p];
            if d == limit {
                continue;
            }
            for n in p.neighbours4() {
                if !self.is_rock(n, infinite) && !dist.contains_key(&n) {
                    dist.insert(n, d + 1);
                    queue.push_back(n);
                }
            }
        }
        dist
    }
}

/// Plots reachable in exactly `steps`: any within range with matching parity,
/// since the elf can step back and forth
fn count_reachable(dist: &HashMap<Pos, u64>, steps: u64) -> u64 {
    dist.values()
        .filter(|&&d| d <= steps && d % 2 == steps % 2)
        .count() as u64
}

impl AocParser for Solver {
    type SharedData<'a> = Garden;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        let start = grid.require(b'S')?;
        Ok(Garden {
            rocks: grid.map(|&c| c == b'#'),
            start,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let dist = shared.distances(64, false);
        Ok(count_reachable(&dist, 64).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(infinite_plots(shared, 26_501_365).to_string())
    }
}

/// Reachable plots on the endlessly repeated garden
///
/// Past a couple of tile widths the count grows quadratically in whole tile
/// widths, so three samples `rem`, `rem + w`, `rem + 2w` fix the curve.
fn infinite_plots(garden: &Garden, steps: u64) -> u64 {
    let width = garden.rocks.width() as u64;
    let rem = steps % width;
    let samples = [rem, rem + width, rem + 2 * width];

    if steps <= samples[2] {
        let dist = garden.distances(steps, true);
        return count_reachable(&dist, steps);
    }

    let dist = garden.distances(samples[2], true);
    let [f0, f1, f2] = samples.map(|s| count_reachable(&dist, s) as i128);
    debug!(f0, f1, f2, "quadratic samples");

    let n = (steps / width) as i128;
    let first = f1 - f0;
    let second = f2 - 2 * f1 + f0;
    (f0 + n * first + n * (n - 1) / 2 * second) as u64
}
