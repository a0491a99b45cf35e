use std::collections::{BTreeMap, HashSet};

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 8, tags = ["2024", "grid", "geometry"])]
pub struct Solver;

pub struct City {
    width: usize,
    height: usize,
    antennas: BTreeMap<u8, Vec<Pos>>,
}

impl City {
    fn contains(&self, p: Pos) -> bool {
        (0..self.width as i64).contains(&p.x) && (0..self.height as i64).contains(&p.y)
    }

    /// Antinodes of every same-frequency pair, stepping `harmonics` times away
    /// from each antenna; `None` keeps stepping until leaving the map
    fn antinodes(&self, harmonics: Option<usize>) -> usize {
        let mut found = HashSet::new();
        for positions in self.antennas.values() {
            for (&a, &b) in positions.iter().tuple_combinations() {
                for (from, delta) in [(b, b - a), (a, a - b)] {
                    let (skip, take) = match harmonics {
                        Some(n) => (1, n),
                        None => (0, usize::MAX),
                    };
                    let mut p = from;
                    for step in 0.. {
                        if !self.contains(p) || step >= skip + take {
                            break;
                        }
                        if step >= skip {
                            found.insert(p);
                        }
                        p += delta;
                    }
                }
            }
        }
        found.len()
    }
}

impl AocParser for Solver {
    type SharedData<'a> = City;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        let mut antennas: BTreeMap<u8, Vec<Pos>> = BTreeMap::new();
        for (pos, &c) in grid.iter() {
            if c.is_ascii_alphanumeric() {
                antennas.entry(c).or_default().push(pos);
            }
        }
        Ok(City {
            width: grid.width(),
            height: grid.height(),
            antennas,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.antinodes(Some(1)).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.antinodes(None).to_string())
    }
}
