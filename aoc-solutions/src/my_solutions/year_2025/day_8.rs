use anyhow::ensure;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::parse::{numbers, parse_lines};
use crate::utils::DisjointSet;

const CONNECTIONS: usize = 1000;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 8, tags = ["2025", "union-find"])]
pub struct Solver;

type Junction = [i64; 3];

pub struct Playground {
    junctions: Vec<Junction>,
    /// Every pair `(i, j)` with `i < j`, closest first
    pairs: Vec<(usize, usize)>,
}

impl AocParser for Solver {
    type SharedData<'a> = Playground;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let junctions: Vec<Junction> = parse_lines(input, |line| {
            let coords = numbers::<i64>(line);
            ensure!(coords.len() == 3, "expected x,y,z, got {} numbers", coords.len());
            Ok([coords[0], coords[1], coords[2]])
        })?;

        let mut pairs: Vec<(i64, usize, usize)> = (0..junctions.len())
            .tuple_combinations()
            .map(|(i, j)| (distance_sq(&junctions[i], &junctions[j]), i, j))
            .collect();
        pairs.sort_unstable();

        Ok(Playground {
            junctions,
            pairs: pairs.into_iter().map(|(_, i, j)| (i, j)).collect(),
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        largest_circuits(shared, CONNECTIONS).map(|p| p.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (i, j) = closing_pair(shared)?;
        Ok((shared.junctions[i][0] * shared.junctions[j][0]).to_string())
    }
}

fn distance_sq(a: &Junction, b: &Junction) -> i64 {
    a.iter().zip(b).map(|(p, q)| (p - q) * (p - q)).sum()
}

/// Product of the three largest circuits after trying the `attempts` closest pairs
///
/// Pairs already in one circuit still use up an attempt.
fn largest_circuits(playground: &Playground, attempts: usize) -> Result<usize, SolveError> {
    let mut circuits = DisjointSet::new(playground.junctions.len());
    for &(i, j) in playground.pairs.iter().take(attempts) {
        circuits.union(i, j);
    }

    let sizes = circuits.component_sizes();
    if sizes.len() < 3 {
        return Err(SolveError::failed(format!(
            "only {} circuits after {attempts} connections",
            sizes.len()
        )));
    }
    Ok(sizes[..3].iter().product())
}

/// The pair whose connection joins every junction into one circuit
fn closing_pair(playground: &Playground) -> Result<(usize, usize), SolveError> {
    let mut circuits = DisjointSet::new(playground.junctions.len());
    for &(i, j) in &playground.pairs {
        if circuits.union(i, j) && circuits.components() == 1 {
            tracing::trace!(i, j, "single circuit formed");
            return Ok((i, j));
        }
    }
    Err(SolveError::failed("junctions never form a single circuit"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
162,817,812
57,618,57
906,360,560
592,479,940
352,342,300
466,668,158
542,29,236
431,825,988
739,650,466
52,470,668
216,146,977
819,987,18
117,168,530
805,96,715
346,949,466
970,615,88
941,993,340
862,61,35
984,92,344
425,690,689
";

    #[test]
    fn example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(largest_circuits(&shared, 10).unwrap(), 40);
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "25272");
    }

    #[test]
    fn lone_junction_never_closes() {
        let shared = Solver::parse("1,2,3\n").unwrap();
        assert!(closing_pair(&shared).is_err());
    }
}
