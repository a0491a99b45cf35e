use std::collections::HashMap;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

use crate::utils::{Dir, Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 23, tags = ["2023", "grid", "graph", "dfs"])]
pub struct Solver;

pub struct Trails {
    map: Grid<u8>,
    start: Pos,
    end: Pos,
}

/// Junctions and the corridor lengths between them
struct Junctions {
    edges: Vec<Vec<(usize, u64)>>,
    start: usize,
    end: usize,
}

impl AocParser for Solver {
    type SharedData<'a> = Trails;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let map = Grid::parse(input)?;
        let opening = |y: usize| {
            map.row(y)
                .iter()
                .position(|&c| c == b'.')
                .map(|x| Pos::new(x as i64, y as i64))
        };
        let (Some(start), Some(end)) = (opening(0), opening(map.height() - 1)) else {
            return Err(ParseError::MissingData(
                "trail map needs an opening in the top and bottom rows".into(),
            ));
        };
        Ok(Trails { map, start, end })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        longest_hike(shared, true)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        longest_hike(shared, false)
    }
}

fn longest_hike(trails: &Trails, slippery: bool) -> Result<String, SolveError> {
    let junctions = trails.junctions(slippery)?;
    debug!(nodes = junctions.edges.len(), slippery, "compressed trail graph");
    let mut best = None;
    search(&junctions, junctions.start, 1 << junctions.start, 0, &mut best);
    best.map(|b| b.to_string())
        .ok_or_else(|| SolveError::failed("no hike reaches the bottom"))
}

/// Depth-first search over every simple path, tracking visited junctions as bits
fn search(graph: &Junctions, at: usize, visited: u64, walked: u64, best: &mut Option<u64>) {
    if at == graph.end {
        if best.is_none_or(|b| walked > b) {
            *best = Some(walked);
        }
        return;
    }
    for &(next, len) in &graph.edges[at] {
        if visited & 1 << next == 0 {
            search(graph, next, visited | 1 << next, walked + len, best);
        }
    }
}

impl Trails {
    fn open(&self, p: Pos) -> bool {
        self.map.get(p).is_some_and(|&c| c != b'#')
    }

    /// Whether stepping `dir` out of `from` is allowed; slopes only go downhill
    fn can_step(&self, from: Pos, dir: Dir, slippery: bool) -> bool {
        let to = from.step(dir);
        if !self.open(to) {
            return false;
        }
        !slippery
            || [from, to]
                .iter()
                .all(|&p| Dir::from_arrow(self.map[p]).is_none_or(|slope| slope == dir))
    }

    fn junctions(&self, slippery: bool) -> Result<Junctions, SolveError> {
        let mut nodes = vec![self.start, self.end];
        nodes.extend(self.map.positions().filter(|&p| {
            self.open(p) && p.neighbours4().iter().filter(|&&n| self.open(n)).count() >= 3
        }));
        if nodes.len() > 64 {
            return Err(SolveError::failed(format!(
                "{} junctions do not fit a 64-bit visited set",
                nodes.len()
            )));
        }
        let index: HashMap<Pos, usize> = nodes.iter().enumerate().map(|(i, &p)| (p, i)).collect();

        let edges = nodes
            .iter()
            .map(|&node| {
                Dir::ALL
                    .into_iter()
                    .filter(|&d| self.can_step(node, d, slippery))
                    .filter_map(|d| self.follow(node, d, slippery, &index))
                    .collect()
            })
            .collect();
        Ok(Junctions {
            edges,
            start: 0,
            end: 1,
        })
    }

    /// Walk a corridor from a junction until the next one, if it gets there
    fn follow(
        &self,
        from: Pos,
        dir: Dir,
        slippery: bool,
        index: &HashMap<Pos, usize>,
    ) -> Option<(usize, u64)> {
        let mut here = from.step(dir);
        let mut heading = dir;
        let mut len = 1;
        loop {
            if let Some(&node) = index.get(&here) {
                return Some((node, len));
            }
            heading = Dir::ALL
                .into_iter()
                .filter(|&d| d != heading.opposite())
                .find(|&d| self.can_step(here, d, slippery))?;
            here = here.step(heading);
            len += 1;
        }
    }
}
