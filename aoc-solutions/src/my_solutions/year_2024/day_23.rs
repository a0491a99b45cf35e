use std::collections::{BTreeSet, HashMap};

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::parse::lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 23, tags = ["2024", "graph", "clique"])]
pub struct Solver;

/// LAN party graph; computers are numbered in first-seen order
pub struct Network<'a> {
    names: Vec<&'a str>,
    links: Vec<BTreeSet<usize>>,
}

impl<'a> Network<'a> {
    fn id(&mut self, ids: &mut HashMap<&'a str, usize>, name: &'a str) -> usize {
        *ids.entry(name).or_insert_with(|| {
            self.names.push(name);
            self.links.push(BTreeSet::new());
            self.names.len() - 1
        })
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Network<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut network = Network {
            names: Vec::new(),
            links: Vec::new(),
        };
        let mut ids = HashMap::new();
        for (n, line) in lines(input).enumerate() {
            let (a, b) = line.trim().split_once('-').ok_or_else(|| {
                ParseError::InvalidFormat(format!("link {}: expected a-b, got {line:?}", n + 1))
            })?;
            let (a, b) = (network.id(&mut ids, a), network.id(&mut ids, b));
            if a == b {
                return Err(ParseError::InvalidFormat(format!("link {}: self-loop", n + 1)));
            }
            network.links[a].insert(b);
            network.links[b].insert(a);
        }
        Ok(network)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let net = &*shared;
        let chief = |i: usize| net.names[i].starts_with('t');
        let triangles = (0..net.names.len())
            .flat_map(|a| {
                net.links[a]
                    .range(a + 1..)
                    .tuple_combinations()
                    .filter(move |&(b, c)| net.links[*b].contains(c))
                    .map(move |(&b, &c)| [a, b, c])
            })
            .filter(|tri| tri.iter().any(|&i| chief(i)))
            .count();
        Ok(triangles.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut best = BTreeSet::new();
        bron_kerbosch(
            &shared.links,
            BTreeSet::new(),
            (0..shared.names.len()).collect(),
            BTreeSet::new(),
            &mut best,
        );
        if best.is_empty() {
            return Err(SolveError::failed("network has no computers"));
        }
        Ok(best.iter().map(|&i| shared.names[i]).sorted().join(","))
    }
}

/// Maximum clique search with pivoting
fn bron_kerbosch(
    links: &[BTreeSet<usize>],
    clique: BTreeSet<usize>,
    mut candidates: BTreeSet<usize>,
    mut excluded: BTreeSet<usize>,
    best: &mut BTreeSet<usize>,
) {
    if candidates.is_empty() && excluded.is_empty() {
        if clique.len() > best.len() {
            *best = clique;
        }
        return;
    }
    if clique.len() + candidates.len() <= best.len() {
        return;
    }

    let pivot = candidates
        .union(&excluded)
        .max_by_key(|&&v| links[v].len())
        .copied();
    let Some(pivot) = pivot else { return };

    let branch: Vec<usize> = candidates.difference(&links[pivot]).copied().collect();
    for v in branch {
        let mut grown = clique.clone();
        grown.insert(v);
        bron_kerbosch(
            links,
            grown,
            candidates.intersection(&links[v]).copied().collect(),
            excluded.intersection(&links[v]).copied().collect(),
            best,
        );
        candidates.remove(&v);
        excluded.insert(v);
    }
}
