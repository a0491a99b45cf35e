use anyhow::{ensure, Context};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use rayon::prelude::*;

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 12, tags = ["2023", "dp", "parallel"])]
pub struct Solver;

#[derive(Debug, Clone)]
pub struct Record {
    springs: Vec<u8>,
    groups: Vec<usize>,
}

impl Record {
    fn unfold(&self, copies: usize) -> Record {
        Record {
            springs: vec![self.springs.as_slice(); copies].join(&b'?'),
            groups: self.groups.repeat(copies),
        }
    }

    fn arrangements(&self) -> u64 {
        let cache = DpCache::new(HashMapBackend::new(), Arrangements { record: self });
        cache.get(&(0, 0))
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Record>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let (springs, groups) = line.split_once(' ').context("expected `SPRINGS GROUPS`")?;
            ensure!(
                springs.bytes().all(|b| matches!(b, b'.' | b'#' | b'?')),
                "springs may only be '.', '#' or '?'"
            );
            let groups = groups
                .split(',')
                .map(|g| g.trim().parse::<usize>())
                .collect::<Result<Vec<_>, _>>()?;
            ensure!(groups.iter().all(|&g| g > 0), "damaged groups cannot be empty");
            Ok(Record {
                springs: springs.as_bytes().to_vec(),
                groups,
            })
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.par_iter().map(Record::arrangements).sum::<u64>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .par_iter()
            .map(|r| r.unfold(5).arrangements())
            .sum::<u64>()
            .to_string())
    }
}

/// Ways to place `groups[j..]` in `springs[i..]`, indexed by `(i, j)`
struct Arrangements<'r> {
    record: &'r Record,
}

impl DpProblem<(usize, usize), u64> for Arrangements<'_> {
    fn deps(&self, &(i, j): &(usize, usize)) -> Vec<(usize, usize)> {
        let Record { springs, groups } = self.record;
        let Some(&spring) = springs.get(i) else {
            return vec![];
        };

        let mut deps = Vec::with_capacity(2);
        if spring != b'#' {
            deps.push((i + 1, j));
        }
        if let (true, Some(&len)) = (spring != b'.', groups.get(j)) {
            let end = i + len;
            let fits = end <= springs.len()
                && !springs[i..end].contains(&b'.')
                && springs.get(end) != Some(&b'#');
            if fits {
                // skip the separator after the group
                deps.push(((end + 1).min(springs.len()), j + 1));
            }
        }
        deps
    }

    fn compute(&self, &(i, j): &(usize, usize), deps: Vec<u64>) -> u64 {
        if i >= self.record.springs.len() {
            u64::from(j == self.record.groups.len())
        } else {
            deps.iter().sum()
        }
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}",
            String::from_utf8_lossy(&self.springs),
            self.groups.iter().join(",")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
???.### 1,1,3
.??..??...?##. 1,1,3
?#?#?#?#?#?#?#? 1,3,1,6
????.#...#... 4,1,1
????.######..#####. 1,6,5
?###???????? 3,2,1
";

    #[test]
    fn example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "21");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "525152");
    }

    #[test]
    fn per_record_counts() {
        let records = Solver::parse(EXAMPLE).unwrap();
        let folded: Vec<u64> = records.iter().map(Record::arrangements).collect();
        let unfolded: Vec<u64> = records.iter().map(|r| r.unfold(5).arrangements()).collect();
        assert_eq!(folded, vec![1, 4, 1, 1, 4, 10]);
        assert_eq!(unfolded, vec![1, 16384, 1, 16, 2500, 506250]);
    }

    #[test]
    fn unfolding_joins_with_unknowns() {
        let records = Solver::parse(".# 1\n").unwrap();
        assert_eq!(records[0].unfold(5).to_string(), ".#?.#?.#?.#?.# 1,1,1,1,1");
    }

    #[test]
    fn bad_records_are_rejected() {
        assert!(Solver::parse("??x 1\n").is_err());
        assert!(Solver::parse("??? 1,0\n").is_err());
        assert!(Solver::parse("???\n").is_err());
    }
}
