use std::cmp::Ordering;
use std::collections::HashSet;

use anyhow::Context;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::{blocks, numbers, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 5, tags = ["2024", "sorting"])]
pub struct Solver;

#[derive(Debug)]
pub struct PrintQueue {
    /// `(a, b)`: page `a` must be printed before page `b`
    rules: HashSet<(u32, u32)>,
    updates: Vec<Vec<u32>>,
}

impl PrintQueue {
    fn order(&self, a: u32, b: u32) -> Ordering {
        if self.rules.contains(&(a, b)) {
            Ordering::Less
        } else if self.rules.contains(&(b, a)) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    fn is_ordered(&self, update: &[u32]) -> bool {
        update.is_sorted_by(|&a, &b| self.order(a, b) != Ordering::Greater)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = PrintQueue;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let sections = blocks(input);
        let [rules, updates] = sections[..] else {
            return Err(ParseError::InvalidFormat(
                "expected ordering rules, a blank line, then updates".into(),
            ));
        };

        let rules = parse_lines(rules, |line| {
            let (a, b) = line.split_once('|').context("rule without '|'")?;
            Ok((a.trim().parse::<u32>()?, b.trim().parse::<u32>()?))
        })?;
        let updates = parse_lines(updates, |line| Ok(numbers(line)))?;

        Ok(PrintQueue {
            rules: rules.into_iter().collect(),
            updates,
        })
    }
}

fn middle(update: &[u32]) -> u32 {
    update.get(update.len() / 2).copied().unwrap_or(0)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = shared
            .updates
            .iter()
            .filter(|u| shared.is_ordered(u))
            .map(|u| middle(u))
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let queue = &*shared;
        let total: u32 = queue
            .updates
            .iter()
            .filter(|u| !queue.is_ordered(u))
            .map(|u| {
                let mut fixed = u.clone();
                fixed.sort_by(|&a, &b| queue.order(a, b));
                middle(&fixed)
            })
            .sum();
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
47|53
97|13
97|61
97|47
75|29
61|13
75|53
29|13
97|29
53|29
61|53
97|53
61|29
47|13
75|47
97|75
47|61
75|61
47|29
75|13
53|13

75,47,61,53,29
97,61,53,29,13
75,29,13
75,97,47,61,53
61,13,29
97,13,75,29,47
";

    #[test]
    fn example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "143");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "123");
    }
}
