use anyhow::{bail, Context};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 7, tags = ["2023", "sorting"])]
pub struct Solver;

const CARDS: &[u8] = b"23456789TJQKA";
const JACK: u8 = 9;

#[derive(Debug, Clone)]
pub struct Hand {
    /// Card strengths, 0 for `2` up to 12 for `A`
    cards: [u8; 5],
    bid: u64,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Hand>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let (cards, bid) = line.split_once(' ').context("expected `HAND BID`")?;
            let strengths = cards
                .bytes()
                .map(|c| {
                    CARDS
                        .iter()
                        .position(|&k| k == c)
                        .map(|p| p as u8)
                        .with_context(|| format!("unknown card {:?}", c as char))
                })
                .collect::<anyhow::Result<Vec<u8>>>()?;
            let Ok(cards) = <[u8; 5]>::try_from(strengths) else {
                bail!("hand {cards:?} must have five cards");
            };
            Ok(Hand {
                cards,
                bid: bid.trim().parse::<u64>()?,
            })
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(winnings(shared, false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(winnings(shared, true).to_string())
    }
}

/// Hand type from five of a kind (6) down to high card (0)
fn hand_type(cards: &[u8; 5], jokers_wild: bool) -> u8 {
    let mut counts = [0u8; 13];
    let mut jokers = 0;
    for &c in cards {
        if jokers_wild && c == JACK {
            jokers += 1;
        } else {
            counts[c as usize] += 1;
        }
    }
    counts.sort_unstable_by(|a, b| b.cmp(a));
    // Jokers always join the largest group
    match (counts[0] + jokers, counts[1]) {
        (5, _) => 6,
        (4, _) => 5,
        (3, 2) => 4,
        (3, _) => 3,
        (2, 2) => 2,
        (2, _) => 1,
        _ => 0,
    }
}

fn winnings(hands: &[Hand], jokers_wild: bool) -> u64 {
    let strength = |c: u8| if jokers_wild && c == JACK { 0 } else { c + 1 };
    hands
        .iter()
        .map(|h| {
            let key = (hand_type(&h.cards, jokers_wild), h.cards.map(strength));
            (key, h.bid)
        })
        .sorted_unstable_by_key(|&(key, _)| key)
        .zip(1..)
        .map(|((_, bid), rank)| bid * rank)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "32T3K 765\nT55J5 684\nKK677 28\nKTJJT 220\nQQQJA 483\n";

    fn cards(hand: &str) -> [u8; 5] {
        Solver::parse(&format!("{hand} 1")).unwrap()[0].cards
    }

    #[test]
    fn example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "6440");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "5905");
    }

    #[test]
    fn jokers_upgrade_hands() {
        assert_eq!(hand_type(&cards("KTJJT"), false), 2);
        assert_eq!(hand_type(&cards("KTJJT"), true), 5);
        assert_eq!(hand_type(&cards("JJJJJ"), true), 6);
        assert_eq!(hand_type(&cards("2345J"), true), 1);
    }

    #[test]
    fn bad_hands_are_rejected() {
        assert!(Solver::parse("32T3 765\n").is_err());
        assert!(Solver::parse("32T3X 765\n").is_err());
        assert!(Solver::parse("32T3K bid\n").is_err());
    }
}
