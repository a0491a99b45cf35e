use anyhow::{bail, Context};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::{numbers, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 10, tags = ["2025", "linear-algebra", "search"])]
pub struct Solver;

#[derive(Debug, Clone)]
pub struct Machine {
    /// Bit `i` set when light `i` must end up on
    lights: u32,
    /// Indices of the lights/counters each button touches
    buttons: Vec<Vec<usize>>,
    joltage: Vec<i64>,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Machine>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, parse_machine)
    }
}

fn parse_machine(line: &str) -> anyhow::Result<Machine> {
    let mut lights: Option<(u32, usize)> = None;
    let mut buttons = Vec::new();
    let mut joltage = None;

    for token in line.split_whitespace() {
        match token.as_bytes()[0] {
            b'[' => {
                let pattern = token.trim_matches(|c| c == '[' || c == ']');
                if pattern.len() > 32 {
                    bail!("too many lights: {}", pattern.len());
                }
                let mask = pattern
                    .bytes()
                    .enumerate()
                    .filter(|&(_, b)| b == b'#')
                    .fold(0u32, |mask, (i, _)| mask | 1 << i);
                lights = Some((mask, pattern.len()));
            }
            b'(' => buttons.push(numbers::<usize>(token)),
            b'{' => joltage = Some(numbers::<i64>(token)),
            _ => bail!("unexpected token {token:?}"),
        }
    }

    let (lights, light_count) = lights.context("missing [light pattern]")?;
    let joltage = joltage.context("missing {joltage requirements}")?;
    if light_count != joltage.len() {
        bail!("{light_count} lights but {} joltage counters", joltage.len());
    }
    // Toggle subsets are enumerated as a u32 bitmask
    if buttons.len() >= 32 {
        bail!("too many buttons: {}", buttons.len());
    }
    if let Some(&bad) = buttons.iter().flatten().find(|&&i| i >= joltage.len()) {
        bail!("button wires counter {bad} but only {} exist", joltage.len());
    }
    Ok(Machine {
        lights,
        buttons,
        joltage,
    })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .map(|m| {
                fewest_toggles(m).ok_or_else(|| SolveError::failed("lights cannot be matched"))
            })
            .sum::<Result<u32, _>>()
            .map(|n| n.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .enumerate()
            .map(|(i, m)| {
                fewest_presses(m).ok_or_else(|| {
                    SolveError::failed(format!("machine {} cannot reach its joltage", i + 1))
                })
            })
            .sum::<Result<i64, _>>()
            .map(|n| n.to_string())
    }
}

/// Pressing a button twice undoes it, so each subset is tried once
fn fewest_toggles(machine: &Machine) -> Option<u32> {
    let masks: Vec<u32> = machine
        .buttons
        .iter()
        .map(|b| b.iter().fold(0, |m, &i| m | 1 << i))
        .collect();

    (0u32..1 << masks.len())
        .filter(|subset| {
            let lit = masks
                .iter()
                .enumerate()
                .filter(|&(i, _)| subset & 1 << i != 0)
                .fold(0, |acc, (_, m)| acc ^ m);
            lit == machine.lights
        })
        .map(u32::count_ones)
        .min()
}

/// Minimum total presses so every counter reaches its joltage exactly
///
/// Solves `A x = b` (rows are counters, columns buttons) by fraction-free
/// Gauss-Jordan elimination, then searches the free buttons. A free button
/// can never be pressed more often than the smallest target it feeds.
fn fewest_presses(machine: &Machine) -> Option<i64> {
    let rows = machine.joltage.len();
    let cols = machine.buttons.len();
    let mut matrix: Vec<Vec<i64>> = (0..rows)
        .map(|r| {
            let mut row: Vec<i64> = machine
                .buttons
                .iter()
                .map(|b| i64::from(b.contains(&r)))
                .collect();
            row.push(machine.joltage[r]);
            row
        })
        .collect();

    let mut pivots: Vec<(usize, usize)> = Vec::new();
    let mut rank = 0;
    for col in 0..cols {
        let Some(found) = (rank..rows).find(|&r| matrix[r][col] != 0) else {
            continue;
        };
        matrix.swap(rank, found);
        for r in 0..rows {
            if r != rank && matrix[r][col] != 0 {
                let (p, f) = (matrix[rank][col], matrix[r][col]);
                for c in 0..=cols {
                    matrix[r][c] = matrix[r][c] * p - matrix[rank][c] * f;
                }
                normalise(&mut matrix[r]);
            }
        }
        pivots.push((rank, col));
        rank += 1;
    }

    if matrix[rank..].iter().any(|row| row[cols] != 0) {
        return None;
    }

    let is_pivot: Vec<bool> = (0..cols).map(|c| pivots.iter().any(|&(_, pc)| pc == c)).collect();
    let free: Vec<(usize, i64)> = (0..cols)
        .filter(|&c| !is_pivot[c])
        .map(|c| {
            let bound = machine.buttons[c]
                .iter()
                .map(|&r| machine.joltage[r])
                .min()
                .unwrap_or(0);
            (c, bound)
        })
        .collect();

    let mut presses = vec![0i64; cols];
    let mut best = None;
    search_free(&matrix, &pivots, &free, 0, &mut presses, &mut best);
    best
}

fn normalise(row: &mut [i64]) {
    let g = row.iter().fold(0, |g, &v| gcd(g, v.abs()));
    if g > 1 {
        row.iter_mut().for_each(|v| *v /= g);
    }
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

fn search_free(
    matrix: &[Vec<i64>],
    pivots: &[(usize, usize)],
    free: &[(usize, i64)],
    depth: usize,
    presses: &mut [i64],
    best: &mut Option<i64>,
) {
    if let Some(&(col, bound)) = free.get(depth) {
        for n in 0..=bound {
            presses[col] = n;
            search_free(matrix, pivots, free, depth + 1, presses, best);
        }
        presses[col] = 0;
        return;
    }

    let rhs = matrix.first().map_or(0, |r| r.len() - 1);
    let mut total: i64 = free.iter().map(|&(c, _)| presses[c]).sum();
    for &(row, col) in pivots {
        let row = &matrix[row];
        let remaining = row[rhs] - free.iter().map(|&(c, _)| row[c] * presses[c]).sum::<i64>();
        let p = row[col];
        if remaining % p != 0 || remaining / p < 0 {
            return;
        }
        total += remaining / p;
    }
    if best.is_none_or(|b| total < b) {
        *best = Some(total);
    }
}
