use std::collections::{HashMap, HashSet};

use anyhow::{bail, Context};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use tracing::debug;

use crate::utils::parse::{blocks, invalid};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 24, tags = ["2024", "circuits"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    And,
    Or,
    Xor,
}

#[derive(Debug, Clone)]
struct Gate<'a> {
    lhs: &'a str,
    op: Op,
    rhs: &'a str,
    out: &'a str,
}

impl Gate<'_> {
    fn reads_input_bits(&self) -> bool {
        is_input(self.lhs) && is_input(self.rhs)
    }

    fn reads_bit_zero(&self) -> bool {
        [self.lhs, self.rhs]
            .iter()
            .any(|w| is_input(w) && w.ends_with("00"))
    }
}

fn is_input(wire: &str) -> bool {
    wire.starts_with('x') || wire.starts_with('y')
}

pub struct Circuit<'a> {
    initial: Vec<(&'a str, bool)>,
    gates: Vec<Gate<'a>>,
}

impl AocParser for Solver {
    type SharedData<'a> = Circuit<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let sections = blocks(input);
        let [wires, gates] = sections[..] else {
            return Err(ParseError::InvalidFormat(
                "expected initial wire values, a blank line, then gates".into(),
            ));
        };

        let initial: Vec<(&str, bool)> = wires
            .lines()
            .map(|line| {
                let (name, value) = line.split_once(':').context("expected `name: value`")?;
                let value = match value.trim() {
                    "0" => false,
                    "1" => true,
                    other => bail!("wire {name}: value {other:?} is not a bit"),
                };
                Ok((name.trim(), value))
            })
            .collect::<anyhow::Result<_>>()
            .map_err(invalid)?;

        let gates: Vec<Gate> = gates
            .lines()
            .map(|line| {
                let Some((lhs, op, rhs, "->", out)) = line.split_whitespace().collect_tuple() else {
                    bail!("expected `a OP b -> out`, got {line:?}");
                };
                let op = match op {
                    "AND" => Op::And,
                    "OR" => Op::Or,
                    "XOR" => Op::Xor,
                    other => bail!("unknown gate {other:?}"),
                };
                Ok(Gate { lhs, op, rhs, out })
            })
            .collect::<anyhow::Result<_>>()
            .map_err(invalid)?;

        Ok(Circuit { initial, gates })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        evaluate(shared).map(|z| z.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let wrong = miswired(&shared.gates);
        debug!(count = wrong.len(), "miswired outputs");
        if wrong.is_empty() {
            return Err(SolveError::failed("circuit already looks like an adder"));
        }
        Ok(wrong.into_iter().sorted().join(","))
    }
}

/// Settle every gate and read the `z` wires as a binary number, `z00` lowest
fn evaluate(circuit: &Circuit) -> Result<u64, SolveError> {
    let mut values: HashMap<&str, bool> = circuit.initial.iter().copied().collect();
    let mut pending: Vec<&Gate> = circuit.gates.iter().collect();

    while !pending.is_empty() {
        let before = pending.len();
        pending.retain(|gate| {
            let (Some(&a), Some(&b)) = (values.get(gate.lhs), values.get(gate.rhs)) else {
                return true;
            };
            let v = match gate.op {
                Op::And => a & b,
                Op::Or => a | b,
                Op::Xor => a ^ b,
            };
            values.insert(gate.out, v);
            false
        });
        if pending.len() == before {
            return Err(SolveError::failed(format!(
                "{} gates never settle: loop or undriven input",
                pending.len()
            )));
        }
    }

    let z = values
        .iter()
        .filter(|(name, _)| name.starts_with('z'))
        .sorted_by(|a, b| b.0.cmp(a.0))
        .fold(0u64, |acc, (_, &bit)| acc << 1 | u64::from(bit));
    Ok(z)
}

/// Gate outputs that break the shape of a ripple-carry adder
///
/// In a correct adder every `z` comes from an XOR (the top carry from an
/// OR), an XOR not fed by input bits drives a `z`, an input XOR feeds
/// another XOR, and an AND feeds an OR. Bit 0 is a half adder and exempt.
fn miswired<'a>(gates: &[Gate<'a>]) -> HashSet<&'a str> {
    let highest_z = gates
        .iter()
        .map(|g| g.out)
        .filter(|o| o.starts_with('z'))
        .max()
        .unwrap_or("z00");
    let feeds = |wire: &str, op: Op| {
        gates
            .iter()
            .any(|g| g.op == op && (g.lhs == wire || g.rhs == wire))
    };

    gates
        .iter()
        .filter(|g| {
            let to_z = g.out.starts_with('z');
            match g.op {
                _ if to_z && g.out == highest_z => g.op != Op::Or,
                Op::Xor if g.reads_input_bits() => {
                    !g.reads_bit_zero() && (to_z || !feeds(g.out, Op::Xor))
                }
                Op::Xor => !to_z,
                Op::And => to_z || (!g.reads_bit_zero() && !feeds(g.out, Op::Or)),
                Op::Or => to_z,
            }
        })
        .map(|g| g.out)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "\
x00: 1
x01: 1
x02: 1
y00: 0
y01: 1
y02: 0

x00 AND y00 -> z00
x01 XOR y01 -> z01
x02 OR y02 -> z02
";

    const LARGE: &str = "\
x00: 1
x01: 0
x02: 1
x03: 1
x04: 0
y00: 1
y01: 1
y02: 1
y03: 1
y04: 1

ntg XOR fgs -> mjb
y02 OR x01 -> tnw
kwq OR kpj -> z05
x00 OR x03 -> fst
tgd XOR rvg -> z01
vdt OR tnw -> bfw
bfw AND frj -> z10
ffh OR nrd -> bqk
y00 AND y03 -> djm
y03 OR y00 -> psh
bqk OR frj -> z08
tnw OR fst -> frj
gnj AND tgd -> z11
bfw XOR mjb -> z00
x03 OR x00 -> vdt
gnj AND wpb -> z02
x04 AND y00 -> kjc
djm OR pbm -> qhw
nrd AND vdt -> hwm
kjc AND fst -> rvg
y04 OR y02 -> fgs
y01 AND x02 -> pbm
ntg OR kjc -> kwq
psh XOR fgs -> tgd
qhw XOR tgd -> z09
pbm OR djm -> kpj
x03 XOR y03 -> ffh
x00 XOR y04 -> ntg
bfw OR bqk -> z06
nrd XOR fgs -> wpb
frj XOR qhw -> z04
bqk OR frj -> z07
y03 OR x01 -> nrd
hwm AND bqk -> z03
tgd XOR rvg -> z12
tnw OR pbm -> gnj
";

    /// A 6-bit ripple-carry adder of `x + y` with the given outputs swapped
    fn adder(x: u64, y: u64, swaps: &[(&str, &str)]) -> String {
        const BITS: usize = 6;
        let mut text = String::new();
        for (name, value) in [("x", x), ("y", y)] {
            for i in 0..BITS {
                text += &format!("{name}{i:02}: {}\n", value >> i & 1);
            }
        }
        text += "\n";

        let mut gates = vec![
            ("x00 XOR y00".to_string(), "z00".to_string()),
            ("x00 AND y00".to_string(), "c00".to_string()),
        ];
        for i in 1..BITS {
            let carry_in = format!("c{:02}", i - 1);
            let carry_out = if i == BITS - 1 {
                format!("z{BITS:02}")
            } else {
                format!("c{i:02}")
            };
            gates.push((format!("x{i:02} XOR y{i:02}"), format!("s{i:02}")));
            gates.push((format!("x{i:02} AND y{i:02}"), format!("a{i:02}")));
            gates.push((format!("s{i:02} XOR {carry_in}"), format!("z{i:02}")));
            gates.push((format!("s{i:02} AND {carry_in}"), format!("b{i:02}")));
            gates.push((format!("a{i:02} OR b{i:02}"), carry_out));
        }
        for (_, out) in &mut gates {
            for &(p, q) in swaps {
                if out == p {
                    *out = q.to_string();
                } else if out == q {
                    *out = p.to_string();
                }
            }
        }
        for (expr, out) in gates {
            text += &format!("{expr} -> {out}\n");
        }
        text
    }

    #[test]
    fn small_example() {
        let mut shared = Solver::parse(SMALL).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "4");
    }

    #[test]
    fn large_example() {
        let mut shared = Solver::parse(LARGE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "2024");
    }

    #[test]
    fn clean_adder_adds() {
        let text = adder(13, 29, &[]);
        let mut shared = Solver::parse(&text).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "42");
        assert!(miswired(&shared.gates).is_empty());
    }

    #[test]
    fn swapped_outputs_are_found() {
        let text = adder(13, 29, &[("z03", "c03"), ("s05", "a05")]);
        let mut shared = Solver::parse(&text).unwrap();
        assert_eq!(
            <Solver as PartSolver<2>>::solve(&mut shared).unwrap(),
            "a05,c03,s05,z03"
        );
    }

    #[test]
    fn looping_circuit_fails() {
        let mut shared = Solver::parse("x00: 1\n\nx00 AND b -> a\nx00 AND a -> b\n").unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut shared).is_err());
    }
}
