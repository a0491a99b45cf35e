use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 6, tags = ["2025", "parsing"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Mul,
}

impl Op {
    fn apply(self, values: impl IntoIterator<Item = u64>) -> u64 {
        match self {
            Op::Add => values.into_iter().sum(),
            Op::Mul => values.into_iter().product(),
        }
    }
}

/// One problem: the digit rows of its column block and its operator
#[derive(Debug)]
pub struct Problem {
    rows: Vec<Vec<u8>>,
    op: Op,
}

impl Problem {
    /// Each row is a number
    fn by_rows(&self) -> u64 {
        self.op.apply(self.rows.iter().filter_map(|r| read_number(r.iter().copied())))
    }

    /// Each column, right to left, is a number read top to bottom
    fn by_columns(&self) -> u64 {
        let width = self.rows.first().map_or(0, Vec::len);
        self.op.apply(
            (0..width)
                .rev()
                .filter_map(|x| read_number(self.rows.iter().map(|r| r[x]))),
        )
    }
}

fn read_number(bytes: impl Iterator<Item = u8>) -> Option<u64> {
    bytes
        .filter(u8::is_ascii_digit)
        .fold(None, |acc, b| Some(acc.unwrap_or(0) * 10 + u64::from(b - b'0')))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Problem>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        // Alignment is significant, so lines are padded but never trimmed
        let mut lines: Vec<&[u8]> = input
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::as_bytes)
            .collect();
        let ops = lines
            .pop()
            .ok_or_else(|| ParseError::MissingData("empty worksheet".into()))?;
        if lines.is_empty() {
            return Err(ParseError::MissingData("worksheet has no number rows".into()));
        }

        let width = lines.iter().chain([&ops]).map(|l| l.len()).max().unwrap_or(0);
        let cell = |line: &[u8], x: usize| line.get(x).copied().unwrap_or(b' ');
        let blank_column = |x: usize| lines.iter().chain([&ops]).all(|l| cell(l, x) == b' ');

        let mut problems = Vec::new();
        let mut x = 0;
        while x < width {
            if blank_column(x) {
                x += 1;
                continue;
            }
            let start = x;
            while x < width && !blank_column(x) {
                x += 1;
            }

            let op = match (start..x).map(|c| cell(ops, c)).find(|&b| b != b' ') {
                Some(b'+') => Op::Add,
                Some(b'*') => Op::Mul,
                other => {
                    return Err(ParseError::InvalidFormat(format!(
                        "column {}: expected '+' or '*', got {:?}",
                        start + 1,
                        other.map(char::from)
                    )));
                }
            };
            let rows = lines
                .iter()
                .map(|l| (start..x).map(|c| cell(l, c)).collect())
                .collect();
            problems.push(Problem { rows, op });
        }
        Ok(problems)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(Problem::by_rows).sum::<u64>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(Problem::by_columns).sum::<u64>().to_string())
    }
}
