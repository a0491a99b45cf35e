use std::collections::VecDeque;

use anyhow::ensure;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::parse::{numbers, parse_lines};
use crate::utils::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 9, tags = ["2025", "geometry", "flood-fill"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Pos>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let n = numbers::<i64>(line);
            ensure!(n.len() == 2, "expected x,y");
            Ok(Pos::new(n[0], n[1]))
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .tuple_combinations()
            .map(|(&a, &b)| area(a, b))
            .max()
            .map(|a| a.to_string())
            .ok_or_else(|| SolveError::failed("need at least two red tiles"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let floor = CompressedFloor::new(shared);
        shared
            .iter()
            .tuple_combinations()
            .filter(|&(&a, &b)| floor.inside(a, b))
            .map(|(&a, &b)| area(a, b))
            .max()
            .map(|a| a.to_string())
            .ok_or_else(|| SolveError::failed("no rectangle fits inside the loop"))
    }
}

fn area(a: Pos, b: Pos) -> u64 {
    (a.x.abs_diff(b.x) + 1) * (a.y.abs_diff(b.y) + 1)
}

/// The red/green loop on a compressed grid
///
/// Distinct coordinate `i` maps to cell `2i + 1`; even cells stand for the
/// gaps between coordinates, and a border of gap cells surrounds everything
/// so the outside is connected.
struct CompressedFloor {
    xs: Vec<i64>,
    ys: Vec<i64>,
    /// Summed-area table of outside cells, one row/column larger than the grid
    outside_prefix: Vec<Vec<u32>>,
}

impl CompressedFloor {
    fn new(corners: &[Pos]) -> Self {
        let xs: Vec<i64> = corners.iter().map(|p| p.x).sorted_unstable().dedup().collect();
        let ys: Vec<i64> = corners.iter().map(|p| p.y).sorted_unstable().dedup().collect();
        let width = 2 * xs.len() + 1;
        let height = 2 * ys.len() + 1;

        let to_cell = |p: Pos| {
            let cx = xs.partition_point(|&x| x < p.x) * 2 + 1;
            let cy = ys.partition_point(|&y| y < p.y) * 2 + 1;
            Pos::new(cx as i64, cy as i64)
        };

        let mut boundary = Grid::new(width, height, false);
        for (&a, &b) in corners.iter().circular_tuple_windows() {
            let (a, b) = (to_cell(a), to_cell(b));
            for x in a.x.min(b.x)..=a.x.max(b.x) {
                for y in a.y.min(b.y)..=a.y.max(b.y) {
                    boundary[Pos::new(x, y)] = true;
                }
            }
        }

        let mut outside = Grid::new(width, height, false);
        let mut queue = VecDeque::from([Pos::new(0, 0)]);
        outside[Pos::new(0, 0)] = true;
        while let Some(pos) = queue.pop_front() {
            for n in boundary.neighbours4(pos) {
                if !boundary[n] && !outside[n] {
                    outside[n] = true;
                    queue.push_back(n);
                }
            }
        }

        let mut outside_prefix = vec![vec![0u32; width + 1]; height + 1];
        for y in 0..height {
            for x in 0..width {
                let here = u32::from(outside[Pos::new(x as i64, y as i64)]);
                outside_prefix[y + 1][x + 1] =
                    here + outside_prefix[y][x + 1] + outside_prefix[y + 1][x] - outside_prefix[y][x];
            }
        }

        Self {
            xs,
            ys,
            outside_prefix,
        }
    }

    fn cell(&self, p: Pos) -> (usize, usize) {
        (
            self.xs.partition_point(|&x| x < p.x) * 2 + 1,
            self.ys.partition_point(|&y| y < p.y) * 2 + 1,
        )
    }

    /// Whether the rectangle spanned by two corners avoids every outside cell
    fn inside(&self, a: Pos, b: Pos) -> bool {
        let (ax, ay) = self.cell(a);
        let (bx, by) = self.cell(b);
        let (x0, x1) = (ax.min(bx), ax.max(bx) + 1);
        let (y0, y1) = (ay.min(by), ay.max(by) + 1);
        let p = &self.outside_prefix;
        p[y1][x1] + p[y0][x0] - p[y0][x1] - p[y1][x0] == 0
    }
}
