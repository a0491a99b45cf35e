use std::collections::HashSet;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;

use crate::utils::{Dir, Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 6, tags = ["2024", "grid", "simulation", "parallel"])]
pub struct Solver;

pub struct Lab {
    obstacles: Grid<bool>,
    guard: Pos,
    /// Distinct tiles of the unobstructed patrol, filled by part 1
    route: Option<Vec<Pos>>,
}

enum Patrol {
    Exits(Vec<Pos>),
    Loops,
}

impl AocParser for Solver {
    type SharedData<'a> = Lab;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        let guard = grid.require(b'^')?;
        Ok(Lab {
            obstacles: grid.map(|&c| c == b'#'),
            guard,
            route: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(route(shared)?.len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let candidates = route(shared)?.to_vec();
        let lab = &*shared;
        let loops = candidates
            .par_iter()
            .filter(|&&p| p != lab.guard)
            .filter(|&&p| matches!(patrol(&lab.obstacles, lab.guard, Some(p)), Patrol::Loops))
            .count();
        Ok(loops.to_string())
    }
}

fn route(lab: &mut Lab) -> Result<&[Pos], SolveError> {
    if lab.route.is_none() {
        match patrol(&lab.obstacles, lab.guard, None) {
            Patrol::Exits(tiles) => lab.route = Some(tiles),
            Patrol::Loops => return Err(SolveError::failed("guard never leaves the lab")),
        }
    }
    Ok(lab.route.as_deref().unwrap_or_default())
}

/// Walk the guard until they leave the grid or repeat a state
fn patrol(obstacles: &Grid<bool>, start: Pos, extra: Option<Pos>) -> Patrol {
    let blocked = |p: Pos| Some(p) == extra || obstacles.get(p) == Some(&true);
    let mut seen: HashSet<(Pos, Dir)> = HashSet::new();
    let mut pos = start;
    let mut dir = Dir::N;

    loop {
        if !seen.insert((pos, dir)) {
            return Patrol::Loops;
        }
        let ahead = pos.step(dir);
        if !obstacles.contains(ahead) {
            break;
        }
        if blocked(ahead) {
            dir = dir.turn_right();
        } else {
            pos = ahead;
        }
    }

    let tiles: HashSet<Pos> = seen.into_iter().map(|(p, _)| p).collect();
    let mut tiles: Vec<Pos> = tiles.into_iter().collect();
    tiles.sort_unstable();
    Patrol::Exits(tiles)
}
