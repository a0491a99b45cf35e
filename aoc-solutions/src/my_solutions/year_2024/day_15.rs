use std::collections::{HashSet, VecDeque};

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::blocks;
use crate::utils::{Dir, Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 15, tags = ["2024", "grid", "simulation"])]
pub struct Solver;

pub struct Warehouse {
    map: Grid<u8>,
    moves: Vec<Dir>,
}

impl AocParser for Solver {
    type SharedData<'a> = Warehouse;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let sections = blocks(input);
        let [map, moves] = sections[..] else {
            return Err(ParseError::InvalidFormat(
                "expected the warehouse map, a blank line, then the moves".into(),
            ));
        };

        let map = Grid::parse(map)?;
        map.require(b'@')?;
        let moves = moves
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .map(|b| {
                Dir::from_arrow(b)
                    .ok_or_else(|| ParseError::InvalidFormat(format!("bad move {:?}", b as char)))
            })
            .collect::<Result<_, _>>()?;
        Ok(Warehouse { map, moves })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        simulate(shared.map.clone(), &shared.moves).map(|g| g.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        simulate(widen(&shared.map), &shared.moves).map(|g| g.to_string())
    }
}

fn widen(map: &Grid<u8>) -> Grid<u8> {
    Grid::from_fn(map.width() * 2, map.height(), |p| {
        let tile = map[Pos::new(p.x / 2, p.y)];
        let left = p.x % 2 == 0;
        match (tile, left) {
            (b'O', true) => b'[',
            (b'O', false) => b']',
            (b'@', false) => b'.',
            (t, _) => t,
        }
    })
}

/// Run every move and return the GPS sum of the boxes
fn simulate(mut map: Grid<u8>, moves: &[Dir]) -> Result<i64, SolveError> {
    let mut robot = map
        .find(|&c| c == b'@')
        .ok_or_else(|| SolveError::failed("robot vanished"))?;

    for &dir in moves {
        if let Some(pushed) = pushed_tiles(&map, robot, dir) {
            let tiles: Vec<(Pos, u8)> = pushed.iter().map(|&p| (p, map[p])).collect();
            for &(p, _) in &tiles {
                map[p] = b'.';
            }
            for (p, t) in tiles {
                map[p.step(dir)] = t;
            }
            robot = robot.step(dir);
        }
    }

    Ok(map
        .iter()
        .filter(|&(_, &c)| c == b'O' || c == b'[')
        .map(|(p, _)| 100 * p.y + p.x)
        .sum())
}

/// Everything that moves when the robot steps `dir`, or `None` if a wall blocks
fn pushed_tiles(map: &Grid<u8>, robot: Pos, dir: Dir) -> Option<Vec<Pos>> {
    let mut queue = VecDeque::from([robot]);
    let mut seen = HashSet::from([robot]);
    let mut moved = Vec::new();

    while let Some(pos) = queue.pop_front() {
        moved.push(pos);
        let ahead = pos.step(dir);
        let mut next = match map.get(ahead).copied() {
            Some(b'#') | None => return None,
            Some(b'O') => vec![ahead],
            Some(b'[') => vec![ahead, ahead.step(Dir::E)],
            Some(b']') => vec![ahead, ahead.step(Dir::W)],
            _ => vec![],
        };
        // a wide box pushed sideways is just a chain of cells
        if !dir.is_vertical() {
            next.truncate(1);
        }
        for n in next {
            if seen.insert(n) {
                queue.push_back(n);
            }
        }
    }
    Some(moved)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "\
########
#..O.O.#
##@.O..#
#...O..#
#.#.O..#
#...O..#
#......#
########

<^^>>>vv<v>>v<<
";

    const LARGE: &str = "\
##########
#..O..O.O#
#......O.#
#.OO..O.O#
#..O@..O.#
#O#..O...#
#O..O..O.#
#.OO.O.OO#
#....O...#
##########

<vv>^<v^>v>^vv^v>v<>v^v<v<^vv<<<^><<><>>v<vvv<>^v^>^<<<><<v<<<v^vv^v>^
vvv<<^>^v^^><<>>><>^<<><^vv^^<>vvv<>><^^v>^>vv<>v<<<<v<^v>^<^^>>>^<v<v
><>vv>v^v^<>><>>>><^^>vv>v<^^^>>v^v^<^^>v^^>v^<^v>v<>>v^v^<v>v^^<^^vv<
<<v<^>>^^^^>>>v^<>vvv^><v<<<>^^^vv^<vvv>^>v<^^^^v<>^>vvvv><>>v^<<^^^^^
^><^><>>><>^^<<^^v>>><^<v>^<vv>>v>>>^v><>^v><<<<v>>v<v<v>vvv>^<><<>^><
^>><>^v<><^vvv<^^<><v<<<<<><^v<<<><<<^^<v<^^^><^>>^<v^><<<^>>^v<v^v<v^
>^>>^v>vv>^<<^v<>><<><<v<<v><>v<^vv<<<>^^v^>^^>>><<^v>>v^v><^^>>^<>vv^
<><^^>^^^<><vvvvv^v<v<<>^v<v>v<<^><<><<><<<^^<<<^<<>><<><^^^>^^<>^>v<>
^^>vv<^v^v<vv>^<><v<^v>^^^>>>^^vvv^>vvv<>>>^<^>>>>>^<<^v>^vvv<>^<><<v>
v^^>>><<^^<>>^v^<v^vv<>v^<<>^<^v^v><^<<<><<^<v><v<>vv>>v><v^<vv<>v^<<^
";

    #[test]
    fn small_example() {
        let mut shared = Solver::parse(SMALL).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "2028");
    }

    #[test]
    fn large_example() {
        let mut shared = Solver::parse(LARGE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "10092");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "9021");
    }

    #[test]
    fn widening_doubles_tiles() {
        let map = Grid::parse("#O@.").unwrap();
        assert_eq!(widen(&map).to_string(), "##[]@...");
    }
}
