//! Row-major 2D grids addressed by signed positions

use std::fmt::{self, Display};
use std::ops::{Add, AddAssign, Index, IndexMut, Sub};

use aoc_solver::ParseError;

/// A cell coordinate; `x` grows right, `y` grows down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pos {
    pub x: i64,
    pub y: i64,
}

impl Pos {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn step(self, dir: Dir) -> Self {
        self + dir.delta()
    }

    pub fn manhattan(self, other: Pos) -> u64 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Orthogonal neighbours in N, E, S, W order
    pub fn neighbours4(self) -> [Pos; 4] {
        Dir::ALL.map(|d| self.step(d))
    }

    /// All eight surrounding cells
    pub fn neighbours8(self) -> [Pos; 8] {
        const DELTAS: [(i64, i64); 8] = [
            (-1, -1),
            (0, -1),
            (1, -1),
            (-1, 0),
            (1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
        ];
        DELTAS.map(|(dx, dy)| Pos::new(self.x + dx, self.y + dy))
    }
}

impl Add for Pos {
    type Output = Pos;

    fn add(self, rhs: Pos) -> Pos {
        Pos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Pos {
    fn add_assign(&mut self, rhs: Pos) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Pos {
    type Output = Pos;

    fn sub(self, rhs: Pos) -> Pos {
        Pos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Compass direction on a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dir {
    N,
    E,
    S,
    W,
}

impl Dir {
    /// Clockwise from north
    pub const ALL: [Dir; 4] = [Dir::N, Dir::E, Dir::S, Dir::W];

    pub fn delta(self) -> Pos {
        match self {
            Dir::N => Pos::new(0, -1),
            Dir::E => Pos::new(1, 0),
            Dir::S => Pos::new(0, 1),
            Dir::W => Pos::new(-1, 0),
        }
    }

    pub fn turn_right(self) -> Dir {
        match self {
            Dir::N => Dir::E,
            Dir::E => Dir::S,
            Dir::S => Dir::W,
            Dir::W => Dir::N,
        }
    }

    pub fn turn_left(self) -> Dir {
        match self {
            Dir::N => Dir::W,
            Dir::W => Dir::S,
            Dir::S => Dir::E,
            Dir::E => Dir::N,
        }
    }

    pub fn opposite(self) -> Dir {
        self.turn_right().turn_right()
    }

    /// `^`, `>`, `v`, `<`
    pub fn from_arrow(c: u8) -> Option<Dir> {
        match c {
            b'^' => Some(Dir::N),
            b'>' => Some(Dir::E),
            b'v' => Some(Dir::S),
            b'<' => Some(Dir::W),
            _ => None,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Dir::N | Dir::S)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    pub fn new(width: usize, height: usize, fill: T) -> Self
    where
        T: Clone,
    {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Build a grid by calling `f` for every position, row by row
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(Pos) -> T) -> Self {
        let cells = (0..width * height)
            .map(|i| f(Pos::new((i % width) as i64, (i / width) as i64)))
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn to_index(&self, pos: Pos) -> Option<usize> {
        if let Ok(col) = usize::try_from(pos.x)
            && let Ok(row) = usize::try_from(pos.y)
            && col < self.width
            && row < self.height
        {
            Some(row * self.width + col)
        } else {
            None
        }
    }

    fn to_pos(&self, index: usize) -> Pos {
        Pos::new((index % self.width) as i64, (index / self.width) as i64)
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.to_index(pos).is_some()
    }

    pub fn get(&self, pos: Pos) -> Option<&T> {
        self.to_index(pos).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, pos: Pos) -> Option<&mut T> {
        self.to_index(pos).map(|i| &mut self.cells[i])
    }

    /// Overwrite a cell; returns `false` when `pos` is outside the grid
    pub fn set(&mut self, pos: Pos, value: T) -> bool {
        match self.get_mut(pos) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Every position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<T> {
        let width = self.width;
        (0..self.cells.len()).map(move |i| Pos::new((i % width) as i64, (i / width) as i64))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pos, &T)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (self.to_pos(i), cell))
    }

    /// First position whose cell satisfies `pred`
    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<Pos> {
        self.cells.iter().position(|c| pred(c)).map(|i| self.to_pos(i))
    }

    /// In-bounds orthogonal neighbours of `pos`
    pub fn neighbours4(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        pos.neighbours4().into_iter().filter(|p| self.contains(*p))
    }

    /// In-bounds diagonal and orthogonal neighbours of `pos`
    pub fn neighbours8(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        pos.neighbours8().into_iter().filter(|p| self.contains(*p))
    }

    pub fn row(&self, y: usize) -> &[T] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }
}

impl Grid<u8> {
    /// Parse a rectangular block of text, one byte per cell
    ///
    /// Blank lines around the block are ignored.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let lines: Vec<&[u8]> = input
            .trim_matches(|c| c == '\n' || c == '\r')
            .lines()
            .map(|l| l.trim_end().as_bytes())
            .collect();
        if lines.iter().all(|l| l.is_empty()) {
            return Err(ParseError::MissingData("empty grid".into()));
        }

        let width = lines[0].len();

        if let Some((row, line)) = lines.iter().enumerate().find(|(_, l)| l.len() != width) {
            return Err(ParseError::InvalidFormat(format!(
                "grid row {} has width {}, expected {width}",
                row + 1,
                line.len()
            )));
        }

        Ok(Self {
            width,
            height: lines.len(),
            cells: lines.concat(),
        })
    }

    /// Position of the first `marker`, or `MissingData` naming it
    pub fn require(&self, marker: u8) -> Result<Pos, ParseError> {
        self.find(|&c| c == marker).ok_or_else(|| {
            ParseError::MissingData(format!("no '{}' in grid", marker as char))
        })
    }
}

impl<T> Index<Pos> for Grid<T> {
    type Output = T;

    fn index(&self, pos: Pos) -> &T {
        match self.to_index(pos) {
            Some(i) => &self.cells[i],
            None => panic!("position {pos:?} outside {}x{} grid", self.width, self.height),
        }
    }
}

impl<T> IndexMut<Pos> for Grid<T> {
    fn index_mut(&mut self, pos: Pos) -> &mut T {
        match self.to_index(pos) {
            Some(i) => &mut self.cells[i],
            None => panic!("position {pos:?} outside {}x{} grid", self.width, self.height),
        }
    }
}

impl Display for Grid<u8> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                writeln!(f)?;
            }
            f.write_str(&String::from_utf8_lossy(self.row(y)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_surrounding_blank_lines() {
        let grid = Grid::parse("\n\n#.S\n...\n\n").unwrap();
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert_eq!(grid.require(b'S').unwrap(), Pos::new(2, 0));
        assert_eq!(grid.to_string(), "#.S\n...");
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let err = Grid::parse("###\n##\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(_)));
        assert!(matches!(Grid::parse("\n \n"), Err(ParseError::MissingData(_))));
    }

    #[test]
    fn lookups_outside_are_none() {
        let mut grid = Grid::new(2, 2, 0u32);
        assert_eq!(grid.get(Pos::new(-1, 0)), None);
        assert_eq!(grid.get(Pos::new(2, 1)), None);
        assert!(grid.set(Pos::new(1, 1), 7));
        assert!(!grid.set(Pos::new(1, 2), 7));
        assert_eq!(grid[Pos::new(1, 1)], 7);
        assert_eq!(grid.neighbours4(Pos::new(0, 0)).count(), 2);
        assert_eq!(grid.neighbours8(Pos::new(0, 0)).count(), 3);
    }

    #[test]
    fn turns_compose() {
        for d in Dir::ALL {
            assert_eq!(d.turn_right().turn_left(), d);
            assert_eq!(d.opposite().opposite(), d);
            assert_eq!(d.delta() + d.opposite().delta(), Pos::default());
        }
        assert_eq!(Dir::from_arrow(b'v'), Some(Dir::S));
        assert_eq!(Pos::new(1, 1).manhattan(Pos::new(-2, 3)), 5);
    }
}
