//! Fixed-size row-major grid.
//!
//! Dimensions are set once at construction and never change.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// A `(row, col)` position.
pub type Pos = (usize, usize);

/// Orthogonal direction on a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Clockwise order starting at `Up`.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    /// The direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

/// Fixed `rows x cols` container.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGrid<T>", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

/// Unchecked shape as read from a snapshot.
#[derive(Deserialize)]
struct RawGrid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T> TryFrom<RawGrid<T>> for Grid<T> {
    type Error = String;

    fn try_from(raw: RawGrid<T>) -> Result<Self, Self::Error> {
        let (rows, cols, len) = (raw.rows, raw.cols, raw.cells.len());
        Grid::from_cells(rows, cols, raw.cells)
            .ok_or_else(|| format!("{rows}x{cols} grid cannot hold {len} cells"))
    }
}

impl<T> Grid<T> {
    /// Create a grid with every cell produced by `factory`.
    pub fn from_fn(rows: usize, cols: usize, mut factory: impl FnMut(Pos) -> T) -> Self {
        let cells = (0..rows * cols).map(|i| factory((i / cols, i % cols))).collect();
        Self { rows, cols, cells }
    }

    /// Create a grid from row-major cells.
    ///
    /// Returns `None` if `cells.len() != rows * cols`.
    #[must_use]
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<T>) -> Option<Self> {
        (rows.checked_mul(cols) == Some(cells.len())).then_some(Self { rows, cols, cells })
    }

    /// Create a grid with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            rows,
            cols,
            cells: vec![value; rows * cols],
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Is `(row, col)` inside the grid?
    #[must_use]
    pub fn contains(&self, (row, col): Pos) -> bool {
        row < self.rows && col < self.cols
    }

    #[must_use]
    pub fn get(&self, pos: Pos) -> Option<&T> {
        self.contains(pos).then(|| &self.cells[pos.0 * self.cols + pos.1])
    }

    pub fn get_mut(&mut self, pos: Pos) -> Option<&mut T> {
        if self.contains(pos) {
            Some(&mut self.cells[pos.0 * self.cols + pos.1])
        } else {
            None
        }
    }

    /// One row as a slice.
    #[must_use]
    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// One column, top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = &T> + '_ {
        (0..self.rows).map(move |row| &self.cells[row * self.cols + col])
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let cols = self.cols;
        (0..self.rows * cols).map(move |i| (i / cols, i % cols))
    }

    /// The neighbouring position in `dir`, if it is on the grid.
    #[must_use]
    pub fn neighbor(&self, (row, col): Pos, dir: Direction) -> Option<Pos> {
        let next = match dir {
            Direction::Up => (row.checked_sub(1)?, col),
            Direction::Right => (row, col + 1),
            Direction::Down => (row + 1, col),
            Direction::Left => (row, col.checked_sub(1)?),
        };
        self.contains(next).then_some(next)
    }
}

impl<T> Index<Pos> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): Pos) -> &Self::Output {
        assert!(row < self.rows && col < self.cols, "position ({row}, {col}) out of bounds");
        &self.cells[row * self.cols + col]
    }
}

impl<T> IndexMut<Pos> for Grid<T> {
    fn index_mut(&mut self, (row, col): Pos) -> &mut Self::Output {
        assert!(row < self.rows && col < self.cols, "position ({row}, {col}) out of bounds");
        &mut self.cells[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_row_major() {
        let grid = Grid::from_fn(2, 3, |(r, c)| r * 10 + c);

        assert_eq!(grid.row(0), &[0, 1, 2]);
        assert_eq!(grid.row(1), &[10, 11, 12]);
        assert_eq!(grid.column(2).copied().collect::<Vec<_>>(), vec![2, 12]);
        assert_eq!(grid[(1, 1)], 11);
    }

    #[test]
    fn test_from_cells_checks_shape() {
        assert!(Grid::from_cells(2, 2, vec![1, 2, 3, 4]).is_some());
        assert!(Grid::from_cells(2, 2, vec![1, 2, 3]).is_none());
    }

    #[test]
    fn test_snapshot_shape_is_checked() {
        let grid: Grid<u8> = serde_json::from_str(r#"{"rows":1,"cols":2,"cells":[7,8]}"#).unwrap();
        assert_eq!(grid.row(0), &[7, 8]);

        assert!(serde_json::from_str::<Grid<u8>>(r#"{"rows":2,"cols":2,"cells":[7,8]}"#).is_err());
        let huge = format!(r#"{{"rows":{},"cols":2,"cells":[]}}"#, usize::MAX);
        assert!(serde_json::from_str::<Grid<u8>>(&huge).is_err());
    }

    #[test]
    fn test_bounds() {
        let mut grid = Grid::filled(3, 3, 0u8);

        assert!(grid.get((2, 2)).is_some());
        assert!(grid.get((3, 0)).is_none());
        assert!(grid.get_mut((0, 3)).is_none());
    }

    #[test]
    fn test_neighbors() {
        let grid = Grid::filled(3, 3, ());

        assert_eq!(grid.neighbor((0, 0), Direction::Up), None);
        assert_eq!(grid.neighbor((0, 0), Direction::Left), None);
        assert_eq!(grid.neighbor((0, 0), Direction::Right), Some((0, 1)));
        assert_eq!(grid.neighbor((2, 2), Direction::Down), None);
        assert_eq!(grid.neighbor((1, 1), Direction::Up), Some((0, 1)));
    }

    #[test]
    fn test_positions() {
        let grid = Grid::filled(2, 2, ());
        let all: Vec<_> = grid.positions().collect();
        assert_eq!(all, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_opposite() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
        }
        assert_eq!(Direction::Up.opposite(), Direction::Down);
    }
}
