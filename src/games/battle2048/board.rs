//! Sliding and merging on a single 2048 board.
//!
//! ## Merge law
//!
//! A line is compacted toward the wall, then adjacent equal pairs merge
//! once, nearest the wall first. A merged tile never merges again in the
//! same slide, so `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]`, not `[8, 0, 0, 0]`.

use crate::core::{Direction, GameRng, Grid, Pos};

/// Side length of a board.
pub const SIZE: usize = 4;

/// A board of tile values, `0` for empty.
pub type Board = Grid<u32>;

/// Slide one line toward index 0.
///
/// Returns the new line and the sum of merged tile values.
#[must_use]
pub fn slide_line(line: [u32; SIZE]) -> ([u32; SIZE], u32) {
    let tiles: Vec<u32> = line.into_iter().filter(|&v| v != 0).collect();
    let mut out = [0; SIZE];
    let mut score = 0;
    let mut write = 0;
    let mut i = 0;
    while i < tiles.len() {
        if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
            let merged = tiles[i] * 2;
            out[write] = merged;
            score += merged;
            i += 2;
        } else {
            out[write] = tiles[i];
            i += 1;
        }
        write += 1;
    }
    (out, score)
}

/// Positions of line `index`, starting at the wall tiles slide toward.
fn line_positions(index: usize, dir: Direction) -> [Pos; SIZE] {
    std::array::from_fn(|k| match dir {
        Direction::Left => (index, k),
        Direction::Right => (index, SIZE - 1 - k),
        Direction::Up => (k, index),
        Direction::Down => (SIZE - 1 - k, index),
    })
}

/// Outcome of sliding a whole board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slid {
    pub board: Board,
    pub score: u32,
    pub moved: bool,
}

/// Slide every line of `board` in `dir`.
#[must_use]
pub fn slide(board: &Board, dir: Direction) -> Slid {
    let mut next = board.clone();
    let mut score = 0;
    for index in 0..SIZE {
        let positions = line_positions(index, dir);
        let (line, merged) = slide_line(positions.map(|pos| board[pos]));
        for (pos, value) in positions.into_iter().zip(line) {
            next[pos] = value;
        }
        score += merged;
    }
    let moved = next != *board;
    Slid { board: next, score, moved }
}

/// Whether any slide would change the board.
#[must_use]
pub fn can_move(board: &Board) -> bool {
    board.positions().any(|pos| {
        board[pos] == 0
            || [Direction::Right, Direction::Down]
                .into_iter()
                .filter_map(|dir| board.neighbor(pos, dir))
                .any(|next| board[next] == board[pos])
    })
}

/// Highest tile on the board.
#[must_use]
pub fn max_tile(board: &Board) -> u32 {
    board.cells().iter().copied().max().unwrap_or(0)
}

/// Drop a 2 (90%) or a 4 on a random empty cell.
///
/// Returns where it landed, or `None` if the board is full.
pub fn spawn_tile(board: &mut Board, rng: &mut GameRng) -> Option<Pos> {
    let empty: Vec<Pos> = board.positions().filter(|&pos| board[pos] == 0).collect();
    let &pos = rng.choose(&empty)?;
    board[pos] = if rng.gen_bool(0.9) { 2 } else { 4 };
    Some(pos)
}

/// Build a board from rows, for fixed positions.
#[must_use]
pub fn board_from_rows(rows: [[u32; SIZE]; SIZE]) -> Board {
    Grid::from_fn(SIZE, SIZE, |(r, c)| rows[r][c])
}
