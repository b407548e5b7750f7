//! 2048 battle: each player slides their own board, best tile wins.

mod board;
mod game;

pub use board::{board_from_rows, can_move, max_tile, slide, slide_line, spawn_tile, Board, Slid, SIZE};
pub use game::{Battle2048, Battle2048Builder, Slide};
