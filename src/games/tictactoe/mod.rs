//! Tic-tac-toe.
//!
//! - 3x3 board, Celeste plays O and always opens
//! - Three in a row, column or diagonal wins
//! - A full board with no line is a draw

mod game;

pub use game::{winning_line, Mark, Place, TicTacToe, LINES};
