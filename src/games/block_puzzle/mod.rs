//! Block puzzle: drop tetrominoes on a shared 8x8 board and clear lines.
//!
//! ## Turn
//!
//! The current player may rotate freely, then either places the piece or
//! passes. Placing clears every full row and column at once for 10 points
//! each. Passing costs 5 points. After the pause the other player draws a
//! fresh random piece; two passes in a row end the game.

mod game;
mod tetromino;

pub use game::{
    can_place, BlockAction, BlockPuzzle, BlockPuzzleBuilder, Board, FullLines, PASS_PENALTY, POINTS_PER_LINE, SIZE,
};
pub use tetromino::{Piece, Tetromino};
