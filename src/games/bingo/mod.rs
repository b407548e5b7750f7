//! Two-card bingo.
//!
//! - Each player gets a 5x5 card holding 1-25 in random order
//! - Players take turns calling numbers; a call marks both cards
//! - A row, column or diagonal with all five numbers called is a line
//! - First to three lines wins (Celeste is checked first on a shared call)

mod game;

pub use game::{bingo_lines, random_card, Bingo, BingoBuilder, BingoLine, Call, Lines, MAX_NUMBER, SIZE};
