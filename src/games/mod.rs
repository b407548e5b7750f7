//! The minigames.
//!
//! Each game is a self-contained `Minigame` implementation with its own
//! action type, builder (for randomized content) and `Display` rendering:
//!
//! - `tictactoe`: 3x3, three in a row
//! - `bingo`: two 5x5 cards, first to three lines
//! - `treasure_hunt`: flip tiles for points
//! - `animal_quiz`: true/false questions with sudden death
//! - `battle2048`: two private 2048 boards
//! - `block_puzzle`: tetrominoes on a shared 8x8 board
//! - `pipe_puzzle`: rotate pipes to connect your crossing
//! - `snakes_ladders`: dice race to 100

pub mod animal_quiz;
pub mod battle2048;
pub mod bingo;
pub mod block_puzzle;
pub mod pipe_puzzle;
pub mod snakes_ladders;
pub mod tictactoe;
pub mod treasure_hunt;
