//! Snakes and ladders for two.
//!
//! ## Rules
//!
//! - Both tokens start on cell 1, Celeste rolls first
//! - A roll past 100 is forfeited
//! - Landing exactly on 100 wins at once
//! - A snake head or ladder foot moves the token on
//! - A 6 earns another roll

mod game;
mod track;

pub use game::{Move, Roll, SnakesLadders, SnakesLaddersBuilder, DIE_FACES};
pub use track::{cell_at, jump_from, Jump, FINISH, LADDERS, ROW_LEN, SNAKES};
