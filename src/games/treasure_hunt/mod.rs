//! Treasure hunt: flip hidden tiles, collect points, avoid bombs.
//!
//! ## Flow
//!
//! `Flip` reveals a tile and scores it immediately, then the game waits in
//! `Resolving` so the reveal can be shown. `resolve()` hands the turn over,
//! or ends the game once every tile is face up.

mod game;
mod treasure;

pub use game::{Flip, Tile, TreasureHunt, TreasureHuntBuilder, COLUMNS};
pub use treasure::Treasure;
