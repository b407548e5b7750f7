//! Core building blocks shared by every game: players, phases, grids,
//! randomness, errors, timing.
//!
//! Nothing in here knows about a particular game.

pub mod player;
pub mod phase;
pub mod grid;
pub mod rng;
pub mod error;
pub mod config;

pub use player::{Player, PlayerMap};
pub use phase::{Delay, Phase};
pub use grid::{Direction, Grid, Pos};
pub use rng::GameRng;
pub use error::{CollaboratorError, ConfigError, Rejection};
pub use config::TimingConfig;
