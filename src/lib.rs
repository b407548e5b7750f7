//! # parlor-games
//!
//! Eight two-player minigames for Celeste and Sally, each a small
//! turn-based state machine.
//!
//! ## Design Principles
//!
//! 1. **One Machine Per Game**: Every game implements `Minigame` and moves
//!    through `AwaitingInput -> Resolving -> GameOver`. Input is only
//!    accepted while awaiting it.
//!
//! 2. **No Hidden Timers**: Transitions that need a pause return
//!    `Step::Deferred`. The caller waits (or not) and calls `resolve()`.
//!
//! 3. **Rejections Are Values**: Invalid input returns a `Rejection` and
//!    leaves the game untouched.
//!
//! 4. **Presentation Is Optional**: Victory presentation and sound are
//!    injected collaborators whose failures are logged and ignored.
//!
//! ## Modules
//!
//! - `core`: Players, phases, grids, RNG, errors, timing config
//! - `rules`: The `Minigame` trait and transition values
//! - `session`: `GameSession` controller and collaborator traits
//! - `games`: The eight games

pub mod core;
pub mod games;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    CollaboratorError, ConfigError, Delay, Direction, GameRng, Grid, Phase, Player, PlayerMap, Pos, Rejection,
    TimingConfig,
};

pub use crate::rules::{Cue, GameResult, Minigame, Step, Transition};

pub use crate::session::{GameSession, NoPresenter, Silent, SoundBoard, VictoryLog, VictoryPresenter};
