//! Session controller and presentation collaborators.
//!
//! A `GameSession` is the single owner of one game instance. It forwards
//! input, tracks timing for deferred transitions, and notifies optional
//! collaborators:
//!
//! - `VictoryPresenter`: told once who won
//! - `SoundBoard`: told about feedback cues
//!
//! Both default to no-ops, and their failures never reach the game.
//!
//! ## Example Usage
//!
//! ```
//! use parlor_games::games::tictactoe::{Place, TicTacToe};
//! use parlor_games::session::{GameSession, VictoryLog};
//! use parlor_games::core::Player;
//!
//! let log = VictoryLog::new();
//! let mut session = GameSession::new(TicTacToe::new()).with_presenter(log.clone());
//!
//! for cell in [0, 3, 1, 4, 2] {
//!     session.handle(&Place(cell)).unwrap();
//! }
//!
//! assert!(session.is_over());
//! assert_eq!(log.winners(), vec![Player::Celeste]);
//! ```

mod collaborators;
mod controller;

pub use collaborators::{NoPresenter, Silent, SoundBoard, VictoryLog, VictoryPresenter};
pub use controller::GameSession;
