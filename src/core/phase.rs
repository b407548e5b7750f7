//! Turn phases and deferred transitions.
//!
//! Every game runs the same small machine:
//!
//! ```text
//! AwaitingInput --valid action--> Resolving --resolve()--> AwaitingInput
//!       |                             |
//!       +------ terminal action ------+---------------> GameOver
//! ```
//!
//! `Resolving` stands in for the browser's "wait, then advance" timers. While
//! a game is resolving, input is rejected and the state does not change; the
//! owner calls `resolve()` once the named `Delay` has elapsed.

use serde::{Deserialize, Serialize};

use super::error::Rejection;

/// Where a game is in its turn cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the current player to act.
    #[default]
    AwaitingInput,
    /// An action's effects are still playing out; input is locked.
    Resolving,
    /// Terminal; no further input is accepted.
    GameOver,
}

impl Phase {
    /// Can the current player act?
    #[must_use]
    pub const fn accepts_input(self) -> bool {
        matches!(self, Phase::AwaitingInput)
    }

    /// Gate an incoming action: `Ok` only while awaiting input.
    pub fn check_input(self) -> Result<(), Rejection> {
        if self.accepts_input() {
            Ok(())
        } else if self == Phase::GameOver {
            Err(Rejection::GameOver)
        } else {
            Err(Rejection::Locked)
        }
    }

    /// Gate a `resolve()` call: `Ok` only while resolving.
    pub fn check_resolve(self) -> Result<(), Rejection> {
        match self {
            Phase::Resolving => Ok(()),
            Phase::GameOver => Err(Rejection::GameOver),
            Phase::AwaitingInput => Err(Rejection::NothingPending),
        }
    }
}

/// Named pause between an action and its follow-up transition.
///
/// Durations live in [`TimingConfig`](super::TimingConfig) so games stay
/// free of wall-clock concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Delay {
    /// Quiz feedback is shown before the next question.
    AnswerFeedback,
    /// Sudden-death banner before the tie-break question.
    SuddenDeathIntro,
    /// A treasure tile is revealed before the turn passes.
    TileReveal,
    /// The last treasure tile is revealed before the result.
    FinalReveal,
    /// A block piece settles with no lines cleared.
    PiecePlaced,
    /// Full lines flash and vanish.
    LinesCleared,
    /// A pass penalty is shown.
    PassPenalty,
    /// A token has moved and the turn passes.
    TurnHandOff,
    /// A roll overshot the final square.
    Overshoot,
    /// A six was rolled; the same player rolls again.
    BonusRoll,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_awaiting_accepts_input() {
        assert!(Phase::AwaitingInput.accepts_input());
        assert!(!Phase::Resolving.accepts_input());
        assert!(!Phase::GameOver.accepts_input());
        assert_eq!(Phase::default(), Phase::AwaitingInput);
    }

    #[test]
    fn test_check_input() {
        assert_eq!(Phase::AwaitingInput.check_input(), Ok(()));
        assert_eq!(Phase::Resolving.check_input(), Err(Rejection::Locked));
        assert_eq!(Phase::GameOver.check_input(), Err(Rejection::GameOver));
    }

    #[test]
    fn test_check_resolve() {
        assert_eq!(Phase::Resolving.check_resolve(), Ok(()));
        assert_eq!(Phase::AwaitingInput.check_resolve(), Err(Rejection::NothingPending));
        assert_eq!(Phase::GameOver.check_resolve(), Err(Rejection::GameOver));
    }
}
