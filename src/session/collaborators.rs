//! Optional presentation collaborators.
//!
//! Both are fire-and-forget: the session never waits on them and swallows
//! their failures. The defaults do nothing.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{CollaboratorError, Player};
use crate::rules::Cue;

/// Shows the victory presentation (a clip, a banner, ...).
pub trait VictoryPresenter {
    /// Called once when a game ends with a winner.
    fn present_victory(&mut self, winner: Player) -> Result<(), CollaboratorError>;
}

/// Plays short feedback tones.
pub trait SoundBoard {
    /// Play the tone for `cue`.
    fn play(&mut self, cue: Cue) -> Result<(), CollaboratorError>;
}

/// Presenter used when none is supplied.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPresenter;

impl VictoryPresenter for NoPresenter {
    fn present_victory(&mut self, _winner: Player) -> Result<(), CollaboratorError> {
        Ok(())
    }
}

/// Sound board used when none is supplied.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl SoundBoard for Silent {
    fn play(&mut self, _cue: Cue) -> Result<(), CollaboratorError> {
        Ok(())
    }
}

/// Presenter that records every winner it is handed.
///
/// Clones share the same log, so one clone can go into a session while
/// another is kept for inspection.
#[derive(Clone, Debug, Default)]
pub struct VictoryLog {
    winners: Rc<RefCell<Vec<Player>>>,
}

impl VictoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Winners presented so far, oldest first.
    #[must_use]
    pub fn winners(&self) -> Vec<Player> {
        self.winners.borrow().clone()
    }
}

impl VictoryPresenter for VictoryLog {
    fn present_victory(&mut self, winner: Player) -> Result<(), CollaboratorError> {
        self.winners.borrow_mut().push(winner);
        Ok(())
    }
}
