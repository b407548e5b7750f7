//! Single owning controller for one game instance.

use std::time::Duration;

use crate::core::{Rejection, TimingConfig};
use crate::rules::{GameResult, Minigame, Step, Transition};

use super::collaborators::{NoPresenter, Silent, SoundBoard, VictoryPresenter};

/// Owns a game, its timing and its presentation collaborators.
///
/// Drive it with `handle()` for player input and `resolve()` once the delay
/// returned by `delay_for()` has elapsed.
pub struct GameSession<G: Minigame> {
    game: G,
    timing: TimingConfig,
    presenter: Box<dyn VictoryPresenter>,
    sound: Box<dyn SoundBoard>,
    announced: bool,
}

impl<G: Minigame> GameSession<G> {
    /// Wrap a freshly built game with default timing and no-op collaborators.
    pub fn new(game: G) -> Self {
        log::info!("{} started, {} to move", game.title(), game.current_player());
        Self {
            game,
            timing: TimingConfig::default(),
            presenter: Box::new(NoPresenter),
            sound: Box::new(Silent),
            announced: false,
        }
    }

    /// Use a victory presenter.
    ///
    /// A game that was already won when it was wrapped is presented here.
    #[must_use]
    pub fn with_presenter(mut self, presenter: impl VictoryPresenter + 'static) -> Self {
        self.presenter = Box::new(presenter);
        if let Some(result) = self.game.result() {
            self.announce(result);
        }
        self
    }

    /// Use a sound board.
    #[must_use]
    pub fn with_sound(mut self, sound: impl SoundBoard + 'static) -> Self {
        self.sound = Box::new(sound);
        self
    }

    /// Use custom delays.
    #[must_use]
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// The game being played.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Give the game back.
    pub fn into_game(self) -> G {
        self.game
    }

    /// Is the game over?
    pub fn is_over(&self) -> bool {
        self.game.is_over()
    }

    /// How long to wait before calling `resolve()` after `step`.
    ///
    /// `None` unless the step is deferred.
    pub fn delay_for(&self, step: Step) -> Option<Duration> {
        match step {
            Step::Deferred(delay) => Some(self.timing.delay(delay)),
            _ => None,
        }
    }

    /// Apply player input.
    ///
    /// Rejected input is logged and returned; the game is unchanged.
    pub fn handle(&mut self, action: &G::Action) -> Result<Step, Rejection> {
        let player = self.game.current_player();
        match self.game.apply(action) {
            Ok(transition) => {
                log::debug!("{}: {} played {:?} -> {:?}", self.game.title(), player, action, transition.step);
                Ok(self.dispatch(transition))
            }
            Err(rejection) => {
                log::debug!("{}: ignored {:?} from {}: {}", self.game.title(), action, player, rejection);
                Err(rejection)
            }
        }
    }

    /// Complete a deferred transition.
    pub fn resolve(&mut self) -> Result<Step, Rejection> {
        match self.game.resolve() {
            Ok(transition) => {
                log::debug!("{}: resolved -> {:?}", self.game.title(), transition.step);
                Ok(self.dispatch(transition))
            }
            Err(rejection) => {
                log::debug!("{}: nothing to resolve: {}", self.game.title(), rejection);
                Err(rejection)
            }
        }
    }

    fn dispatch(&mut self, transition: Transition) -> Step {
        for cue in &transition.cues {
            if let Err(err) = self.sound.play(*cue) {
                log::trace!("sound cue {:?} skipped: {}", cue, err);
            }
        }

        if let Step::Finished(result) = transition.step {
            self.announce(result);
        }

        transition.step
    }

    fn announce(&mut self, result: GameResult) {
        if self.announced {
            return;
        }
        self.announced = true;
        log::info!("{} over: {:?}", self.game.title(), result);
        if let Some(winner) = result.winner() {
            if let Err(err) = self.presenter.present_victory(winner) {
                log::warn!("victory presentation for {} failed: {}", winner.victory_id(), err);
            }
        }
    }
}
