//! The `Minigame` trait and the values it returns.
//!
//! Games implement `Minigame` to define:
//! - Which actions are accepted in which phase
//! - How an action changes the state
//! - What happens when a deferred transition resolves
//! - How the game ends

use smallvec::SmallVec;

use crate::core::{Delay, Phase, Player, PlayerMap, Rejection};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(Player),
    /// Nobody won.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: Player) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// The winner, if there is one.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Draw => None,
        }
    }

    /// Compare two scores; higher wins, equal is a draw.
    #[must_use]
    pub fn by_score<S: Ord>(celeste: S, sally: S) -> Self {
        match celeste.cmp(&sally) {
            std::cmp::Ordering::Greater => GameResult::Winner(Player::Celeste),
            std::cmp::Ordering::Less => GameResult::Winner(Player::Sally),
            std::cmp::Ordering::Equal => GameResult::Draw,
        }
    }
}

/// Where the game went after an accepted action or resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Back to `AwaitingInput`.
    Continue,
    /// Entered `Resolving`; call `resolve()` after the delay.
    Deferred(Delay),
    /// Entered `GameOver`.
    Finished(GameResult),
}

/// Feedback event for an optional sound board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Move,
    Merge,
    Rotate,
    Place,
    Clear,
    Pass,
    Bingo,
    Reward,
    Penalty,
    Win,
}

/// Outcome of an accepted `apply()` or `resolve()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub step: Step,
    pub cues: SmallVec<[Cue; 4]>,
}

impl Transition {
    /// Transition with no cues.
    #[must_use]
    pub fn new(step: Step) -> Self {
        Self {
            step,
            cues: SmallVec::new(),
        }
    }

    /// Add a cue.
    #[must_use]
    pub fn with_cue(mut self, cue: Cue) -> Self {
        self.cues.push(cue);
        self
    }

    /// Finished transition; adds `Cue::Win` when somebody won.
    #[must_use]
    pub fn finished(result: GameResult) -> Self {
        let transition = Self::new(Step::Finished(result));
        if result.winner().is_some() {
            transition.with_cue(Cue::Win)
        } else {
            transition
        }
    }
}

/// A two-player turn-based minigame.
///
/// ## Implementation Notes
///
/// - `apply` must reject input unless `phase()` is `AwaitingInput`, and a
///   rejected call must leave the state untouched
/// - `resolve` is only meaningful after `Step::Deferred`
/// - `result` is `Some` exactly when `phase()` is `GameOver`
pub trait Minigame {
    /// Player input (cell click, key press, dice roll).
    type Action: Clone + std::fmt::Debug;

    /// Short display name.
    fn title(&self) -> &'static str;

    /// Current phase.
    fn phase(&self) -> Phase;

    /// Whose turn it is.
    fn current_player(&self) -> Player;

    /// Per-player scores as shown on the scoreboard.
    fn scores(&self) -> PlayerMap<i64>;

    /// Validate and apply an action for the current player.
    fn apply(&mut self, action: &Self::Action) -> Result<Transition, Rejection>;

    /// Finish a deferred transition.
    fn resolve(&mut self) -> Result<Transition, Rejection> {
        self.phase().check_resolve()?;
        Err(Rejection::NothingPending)
    }

    /// Final result, once the game is over.
    fn result(&self) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Is the game over?
    fn is_over(&self) -> bool {
        self.phase() == Phase::GameOver
    }
}
