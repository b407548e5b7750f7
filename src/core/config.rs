//! Timing configuration for deferred transitions.
//!
//! Games only name their pauses (`Delay`); the owner of a game decides how
//! long each pause lasts. Defaults are paced for people watching the board.
//!
//! Overrides can be loaded from JSON; missing fields keep their defaults:
//!
//! ```
//! use parlor_games::core::{Delay, TimingConfig};
//! use std::time::Duration;
//!
//! let timing = TimingConfig::from_json(r#"{ "answer_feedback_ms": 500 }"#).unwrap();
//! assert_eq!(timing.delay(Delay::AnswerFeedback), Duration::from_millis(500));
//! assert_eq!(timing.delay(Delay::PassPenalty), Duration::from_millis(1000));
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::error::ConfigError;
use super::phase::Delay;

/// Millisecond duration of each named `Delay`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub answer_feedback_ms: u64,
    pub sudden_death_intro_ms: u64,
    pub tile_reveal_ms: u64,
    pub final_reveal_ms: u64,
    pub piece_placed_ms: u64,
    pub lines_cleared_ms: u64,
    pub pass_penalty_ms: u64,
    pub turn_hand_off_ms: u64,
    pub overshoot_ms: u64,
    pub bonus_roll_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            answer_feedback_ms: 3000,
            sudden_death_intro_ms: 1500,
            // flip animation, then hand-off
            tile_reveal_ms: 300 + 800,
            final_reveal_ms: 300 + 1000,
            piece_placed_ms: 100 + 100,
            lines_cleared_ms: 100 + 600,
            pass_penalty_ms: 1000,
            turn_hand_off_ms: 1500,
            overshoot_ms: 1500,
            bonus_roll_ms: 1500,
        }
    }
}

impl TimingConfig {
    /// Every delay set to zero. Useful for tests and scripted play.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            answer_feedback_ms: 0,
            sudden_death_intro_ms: 0,
            tile_reveal_ms: 0,
            final_reveal_ms: 0,
            piece_placed_ms: 0,
            lines_cleared_ms: 0,
            pass_penalty_ms: 0,
            turn_hand_off_ms: 0,
            overshoot_ms: 0,
            bonus_roll_ms: 0,
        }
    }

    /// Parse overrides from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read overrides from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// How long to wait before resolving `delay`.
    #[must_use]
    pub fn delay(&self, delay: Delay) -> Duration {
        let ms = match delay {
            Delay::AnswerFeedback => self.answer_feedback_ms,
            Delay::SuddenDeathIntro => self.sudden_death_intro_ms,
            Delay::TileReveal => self.tile_reveal_ms,
            Delay::FinalReveal => self.final_reveal_ms,
            Delay::PiecePlaced => self.piece_placed_ms,
            Delay::LinesCleared => self.lines_cleared_ms,
            Delay::PassPenalty => self.pass_penalty_ms,
            Delay::TurnHandOff => self.turn_hand_off_ms,
            Delay::Overshoot => self.overshoot_ms,
            Delay::BonusRoll => self.bonus_roll_ms,
        };
        Duration::from_millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let timing = TimingConfig::default();
        assert_eq!(timing.delay(Delay::AnswerFeedback), Duration::from_secs(3));
        assert_eq!(timing.delay(Delay::TileReveal), Duration::from_millis(1100));
        assert_eq!(timing.delay(Delay::LinesCleared), Duration::from_millis(700));
    }

    #[test]
    fn test_instant() {
        let timing = TimingConfig::instant();
        assert_eq!(timing.delay(Delay::BonusRoll), Duration::ZERO);
        assert_eq!(timing.delay(Delay::FinalReveal), Duration::ZERO);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let timing = TimingConfig::from_json(r#"{ "overshoot_ms": 10 }"#).unwrap();
        assert_eq!(timing.overshoot_ms, 10);
        assert_eq!(timing.bonus_roll_ms, 1500);
    }

    #[test]
    fn test_bad_json() {
        let err = TimingConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_roundtrip() {
        let timing = TimingConfig::instant();
        let json = serde_json::to_string(&timing).unwrap();
        assert_eq!(TimingConfig::from_json(&json).unwrap(), timing);
    }
}
