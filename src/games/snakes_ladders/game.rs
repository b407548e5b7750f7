use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use std::fmt;
use std::str::FromStr;

use crate::core::{Delay, GameRng, Phase, Player, PlayerMap, Rejection};
use crate::rules::{Cue, GameResult, Minigame, Step, Transition};

use super::track::{cell_at, jump_from, Jump, FINISH, ROW_LEN};

/// Faces on the die.
pub const DIE_FACES: u8 = 6;

/// Roll the die for the current player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Roll;

impl FromStr for Roll {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "r" | "roll" => Ok(Roll),
            other => Err(format!("press enter or type `roll`, got {other:?}")),
        }
    }
}

/// What the last roll did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub player: Player,
    pub roll: u8,
    pub from: u8,
    /// Cell reached by walking, before any snake or ladder.
    pub landed: u8,
    pub jump: Option<Jump>,
    /// The roll would have passed the finish and was forfeited.
    pub overshoot: bool,
}

/// Race two tokens from 1 to exactly 100. Rolling a 6 earns another roll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakesLadders {
    positions: PlayerMap<u8>,
    current: Player,
    phase: Phase,
    last_move: Option<Move>,
    bonus_roll: bool,
    result: Option<GameResult>,
    #[serde(skip, default = "GameRng::from_entropy")]
    rng: GameRng,
}

/// Builder for creating a `SnakesLadders` game.
pub struct SnakesLaddersBuilder {
    start: PlayerMap<u8>,
}

impl Default for SnakesLaddersBuilder {
    fn default() -> Self {
        Self {
            start: PlayerMap::with_value(1),
        }
    }
}

impl SnakesLaddersBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a token somewhere other than cell 1.
    pub fn start_at(mut self, player: Player, cell: u8) -> Self {
        assert!((1..FINISH).contains(&cell), "Start cell must be on the track before the finish");
        self.start[player] = cell;
        self
    }

    pub fn build(self, seed: u64) -> SnakesLadders {
        SnakesLadders {
            positions: self.start,
            current: Player::Celeste,
            phase: Phase::AwaitingInput,
            last_move: None,
            bonus_roll: false,
            result: None,
            rng: GameRng::new(seed),
        }
    }
}

impl SnakesLadders {
    #[must_use]
    pub fn position(&self, player: Player) -> u8 {
        self.positions[player]
    }

    #[must_use]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Move the current player by a known roll.
    ///
    /// `Roll` draws the value and lands here.
    pub fn advance(&mut self, steps: u8) -> Result<Transition, Rejection> {
        self.phase.check_input()?;
        if !(1..=DIE_FACES).contains(&steps) {
            return Err(Rejection::InvalidRoll(steps));
        }

        let player = self.current;
        let from = self.positions[player];
        let mut record = Move {
            player,
            roll: steps,
            from,
            landed: from,
            jump: None,
            overshoot: false,
        };

        let target = from.saturating_add(steps);
        if target > FINISH {
            record.overshoot = true;
            self.last_move = Some(record);
            self.bonus_roll = false;
            self.phase = Phase::Resolving;
            return Ok(Transition::new(Step::Deferred(Delay::Overshoot)).with_cue(Cue::Pass));
        }

        record.landed = target;
        let mut cues: SmallVec<[Cue; 4]> = smallvec![Cue::Move];
        // Exactly on the finish wins before any snake or ladder is looked up.
        if target != FINISH {
            record.jump = jump_from(target);
        }
        self.positions[player] = record.jump.map_or(target, Jump::to);
        match record.jump {
            Some(Jump::Snake { .. }) => cues.push(Cue::Penalty),
            Some(Jump::Ladder { .. }) => cues.push(Cue::Reward),
            None => {}
        }
        self.last_move = Some(record);

        if self.positions[player] == FINISH {
            let result = GameResult::Winner(player);
            self.phase = Phase::GameOver;
            self.result = Some(result);
            let mut finished = Transition::finished(result);
            finished.cues.extend(cues);
            return Ok(finished);
        }

        self.bonus_roll = steps == DIE_FACES;
        self.phase = Phase::Resolving;
        let delay = if self.bonus_roll { Delay::BonusRoll } else { Delay::TurnHandOff };
        let mut transition = Transition::new(Step::Deferred(delay));
        transition.cues = cues;
        Ok(transition)
    }
}

impl Minigame for SnakesLadders {
    type Action = Roll;

    fn title(&self) -> &'static str {
        "snakes and ladders"
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn current_player(&self) -> Player {
        self.current
    }

    fn scores(&self) -> PlayerMap<i64> {
        self.positions.map(|_, &p| i64::from(p))
    }

    fn apply(&mut self, _roll: &Roll) -> Result<Transition, Rejection> {
        self.phase.check_input()?;
        let steps = self.rng.gen_inclusive(1..=DIE_FACES);
        log::debug!("snakes and ladders: {} rolled {}", self.current, steps);
        self.advance(steps)
    }

    fn resolve(&mut self) -> Result<Transition, Rejection> {
        self.phase.check_resolve()?;
        if !std::mem::take(&mut self.bonus_roll) {
            self.current = self.current.other();
        }
        self.phase = Phase::AwaitingInput;
        Ok(Transition::new(Step::Continue))
    }

    fn result(&self) -> Option<GameResult> {
        self.result
    }
}

impl fmt::Display for SnakesLadders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..ROW_LEN).rev() {
            for col in 0..ROW_LEN {
                let cell = cell_at(row, col);
                let here: Vec<Player> = Player::all().filter(|&p| self.positions[p] == cell).collect();
                match here.as_slice() {
                    [] => match jump_from(cell) {
                        Some(Jump::Snake { .. }) => write!(f, " {cell:>3}v")?,
                        Some(Jump::Ladder { .. }) => write!(f, " {cell:>3}^")?,
                        None => write!(f, " {cell:>3} ")?,
                    },
                    [Player::Celeste] => write!(f, "  [C]")?,
                    [Player::Sally] => write!(f, "  [S]")?,
                    _ => write!(f, " [CS]")?,
                }
            }
            writeln!(f)?;
        }
        if let Some(last) = self.last_move {
            write!(f, "{} rolled {}", last.player, last.roll)?;
            if last.overshoot {
                write!(f, ", too far to finish")?;
            }
            match last.jump {
                Some(Jump::Snake { from, to }) => write!(f, ", snake {from} -> {to}")?,
                Some(Jump::Ladder { from, to }) => write!(f, ", ladder {from} -> {to}")?,
                None => {}
            }
            if self.bonus_roll {
                write!(f, ", roll again!")?;
            }
            writeln!(f)?;
        }
        writeln!(
            f,
            "Celeste at {} / Sally at {}",
            self.positions[Player::Celeste],
            self.positions[Player::Sally]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_at(celeste: u8) -> SnakesLadders {
        SnakesLaddersBuilder::new().start_at(Player::Celeste, celeste).build(1)
    }

    #[test]
    fn test_tokens_start_at_one() {
        let game = SnakesLaddersBuilder::new().build(1);
        assert_eq!(game.position(Player::Celeste), 1);
        assert_eq!(game.position(Player::Sally), 1);
        assert_eq!(game.current_player(), Player::Celeste);
    }

    #[test]
    fn test_plain_move_hands_over() {
        let mut game = game_at(1);
        let transition = game.advance(3).unwrap();

        assert_eq!(transition.step, Step::Deferred(Delay::TurnHandOff));
        assert_eq!(game.position(Player::Celeste), 4);
        assert_eq!(game.apply(&Roll), Err(Rejection::Locked));

        game.resolve().unwrap();
        assert_eq!(game.current_player(), Player::Sally);
    }

    #[test]
    fn test_exact_finish_wins() {
        let mut game = game_at(97);
        let transition = game.advance(3).unwrap();

        assert_eq!(transition.step, Step::Finished(GameResult::Winner(Player::Celeste)));
        assert_eq!(game.position(Player::Celeste), 100);
        assert!(game.is_over());
    }

    #[test]
    fn test_overshoot_forfeits_move() {
        let mut game = game_at(97);
        let transition = game.advance(4).unwrap();

        assert_eq!(transition.step, Step::Deferred(Delay::Overshoot));
        assert_eq!(game.position(Player::Celeste), 97);
        assert!(game.last_move().unwrap().overshoot);

        game.resolve().unwrap();
        assert_eq!(game.current_player(), Player::Sally);
    }

    #[test]
    fn test_overshoot_with_six_gets_no_bonus() {
        let mut game = game_at(96);
        game.advance(6).unwrap();
        game.resolve().unwrap();
        assert_eq!(game.current_player(), Player::Sally);
        assert_eq!(game.position(Player::Celeste), 96);
    }

    #[test]
    fn test_snake_and_ladder() {
        let mut game = game_at(12);
        let transition = game.advance(4).unwrap();
        assert_eq!(game.position(Player::Celeste), 6);
        assert!(transition.cues.contains(&Cue::Penalty));
        assert_eq!(game.last_move().unwrap().landed, 16);
        game.resolve().unwrap();

        let transition = game.advance(1).unwrap();
        assert_eq!(game.position(Player::Sally), 38);
        assert!(transition.cues.contains(&Cue::Reward));
    }

    #[test]
    fn test_six_rolls_again() {
        let mut game = game_at(30);
        let transition = game.advance(6).unwrap();

        assert_eq!(transition.step, Step::Deferred(Delay::BonusRoll));
        game.resolve().unwrap();
        assert_eq!(game.current_player(), Player::Celeste);

        game.advance(2).unwrap();
        game.resolve().unwrap();
        assert_eq!(game.current_player(), Player::Sally);
    }

    #[test]
    fn test_invalid_roll_rejected() {
        let mut game = game_at(1);
        let before = game.clone();
        assert_eq!(game.advance(0), Err(Rejection::InvalidRoll(0)));
        assert_eq!(game.advance(7), Err(Rejection::InvalidRoll(7)));
        assert_eq!(game, before);
    }

    #[test]
    fn test_roll_uses_die() {
        let mut game = game_at(30);
        game.apply(&Roll).unwrap();
        let last = game.last_move().unwrap();
        assert!((1..=6).contains(&last.roll));
        assert_eq!(last.landed, 30 + last.roll);
    }

    #[test]
    fn test_restored_token_past_finish_overshoots() {
        let mut snapshot = serde_json::to_value(game_at(30)).unwrap();
        snapshot["positions"]["data"][0] = serde_json::json!(250);
        let mut game: SnakesLadders = serde_json::from_value(snapshot).unwrap();

        let transition = game.advance(6).unwrap();
        assert_eq!(transition.step, Step::Deferred(Delay::Overshoot));
        assert_eq!(game.position(Player::Celeste), 250);
    }

    #[test]
    fn test_parse_roll() {
        assert_eq!("".parse::<Roll>(), Ok(Roll));
        assert_eq!("Roll".parse::<Roll>(), Ok(Roll));
        assert!("6".parse::<Roll>().is_err());
    }
}
