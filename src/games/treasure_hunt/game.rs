use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::{Delay, GameRng, Phase, Player, PlayerMap, Rejection};
use crate::rules::{Cue, GameResult, Minigame, Step, Transition};

use super::treasure::Treasure;

/// Tiles per row when the board is laid out.
pub const COLUMNS: usize = 6;

/// One face-down tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub treasure: Treasure,
    pub flipped: bool,
}

/// Turn over the tile at `index` (row-major).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Flip(pub usize);

impl FromStr for Flip {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<usize>().map(Flip).map_err(|e| e.to_string())
    }
}

/// Players take turns flipping tiles; the treasure's points go to whoever
/// found it. Once every tile is face up the higher score wins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasureHunt {
    tiles: Vec<Tile>,
    scores: PlayerMap<i32>,
    current: Player,
    phase: Phase,
    last_flip: Option<usize>,
    result: Option<GameResult>,
}

/// Builder for creating a `TreasureHunt` game.
pub struct TreasureHuntBuilder {
    counts: Vec<(Treasure, usize)>,
}

impl Default for TreasureHuntBuilder {
    fn default() -> Self {
        Self {
            counts: Treasure::ALL.iter().map(|&t| (t, t.default_count())).collect(),
        }
    }
}

impl TreasureHuntBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override how many of one treasure are hidden.
    pub fn count(mut self, treasure: Treasure, count: usize) -> Self {
        if let Some(entry) = self.counts.iter_mut().find(|(t, _)| *t == treasure) {
            entry.1 = count;
        }
        self
    }

    /// Shuffle the treasure table into a board.
    pub fn build(self, seed: u64) -> TreasureHunt {
        let mut rng = GameRng::new(seed);
        let mut treasures: Vec<Treasure> = self
            .counts
            .iter()
            .flat_map(|&(t, n)| std::iter::repeat(t).take(n))
            .collect();
        rng.shuffle(&mut treasures);
        TreasureHunt::with_layout(treasures)
    }
}

impl TreasureHunt {
    /// Board with treasures in a fixed order.
    ///
    /// # Panics
    ///
    /// Panics if `treasures` is empty.
    pub fn with_layout(treasures: Vec<Treasure>) -> Self {
        assert!(!treasures.is_empty(), "Board needs at least one tile");
        Self {
            tiles: treasures
                .into_iter()
                .map(|treasure| Tile { treasure, flipped: false })
                .collect(),
            scores: PlayerMap::with_value(0),
            current: Player::Celeste,
            phase: Phase::AwaitingInput,
            last_flip: None,
            result: None,
        }
    }

    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[must_use]
    pub fn flipped_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.flipped).count()
    }

    /// The tile revealed by the most recent flip.
    #[must_use]
    pub fn last_flip(&self) -> Option<(usize, Treasure)> {
        self.last_flip.map(|i| (i, self.tiles[i].treasure))
    }

    fn all_flipped(&self) -> bool {
        self.tiles.iter().all(|t| t.flipped)
    }
}

impl Minigame for TreasureHunt {
    type Action = Flip;

    fn title(&self) -> &'static str {
        "treasure hunt"
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn current_player(&self) -> Player {
        self.current
    }

    fn scores(&self) -> PlayerMap<i64> {
        self.scores.map(|_, &s| i64::from(s))
    }

    fn apply(&mut self, &Flip(index): &Flip) -> Result<Transition, Rejection> {
        self.phase.check_input()?;
        let tile = self.tiles.get_mut(index).ok_or(Rejection::OutOfBounds {
            row: index / COLUMNS,
            col: index % COLUMNS,
        })?;
        if tile.flipped {
            return Err(Rejection::Occupied(index));
        }

        tile.flipped = true;
        let treasure = tile.treasure;
        self.scores[self.current] += treasure.points();
        self.last_flip = Some(index);
        self.phase = Phase::Resolving;
        log::debug!("treasure hunt: {} found {:?} at {}", self.current, treasure, index);

        let delay = if self.all_flipped() { Delay::FinalReveal } else { Delay::TileReveal };
        let transition = Transition::new(Step::Deferred(delay));
        Ok(match treasure.points() {
            p if p > 0 => transition.with_cue(Cue::Reward),
            p if p < 0 => transition.with_cue(Cue::Penalty),
            _ => transition,
        })
    }

    fn resolve(&mut self) -> Result<Transition, Rejection> {
        self.phase.check_resolve()?;
        if self.all_flipped() {
            let result = GameResult::by_score(self.scores[Player::Celeste], self.scores[Player::Sally]);
            self.phase = Phase::GameOver;
            self.result = Some(result);
            return Ok(Transition::finished(result));
        }
        self.current = self.current.other();
        self.phase = Phase::AwaitingInput;
        Ok(Transition::new(Step::Continue))
    }

    fn result(&self) -> Option<GameResult> {
        self.result
    }
}

impl fmt::Display for TreasureHunt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tile) in self.tiles.iter().enumerate() {
            if tile.flipped {
                write!(f, " {} ", tile.treasure.symbol())?;
            } else {
                write!(f, " {i:>2} ")?;
            }
            if (i + 1) % COLUMNS == 0 {
                writeln!(f)?;
            }
        }
        if self.tiles.len() % COLUMNS != 0 {
            writeln!(f)?;
        }
        if let Some((_, treasure)) = self.last_flip() {
            writeln!(f, "{} {:+}", treasure.effect(), treasure.points())?;
        }
        writeln!(
            f,
            "Celeste {} / Sally {}",
            self.scores[Player::Celeste],
            self.scores[Player::Sally]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Treasure::*;

    #[test]
    fn test_build_uses_whole_table() {
        let game = TreasureHuntBuilder::new().build(3);

        assert_eq!(game.tiles().len(), 36);
        assert_eq!(game.flipped_count(), 0);
        let crowns = game.tiles().iter().filter(|t| t.treasure == Crown).count();
        assert_eq!(crowns, 2);
        assert_eq!(game.scores(), PlayerMap::with_value(0));
    }

    #[test]
    fn test_custom_counts() {
        let game = TreasureHuntBuilder::new()
            .count(Empty, 0)
            .count(Bomb, 10)
            .build(3);

        assert_eq!(game.tiles().len(), 30);
        assert!(game.tiles().iter().all(|t| t.treasure != Empty));
    }

    #[test]
    fn test_flip_scores_and_locks() {
        let mut game = TreasureHunt::with_layout(vec![Crown, Bomb, Apple]);

        let transition = game.apply(&Flip(0)).unwrap();
        assert_eq!(transition.step, Step::Deferred(Delay::TileReveal));
        assert_eq!(transition.cues.as_slice(), &[Cue::Reward]);
        assert_eq!(game.scores()[Player::Celeste], 5);
        assert_eq!(game.last_flip(), Some((0, Crown)));

        let before = game.clone();
        assert_eq!(game.apply(&Flip(1)), Err(Rejection::Locked));
        assert_eq!(game, before);

        game.resolve().unwrap();
        assert_eq!(game.current_player(), Player::Sally);
    }

    #[test]
    fn test_bomb_can_go_negative() {
        let mut game = TreasureHunt::with_layout(vec![Empty, Bomb, Apple]);
        game.apply(&Flip(0)).unwrap();
        game.resolve().unwrap();

        let transition = game.apply(&Flip(1)).unwrap();
        assert_eq!(transition.cues.as_slice(), &[Cue::Penalty]);
        assert_eq!(game.scores()[Player::Sally], -2);
    }

    #[test]
    fn test_flipped_tile_is_rejected() {
        let mut game = TreasureHunt::with_layout(vec![Apple, Apple]);
        game.apply(&Flip(0)).unwrap();
        game.resolve().unwrap();

        assert_eq!(game.apply(&Flip(0)), Err(Rejection::Occupied(0)));
        assert!(matches!(game.apply(&Flip(2)), Err(Rejection::OutOfBounds { .. })));
    }

    #[test]
    fn test_last_tile_ends_game() {
        let mut game = TreasureHunt::with_layout(vec![Star, Diamond]);
        game.apply(&Flip(0)).unwrap();
        game.resolve().unwrap();

        let transition = game.apply(&Flip(1)).unwrap();
        assert_eq!(transition.step, Step::Deferred(Delay::FinalReveal));

        let end = game.resolve().unwrap();
        assert_eq!(end.step, Step::Finished(GameResult::Winner(Player::Sally)));
        assert!(game.is_over());
        assert_eq!(game.resolve(), Err(Rejection::GameOver));
    }

    #[test]
    fn test_equal_scores_draw() {
        let mut game = TreasureHunt::with_layout(vec![Apple, Orange]);
        for i in 0..2 {
            game.apply(&Flip(i)).unwrap();
            game.resolve().unwrap();
        }
        assert_eq!(game.result(), Some(GameResult::Draw));
    }

    #[test]
    #[should_panic(expected = "Board needs at least one tile")]
    fn test_empty_layout_is_refused() {
        TreasureHunt::with_layout(vec![]);
    }

    #[test]
    fn test_resolve_without_flip() {
        let mut game = TreasureHunt::with_layout(vec![Apple]);
        assert_eq!(game.resolve(), Err(Rejection::NothingPending));
    }
}
