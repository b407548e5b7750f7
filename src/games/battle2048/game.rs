use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::{Direction, GameRng, Grid, Phase, Player, PlayerMap, Rejection};
use crate::rules::{Cue, GameResult, Minigame, Step, Transition};

use super::board::{can_move, max_tile, slide, spawn_tile, Board, SIZE};

/// Slide the current player's board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slide(pub Direction);

impl FromStr for Slide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dir = match s.trim().to_ascii_lowercase().as_str() {
            "w" | "u" | "up" => Direction::Up,
            "d" | "r" | "right" => Direction::Right,
            "s" | "down" => Direction::Down,
            "a" | "l" | "left" => Direction::Left,
            other => return Err(format!("unknown direction {other:?}")),
        };
        Ok(Slide(dir))
    }
}

/// Two private 2048 boards played in alternation. When neither player can
/// move, the higher tile wins, then the higher score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battle2048 {
    boards: PlayerMap<Board>,
    scores: PlayerMap<u32>,
    current: Player,
    phase: Phase,
    result: Option<GameResult>,
    #[serde(skip, default = "GameRng::from_entropy")]
    rng: GameRng,
}

/// Builder for creating a `Battle2048` game.
pub struct Battle2048Builder {
    starting_tiles: usize,
}

impl Default for Battle2048Builder {
    fn default() -> Self {
        Self { starting_tiles: 2 }
    }
}

impl Battle2048Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tiles dropped on each board before the first move.
    pub fn starting_tiles(mut self, count: usize) -> Self {
        assert!(count <= SIZE * SIZE, "More starting tiles than cells");
        self.starting_tiles = count;
        self
    }

    pub fn build(self, seed: u64) -> Battle2048 {
        let mut rng = GameRng::new(seed);
        let boards = PlayerMap::new(|_| {
            let mut board = Grid::filled(SIZE, SIZE, 0);
            for _ in 0..self.starting_tiles {
                spawn_tile(&mut board, &mut rng);
            }
            board
        });
        Battle2048::from_parts(boards, rng)
    }
}

impl Battle2048 {
    /// Start from fixed boards; later spawns draw from `seed`.
    pub fn with_boards(celeste: Board, sally: Board, seed: u64) -> Self {
        let boards = PlayerMap::new(|p| match p {
            Player::Celeste => celeste.clone(),
            Player::Sally => sally.clone(),
        });
        Self::from_parts(boards, GameRng::new(seed))
    }

    fn from_parts(boards: PlayerMap<Board>, rng: GameRng) -> Self {
        let mut game = Self {
            boards,
            scores: PlayerMap::with_value(0),
            current: Player::Celeste,
            phase: Phase::AwaitingInput,
            result: None,
            rng,
        };
        if !can_move(&game.boards[Player::Celeste]) {
            if can_move(&game.boards[Player::Sally]) {
                game.current = Player::Sally;
            } else {
                game.finish();
            }
        }
        game
    }

    #[must_use]
    pub fn board(&self, player: Player) -> &Board {
        &self.boards[player]
    }

    #[must_use]
    pub fn max_tile(&self, player: Player) -> u32 {
        max_tile(&self.boards[player])
    }

    /// Whether `player` still has a move.
    #[must_use]
    pub fn can_move(&self, player: Player) -> bool {
        can_move(&self.boards[player])
    }

    fn finish(&mut self) -> GameResult {
        let standing = |p: Player| (self.max_tile(p), self.scores[p]);
        let result = GameResult::by_score(standing(Player::Celeste), standing(Player::Sally));
        self.phase = Phase::GameOver;
        self.result = Some(result);
        result
    }
}

impl Minigame for Battle2048 {
    type Action = Slide;

    fn title(&self) -> &'static str {
        "2048 battle"
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

    fn apply(&mut self, &Slide(dir): &Slide) -> Result<Transition, Rejection> {
        self.phase.check_input()?;
        let slid = slide(&self.boards[self.current], dir);
        if !slid.moved {
            return Err(Rejection::NoEffect);
        }

        let player = self.current;
        self.boards[player] = slid.board;
        self.scores[player] += slid.score;
        spawn_tile(&mut self.boards[player], &mut self.rng);

        let mut transition = Transition::new(Step::Continue).with_cue(Cue::Move);
        if slid.score > 0 {
            transition = transition.with_cue(Cue::Merge);
        }

        let other = player.other();
        if self.can_move(other) {
            self.current = other;
        } else if !self.can_move(player) {
            log::debug!("2048 battle: both boards are stuck");
            let result = self.finish();
            let mut finished = Transition::finished(result);
            finished.cues.extend(transition.cues);
            return Ok(finished);
        }
        Ok(transition)
    }

    fn result(&self) -> Option<GameResult> {
        self.result
    }
}

impl fmt::Display for Battle2048 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for player in Player::all() {
            writeln!(f, "{player}: score {}, best {}", self.scores[player], self.max_tile(player))?;
        }
        for row in 0..SIZE {
            for (i, player) in Player::all().enumerate() {
                if i > 0 {
                    write!(f, "   |")?;
                }
                for &v in self.boards[player].row(row) {
                    if v == 0 {
                        write!(f, "{:>6}", ".")?;
                    } else {
                        write!(f, "{v:>6}")?;
                    }
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
