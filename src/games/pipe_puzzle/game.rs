use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use crate::core::{Direction, GameRng, Grid, Phase, Player, PlayerMap, Pos, Rejection};
use crate::rules::{Cue, GameResult, Minigame, Step, Transition};

use super::pipe::{Openings, Pipe, TEMPLATES};

/// Side length of the board.
pub const SIZE: usize = 6;

/// Start and end cell a player must connect.
///
/// Celeste crosses the middle row left to right, Sally the middle column
/// top to bottom.
#[must_use]
pub const fn goal(player: Player) -> (Pos, Pos) {
    match player {
        Player::Celeste => ((2, 0), (2, SIZE - 1)),
        Player::Sally => ((0, 2), (SIZE - 1, 2)),
    }
}

/// Shortest chain of connected pipes from `from` to `to`.
///
/// Two neighbours connect only when each opens toward the other.
#[must_use]
pub fn find_path(board: &Grid<Pipe>, from: Pos, to: Pos) -> Option<Vec<Pos>> {
    if !board.contains(from) || !board.contains(to) {
        return None;
    }
    let mut came_from: FxHashMap<Pos, Pos> = FxHashMap::default();
    came_from.insert(from, from);
    let mut queue = VecDeque::from([from]);

    while let Some(pos) = queue.pop_front() {
        if pos == to {
            let mut path = vec![pos];
            let mut at = pos;
            while at != from {
                at = came_from[&at];
                path.push(at);
            }
            path.reverse();
            return Some(path);
        }
        for dir in Direction::ALL {
            if !board[pos].opens(dir) {
                continue;
            }
            let Some(next) = board.neighbor(pos, dir) else {
                continue;
            };
            if came_from.contains_key(&next) || !board[next].opens(dir.opposite()) {
                continue;
            }
            came_from.insert(next, pos);
            queue.push_back(next);
        }
    }
    None
}

/// Turn the pipe at `(row, col)` a quarter clockwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rotate {
    pub row: usize,
    pub col: usize,
}

impl FromStr for Rotate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace().map(str::parse::<usize>);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(Ok(row)), Some(Ok(col)), None) => Ok(Rotate { row, col }),
            _ => Err(format!("expected `<row> <col>`, got {:?}", s.trim())),
        }
    }
}

/// Players take turns rotating any pipe; whoever completes their own
/// crossing on their turn wins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipePuzzle {
    board: Grid<Pipe>,
    current: Player,
    phase: Phase,
    winning_path: Option<Vec<Pos>>,
    result: Option<GameResult>,
}

/// Builder for creating a `PipePuzzle` game.
#[derive(Default)]
pub struct PipePuzzleBuilder;

impl PipePuzzleBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Fill the board with uniformly drawn templates.
    pub fn build(self, seed: u64) -> PipePuzzle {
        let mut rng = GameRng::new(seed);
        let board = Grid::from_fn(SIZE, SIZE, |_| TEMPLATES[rng.gen_range(0..TEMPLATES.len())]);
        PipePuzzle::with_board(board)
    }
}

impl PipePuzzle {
    /// Start from fixed openings, none of them turned yet.
    ///
    /// # Panics
    ///
    /// Panics if `openings` is not 6x6.
    pub fn with_board(openings: Grid<Openings>) -> Self {
        assert!(
            openings.rows() == SIZE && openings.cols() == SIZE,
            "Pipe board must be {SIZE}x{SIZE}"
        );
        Self {
            board: Grid::from_fn(SIZE, SIZE, |pos| Pipe::new(openings[pos])),
            current: Player::Celeste,
            phase: Phase::AwaitingInput,
            winning_path: None,
            result: None,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Grid<Pipe> {
        &self.board
    }

    /// Cells of the completed crossing, once somebody has won.
    #[must_use]
    pub fn winning_path(&self) -> Option<&[Pos]> {
        self.winning_path.as_deref()
    }

    /// Path for `player`'s crossing on the current board.
    #[must_use]
    pub fn path_for(&self, player: Player) -> Option<Vec<Pos>> {
        let (from, to) = goal(player);
        find_path(&self.board, from, to)
    }
}

impl Minigame for PipePuzzle {
    type Action = Rotate;

    fn title(&self) -> &'static str {
        "pipe puzzle"
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn current_player(&self) -> Player {
        self.current
    }

    fn scores(&self) -> PlayerMap<i64> {
        PlayerMap::new(|p| i64::from(self.result.is_some_and(|r| r.is_winner(p))))
    }

    fn apply(&mut self, &Rotate { row, col }: &Rotate) -> Result<Transition, Rejection> {
        self.phase.check_input()?;
        let pipe = self.board.get_mut((row, col)).ok_or(Rejection::OutOfBounds { row, col })?;
        pipe.rotate();

        // Only the mover's crossing counts, even if the turn completed the
        // opponent's.
        if let Some(path) = self.path_for(self.current) {
            log::debug!("pipe puzzle: {} connected in {} cells", self.current, path.len());
            let result = GameResult::Winner(self.current);
            self.winning_path = Some(path);
            self.phase = Phase::GameOver;
            self.result = Some(result);
            let mut finished = Transition::finished(result);
            finished.cues.insert(0, Cue::Rotate);
            return Ok(finished);
        }

        self.current = self.current.other();
        Ok(Transition::new(Step::Continue).with_cue(Cue::Rotate))
    }

    fn result(&self) -> Option<GameResult> {
        self.result
    }
}

impl fmt::Display for PipePuzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..SIZE {
            write!(f, "{col}")?;
        }
        writeln!(f)?;
        for row in 0..SIZE {
            write!(f, "{row} ")?;
            for pipe in self.board.row(row) {
                write!(f, "{}", pipe.openings.glyph())?;
            }
            writeln!(f)?;
        }
        if let Some(path) = &self.winning_path {
            let cells: Vec<String> = path.iter().map(|(r, c)| format!("({r},{c})")).collect();
            writeln!(f, "path: {}", cells.join(" "))?;
        }
        Ok(())
    }
}
