use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::core::{Delay, GameRng, Grid, Phase, Player, PlayerMap, Rejection};
use crate::rules::{Cue, GameResult, Minigame, Step, Transition};

use super::tetromino::{Piece, Tetromino};

/// Side length of the shared board.
pub const SIZE: usize = 8;

/// Points for each cleared row or column.
pub const POINTS_PER_LINE: u32 = 10;

/// Points lost for passing, floored at zero.
pub const PASS_PENALTY: u32 = 5;

/// Shared board; each filled cell remembers who placed it.
pub type Board = Grid<Option<Player>>;

/// Player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockAction {
    /// Turn the current piece clockwise. Does not end the turn.
    Rotate,
    /// Drop the piece with its top-left corner at `(row, col)`.
    Place { row: usize, col: usize },
    /// Give up the turn for a penalty.
    Pass,
}

impl FromStr for BlockAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "r" | "rotate" => return Ok(BlockAction::Rotate),
            "p" | "pass" => return Ok(BlockAction::Pass),
            _ => {}
        }
        let mut parts = s.split_whitespace().map(str::parse::<usize>);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(Ok(row)), Some(Ok(col)), None) => Ok(BlockAction::Place { row, col }),
            _ => Err(format!("expected `rotate`, `pass` or `<row> <col>`, got {s:?}")),
        }
    }
}

/// Rows and columns that are completely filled.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullLines {
    pub rows: SmallVec<[usize; SIZE]>,
    pub cols: SmallVec<[usize; SIZE]>,
}

impl FullLines {
    /// Scan `board` for full lines.
    pub fn find(board: &Board) -> Self {
        Self {
            rows: (0..board.rows())
                .filter(|&r| board.row(r).iter().all(Option::is_some))
                .collect(),
            cols: (0..board.cols())
                .filter(|&c| board.column(c).all(Option::is_some))
                .collect(),
        }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.rows.len() + self.cols.len()
    }

    /// Empty every cell on a full line. Rows and columns clear together.
    pub fn clear(&self, board: &mut Board) {
        for pos in board.positions().collect::<Vec<_>>() {
            if self.rows.contains(&pos.0) || self.cols.contains(&pos.1) {
                board[pos] = None;
            }
        }
    }
}

/// Whether `piece` fits with its anchor at `(row, col)`.
#[must_use]
pub fn can_place(board: &Board, piece: &Piece, row: usize, col: usize) -> bool {
    piece
        .blocks()
        .all(|(r, c)| board.get((row + r, col + c)).is_some_and(Option::is_none))
}

/// Shared-board block placement: clear rows and columns to score. Two
/// passes in a row end the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockPuzzle {
    board: Board,
    piece: Piece,
    scores: PlayerMap<u32>,
    consecutive_passes: u32,
    last_clear: FullLines,
    current: Player,
    phase: Phase,
    result: Option<GameResult>,
    #[serde(skip, default = "GameRng::from_entropy")]
    rng: GameRng,
}

/// Builder for creating a `BlockPuzzle` game.
#[derive(Default)]
pub struct BlockPuzzleBuilder {
    first_piece: Option<Tetromino>,
}

impl BlockPuzzleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the first piece instead of drawing it.
    pub fn first_piece(mut self, kind: Tetromino) -> Self {
        self.first_piece = Some(kind);
        self
    }

    pub fn build(self, seed: u64) -> BlockPuzzle {
        let mut rng = GameRng::new(seed);
        let kind = self.first_piece.unwrap_or_else(|| Tetromino::random(&mut rng));
        BlockPuzzle {
            board: Grid::filled(SIZE, SIZE, None),
            piece: kind.piece(),
            scores: PlayerMap::with_value(0),
            consecutive_passes: 0,
            last_clear: FullLines::default(),
            current: Player::Celeste,
            phase: Phase::AwaitingInput,
            result: None,
            rng,
        }
    }
}

impl BlockPuzzle {
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The piece the current player holds.
    #[must_use]
    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    /// Lines cleared by the last placement.
    #[must_use]
    pub fn last_clear(&self) -> &FullLines {
        &self.last_clear
    }

    #[must_use]
    pub fn consecutive_passes(&self) -> u32 {
        self.consecutive_passes
    }

    /// Whether the current piece fits anywhere in its current orientation.
    #[must_use]
    pub fn has_valid_placement(&self) -> bool {
        self.board
            .positions()
            .any(|(row, col)| can_place(&self.board, &self.piece, row, col))
    }

    /// Replace the board, e.g. to set up a position.
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    /// Replace the current piece.
    pub fn set_piece(&mut self, kind: Tetromino) {
        self.piece = kind.piece();
    }

    fn place(&mut self, row: usize, col: usize) -> Result<Transition, Rejection> {
        if !self.board.contains((row, col)) {
            return Err(Rejection::OutOfBounds { row, col });
        }
        if !can_place(&self.board, &self.piece, row, col) {
            return Err(Rejection::DoesNotFit { row, col });
        }

        let blocks: Vec<_> = self.piece.blocks().collect();
        for (r, c) in blocks {
            self.board[(row + r, col + c)] = Some(self.current);
        }
        self.consecutive_passes = 0;

        let full = FullLines::find(&self.board);
        let lines = full.count();
        full.clear(&mut self.board);
        self.last_clear = full;
        self.phase = Phase::Resolving;

        let transition = Transition::new(Step::Deferred(if lines > 0 {
            Delay::LinesCleared
        } else {
            Delay::PiecePlaced
        }))
        .with_cue(Cue::Place);
        if lines == 0 {
            return Ok(transition);
        }
        let points = POINTS_PER_LINE * lines as u32;
        self.scores[self.current] += points;
        log::debug!("block puzzle: {} cleared {} lines for {}", self.current, lines, points);
        Ok(transition.with_cue(Cue::Clear))
    }

    fn pass(&mut self) -> Transition {
        let score = &mut self.scores[self.current];
        *score = score.saturating_sub(PASS_PENALTY);
        self.consecutive_passes += 1;
        self.last_clear = FullLines::default();
        self.phase = Phase::Resolving;
        Transition::new(Step::Deferred(Delay::PassPenalty)).with_cue(Cue::Pass)
    }
}

impl Minigame for BlockPuzzle {
    type Action = BlockAction;

    fn title(&self) -> &'static str {
        "block puzzle"
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

    fn apply(&mut self, action: &BlockAction) -> Result<Transition, Rejection> {
        self.phase.check_input()?;
        match *action {
            BlockAction::Rotate => {
                self.piece = self.piece.rotated();
                Ok(Transition::new(Step::Continue).with_cue(Cue::Rotate))
            }
            BlockAction::Place { row, col } => self.place(row, col),
            BlockAction::Pass => Ok(self.pass()),
        }
    }

    fn resolve(&mut self) -> Result<Transition, Rejection> {
        self.phase.check_resolve()?;
        if self.consecutive_passes >= 2 {
            let result = GameResult::by_score(self.scores[Player::Celeste], self.scores[Player::Sally]);
            self.phase = Phase::GameOver;
            self.result = Some(result);
            return Ok(Transition::finished(result));
        }
        self.current = self.current.other();
        self.piece = Tetromino::random(&mut self.rng).piece();
        self.phase = Phase::AwaitingInput;
        Ok(Transition::new(Step::Continue))
    }

    fn result(&self) -> Option<GameResult> {
        self.result
    }
}

impl fmt::Display for BlockPuzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..SIZE {
            write!(f, "{col}")?;
        }
        writeln!(f)?;
        for row in 0..SIZE {
            write!(f, "{row:>2} ")?;
            for cell in self.board.row(row) {
                let symbol = match cell {
                    None => '.',
                    Some(Player::Celeste) => 'C',
                    Some(Player::Sally) => 'S',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "piece {:?}:", self.piece.kind())?;
        let shape = self.piece.shape();
        for row in 0..shape.rows() {
            let line: String = shape.row(row).iter().map(|&b| if b { '#' } else { '.' }).collect();
            writeln!(f, "  {line}")?;
        }
        if !self.has_valid_placement() {
            writeln!(f, "no room for this piece, rotate or pass")?;
        }
        writeln!(
            f,
            "Celeste {} / Sally {}",
            self.scores[Player::Celeste],
            self.scores[Player::Sally]
        )
    }
}
