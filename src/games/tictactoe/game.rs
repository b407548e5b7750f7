//! Tic-tac-toe rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::{Phase, Player, PlayerMap, Rejection};
use crate::rules::{Cue, GameResult, Minigame, Step, Transition};

/// Content of one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    #[default]
    Empty,
    /// Celeste's mark.
    O,
    /// Sally's mark.
    X,
}

impl Mark {
    /// The mark a player draws.
    #[must_use]
    pub const fn of(player: Player) -> Self {
        match player {
            Player::Celeste => Mark::O,
            Player::Sally => Mark::X,
        }
    }

    /// Who drew this mark.
    #[must_use]
    pub const fn owner(self) -> Option<Player> {
        match self {
            Mark::Empty => None,
            Mark::O => Some(Player::Celeste),
            Mark::X => Some(Player::Sally),
        }
    }
}

/// All winning lines: rows, columns, then diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// First complete line on the board, in `LINES` order.
#[must_use]
pub fn winning_line(board: &[Mark; 9]) -> Option<[usize; 3]> {
    LINES.iter().copied().find(|&[a, b, c]| {
        board[a] != Mark::Empty && board[a] == board[b] && board[b] == board[c]
    })
}

/// Place the current player's mark on cell `0..9` (row-major).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Place(pub usize);

impl FromStr for Place {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let index = s.trim().parse::<usize>().map_err(|e| e.to_string())?;
        Ok(Place(index))
    }
}

/// A game of tic-tac-toe. Celeste (O) moves first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToe {
    board: [Mark; 9],
    current: Player,
    phase: Phase,
    winning_line: Option<[usize; 3]>,
    result: Option<GameResult>,
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToe {
    /// Empty board, Celeste to move.
    pub fn new() -> Self {
        Self {
            board: [Mark::Empty; 9],
            current: Player::Celeste,
            phase: Phase::AwaitingInput,
            winning_line: None,
            result: None,
        }
    }

    /// Start from an arbitrary position.
    ///
    /// A position that is already won or full starts in `GameOver`.
    pub fn from_board(board: [Mark; 9], to_move: Player) -> Self {
        let mut game = Self {
            board,
            current: to_move,
            ..Self::new()
        };
        if let Some(line) = winning_line(&board) {
            game.winning_line = Some(line);
            game.result = board[line[0]].owner().map(GameResult::Winner);
            game.phase = Phase::GameOver;
        } else if !board.contains(&Mark::Empty) {
            game.result = Some(GameResult::Draw);
            game.phase = Phase::GameOver;
        }
        game
    }

    #[must_use]
    pub fn board(&self) -> &[Mark; 9] {
        &self.board
    }

    /// The completed line, once somebody has won.
    #[must_use]
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        self.winning_line
    }
}

impl Minigame for TicTacToe {
    type Action = Place;

    fn title(&self) -> &'static str {
        "tic-tac-toe"
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

    fn apply(&mut self, &Place(index): &Place) -> Result<Transition, Rejection> {
        self.phase.check_input()?;
        match self.board.get(index) {
            None => return Err(Rejection::OutOfBounds { row: index / 3, col: index % 3 }),
            Some(Mark::Empty) => {}
            Some(_) => return Err(Rejection::Occupied(index)),
        }

        self.board[index] = Mark::of(self.current);

        if let Some(line) = winning_line(&self.board) {
            self.winning_line = Some(line);
            return Ok(self.finish(GameResult::Winner(self.current)));
        }

        if !self.board.contains(&Mark::Empty) {
            return Ok(self.finish(GameResult::Draw));
        }

        self.current = self.current.other();
        Ok(Transition::new(Step::Continue).with_cue(Cue::Place))
    }

    fn result(&self) -> Option<GameResult> {
        self.result
    }
}

impl TicTacToe {
    fn finish(&mut self, result: GameResult) -> Transition {
        self.phase = Phase::GameOver;
        self.result = Some(result);
        Transition::finished(result)
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f, "---+---+---")?;
            }
            let cells: Vec<String> = (0..3)
                .map(|col| {
                    let index = row * 3 + col;
                    let highlight = self.winning_line.is_some_and(|line| line.contains(&index));
                    let symbol = match self.board[index] {
                        Mark::Empty => index.to_string(),
                        Mark::O => "O".to_string(),
                        Mark::X => "X".to_string(),
                    };
                    if highlight {
                        format!("*{symbol}*")
                    } else {
                        format!(" {symbol} ")
                    }
                })
                .collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}
