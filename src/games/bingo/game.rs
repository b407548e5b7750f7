use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::core::{GameRng, Grid, Phase, Player, PlayerMap, Pos, Rejection};
use crate::rules::{Cue, GameResult, Minigame, Step, Transition};

/// Side length of a card.
pub const SIZE: usize = 5;

/// Highest number on a card; cards hold each of `1..=MAX_NUMBER` once.
pub const MAX_NUMBER: u8 = (SIZE * SIZE) as u8;

/// A completable line on a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BingoLine {
    Row(usize),
    Column(usize),
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl BingoLine {
    /// Every line in scan order: rows, columns, diagonals.
    pub fn all() -> impl Iterator<Item = BingoLine> {
        (0..SIZE)
            .map(BingoLine::Row)
            .chain((0..SIZE).map(BingoLine::Column))
            .chain([BingoLine::Diagonal, BingoLine::AntiDiagonal])
    }

    /// Positions covered by this line.
    #[must_use]
    pub fn cells(self) -> [Pos; SIZE] {
        std::array::from_fn(|i| match self {
            BingoLine::Row(r) => (r, i),
            BingoLine::Column(c) => (i, c),
            BingoLine::Diagonal => (i, i),
            BingoLine::AntiDiagonal => (i, SIZE - 1 - i),
        })
    }
}

/// Completed lines, small enough to stay inline.
pub type Lines = SmallVec<[BingoLine; 12]>;

/// Lines on `card` whose five numbers have all been called.
#[must_use]
pub fn bingo_lines(card: &Grid<u8>, called: &FxHashSet<u8>) -> Lines {
    BingoLine::all()
        .filter(|line| line.cells().iter().all(|&pos| called.contains(&card[pos])))
        .collect()
}

/// A fresh card: `1..=25` in uniformly random order.
pub fn random_card(rng: &mut GameRng) -> Grid<u8> {
    let mut numbers: Vec<u8> = (1..=MAX_NUMBER).collect();
    rng.shuffle(&mut numbers);
    Grid::from_fn(SIZE, SIZE, |(r, c)| numbers[r * SIZE + c])
}

/// Call a number; it is marked on both cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Call(pub u8);

impl FromStr for Call {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u8>().map(Call).map_err(|e| e.to_string())
    }
}

/// Two-card bingo: players take turns calling numbers, first to
/// `lines_to_win` completed lines wins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bingo {
    cards: PlayerMap<Grid<u8>>,
    called: FxHashSet<u8>,
    lines: PlayerMap<Lines>,
    lines_to_win: usize,
    current: Player,
    phase: Phase,
    result: Option<GameResult>,
}

/// Builder for creating a `Bingo` game.
pub struct BingoBuilder {
    lines_to_win: usize,
}

impl Default for BingoBuilder {
    fn default() -> Self {
        Self { lines_to_win: 3 }
    }
}

impl BingoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines_to_win(mut self, lines: usize) -> Self {
        assert!((1..=12).contains(&lines), "A card only has 12 lines");
        self.lines_to_win = lines;
        self
    }

    /// Deal two random cards.
    pub fn build(self, seed: u64) -> Bingo {
        let mut rng = GameRng::new(seed);
        let celeste = random_card(&mut rng);
        let sally = random_card(&mut rng);
        self.build_with_cards(celeste, sally)
    }

    /// Use fixed cards.
    pub fn build_with_cards(self, celeste: Grid<u8>, sally: Grid<u8>) -> Bingo {
        Bingo {
            cards: PlayerMap::new(|p| match p {
                Player::Celeste => celeste.clone(),
                Player::Sally => sally.clone(),
            }),
            called: FxHashSet::default(),
            lines: PlayerMap::with_default(),
            lines_to_win: self.lines_to_win,
            current: Player::Celeste,
            phase: Phase::AwaitingInput,
            result: None,
        }
    }
}

impl Bingo {
    #[must_use]
    pub fn card(&self, player: Player) -> &Grid<u8> {
        &self.cards[player]
    }

    /// Completed lines on a player's card.
    #[must_use]
    pub fn lines(&self, player: Player) -> &[BingoLine] {
        &self.lines[player]
    }

    #[must_use]
    pub fn is_called(&self, number: u8) -> bool {
        self.called.contains(&number)
    }

    #[must_use]
    pub fn called_count(&self) -> usize {
        self.called.len()
    }
}

impl Minigame for Bingo {
    type Action = Call;

    fn title(&self) -> &'static str {
        "bingo"
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn current_player(&self) -> Player {
        self.current
    }

    fn scores(&self) -> PlayerMap<i64> {
        self.lines.map(|_, lines| lines.len() as i64)
    }

    fn apply(&mut self, &Call(number): &Call) -> Result<Transition, Rejection> {
        self.phase.check_input()?;
        if !(1..=MAX_NUMBER).contains(&number) {
            return Err(Rejection::UnknownNumber(number));
        }
        if !self.called.insert(number) {
            return Err(Rejection::AlreadyCalled(number));
        }

        let mut transition = Transition::new(Step::Continue).with_cue(Cue::Place);
        for player in Player::all() {
            let lines = bingo_lines(&self.cards[player], &self.called);
            if lines.len() > self.lines[player].len() {
                log::debug!("bingo: {} now has {} lines", player, lines.len());
                transition = transition.with_cue(Cue::Bingo);
            }
            self.lines[player] = lines;
        }

        // Celeste is checked first when both reach the target together.
        if let Some(winner) = Player::all().find(|&p| self.lines[p].len() >= self.lines_to_win) {
            self.phase = Phase::GameOver;
            self.result = Some(GameResult::Winner(winner));
            let mut finished = Transition::finished(GameResult::Winner(winner));
            finished.cues.extend(transition.cues);
            return Ok(finished);
        }

        self.current = self.current.other();
        Ok(transition)
    }

    fn result(&self) -> Option<GameResult> {
        self.result
    }
}

impl fmt::Display for Bingo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<20}    {}", "Celeste", "Sally")?;
        for row in 0..SIZE {
            for (i, player) in Player::all().enumerate() {
                if i > 0 {
                    write!(f, "    ")?;
                }
                for &n in self.cards[player].row(row) {
                    if self.is_called(n) {
                        write!(f, " [] ")?;
                    } else {
                        write!(f, "{n:>3} ")?;
                    }
                }
            }
            writeln!(f)?;
        }
        writeln!(
            f,
            "lines: Celeste {} / Sally {} (need {})",
            self.lines[Player::Celeste].len(),
            self.lines[Player::Sally].len(),
            self.lines_to_win
        )
    }
}
