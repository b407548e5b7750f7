//! Player identification and per-player data storage.
//!
//! ## Player
//!
//! Every game is played by the same two characters: Celeste the owl, who
//! always moves first, and Sally the squirrel.
//!
//! ## PlayerMap
//!
//! Fixed two-slot storage indexed by `Player` (scores, boards, positions).

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two seats at the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Player 1, the owl. Always opens the game.
    Celeste,
    /// Player 2, the squirrel.
    Sally,
}

impl Player {
    /// Both players in turn order.
    pub const ALL: [Player; 2] = [Player::Celeste, Player::Sally];

    /// The opponent.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Player::Celeste => Player::Sally,
            Player::Sally => Player::Celeste,
        }
    }

    /// 0-based seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::Celeste => 0,
            Player::Sally => 1,
        }
    }

    /// Iterate over both players in turn order.
    ///
    /// ```
    /// use parlor_games::core::Player;
    ///
    /// let players: Vec<_> = Player::all().collect();
    /// assert_eq!(players, vec![Player::Celeste, Player::Sally]);
    /// ```
    pub fn all() -> impl Iterator<Item = Player> {
        Self::ALL.into_iter()
    }

    /// Identifier handed to the victory presenter.
    #[must_use]
    pub const fn victory_id(self) -> &'static str {
        match self {
            Player::Celeste => "celeste",
            Player::Sally => "sally",
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Celeste => write!(f, "Celeste"),
            Player::Sally => write!(f, "Sally"),
        }
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use parlor_games::core::{Player, PlayerMap};
///
/// let mut scores: PlayerMap<i32> = PlayerMap::with_value(0);
/// scores[Player::Sally] += 3;
/// assert_eq!(scores[Player::Celeste], 0);
/// assert_eq!(scores[Player::Sally], 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(mut factory: impl FnMut(Player) -> T) -> Self {
        Self {
            data: [factory(Player::Celeste), factory(Player::Sally)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a map with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: Player) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: Player) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (Player, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Player, &T)> {
        Player::all().zip(self.data.iter())
    }

    /// Build a new map by applying `f` to each entry.
    pub fn map<U>(&self, mut f: impl FnMut(Player, &T) -> U) -> PlayerMap<U> {
        PlayerMap::new(|p| f(p, self.get(p)))
    }
}

impl<T> Index<Player> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: Player) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<Player> for PlayerMap<T> {
    fn index_mut(&mut self, player: Player) -> &mut Self::Output {
        self.get_mut(player)
    }
}
