use serde::{Deserialize, Serialize};

/// What can be hiding under a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Treasure {
    Apple,
    Orange,
    Star,
    Diamond,
    Crown,
    Bomb,
    Empty,
}

impl Treasure {
    pub const ALL: [Treasure; 7] = [
        Treasure::Apple,
        Treasure::Orange,
        Treasure::Star,
        Treasure::Diamond,
        Treasure::Crown,
        Treasure::Bomb,
        Treasure::Empty,
    ];

    /// Score change for the player who uncovers it.
    #[must_use]
    pub const fn points(self) -> i32 {
        match self {
            Treasure::Apple | Treasure::Orange => 1,
            Treasure::Star => 2,
            Treasure::Diamond => 3,
            Treasure::Crown => 5,
            Treasure::Bomb => -2,
            Treasure::Empty => 0,
        }
    }

    /// How many of each are hidden on a standard board.
    #[must_use]
    pub const fn default_count(self) -> usize {
        match self {
            Treasure::Apple => 6,
            Treasure::Orange => 5,
            Treasure::Star => 4,
            Treasure::Diamond => 3,
            Treasure::Crown => 2,
            Treasure::Bomb => 4,
            Treasure::Empty => 12,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Treasure::Apple => "🍎",
            Treasure::Orange => "🍊",
            Treasure::Star => "⭐",
            Treasure::Diamond => "💎",
            Treasure::Crown => "👑",
            Treasure::Bomb => "💣",
            Treasure::Empty => "··",
        }
    }

    /// Flavour line shown when the tile turns over.
    #[must_use]
    pub const fn effect(self) -> &'static str {
        match self {
            Treasure::Apple => "Yummy!",
            Treasure::Orange => "Zesty!",
            Treasure::Star => "Sparkle!",
            Treasure::Diamond => "Shiny!",
            Treasure::Crown => "Jackpot!",
            Treasure::Bomb => "Boom!",
            Treasure::Empty => "Nothing...",
        }
    }
}
