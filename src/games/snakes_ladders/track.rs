//! The 100-cell track and where snakes and ladders lead.

use serde::{Deserialize, Serialize};

/// Last cell; landing here exactly wins.
pub const FINISH: u8 = 100;

/// Cells per row of the printed board.
pub const ROW_LEN: u8 = 10;

/// Snake heads and where they drop you.
pub const SNAKES: [(u8, u8); 6] = [(16, 6), (47, 26), (49, 11), (56, 53), (62, 19), (87, 24)];

/// Ladder feet and where they lift you.
pub const LADDERS: [(u8, u8); 6] = [(2, 38), (7, 14), (8, 31), (15, 26), (28, 84), (51, 67)];

/// A snake or ladder taken after landing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Jump {
    Snake { from: u8, to: u8 },
    Ladder { from: u8, to: u8 },
}

impl Jump {
    /// Cell the token ends on.
    #[must_use]
    pub const fn to(self) -> u8 {
        match self {
            Jump::Snake { to, .. } | Jump::Ladder { to, .. } => to,
        }
    }
}

/// The snake or ladder starting at `cell`. Snakes are checked first.
#[must_use]
pub fn jump_from(cell: u8) -> Option<Jump> {
    let lookup = |table: &[(u8, u8)]| table.iter().find(|&&(from, _)| from == cell).map(|&(_, to)| to);
    lookup(&SNAKES[..])
        .map(|to| Jump::Snake { from: cell, to })
        .or_else(|| lookup(&LADDERS[..]).map(|to| Jump::Ladder { from: cell, to }))
}

/// Cell number at `(row, col)`, row 0 at the bottom.
///
/// Rows snake back and forth: even rows count left to right, odd rows
/// right to left.
#[must_use]
pub const fn cell_at(row: u8, col: u8) -> u8 {
    if row % 2 == 0 {
        row * ROW_LEN + col + 1
    } else {
        row * ROW_LEN + (ROW_LEN - 1 - col) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_numbering() {
        assert_eq!(cell_at(0, 0), 1);
        assert_eq!(cell_at(0, 9), 10);
        assert_eq!(cell_at(1, 9), 11);
        assert_eq!(cell_at(1, 0), 20);
        assert_eq!(cell_at(9, 0), 100);
        assert_eq!(cell_at(9, 9), 91);
    }

    #[test]
    fn test_every_cell_numbered_once() {
        let mut seen = [false; FINISH as usize];
        for row in 0..ROW_LEN {
            for col in 0..ROW_LEN {
                let cell = cell_at(row, col) as usize;
                assert!(!seen[cell - 1]);
                seen[cell - 1] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_jumps() {
        assert_eq!(jump_from(16), Some(Jump::Snake { from: 16, to: 6 }));
        assert_eq!(jump_from(28), Some(Jump::Ladder { from: 28, to: 84 }));
        assert_eq!(jump_from(50), None);
        assert_eq!(jump_from(FINISH), None);
    }

    #[test]
    fn test_snakes_go_down_and_ladders_up() {
        assert!(SNAKES.iter().all(|&(from, to)| to < from));
        assert!(LADDERS.iter().all(|&(from, to)| to > from));
    }
}
