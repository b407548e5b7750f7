use serde::{Deserialize, Serialize};

use crate::core::{GameRng, Grid, Pos};

/// The seven tetrominoes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tetromino {
    I,
    O,
    T,
    S,
    Z,
    L,
    J,
}

impl Tetromino {
    pub const ALL: [Tetromino; 7] = [
        Tetromino::I,
        Tetromino::O,
        Tetromino::T,
        Tetromino::S,
        Tetromino::Z,
        Tetromino::L,
        Tetromino::J,
    ];

    /// Uniformly random kind.
    pub fn random(rng: &mut GameRng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Spawn orientation.
    #[must_use]
    pub fn piece(self) -> Piece {
        let rows: &[&str] = match self {
            Tetromino::I => &["####"],
            Tetromino::O => &["##", "##"],
            Tetromino::T => &[".#.", "###"],
            Tetromino::S => &[".##", "##."],
            Tetromino::Z => &["##.", ".##"],
            Tetromino::L => &["#.", "#.", "##"],
            Tetromino::J => &[".#", ".#", "##"],
        };
        Piece {
            kind: self,
            shape: Grid::from_fn(rows.len(), rows[0].len(), |(r, c)| rows[r].as_bytes()[c] == b'#'),
        }
    }
}

/// A tetromino in some orientation, anchored at its top-left corner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    kind: Tetromino,
    shape: Grid<bool>,
}

impl Piece {
    #[must_use]
    pub fn kind(&self) -> Tetromino {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &Grid<bool> {
        &self.shape
    }

    /// Turned 90 degrees clockwise.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let rows = self.shape.rows();
        // (r, c) moves to (c, rows - 1 - r).
        let shape = Grid::from_fn(self.shape.cols(), rows, |(r, c)| self.shape[(rows - 1 - c, r)]);
        Self { kind: self.kind, shape }
    }

    /// Filled offsets from the anchor.
    pub fn blocks(&self) -> impl Iterator<Item = Pos> + '_ {
        self.shape.positions().filter(|&pos| self.shape[pos])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_piece_has_four_blocks() {
        for kind in Tetromino::ALL {
            assert_eq!(kind.piece().blocks().count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn test_rotate_t() {
        // .#.      #.
        // ###  ->  ##
        //          #.
        let rotated = Tetromino::T.piece().rotated();
        assert_eq!(rotated.shape().rows(), 3);
        assert_eq!(rotated.shape().cols(), 2);
        let blocks: Vec<Pos> = rotated.blocks().collect();
        assert_eq!(blocks, vec![(0, 0), (1, 0), (1, 1), (2, 0)]);
    }

    #[test]
    fn test_rotate_i_is_vertical() {
        let rotated = Tetromino::I.piece().rotated();
        assert_eq!((rotated.shape().rows(), rotated.shape().cols()), (4, 1));
    }

    #[test]
    fn test_four_rotations_restore() {
        for kind in Tetromino::ALL {
            let piece = kind.piece();
            let back = piece.rotated().rotated().rotated().rotated();
            assert_eq!(back, piece);
        }
    }
}
