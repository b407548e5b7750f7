use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::core::Direction;

bitflags! {
    /// Sides of a cell a pipe opens onto.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Openings: u8 {
        const TOP    = 1;
        const RIGHT  = 1 << 1;
        const BOTTOM = 1 << 2;
        const LEFT   = 1 << 3;
    }
}

impl Openings {
    /// The side facing `dir`.
    #[must_use]
    pub const fn toward(dir: Direction) -> Self {
        match dir {
            Direction::Up => Openings::TOP,
            Direction::Right => Openings::RIGHT,
            Direction::Down => Openings::BOTTOM,
            Direction::Left => Openings::LEFT,
        }
    }

    /// Turned 90 degrees clockwise: top goes right, left goes top.
    #[must_use]
    pub const fn rotate_cw(self) -> Self {
        let bits = self.bits();
        Self::from_bits_truncate((bits << 1) | (bits >> 3))
    }

    /// Box-drawing glyph for the openings.
    #[must_use]
    pub fn glyph(self) -> char {
        const GLYPHS: [char; 16] = [
            ' ', '╵', '╶', '└', '╷', '│', '┌', '├', '╴', '┘', '─', '┴', '┐', '┤', '┬', '┼',
        ];
        GLYPHS[usize::from(self.intersection(Openings::all()).bits())]
    }
}

/// The pipe shapes a board is drawn from: 2 straights, 4 corners, 4 tees
/// and a cross.
pub const TEMPLATES: [Openings; 11] = [
    Openings::TOP.union(Openings::BOTTOM),
    Openings::RIGHT.union(Openings::LEFT),
    Openings::TOP.union(Openings::RIGHT),
    Openings::RIGHT.union(Openings::BOTTOM),
    Openings::BOTTOM.union(Openings::LEFT),
    Openings::LEFT.union(Openings::TOP),
    Openings::TOP.union(Openings::RIGHT).union(Openings::BOTTOM),
    Openings::RIGHT.union(Openings::BOTTOM).union(Openings::LEFT),
    Openings::TOP.union(Openings::BOTTOM).union(Openings::LEFT),
    Openings::TOP.union(Openings::RIGHT).union(Openings::LEFT),
    Openings::all(),
];

/// One cell: its openings and how far it has been turned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipe {
    pub openings: Openings,
    /// Quarter turns applied, `0..4`.
    pub turns: u8,
}

impl Pipe {
    #[must_use]
    pub const fn new(openings: Openings) -> Self {
        Self { openings, turns: 0 }
    }

    pub fn rotate(&mut self) {
        self.openings = self.openings.rotate_cw();
        self.turns = (self.turns + 1) % 4;
    }

    #[must_use]
    pub fn opens(&self, dir: Direction) -> bool {
        self.openings.contains(Openings::toward(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_cw() {
        assert_eq!(Openings::TOP.rotate_cw(), Openings::RIGHT);
        assert_eq!(Openings::LEFT.rotate_cw(), Openings::TOP);
        assert_eq!(TEMPLATES[0].rotate_cw(), TEMPLATES[1]);
        // Top-right corner becomes right-bottom.
        assert_eq!(TEMPLATES[2].rotate_cw(), TEMPLATES[3]);
        assert_eq!(Openings::all().rotate_cw(), Openings::all());
    }

    #[test]
    fn test_four_turns_restore() {
        for template in TEMPLATES {
            let mut pipe = Pipe::new(template);
            for _ in 0..4 {
                pipe.rotate();
            }
            assert_eq!(pipe, Pipe::new(template));
        }
    }

    #[test]
    fn test_templates_have_two_or_more_openings() {
        for template in TEMPLATES {
            assert!(template.bits().count_ones() >= 2);
        }
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(TEMPLATES[0].glyph(), '│');
        assert_eq!(TEMPLATES[1].glyph(), '─');
        assert_eq!(TEMPLATES[2].glyph(), '└');
        assert_eq!(Openings::all().glyph(), '┼');
        assert_eq!(Openings::from_bits_retain(0b0011_0101).glyph(), '│');
    }

    #[test]
    fn test_opens() {
        let pipe = Pipe::new(TEMPLATES[3]);
        assert!(pipe.opens(Direction::Right));
        assert!(pipe.opens(Direction::Down));
        assert!(!pipe.opens(Direction::Up));
    }
}
