//! Pipe puzzle: rotate pipes until your crossing connects.

mod game;
mod pipe;

pub use game::{find_path, goal, PipePuzzle, PipePuzzleBuilder, Rotate, SIZE};
pub use pipe::{Openings, Pipe, TEMPLATES};
