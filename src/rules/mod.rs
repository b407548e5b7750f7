//! The shared turn-based state machine.
//!
//! Games implement `Minigame` to define:
//! - Which input is accepted, and when
//! - How input changes the state
//! - Deferred follow-up transitions
//! - Win/draw conditions
//!
//! Rendering and timing live outside; see `session`.

pub mod engine;

pub use engine::{Cue, GameResult, Minigame, Step, Transition};
