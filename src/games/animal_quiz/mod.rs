//! Animal quiz: alternate true/false questions, one point per right answer.

mod game;
mod questions;

pub use game::{AnimalQuiz, AnimalQuizBuilder, Answer, Feedback};
pub use questions::{Question, QUESTIONS};
