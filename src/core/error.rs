//! Error types.
//!
//! Nothing here is fatal. A `Rejection` means the input was ignored and the
//! game did not change; a `CollaboratorError` means an optional presenter or
//! sound board failed and the game carried on without it.

use thiserror::Error;

/// Why an action or `resolve()` call was ignored.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("input is locked while the previous turn resolves")]
    Locked,
    #[error("game already ended, no new moves are accepted")]
    GameOver,
    #[error("cell {0} is already taken")]
    Occupied(usize),
    #[error("position ({row}, {col}) is off the board")]
    OutOfBounds { row: usize, col: usize },
    #[error("number {0} is not on the cards")]
    UnknownNumber(u8),
    #[error("number {0} has already been called")]
    AlreadyCalled(u8),
    #[error("move would not change the board")]
    NoEffect,
    #[error("piece does not fit at ({row}, {col})")]
    DoesNotFit { row: usize, col: usize },
    #[error("a die cannot roll {0}")]
    InvalidRoll(u8),
    #[error("no deferred transition is pending")]
    NothingPending,
}

/// Failure inside an optional collaborator.
#[derive(Error, Debug)]
pub enum CollaboratorError {
    #[error("collaborator is unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failure loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid timing config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        assert_eq!(Rejection::Occupied(4).to_string(), "cell 4 is already taken");
        assert_eq!(
            Rejection::OutOfBounds { row: 9, col: 1 }.to_string(),
            "position (9, 1) is off the board"
        );
        assert_eq!(Rejection::AlreadyCalled(7).to_string(), "number 7 has already been called");
    }

    #[test]
    fn test_collaborator_from_io() {
        let err: CollaboratorError = std::io::Error::other("closed").into();
        assert!(matches!(err, CollaboratorError::Io(_)));
    }
}
