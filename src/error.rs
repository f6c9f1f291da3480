//! Error types for Torre
//!
//! The search itself never fails; these cover the position binding
//! (FEN input, caller-supplied moves, undo) and the asynchronous adapter's
//! result channel.

use thiserror::Error;

/// Errors raised by the [`ChessGame`](crate::game::ChessGame) binding
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// FEN string could not be parsed
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// FEN parsed but does not describe a legal chess position
    #[error("illegal position: {0}")]
    IllegalPosition(String),

    /// Move text is malformed or not legal in the current position
    #[error("illegal move {uci} at ply {ply}")]
    IllegalMove { uci: String, ply: usize },

    /// Undo requested with an empty move history
    #[error("no move to undo")]
    NothingToUndo,
}

/// Errors observed when collecting the result of a background search
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The worker dropped its end of the result channel without publishing
    #[error("search worker exited without publishing a result")]
    WorkerDisconnected,

    /// The search was cancelled before it finished
    #[error("search was cancelled")]
    Cancelled,

    /// No result arrived within the allotted wait
    #[error("timed out waiting for search result")]
    Timeout,
}

pub type GameResult<T> = Result<T, GameError>;
