//! Torre: picks a chess move for an automated player.
//!
//! A depth-limited negamax search with alpha-beta pruning over any
//! [`GameState`](game::GameState), scored at the horizon by a material plus
//! piece-square [`Evaluator`](eval::Evaluator). Searches can run inline or on
//! a worker thread that the caller polls.

pub mod error;
pub mod eval;
pub mod game;
pub mod search;

pub use error::{GameError, SearchError};
pub use eval::{Evaluator, MaterialEvaluator, PieceSquareEvaluator, Score, CHECKMATE, STALEMATE};
pub use game::{ChessGame, GameState, Grid};
pub use search::{MoveOrder, MoveSelector, SearchOutcome, SearchParams, SearchTask};
