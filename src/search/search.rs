//! Negamax search with alpha-beta pruning
//!
//! Fixed-depth, single-threaded, no transposition table. Every node plays
//! its moves on the shared position and takes them back before looking at
//! the next sibling, so the position is left exactly as it was found.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use shakmaty::Color;
use tracing::{debug, trace, warn};

use super::params::SearchParams;
use super::stats::SearchStats;
use crate::eval::{Evaluator, Score, CHECKMATE};
use crate::game::GameState;

/// Shared flag asking a running search to stop
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A token that has not been cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop; every clone sees it
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// A stop has been requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Result of one top-level search
#[derive(Debug, Clone)]
pub struct SearchOutcome<M> {
    /// Best root move; `None` when the root had no moves, the depth was 0,
    /// every move scored as a forced loss, or the search was cancelled
    pub best_move: Option<M>,

    /// Negamax value from the side to move's point of view
    pub score: Score,

    pub stats: SearchStats,

    /// The search stopped early on a cancel request
    pub cancelled: bool,
}

/// +1 when White moves, -1 when Black moves
pub fn turn_multiplier(side: Color) -> Score {
    match side {
        Color::White => 1,
        Color::Black => -1,
    }
}

/// One top-level search over a borrowed position
///
/// The best root move lives in this value, not in global state, so
/// independent searches over independent positions can run side by side.
pub struct Search<'a, G: GameState, E> {
    game: &'a mut G,
    evaluator: &'a E,
    params: SearchParams,
    stats: SearchStats,
    best_root: Option<G::Move>,
    cancel: Option<CancelToken>,
    cancelled: bool,
}

impl<'a, G, E> Search<'a, G, E>
where
    G: GameState,
    E: Evaluator<G>,
{
    pub fn new(game: &'a mut G, evaluator: &'a E, params: SearchParams) -> Self {
        Self {
            game,
            evaluator,
            params,
            stats: SearchStats::new(),
            best_root: None,
            cancel: None,
            cancelled: false,
        }
    }

    /// Stop early when `token` is cancelled
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Search `root_moves` in the order given, to the configured depth
    pub fn run(mut self, root_moves: &[G::Move]) -> SearchOutcome<G::Move> {
        self.stats.reset();
        self.stats.start_timing();

        let turn = turn_multiplier(self.game.side_to_move());
        let score = self.negamax(root_moves, self.params.depth, -CHECKMATE, CHECKMATE, turn);

        self.stats.update_timing();
        self.stats.log_summary();

        let best_move = if self.cancelled { None } else { self.best_root };
        debug!(
            depth = self.params.depth,
            score,
            best = ?best_move,
            cancelled = self.cancelled,
            "search finished"
        );

        SearchOutcome {
            best_move,
            score,
            stats: self.stats,
            cancelled: self.cancelled,
        }
    }

    /// Score of the current position for the side whose multiplier is `turn`
    fn negamax(
        &mut self,
        moves: &[G::Move],
        depth: u8,
        mut alpha: Score,
        beta: Score,
        turn: Score,
    ) -> Score {
        self.stats.inc_node();

        if self.should_stop() {
            return 0;
        }

        if depth == 0 {
            return turn * self.evaluate();
        }

        // mate and stalemate are scored by the evaluator, not as a loss
        if moves.is_empty() {
            let terminal = self.game.is_terminal();
            debug_assert!(terminal, "empty move list on a non-terminal position");
            if !terminal {
                warn!(depth, "empty move list without a terminal flag");
            }
            return turn * self.evaluate();
        }

        let mut best = -CHECKMATE;
        for mv in moves {
            self.game.apply(mv);
            let replies = self.game.legal_moves();
            let score = -self.negamax(&replies, depth - 1, -beta, -alpha, -turn);
            self.game.undo();

            if self.cancelled {
                break;
            }

            if score > best {
                best = score;
                if depth == self.params.depth {
                    self.record_root(mv, score);
                }
            }

            if !self.params.alpha_beta {
                continue;
            }
            if best > alpha {
                alpha = best;
            }
            if alpha >= beta {
                self.stats.inc_cutoff();
                break;
            }
        }

        best
    }

    fn record_root(&mut self, mv: &G::Move, score: Score) {
        trace!(mv = ?mv, score, "new best root move");
        self.stats.inc_root_update();
        self.best_root = Some(mv.clone());
    }

    fn evaluate(&mut self) -> Score {
        self.stats.inc_leaf_eval();
        self.evaluator.evaluate(&*self.game)
    }

    fn should_stop(&mut self) -> bool {
        if !self.cancelled {
            if let Some(token) = &self.cancel {
                self.cancelled = token.is_cancelled();
            }
        }
        self.cancelled
    }
}
