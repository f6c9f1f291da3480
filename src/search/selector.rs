//! Move selection entry points
//!
//! `MoveSelector` is what a game driver holds on to: it shuffles the root
//! moves, runs the search (inline or on a worker thread) and supplies the
//! random fallback when the search has nothing to offer.

use tracing::{debug, info};

use super::ordering::MoveRandomizer;
use super::params::SearchParams;
use super::search::{Search, SearchOutcome};
use super::worker::SearchTask;
use crate::eval::{Evaluator, PieceSquareEvaluator};
use crate::game::GameState;

/// Picks moves for an automated player
#[derive(Debug, Clone)]
pub struct MoveSelector<E = PieceSquareEvaluator> {
    params: SearchParams,
    evaluator: E,
    randomizer: MoveRandomizer,
}

impl MoveSelector<PieceSquareEvaluator> {
    pub fn new(params: SearchParams) -> Self {
        Self::with_evaluator(params, PieceSquareEvaluator)
    }
}

impl Default for MoveSelector<PieceSquareEvaluator> {
    fn default() -> Self {
        Self::new(SearchParams::default())
    }
}

impl<E> MoveSelector<E> {
    pub fn with_evaluator(params: SearchParams, evaluator: E) -> Self {
        let randomizer = MoveRandomizer::new(params.move_order);
        Self {
            params,
            evaluator,
            randomizer,
        }
    }

    /// Uniformly random legal move; `None` only for an empty list
    pub fn select_random_move<M: Clone>(&mut self, legal_moves: &[M]) -> Option<M> {
        self.randomizer.choose(legal_moves).cloned()
    }

    /// Root moves in the order the next search will visit them
    fn root_order<M: Clone>(&mut self, legal_moves: &[M]) -> Vec<M> {
        let mut root_moves = legal_moves.to_vec();
        self.randomizer.shuffle(&mut root_moves);
        root_moves
    }

    /// Full search report for the position, searched inline
    pub fn search<G>(&mut self, game: &mut G, legal_moves: &[G::Move]) -> SearchOutcome<G::Move>
    where
        G: GameState,
        E: Evaluator<G>,
    {
        let root_moves = self.root_order(legal_moves);
        Search::new(game, &self.evaluator, self.params.clone()).run(&root_moves)
    }

    /// Best move by negamax, or `None` when the search yields nothing
    pub fn select_best_move<G>(&mut self, game: &mut G, legal_moves: &[G::Move]) -> Option<G::Move>
    where
        G: GameState,
        E: Evaluator<G>,
    {
        self.search(game, legal_moves).best_move
    }

    /// Best move, falling back to a random legal move
    pub fn best_or_random<G>(&mut self, game: &mut G, legal_moves: &[G::Move]) -> Option<G::Move>
    where
        G: GameState,
        E: Evaluator<G>,
    {
        match self.select_best_move(game, legal_moves) {
            Some(mv) => Some(mv),
            None => {
                debug!("search yielded no move, falling back to a random one");
                self.select_random_move(legal_moves)
            }
        }
    }

    /// Launch the search on a worker thread over `game`, a copy the caller
    /// hands over. Poll the returned task for the result.
    pub fn select_best_move_async<G>(&mut self, game: G, legal_moves: &[G::Move]) -> SearchTask<G::Move>
    where
        G: GameState + Send + 'static,
        G::Move: Send + 'static,
        E: Evaluator<G> + Clone + Send + 'static,
    {
        let root_moves = self.root_order(legal_moves);
        info!(
            moves = root_moves.len(),
            depth = self.params.depth,
            "launching background search"
        );
        SearchTask::spawn(game, root_moves, self.evaluator.clone(), self.params.clone())
    }
}
