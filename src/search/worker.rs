//! Background search
//!
//! One search runs on its own thread over its own copy of the position and
//! publishes its report into a single-slot channel. The caller polls the
//! channel from its own loop (a frame tick, an event loop) and never blocks
//! unless it asks to.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use tracing::{debug, warn};

use super::params::SearchParams;
use super::search::{CancelToken, Search, SearchOutcome};
use crate::error::SearchError;
use crate::eval::Evaluator;
use crate::game::GameState;

/// Run one search on a new thread and publish its report into `results`
///
/// `game` is owned by the worker for the duration of the search; the
/// caller keeps its own position untouched. `root_moves` are searched in
/// the order given.
pub fn spawn_search<G, E>(
    mut game: G,
    root_moves: Vec<G::Move>,
    evaluator: E,
    params: SearchParams,
    results: Sender<SearchOutcome<G::Move>>,
    cancel: CancelToken,
) -> thread::JoinHandle<()>
where
    G: GameState + Send + 'static,
    G::Move: Send + 'static,
    E: Evaluator<G> + Send + 'static,
{
    thread::spawn(move || {
        let outcome = Search::new(&mut game, &evaluator, params)
            .with_cancel_token(cancel)
            .run(&root_moves);

        if results.send(outcome).is_err() {
            debug!("search result dropped: receiver gone");
        }
    })
}

/// Handle to a search running in the background
pub struct SearchTask<M> {
    receiver: Receiver<SearchOutcome<M>>,
    cancel: CancelToken,
    handle: Option<thread::JoinHandle<()>>,
}

impl<M: Send + 'static> SearchTask<M> {
    /// Launch a search with a fresh single-slot channel
    pub fn spawn<G, E>(game: G, root_moves: Vec<M>, evaluator: E, params: SearchParams) -> Self
    where
        G: GameState<Move = M> + Send + 'static,
        E: Evaluator<G> + Send + 'static,
    {
        let (sender, receiver) = bounded(1);
        let cancel = CancelToken::new();
        let handle = spawn_search(game, root_moves, evaluator, params, sender, cancel.clone());
        Self {
            receiver,
            cancel,
            handle: Some(handle),
        }
    }
}

impl<M> SearchTask<M> {
    /// Non-blocking poll: `Ok(None)` while the search is still running
    pub fn try_result(&mut self) -> Result<Option<SearchOutcome<M>>, SearchError> {
        match self.receiver.try_recv() {
            Ok(report) => {
                self.join();
                Ok(Some(report))
            }
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                self.join();
                Err(SearchError::WorkerDisconnected)
            }
        }
    }

    /// Block until the search publishes its report
    pub fn wait(mut self) -> Result<SearchOutcome<M>, SearchError> {
        let report = self
            .receiver
            .recv()
            .map_err(|_| SearchError::WorkerDisconnected);
        self.join();
        report
    }

    /// Block for at most `timeout`; the task stays usable on `Timeout`
    pub fn wait_timeout(&mut self, timeout: Duration) -> Result<SearchOutcome<M>, SearchError> {
        match self.receiver.recv_timeout(timeout) {
            Ok(report) => {
                self.join();
                Ok(report)
            }
            Err(RecvTimeoutError::Timeout) => Err(SearchError::Timeout),
            Err(RecvTimeoutError::Disconnected) => {
                self.join();
                Err(SearchError::WorkerDisconnected)
            }
        }
    }

    /// Ask the search to stop; it still publishes a (cancelled) report
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// The worker thread has exited
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    /// The single-slot channel the report arrives on
    pub fn result_channel(&self) -> &Receiver<SearchOutcome<M>> {
        &self.receiver
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("search worker panicked");
            }
        }
    }
}

impl<M> Drop for SearchTask<M> {
    // an abandoned search stops at its next node instead of running to depth
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Turn a report into the move it carries, treating cancellation as an error
pub fn into_move<M>(report: SearchOutcome<M>) -> Result<Option<M>, SearchError> {
    if report.cancelled {
        Err(SearchError::Cancelled)
    } else {
        Ok(report.best_move)
    }
}
