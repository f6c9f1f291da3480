//! Search statistics
//!
//! Diagnostic counters for one top-level search. Nothing here feeds back
//! into control flow.

use std::time::{Duration, Instant};

use tracing::debug;

/// Search statistics
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Recursive calls, root included
    pub nodes: u64,

    /// Static evaluations at the horizon or at terminal nodes
    pub leaf_evals: u64,

    /// Beta cutoffs taken
    pub cutoffs: u64,

    /// Times the best root move was replaced
    pub root_updates: u64,

    /// Search start time
    pub start_time: Option<Instant>,

    /// Time spent searching
    pub search_time: Duration,

    /// Nodes per second rate
    pub nps: u64,
}

impl SearchStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing
    pub fn start_timing(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Stop timing and calculate NPS
    pub fn update_timing(&mut self) {
        if let Some(start) = self.start_time {
            self.search_time = start.elapsed();
            let elapsed_ms = self.search_time.as_millis() as u64;
            if elapsed_ms > 0 {
                self.nps = (self.nodes * 1000) / elapsed_ms;
            }
        }
    }

    /// Count a visited node
    pub fn inc_node(&mut self) {
        self.nodes += 1;
    }

    /// Count a static evaluation
    pub fn inc_leaf_eval(&mut self) {
        self.leaf_evals += 1;
    }

    /// Count a beta cutoff
    pub fn inc_cutoff(&mut self) {
        self.cutoffs += 1;
    }

    /// Count a best root move replacement
    pub fn inc_root_update(&mut self) {
        self.root_updates += 1;
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Emit a summary at debug level
    pub fn log_summary(&self) {
        debug!(
            nodes = self.nodes,
            leaf_evals = self.leaf_evals,
            cutoffs = self.cutoffs,
            root_updates = self.root_updates,
            time_ms = self.search_time.as_millis() as u64,
            nps = self.nps,
            "search statistics"
        );
    }
}
