//! Search parameters and configuration
//!
//! Controls root depth, root move ordering and whether alpha-beta cutoffs
//! are taken.

/// Default root depth in plies
pub const DEFAULT_DEPTH: u8 = 3;

/// How root moves are ordered before a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOrder {
    /// Uniform shuffle from an entropy-seeded generator
    Shuffled,
    /// Uniform shuffle from a generator seeded with the given value
    Seeded(u64),
    /// Keep the order the moves were supplied in
    Fixed,
}

/// Search parameters for the engine
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Root depth in plies
    pub depth: u8,

    /// Root move ordering
    pub move_order: MoveOrder,

    /// Take beta cutoffs. Off gives plain negamax over the full tree.
    pub alpha_beta: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            move_order: MoveOrder::Shuffled,
            alpha_beta: true,
        }
    }
}

impl SearchParams {
    /// Create new search params with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set root depth in plies
    pub fn depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// Set root move ordering
    pub fn move_order(mut self, order: MoveOrder) -> Self {
        self.move_order = order;
        self
    }

    /// Shorthand for `move_order(MoveOrder::Seeded(seed))`
    pub fn seed(self, seed: u64) -> Self {
        self.move_order(MoveOrder::Seeded(seed))
    }

    /// Enable or disable alpha-beta cutoffs
    pub fn alpha_beta(mut self, enable: bool) -> Self {
        self.alpha_beta = enable;
        self
    }
}
