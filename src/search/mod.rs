//! Search engine for Torre
//!
//! Fixed-depth negamax with alpha-beta pruning, root move shuffling and a
//! background runner that reports through a single-slot channel.

pub mod ordering;
pub mod params;
pub mod search;
pub mod selector;
pub mod stats;
pub mod worker;

pub use self::ordering::MoveRandomizer;
pub use self::params::{MoveOrder, SearchParams};
pub use self::search::{turn_multiplier, CancelToken, Search, SearchOutcome};
pub use self::selector::MoveSelector;
pub use self::stats::SearchStats;
pub use self::worker::{into_move, spawn_search, SearchTask};
