//! Root move randomization
//!
//! Ties between equally scored root moves go to the first one searched, so
//! shuffling the root list varies which of them is played.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::params::MoveOrder;

/// Shuffles root moves before each search
#[derive(Debug, Clone)]
pub struct MoveRandomizer {
    /// `None` keeps the supplied order
    rng: Option<StdRng>,
}

impl MoveRandomizer {
    pub fn new(order: MoveOrder) -> Self {
        let rng = match order {
            MoveOrder::Shuffled => Some(StdRng::from_entropy()),
            MoveOrder::Seeded(seed) => Some(StdRng::seed_from_u64(seed)),
            MoveOrder::Fixed => None,
        };
        Self { rng }
    }

    /// Reproducible shuffles from `seed`
    pub fn seeded(seed: u64) -> Self {
        Self::new(MoveOrder::Seeded(seed))
    }

    /// No shuffling at all
    pub fn fixed() -> Self {
        Self::new(MoveOrder::Fixed)
    }

    pub fn is_fixed(&self) -> bool {
        self.rng.is_none()
    }

    /// Permute `moves` in place
    pub fn shuffle<M>(&mut self, moves: &mut [M]) {
        if let Some(rng) = self.rng.as_mut() {
            moves.shuffle(rng);
        }
    }

    /// Uniform pick, or the first move when fixed
    pub fn choose<'a, M>(&mut self, moves: &'a [M]) -> Option<&'a M> {
        match self.rng.as_mut() {
            Some(rng) => moves.choose(rng),
            None => moves.first(),
        }
    }
}
