//! Initial assignment of tasks to work-stealing deques.
//!
//! A [`Placement`] maps each task to one of N deques as the generator
//! emits it. Placement affects scheduling only: tasks carry their starting
//! state, so the trajectory is identical whichever worker runs them.
//!
//! [`WeightedRandom`] is the default. It weights deque `i` proportionally
//! to `i + 1`, deliberately skewing work toward high-indexed workers so the
//! low-indexed ones have to steal.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rkpar_core::TaskSpan;

/// Chooses the deque each task is pushed onto.
///
/// Any `FnMut(&TaskSpan, usize) -> usize` closure is a placement.
pub trait Placement {
    /// Deque index in `0..deques` for the task covering `span`.
    ///
    /// `deques` is at least 1. Returning an out-of-range index is a
    /// structural failure and aborts the run.
    fn place(&mut self, span: &TaskSpan, deques: usize) -> usize;
}

impl<F> Placement for F
where
    F: FnMut(&TaskSpan, usize) -> usize,
{
    fn place(&mut self, span: &TaskSpan, deques: usize) -> usize {
        self(span, deques)
    }
}

/// Seeded sampling with deque `i` weighted by `i + 1`.
///
/// Uses a ChaCha8 RNG, so a given seed yields the same placement sequence
/// on every platform.
#[derive(Clone, Debug)]
pub struct WeightedRandom {
    rng: ChaCha8Rng,
}

impl WeightedRandom {
    /// Create a placement policy from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Placement for WeightedRandom {
    fn place(&mut self, _span: &TaskSpan, deques: usize) -> usize {
        let total = deques * (deques + 1) / 2;
        let mut ticket = self.rng.random_range(0..total);
        for i in 0..deques {
            let weight = i + 1;
            if ticket < weight {
                return i;
            }
            ticket -= weight;
        }
        deques - 1
    }
}

/// Cycles through the deques in order.
#[derive(Clone, Debug, Default)]
pub struct RoundRobin {
    next: usize,
}

impl Placement for RoundRobin {
    fn place(&mut self, _span: &TaskSpan, deques: usize) -> usize {
        let i = self.next % deques;
        self.next = i + 1;
        i
    }
}

/// Puts every task on one deque. The index is reduced modulo the deque
/// count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pinned(pub usize);

impl Placement for Pinned {
    fn place(&mut self, _span: &TaskSpan, deques: usize) -> usize {
        self.0 % deques
    }
}
