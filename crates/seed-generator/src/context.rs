//! Random source, identifier provider and clock threaded through generators.

use crate::dates::Clock;
use crate::ids::IdProvider;
use rand::rngs::StdRng;
use rand::SeedableRng;
use seed_core::{Id, Timestamp};

/// Mutable generation state for one run.
///
/// Every generator takes `&mut SeedContext` instead of reaching for a
/// global RNG, so a fixed seed and clock reproduce the same dataset.
pub struct SeedContext {
    rng: StdRng,
    ids: IdProvider,
    clock: Clock,
}

impl SeedContext {
    /// Create a context with the given seed and clock.
    pub fn new(seed: u64, clock: Clock) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ids: IdProvider::new(),
            clock,
        }
    }

    /// Create a context anchored at the current time.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(seed, Clock::system())
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Issue a fresh identifier.
    pub fn next_id(&mut self) -> Id {
        self.ids.next_id(&mut self.rng)
    }

    /// Number of identifiers issued so far.
    pub fn ids_issued(&self) -> usize {
        self.ids.issued()
    }

    /// Uniform timestamp within the last `window_days`.
    pub fn recent(&mut self, window_days: u32) -> Timestamp {
        self.clock.recent(&mut self.rng, window_days)
    }

    /// Timestamp within the last `window_days`, clamped to at least `floor`.
    pub fn after(&mut self, floor: Timestamp, window_days: u32) -> Timestamp {
        self.clock.after(&mut self.rng, floor, window_days)
    }
}
