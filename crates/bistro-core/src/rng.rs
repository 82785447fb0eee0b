//! Deterministic per-actor and scene-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each guest owns an independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (actor_id * MIXING_CONSTANT)
//!
//! so a guest's menu choices do not depend on how many other guests drew
//! numbers before it in the same tick.  Scene-wide decisions (group size,
//! bill payer, appearance) come from the single `SimRng`.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::ActorId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── ActorRng ──────────────────────────────────────────────────────────────────

/// Per-actor deterministic RNG.
#[derive(Debug, Clone)]
pub struct ActorRng(SmallRng);

impl ActorRng {
    /// Seed from the run's global seed and an actor ID.
    pub fn new(global_seed: u64, actor: ActorId) -> Self {
        let seed = global_seed ^ (actor.0 as u64).wrapping_mul(MIXING_CONSTANT);
        ActorRng(SmallRng::seed_from_u64(seed))
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Choose a random element.  `None` for an empty slice.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Scene-level RNG for spawning and other global decisions.
#[derive(Debug, Clone)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform index into a collection of `len` elements.  `None` if empty.
    #[inline]
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.0.gen_range(0..len))
    }
}
