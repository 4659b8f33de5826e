//! Deterministic simulation RNG.
//!
//! Every stochastic choice in the engine — Gibbs-field sampling, collision
//! tie-breaking under [`CollisionPolicy::Random`](crate) — draws from a
//! single [`SimRng`] seeded once at construction. No subsystem is allowed to
//! create its own RNG: that would make the draw sequence depend on which
//! subsystems happen to run, breaking the determinism round-trip (SPEC §8).

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant, used to decorrelate derived seeds.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// The simulator's single source of randomness.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u32) -> Self {
        SimRng(SmallRng::seed_from_u64(seed as u64))
    }

    /// Derive a new, independent `SimRng` from this one, offset by `salt`.
    ///
    /// Used to seed a per-patch or per-connection RNG deterministically from
    /// the root without consuming the same draw twice.
    pub fn child(&mut self, salt: u64) -> SimRng {
        let seed: u64 = self.0.r#gen::<u64>() ^ salt.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Collapse this RNG's state to a single `u64` and reseed from it.
    ///
    /// `SmallRng` exposes no portable way to serialize its internal state
    /// directly, so a snapshot instead draws one value and reseeds from it;
    /// both the live RNG and a later [`SimRng::from_snapshot`] reconstructed
    /// from the returned value then produce bit-identical future draws.
    pub fn snapshot(&mut self) -> u64 {
        let state: u64 = self.random();
        self.0 = SmallRng::seed_from_u64(state);
        state
    }

    /// Reconstruct an RNG from a value previously returned by [`SimRng::snapshot`].
    pub fn from_snapshot(state: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(state))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Sample a log-probability-weighted categorical choice from `log_weights`.
    ///
    /// Used by the Gibbs sampler (`gw-map`) to pick among "no item" plus one
    /// option per item type, given unnormalized log-densities. Stable under
    /// log-sum-exp so large negative intensities don't underflow.
    pub fn categorical_from_log_weights(&mut self, log_weights: &[f64]) -> usize {
        debug_assert!(!log_weights.is_empty());
        let max = log_weights.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exp_weights: Vec<f64> = log_weights.iter().map(|w| (w - max).exp()).collect();
        let total: f64 = exp_weights.iter().sum();
        let mut draw = self.gen_range(0.0..total);
        for (i, w) in exp_weights.iter().enumerate() {
            if draw < *w {
                return i;
            }
            draw -= w;
        }
        exp_weights.len() - 1
    }

    /// Shuffle a mutable slice in place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }
}
