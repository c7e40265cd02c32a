//! Uniform random sources in `[0, 1)`
//!
//! - [`ThreadRandom`]: thread-local generator, used in production.
//! - [`SeededRandom`]: `StdRng` seeded from a `u64`, reproducible across runs.
//! - [`SequenceRandom`]: replays a fixed list of values, for tests that need
//!   to steer individual draws.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use rand::SeedableRng;
use rand::distr::{Distribution, StandardUniform};
use rand::rngs::StdRng;

pub trait RandomSource: Send + Sync {
    /// Next value, uniform in `[0, 1)`
    fn next_unit(&self) -> f64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&self) -> f64 {
        rand::random::<f64>()
    }
}

pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&self) -> f64 {
        let mut rng = self.rng.lock();
        Distribution::<f64>::sample(&StandardUniform, &mut *rng)
    }
}

/// Cycles through `values`; each value is clamped into `[0, 1)`.
/// An empty list always yields `0.0`.
pub struct SequenceRandom {
    values: Vec<f64>,
    cursor: AtomicUsize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % self.values.len();
        let v = self.values[idx];
        if v.is_nan() {
            0.0
        } else {
            v.clamp(0.0, 1.0 - f64::EPSILON)
        }
    }
}
