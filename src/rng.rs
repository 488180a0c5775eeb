// src/rng.rs
//! Random Number Generation for SDE Steps
//!
//! Two consumers draw from here: the Gaussian-correction estimate of `I_k0`
//! and the [`BrownianPath`](crate::brownian::BrownianPath) sampler.
//!
//! # Reproducibility
//!
//! Nothing in this crate owns a global generator. Every step takes the
//! caller's `Rng`, so parallel trajectories stay reproducible as long as each
//! one gets its own stream, e.g. from [`RngFactory::create_std_rng`].

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// RNG factory for reproducible per-trajectory streams
pub struct RngFactory {
    base_seed: u64,
}

impl RngFactory {
    pub fn new(base_seed: u64) -> Self {
        Self { base_seed }
    }

    /// Create a standard RNG for a specific path/thread
    pub fn create_std_rng(&self, path_id: u64) -> StdRng {
        StdRng::seed_from_u64(self.base_seed.wrapping_add(path_id))
    }

    /// Seed for a collaborator that builds its own generator (e.g. a Brownian path)
    pub fn path_seed(&self, path_id: u64) -> u64 {
        self.base_seed.wrapping_add(path_id)
    }
}

pub fn seed_rng_from_u64(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn get_normal_draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    StandardNormal.sample(rng)
}

/// Independent standard-normal draws with the same length as `like`.
pub fn standard_normal_like<R: Rng + ?Sized>(like: &Array1<f64>, rng: &mut R) -> Array1<f64> {
    Array1::from_shape_fn(like.len(), |_| get_normal_draw(rng))
}
