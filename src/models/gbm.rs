// src/models/gbm.rs
use super::model::SDEModel;
use crate::error::SdeResult;
use crate::state::BlockState;

/// Geometric Brownian motion applied independently to every element:
/// `dY = μ Y dt + σ Y dW`.
pub struct Gbm {
    pub mu: f64,
    pub sigma: f64,
}

impl Gbm {
    pub fn new(mu: f64, sigma: f64) -> Self {
        Gbm { mu, sigma }
    }

    /// Exact solution at time `t` given the Brownian value `w_t` (with `W_0 = 0`).
    pub fn exact_solution(&self, y0: f64, t: f64, w_t: f64) -> f64 {
        y0 * ((self.mu - 0.5 * self.sigma * self.sigma) * t + self.sigma * w_t).exp()
    }
}

impl SDEModel for Gbm {
    fn drift(&self, _t: f64, y: &BlockState) -> SdeResult<BlockState> {
        Ok(y.map(|v| self.mu * v))
    }

    fn diffusion(&self, _t: f64, y: &BlockState) -> SdeResult<BlockState> {
        Ok(y.map(|v| self.sigma * v))
    }
}
