// src/models/ou_process.rs
use super::model::SDEModel;
use crate::error::SdeResult;
use crate::state::BlockState;

/// Ornstein-Uhlenbeck process, element-wise: `dY = θ(μ − Y) dt + σ dW`.
pub struct OuProcess {
    pub theta: f64,
    pub mu: f64,
    pub sigma: f64,
}

impl OuProcess {
    pub fn new(theta: f64, mu: f64, sigma: f64) -> Self {
        OuProcess { theta, mu, sigma }
    }

    pub fn exact_mean(&self, y0: f64, t: f64) -> f64 {
        self.mu + (y0 - self.mu) * (-self.theta * t).exp()
    }

    pub fn exact_variance(&self, t: f64) -> f64 {
        self.sigma * self.sigma / (2.0 * self.theta) * (1.0 - (-2.0 * self.theta * t).exp())
    }
}

impl SDEModel for OuProcess {
    fn drift(&self, _t: f64, y: &BlockState) -> SdeResult<BlockState> {
        Ok(y.map(|v| self.theta * (self.mu - v)))
    }

    fn diffusion(&self, _t: f64, y: &BlockState) -> SdeResult<BlockState> {
        // Additive noise: constant regardless of the state.
        Ok(y.map(|_| self.sigma))
    }
}
