// src/solvers/stochastic_integrals.rs
//! Iterated Stochastic Integrals for One Step
//!
//! Over `[t0, t0 + dt]`, per block and element-wise:
//!
//! ```text
//! I_k   = W(t0 + dt) − W(t0)
//! I_kk  = (I_k² − dt) / 2
//! I_k0  ≈ ∫ (W_s − W(t0)) ds
//! I_kkk = (I_k³ − 3·dt·I_k) / 6
//! ```
//!
//! `I_kk` and `I_kkk` are exact functions of `I_k`. `I_k0` needs information
//! the increment alone does not carry, and is estimated one of two ways:
//!
//! - **Trapezoidal** (default): composite trapezoidal rule over extra queries
//!   of the same Brownian path. Reproducible whenever the path is.
//! - **Gaussian correction**: `I_k0 = dt/2 · (I_k + Z·√dt/√3)` with an
//!   independent `Z ~ N(0, 1)` from the caller's RNG. This matches the
//!   conditional law of the true integral given `I_k` (mean `dt·I_k/2`,
//!   variance `dt³/12`) without extra path queries, but the value is not
//!   determined by the path.
//!
//! All of these are treated as sampled inputs to the step, never as functions
//! of model parameters.

use super::srk::SrkConfig;
use crate::brownian::BrownianMotion;
use crate::error::{validation::validate_step_size, SdeResult};
use crate::rng;
use crate::state::BlockState;
use rand::Rng;

#[derive(Clone, Debug, PartialEq)]
pub struct StochasticIntegrals {
    pub i_k: BlockState,
    pub i_kk: BlockState,
    pub i_k0: BlockState,
    pub i_kkk: BlockState,
}

impl StochasticIntegrals {
    /// Sample `I_k` from `bm` over `[t0, t0 + dt]` and derive the rest.
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` if `dt` is not strictly positive and finite,
    ///   before `bm` or `rng` is touched.
    /// - Whatever `bm` reports, unchanged.
    pub fn estimate<B, R>(
        bm: &mut B,
        t0: f64,
        dt: f64,
        config: &SrkConfig,
        rng: &mut R,
    ) -> SdeResult<Self>
    where
        B: BrownianMotion + ?Sized,
        R: Rng + ?Sized,
    {
        validate_step_size(dt)?;

        let i_k = bm.increment(t0, t0 + dt)?;
        let i_k0 = if config.trapezoidal_approx {
            let i_k0 = bm.trapezoidal_integral(t0, dt, &config.trapezoidal)?;
            i_k.ensure_same_shape(&i_k0, "trapezoidal integral")?;
            i_k0
        } else {
            gaussian_time_integral(&i_k, dt, rng)
        };

        Ok(Self::from_parts(i_k, i_k0, dt))
    }

    /// Derive `I_kk` and `I_kkk` from a given increment and time integral.
    pub fn from_parts(i_k: BlockState, i_k0: BlockState, dt: f64) -> Self {
        let i_kk = i_k.map(|dw| (dw * dw - dt) / 2.0);
        let i_kkk = i_k.map(|dw| (dw * dw * dw - 3.0 * dt * dw) / 6.0);
        StochasticIntegrals {
            i_k,
            i_kk,
            i_k0,
            i_kkk,
        }
    }

    /// Per-block weight of the diffusion evaluation at one stage:
    ///
    /// ```text
    /// β1·I_k + β2·I_kk/√dt + β3·I_k0/dt + β4·I_kkk/dt
    /// ```
    pub fn noise_weight(&self, beta: [f64; 4], dt: f64, sqrt_dt: f64) -> BlockState {
        let [b1, b2, b3, b4] = beta;
        let mut weight = self.i_k.map(|dw| b1 * dw);
        weight.scaled_add(b2 / sqrt_dt, &self.i_kk);
        weight.scaled_add(b3 / dt, &self.i_k0);
        weight.scaled_add(b4 / dt, &self.i_kkk);
        weight
    }
}

/// `dt/2 · (I_k + Z·√dt/√3)`, one fresh normal draw per element.
fn gaussian_time_integral<R: Rng + ?Sized>(i_k: &BlockState, dt: f64, rng: &mut R) -> BlockState {
    let scale = dt.sqrt() / 3f64.sqrt();
    BlockState::new(
        i_k.iter()
            .map(|dw| {
                let z = rng::standard_normal_like(dw, rng);
                (dw + &(z * scale)) * (dt / 2.0)
            })
            .collect(),
    )
}
