// src/solvers/euler_maruyama.rs
//! Euler-Maruyama Scheme for Diagonal-Noise SDEs
//!
//! # Mathematical Framework
//!
//! For `dY = f(t, Y) dt + g(t, Y) ⊙ dW`:
//! ```text
//! Y_{n+1} = Y_n + f(t_n, Y_n) Δt + g(t_n, Y_n) ⊙ ΔW_n
//! ```
//!
//! with `ΔW_n` taken from the same Brownian collaborator as the SRK step, so
//! both schemes can be run on one path and compared directly.
//!
//! # Convergence Properties
//!
//! - **Strong convergence**: Order 0.5 in step size
//! - **Weak convergence**: Order 1.0 in step size

use super::DiagonalSolver;
use crate::brownian::BrownianMotion;
use crate::error::{validation::validate_step_size, SdeResult};
use crate::models::model::SDEModel;
use crate::state::BlockState;
use rand::Rng;

/// Euler-Maruyama numerical scheme for SDE integration
#[derive(Clone, Copy, Debug, Default)]
pub struct EulerMaruyama;

impl EulerMaruyama {
    pub fn new() -> Self {
        EulerMaruyama {}
    }
}

impl DiagonalSolver for EulerMaruyama {
    fn strong_order(&self) -> f64 {
        0.5
    }

    fn step<M, B, R>(
        &self,
        model: &M,
        bm: &mut B,
        t0: f64,
        y0: &BlockState,
        dt: f64,
        _rng: &mut R,
    ) -> SdeResult<(f64, BlockState)>
    where
        M: SDEModel + ?Sized,
        B: BrownianMotion + ?Sized,
        R: Rng + ?Sized,
    {
        validate_step_size(dt)?;

        let dw = bm.increment(t0, t0 + dt)?;
        y0.ensure_same_shape(&dw, "Brownian increment")?;
        let drift = model.drift(t0, y0)?;
        y0.ensure_same_shape(&drift, "drift")?;
        let diffusion = model.diffusion(t0, y0)?;
        y0.ensure_same_shape(&diffusion, "diffusion")?;

        let mut y1 = y0.clone();
        y1.scaled_add(dt, &drift);
        y1.add_product(&diffusion, &dw);
        Ok((t0 + dt, y1))
    }
}
