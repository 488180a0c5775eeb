//! Single-step integrators for SDEs with diagonal noise.

pub mod euler_maruyama;
pub mod srk;
pub mod stochastic_integrals;
pub mod tableaus;

use crate::brownian::BrownianMotion;
use crate::error::SdeResult;
use crate::models::model::SDEModel;
use crate::state::BlockState;
use rand::Rng;

pub use euler_maruyama::EulerMaruyama;
pub use srk::{SrkConfig, SrkDiagonal};
pub use stochastic_integrals::StochasticIntegrals;

/// One step of a diagonal-noise scheme, driven by an external Brownian path.
///
/// Implementations are stateless between calls; the caller owns `(t, y)`.
pub trait DiagonalSolver {
    /// Strong convergence order, declared for step-size bookkeeping.
    fn strong_order(&self) -> f64;

    /// Advance `(t0, y0)` by `dt > 0`, returning `(t0 + dt, y1)`.
    fn step<M, B, R>(
        &self,
        model: &M,
        bm: &mut B,
        t0: f64,
        y0: &BlockState,
        dt: f64,
        rng: &mut R,
    ) -> SdeResult<(f64, BlockState)>
    where
        M: SDEModel + ?Sized,
        B: BrownianMotion + ?Sized,
        R: Rng + ?Sized;
}
