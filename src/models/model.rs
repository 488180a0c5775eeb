// src/models/model.rs
use crate::error::SdeResult;
use crate::state::BlockState;

/// Drift and diffusion of an SDE with diagonal noise.
///
/// Both functions return a state with the same block structure as `y`.
/// `diffusion` is the element-wise multiplier of `dW`, so block `i` of the
/// state is driven only by block `i` of the Brownian motion. Errors are
/// passed through the solvers untouched.
pub trait SDEModel {
    fn drift(&self, t: f64, y: &BlockState) -> SdeResult<BlockState>;
    fn diffusion(&self, t: f64, y: &BlockState) -> SdeResult<BlockState>;
}

impl<M: SDEModel + ?Sized> SDEModel for &M {
    fn drift(&self, t: f64, y: &BlockState) -> SdeResult<BlockState> {
        (**self).drift(t, y)
    }

    fn diffusion(&self, t: f64, y: &BlockState) -> SdeResult<BlockState> {
        (**self).diffusion(t, y)
    }
}
