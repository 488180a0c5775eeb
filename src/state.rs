// src/state.rs
//! Block-structured SDE state.
//!
//! A state is an ordered list of independent blocks. Under the diagonal-noise
//! assumption every operation here works on matching blocks only; no method
//! ever mixes values from two different blocks.

use crate::error::{SdeError, SdeResult};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockState(pub Vec<Array1<f64>>);

impl BlockState {
    pub fn new(blocks: Vec<Array1<f64>>) -> Self {
        BlockState(blocks)
    }

    /// One length-1 block per value.
    pub fn from_scalars(values: &[f64]) -> Self {
        BlockState(values.iter().map(|&v| Array1::from_elem(1, v)).collect())
    }

    pub fn zeros_like(other: &BlockState) -> Self {
        BlockState(other.0.iter().map(|b| Array1::zeros(b.len())).collect())
    }

    pub fn num_blocks(&self) -> usize {
        self.0.len()
    }

    pub fn block(&self, i: usize) -> &Array1<f64> {
        &self.0[i]
    }

    pub fn blocks(&self) -> &[Array1<f64>] {
        &self.0
    }

    /// Length of every block, in order.
    pub fn shape(&self) -> Vec<usize> {
        self.0.iter().map(|b| b.len()).collect()
    }

    pub fn same_shape(&self, other: &BlockState) -> bool {
        self.0.len() == other.0.len() && self.0.iter().zip(&other.0).all(|(a, b)| a.len() == b.len())
    }

    /// Error unless `other` has this state's block structure.
    pub fn ensure_same_shape(&self, other: &BlockState, context: &str) -> SdeResult<()> {
        if self.same_shape(other) {
            Ok(())
        } else {
            Err(SdeError::ShapeMismatch {
                context: context.to_string(),
                expected: self.shape(),
                found: other.shape(),
            })
        }
    }

    /// `self += a * x`, block by block.
    pub fn scaled_add(&mut self, a: f64, x: &BlockState) {
        for (s, xb) in self.0.iter_mut().zip(&x.0) {
            s.scaled_add(a, xb);
        }
    }

    /// `self += a * x ⊙ w`, block by block.
    pub fn add_weighted_product(&mut self, a: f64, x: &BlockState, w: &BlockState) {
        for ((s, xb), wb) in self.0.iter_mut().zip(&x.0).zip(&w.0) {
            ndarray::Zip::from(s)
                .and(xb)
                .and(wb)
                .for_each(|s, &x, &w| *s += a * x * w);
        }
    }

    /// `self += x ⊙ w`, block by block.
    pub fn add_product(&mut self, x: &BlockState, w: &BlockState) {
        self.add_weighted_product(1.0, x, w);
    }

    /// Apply `f` element-wise to every block.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> BlockState {
        BlockState(self.0.iter().map(|b| b.mapv(&f)).collect())
    }

    /// Element-wise combination of two states with the same shape.
    pub fn zip_map(&self, other: &BlockState, f: impl Fn(f64, f64) -> f64) -> BlockState {
        BlockState(
            self.0
                .iter()
                .zip(&other.0)
                .map(|(a, b)| {
                    let mut out = a.clone();
                    ndarray::Zip::from(&mut out).and(b).for_each(|o, &b| *o = f(*o, b));
                    out
                })
                .collect(),
        )
    }
}

impl std::ops::Deref for BlockState {
    type Target = [Array1<f64>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Array1<f64>>> for BlockState {
    fn from(blocks: Vec<Array1<f64>>) -> Self {
        BlockState(blocks)
    }
}
