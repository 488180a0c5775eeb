// src/brownian.rs
//! Brownian Motion Collaborator
//!
//! The SRK step never draws `ΔW` itself. It asks a [`BrownianMotion`] for path
//! values at the two ends of the step, and (in trapezoidal mode) at a few
//! interior points to approximate `∫ (W_s − W_{t0}) ds`. Any sampler that
//! answers those queries consistently can drive the integrator.
//!
//! # Lazily Sampled Path
//!
//! [`BrownianPath`] keeps every value it has handed out. A new query at time
//! `t` is resolved against its known neighbours:
//!
//! - after the last known point `(b, W_b)`:
//!   ```text
//!   W_t = W_b + √(t − b) · Z
//!   ```
//! - between known points `(a, W_a)` and `(b, W_b)` (Brownian bridge):
//!   ```text
//!   W_t = W_a + (t − a)/(b − a) · (W_b − W_a) + √((t − a)(b − t)/(b − a)) · Z
//!   ```
//!
//! with `Z ~ N(0, 1)` drawn independently per element. The same seed and the
//! same query sequence always produce the same path.

use crate::error::{validation::*, SdeError, SdeResult};
use crate::rng;
use crate::state::BlockState;
use ndarray::Array1;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sub-interval rule for the trapezoidal approximation of `∫ W ds`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrapezoidalGrid {
    /// Upper bound on the number of sub-intervals per step.
    pub max_subintervals: usize,
    /// Sub-intervals are not refined below this length unless `dt` itself is shorter.
    pub min_subinterval: f64,
}

impl Default for TrapezoidalGrid {
    fn default() -> Self {
        TrapezoidalGrid {
            max_subintervals: 10,
            min_subinterval: 0.01,
        }
    }
}

impl TrapezoidalGrid {
    /// Number of uniform sub-intervals used over a step of length `dt`.
    ///
    /// ```text
    /// h = max(min(dt, min_subinterval), dt / max_subintervals)
    /// n = ⌈dt / h⌉
    /// ```
    pub fn subintervals(&self, dt: f64) -> usize {
        let max = self.max_subintervals.max(1);
        let h = dt.min(self.min_subinterval).max(dt / max as f64);
        // Guard against dt / h landing a hair above an integer.
        let n = (dt / h - 1e-9).ceil();
        if n.is_finite() {
            (n as usize).clamp(1, max)
        } else {
            1
        }
    }

    pub fn validate(&self) -> SdeResult<()> {
        if self.max_subintervals == 0 {
            return Err(SdeError::InvalidConfiguration {
                field: "trapezoidal.max_subintervals".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        validate_positive("trapezoidal.min_subinterval", self.min_subinterval)?;
        validate_finite("trapezoidal.min_subinterval", self.min_subinterval)
    }
}

/// A sampled Brownian path queried by time.
pub trait BrownianMotion {
    /// Path value at time `t`, one array per state block.
    fn sample(&mut self, t: f64) -> SdeResult<BlockState>;

    /// `W(t1) − W(t0)`.
    fn increment(&mut self, t0: f64, t1: f64) -> SdeResult<BlockState> {
        let w0 = self.sample(t0)?;
        let w1 = self.sample(t1)?;
        w0.ensure_same_shape(&w1, "Brownian increment")?;
        Ok(w1.zip_map(&w0, |next, cur| next - cur))
    }

    /// Composite trapezoidal approximation of `∫_{t0}^{t0+dt} (W_s − W_{t0}) ds`.
    ///
    /// Only queries `sample`, so the result is exactly as reproducible as the
    /// path itself.
    fn trapezoidal_integral(
        &mut self,
        t0: f64,
        dt: f64,
        grid: &TrapezoidalGrid,
    ) -> SdeResult<BlockState> {
        let n = grid.subintervals(dt);
        let h = dt / n as f64;

        let w0 = self.sample(t0)?;
        let mut integral = BlockState::zeros_like(&w0);
        let mut prev = BlockState::zeros_like(&w0);

        for i in 1..=n {
            let t = if i == n { t0 + dt } else { t0 + i as f64 * h };
            let w = self.sample(t)?;
            w0.ensure_same_shape(&w, "trapezoidal integral")?;
            let rel = w.zip_map(&w0, |w, w0| w - w0);

            integral.scaled_add(0.5 * h, &prev);
            integral.scaled_add(0.5 * h, &rel);
            prev = rel;
        }

        Ok(integral)
    }
}

/// Reproducible, lazily sampled Brownian path.
#[derive(Debug, Clone)]
pub struct BrownianPath {
    t_start: f64,
    shape: Vec<usize>,
    points: BTreeMap<TimeKey, BlockState>,
    rng: StdRng,
}

/// Total-order key for sample times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct TimeKey(u64);

impl TimeKey {
    fn new(t: f64) -> Self {
        // Order-preserving map from finite f64 to u64.
        let bits = t.to_bits();
        if t.is_sign_negative() {
            TimeKey(!bits)
        } else {
            TimeKey(bits | (1 << 63))
        }
    }
}

impl BrownianPath {
    /// Path starting at `w0` at time `t0`.
    pub fn new(t0: f64, w0: BlockState, seed: u64) -> SdeResult<Self> {
        validate_finite("t0", t0)?;
        let shape = w0.shape();
        let mut points = BTreeMap::new();
        // -0.0 and 0.0 must share a key.
        points.insert(TimeKey::new(t0 + 0.0), w0);
        Ok(BrownianPath {
            t_start: t0,
            shape,
            points,
            rng: rng::seed_rng_from_u64(seed),
        })
    }

    /// Standard path pinned at zero, with block lengths given by `shape`.
    pub fn zeros(t0: f64, shape: &[usize], seed: u64) -> SdeResult<Self> {
        let w0 = BlockState::new(shape.iter().map(|&n| Array1::zeros(n)).collect());
        Self::new(t0, w0, seed)
    }

    /// Standard path shaped like `y0`.
    pub fn like(t0: f64, y0: &BlockState, seed: u64) -> SdeResult<Self> {
        Self::zeros(t0, &y0.shape(), seed)
    }

    pub fn t_start(&self) -> f64 {
        self.t_start
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of distinct times sampled so far, including the start.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    fn gaussian(&mut self) -> BlockState {
        let source = &mut self.rng;
        BlockState::new(
            self.shape
                .iter()
                .map(|&n| Array1::from_shape_fn(n, |_| rng::get_normal_draw(source)))
                .collect(),
        )
    }
}

impl BrownianMotion for BrownianPath {
    fn sample(&mut self, t: f64) -> SdeResult<BlockState> {
        validate_finite("t", t)?;
        if t < self.t_start {
            return Err(SdeError::InvalidParameters {
                parameter: "t".to_string(),
                value: t,
                constraint: format!("must not precede the path start ({})", self.t_start),
            });
        }

        let key = TimeKey::new(t + 0.0);
        if let Some(w) = self.points.get(&key) {
            return Ok(w.clone());
        }

        let left = self
            .points
            .range(..key)
            .next_back()
            .map(|(k, w)| (f64_from_key(*k), w.clone()));
        let right = self
            .points
            .range(key..)
            .next()
            .map(|(k, w)| (f64_from_key(*k), w.clone()));

        let z = self.gaussian();
        let w = match (left, right) {
            (Some((a, wa)), Some((b, wb))) => {
                let frac = (t - a) / (b - a);
                let std = ((t - a) * (b - t) / (b - a)).sqrt();
                let mut w = wa.clone();
                w.scaled_add(frac, &wb);
                w.scaled_add(-frac, &wa);
                w.scaled_add(std, &z);
                w
            }
            (Some((b, wb)), None) => {
                let mut w = wb;
                w.scaled_add((t - b).sqrt(), &z);
                w
            }
            _ => {
                return Err(SdeError::RandomGenerationError {
                    reason: format!("no anchor point for Brownian query at t = {}", t),
                })
            }
        };

        log::trace!("Brownian path sampled at t = {} ({} points)", t, self.points.len() + 1);
        self.points.insert(key, w.clone());
        Ok(w)
    }
}

fn f64_from_key(key: TimeKey) -> f64 {
    let bits = key.0;
    if bits & (1 << 63) != 0 {
        f64::from_bits(bits & !(1 << 63))
    } else {
        f64::from_bits(!bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_key_ordering() {
        let times = [-2.5, -0.1, 0.0, 1e-12, 0.5, 3.0];
        for pair in times.windows(2) {
            assert!(TimeKey::new(pair[0]) < TimeKey::new(pair[1]));
        }
        for &t in &times {
            assert_eq!(f64_from_key(TimeKey::new(t)), t);
        }
    }

    #[test]
    fn test_subintervals() {
        let grid = TrapezoidalGrid::default();
        // Short steps: a single trapezoid.
        assert_eq!(grid.subintervals(0.001), 1);
        assert_eq!(grid.subintervals(0.01), 1);
        // Intermediate steps: sub-intervals of length min_subinterval.
        assert_eq!(grid.subintervals(0.05), 5);
        // Long steps: capped at max_subintervals.
        assert_eq!(grid.subintervals(1.0), 10);
        assert_eq!(grid.subintervals(100.0), 10);
    }

    #[test]
    fn test_start_value_and_cache() {
        let mut bm = BrownianPath::zeros(0.0, &[2, 1], 42).expect("valid path");
        assert_eq!(bm.shape(), &[2, 1]);
        let w0 = bm.sample(0.0).expect("start is known");
        assert_eq!(w0, BlockState::zeros_like(&w0));

        let first = bm.sample(0.3).expect("forward query");
        let again = bm.sample(0.3).expect("cached query");
        assert_eq!(first, again);
        assert_eq!(bm.num_points(), 2);
    }

    #[test]
    fn test_reproducible_with_same_seed() {
        let mut bm1 = BrownianPath::zeros(0.0, &[3], 7).expect("valid path");
        let mut bm2 = BrownianPath::zeros(0.0, &[3], 7).expect("valid path");
        for &t in &[0.5, 0.1, 1.0, 0.75] {
            assert_eq!(bm1.sample(t).unwrap(), bm2.sample(t).unwrap());
        }
    }

    #[test]
    fn test_query_before_start_fails() {
        let mut bm = BrownianPath::zeros(1.0, &[1], 1).expect("valid path");
        assert_eq!(bm.t_start(), 1.0);
        assert!(matches!(
            bm.sample(0.5),
            Err(SdeError::InvalidParameters { .. })
        ));
    }

    #[test]
    fn test_bridge_stays_between_neighbours_in_distribution() {
        // Bridge midpoint conditional on W(0) = 0 and W(1) = w1 has mean w1 / 2
        // and variance 1 / 4.
        let trials = 8000;
        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        for seed in 0..trials {
            let mut bm = BrownianPath::zeros(0.0, &[1], seed).expect("valid path");
            let w1 = bm.sample(1.0).unwrap().block(0)[0];
            let mid = bm.sample(0.5).unwrap().block(0)[0];
            let dev = mid - 0.5 * w1;
            sum += dev;
            sum_sq += dev * dev;
        }
        let mean = sum / trials as f64;
        let var = sum_sq / trials as f64 - mean * mean;
        assert!(mean.abs() < 0.03, "bridge deviation mean {}", mean);
        assert!((var - 0.25).abs() < 0.03, "bridge deviation variance {}", var);
    }

    /// Deterministic "path" W(t) = slope · t, for which the trapezoidal rule is exact.
    struct LinearPath {
        slope: f64,
    }

    impl BrownianMotion for LinearPath {
        fn sample(&mut self, t: f64) -> SdeResult<BlockState> {
            Ok(BlockState::from_scalars(&[self.slope * t, -self.slope * t]))
        }
    }

    #[test]
    fn test_trapezoidal_integral_exact_for_linear_path() {
        let mut path = LinearPath { slope: 3.0 };
        let grid = TrapezoidalGrid::default();
        for &(t0, dt) in &[(0.0, 0.005), (1.0, 0.05), (2.0, 0.7)] {
            let integral = path.trapezoidal_integral(t0, dt, &grid).unwrap();
            let expected = 3.0 * dt * dt / 2.0;
            assert!((integral.block(0)[0] - expected).abs() < 1e-12);
            assert!((integral.block(1)[0] + expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_increment_default() {
        let mut path = LinearPath { slope: 2.0 };
        let inc = path.increment(1.0, 1.5).unwrap();
        assert!((inc.block(0)[0] - 1.0).abs() < 1e-12);
        assert!((inc.block(1)[0] + 1.0).abs() < 1e-12);
    }
}
