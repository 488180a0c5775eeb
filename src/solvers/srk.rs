// src/solvers/srk.rs
//! Stochastic Runge-Kutta (SRK) Scheme for Diagonal-Noise SDEs
//!
//! # Mathematical Framework
//!
//! For the Itô SDE `dY = f(t, Y) dt + g(t, Y) ⊙ dW` with diagonal noise,
//! one step of Rößler's SRI2 scheme builds two families of stages from the
//! [`srid2`](super::tableaus::srid2) tableau:
//!
//! ```text
//! H0_s = y0 + Σ_{j<s} A0[s][j]·f(t0 + C0[j]·dt, H0_j)·dt + B0[s][j]·g(t0 + C1[j]·dt, H1_j)·I_k0/dt
//! H1_s = y0 + Σ_{j<s} A1[s][j]·f(t0 + C0[j]·dt, H0_j)·dt + B1[s][j]·g(t0 + C1[j]·dt, H1_j)·√dt
//! ```
//!
//! and combines them as
//!
//! ```text
//! y1 = y0 + Σ_s α_s·f(t0 + C0[s]·dt, H0_s)·dt
//!         + (β1_s·I_k + β2_s·I_kk/√dt + β3_s·I_k0/dt + β4_s·I_kkk/dt)·g(t0 + C1[s]·dt, H1_s)
//! ```
//!
//! # Convergence Properties
//!
//! - **Strong convergence**: Order 1.5 for sufficiently smooth `f` and `g`
//! - **Deterministic part**: Third order (with `g ≡ 0` it is a 3-stage explicit RK)
//! - **Cost**: 4 drift and 4 diffusion evaluations per step, plus the Brownian
//!   queries of the `I_k0` estimate
//!
//! Every product above is element-wise within a block; no term couples two
//! blocks.

use super::stochastic_integrals::StochasticIntegrals;
use super::tableaus::srid2::{A0, A1, ALPHA, B0, B1, BETA1, BETA2, BETA3, BETA4, C0, C1, STAGES};
use super::DiagonalSolver;
use crate::brownian::{BrownianMotion, TrapezoidalGrid};
use crate::error::{validation::validate_step_size, SdeError, SdeResult};
use crate::models::model::SDEModel;
use crate::state::BlockState;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Options read by the SRK step. Other driver options are not its concern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SrkConfig {
    /// Estimate `I_k0` from the Brownian path (reproducible) instead of an
    /// independent Gaussian correction.
    pub trapezoidal_approx: bool,
    pub trapezoidal: TrapezoidalGrid,
}

impl Default for SrkConfig {
    fn default() -> Self {
        SrkConfig {
            trapezoidal_approx: true,
            trapezoidal: TrapezoidalGrid::default(),
        }
    }
}

impl SrkConfig {
    /// Build from a driver's option map.
    ///
    /// Only `trapezoidal_approx` is recognised. `false` and `null` select the
    /// Gaussian correction; any other non-boolean value is rejected. Every
    /// other key is ignored.
    pub fn from_options(options: &Map<String, Value>) -> SdeResult<Self> {
        let mut config = SrkConfig::default();
        match options.get("trapezoidal_approx") {
            None => {}
            Some(Value::Null) => config.trapezoidal_approx = false,
            Some(Value::Bool(flag)) => config.trapezoidal_approx = *flag,
            Some(other) => {
                return Err(SdeError::InvalidConfiguration {
                    field: "trapezoidal_approx".to_string(),
                    reason: format!("expected a boolean, got {}", other),
                })
            }
        }
        Ok(config)
    }

    pub fn validate(&self) -> SdeResult<()> {
        self.trapezoidal.validate()
    }
}

/// Strong order 1.5 SRK step for diagonal noise. Holds no state between steps.
#[derive(Clone, Debug, Default)]
pub struct SrkDiagonal {
    config: SrkConfig,
}

impl SrkDiagonal {
    pub fn new(config: SrkConfig) -> SdeResult<Self> {
        config.validate()?;
        log::debug!(
            "SRK diagonal solver configured: trapezoidal_approx = {}",
            config.trapezoidal_approx
        );
        if !config.trapezoidal_approx {
            log::warn!(
                "I_k0 uses an independent Gaussian correction; trajectories are not \
                 reproducible from the Brownian path alone"
            );
        }
        Ok(SrkDiagonal { config })
    }

    pub fn from_options(options: &Map<String, Value>) -> SdeResult<Self> {
        Self::new(SrkConfig::from_options(options)?)
    }

    pub fn config(&self) -> &SrkConfig {
        &self.config
    }
}

impl DiagonalSolver for SrkDiagonal {
    fn strong_order(&self) -> f64 {
        1.5
    }

    /// Advance `(t0, y0)` to `(t0 + dt, y1)`.
    ///
    /// # Algorithm Details
    ///
    /// 1. Sample the stochastic integrals for the step
    /// 2. For each stage, accumulate `H0_s`, `H1_s` from the evaluations of
    ///    earlier stages
    /// 3. Evaluate `f` at `H0_s` and `g` at `H1_s` once; later stages reuse them
    /// 4. Add the stage's drift and weighted diffusion contributions to `y1`
    ///
    /// # Errors
    ///
    /// `InvalidParameters` for `dt ≤ 0` before anything is sampled or evaluated.
    /// Errors from `model` or `bm` are returned as they are. NaN and infinite
    /// values are not inspected.
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
        R: Rng + ?Sized,
    {
        validate_step_size(dt)?;
        log::trace!("SRK step t0 = {}, dt = {}", t0, dt);

        let ints = StochasticIntegrals::estimate(bm, t0, dt, &self.config, rng)?;
        y0.ensure_same_shape(&ints.i_k, "Brownian increment")?;
        let sqrt_dt = dt.sqrt();

        let mut y1 = y0.clone();
        let mut f_evals: Vec<BlockState> = Vec::with_capacity(STAGES);
        let mut g_evals: Vec<BlockState> = Vec::with_capacity(STAGES);

        for s in 0..STAGES {
            let mut h0 = y0.clone();
            let mut h1 = y0.clone();
            for j in 0..s {
                let (f_j, g_j) = (&f_evals[j], &g_evals[j]);
                h0.scaled_add(A0[s][j] * dt, f_j);
                h0.add_weighted_product(B0[s][j] / dt, g_j, &ints.i_k0);
                h1.scaled_add(A1[s][j] * dt, f_j);
                h1.scaled_add(B1[s][j] * sqrt_dt, g_j);
            }

            let f_eval = model.drift(t0 + C0[s] * dt, &h0)?;
            y0.ensure_same_shape(&f_eval, "drift")?;
            let g_eval = model.diffusion(t0 + C1[s] * dt, &h1)?;
            y0.ensure_same_shape(&g_eval, "diffusion")?;

            let g_weight = ints.noise_weight([BETA1[s], BETA2[s], BETA3[s], BETA4[s]], dt, sqrt_dt);
            y1.scaled_add(ALPHA[s] * dt, &f_eval);
            y1.add_product(&g_eval, &g_weight);

            f_evals.push(f_eval);
            g_evals.push(g_eval);
        }

        Ok((t0 + dt, y1))
    }
}
