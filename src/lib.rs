//! # srk-sde: Strong Order 1.5 SRK Steps for Diagonal-Noise SDEs
//!
//! A single-step integrator for Itô SDEs whose noise acts independently on
//! every state element:
//!
//! ```text
//! dY_t = f(t, Y_t) dt + g(t, Y_t) ⊙ dW_t
//! ```
//!
//! ## Key Features
//!
//! - **Rößler SRI2 tableau**: strong order 1.5 with 4 stages
//! - **Block-structured state**: any number of independent `ndarray` blocks
//! - **Pluggable Brownian motion**: the step only queries path values, so the
//!   same path can drive several schemes or resolutions
//! - **Reproducible by default**: `I_k0` comes from the path itself unless the
//!   Gaussian correction is selected explicitly
//!
//! The time-stepping loop, step-size control and model definitions belong to
//! the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use srk_sde::brownian::BrownianPath;
//! use srk_sde::models::Gbm;
//! use srk_sde::solvers::{DiagonalSolver, SrkDiagonal};
//! use srk_sde::{rng, BlockState};
//!
//! let model = Gbm::new(0.05, 0.2);
//! let solver = SrkDiagonal::default();
//! let mut y = BlockState::from_scalars(&[100.0]);
//! let mut t = 0.0;
//! let mut bm = BrownianPath::like(t, &y, 42).expect("valid start");
//! let mut rng = rng::seed_rng_from_u64(42);
//!
//! for _ in 0..100 {
//!     let (t1, y1) = solver
//!         .step(&model, &mut bm, t, &y, 0.01, &mut rng)
//!         .expect("positive step");
//!     t = t1;
//!     y = y1;
//! }
//! assert!((t - 1.0).abs() < 1e-9);
//! ```

// Module declarations
pub mod brownian;
pub mod error;
pub mod models;
pub mod rng;
pub mod solvers;
pub mod state;

// Re-export commonly used types for convenience
pub use error::{SdeError, SdeResult};
pub use state::BlockState;
