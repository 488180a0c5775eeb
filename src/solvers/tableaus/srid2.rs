//! SRI2 Coefficients for Diagonal-Noise SDEs
//!
//! Strong order 1.5 tableau from:
//! Rößler, A. (2010). "Runge-Kutta Methods for the Strong Approximation of
//! Solutions of Stochastic Differential Equations". SIAM Journal on Numerical
//! Analysis 48(3), 922-952.
//!
//! Stage `s` is built from stages `j < s` only, so every matrix below is
//! stored as a full `STAGES × STAGES` array with zeros on and above the
//! diagonal.

/// Number of stages
pub const STAGES: usize = 4;

/// Drift-stage node offsets: stage `s` of `H0` sits at `t0 + C0[s]·dt`.
pub const C0: [f64; STAGES] = [0.0, 1.0, 1.0 / 2.0, 0.0];

/// Diffusion-stage node offsets: stage `s` of `H1` sits at `t0 + C1[s]·dt`.
pub const C1: [f64; STAGES] = [0.0, 1.0 / 4.0, 1.0, 1.0 / 4.0];

/// Drift weights feeding `H0`.
pub const A0: [[f64; STAGES]; STAGES] = [
    [0.0, 0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0, 0.0],
    [1.0 / 4.0, 1.0 / 4.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0],
];

/// Drift weights feeding `H1`.
pub const A1: [[f64; STAGES]; STAGES] = [
    [0.0, 0.0, 0.0, 0.0],
    [1.0 / 4.0, 0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0 / 4.0, 0.0],
];

/// Diffusion weights feeding `H0` (scaled by `I_k0 / dt`).
pub const B0: [[f64; STAGES]; STAGES] = [
    [0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0],
    [1.0, 1.0 / 2.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0],
];

/// Diffusion weights feeding `H1` (scaled by `√dt`).
pub const B1: [[f64; STAGES]; STAGES] = [
    [0.0, 0.0, 0.0, 0.0],
    [-1.0 / 2.0, 0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0, 0.0],
    [2.0, -1.0, 1.0 / 2.0, 0.0],
];

/// Drift output weights.
pub const ALPHA: [f64; STAGES] = [1.0 / 6.0, 1.0 / 6.0, 2.0 / 3.0, 0.0];

/// Output weights of `I_k`.
pub const BETA1: [f64; STAGES] = [-1.0, 4.0 / 3.0, 2.0 / 3.0, 0.0];

/// Output weights of `I_kk / √dt`.
pub const BETA2: [f64; STAGES] = [1.0, -4.0 / 3.0, 1.0 / 3.0, 0.0];

/// Output weights of `I_k0 / dt`.
pub const BETA3: [f64; STAGES] = [2.0, -4.0 / 3.0, -2.0 / 3.0, 0.0];

/// Output weights of `I_kkk / dt`.
pub const BETA4: [f64; STAGES] = [-2.0, 5.0 / 3.0, -2.0 / 3.0, 1.0];

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-14;

    #[test]
    fn test_strictly_lower_triangular() {
        for s in 0..STAGES {
            for j in s..STAGES {
                assert_eq!(A0[s][j], 0.0, "A0[{}][{}]", s, j);
                assert_eq!(A1[s][j], 0.0, "A1[{}][{}]", s, j);
                assert_eq!(B0[s][j], 0.0, "B0[{}][{}]", s, j);
                assert_eq!(B1[s][j], 0.0, "B1[{}][{}]", s, j);
            }
        }
    }

    #[test]
    fn test_nodes_match_row_sums() {
        for s in 0..STAGES {
            let a0: f64 = A0[s].iter().sum();
            let a1: f64 = A1[s].iter().sum();
            assert!((a0 - C0[s]).abs() < TOL, "C0[{}] = {} vs row sum {}", s, C0[s], a0);
            assert!((a1 - C1[s]).abs() < TOL, "C1[{}] = {} vs row sum {}", s, C1[s], a1);
        }
    }

    #[test]
    fn test_output_weight_sums() {
        let sum = |w: &[f64; STAGES]| w.iter().sum::<f64>();
        assert!((sum(&ALPHA) - 1.0).abs() < TOL);
        assert!((sum(&BETA1) - 1.0).abs() < TOL);
        assert!(sum(&BETA2).abs() < TOL);
        assert!(sum(&BETA3).abs() < TOL);
        assert!(sum(&BETA4).abs() < TOL);
    }

    #[test]
    fn test_deterministic_part_is_third_order() {
        // With g ≡ 0 the tableau reduces to (A0, C0, ALPHA): b·1 = 1, b·c = 1/2,
        // b·c² = 1/3, b·A·c = 1/6.
        let mut bc = 0.0;
        let mut bc2 = 0.0;
        let mut bac = 0.0;
        for s in 0..STAGES {
            bc += ALPHA[s] * C0[s];
            bc2 += ALPHA[s] * C0[s] * C0[s];
            let ac: f64 = (0..STAGES).map(|j| A0[s][j] * C0[j]).sum();
            bac += ALPHA[s] * ac;
        }
        assert!((bc - 0.5).abs() < TOL);
        assert!((bc2 - 1.0 / 3.0).abs() < TOL);
        assert!((bac - 1.0 / 6.0).abs() < TOL);
    }
}
