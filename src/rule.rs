//! Two-Point Gauss-Legendre Rule and Richardson Error Estimate
//!
//! The 2-point Gauss-Legendre rule on `[0, 1]` samples the integrand at
//! `x = (1 ∓ 1/√3) / 2` with equal weights of `1/2`. It integrates every
//! polynomial up to degree 3 exactly, so its local truncation error on an
//! interval of width `h` is `O(h^5)` and the composite error drops by a
//! factor of `2^4 = 16` each time the interval is halved.
//!
//! Comparing the whole-interval rule with the sum over both halves gives the
//! Richardson error indicator `(I2 - I1) / 15`.

use crate::solver::Integrand;

/// Number of integrand evaluations per rule application
pub const NODES: usize = 2;

/// Degree of polynomials the rule integrates exactly
pub const EXACT_DEGREE: u8 = 3;

/// Shifted Gauss-Legendre nodes on `[0, 1]`
///
/// X[0] = (1 - 1/√3) / 2, X[1] = (1 + 1/√3) / 2
pub const X: [f64; NODES] = [0.2113248654051871, 0.7886751345948128];

/// Weights matching the nodes in `X` (sum to 1)
pub const W: [f64; NODES] = [0.5, 0.5];

/// Richardson weight `2^(EXACT_DEGREE + 1) - 1`
pub const RICHARDSON_DIVISOR: f64 = 15.0;

/// Evaluations spent by one [`richardson_step`]: the whole interval plus both halves
pub const EVALS_PER_STEP: u64 = (3 * NODES) as u64;

/// Refined estimate and error indicator for one interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RichardsonEstimate {
    /// Sum of the rule over both halves of the interval
    pub estimate: f64,
    /// Signed error indicator `(I2 - I1) / 15`
    pub local_error: f64,
}

/// Apply the 2-point Gauss-Legendre rule on `[lower, upper]`.
///
/// Anything the integrand does (panicking, returning NaN) is passed straight
/// through to the caller.
pub fn quad<F: Integrand + ?Sized>(lower: f64, upper: f64, f: &F) -> f64 {
    let delta = upper - lower;
    delta * (W[0] * f.eval(lower + delta * X[0]) + W[1] * f.eval(lower + delta * X[1]))
}

/// Coarse and fine rule on `[lower, upper]`, combined into a refined
/// estimate and a signed local error.
///
/// The sign is kept so callers decide when to take the magnitude.
pub fn richardson_step<F: Integrand + ?Sized>(lower: f64, upper: f64, f: &F) -> RichardsonEstimate {
    let mid = (lower + upper) / 2.0;
    let coarse = quad(lower, upper, f);
    let fine = quad(lower, mid, f) + quad(mid, upper, f);

    RichardsonEstimate {
        estimate: fine,
        local_error: (fine - coarse) / RICHARDSON_DIVISOR,
    }
}
