//! Adaptive Refinement Engine
//!
//! Greedy worst-first subdivision on top of the Richardson-extrapolated
//! 2-point Gauss-Legendre rule. The interval with the largest estimated
//! error is bisected until the summed absolute error is within tolerance.

use log::{debug, trace, warn};
use thiserror::Error;

use crate::interval::IntervalSet;
use crate::rule::EVALS_PER_STEP;

/// A real function of one real variable
pub trait Integrand {
    /// Evaluate the integrand at `x`
    fn eval(&self, x: f64) -> f64;
}

impl<F> Integrand for F
where
    F: Fn(f64) -> f64 + ?Sized,
{
    fn eval(&self, x: f64) -> f64 {
        self(x)
    }
}

/// What to do when the very first whole-interval estimate already meets
/// the tolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrivialTolerance {
    /// Fail with [`IntegrationError::ToleranceTriviallyMet`]
    #[default]
    Reject,
    /// Return the whole-interval estimate with zero iterations
    Accept,
}

/// Integration settings
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveConfig {
    /// Absolute tolerance on the summed local errors (default: 1e-8)
    pub tolerance: f64,
    /// Give up with [`IntegrationError::ConvergenceFailure`] past this many
    /// iterations (default: no limit)
    pub max_iterations: Option<u64>,
    /// Handling of a tolerance met before any refinement (default: reject)
    pub trivial_tolerance: TrivialTolerance,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_iterations: None,
            trivial_tolerance: TrivialTolerance::Reject,
        }
    }
}

impl AdaptiveConfig {
    /// Default settings with the given tolerance
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Default::default()
        }
    }

    /// Cap the number of refinement iterations
    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Set the handling of a trivially met tolerance
    pub fn with_trivial_tolerance(mut self, policy: TrivialTolerance) -> Self {
        self.trivial_tolerance = policy;
        self
    }
}

/// Integration statistics for diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    /// Total number of integrand evaluations
    pub fn_evals: u64,
    /// Iterations reported by the last integration
    pub iterations: u64,
    /// Records in the final interval set of the last integration
    pub intervals: usize,
}

/// Outcome of a successful integration
#[derive(Debug, Clone, PartialEq)]
pub struct Integration {
    /// Sum of the per-interval estimates
    pub estimate: f64,
    /// Iteration counter as defined by the refinement loop (starts at 1;
    /// 0 when a trivially met tolerance is accepted)
    pub iterations: u64,
    /// Summed absolute local error at termination
    pub global_error: f64,
    /// Final interval set
    pub intervals: IntervalSet,
}

/// Adaptive Gauss-Legendre integrator
///
/// # Example
/// ```
/// use adaquad::{AdaptiveConfig, AdaptiveIntegrator};
///
/// let mut integrator = AdaptiveIntegrator::new(AdaptiveConfig::new(1e-10));
/// let result = integrator.integrate(&|x: f64| x.sin(), 0.0, std::f64::consts::PI).unwrap();
///
/// assert!((result.estimate - 2.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AdaptiveIntegrator {
    /// Integration settings
    pub config: AdaptiveConfig,
    /// Accumulated statistics
    pub stats: Stats,
}

impl AdaptiveIntegrator {
    /// Create an integrator with the given settings
    pub fn new(config: AdaptiveConfig) -> Self {
        Self {
            config,
            stats: Stats::default(),
        }
    }

    /// Integrate `f` over the interval between `a` and `b`.
    ///
    /// Bounds may come in either order. The loop runs until the summed
    /// absolute local error is at most `config.tolerance`; without
    /// `max_iterations` an integrand whose error never shrinks keeps it
    /// running forever.
    ///
    /// # Returns
    /// * `Ok(Integration)` on success
    /// * `Err(IntegrationError)` for invalid input, a trivially met
    ///   tolerance (under [`TrivialTolerance::Reject`]), a NaN or infinite
    ///   estimate, or an exceeded iteration cap
    pub fn integrate<F: Integrand + ?Sized>(
        &mut self,
        f: &F,
        a: f64,
        b: f64,
    ) -> Result<Integration, IntegrationError> {
        let tol = self.config.tolerance;
        validate_inputs(a, b, tol)?;

        let (lower, upper) = if a > b { (b, a) } else { (a, b) };
        debug!("integrating over [{}, {}] with tol = {:e}", lower, upper, tol);

        let mut set = IntervalSet::seed(lower, upper, f);
        self.stats.fn_evals += EVALS_PER_STEP;
        self.record_progress(0, &set);
        check_finite(&set, set.global_error(), lower, upper)?;

        let first = set.records()[0];
        if first.abs_error() <= tol {
            return self.trivially_met(set);
        }

        set.split_seed(f);
        self.stats.fn_evals += 2 * EVALS_PER_STEP;
        let mut iterations = 1u64;
        self.record_progress(iterations, &set);

        let mut global_error = set.global_error();
        check_finite(&set, global_error, lower, upper)?;

        while global_error > tol {
            if let Some(max) = self.config.max_iterations {
                if iterations >= max {
                    warn!(
                        "no convergence after {} iterations, global error {:e} > {:e}",
                        iterations, global_error, tol
                    );
                    return Err(IntegrationError::ConvergenceFailure {
                        iterations,
                        global_error,
                    });
                }
            }

            // The set holds at least the two records of the opening split
            let worst = set.refine_worst(f);
            debug_assert!(worst.is_some());
            self.stats.fn_evals += 2 * EVALS_PER_STEP;
            iterations += 1;
            self.record_progress(iterations, &set);

            global_error = set.global_error();
            check_finite(&set, global_error, lower, upper)?;
            trace!(
                "iteration {}: bisected record {:?}, global error {:e}",
                iterations,
                worst,
                global_error
            );
        }

        let estimate = set.total_estimate();
        debug!(
            "integral = {} after {} iterations ({} intervals, {} evaluations)",
            estimate,
            iterations,
            set.len(),
            self.stats.fn_evals
        );

        Ok(Integration {
            estimate,
            iterations,
            global_error,
            intervals: set,
        })
    }

    /// Reset statistics
    pub fn reset_stats(&mut self) {
        self.stats = Stats::default();
    }

    /// Keep `stats` in step with the current call, whichever way it ends
    fn record_progress(&mut self, iterations: u64, set: &IntervalSet) {
        self.stats.iterations = iterations;
        self.stats.intervals = set.len();
    }

    fn trivially_met(&mut self, set: IntervalSet) -> Result<Integration, IntegrationError> {
        let first = set.records()[0];
        match self.config.trivial_tolerance {
            TrivialTolerance::Reject => {
                warn!(
                    "tolerance {:e} already met by the whole-interval estimate (error {:e})",
                    self.config.tolerance, first.local_error
                );
                Err(IntegrationError::ToleranceTriviallyMet {
                    estimate: first.estimate,
                    local_error: first.local_error,
                })
            }
            TrivialTolerance::Accept => {
                debug!("accepting whole-interval estimate {} without refinement", first.estimate);
                Ok(Integration {
                    estimate: first.estimate,
                    iterations: 0,
                    global_error: first.abs_error(),
                    intervals: set,
                })
            }
        }
    }
}

/// Integrate `f` between `a` and `b` to absolute tolerance `tol`.
///
/// Uses [`AdaptiveConfig::new`] defaults: no iteration cap, and a tolerance
/// met before any refinement is reported as
/// [`IntegrationError::ToleranceTriviallyMet`].
///
/// # Returns
/// `(total_estimate, iterations)`
pub fn integrate<F: Integrand + ?Sized>(
    a: f64,
    b: f64,
    f: &F,
    tol: f64,
) -> Result<(f64, u64), IntegrationError> {
    let mut integrator = AdaptiveIntegrator::new(AdaptiveConfig::new(tol));
    let result = integrator.integrate(f, a, b)?;
    Ok((result.estimate, result.iterations))
}

/// Fail if any record carries a NaN or infinite value.
///
/// A non-finite estimate always yields a non-finite error, so a finite
/// `global_error` clears the whole set. Otherwise the error names the first
/// offending record, or the full span when only the sum overflowed.
fn check_finite(
    set: &IntervalSet,
    global_error: f64,
    lower: f64,
    upper: f64,
) -> Result<(), IntegrationError> {
    if global_error.is_finite() {
        return Ok(());
    }
    let (lower, upper) = set
        .first_non_finite()
        .map_or((lower, upper), |bad| (bad.lower, bad.upper));
    warn!("non-finite estimate on [{}, {}]", lower, upper);
    Err(IntegrationError::NonFiniteEstimate { lower, upper })
}

fn validate_inputs(a: f64, b: f64, tol: f64) -> Result<(), IntegrationError> {
    if !a.is_finite() || !b.is_finite() {
        return Err(IntegrationError::InvalidInput {
            message: format!("bounds must be finite, got [{}, {}]", a, b),
        });
    }
    if !tol.is_finite() || tol < 0.0 {
        return Err(IntegrationError::InvalidInput {
            message: format!("tolerance must be non-negative and finite, got {}", tol),
        });
    }
    if a == b {
        return Err(IntegrationError::InvalidBounds { bound: a });
    }
    Ok(())
}

/// Errors that can occur during integration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationError {
    /// Lower and upper bound coincide
    #[error("degenerate interval: both bounds are {bound}")]
    InvalidBounds {
        /// The repeated bound
        bound: f64,
    },
    /// The first whole-interval estimate already satisfies the tolerance
    #[error("tolerance already met before refinement: estimate {estimate}, local error {local_error:e}")]
    ToleranceTriviallyMet {
        /// Whole-interval estimate
        estimate: f64,
        /// Its signed local error
        local_error: f64,
    },
    /// Iteration cap reached before the tolerance was met
    #[error("no convergence after {iterations} iterations (global error {global_error:e})")]
    ConvergenceFailure {
        /// Iterations performed
        iterations: u64,
        /// Summed absolute local error at the cap
        global_error: f64,
    },
    /// The integrand produced NaN or infinity, or the summed error overflowed
    #[error("non-finite estimate on [{lower}, {upper}]")]
    NonFiniteEstimate {
        /// Lower bound of the offending interval
        lower: f64,
        /// Upper bound of the offending interval
        upper: f64,
    },
    /// Invalid input parameters
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Description of the invalid input
        message: String,
    },
}
