//! # adaquad: Adaptive Gauss-Legendre Quadrature
//!
//! Numerical integration of a real function over a bounded interval to an
//! absolute error tolerance, by greedy worst-first subdivision.
//!
//! ## Features
//!
//! - 2-point Gauss-Legendre rule, exact for cubics
//! - Richardson extrapolation error indicator `(I2 - I1) / 15` per interval
//! - Worst-interval-first bisection until the summed error meets the tolerance
//! - Optional iteration cap and a configurable trivial-tolerance policy
//! - Plain-text interval reports
//!
//! ## Basic Usage
//!
//! ```rust
//! use adaquad::integrate;
//!
//! let (value, iterations) = integrate(0.0, 1.0, &|x: f64| x.exp(), 1e-10).unwrap();
//! assert!((value - (std::f64::consts::E - 1.0)).abs() < 1e-9);
//! assert!(iterations > 1);
//! ```
//!
//! Bounds may be given in either order; equal bounds fail with
//! [`IntegrationError::InvalidBounds`].
//!
//! ## Trivially Met Tolerance
//!
//! If the first whole-interval error estimate is already within tolerance,
//! the default is to fail with [`IntegrationError::ToleranceTriviallyMet`]
//! rather than accept an estimate nothing was refined against. This trips
//! for any integrand the rule handles exactly, such as polynomials of degree
//! at most 3:
//!
//! ```rust
//! use adaquad::{integrate, AdaptiveConfig, AdaptiveIntegrator, IntegrationError, TrivialTolerance};
//!
//! let line = |x: f64| x;
//! assert!(matches!(
//!     integrate(0.0, 1.0, &line, 1e-8),
//!     Err(IntegrationError::ToleranceTriviallyMet { .. })
//! ));
//!
//! let config = AdaptiveConfig::new(1e-8).with_trivial_tolerance(TrivialTolerance::Accept);
//! let result = AdaptiveIntegrator::new(config).integrate(&line, 0.0, 1.0).unwrap();
//! assert_eq!(result.iterations, 0);
//! assert!((result.estimate - 0.5).abs() < 1e-8);
//! ```
//!
//! ## Termination
//!
//! There is no iteration limit unless one is configured with
//! [`AdaptiveConfig::with_max_iterations`]. An integrand whose local errors
//! never shrink (a discontinuity combined with a very small tolerance, for
//! instance) otherwise runs indefinitely.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod interval;
pub mod report;
pub mod rule;
pub mod solver;

pub use interval::{IntervalRecord, IntervalSet};
pub use report::{write_report, write_report_file};
pub use rule::{quad, richardson_step, RichardsonEstimate};
pub use solver::{
    integrate, AdaptiveConfig, AdaptiveIntegrator, Integrand, Integration, IntegrationError,
    Stats, TrivialTolerance,
};
