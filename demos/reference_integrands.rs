//! Adaptive integration of three test integrands over [0, 1].
//!
//! Run with:
//!   cargo run --example reference_integrands

use adaquad::{AdaptiveConfig, AdaptiveIntegrator, Integrand};

/// f(x) = x^20 cos(x)
fn steep(x: f64) -> f64 {
    x.powi(20) * x.cos()
}

/// h(x) = sqrt(x + 1) cos(x^2)
fn chirp(x: f64) -> f64 {
    (x + 1.0).sqrt() * (x * x).cos()
}

/// g(x) = (-x^4 + x^3 - x^2 + x) sqrt(x) cos(x)
fn damped(x: f64) -> f64 {
    (-x.powi(4) + x.powi(3) - x * x + x) * x.sqrt() * x.cos()
}

fn main() {
    let tol = 1e-10;
    let cases: [(&str, &dyn Integrand); 3] = [
        ("x^20 cos(x)", &steep),
        ("sqrt(x+1) cos(x^2)", &chirp),
        ("(-x^4+x^3-x^2+x) sqrt(x) cos(x)", &damped),
    ];

    println!("Adaptive Gauss-Legendre on [0, 1], tol = {tol:e}");
    println!();

    for (name, f) in cases {
        let mut integrator = AdaptiveIntegrator::new(AdaptiveConfig::new(tol));
        match integrator.integrate(f, 0.0, 1.0) {
            Ok(result) => {
                println!("  {name}");
                println!("    integral:     {:.15}", result.estimate);
                println!("    global error: {:.3e}", result.global_error);
                println!("    iterations:   {}", result.iterations);
                println!("    intervals:    {}", result.intervals.len());
                println!("    evaluations:  {}", integrator.stats.fn_evals);
            }
            Err(e) => eprintln!("  {name}: {e}"),
        }
        println!();
    }
}
