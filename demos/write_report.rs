//! Integrate sqrt(x+1) cos(x^2) and write the interval table to a file.
//!
//! Run with:
//!   cargo run --example write_report -- [output path]
//!
//! The path defaults to `output.txt`.

use adaquad::{write_report_file, AdaptiveConfig, AdaptiveIntegrator};

fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| "output.txt".to_string());

    let mut integrator = AdaptiveIntegrator::new(AdaptiveConfig::new(1e-6));
    let result = match integrator.integrate(&|x: f64| (x + 1.0).sqrt() * (x * x).cos(), 0.0, 3.0) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Integration failed: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = write_report_file(&path, &result) {
        eprintln!("Could not write {path}: {e}");
        std::process::exit(1);
    }

    println!(
        "Approximation of the integral: {} (iterations: {}), report written to {path}",
        result.estimate, result.iterations
    );
}
