//! Plain-text reports of an integration
//!
//! One row per interval in interval-set order, followed by the total and
//! the iteration count.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::solver::Integration;

/// Title line of every report
pub const TITLE: &str = "Approximation of an Integral using adaptive integration";

/// Column headers, in row order
pub const COLUMNS: [&str; 4] = ["Lower Bound", "Upper Bound", "Approximation", "Local Error"];

const WIDTH: usize = 24;

impl fmt::Display for Integration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", TITLE)?;
        writeln!(
            f,
            "{:<w$}{:<w$}{:<w$}{:<w$}",
            COLUMNS[0],
            COLUMNS[1],
            COLUMNS[2],
            COLUMNS[3],
            w = WIDTH
        )?;
        for rec in &self.intervals {
            writeln!(
                f,
                "{:<w$.15e}{:<w$.15e}{:<w$.15e}{:<w$.15e}",
                rec.lower,
                rec.upper,
                rec.estimate,
                rec.local_error,
                w = WIDTH
            )?;
        }
        writeln!(f, "Approximation of the integral: {}", self.estimate)?;
        write!(f, "Iterations: {}", self.iterations)
    }
}

/// Write the report for `result` to `writer`
pub fn write_report<W: Write>(mut writer: W, result: &Integration) -> io::Result<()> {
    writeln!(writer, "{}", result)?;
    writer.flush()
}

/// Create (or truncate) the file at `path` and write the report into it
pub fn write_report_file<P: AsRef<Path>>(path: P, result: &Integration) -> io::Result<()> {
    let file = File::create(path)?;
    write_report(BufWriter::new(file), result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::IntervalSet;

    fn sample() -> Integration {
        let f = |x: f64| x.powi(4);
        let mut intervals = IntervalSet::seed(0.0, 1.0, &f);
        intervals.split_seed(&f);
        intervals.bisect(1, &f);
        Integration {
            estimate: intervals.total_estimate(),
            iterations: 2,
            global_error: intervals.global_error(),
            intervals,
        }
    }

    #[test]
    fn test_report_layout() {
        let text = sample().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], TITLE);
        for col in COLUMNS {
            assert!(lines[1].contains(col), "Header missing {}", col);
        }
        // Title, header, three rows, total, iterations
        assert_eq!(lines.len(), 7);
        assert!(lines[5].starts_with("Approximation of the integral: "));
        assert_eq!(lines[6], "Iterations: 2");
    }

    #[test]
    fn test_rows_follow_set_order() {
        let result = sample();
        let text = result.to_string();
        let rows: Vec<&str> = text.lines().skip(2).take(3).collect();

        for (row, rec) in rows.iter().zip(result.intervals.iter()) {
            let fields: Vec<f64> = row
                .split_whitespace()
                .map(|s| s.parse().unwrap())
                .collect();
            assert_eq!(fields.len(), 4);
            assert_eq!(fields[0], rec.lower);
            assert_eq!(fields[1], rec.upper);
        }
    }

    #[test]
    fn test_write_report_to_buffer() {
        let result = sample();
        let mut buf = Vec::new();
        write_report(&mut buf, &result).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, format!("{}\n", result));
    }

    #[test]
    fn test_write_report_file() {
        let path = std::env::temp_dir().join(format!("adaquad-report-{}.txt", std::process::id()));
        let result = sample();

        write_report_file(&path, &result).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(text.starts_with(TITLE));
        assert!(text.ends_with("Iterations: 2\n"));
    }
}
