//! Interval Bookkeeping for Adaptive Refinement
//!
//! The active sub-intervals live in a flat `Vec`. Refining one overwrites
//! its slot with the left half and pushes the right half to the end, so
//! indices of the untouched records stay valid and no record is ever
//! removed. The spans always tile the original interval exactly.

use crate::rule::{richardson_step, RichardsonEstimate};
use crate::solver::Integrand;

/// One active sub-interval with its current estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalRecord {
    /// Lower bound
    ///
    /// Strictly below `upper` until repeated bisection shrinks the span to
    /// adjacent floats, after which the midpoint collapses onto a bound.
    pub lower: f64,
    /// Upper bound
    pub upper: f64,
    /// Quadrature estimate over `[lower, upper]`
    pub estimate: f64,
    /// Estimated error of `estimate`
    ///
    /// Records produced by the opening split keep the signed value from
    /// [`richardson_step`]; records produced by refinement are non-negative.
    pub local_error: f64,
}

impl IntervalRecord {
    /// Evaluate `[lower, upper]` and keep the signed error
    pub fn evaluate<F: Integrand + ?Sized>(lower: f64, upper: f64, f: &F) -> Self {
        let RichardsonEstimate {
            estimate,
            local_error,
        } = richardson_step(lower, upper, f);
        Self {
            lower,
            upper,
            estimate,
            local_error,
        }
    }

    /// Width of the span
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Midpoint of the span
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Magnitude of the local error
    pub fn abs_error(&self) -> f64 {
        self.local_error.abs()
    }

    /// True if both the estimate and its error are finite
    pub fn is_finite(&self) -> bool {
        self.estimate.is_finite() && self.local_error.is_finite()
    }

    fn with_abs_error(mut self) -> Self {
        self.local_error = self.local_error.abs();
        self
    }
}

/// Ordered collection of the active sub-intervals
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntervalSet {
    records: Vec<IntervalRecord>,
}

impl IntervalSet {
    /// Start from a single record spanning `[lower, upper]`
    pub fn seed<F: Integrand + ?Sized>(lower: f64, upper: f64, f: &F) -> Self {
        Self {
            records: vec![IntervalRecord::evaluate(lower, upper, f)],
        }
    }

    /// Split the seed record once at its midpoint.
    ///
    /// Both halves keep their signed errors. Only meaningful while the set
    /// holds exactly the seed record.
    pub fn split_seed<F: Integrand + ?Sized>(&mut self, f: &F) {
        debug_assert_eq!(self.records.len(), 1, "split_seed called on a refined set");
        let seed = self.records[0];
        let mid = seed.midpoint();

        self.records[0] = IntervalRecord::evaluate(seed.lower, mid, f);
        self.records.push(IntervalRecord::evaluate(mid, seed.upper, f));
    }

    /// Index of the record with the largest `|local_error|`.
    ///
    /// Ties resolve to the earliest index. Returns `None` for an empty set.
    pub fn worst(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, rec) in self.records.iter().enumerate() {
            let err = rec.abs_error();
            match best {
                // Strict comparison keeps the first occurrence
                Some((_, max)) if err <= max => {}
                _ => best = Some((i, err)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Bisect the record at `index`, storing the left half in place and
    /// appending the right half. Both halves get non-negative errors.
    ///
    /// Returns the record that was replaced.
    pub fn bisect<F: Integrand + ?Sized>(&mut self, index: usize, f: &F) -> IntervalRecord {
        let parent = self.records[index];
        let mid = parent.midpoint();

        let left = IntervalRecord::evaluate(parent.lower, mid, f).with_abs_error();
        let right = IntervalRecord::evaluate(mid, parent.upper, f).with_abs_error();

        self.records[index] = left;
        self.records.push(right);
        parent
    }

    /// Bisect the worst record. Returns its index, or `None` if the set is empty.
    pub fn refine_worst<F: Integrand + ?Sized>(&mut self, f: &F) -> Option<usize> {
        let index = self.worst()?;
        self.bisect(index, f);
        Some(index)
    }

    /// Sum of `|local_error|` over all records
    pub fn global_error(&self) -> f64 {
        self.records.iter().map(IntervalRecord::abs_error).sum()
    }

    /// Sum of the per-record estimates
    pub fn total_estimate(&self) -> f64 {
        self.records.iter().map(|r| r.estimate).sum()
    }

    /// First record whose estimate or error is NaN or infinite
    pub fn first_non_finite(&self) -> Option<&IntervalRecord> {
        self.records.iter().find(|r| !r.is_finite())
    }

    /// Sum of record widths; equals the original span when the set is consistent
    pub fn total_span(&self) -> f64 {
        self.records.iter().map(IntervalRecord::width).sum()
    }

    /// Records in their current order
    pub fn records(&self) -> &[IntervalRecord] {
        &self.records
    }

    /// Iterate over the records
    pub fn iter(&self) -> std::slice::Iter<'_, IntervalRecord> {
        self.records.iter()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the set holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = &'a IntervalRecord;
    type IntoIter = std::slice::Iter<'a, IntervalRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(lower: f64, upper: f64, local_error: f64) -> IntervalRecord {
        IntervalRecord {
            lower,
            upper,
            estimate: 0.0,
            local_error,
        }
    }

    /// Sorted spans must be contiguous and cover [lower, upper]
    fn assert_tiles(set: &IntervalSet, lower: f64, upper: f64) {
        let mut spans: Vec<(f64, f64)> = set.iter().map(|r| (r.lower, r.upper)).collect();
        spans.sort_by(|a, b| a.0.total_cmp(&b.0));

        assert_eq!(spans.first().map(|s| s.0), Some(lower));
        assert_eq!(spans.last().map(|s| s.1), Some(upper));
        for pair in spans.windows(2) {
            assert_eq!(pair[0].1, pair[1].0, "Gap or overlap between {:?} and {:?}", pair[0], pair[1]);
        }
        for &(lo, hi) in &spans {
            assert!(lo < hi, "Degenerate span [{}, {}]", lo, hi);
        }
    }

    #[test]
    fn test_worst_prefers_first_on_ties() {
        let set = IntervalSet {
            records: vec![
                record(0.0, 1.0, 0.1),
                record(1.0, 2.0, -0.3),
                record(2.0, 3.0, 0.3),
                record(3.0, 4.0, 0.2),
            ],
        };
        assert_eq!(set.worst(), Some(1));
    }

    #[test]
    fn test_worst_uses_magnitude() {
        let set = IntervalSet {
            records: vec![record(0.0, 1.0, 0.1), record(1.0, 2.0, -0.5)],
        };
        assert_eq!(set.worst(), Some(1));
    }

    #[test]
    fn test_worst_on_empty_set() {
        assert_eq!(IntervalSet::default().worst(), None);
    }

    #[test]
    fn test_split_seed_keeps_signed_errors() {
        let f = |x: f64| -x.powi(4);
        let mut set = IntervalSet::seed(0.0, 1.0, &f);
        set.split_seed(&f);

        assert_eq!(set.len(), 2);
        assert_eq!((set.records()[0].lower, set.records()[0].upper), (0.0, 0.5));
        assert_eq!((set.records()[1].lower, set.records()[1].upper), (0.5, 1.0));
        assert!(set.records().iter().all(|r| r.local_error < 0.0));
    }

    #[test]
    fn test_bisect_replaces_in_place_and_appends() {
        let f = |x: f64| -x.powi(4);
        let mut set = IntervalSet::seed(0.0, 1.0, &f);
        set.split_seed(&f);

        let parent = set.bisect(0, &f);
        assert_eq!((parent.lower, parent.upper), (0.0, 0.5));

        assert_eq!(set.len(), 3);
        assert_eq!((set.records()[0].lower, set.records()[0].upper), (0.0, 0.25));
        assert_eq!((set.records()[1].lower, set.records()[1].upper), (0.5, 1.0));
        assert_eq!((set.records()[2].lower, set.records()[2].upper), (0.25, 0.5));

        // Refined halves are normalized, the untouched record is not
        assert!(set.records()[0].local_error >= 0.0);
        assert!(set.records()[2].local_error >= 0.0);
        assert!(set.records()[1].local_error < 0.0);
    }

    #[test]
    fn test_refinement_preserves_partition() {
        let f = |x: f64| (5.0 * x).sin() * x.exp();
        let (lower, upper) = (-1.0, 2.0);
        let mut set = IntervalSet::seed(lower, upper, &f);
        set.split_seed(&f);

        for _ in 0..200 {
            set.refine_worst(&f);
            assert!(
                (set.total_span() - (upper - lower)).abs() < 1e-12,
                "Span {} drifted from {}",
                set.total_span(),
                upper - lower
            );
        }
        assert_tiles(&set, lower, upper);
    }

    #[test]
    fn test_refinement_reduces_global_error() {
        let f = |x: f64| (3.0 * x).cos();
        let mut set = IntervalSet::seed(0.0, 4.0, &f);
        set.split_seed(&f);

        let before = set.global_error();
        for _ in 0..20 {
            set.refine_worst(&f);
        }
        let after = set.global_error();
        assert!(after < before / 10.0, "Global error {} -> {}", before, after);
    }

    #[test]
    fn test_first_non_finite_locates_record() {
        let f = |x: f64| if x > 0.5 { f64::NAN } else { x };
        let mut set = IntervalSet::seed(0.0, 1.0, &f);
        set.split_seed(&f);

        let bad = set.first_non_finite().unwrap();
        assert_eq!((bad.lower, bad.upper), (0.5, 1.0));
        assert!(set.records()[0].is_finite());
    }

    #[test]
    fn test_total_estimate_sums_records() {
        let set = IntervalSet {
            records: vec![
                IntervalRecord {
                    lower: 0.0,
                    upper: 1.0,
                    estimate: 1.5,
                    local_error: 0.0,
                },
                IntervalRecord {
                    lower: 1.0,
                    upper: 2.0,
                    estimate: -0.25,
                    local_error: 0.0,
                },
            ],
        };
        assert_eq!(set.total_estimate(), 1.25);
        assert_eq!(set.total_span(), 2.0);
    }
}
