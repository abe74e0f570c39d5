use itertools::{Itertools, MinMaxResult};

/// Smallest and largest finite value, or `None` for an empty (or all-NaN) slice.
pub fn finite_min_max(values: &[f64]) -> Option<(f64, f64)> {
    match values.iter().copied().filter(|v| v.is_finite()).minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(v) => Some((v, v)),
        MinMaxResult::MinMax(min, max) => Some((min, max)),
    }
}

/// Widens `(min, max)` by `pct` of its span on each side.
/// A flat range gets widened by `pct` of its magnitude instead (or by 1.0 at zero)
/// so the plot never collapses to a line.
pub fn padded_range(min: f64, max: f64, pct: f64) -> (f64, f64) {
    let span = max - min;
    let pad = if span > 0.0 {
        span * pct
    } else if min != 0.0 {
        min.abs() * pct
    } else {
        1.0
    };
    (min - pad, max + pad)
}
