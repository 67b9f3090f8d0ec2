//! Percentile computation over page-count distributions.

/// Value at `percentile` over `counts`, using linear interpolation at rank
/// `p/100 * (n-1)` between the two nearest sorted neighbours (numpy's
/// default rule).
///
/// The 0th percentile is the minimum and the 100th the maximum, so a
/// strictly-below cutoff at 0 removes nothing and at 100 keeps only nodes
/// at the maximum.
///
/// Returns `None` for an empty distribution.
pub fn percentile_of(counts: &[u64], percentile: u8) -> Option<f64> {
    debug_assert!(percentile <= 100);

    if counts.is_empty() {
        return None;
    }

    let mut sorted = counts.to_vec();
    sorted.sort_unstable();

    let n = sorted.len();
    if n == 1 {
        return Some(sorted[0] as f64);
    }

    let rank = f64::from(percentile) / 100.0 * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;

    Some(sorted[lo] as f64 * (1.0 - frac) + sorted[hi] as f64 * frac)
}
