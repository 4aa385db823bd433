//! Binomial proportion confidence interval.

/// Standard normal quantile for a 95% two-sided interval
pub const WILSON_Z_95: f64 = 1.96;

/// Half-width of the Wilson score interval for proportion `p` over `n` trials
///
/// `z·sqrt((p(1-p) + z²/4n) / n) / (1 + z²/n)` with `z = 1.96`.
/// Returns `0.0` when `n == 0`; that value is a sentinel, not an estimate.
pub fn wilson_score(p: f64, n: u64) -> f64 {
    if n == 0 {
        return 0.0;
    }

    let n = n as f64;
    let z2 = WILSON_Z_95 * WILSON_Z_95;
    WILSON_Z_95 * ((p * (1.0 - p) + z2 / (4.0 * n)) / n).sqrt() / (1.0 + z2 / n)
}
