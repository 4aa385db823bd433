//! Statistics helpers for conversion experiments
//!
//! - `confidence`: Wilson score interval for binomial accuracy estimates
//! - `range`: parameter grids for sweeps (linear, log, random)

mod confidence;
mod range;


pub use confidence::{wilson_score, WILSON_Z_95};
pub use range::{get_range, get_range_with_rng, RangeMethod};
