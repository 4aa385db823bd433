//! Parameter range generation for sweeps.

use crate::error::{Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Spacing of the generated samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeMethod {
    /// Evenly spaced, both endpoints included
    Linear,
    /// `10^e` for exponents evenly spaced in `[start, stop)`
    Log,
    /// Uniform samples in `[start, stop)`
    Random,
}

impl RangeMethod {
    pub const ALL: [RangeMethod; 3] = [RangeMethod::Linear, RangeMethod::Log, RangeMethod::Random];

    pub fn as_str(&self) -> &'static str {
        match self {
            RangeMethod::Linear => "linear",
            RangeMethod::Log => "log",
            RangeMethod::Random => "random",
        }
    }
}

impl fmt::Display for RangeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RangeMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "range method '{s}' not supported, choose among linear, log, random"
                ))
            })
    }
}

/// Generate `num` samples between `start` and `stop`
///
/// Random samples come from the thread-local generator; use
/// [`get_range_with_rng`] for reproducible sweeps.
pub fn get_range(start: f64, stop: f64, num: usize, method: RangeMethod) -> Result<Vec<f64>> {
    get_range_with_rng(start, stop, num, method, &mut rand::rng())
}

/// Generate `num` samples between `start` and `stop` drawing from `rng`
pub fn get_range_with_rng<R: Rng + ?Sized>(
    start: f64,
    stop: f64,
    num: usize,
    method: RangeMethod,
    rng: &mut R,
) -> Result<Vec<f64>> {
    if !(start < stop) {
        return Err(Error::InvalidArgument(format!(
            "start ({start}) must be smaller than stop ({stop})"
        )));
    }
    if num == 0 {
        return Err(Error::InvalidArgument(
            "number of samples must be a positive integer".to_string(),
        ));
    }

    let samples = match method {
        RangeMethod::Linear => linspace(start, stop, num),
        RangeMethod::Log => {
            let step = (stop - start) / num as f64;
            (0..num)
                .map(|i| 10f64.powf(start + i as f64 * step))
                .collect()
        }
        RangeMethod::Random => (0..num)
            .map(|_| rng.random::<f64>() * (stop - start) + start)
            .collect(),
    };

    Ok(samples)
}

fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    if num == 1 {
        return vec![start];
    }
    let step = (stop - start) / (num - 1) as f64;
    let mut samples: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
    // Pin the endpoint against accumulated rounding
    samples[num - 1] = stop;
    samples
}
