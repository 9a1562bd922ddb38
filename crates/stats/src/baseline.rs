//! Baseline reference statistics for anomaly standardisation.

use crate::error::StatsError;
use crate::moments::{finite, mean, population_sd};

/// Mean and population standard deviation of a reference period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    mean: f64,
    sd: f64,
    n: usize,
}

impl Baseline {
    /// Summarises the finite entries of `samples`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::EmptySample`] if no sample is finite and
    /// [`StatsError::ZeroVariance`] if the finite samples are all equal.
    pub fn from_samples(samples: &[f64]) -> Result<Self, StatsError> {
        let data = finite(samples);
        if data.is_empty() {
            return Err(StatsError::EmptySample);
        }
        let m = mean(&data);
        let sd = population_sd(&data);
        if !sd.is_finite() || sd <= 0.0 {
            return Err(StatsError::ZeroVariance {
                mean: m,
                n: data.len(),
            });
        }
        Ok(Self {
            mean: m,
            sd,
            n: data.len(),
        })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn sd(&self) -> f64 {
        self.sd
    }

    /// Number of finite samples the baseline was built from.
    pub fn n(&self) -> usize {
        self.n
    }

    /// `(x - mean) / sd`.
    pub fn standardize(&self, x: f64) -> f64 {
        (x - self.mean) / self.sd
    }
}
