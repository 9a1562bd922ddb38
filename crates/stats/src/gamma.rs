//! Two-parameter gamma fit and statrs bridge.

use statrs::distribution::Gamma;

use crate::error::StatsError;
use crate::moments::mean;

/// Validated parameters for a Gamma distribution (shape/scale convention).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GammaParams {
    shape: f64,
    scale: f64,
}

impl GammaParams {
    /// Returns `None` unless both parameters are finite and strictly positive.
    pub fn new(shape: f64, scale: f64) -> Option<Self> {
        if shape.is_finite() && shape > 0.0 && scale.is_finite() && scale > 0.0 {
            Some(Self { shape, scale })
        } else {
            None
        }
    }

    /// Maximum-likelihood estimate using Thom's approximation.
    ///
    /// With `A = ln(mean) - mean(ln x)`:
    /// - shape = (1 + sqrt(1 + 4A/3)) / 4A
    /// - scale = mean / shape
    ///
    /// Expects strictly positive samples. Returns `None` for fewer than two
    /// samples or when all samples are equal (`A = 0`).
    pub fn fit_thom(positive: &[f64]) -> Option<Self> {
        if positive.len() < 2 {
            return None;
        }
        let m = mean(positive);
        let mean_log = positive.iter().map(|x| x.ln()).sum::<f64>() / positive.len() as f64;
        let a = m.ln() - mean_log;
        if !(a.is_finite() && a > 0.0) {
            return None;
        }
        let shape = (1.0 + (1.0 + 4.0 * a / 3.0).sqrt()) / (4.0 * a);
        Self::new(shape, m / shape)
    }

    /// Shape parameter (k).
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Scale parameter (theta).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Rate parameter (1 / scale), the parameterisation statrs expects.
    pub fn rate(&self) -> f64 {
        1.0 / self.scale
    }

    /// Builds the corresponding [`statrs::distribution::Gamma`].
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Distribution`] if statrs rejects the parameters.
    pub fn distribution(&self) -> Result<Gamma, StatsError> {
        Gamma::new(self.shape, self.rate()).map_err(|e| StatsError::Distribution {
            distribution: "gamma",
            message: e.to_string(),
        })
    }
}
