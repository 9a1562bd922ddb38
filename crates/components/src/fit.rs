//! Distribution fitting seam for standardised indices.

use cdi_stats::{Periodicity, SpiParams, StatsError, spi_gamma};

/// Transforms an accumulation series into standard-normal index values.
///
/// `values` start in January of `data_start_year` and span full years of
/// `periodicity` (a trailing partial year is allowed); `NaN` marks gaps.
/// Results are clipped to `[-3.09, 3.09]` and have the input's length.
pub trait DistributionFit: Send + Sync {
    /// # Errors
    ///
    /// Returns [`StatsError`] if the parameters are invalid or the
    /// distribution cannot be constructed.
    fn fit(
        &self,
        values: &[f64],
        data_start_year: i32,
        calibration_start_year: i32,
        calibration_end_year: i32,
        periodicity: Periodicity,
    ) -> Result<Vec<f64>, StatsError>;
}

/// Gamma-fitted SPI over a rolling accumulation of `scale` periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GammaFit {
    scale: usize,
}

impl GammaFit {
    pub fn new(scale: usize) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> usize {
        self.scale
    }
}

impl Default for GammaFit {
    fn default() -> Self {
        Self::new(1)
    }
}

impl DistributionFit for GammaFit {
    fn fit(
        &self,
        values: &[f64],
        data_start_year: i32,
        calibration_start_year: i32,
        calibration_end_year: i32,
        periodicity: Periodicity,
    ) -> Result<Vec<f64>, StatsError> {
        spi_gamma(
            values,
            &SpiParams {
                scale: self.scale,
                data_start_year,
                calibration_start_year,
                calibration_end_year,
                periodicity,
            },
        )
    }
}
