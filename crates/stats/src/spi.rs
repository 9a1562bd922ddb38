//! Standardised Precipitation Index via a per-period gamma fit.
//!
//! Inputs are laid out in full calendar years: the first value belongs to
//! January of `data_start_year` and each year contributes one value per
//! period (12 for monthly data, 366 for daily data with a Feb 29 slot every
//! year). A trailing partial year is padded with `NaN`.

use statrs::distribution::{ContinuousCDF, Normal};
use tracing::{debug, warn};

use crate::error::StatsError;
use crate::gamma::GammaParams;

/// Lower bound of a fitted index value.
pub const SPI_MIN: f64 = -3.09;

/// Upper bound of a fitted index value.
pub const SPI_MAX: f64 = 3.09;

/// Number of values per year in the input layout.
///
/// Precipitation is fitted on monthly totals only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Periodicity {
    Monthly,
}

impl Periodicity {
    /// Values per year.
    pub fn period_len(self) -> usize {
        match self {
            Self::Monthly => 12,
        }
    }
}

/// Calibration window and layout for an SPI computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiParams {
    /// Number of consecutive periods summed before fitting.
    pub scale: usize,
    /// Calendar year of the first input value.
    pub data_start_year: i32,
    /// First calibration year, inclusive.
    pub calibration_start_year: i32,
    /// Last calibration year, inclusive.
    pub calibration_end_year: i32,
    pub periodicity: Periodicity,
}

impl SpiParams {
    /// # Errors
    ///
    /// Returns [`StatsError::InvalidParameters`] for a zero scale or a
    /// reversed calibration window.
    pub fn validate(&self) -> Result<(), StatsError> {
        if self.scale == 0 {
            return Err(StatsError::InvalidParameters {
                reason: "scale must be at least 1".to_string(),
            });
        }
        if self.calibration_start_year > self.calibration_end_year {
            return Err(StatsError::InvalidParameters {
                reason: format!(
                    "calibration start year {} is after end year {}",
                    self.calibration_start_year, self.calibration_end_year
                ),
            });
        }
        Ok(())
    }
}

/// Rolling sum over `scale` consecutive values.
///
/// Position `i` holds the sum of `values[i + 1 - scale ..= i]`; the first
/// `scale - 1` positions and any window containing `NaN` are `NaN`.
pub fn sum_to_scale(values: &[f64], scale: usize) -> Vec<f64> {
    if scale <= 1 {
        return values.to_vec();
    }
    (0..values.len())
        .map(|i| {
            if i + 1 < scale {
                f64::NAN
            } else {
                values[i + 1 - scale..=i].iter().sum()
            }
        })
        .collect()
}

/// Computes gamma-fitted SPI values, clipped to [`SPI_MIN`]..=[`SPI_MAX`].
///
/// Negative inputs are clipped to zero before scaling. An input with no
/// finite value is returned unchanged. Output has the input's length;
/// positions that are `NaN` in the scaled input, or whose calendar period
/// cannot be fitted, are `NaN`.
///
/// # Errors
///
/// Returns [`StatsError::InvalidParameters`] if `params` is invalid.
#[tracing::instrument(skip(values), fields(n = values.len()))]
pub fn spi_gamma(values: &[f64], params: &SpiParams) -> Result<Vec<f64>, StatsError> {
    params.validate()?;
    if values.iter().all(|v| !v.is_finite()) {
        return Ok(values.to_vec());
    }

    let clipped: Vec<f64> = if values.iter().any(|&v| v < 0.0) {
        warn!("input contains negative values, clipping to zero");
        values.iter().map(|&v| if v < 0.0 { 0.0 } else { v }).collect()
    } else {
        values.to_vec()
    };

    let scaled = sum_to_scale(&clipped, params.scale);
    let fitted = transform_fitted_gamma(&scaled, params)?;
    Ok(fitted
        .into_iter()
        .map(|z| z.clamp(SPI_MIN, SPI_MAX))
        .collect())
}

/// Fits a zero-inflated gamma per calendar period over the calibration years
/// and maps every value to the standard normal quantile of its probability.
///
/// Not clipped; see [`spi_gamma`].
///
/// # Errors
///
/// Returns [`StatsError::InvalidParameters`] if `params` is invalid.
pub fn transform_fitted_gamma(values: &[f64], params: &SpiParams) -> Result<Vec<f64>, StatsError> {
    params.validate()?;
    let period_len = params.periodicity.period_len();
    let n_years = values.len().div_ceil(period_len);
    let mut out = vec![f64::NAN; values.len()];
    if n_years == 0 {
        return Ok(out);
    }

    let normal = Normal::new(0.0, 1.0).map_err(|e| StatsError::Distribution {
        distribution: "normal",
        message: e.to_string(),
    })?;

    // Calibration years outside the data fall back to the data's extent.
    let last_year_idx = n_years as i64 - 1;
    let mut cal_lo = i64::from(params.calibration_start_year - params.data_start_year);
    let mut cal_hi = i64::from(params.calibration_end_year - params.data_start_year);
    if cal_lo < 0 || cal_lo > last_year_idx {
        cal_lo = 0;
    }
    if cal_hi > last_year_idx || cal_hi < 0 {
        cal_hi = last_year_idx;
    }
    let (cal_lo, cal_hi) = (cal_lo as usize, cal_hi as usize);

    for period in 0..period_len {
        let at = |year: usize| values.get(year * period_len + period).copied();

        let calibration: Vec<f64> = (cal_lo..=cal_hi)
            .filter_map(at)
            .filter(|v| v.is_finite())
            .collect();
        if calibration.is_empty() {
            continue;
        }
        let n_zero = calibration.iter().filter(|&&v| v == 0.0).count();
        let prob_zero = n_zero as f64 / calibration.len() as f64;
        let positive: Vec<f64> = calibration.into_iter().filter(|&v| v > 0.0).collect();

        let Some(gamma) = GammaParams::fit_thom(&positive) else {
            debug!(period, n_positive = positive.len(), "gamma fit failed");
            continue;
        };
        let dist = gamma.distribution()?;

        for year in 0..n_years {
            let idx = year * period_len + period;
            let Some(&x) = values.get(idx) else {
                break;
            };
            if !x.is_finite() {
                continue;
            }
            let p = (prob_zero + (1.0 - prob_zero) * dist.cdf(x)).clamp(0.0, 1.0);
            out[idx] = normal.inverse_cdf(p);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params(start: i32, cal: (i32, i32)) -> SpiParams {
        SpiParams {
            scale: 1,
            data_start_year: start,
            calibration_start_year: cal.0,
            calibration_end_year: cal.1,
            periodicity: Periodicity::Monthly,
        }
    }

    /// Thirty years of monthly totals varying from year to year.
    fn synthetic_precip(n_years: usize) -> Vec<f64> {
        (0..n_years * 12)
            .map(|i| {
                let year = (i / 12) as f64;
                let month = (i % 12) as f64;
                20.0 + 10.0 * (month / 2.0).sin().abs() + 3.0 * ((year * 7.3).sin() + 1.2)
            })
            .collect()
    }

    #[test]
    fn sum_to_scale_rolls() {
        let s = sum_to_scale(&[1.0, 2.0, 3.0, 4.0], 3);
        assert!(s[0].is_nan() && s[1].is_nan());
        assert_relative_eq!(s[2], 6.0);
        assert_relative_eq!(s[3], 9.0);
        assert_eq!(sum_to_scale(&[1.0, 2.0], 1), vec![1.0, 2.0]);
    }

    #[test]
    fn sum_to_scale_propagates_nan() {
        let s = sum_to_scale(&[1.0, f64::NAN, 3.0, 4.0], 2);
        assert!(s[1].is_nan() && s[2].is_nan());
        assert_relative_eq!(s[3], 7.0);
    }

    #[test]
    fn spi_is_bounded_and_centred() {
        let values = synthetic_precip(30);
        let spi = spi_gamma(&values, &params(1990, (1990, 2019))).unwrap();
        assert_eq!(spi.len(), values.len());
        assert!(spi.iter().all(|z| z.is_finite() && (SPI_MIN..=SPI_MAX).contains(z)));
        let mean = spi.iter().sum::<f64>() / spi.len() as f64;
        assert!(mean.abs() < 0.2, "mean {mean}");
    }

    #[test]
    fn dry_month_scores_low() {
        let mut values = synthetic_precip(30);
        let last_march = 29 * 12 + 2;
        values[last_march] = 0.5;
        let spi = spi_gamma(&values, &params(1990, (1990, 2019))).unwrap();
        assert!(spi[last_march] < -2.0, "spi {}", spi[last_march]);
    }

    #[test]
    fn all_missing_is_returned_unchanged() {
        let values = vec![f64::NAN; 24];
        let spi = spi_gamma(&values, &params(2000, (2000, 2001))).unwrap();
        assert!(spi.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn negatives_are_clipped_not_propagated() {
        let mut values = synthetic_precip(10);
        values[5] = -4.0;
        let spi = spi_gamma(&values, &params(2000, (2000, 2009))).unwrap();
        assert!(spi[5].is_finite());
    }

    #[test]
    fn partial_trailing_year_is_supported() {
        let mut values = synthetic_precip(10);
        values.truncate(10 * 12 - 5);
        let spi = spi_gamma(&values, &params(2000, (2000, 2009))).unwrap();
        assert_eq!(spi.len(), values.len());
        assert!(spi.iter().all(|z| z.is_finite()));
    }

    #[test]
    fn zero_scale_rejected() {
        let mut p = params(2000, (2000, 2001));
        p.scale = 0;
        assert!(matches!(
            spi_gamma(&[1.0], &p),
            Err(StatsError::InvalidParameters { .. })
        ));
    }
}
