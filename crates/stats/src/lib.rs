//! # cdi-stats
//!
//! Statistical building blocks for drought anomalies.
//!
//! | Module | Description |
//! |--------|-------------|
//! | `moments` | Mean and population spread over finite samples |
//! | `baseline` | Reference-period standardisation |
//! | `gamma` | Gamma maximum-likelihood fit and statrs bridge |
//! | `spi` | Gamma-fitted Standardised Precipitation Index |
//! | `error` | Error types |

mod baseline;
mod error;
mod gamma;
mod moments;
mod spi;

pub use baseline::Baseline;
pub use error::StatsError;
pub use gamma::GammaParams;
pub use moments::{finite, mean, population_sd};
pub use spi::{
    Periodicity, SPI_MAX, SPI_MIN, SpiParams, spi_gamma, sum_to_scale, transform_fitted_gamma,
};
