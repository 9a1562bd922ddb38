//! # cdi-compose
//!
//! Combines the precipitation, soil moisture and vegetation components
//! into the composite drought indicator.
//!
//! Each component is computed over its own window, placed on a shared
//! dekad grid and shifted by its lag (SPI 3, SMA 2, fAPAR 1 dekads), so a
//! precipitation deficit is matched with the soil and vegetation responses
//! that follow it. Every time step is then classified:
//!
//! | Condition (values below -1) | Severity |
//! |-----------------------------|----------|
//! | any input missing | none |
//! | SPI, SMA and fAPAR | [`Severity::Alert2`] |
//! | SPI and fAPAR | [`Severity::Alert1`] |
//! | SPI and SMA | [`Severity::Warning`] |
//! | SPI | [`Severity::Watch`] |
//! | otherwise | [`Severity::Normal`] |

mod error;
mod lag;
mod pipeline;
mod record;
mod severity;

pub use error::{CdiError, Stage};
pub use lag::{MAX_LAG, align_component, component_start, shared_grid};
pub use pipeline::{CdiPipeline, Sources, component_records};
pub use record::{CdiRecord, CdiResult, IndexRecord};
pub use severity::{DROUGHT_THRESHOLD, Severity, classify};
