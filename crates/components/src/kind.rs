//! Component identity and configuration.

use std::fmt;

use cdi_timeseries::Frequency;

/// Total precipitation from reanalysis, input to a locally fitted SPI.
pub const PRECIPITATION: &str = "total_precipitation";
/// Pre-computed 3-month SPI product.
pub const SPI_PRODUCT: &str = "spg03";
/// Long-term soil moisture anomaly product.
pub const SMA_PRODUCT: &str = "smant";
/// Modelled soil moisture anomaly, more recent than [`SMA_PRODUCT`].
pub const SMA_MODELLED: &str = "smand";
/// fAPAR anomaly product.
pub const FAPAR_PRODUCT: &str = "fpanv";
/// Default soil water layer for the baseline-normalised anomaly.
pub const DEFAULT_SOIL_WATER: &str = "swvl1";

/// The three drought signals combined into the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    /// Standardised Precipitation Index.
    Spi,
    /// Soil Moisture Anomaly.
    Sma,
    /// Vegetation (fAPAR) anomaly.
    Fapar,
}

impl ComponentKind {
    pub const ALL: [Self; 3] = [Self::Spi, Self::Sma, Self::Fapar];

    /// Delay, in dekads, between a signal and the indicator it informs.
    pub fn lag(self) -> usize {
        match self {
            Self::Spi => 3,
            Self::Sma => 2,
            Self::Fapar => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spi => "spi",
            Self::Sma => "sma",
            Self::Fapar => "fapar",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a component's values come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComponentSource {
    /// Computed locally from raw reanalysis over a baseline.
    Fitted,
    /// Pre-computed anomaly product.
    #[default]
    Product,
}

/// Concrete algorithm behind a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    SpiFitted,
    SpiProduct,
    SmaFitted,
    SmaProduct,
    FaparProduct,
}

impl Variant {
    pub fn kind(self) -> ComponentKind {
        match self {
            Self::SpiFitted | Self::SpiProduct => ComponentKind::Spi,
            Self::SmaFitted | Self::SmaProduct => ComponentKind::Sma,
            Self::FaparProduct => ComponentKind::Fapar,
        }
    }

    pub fn source(self) -> ComponentSource {
        match self {
            Self::SpiFitted | Self::SmaFitted => ComponentSource::Fitted,
            _ => ComponentSource::Product,
        }
    }

    /// Time axis of the processed series.
    pub fn output_frequency(self) -> Frequency {
        match self.kind() {
            ComponentKind::Spi => Frequency::Monthly,
            _ => Frequency::Dekadal,
        }
    }

    /// Short name, e.g. `spi-fitted`.
    pub fn name(self) -> &'static str {
        match self {
            Self::SpiFitted => "spi-fitted",
            Self::SpiProduct => "spi-product",
            Self::SmaFitted => "sma-fitted",
            Self::SmaProduct => "sma-product",
            Self::FaparProduct => "fapar-product",
        }
    }
}

/// Static description of a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub kind: ComponentKind,
    pub variant: Variant,
    pub lag: usize,
    /// Whether processing fetches a baseline period.
    pub needs_baseline: bool,
    pub frequency: Frequency,
    /// Variables requested from the retriever.
    pub variables: Vec<String>,
}
