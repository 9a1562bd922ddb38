//! Composite severity levels.

use std::fmt;

use serde::{Serialize, Serializer};

/// A component value below this marks drought stress.
pub const DROUGHT_THRESHOLD: f64 = -1.0;

/// Composite drought severity, ordered from no signal to the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Normal = 0,
    /// Precipitation deficit only.
    Watch = 1,
    /// Precipitation deficit with soil moisture deficit.
    Warning = 2,
    /// Precipitation deficit with vegetation stress.
    Alert1 = 3,
    /// All three signals in deficit.
    Alert2 = 4,
}

impl Severity {
    /// Numeric level, 0 through 4.
    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Watch => "watch",
            Self::Warning => "warning",
            Self::Alert1 => "alert 1",
            Self::Alert2 => "alert 2",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.level())
    }
}

/// Classifies one time step from its three lagged component values.
///
/// Returns `None` when any input is missing. The checks run strictly in
/// order, so SPI and fAPAR in deficit outrank SPI and SMA.
pub fn classify(spi: Option<f64>, sma: Option<f64>, fapar: Option<f64>) -> Option<Severity> {
    let (spi, sma, fapar) = (spi?, sma?, fapar?);
    let dry = |x: f64| x < DROUGHT_THRESHOLD;
    let severity = if dry(spi) && dry(sma) && dry(fapar) {
        Severity::Alert2
    } else if dry(spi) && dry(fapar) {
        Severity::Alert1
    } else if dry(spi) && dry(sma) {
        Severity::Warning
    } else if dry(spi) {
        Severity::Watch
    } else {
        Severity::Normal
    };
    Some(severity)
}
