//! Native sampling frequency of a series.

use std::fmt;
use std::str::FromStr;

use crate::error::TimeSeriesError;

/// Sampling frequency, ordered from finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Frequency {
    /// Several records per day sharing the same date.
    Hourly,
    Daily,
    /// One record per dekad, dated on day 1, 11 or 21.
    Dekadal,
    /// One record per month, dated on day 1.
    Monthly,
}

impl Frequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Dekadal => "dekadal",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = TimeSeriesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hourly" | "1h" => Ok(Self::Hourly),
            "daily" | "1d" => Ok(Self::Daily),
            "dekadal" | "dekad" => Ok(Self::Dekadal),
            "monthly" | "1ms" => Ok(Self::Monthly),
            other => Err(TimeSeriesError::UnknownFrequency {
                name: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        assert_eq!("Daily".parse::<Frequency>().unwrap(), Frequency::Daily);
        assert_eq!("dekad".parse::<Frequency>().unwrap(), Frequency::Dekadal);
        assert_eq!("1MS".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert!("weekly".parse::<Frequency>().is_err());
    }

    #[test]
    fn ordering_is_fine_to_coarse() {
        assert!(Frequency::Hourly < Frequency::Daily);
        assert!(Frequency::Dekadal < Frequency::Monthly);
    }
}
