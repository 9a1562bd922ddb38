//! A single observation: a value, a gap, or a cell excluded by region.

/// One cell of a series.
///
/// `Outside` marks a cell excluded by the requested region. It is distinct
/// from `Missing` so that masking survives aggregation and is never filled.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Reading {
    Value(f64),
    #[default]
    Missing,
    Outside,
}

impl Reading {
    /// Wraps a raw number; NaN and infinities become `Missing`.
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Self::Value(value)
        } else {
            Self::Missing
        }
    }

    /// The wrapped number, if any.
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_value(self) -> bool {
        matches!(self, Self::Value(_))
    }

    pub fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn is_outside(self) -> bool {
        matches!(self, Self::Outside)
    }

    /// Applies `f` to a value; gaps and exclusions pass through unchanged.
    ///
    /// A non-finite result becomes `Missing`.
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Self::Value(v) => Self::from_f64(f(v)),
            other => other,
        }
    }

    /// Returns `self` unless it is `Missing`, in which case `other`.
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Missing => other,
            _ => self,
        }
    }

    /// Raw number with `NaN` standing in for both gaps and exclusions.
    pub fn to_f64(self) -> f64 {
        self.value().unwrap_or(f64::NAN)
    }
}

impl From<f64> for Reading {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<Option<f64>> for Reading {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Missing, Self::from_f64)
    }
}

/// Mean of a group of readings.
///
/// Any `Outside` member makes the group `Outside`. Otherwise gaps are
/// skipped, and a group with no values is `Missing`.
pub fn mean_of(readings: impl IntoIterator<Item = Reading>) -> Reading {
    let mut sum = 0.0;
    let mut n = 0usize;
    for r in readings {
        match r {
            Reading::Outside => return Reading::Outside,
            Reading::Missing => {}
            Reading::Value(v) => {
                sum += v;
                n += 1;
            }
        }
    }
    if n == 0 {
        Reading::Missing
    } else {
        Reading::Value(sum / n as f64)
    }
}

/// Sum of a group of readings.
///
/// Any `Outside` member makes the group `Outside`; otherwise any gap makes
/// the total `Missing`, since a partial total would understate the group.
pub fn sum_of(readings: impl IntoIterator<Item = Reading>) -> Reading {
    let mut sum = 0.0;
    let mut any = false;
    let mut gap = false;
    for r in readings {
        match r {
            Reading::Outside => return Reading::Outside,
            Reading::Missing => gap = true,
            Reading::Value(v) => {
                sum += v;
                any = true;
            }
        }
    }
    if gap || !any {
        Reading::Missing
    } else {
        Reading::Value(sum)
    }
}
