//! Output rows.

use cdi_calendar::Date;
use cdi_spatial::SelectionKind;
use serde::{Serialize, Serializer};

use crate::severity::Severity;

fn as_display<T: std::fmt::Display, S: Serializer>(v: &T, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(v)
}

/// One composed time step, for one cell of a region or for the point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CdiRecord {
    #[serde(serialize_with = "as_display")]
    pub time: Date,
    /// Cell latitude; absent for point requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    /// Lagged component values.
    pub spi: Option<f64>,
    pub sma: Option<f64>,
    pub fapar: Option<f64>,
    /// `None` when any component is missing.
    pub severity: Option<Severity>,
}

/// The composite indicator over the requested period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CdiResult {
    #[serde(serialize_with = "as_display")]
    pub selection: SelectionKind,
    #[serde(serialize_with = "as_display")]
    pub start: Date,
    #[serde(serialize_with = "as_display")]
    pub end: Date,
    /// Time-major; within a time step, cells in grid order.
    pub records: Vec<CdiRecord>,
}

impl CdiResult {
    /// Severities in record order.
    pub fn severities(&self) -> Vec<Option<Severity>> {
        self.records.iter().map(|r| r.severity).collect()
    }

    /// Records of one time step.
    pub fn at(&self, time: Date) -> impl Iterator<Item = &CdiRecord> {
        self.records.iter().filter(move |r| r.time == time)
    }
}

/// One value of a single processed component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexRecord {
    #[serde(serialize_with = "as_display")]
    pub time: Date,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    pub value: Option<f64>,
}
