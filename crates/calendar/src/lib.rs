//! # cdi-calendar
//!
//! Gregorian dates on top of `chrono::NaiveDate` and their 10-day ("dekad")
//! periodization.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["Date (y, m, d)"] -->|"assign()"| B["dekad start"]
//!     A -->|"dekad_index()"| C["dekad ordinal"]
//!     C -->|"from_dekad_index()"| B
//!     A -->|"generate(start, end)"| D["DekadGrid"]
//!     A -->|"monthly_sequence()"| E["month starts"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use cdi_calendar::{Date, assign, generate, shift_dekads};
//!
//! let start: Date = "20200105".parse().unwrap();
//! let end: Date = "20200225".parse().unwrap();
//!
//! // Six dekads: Jan 1/11/21, Feb 1/11/21
//! let grid = generate(start, end).unwrap();
//! assert_eq!(grid.len(), 6);
//!
//! assert_eq!(assign(start).day(), 1);
//! let lead_in = shift_dekads(start, -3); // 2019-12-11
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `date` | `NaiveDate`-backed date, parsing and month arithmetic |
//! | `dekad` | Dekad assignment and ordinal arithmetic |
//! | `grid` | Validated dekad time axis |
//! | `sequence` | Daily, monthly and dekad sequence generation |
//! | `error` | Error types |

mod date;
mod dekad;
mod error;
mod grid;
mod sequence;

pub use date::{Date, days_in_month, is_leap_year};
pub use dekad::{
    DEKADS_PER_YEAR, assign, dekad_index, dekad_of, from_dekad_index, is_dekad_start,
    shift_dekads,
};
pub use error::CalendarError;
pub use grid::DekadGrid;
pub use sequence::{daily_sequence, generate, monthly_sequence};
