//! Component windows, the shared dekad grid and lag alignment.

use cdi_calendar::{Date, DekadGrid, generate, shift_dekads};
use cdi_components::ComponentKind;
use cdi_timeseries::{ForwardFill, TimeSeries};

use crate::error::CdiError;

/// Largest component lag, in dekads.
pub const MAX_LAG: usize = 3;

/// First date a component must cover so its lagged values reach `start`.
///
/// SPI starts on the first of the month before `start`'s month; the
/// dekadal components start `lag` dekads before `start`.
pub fn component_start(kind: ComponentKind, start: Date) -> Date {
    match kind {
        ComponentKind::Spi => start.first_of_month().add_months(-1),
        _ => shift_dekads(start, -(kind.lag() as i64)),
    }
}

/// Dekad grid long enough to shift every component into `[start, end]`.
///
/// # Errors
///
/// Returns [`CdiError::Configuration`] if `start > end`.
pub fn shared_grid(start: Date, end: Date) -> Result<DekadGrid, CdiError> {
    let lead = shift_dekads(start, -(MAX_LAG as i64));
    let first = ComponentKind::ALL
        .into_iter()
        .map(|kind| component_start(kind, start))
        .fold(lead, Date::min);
    generate(first, end).map_err(|e| CdiError::Configuration {
        reason: e.to_string(),
    })
}

/// Places one component cell on `grid` and applies its lag.
///
/// SPI is monthly, so its value is carried to the later dekads of the same
/// month before shifting.
///
/// # Errors
///
/// Returns [`CdiError::Alignment`] if `grid` is not strictly increasing.
pub fn align_component(
    kind: ComponentKind,
    series: &TimeSeries,
    grid: &DekadGrid,
) -> Result<TimeSeries, CdiError> {
    let on_grid = series
        .reindex(grid.as_slice())
        .map_err(CdiError::alignment)?;
    let filled = match kind {
        ComponentKind::Spi => on_grid.forward_fill(ForwardFill::WithinMonth),
        _ => on_grid,
    };
    Ok(filled.shift(kind.lag()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdi_timeseries::Reading;

    fn date(y: i32, m: u8, d: u8) -> Date {
        Date::new(y, m, d).unwrap()
    }

    #[test]
    fn component_starts() {
        let start = date(2020, 4, 1);
        assert_eq!(component_start(ComponentKind::Spi, start), date(2020, 3, 1));
        assert_eq!(component_start(ComponentKind::Sma, start), date(2020, 3, 11));
        assert_eq!(component_start(ComponentKind::Fapar, start), date(2020, 3, 21));
        assert_eq!(component_start(ComponentKind::Spi, date(2020, 1, 21)), date(2019, 12, 1));
    }

    #[test]
    fn shared_grid_starts_at_earliest_need() {
        let g = shared_grid(date(2020, 4, 1), date(2020, 4, 30)).unwrap();
        assert_eq!(g.first(), Some(date(2020, 3, 1)));
        assert_eq!(g.last(), Some(date(2020, 4, 21)));
        let g = shared_grid(date(2020, 4, 21), date(2020, 4, 30)).unwrap();
        assert_eq!(g.first(), Some(date(2020, 3, 1)));
    }

    #[test]
    fn spi_fills_within_month_then_lags() {
        let monthly = TimeSeries::from_f64(vec![date(2020, 3, 1), date(2020, 4, 1)], &[-2.0, 1.0])
            .unwrap();
        let grid = generate(date(2020, 3, 1), date(2020, 4, 30)).unwrap();
        let aligned = align_component(ComponentKind::Spi, &monthly, &grid).unwrap();
        let v: Vec<Option<f64>> = aligned.values().iter().map(|r| r.value()).collect();
        assert_eq!(v, vec![None, None, None, Some(-2.0), Some(-2.0), Some(-2.0)]);
    }

    #[test]
    fn dekadal_component_is_not_filled() {
        let grid = generate(date(2020, 4, 1), date(2020, 4, 30)).unwrap();
        let s = TimeSeries::new(
            grid.as_slice().to_vec(),
            vec![Reading::Value(1.0), Reading::Missing, Reading::Value(3.0)],
        )
        .unwrap();
        let aligned = align_component(ComponentKind::Fapar, &s, &grid).unwrap();
        assert_eq!(
            aligned.values(),
            &[Reading::Missing, Reading::Value(1.0), Reading::Missing]
        );
    }
}
