//! Randomised alignment invariants.

use cdi_calendar::{Date, DekadGrid, generate};
use cdi_timeseries::{Reading, TimeSeries};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn date(y: i32, m: u8, d: u8) -> Date {
    Date::new(y, m, d).unwrap()
}

/// Random sparse dekadal series drawn from `grid`.
fn random_series(rng: &mut StdRng, grid: &DekadGrid) -> TimeSeries {
    let mut times = Vec::new();
    let mut values = Vec::new();
    for d in grid.iter() {
        if rng.random_bool(0.6) {
            times.push(d);
            values.push(match rng.random_range(0..10) {
                0 => Reading::Missing,
                1 => Reading::Outside,
                _ => Reading::Value(rng.random_range(-3.0..3.0)),
            });
        }
    }
    TimeSeries::new(times, values).unwrap()
}

#[test]
fn reindex_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(42);
    let grid = generate(date(2018, 1, 1), date(2021, 12, 31)).unwrap();
    for _ in 0..50 {
        let s = random_series(&mut rng, &grid);
        let once = s.reindex(grid.as_slice()).unwrap();
        let twice = once.reindex(grid.as_slice()).unwrap();
        assert_eq!(once, twice);
    }
}

#[test]
fn reindex_then_filter_reproduces_series() {
    let mut rng = StdRng::seed_from_u64(7);
    let grid = generate(date(2019, 6, 1), date(2020, 6, 30)).unwrap();
    for _ in 0..50 {
        let s = random_series(&mut rng, &grid);
        let aligned = s.reindex(grid.as_slice()).unwrap();
        let back = aligned.reindex(s.times()).unwrap();
        assert_eq!(back, s);
    }
}

#[test]
fn crop_commutes_with_reindex() {
    let mut rng = StdRng::seed_from_u64(11);
    let start = date(2020, 2, 14);
    let end = date(2020, 9, 3);
    let wide = generate(date(2019, 1, 1), date(2021, 1, 1)).unwrap();
    let narrow = wide.crop(start, end);
    for _ in 0..50 {
        let s = random_series(&mut rng, &wide);
        let a = s.reindex(wide.as_slice()).unwrap().crop(start, end);
        let b = s.reindex(narrow.as_slice()).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn shift_obeys_lag_law() {
    let mut rng = StdRng::seed_from_u64(3);
    let grid = generate(date(2020, 1, 1), date(2020, 12, 31)).unwrap();
    for _ in 0..20 {
        let s = random_series(&mut rng, &grid).reindex(grid.as_slice()).unwrap();
        let k = rng.random_range(0..6);
        let shifted = s.shift(k);
        assert_eq!(shifted.times(), s.times());
        for t in 0..s.len() {
            if t < k {
                assert_eq!(shifted.values()[t], Reading::Missing);
            } else {
                assert_eq!(shifted.values()[t], s.values()[t - k]);
            }
        }
    }
}
