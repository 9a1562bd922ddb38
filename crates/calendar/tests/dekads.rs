use cdi_calendar::{Date, assign, daily_sequence, dekad_of, generate, shift_dekads};

fn date(y: i32, m: u8, d: u8) -> Date {
    Date::new(y, m, d).unwrap()
}

#[test]
fn dekad_of_covers_every_day() {
    for day in 1..=10 {
        assert_eq!(dekad_of(day), 1, "day {day}");
    }
    for day in 11..=20 {
        assert_eq!(dekad_of(day), 11, "day {day}");
    }
    for day in 21..=31 {
        assert_eq!(dekad_of(day), 21, "day {day}");
    }
}

#[test]
fn generate_january_to_february() {
    let start: Date = "20200105".parse().unwrap();
    let end: Date = "20200225".parse().unwrap();
    let grid = generate(start, end).unwrap();
    assert_eq!(
        grid.as_slice(),
        &[
            date(2020, 1, 1),
            date(2020, 1, 11),
            date(2020, 1, 21),
            date(2020, 2, 1),
            date(2020, 2, 11),
            date(2020, 2, 21),
        ]
    );
}

#[test]
fn generate_first_entry_may_precede_start() {
    let grid = generate(date(2020, 3, 15), date(2020, 3, 20)).unwrap();
    assert_eq!(grid.first(), Some(date(2020, 3, 11)));
    assert!(grid.first().unwrap() < date(2020, 3, 15));
}

#[test]
fn generate_is_strictly_increasing_over_decades() {
    let grid = generate(date(1985, 1, 1), date(2022, 12, 31)).unwrap();
    assert_eq!(grid.len(), 38 * 36);
    for pair in grid.as_slice().windows(2) {
        assert!(pair[0] < pair[1]);
    }
    for d in grid.iter() {
        assert!(matches!(d.day(), 1 | 11 | 21));
    }
}

#[test]
fn every_day_belongs_to_a_grid_entry() {
    let start = date(2023, 12, 25);
    let end = date(2024, 3, 9);
    let grid = generate(start, end).unwrap();
    for day in daily_sequence(start, end) {
        assert!(grid.contains(assign(day)), "{day} not covered");
    }
}

#[test]
fn lag_windows_in_dekads() {
    let start = date(2020, 4, 1);
    assert_eq!(shift_dekads(start, -2), date(2020, 3, 11));
    assert_eq!(shift_dekads(start, -1), date(2020, 3, 21));
    assert_eq!(shift_dekads(shift_dekads(start, -5), 5), start);
}
