use std::sync::Arc;

use cdi_calendar::{Date, generate};
use cdi_components::{
    ComponentError, ComponentKind, ComponentSource, MemoryRetriever, RequestContext,
    RetrieveError, Window,
};
use cdi_compose::{CdiError, CdiPipeline, Severity, Sources, Stage};
use cdi_spatial::{GridDescriptor, GriddedSeries, SpatialSelection};
use cdi_timeseries::{Frequency, Reading};

fn date(y: i32, m: u8, d: u8) -> Date {
    Date::new(y, m, d).unwrap()
}

fn grid(lats: &[f64], lons: &[f64]) -> GridDescriptor {
    GridDescriptor::new(lats.to_vec(), lons.to_vec()).unwrap()
}

/// Same value in every cell at each time step.
fn field(grid: &GridDescriptor, times: Vec<Date>, frequency: Frequency, f: impl Fn(Date) -> f64) -> GriddedSeries {
    let values = times
        .iter()
        .flat_map(|&t| std::iter::repeat_n(Reading::Value(f(t)), grid.n_cells()))
        .collect();
    GriddedSeries::new(grid.clone(), times, frequency, values).unwrap()
}

fn dry_from(from: Date) -> impl Fn(Date) -> f64 {
    move |t| if t >= from { -2.0 } else { 0.0 }
}

fn monthly_2020(grid: &GridDescriptor, f: impl Fn(Date) -> f64) -> GriddedSeries {
    let times = (0..6).map(|m| date(2020, 1, 1).add_months(m)).collect();
    field(grid, times, Frequency::Monthly, f)
}

fn dekadal_2020(grid: &GridDescriptor, f: impl Fn(Date) -> f64) -> GriddedSeries {
    let times = generate(date(2020, 1, 1), date(2020, 6, 30)).unwrap().into_vec();
    field(grid, times, Frequency::Dekadal, f)
}

fn retriever(g: &GridDescriptor, spi_from: Date, sma_from: Date, fapar_from: Date) -> MemoryRetriever {
    MemoryRetriever::new()
        .with_variable("spg03", monthly_2020(g, dry_from(spi_from)))
        .with_variable("smant", dekadal_2020(g, dry_from(sma_from)))
        .with_variable("fpanv", dekadal_2020(g, dry_from(fapar_from)))
}

fn products() -> Sources {
    Sources {
        spi: ComponentSource::Product,
        sma: ComponentSource::Product,
    }
}

fn pipeline(selection: SpatialSelection, retriever: MemoryRetriever) -> CdiPipeline {
    pipeline_until(selection, retriever, date(2020, 5, 31))
}

fn pipeline_until(selection: SpatialSelection, retriever: MemoryRetriever, end: Date) -> CdiPipeline {
    let ctx = RequestContext::new(
        selection,
        Window::new(date(2020, 4, 1), end).unwrap(),
        Window::new(date(1985, 1, 1), date(2019, 12, 31)).unwrap(),
        Arc::new(retriever),
    );
    CdiPipeline::new(Arc::new(ctx)).with_sources(products())
}

fn point() -> SpatialSelection {
    SpatialSelection::point(50.0, 5.0).unwrap()
}

#[test]
fn severity_follows_lags() {
    let g = grid(&[50.0], &[5.0]);
    let r = retriever(&g, date(2020, 3, 1), date(2020, 4, 1), date(2020, 4, 11));
    let result = pipeline(point(), r).run().unwrap();

    let times: Vec<Date> = result.records.iter().map(|r| r.time).collect();
    assert_eq!(
        times,
        generate(date(2020, 4, 1), date(2020, 5, 31)).unwrap().into_vec()
    );
    // SPI is dry throughout; SMA and fAPAR arrive two and one dekads late.
    assert_eq!(
        result.severities(),
        vec![
            Some(Severity::Watch),
            Some(Severity::Watch),
            Some(Severity::Alert2),
            Some(Severity::Alert2),
            Some(Severity::Alert2),
            Some(Severity::Alert2),
        ]
    );
    assert!(result.records.iter().all(|r| r.lat.is_none()));
}

#[test]
fn vegetation_before_soil_is_alert1() {
    let g = grid(&[50.0], &[5.0]);
    let r = retriever(&g, date(2020, 3, 1), date(2020, 4, 21), date(2020, 4, 1));
    let result = pipeline(point(), r).run().unwrap();
    assert_eq!(
        result.severities(),
        vec![
            Some(Severity::Watch),
            Some(Severity::Alert1),
            Some(Severity::Alert1),
            Some(Severity::Alert1),
            Some(Severity::Alert2),
            Some(Severity::Alert2),
        ]
    );
}

#[test]
fn wet_precipitation_is_normal() {
    let g = grid(&[50.0], &[5.0]);
    let r = retriever(&g, date(2021, 1, 1), date(2020, 1, 1), date(2020, 1, 1));
    let result = pipeline(point(), r).run().unwrap();
    assert!(result.severities().iter().all(|s| *s == Some(Severity::Normal)));
}

#[test]
fn missing_spi_month_is_missing_severity() {
    let g = grid(&[50.0], &[5.0]);
    let times = vec![date(2020, 3, 1), date(2020, 4, 1)];
    let spi = field(&g, times, Frequency::Monthly, |_| -2.0);
    let r = retriever(&g, date(2020, 3, 1), date(2020, 1, 1), date(2020, 1, 1)).with_variable("spg03", spi);
    let result = pipeline_until(point(), r, date(2020, 6, 11)).run().unwrap();

    // All three May dekads still see April through the lag.
    for day in [1, 11, 21] {
        let may = result.at(date(2020, 5, day)).next().unwrap();
        assert_eq!(may.spi, Some(-2.0));
        assert_eq!(may.severity, Some(Severity::Alert2));
    }
    let june_1 = result.at(date(2020, 6, 1)).next().unwrap();
    assert_eq!(june_1.spi, None);
    assert_eq!(june_1.severity, None);
    let last = result.records.last().unwrap();
    assert_eq!(last.time, date(2020, 6, 11));
    assert_eq!(last.severity, None);
}

#[test]
fn bbox_yields_rows_per_cell() {
    let g = grid(&[49.0, 50.0, 51.0], &[5.0, 6.0]);
    let r = retriever(&g, date(2020, 3, 1), date(2020, 4, 1), date(2020, 4, 11));
    let selection = SpatialSelection::from_lat_lon(&[49.5, 51.5], &[4.5, 6.5]).unwrap();
    let result = pipeline(selection, r).run().unwrap();

    assert_eq!(result.records.len(), 6 * 4);
    let first_step: Vec<(Option<f64>, Option<f64>)> = result
        .at(date(2020, 4, 1))
        .map(|r| (r.lat, r.lon))
        .collect();
    assert_eq!(
        first_step,
        vec![
            (Some(50.0), Some(5.0)),
            (Some(50.0), Some(6.0)),
            (Some(51.0), Some(5.0)),
            (Some(51.0), Some(6.0)),
        ]
    );
    assert!(result.at(date(2020, 5, 21)).all(|r| r.severity == Some(Severity::Alert2)));
}

#[test]
fn component_failure_names_component_and_stage() {
    let g = grid(&[50.0], &[5.0]);
    let r = MemoryRetriever::new()
        .with_variable("spg03", monthly_2020(&g, |_| 0.0))
        .with_variable("smant", dekadal_2020(&g, |_| 0.0));
    let err = pipeline(point(), r).run().unwrap_err();
    assert_eq!(
        err,
        CdiError::Component {
            component: ComponentKind::Fapar,
            stage: Stage::Download,
            source: ComponentError::DataUnavailable {
                component: ComponentKind::Fapar,
                source: RetrieveError::NotFound {
                    variable: "fpanv".to_string()
                },
            },
        }
    );
}

#[test]
fn component_windows_reach_back_by_lag() {
    let g = grid(&[50.0], &[5.0]);
    let p = pipeline(point(), retriever(&g, date(2020, 3, 1), date(2020, 4, 1), date(2020, 4, 11)));
    assert_eq!(p.component(ComponentKind::Spi).unwrap().window().start(), date(2020, 3, 1));
    assert_eq!(p.component(ComponentKind::Sma).unwrap().window().start(), date(2020, 3, 11));
    assert_eq!(p.component(ComponentKind::Fapar).unwrap().window().start(), date(2020, 3, 21));
}

#[test]
fn fapar_source_is_always_product() {
    let sources = Sources {
        spi: ComponentSource::Fitted,
        sma: ComponentSource::Fitted,
    };
    assert_eq!(sources.of(ComponentKind::Spi), ComponentSource::Fitted);
    assert_eq!(sources.of(ComponentKind::Sma), ComponentSource::Fitted);
    assert_eq!(sources.of(ComponentKind::Fapar), ComponentSource::Product);
}

#[test]
fn cell_outside_one_component_grid_is_missing() {
    let full = grid(&[49.0, 50.0, 51.0], &[5.0, 6.0]);
    let south = grid(&[49.0, 50.0], &[5.0, 6.0]);
    let dry = |_: Date| -2.0;
    let r = MemoryRetriever::new()
        .with_variable("spg03", monthly_2020(&full, dry))
        .with_variable("smant", dekadal_2020(&south, dry))
        .with_variable("fpanv", dekadal_2020(&full, dry));
    let polygon = SpatialSelection::new(vec![
        (48.5, 4.5),
        (48.5, 6.5),
        (51.5, 6.5),
        (51.5, 4.5),
    ])
    .unwrap();
    let result = pipeline(polygon, r).run().unwrap();

    assert_eq!(result.records.len(), 6 * 6);
    for record in &result.records {
        if record.lat == Some(51.0) {
            assert_eq!(record.sma, None);
            assert_eq!(record.severity, None);
        } else {
            assert_eq!(record.sma, Some(-2.0));
            assert_eq!(record.severity, Some(Severity::Alert2));
        }
    }
}
