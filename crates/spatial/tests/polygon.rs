//! Polygon footprint selection against regular grids.

use cdi_spatial::{
    GridDescriptor, SelectionKind, SpatialError, SpatialSelection, mask_polygon, mask_region,
};

/// Grid with `n` cells per axis, spacing `d`, first centre at `origin`.
fn grid(n: usize, d: f64, origin: (f64, f64)) -> GridDescriptor {
    let lats = (0..n).map(|i| origin.0 + d * i as f64).collect();
    let lons = (0..n).map(|i| origin.1 + d * i as f64).collect();
    GridDescriptor::new(lats, lons).unwrap()
}

/// Rectangle vertices `(lat, lon)` around cell block rows `r`, columns `c`.
fn block(g: &GridDescriptor, d: f64, r: (usize, usize), c: (usize, usize)) -> Vec<(f64, f64)> {
    let lat0 = g.lats()[r.0] - d / 2.0;
    let lat1 = g.lats()[r.1] + d / 2.0;
    let lon0 = g.lons()[c.0] - d / 2.0;
    let lon1 = g.lons()[c.1] + d / 2.0;
    vec![(lat0, lon0), (lat0, lon1), (lat1, lon1), (lat1, lon0)]
}

#[test]
fn exact_block_selects_exactly_its_cells() {
    let d = 0.25;
    let g = grid(20, d, (40.0, -5.0));
    for (rows, cols) in [((2, 4), (3, 7)), ((0, 0), (0, 0)), ((5, 19), (10, 12))] {
        let mask = mask_polygon(&g, &block(&g, d, rows, cols), None).unwrap();
        let n = (rows.1 - rows.0 + 1) * (cols.1 - cols.0 + 1);
        assert_eq!(mask.count(), n, "block {rows:?} x {cols:?}");
        for (i, j) in mask.included() {
            assert!((rows.0..=rows.1).contains(&i) && (cols.0..=cols.1).contains(&j));
        }
    }
}

#[test]
fn exact_block_on_descending_latitudes() {
    let d = 0.5;
    let lats: Vec<f64> = (0..8).map(|i| 60.0 - d * i as f64).collect();
    let lons: Vec<f64> = (0..8).map(|i| 10.0 + d * i as f64).collect();
    let g = GridDescriptor::new(lats, lons).unwrap();
    // Rows 2..=3 are latitudes 59.0 and 58.5.
    let poly = vec![(58.25, 10.75), (58.25, 11.75), (59.25, 11.75), (59.25, 10.75)];
    let mask = mask_polygon(&g, &poly, None).unwrap();
    assert_eq!(mask.count(), 4);
    assert!(mask.get(2, 2) && mask.get(3, 3));
}

#[test]
fn thin_diagonal_sliver_claims_crossed_cells() {
    // A thin diagonal sliver crossing several cells.
    let d = 1.0;
    let g = grid(10, d, (0.0, 0.0));
    let sliver = vec![(0.6, 0.6), (0.7, 0.6), (7.7, 7.6), (7.6, 7.6)];
    let mask = mask_polygon(&g, &sliver, None).unwrap();
    assert!(mask.count() >= 8);
    for k in 1..8 {
        assert!(mask.get(k, k), "diagonal cell {k} missing");
    }
}

#[test]
fn polygon_between_cells_is_empty() {
    let g = grid(4, 1.0, (0.0, 0.0));
    // Degenerate polygon lying on a footprint edge has no area.
    let flat = vec![(0.5, 0.0), (0.5, 2.0), (0.5, 1.0)];
    assert_eq!(
        mask_polygon(&g, &flat, None).unwrap_err(),
        SpatialError::SelectionEmpty {
            kind: SelectionKind::Polygon
        }
    );
}

#[test]
fn mask_region_dispatches_on_kind() {
    let g = grid(5, 1.0, (0.0, 0.0));
    let point = SpatialSelection::point(2.2, 2.9).unwrap();
    assert_eq!(mask_region(&g, &point, None).unwrap().count(), 1);
    let bbox = SpatialSelection::from_lat_lon(&[1.0, 3.0], &[1.0, 2.0]).unwrap();
    assert_eq!(mask_region(&g, &bbox, None).unwrap().count(), 6);
    let poly = SpatialSelection::new(block(&g, 1.0, (0, 1), (0, 1))).unwrap();
    assert_eq!(mask_region(&g, &poly, None).unwrap().count(), 4);
}
