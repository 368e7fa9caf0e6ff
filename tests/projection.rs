use geoscope::{Dataset, MapProjection, Metrics, Region, ViewportSize};

fn square(state: &str, name: &str, lon: f64, lat: f64, size: f64) -> Region {
    Region {
        state_code: state.to_string(),
        name: name.to_string(),
        shape: vec![vec![
            [lon, lat],
            [lon + size, lat],
            [lon + size, lat + size],
            [lon, lat + size],
            [lon, lat],
        ]],
        metrics: Metrics {
            avg_price: 100.0,
            total_price: 1_000.0,
            total_transactions: 10,
        },
    }
}

fn fixture() -> Dataset {
    Dataset::new(vec![
        square("01", "Alder", -100.0, 35.0, 2.0),
        square("01", "Birch", -96.0, 38.0, 2.0),
        square("02", "Cedar", -90.0, 41.0, 2.0),
    ])
}

#[test]
fn projection_is_deterministic() {
    let dataset = fixture();
    let viewport = ViewportSize::new(800.0, 600.0);
    let a = MapProjection::project(&dataset, viewport);
    let b = MapProjection::project(&dataset, viewport);
    for id in dataset.ids() {
        assert_eq!(
            a.centroid(id),
            b.centroid(id),
            "same dataset + viewport must give identical output"
        );
    }
}

#[test]
fn projected_geometry_fits_the_viewport() {
    let dataset = fixture();
    let viewport = ViewportSize::new(800.0, 600.0);
    let projection = MapProjection::project(&dataset, viewport);
    let eps = 1e-6;

    for (_, region) in projection.iter() {
        for ring in &region.rings {
            for p in ring {
                assert!(p[0] >= -eps && p[0] <= viewport.width + eps, "x in range");
                assert!(p[1] >= -eps && p[1] <= viewport.height + eps, "y in range");
            }
        }
    }
}

#[test]
fn centroid_lies_inside_region_bounds() {
    let dataset = fixture();
    let projection = MapProjection::project(&dataset, ViewportSize::new(800.0, 600.0));

    for (id, region) in projection.iter() {
        let mut min = [f64::INFINITY, f64::INFINITY];
        let mut max = [f64::NEG_INFINITY, f64::NEG_INFINITY];
        for p in region.rings.iter().flatten() {
            min[0] = min[0].min(p[0]);
            min[1] = min[1].min(p[1]);
            max[0] = max[0].max(p[0]);
            max[1] = max[1].max(p[1]);
        }
        let c = projection.centroid(id).unwrap();
        assert!(c[0] >= min[0] && c[0] <= max[0], "centroid x inside bbox");
        assert!(c[1] >= min[1] && c[1] <= max[1], "centroid y inside bbox");
    }
}

#[test]
fn west_is_left_and_north_is_up() {
    let dataset = fixture();
    let projection = MapProjection::project(&dataset, ViewportSize::new(800.0, 600.0));
    let alder = projection.centroid(0).unwrap();
    let cedar = projection.centroid(2).unwrap();
    assert!(alder[0] < cedar[0], "more westerly region projects further left");
    assert!(cedar[1] < alder[1], "more northerly region projects higher up");
}

#[test]
fn resize_produces_a_different_fit() {
    let dataset = fixture();
    let small = MapProjection::project(&dataset, ViewportSize::new(400.0, 300.0));
    let large = MapProjection::project(&dataset, ViewportSize::new(800.0, 600.0));
    let c_small = small.centroid(0).unwrap();
    let c_large = large.centroid(0).unwrap();
    // Double the viewport doubles the fitted coordinates.
    assert!((c_large[0] - 2.0 * c_small[0]).abs() < 1e-6);
    assert!((c_large[1] - 2.0 * c_small[1]).abs() < 1e-6);
}

#[test]
fn from_centroids_passes_points_through() {
    let projection = MapProjection::from_centroids(
        ViewportSize::new(100.0, 100.0),
        [(0, [12.0, 34.0]), (1, [56.0, 78.0])],
    );
    assert_eq!(projection.len(), 2);
    assert_eq!(projection.centroid(0), Some([12.0, 34.0]));
    assert_eq!(projection.centroid(1), Some([56.0, 78.0]));
    assert!(projection.get(0).unwrap().rings.is_empty());
}
