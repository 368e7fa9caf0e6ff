use geoscope::{Dataset, Metric};

fn feature(name: &str, state: &str, avg: &str, total: &str, tx: &str, lon: f64, lat: f64) -> String {
    format!(
        r#"{{
            "type": "Feature",
            "properties": {{
                "NAME": "{name}", "STATEFP": "{state}",
                "avg_price": {avg}, "total_price": {total}, "total_transactions": {tx}
            }},
            "geometry": {{
                "type": "Polygon",
                "coordinates": [[[{lon}, {lat}], [{l1}, {lat}], [{l1}, {la1}], [{lon}, {la1}], [{lon}, {lat}]]]
            }}
        }}"#,
        l1 = lon + 1.0,
        la1 = lat + 1.0,
    )
}

fn collection(features: &[String]) -> String {
    format!(
        r#"{{"type": "FeatureCollection", "features": [{}]}}"#,
        features.join(",")
    )
}

#[test]
fn loads_a_minimal_collection() {
    let text = collection(&[
        feature("Alder", "01", "120000", "2400000", "20", -100.0, 35.0),
        feature("Birch", "02", "250000", "5000000", "20", -96.0, 38.0),
    ]);
    let dataset = Dataset::from_geojson_str(&text).expect("valid collection must load");

    assert_eq!(dataset.len(), 2);
    let alder = dataset.get(0).unwrap();
    assert_eq!(alder.name, "Alder");
    assert_eq!(alder.state_code, "01");
    assert_eq!(alder.metrics.total_transactions, 20);
    assert_eq!(alder.shape.len(), 1);
    assert_eq!(alder.shape[0].len(), 5);

    // Global bounds fold over the loaded metrics.
    assert_eq!(dataset.metric_bounds(Metric::AvgPrice), [120_000.0, 250_000.0]);
}

#[test]
fn accepts_numeric_strings_for_metric_properties() {
    let text = collection(&[feature(
        "Alder", "01", "\"120000\"", "\"2400000\"", "\"20\"", -100.0, 35.0,
    )]);
    let dataset = Dataset::from_geojson_str(&text).expect("quoted numbers are accepted");
    assert_eq!(dataset.get(0).unwrap().metrics.avg_price, 120_000.0);
}

#[test]
fn missing_property_names_the_feature() {
    let mut broken = feature("Alder", "01", "120000", "2400000", "20", -100.0, 35.0);
    broken = broken.replace("\"avg_price\": 120000,", "");
    let err = Dataset::from_geojson_str(&collection(&[broken])).unwrap_err();
    assert!(err.contains("avg_price"), "error should name the property: {err}");
    assert!(err.contains("Alder"), "error should name the feature: {err}");
}

#[test]
fn rejects_non_areal_geometry() {
    let point = r#"{
        "type": "Feature",
        "properties": {
            "NAME": "Alder", "STATEFP": "01",
            "avg_price": 1, "total_price": 1, "total_transactions": 1
        },
        "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}
    }"#
    .to_string();
    let err = Dataset::from_geojson_str(&collection(&[point])).unwrap_err();
    assert!(err.contains("Point"), "error should name the geometry type: {err}");
}

#[test]
fn rejects_non_collection_input() {
    let err = Dataset::from_geojson_str(r#"{"type": "Point", "coordinates": [0, 0]}"#).unwrap_err();
    assert!(err.contains("FeatureCollection"));
}

#[test]
fn multipolygon_keeps_one_ring_per_polygon() {
    let text = collection(&[r#"{
        "type": "Feature",
        "properties": {
            "NAME": "Isles", "STATEFP": "01",
            "avg_price": 1, "total_price": 1, "total_transactions": 1
        },
        "geometry": {
            "type": "MultiPolygon",
            "coordinates": [
                [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]],
                 [[0.2, 0.2], [0.4, 0.2], [0.4, 0.4], [0.2, 0.2]]],
                [[[5.0, 5.0], [6.0, 5.0], [6.0, 6.0], [5.0, 5.0]]]
            ]
        }
    }"#
    .to_string()]);
    let dataset = Dataset::from_geojson_str(&text).expect("multipolygon loads");
    let shape = &dataset.get(0).unwrap().shape;
    assert_eq!(shape.len(), 2, "one exterior ring per polygon, holes dropped");
}
