//! Dataset load boundary.
//!
//! Parses a GeoJSON FeatureCollection whose features carry real-estate
//! properties (`NAME`, `STATEFP`, `avg_price`, `total_price`,
//! `total_transactions`) into a validated [`Dataset`]. All shape validation
//! happens here; downstream code can rely on fixed-shape [`Region`] records.
//!
//! Numeric properties may be JSON numbers or numeric strings; both are
//! accepted since upstream datasets are inconsistent about this.

use std::path::Path;

use geojson::{GeoJson, Value};

use super::region::{Dataset, Metrics, Region, Ring};

impl Dataset {
    /// Parse a GeoJSON string into a dataset.
    ///
    /// Features with a missing or non-areal geometry are rejected, as are
    /// features missing any required property. The error string names the
    /// offending feature where possible.
    pub fn from_geojson_str(input: &str) -> Result<Dataset, String> {
        let geojson: GeoJson = input
            .parse()
            .map_err(|e| format!("invalid GeoJSON: {e}"))?;

        let collection = match geojson {
            GeoJson::FeatureCollection(fc) => fc,
            _ => return Err("expected a GeoJSON FeatureCollection".to_string()),
        };

        let mut regions = Vec::with_capacity(collection.features.len());
        for (i, feature) in collection.features.into_iter().enumerate() {
            let props = feature
                .properties
                .as_ref()
                .ok_or_else(|| format!("feature {i}: missing properties"))?;

            let name = string_prop(props, "NAME")
                .map_err(|e| format!("feature {i}: {e}"))?;
            let ctx = |e: String| format!("feature {i} ({name}): {e}");

            let state_code = string_prop(props, "STATEFP").map_err(&ctx)?;
            let avg_price = numeric_prop(props, "avg_price").map_err(&ctx)?;
            let total_price = numeric_prop(props, "total_price").map_err(&ctx)?;
            let total_transactions =
                numeric_prop(props, "total_transactions").map_err(&ctx)? as u64;

            let geometry = feature
                .geometry
                .ok_or_else(|| ctx("missing geometry".to_string()))?;
            let shape = exterior_rings(&geometry.value).map_err(&ctx)?;

            regions.push(Region {
                state_code,
                name,
                shape,
                metrics: Metrics {
                    avg_price,
                    total_price,
                    total_transactions,
                },
            });
        }

        Ok(Dataset::new(regions))
    }

    /// Read and parse a GeoJSON file into a dataset.
    pub fn from_geojson_path<P: AsRef<Path>>(path: P) -> Result<Dataset, String> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("cannot read {}: {e}", path.as_ref().display()))?;
        Dataset::from_geojson_str(&text)
    }
}

/// Extract a required string property.
fn string_prop(props: &geojson::JsonObject, key: &str) -> Result<String, String> {
    match props.get(key) {
        Some(serde_json::Value::String(s)) => Ok(s.clone()),
        // State FIPS codes sometimes arrive as bare numbers.
        Some(serde_json::Value::Number(n)) => Ok(n.to_string()),
        Some(_) => Err(format!("property `{key}` is not a string")),
        None => Err(format!("missing property `{key}`")),
    }
}

/// Extract a required numeric property, accepting numbers or numeric strings.
fn numeric_prop(props: &geojson::JsonObject, key: &str) -> Result<f64, String> {
    match props.get(key) {
        Some(serde_json::Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| format!("property `{key}` is not a finite number")),
        Some(serde_json::Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("property `{key}` is not numeric: {s:?}")),
        Some(_) => Err(format!("property `{key}` is not numeric")),
        None => Err(format!("missing property `{key}`")),
    }
}

/// Collect the exterior ring of each polygon; interior rings (holes) are
/// dropped, matching how the map treats region outlines.
fn exterior_rings(value: &Value) -> Result<Vec<Ring>, String> {
    let ring_points = |ring: &Vec<Vec<f64>>| -> Ring {
        ring.iter()
            .filter(|p| p.len() >= 2)
            .map(|p| [p[0], p[1]])
            .collect()
    };

    match value {
        Value::Polygon(rings) => Ok(rings.first().map(ring_points).into_iter().collect()),
        Value::MultiPolygon(polygons) => Ok(polygons
            .iter()
            .filter_map(|rings| rings.first().map(ring_points))
            .collect()),
        other => Err(format!(
            "unsupported geometry type {} (expected Polygon or MultiPolygon)",
            other.type_name()
        )),
    }
}
