//! Geometry projection: geographic region shapes to screen space.
//!
//! [`MapProjection::project`] maps every region of a dataset to a
//! screen-space centroid and drawable paths for a given viewport size, using
//! an Albers equal-area conic projection (standard parallels 29.5°/45.5°,
//! central meridian 96°W) scaled and translated to fit the viewport.
//!
//! The projection is a pure function of `(dataset, viewport)`: the same
//! inputs always produce the same output, which is what makes brush
//! hit-testing reproducible. Callers cache the result and recompute it only
//! when the viewport size changes; it is never patched in place.

use std::collections::HashMap;

use crate::data::{Dataset, RegionId, Ring};

/// Size of the drawing area the map is fitted into, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Screen-space form of one region: a centroid point for hit-testing and the
/// projected outline rings for drawing.
#[derive(Debug, Clone)]
pub struct ProjectedRegion {
    pub centroid: [f64; 2],
    pub rings: Vec<Vec<[f64; 2]>>,
}

/// Projection of a whole dataset into one viewport.
#[derive(Debug, Clone)]
pub struct MapProjection {
    viewport: ViewportSize,
    regions: HashMap<RegionId, ProjectedRegion>,
}

// Albers equal-area conic constants, the standard choice for maps of the
// contiguous United States.
const PARALLEL_1_DEG: f64 = 29.5;
const PARALLEL_2_DEG: f64 = 45.5;
const CENTRAL_MERIDIAN_DEG: f64 = -96.0;
const REFERENCE_LAT_DEG: f64 = 38.5;

impl MapProjection {
    /// Project every region of `dataset` into a viewport of the given size.
    pub fn project(dataset: &Dataset, viewport: ViewportSize) -> MapProjection {
        // First pass: raw Albers coordinates and their bounding box.
        let mut raw: Vec<(RegionId, Vec<Vec<[f64; 2]>>)> = Vec::with_capacity(dataset.len());
        let mut min = [f64::INFINITY, f64::INFINITY];
        let mut max = [f64::NEG_INFINITY, f64::NEG_INFINITY];

        for (id, region) in dataset.iter() {
            let rings: Vec<Vec<[f64; 2]>> = region
                .shape
                .iter()
                .map(|ring| project_ring(ring))
                .collect();
            for ring in &rings {
                for p in ring {
                    min[0] = min[0].min(p[0]);
                    min[1] = min[1].min(p[1]);
                    max[0] = max[0].max(p[0]);
                    max[1] = max[1].max(p[1]);
                }
            }
            raw.push((id, rings));
        }

        // Fit: uniform scale, centered translation (d3 fitSize behaviour).
        let span = [max[0] - min[0], max[1] - min[1]];
        let (scale, tx, ty) = if span[0] > 0.0 && span[1] > 0.0 {
            let s = (viewport.width / span[0]).min(viewport.height / span[1]);
            (
                s,
                (viewport.width - s * (min[0] + max[0])) / 2.0,
                (viewport.height - s * (min[1] + max[1])) / 2.0,
            )
        } else {
            (1.0, 0.0, 0.0)
        };

        let mut regions = HashMap::with_capacity(raw.len());
        for (id, rings) in raw {
            let fitted: Vec<Vec<[f64; 2]>> = rings
                .iter()
                .map(|ring| {
                    ring.iter()
                        .map(|p| [p[0] * scale + tx, p[1] * scale + ty])
                        .collect()
                })
                .collect();
            let centroid = shape_centroid(&fitted);
            regions.insert(id, ProjectedRegion { centroid, rings: fitted });
        }

        MapProjection { viewport, regions }
    }

    /// Build a projection directly from known screen-space centroids.
    ///
    /// This is exposed primarily for tests and headless embedding; the
    /// resulting regions carry no drawable rings.
    pub fn from_centroids<I>(viewport: ViewportSize, centroids: I) -> MapProjection
    where
        I: IntoIterator<Item = (RegionId, [f64; 2])>,
    {
        let regions = centroids
            .into_iter()
            .map(|(id, centroid)| {
                (
                    id,
                    ProjectedRegion {
                        centroid,
                        rings: Vec::new(),
                    },
                )
            })
            .collect();
        MapProjection { viewport, regions }
    }

    /// The viewport this projection was computed for.
    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    /// Projected form of one region.
    pub fn get(&self, id: RegionId) -> Option<&ProjectedRegion> {
        self.regions.get(&id)
    }

    /// Screen-space centroid of one region.
    pub fn centroid(&self, id: RegionId) -> Option<[f64; 2]> {
        self.regions.get(&id).map(|r| r.centroid)
    }

    /// Iterate over `(id, projected region)` pairs (unordered).
    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &ProjectedRegion)> {
        self.regions.iter().map(|(id, r)| (*id, r))
    }

    /// Number of projected regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns `true` when no regions were projected.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Albers equal-area conic, unscaled. Y grows downward (screen convention).
fn albers(lon_deg: f64, lat_deg: f64) -> [f64; 2] {
    let phi1 = PARALLEL_1_DEG.to_radians();
    let phi2 = PARALLEL_2_DEG.to_radians();
    let phi0 = REFERENCE_LAT_DEG.to_radians();
    let lam0 = CENTRAL_MERIDIAN_DEG.to_radians();

    let n = (phi1.sin() + phi2.sin()) / 2.0;
    let c = phi1.cos().powi(2) + 2.0 * n * phi1.sin();
    let rho = |phi: f64| (c - 2.0 * n * phi.sin()).sqrt() / n;
    let rho0 = rho(phi0);

    let phi = lat_deg.to_radians();
    let theta = n * (lon_deg.to_radians() - lam0);
    let r = rho(phi);
    [r * theta.sin(), rho0 - r * theta.cos()]
}

fn project_ring(ring: &Ring) -> Vec<[f64; 2]> {
    ring.iter().map(|p| albers(p[0], p[1])).collect()
}

/// Area-weighted centroid over all rings (shoelace per ring). Degenerate
/// rings fall back to the vertex average so single points still land
/// somewhere sensible.
fn shape_centroid(rings: &[Vec<[f64; 2]>]) -> [f64; 2] {
    let mut weighted = [0.0, 0.0];
    let mut total_area = 0.0;

    for ring in rings {
        if ring.len() < 3 {
            continue;
        }
        let mut area2 = 0.0;
        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..ring.len() {
            let a = ring[i];
            let b = ring[(i + 1) % ring.len()];
            let cross = a[0] * b[1] - b[0] * a[1];
            area2 += cross;
            cx += (a[0] + b[0]) * cross;
            cy += (a[1] + b[1]) * cross;
        }
        if area2.abs() > f64::EPSILON {
            let area = area2 / 2.0;
            weighted[0] += cx / (3.0 * area2) * area.abs();
            weighted[1] += cy / (3.0 * area2) * area.abs();
            total_area += area.abs();
        }
    }

    if total_area > 0.0 {
        [weighted[0] / total_area, weighted[1] / total_area]
    } else {
        // All rings degenerate: average every vertex.
        let mut sum = [0.0, 0.0];
        let mut count = 0usize;
        for ring in rings {
            for p in ring {
                sum[0] += p[0];
                sum[1] += p[1];
                count += 1;
            }
        }
        if count == 0 {
            [0.0, 0.0]
        } else {
            [sum[0] / count as f64, sum[1] / count as f64]
        }
    }
}
