//! Demo: linked map + statistics view over a synthetic county grid.
//!
//! What it demonstrates
//! - Building a [`Dataset`] in code (no GeoJSON file needed).
//! - Launching the UI with [`run_geoscope`] and a custom headline.
//! - Subscribing to selection commits through a [`SelectionController`].
//!
//! How to run
//! ```bash
//! cargo run --example synthetic_counties
//! ```
//!
//! The grid covers a lon/lat box roughly over the central US, split into
//! 12x8 square "counties" grouped into 4 synthetic states.

use geoscope::{
    run_geoscope, Controllers, Dataset, GeoScopeConfig, Metrics, Region, SelectionController,
};

fn synthetic_grid() -> Dataset {
    let (cols, rows) = (12usize, 8usize);
    let (lon0, lat0) = (-104.0f64, 33.0f64);
    let cell = 1.5f64;

    let mut regions = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            let lon = lon0 + col as f64 * cell;
            let lat = lat0 + row as f64 * cell;
            let ring = vec![
                [lon, lat],
                [lon + cell, lat],
                [lon + cell, lat + cell],
                [lon, lat + cell],
                [lon, lat],
            ];
            // Two state columns by two state rows.
            let state_code = format!("{:02}", 1 + (col / 6) + 2 * (row / 4));
            let n = (row * cols + col) as f64;
            let transactions = 50 + ((n * 37.0) as u64 % 950);
            let avg_price = 120_000.0 + 9_000.0 * (n % 23.0);
            regions.push(Region {
                state_code,
                name: format!("County {}-{}", row + 1, col + 1),
                shape: vec![ring],
                metrics: Metrics {
                    avg_price,
                    total_price: avg_price * transactions as f64,
                    total_transactions: transactions,
                },
            });
        }
    }
    Dataset::new(regions)
}

fn main() -> eframe::Result<()> {
    let dataset = synthetic_grid();

    let selection = SelectionController::new();
    let commits = selection.subscribe();
    std::thread::spawn(move || {
        while let Ok(commit) = commits.recv() {
            println!("{}: {} region(s)", commit.id, commit.regions.len());
        }
    });

    let cfg = GeoScopeConfig {
        title: "GeoScope - synthetic counties".to_string(),
        headline: Some("Synthetic county grid".to_string()),
        controllers: Controllers {
            selection: Some(selection),
            ..Controllers::default()
        },
        ..GeoScopeConfig::default()
    };
    run_geoscope(dataset, cfg)
}
