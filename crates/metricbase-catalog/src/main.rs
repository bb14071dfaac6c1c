//! metricbase-dump
//!
//! Loads a catalog file, builds the database, sorts it by group and prints a
//! JSON snapshot to stdout. Logging goes through `RUST_LOG`.

use tracing_subscriber::{fmt, EnvFilter};

use metricbase_catalog::{config, populate, snapshot::DatabaseSnapshot};

fn main() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "metricbase.yaml".to_string());

    let cfg = config::load_from_file(&path).expect("catalog load failed");
    let mut db = populate::build_database(&cfg).expect("catalog build failed");
    db.sort_groups();
    db.sort_metrics_by_group();

    tracing::info!(%path, groups = db.group_count(), metrics = db.metric_count(), "catalog loaded");

    let json = DatabaseSnapshot::capture(&db)
        .to_json()
        .expect("snapshot encode failed");
    println!("{json}");
}
