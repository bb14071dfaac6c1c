//! Catalog -> registry -> ingest -> snapshot.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use metricbase_catalog::registry::DatabaseRegistry;
use metricbase_catalog::snapshot::DatabaseSnapshot;
use metricbase_catalog::{config, ingest};

const CATALOG: &str = r#"
version: 1
database:
  name: "Kaiju World"
  description: "World of monsters"
  kind: A2lFile
groups:
  - name: "King Kongs"
    identity: 101
    metrics:
      - { name: "King Kong 2", type: Double, unit: "m" }
      - { name: "King Kong 1", type: Double, unit: "m", value: "31.5" }
  - name: "Godzillas"
    identity: 102
    kind: Device
    metrics:
      - { name: "Godzilla 1", type: Int32, read_only: true, value: "1954" }
      - name: "Godzilla 2"
        type: Boolean
        description: "Awake"
        properties: { island: "Odo" }
"#;

#[test]
fn registry_ingest_and_snapshot() {
    let cfg = config::load_from_str(CATALOG).unwrap();
    let registry = DatabaseRegistry::new();
    let shared = registry.load_catalog(&cfg).unwrap();
    assert_eq!(registry.names(), vec!["Kaiju World".to_string()]);

    let changed = shared
        .read(|db| ingest::apply_text(db, "King Kongs", "King Kong 2", "49.75 m", 1_000))
        .unwrap();
    assert!(changed);

    let err = shared
        .read(|db| ingest::apply_text(db, "Godzillas", "Godzilla 1", "2024", 1_000))
        .unwrap_err();
    assert_eq!(err.code().as_str(), "READ_ONLY");

    shared.write(|db| {
        db.sort_groups();
        db.sort_metrics_by_group();
    });

    let snapshot = registry
        .get("Kaiju World")
        .unwrap()
        .read(DatabaseSnapshot::capture);
    assert_eq!(snapshot.kind, "A2L File");

    let groups: Vec<&str> = snapshot.groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(groups, ["Godzillas", "King Kongs"]);

    let metrics: Vec<&str> = snapshot.metrics.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(metrics, ["Godzilla 1", "Godzilla 2", "King Kong 1", "King Kong 2"]);

    let kong2 = &snapshot.metrics[3];
    assert_eq!(kong2.value, "49.75");
    assert!(kong2.updated && kong2.valid);
    assert_eq!(kong2.timestamp, 1_000);

    let godzilla2 = &snapshot.metrics[1];
    assert_eq!(godzilla2.description, "Awake");
    assert_eq!(godzilla2.properties.get("island").map(String::as_str), Some("Odo"));
    assert!(!godzilla2.properties.contains_key("description"));

    let json = snapshot.to_json().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["metrics"][0]["type"], "Int32");
    assert_eq!(parsed["groups"][0]["kind"], "Device");
}
