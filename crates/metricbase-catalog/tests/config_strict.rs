#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use metricbase_catalog::config;
use metricbase_core::{DatabaseKind, MetricType};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
groups:
  - name: "Engine"
    identity: 1
    metrics:
      - name: "Speed"
        unti: "km/h" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
groups:
  - name: "Engine"
    identity: 1
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.groups[0].name, "Engine");
    assert!(cfg.database.enabled);
    assert_eq!(cfg.database.kind, DatabaseKind::Unknown);
}

#[test]
fn unsupported_version() {
    let cfg = r#"
version: 2
groups:
  - name: "Engine"
    identity: 1
"#;
    let err = config::load_from_str(cfg).expect_err("must fail");
    assert_eq!(err.code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn duplicate_group_key_rejected() {
    let cfg = r#"
version: 1
groups:
  - name: "Engine"
    identity: 1
  - name: "Engine"
    identity: 1
"#;
    let err = config::load_from_str(cfg).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn same_group_name_with_other_identity_is_fine() {
    let cfg = r#"
version: 1
groups:
  - name: "Wheel"
    identity: 1
    metrics: [{ name: "Pressure", type: Float }]
  - name: "Wheel"
    identity: 2
    metrics: [{ name: "Pressure", type: Float }]
"#;
    let cfg = config::load_from_str(cfg).expect("must parse");
    assert_eq!(cfg.metric_count(), 2);
}

#[test]
fn duplicate_metric_rejected() {
    let cfg = r#"
version: 1
groups:
  - name: "Engine"
    identity: 1
    metrics:
      - { name: "Speed" }
      - { name: "Speed" }
"#;
    let err = config::load_from_str(cfg).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn initial_value_must_match_type() {
    let cfg = r#"
version: 1
groups:
  - name: "Engine"
    identity: 1
    metrics:
      - { name: "Gear", type: UInt8, value: "third" }
"#;
    let err = config::load_from_str(cfg).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn metric_type_names() {
    let cfg = r#"
version: 1
groups:
  - name: "Device"
    identity: 7
    kind: Device
    metrics:
      - { name: "Serial", type: UUID, value: "67e55044-10b1-426f-9247-bb680e5fe0c8" }
      - { name: "Samples", type: DoubleArray }
      - { name: "Label" }
"#;
    let cfg = config::load_from_str(cfg).expect("must parse");
    let types: Vec<MetricType> = cfg.groups[0].metrics.iter().map(|m| m.data_type).collect();
    assert_eq!(types, [MetricType::Uuid, MetricType::DoubleArray, MetricType::String]);
}
