//! Canonical text vectors: every input is stored, read back and compared.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use bytes::Bytes;

use metricbase_core::{MetricType, ScalarValue, ValueCell};

mod vector_loader;
use vector_loader::{load, ValueVector};

fn typed_input(v: &ValueVector, kind: MetricType) -> ScalarValue {
    match kind {
        MetricType::Float => {
            let raw: [u8; 4] = v.input.bytes().try_into().expect("float needs 4 bytes");
            ScalarValue::Float(f32::from_bits(u32::from_be_bytes(raw)))
        }
        MetricType::Double => {
            let raw: [u8; 8] = v.input.bytes().try_into().expect("double needs 8 bytes");
            ScalarValue::Double(f64::from_bits(u64::from_be_bytes(raw)))
        }
        MetricType::Bytes if v.input.encoding != "text" => {
            ScalarValue::Bytes(Bytes::from(v.input.bytes()))
        }
        _ => ScalarValue::decode(kind, v.input.text()).expect("vector input must decode"),
    }
}

#[test]
fn float_vectors_round_trip_bit_exact() {
    for v in load("floats.json") {
        let kind = MetricType::from_name(&v.kind);
        let cell = ValueCell::with_kind(kind);
        let input = typed_input(&v, kind);
        cell.set(input.clone());

        let text = cell.text();
        assert!(!text.contains(','), "vector={}", v.description);
        if let Some(expect) = &v.expect_text {
            assert_eq!(&text, expect, "vector={}", v.description);
        }

        match input {
            ScalarValue::Float(f) => {
                assert_eq!(cell.get::<f32>().to_bits(), f.to_bits(), "vector={}", v.description)
            }
            ScalarValue::Double(d) => {
                assert_eq!(cell.get::<f64>().to_bits(), d.to_bits(), "vector={}", v.description)
            }
            other => panic!("not a float vector: {other:?}"),
        }
        assert!(cell.is_valid(), "vector={}", v.description);
    }
}

#[test]
fn scalar_vectors_canonicalize() {
    for v in load("scalars.json") {
        let kind = MetricType::from_name(&v.kind);
        assert_ne!(kind, MetricType::Unknown, "vector={}", v.description);

        let cell = ValueCell::with_kind(kind);
        let input = typed_input(&v, kind);
        cell.set(input.clone());

        let expect = v.expect_text.as_deref().expect("missing expect_text");
        assert_eq!(cell.text(), expect, "vector={}", v.description);
        assert_eq!(cell.get_scalar(), Some(input), "vector={}", v.description);
        assert!(cell.is_valid(), "vector={}", v.description);
    }
}

#[test]
fn stale_vectors_fail_soft() {
    for v in load("stale.json") {
        assert!(v.expect_stale, "vector={}", v.description);
        let kind = MetricType::from_name(&v.kind);
        let cell = ValueCell::with_kind(kind);
        cell.set_text(v.input.text());
        assert!(cell.is_valid(), "vector={}", v.description);

        assert_eq!(cell.get_scalar(), None, "vector={}", v.description);
        assert!(!cell.is_valid(), "vector={}", v.description);
        assert_eq!(cell.text(), v.input.text(), "vector={}", v.description);
    }
}
