//! Metric: a named, typed live value plus descriptive properties and flags.
//!
//! Locking: the labels, the value cell and the property bag each have their own
//! lock and no operation holds one while taking another, so composite setters
//! never need to re-enter a lock. Flags are independent atomics.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::cell::ValueCell;
use crate::codec::{FromCanonical, ScalarValue, ToCanonical};
use crate::kind::MetricType;
use crate::property::{Property, PropertyBag, PropertyRef};

pub const DESCRIPTION_KEY: &str = "description";
pub const UNIT_KEY: &str = "unit";

#[derive(Debug, Default, Clone)]
struct Labels {
    name: String,
    group_name: String,
}

/// Status flags. Each one is read and written on its own.
#[derive(Debug, Default)]
struct MetricFlags {
    historical: AtomicBool,
    transient: AtomicBool,
    null: AtomicBool,
    valid: AtomicBool,
    read_only: AtomicBool,
    updated: AtomicBool,
}

#[derive(Debug, Default)]
pub struct Metric {
    labels: Mutex<Labels>,
    group_identity: AtomicI64,
    alias: AtomicU64,
    timestamp: AtomicU64,
    flags: MetricFlags,
    value: ValueCell,
    properties: PropertyBag,
}

impl Metric {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            labels: Mutex::new(Labels {
                name: name.into(),
                group_name: String::new(),
            }),
            ..Self::default()
        }
    }

    fn labels(&self) -> MutexGuard<'_, Labels> {
        self.labels.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn name(&self) -> String {
        self.labels().name.clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.labels().name = name.into();
    }

    /// Group name copied at creation. Not kept in sync with the group.
    pub fn group_name(&self) -> String {
        self.labels().group_name.clone()
    }

    pub fn set_group_name(&self, group_name: impl Into<String>) {
        self.labels().group_name = group_name.into();
    }

    pub fn group_identity(&self) -> i64 {
        self.group_identity.load(Ordering::Relaxed)
    }

    pub fn set_group_identity(&self, identity: i64) {
        self.group_identity.store(identity, Ordering::Relaxed);
    }

    /// `(group_name, group_identity, name)` read under one lock.
    pub fn sort_key(&self) -> (String, i64, String) {
        let labels = self.labels();
        (
            labels.group_name.clone(),
            self.group_identity(),
            labels.name.clone(),
        )
    }

    pub(crate) fn matches(&self, group_name: &str, group_identity: i64, name: &str) -> bool {
        let labels = self.labels();
        labels.group_name == group_name
            && self.group_identity() == group_identity
            && labels.name == name
    }

    pub fn alias(&self) -> u64 {
        self.alias.load(Ordering::Relaxed)
    }

    pub fn set_alias(&self, alias: u64) {
        self.alias.store(alias, Ordering::Relaxed);
    }

    /// Milliseconds since 1970.
    pub fn timestamp(&self) -> u64 {
        self.timestamp.load(Ordering::Relaxed)
    }

    pub fn set_timestamp(&self, ms_since_1970: u64) {
        self.timestamp.store(ms_since_1970, Ordering::Relaxed);
    }

    pub fn kind(&self) -> MetricType {
        self.value.kind()
    }

    pub fn set_kind(&self, kind: MetricType) {
        self.value.set_kind(kind);
    }

    /// Write a value. Marks the metric valid, and updated if the text changed.
    pub fn set_value<T: ToCanonical>(&self, value: T) -> bool {
        let changed = self.value.set(value);
        self.after_write(changed)
    }

    pub fn set_text(&self, text: impl Into<String>) -> bool {
        let changed = self.value.set_text(text);
        self.after_write(changed)
    }

    pub fn set_optional_text(&self, text: Option<&str>) -> bool {
        let changed = self.value.set_optional_text(text);
        self.after_write(changed)
    }

    /// Write a value and its sample time.
    pub fn touch<T: ToCanonical>(&self, value: T, ms_since_1970: u64) -> bool {
        let changed = self.set_value(value);
        self.set_timestamp(ms_since_1970);
        changed
    }

    fn after_write(&self, changed: bool) -> bool {
        self.set_valid(true);
        if changed {
            self.set_updated();
        }
        changed
    }

    /// Typed read. A parse failure yields `T::default()` and marks the metric stale.
    pub fn value<T: FromCanonical + Default>(&self) -> T {
        self.try_value().unwrap_or_default()
    }

    pub fn try_value<T: FromCanonical>(&self) -> Option<T> {
        let parsed = self.value.try_get();
        if parsed.is_none() {
            self.set_valid(false);
        }
        parsed
    }

    /// Decode by the metric's type tag.
    pub fn scalar(&self) -> Option<ScalarValue> {
        let parsed = self.value.get_scalar();
        if parsed.is_none() {
            self.set_valid(false);
        }
        parsed
    }

    pub fn text(&self) -> String {
        self.value.text()
    }

    pub fn description(&self) -> String {
        self.properties.get_text(DESCRIPTION_KEY)
    }

    pub fn set_description(&self, description: impl Into<String>) {
        self.properties.set_text(DESCRIPTION_KEY, description);
    }

    pub fn unit(&self) -> String {
        self.properties.get_text(UNIT_KEY)
    }

    pub fn set_unit(&self, unit: impl Into<String>) {
        self.properties.set_text(UNIT_KEY, unit);
    }

    /// Insert or overwrite by key.
    pub fn add_property(&self, property: Property) {
        self.properties.add(property);
    }

    pub fn create_property(&self, key: &str) -> PropertyRef {
        self.properties.create(key)
    }

    pub fn property(&self, key: &str) -> Option<PropertyRef> {
        self.properties.get(key)
    }

    pub fn delete_property(&self, key: &str) -> Option<PropertyRef> {
        self.properties.remove(key)
    }

    pub fn properties(&self) -> &PropertyBag {
        &self.properties
    }

    pub fn is_historical(&self) -> bool {
        self.flags.historical.load(Ordering::Relaxed)
    }

    pub fn set_historical(&self, historical: bool) {
        self.flags.historical.store(historical, Ordering::Relaxed);
    }

    pub fn is_transient(&self) -> bool {
        self.flags.transient.load(Ordering::Relaxed)
    }

    pub fn set_transient(&self, transient: bool) {
        self.flags.transient.store(transient, Ordering::Relaxed);
    }

    pub fn is_null(&self) -> bool {
        self.flags.null.load(Ordering::Relaxed)
    }

    pub fn set_null(&self, null: bool) {
        self.flags.null.store(null, Ordering::Relaxed);
    }

    /// GOOD (true) or STALE (false).
    pub fn is_valid(&self) -> bool {
        self.flags.valid.load(Ordering::Relaxed)
    }

    pub fn set_valid(&self, valid: bool) {
        self.flags.valid.store(valid, Ordering::Relaxed);
    }

    /// Whether remote writers must leave the value alone.
    pub fn is_read_only(&self) -> bool {
        self.flags.read_only.load(Ordering::Relaxed)
    }

    pub fn set_read_only(&self, read_only: bool) {
        self.flags.read_only.store(read_only, Ordering::Relaxed);
    }

    pub fn is_updated(&self) -> bool {
        self.flags.updated.load(Ordering::Relaxed)
    }

    pub fn set_updated(&self) {
        self.flags.updated.store(true, Ordering::Relaxed);
    }

    pub fn reset_updated(&self) {
        self.flags.updated.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_fields() {
        let metric = Metric::new("Donald");
        assert_eq!(metric.name(), "Donald");
        metric.set_name("Daisy");
        assert_eq!(metric.name(), "Daisy");

        metric.set_group_name("Disney");
        metric.set_group_identity(0x1234);
        assert_eq!(metric.group_name(), "Disney");
        assert_eq!(metric.group_identity(), 0x1234);
        assert_eq!(metric.sort_key(), ("Disney".to_string(), 0x1234, "Daisy".to_string()));

        metric.set_alias(77);
        assert_eq!(metric.alias(), 77);
        metric.set_timestamp(2345);
        assert_eq!(metric.timestamp(), 2345);

        metric.set_description("Last name Duck");
        metric.set_unit("Duck");
        assert_eq!(metric.description(), "Last name Duck");
        assert_eq!(metric.unit(), "Duck");
    }

    #[test]
    fn flags_are_independent() {
        let metric = Metric::new("m");
        metric.set_historical(true);
        metric.set_read_only(true);
        assert!(metric.is_historical());
        assert!(metric.is_read_only());
        assert!(!metric.is_transient());
        assert!(!metric.is_null());
        assert!(!metric.is_valid());

        metric.set_transient(true);
        metric.set_null(true);
        metric.set_historical(false);
        assert!(metric.is_transient());
        assert!(metric.is_null());
        assert!(!metric.is_historical());
        assert!(metric.is_read_only());
    }

    #[test]
    fn typed_values() {
        let metric = Metric::new("v");

        metric.set_kind(MetricType::Boolean);
        metric.set_value(true);
        assert!(metric.value::<bool>());
        assert_eq!(metric.text(), "1");
        metric.set_value(false);
        assert!(!metric.value::<bool>());

        metric.set_kind(MetricType::Int16);
        metric.set_value(-99);
        assert_eq!(metric.value::<i16>(), -99);

        metric.set_kind(MetricType::Double);
        metric.set_value(1.0_f64 / 3.0);
        assert_eq!(metric.value::<f64>(), 1.0_f64 / 3.0);

        metric.set_kind(MetricType::String);
        metric.set_value("Blatter");
        assert_eq!(metric.value::<String>(), "Blatter");
        assert_eq!(metric.kind(), MetricType::String);
    }

    #[test]
    fn updated_follows_changes() {
        let metric = Metric::new("u");
        assert!(metric.set_value(1_u32));
        assert!(metric.is_updated());
        metric.reset_updated();
        assert!(!metric.set_value(1_u32));
        assert!(!metric.is_updated());
        assert!(metric.set_value(2_u32));
        assert!(metric.is_updated());
    }

    #[test]
    fn failed_read_marks_metric_stale() {
        let metric = Metric::new("stale");
        metric.set_kind(MetricType::Int32);
        metric.set_text("--");
        assert!(metric.is_valid());
        assert_eq!(metric.value::<i32>(), 0);
        assert!(!metric.is_valid());
        assert_eq!(metric.text(), "--");

        assert!(!metric.set_text("--"));
        assert!(metric.is_valid());
    }

    #[test]
    fn touch_sets_time() {
        let metric = Metric::new("t");
        assert!(metric.touch(3.5_f32, 1_700_000_000_000));
        assert_eq!(metric.timestamp(), 1_700_000_000_000);
        assert_eq!(metric.value::<f32>(), 3.5);
    }

    #[test]
    fn property_management() {
        let metric = Metric::new("p");
        metric.set_description("d");
        metric.set_unit("u");
        assert_eq!(metric.properties().len(), 2);

        metric.add_property(Property::with_text("Partner", "Goofy"));
        assert_eq!(metric.properties().len(), 3);
        assert!(metric.property("Partner").is_some());
        assert!(metric.delete_property("Partner").is_some());
        assert_eq!(metric.properties().len(), 2);

        drop(metric.create_property("Partner"));
        drop(metric.create_property("Partner"));
        assert_eq!(metric.properties().len(), 3);
        assert!(metric.delete_property("Partner").is_some());
        assert_eq!(metric.properties().len(), 2);
    }

    #[test]
    fn unit_rewrite_while_property_is_held() {
        let metric = std::sync::Arc::new(Metric::new("speed"));
        metric.set_unit("km/h");
        let unit = metric.property(UNIT_KEY);

        let (done, finished) = std::sync::mpsc::channel();
        let writer = std::sync::Arc::clone(&metric);
        std::thread::spawn(move || {
            writer.set_unit("m/s");
            writer.set_description("ground speed");
            let _ = done.send(());
        });
        assert!(finished
            .recv_timeout(std::time::Duration::from_secs(3))
            .is_ok());

        assert_eq!(unit.map(|p| p.text()), Some("km/h".to_string()));
        assert_eq!(metric.unit(), "m/s");
        assert_eq!(metric.description(), "ground speed");
    }

    #[test]
    fn concurrent_writers_and_readers() {
        let metric = Metric::new("shared");
        metric.set_kind(MetricType::UInt64);
        std::thread::scope(|s| {
            for t in 0..4_u64 {
                let metric = &metric;
                s.spawn(move || {
                    for i in 0..500_u64 {
                        metric.set_value(t * 1000 + i);
                        let _ = metric.value::<u64>();
                        metric.set_description(format!("writer {t}"));
                    }
                });
            }
        });
        assert!(metric.is_valid());
        assert!(metric.try_value::<u64>().is_some());
        assert!(metric.description().starts_with("writer "));
    }
}
