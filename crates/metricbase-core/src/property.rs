//! Named properties and the per-metric property bag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::cell::ValueCell;
use crate::codec::{FromCanonical, ToCanonical};
use crate::kind::MetricType;

/// A keyed value with the same shape as a metric value.
#[derive(Debug, Default)]
pub struct Property {
    key: String,
    cell: ValueCell,
    null: AtomicBool,
}

impl Property {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// String property holding `text`.
    pub fn with_text(key: impl Into<String>, text: impl Into<String>) -> Self {
        let prop = Self::new(key);
        prop.cell.set_text(text);
        prop
    }

    /// Property tagged with the natural kind of `value`.
    pub fn with_value<T: ToCanonical>(key: impl Into<String>, value: T) -> Self {
        let prop = Self::new(key);
        prop.cell.set_kind(value.natural_kind());
        prop.cell.set(value);
        prop
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    pub fn kind(&self) -> MetricType {
        self.cell.kind()
    }

    pub fn set_kind(&self, kind: MetricType) {
        self.cell.set_kind(kind);
    }

    pub fn set_value<T: ToCanonical>(&self, value: T) -> bool {
        self.cell.set(value)
    }

    pub fn set_text(&self, text: impl Into<String>) -> bool {
        self.cell.set_text(text)
    }

    pub fn value<T: FromCanonical + Default>(&self) -> T {
        self.cell.get()
    }

    pub fn try_value<T: FromCanonical>(&self) -> Option<T> {
        self.cell.try_get()
    }

    pub fn text(&self) -> String {
        self.cell.text()
    }

    pub fn cell(&self) -> &ValueCell {
        &self.cell
    }

    pub fn is_null(&self) -> bool {
        self.null.load(Ordering::Relaxed)
    }

    pub fn set_null(&self, null: bool) {
        self.null.store(null, Ordering::Relaxed);
    }

    pub fn is_valid(&self) -> bool {
        self.cell.is_valid()
    }

    pub fn is_updated(&self) -> bool {
        self.cell.is_updated()
    }

    pub fn reset_updated(&self) {
        self.cell.reset_updated();
    }
}

impl Clone for Property {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            cell: self.cell.clone(),
            null: AtomicBool::new(self.is_null()),
        }
    }
}

/// Shared handle to a property held by a [`PropertyBag`].
///
/// Holds no map lock. A handle outlives removal or replacement of its key
/// and then no longer reflects the bag.
pub type PropertyRef = Arc<Property>;

/// Unordered, key-unique property map.
#[derive(Debug, Default)]
pub struct PropertyBag {
    map: DashMap<String, PropertyRef>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert, replacing any property with the same key.
    pub fn add(&self, property: Property) {
        self.map.insert(property.key.clone(), Arc::new(property));
    }

    /// Get-or-create. Never duplicates an existing key.
    pub fn create(&self, key: &str) -> PropertyRef {
        let entry = self
            .map
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Property::new(key)));
        Arc::clone(entry.value())
    }

    pub fn get(&self, key: &str) -> Option<PropertyRef> {
        self.map.get(key).map(|r| Arc::clone(r.value()))
    }

    pub fn remove(&self, key: &str) -> Option<PropertyRef> {
        self.map.remove(key).map(|(_, prop)| prop)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Text of `key`, empty when missing.
    pub fn get_text(&self, key: &str) -> String {
        self.map.get(key).map(|p| p.text()).unwrap_or_default()
    }

    /// Replace `key` with a string property holding `text`.
    pub fn set_text(&self, key: &str, text: impl Into<String>) {
        self.add(Property::with_text(key, text));
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.map.iter().map(|r| r.key().clone()).collect();
        keys.sort();
        keys
    }

    /// Cloned properties, sorted by key.
    pub fn snapshot(&self) -> Vec<Property> {
        let mut props: Vec<Property> = self.map.iter().map(|r| Property::clone(r.value())).collect();
        props.sort_by(|a, b| a.key.cmp(&b.key));
        props
    }
}

impl Clone for PropertyBag {
    fn clone(&self) -> Self {
        let map = DashMap::new();
        for r in self.map.iter() {
            map.insert(r.key().clone(), Arc::new(Property::clone(r.value())));
        }
        Self { map }
    }
}
