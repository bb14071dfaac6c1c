//! Metric database: owns groups and metrics and provides lookup and ordering.
//!
//! Structural changes (create, delete, sort) take `&mut self`; there is no
//! internal lock around the collections. Values are read and written through
//! `&Metric`, which is safe from many threads at once.
//!
//! Callers hold [`GroupKey`] / [`MetricKey`] handles. A handle whose entry has
//! been deleted resolves to `None`.
//!
//! Metrics carry a copy of their group's name and identity taken at creation.
//! Renaming a group later does not touch its metrics: lookups by the old name
//! keep finding them and lookups by the new name do not.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::arena::{Arena, ArenaKey};
use crate::error::{MetricBaseError, Result};
use crate::group::Group;
use crate::metric::Metric;

pub type GroupKey = ArenaKey<Group>;
pub type MetricKey = ArenaKey<Metric>;

/// Origin of a database. Classification only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DatabaseKind {
    #[default]
    Unknown,
    Sqlite,
    DbcFile,
    A2lFile,
}

impl DatabaseKind {
    pub const ALL: [DatabaseKind; 4] = [
        DatabaseKind::Unknown,
        DatabaseKind::Sqlite,
        DatabaseKind::DbcFile,
        DatabaseKind::A2lFile,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DatabaseKind::Unknown => "Unknown",
            DatabaseKind::Sqlite => "SQLite Database",
            DatabaseKind::DbcFile => "DBC File",
            DatabaseKind::A2lFile => "A2L File",
        }
    }

    /// Reverse of [`DatabaseKind::as_str`]. Unknown text maps to `Unknown`.
    pub fn from_name(name: &str) -> DatabaseKind {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == name)
            .unwrap_or(DatabaseKind::Unknown)
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default)]
pub struct Database {
    kind: DatabaseKind,
    name: String,
    description: String,
    filename: String,
    enabled: bool,
    operable: bool,
    groups: Arena<Group>,
    metrics: Arena<Metric>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(kind: DatabaseKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn kind(&self) -> DatabaseKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = filename.into();
    }

    /// Enabling also makes the database operable; disabling clears both.
    pub fn enable(&mut self, enable: bool) {
        self.enabled = enable;
        self.operable = enable;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_operable(&self) -> bool {
        self.operable
    }

    // ---- groups ----

    /// Get-or-create on `(name, identity)`.
    pub fn create_group(&mut self, name: &str, identity: i64) -> GroupKey {
        if let Some(key) = self.groups.find_key(|g| g.matches(name, identity)) {
            return key;
        }
        debug!(group = name, identity, "create group");
        self.groups.insert(Group::new(name, identity))
    }

    /// Remove every group matching `(name, identity)`. Metrics are left alone.
    pub fn delete_group(&mut self, name: &str, identity: i64) -> usize {
        let removed = self.groups.remove_where(|g| g.matches(name, identity));
        debug!(group = name, identity, removed, "delete group");
        removed
    }

    pub fn group(&self, key: GroupKey) -> Option<&Group> {
        self.groups.get(key)
    }

    pub fn group_mut(&mut self, key: GroupKey) -> Option<&mut Group> {
        self.groups.get_mut(key)
    }

    /// Resolve a key, reporting a deleted entry as [`MetricBaseError::StaleKey`].
    pub fn try_group(&self, key: GroupKey) -> Result<&Group> {
        self.group(key).ok_or(MetricBaseError::StaleKey)
    }

    /// Groups in current order.
    pub fn groups(&self) -> impl Iterator<Item = &Group> + '_ {
        self.groups.iter().map(|(_, g)| g)
    }

    pub fn group_keys(&self) -> Vec<GroupKey> {
        self.groups.iter().map(|(k, _)| k).collect()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn group_key_by_name(&self, name: &str) -> Option<GroupKey> {
        self.groups.find_key(|g| g.name() == name)
    }

    /// First group with this name.
    pub fn group_by_name(&self, name: &str) -> Option<&Group> {
        self.group_key_by_name(name).and_then(|k| self.group(k))
    }

    pub fn group_key_by_identity(&self, identity: i64) -> Option<GroupKey> {
        self.groups.find_key(|g| g.identity() == identity)
    }

    /// First group with this identity.
    pub fn group_by_identity(&self, identity: i64) -> Option<&Group> {
        self.group_key_by_identity(identity).and_then(|k| self.group(k))
    }

    /// Sort groups by `(name, identity)`.
    pub fn sort_groups(&mut self) {
        self.groups
            .sort_by_cached_key(|g| (g.name().to_string(), g.identity()));
        debug!(count = self.groups.len(), "sorted groups");
    }

    // ---- metrics ----

    /// Get-or-create on `(group.name, group.identity, name)`.
    ///
    /// A new metric gets a copy of the group's name and identity.
    pub fn create_metric(&mut self, group: &Group, name: &str) -> MetricKey {
        self.create_metric_labelled(group.name(), group.identity(), name)
    }

    /// Like [`Database::create_metric`] for a group held by this database.
    /// `None` if the group key is stale.
    pub fn create_metric_in(&mut self, group: GroupKey, name: &str) -> Option<MetricKey> {
        let (group_name, identity) = {
            let g = self.group(group)?;
            (g.name().to_string(), g.identity())
        };
        Some(self.create_metric_labelled(&group_name, identity, name))
    }

    fn create_metric_labelled(&mut self, group_name: &str, identity: i64, name: &str) -> MetricKey {
        if let Some(key) = self.metrics.find_key(|m| m.matches(group_name, identity, name)) {
            return key;
        }
        debug!(group = group_name, identity, metric = name, "create metric");
        let metric = Metric::new(name);
        metric.set_group_name(group_name);
        metric.set_group_identity(identity);
        self.metrics.insert(metric)
    }

    /// Remove every metric matching `(group.name, group.identity, name)`.
    pub fn delete_metric(&mut self, group: &Group, name: &str) -> usize {
        let (group_name, identity) = (group.name(), group.identity());
        let removed = self
            .metrics
            .remove_where(|m| m.matches(group_name, identity, name));
        debug!(group = group_name, identity, metric = name, removed, "delete metric");
        removed
    }

    /// Like [`Database::delete_metric`] for a group held by this database.
    pub fn delete_metric_in(&mut self, group: GroupKey, name: &str) -> usize {
        let Some(group) = self.group(group).cloned() else {
            return 0;
        };
        self.delete_metric(&group, name)
    }

    pub fn metric(&self, key: MetricKey) -> Option<&Metric> {
        self.metrics.get(key)
    }

    pub fn metric_mut(&mut self, key: MetricKey) -> Option<&mut Metric> {
        self.metrics.get_mut(key)
    }

    pub fn try_metric(&self, key: MetricKey) -> Result<&Metric> {
        self.metric(key).ok_or(MetricBaseError::StaleKey)
    }

    /// Metrics in current order.
    pub fn metrics(&self) -> impl Iterator<Item = &Metric> + '_ {
        self.metrics.iter().map(|(_, m)| m)
    }

    pub fn metric_keys(&self) -> Vec<MetricKey> {
        self.metrics.iter().map(|(k, _)| k).collect()
    }

    pub fn metric_count(&self) -> usize {
        self.metrics.len()
    }

    pub fn metric_key_by_group_name(&self, group_name: &str, metric_name: &str) -> Option<MetricKey> {
        self.metrics.find_key(|m| {
            let (g, _, n) = m.sort_key();
            g == group_name && n == metric_name
        })
    }

    /// First metric named `metric_name` in a group named `group_name`.
    pub fn metric_by_group_name(&self, group_name: &str, metric_name: &str) -> Option<&Metric> {
        self.metric_key_by_group_name(group_name, metric_name)
            .and_then(|k| self.metric(k))
    }

    pub fn metric_key_by_group_identity(
        &self,
        group_identity: i64,
        metric_name: &str,
    ) -> Option<MetricKey> {
        self.metrics
            .find_key(|m| m.group_identity() == group_identity && m.name() == metric_name)
    }

    /// First metric named `metric_name` in a group with `group_identity`.
    pub fn metric_by_group_identity(&self, group_identity: i64, metric_name: &str) -> Option<&Metric> {
        self.metric_key_by_group_identity(group_identity, metric_name)
            .and_then(|k| self.metric(k))
    }

    /// All metrics, sorted by name.
    pub fn metrics_by_name(&self) -> Vec<&Metric> {
        sorted_by_name(self.metrics().collect())
    }

    /// Metrics of one group name, sorted by metric name only.
    pub fn metrics_by_group_name(&self, group_name: &str) -> Vec<&Metric> {
        sorted_by_name(
            self.metrics()
                .filter(|m| m.group_name() == group_name)
                .collect(),
        )
    }

    /// Metrics of one group identity, sorted by metric name only.
    pub fn metrics_by_group_identity(&self, group_identity: i64) -> Vec<&Metric> {
        sorted_by_name(
            self.metrics()
                .filter(|m| m.group_identity() == group_identity)
                .collect(),
        )
    }

    /// Sort metrics by `(group_name, group_identity, name)`.
    pub fn sort_metrics_by_group(&mut self) {
        self.metrics.sort_by_cached_key(Metric::sort_key);
        debug!(count = self.metrics.len(), "sorted metrics by group");
    }

    /// Sort metrics by name.
    pub fn sort_metrics_by_name(&mut self) {
        self.metrics.sort_by_cached_key(Metric::name);
        debug!(count = self.metrics.len(), "sorted metrics by name");
    }

    /// Drop every group and metric. Outstanding keys become stale.
    pub fn clear(&mut self) {
        self.groups.clear();
        self.metrics.clear();
    }
}

fn sorted_by_name(mut list: Vec<&Metric>) -> Vec<&Metric> {
    list.sort_by_cached_key(|m| m.name());
    list
}
