//! Serializable point-in-time view of a database.

use std::collections::BTreeMap;

use serde::Serialize;

use metricbase_core::error::{MetricBaseError, Result};
use metricbase_core::metric::{DESCRIPTION_KEY, UNIT_KEY};
use metricbase_core::{Database, Group, GroupKind, Metric, MetricType};

#[derive(Debug, Serialize)]
pub struct DatabaseSnapshot {
    pub name: String,
    pub description: String,
    pub filename: String,
    pub kind: String,
    pub enabled: bool,
    pub groups: Vec<GroupSnapshot>,
    pub metrics: Vec<MetricSnapshot>,
}

#[derive(Debug, Serialize)]
pub struct GroupSnapshot {
    pub name: String,
    pub identity: i64,
    pub kind: GroupKind,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct MetricSnapshot {
    pub group: String,
    pub group_identity: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: MetricType,
    pub value: String,
    pub unit: String,
    pub description: String,
    pub alias: u64,
    pub timestamp: u64,
    pub valid: bool,
    pub updated: bool,
    pub read_only: bool,
    pub historical: bool,
    pub transient: bool,
    /// Extra properties; description and unit are listed above.
    pub properties: BTreeMap<String, String>,
}

impl DatabaseSnapshot {
    /// Capture groups and metrics in the database's current order.
    pub fn capture(db: &Database) -> Self {
        Self {
            name: db.name().to_string(),
            description: db.description().to_string(),
            filename: db.filename().to_string(),
            kind: db.kind().as_str().to_string(),
            enabled: db.is_enabled(),
            groups: db.groups().map(GroupSnapshot::from).collect(),
            metrics: db.metrics().map(MetricSnapshot::from).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MetricBaseError::Internal(format!("snapshot encode failed: {e}")))
    }
}

impl From<&Group> for GroupSnapshot {
    fn from(group: &Group) -> Self {
        Self {
            name: group.name().to_string(),
            identity: group.identity(),
            kind: group.kind(),
            description: group.description().to_string(),
        }
    }
}

impl From<&Metric> for MetricSnapshot {
    fn from(metric: &Metric) -> Self {
        let properties = metric
            .properties()
            .snapshot()
            .into_iter()
            .filter(|p| p.key() != DESCRIPTION_KEY && p.key() != UNIT_KEY)
            .map(|p| (p.key().to_string(), p.text()))
            .collect();
        let (group, group_identity, name) = metric.sort_key();
        Self {
            group,
            group_identity,
            name,
            data_type: metric.kind(),
            value: metric.text(),
            unit: metric.unit(),
            description: metric.description(),
            alias: metric.alias(),
            timestamp: metric.timestamp(),
            valid: metric.is_valid(),
            updated: metric.is_updated(),
            read_only: metric.is_read_only(),
            historical: metric.is_historical(),
            transient: metric.is_transient(),
            properties,
        }
    }
}
