use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;
use metricbase_core::error::{MetricBaseError, Result};
use metricbase_core::{DatabaseKind, GroupKind, MetricType, ScalarValue};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    pub version: u32,

    #[serde(default)]
    pub database: DatabaseSection,

    #[serde(default)]
    pub groups: Vec<GroupConfig>,
}

impl CatalogConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricBaseError::UnsupportedVersion);
        }
        if self.groups.is_empty() {
            return Err(MetricBaseError::BadConfig("groups must not be empty".into()));
        }

        let mut seen = HashSet::new();
        for group in &self.groups {
            group.validate()?;
            if !seen.insert((group.name.as_str(), group.identity)) {
                return Err(MetricBaseError::BadConfig(format!(
                    "duplicate group {} ({})",
                    group.name, group.identity
                )));
            }
        }
        Ok(())
    }

    pub fn metric_count(&self) -> usize {
        self.groups.iter().map(|g| g.metrics.len()).sum()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseSection {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub filename: String,

    #[serde(default)]
    pub kind: DatabaseKind,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            filename: String::new(),
            kind: DatabaseKind::default(),
            enabled: default_enabled(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupConfig {
    pub name: String,
    pub identity: i64,

    #[serde(default)]
    pub kind: GroupKind,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub metrics: Vec<MetricConfig>,
}

impl GroupConfig {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(MetricBaseError::BadConfig("group name must not be empty".into()));
        }
        let mut names = HashSet::new();
        for metric in &self.metrics {
            metric.validate(&self.name)?;
            if !names.insert(metric.name.as_str()) {
                return Err(MetricBaseError::BadConfig(format!(
                    "duplicate metric {}/{}",
                    self.name, metric.name
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricConfig {
    pub name: String,

    #[serde(rename = "type", default = "default_metric_type")]
    pub data_type: MetricType,

    #[serde(default)]
    pub unit: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub alias: u64,

    /// Initial value as text.
    #[serde(default)]
    pub value: Option<String>,

    #[serde(default)]
    pub read_only: bool,

    #[serde(default)]
    pub historical: bool,

    #[serde(default)]
    pub transient: bool,

    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl MetricConfig {
    pub fn validate(&self, group: &str) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(MetricBaseError::BadConfig(format!(
                "metric name in group {group} must not be empty"
            )));
        }
        if self.data_type == MetricType::Unknown {
            return Err(MetricBaseError::BadConfig(format!(
                "metric {group}/{} has type Unknown",
                self.name
            )));
        }
        // Array and aggregate kinds carry no checkable payload.
        let checkable = !self.data_type.is_array() && !self.data_type.is_aggregate();
        if let Some(value) = &self.value {
            if checkable && ScalarValue::decode(self.data_type, value).is_none() {
                return Err(MetricBaseError::BadConfig(format!(
                    "metric {group}/{}: initial value {value:?} is not a valid {}",
                    self.name, self.data_type
                )));
            }
        }
        Ok(())
    }
}

fn default_metric_type() -> MetricType {
    MetricType::String
}
