//! Build a [`Database`] from a validated catalog config.

use tracing::{debug, info};

use metricbase_core::error::Result;
use metricbase_core::{Database, Group, Metric, Property};

use crate::config::{CatalogConfig, MetricConfig};

/// Populate a new database through the core factory calls.
///
/// Initial values count as assigned (`valid`) but not as updates.
pub fn build_database(cfg: &CatalogConfig) -> Result<Database> {
    cfg.validate()?;

    let section = &cfg.database;
    let mut db = Database::with_kind(section.kind);
    db.set_name(section.name.as_str());
    db.set_description(section.description.as_str());
    db.set_filename(section.filename.as_str());
    db.enable(section.enabled);

    for group_cfg in &cfg.groups {
        let key = db.create_group(&group_cfg.name, group_cfg.identity);
        let mut group = Group::new(group_cfg.name.as_str(), group_cfg.identity);
        group.set_kind(group_cfg.kind);
        group.set_description(group_cfg.description.as_str());
        if let Some(stored) = db.group_mut(key) {
            *stored = group.clone();
        }

        for metric_cfg in &group_cfg.metrics {
            let key = db.create_metric(&group, &metric_cfg.name);
            if let Some(metric) = db.metric(key) {
                apply_metric(metric, metric_cfg);
            }
        }
        debug!(group = %group_cfg.name, metrics = group_cfg.metrics.len(), "group populated");
    }

    info!(
        database = %db.name(),
        groups = db.group_count(),
        metrics = db.metric_count(),
        "catalog built"
    );
    Ok(db)
}

fn apply_metric(metric: &Metric, cfg: &MetricConfig) {
    metric.set_kind(cfg.data_type);
    metric.set_alias(cfg.alias);
    metric.set_read_only(cfg.read_only);
    metric.set_historical(cfg.historical);
    metric.set_transient(cfg.transient);
    if !cfg.unit.is_empty() {
        metric.set_unit(cfg.unit.as_str());
    }
    if !cfg.description.is_empty() {
        metric.set_description(cfg.description.as_str());
    }
    for (key, value) in &cfg.properties {
        metric.add_property(Property::with_text(key.as_str(), value.as_str()));
    }
    if let Some(value) = &cfg.value {
        metric.set_text(value.as_str());
        metric.reset_updated();
    }
}
