//! Catalog config loader (strict parsing).

pub mod schema;

use std::fs;

use metricbase_core::error::{MetricBaseError, Result};

pub use schema::{CatalogConfig, DatabaseSection, GroupConfig, MetricConfig};

pub fn load_from_file(path: &str) -> Result<CatalogConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MetricBaseError::Internal(format!("read catalog failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<CatalogConfig> {
    let cfg: CatalogConfig = serde_yaml::from_str(s)
        .map_err(|e| MetricBaseError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
