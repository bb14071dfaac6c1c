use dashmap::DashMap;
use tracing::debug;

use metricbase_core::error::Result;

use crate::config::CatalogConfig;
use crate::populate::build_database;
use crate::shared::SharedDatabase;

/// Named databases: `database name -> SharedDatabase`.
#[derive(Debug, Default)]
pub struct DatabaseRegistry {
    databases: DashMap<String, SharedDatabase>,
}

impl DatabaseRegistry {
    pub fn new() -> Self {
        Self {
            databases: DashMap::new(),
        }
    }

    /// Insert under `name`, returning the database it replaced.
    pub fn insert(&self, name: impl Into<String>, db: SharedDatabase) -> Option<SharedDatabase> {
        let name = name.into();
        debug!(database = %name, "register database");
        self.databases.insert(name, db)
    }

    /// Build a catalog and register it under its database name.
    pub fn load_catalog(&self, cfg: &CatalogConfig) -> Result<SharedDatabase> {
        let db = SharedDatabase::new(build_database(cfg)?);
        self.insert(cfg.database.name.as_str(), db.clone());
        Ok(db)
    }

    pub fn get(&self, name: &str) -> Option<SharedDatabase> {
        self.databases.get(name).map(|r| r.value().clone())
    }

    pub fn remove(&self, name: &str) -> Option<SharedDatabase> {
        self.databases.remove(name).map(|(_, db)| db)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.databases.iter().map(|r| r.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.databases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.databases.is_empty()
    }
}
