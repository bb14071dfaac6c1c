//! External lock around a [`Database`].
//!
//! The core database does not synchronize its own collections. Applications
//! that create, delete or sort from more than one thread go through this
//! wrapper; value reads and writes only need the read side.

use std::sync::{Arc, RwLock};

use metricbase_core::Database;

#[derive(Debug, Clone, Default)]
pub struct SharedDatabase {
    inner: Arc<RwLock<Database>>,
}

impl SharedDatabase {
    pub fn new(db: Database) -> Self {
        Self {
            inner: Arc::new(RwLock::new(db)),
        }
    }

    /// Run `f` with shared access. Metric values may be written from here.
    pub fn read<R>(&self, f: impl FnOnce(&Database) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        f(&guard)
    }

    /// Run `f` with exclusive access for structural changes.
    pub fn write<R>(&self, f: impl FnOnce(&mut Database) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }

    pub fn name(&self) -> String {
        self.read(|db| db.name().to_string())
    }
}
