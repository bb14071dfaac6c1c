//! metricbase catalog library entry.
//!
//! Everything around the core database that an application needs to use it:
//! strict catalog config, building a database from it, an external lock for
//! structural changes, a registry of named databases, the text ingest path
//! and a serializable snapshot. Consumed by the `metricbase-dump` binary and by
//! integration tests.

pub mod config;
pub mod ingest;
pub mod populate;
pub mod registry;
pub mod shared;
pub mod snapshot;
