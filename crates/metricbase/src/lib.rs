//! Top-level facade crate for metricbase.
//!
//! Re-exports the core value/database types and the catalog library so users can depend on a single crate.

pub mod core {
    pub use metricbase_core::*;
}

pub mod catalog {
    pub use metricbase_catalog::*;
}
