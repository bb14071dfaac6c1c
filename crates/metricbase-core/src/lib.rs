//! metricbase core: typed metric values held as canonical text, and the
//! in-memory database that groups, indexes and orders them.
//!
//! Values are fail-soft: a read that cannot parse the stored text returns the
//! type's default and marks the value stale instead of returning an error.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

mod arena;
pub mod cell;
pub mod codec;
pub mod database;
pub mod error;
pub mod group;
pub mod kind;
pub mod metric;
pub mod property;

pub use arena::ArenaKey;
pub use cell::ValueCell;
pub use codec::{FromCanonical, ScalarValue, ToCanonical};
pub use database::{Database, DatabaseKind, GroupKey, MetricKey};
/// Shared result type.
pub use error::{ErrorCode, MetricBaseError, Result};
pub use group::{Group, GroupKind};
pub use kind::MetricType;
pub use metric::Metric;
pub use property::{Property, PropertyBag, PropertyRef};
