//! Shared error type across metricbase crates.
//!
//! Value conversion never produces these: a value that cannot be parsed is
//! reported through the `valid` flag of its cell. Errors cover catalog loading,
//! key resolution and the ingest boundary.

use thiserror::Error;

/// Stable error codes, independent of the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Malformed or inconsistent catalog definition.
    BadConfig,
    /// Unsupported catalog version.
    UnsupportedVersion,
    /// Group or metric lookup miss.
    NotFound,
    /// Key refers to a deleted entry.
    StaleKey,
    /// Write attempted on a read-only metric.
    ReadOnly,
    /// Internal failure.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::StaleKey => "STALE_KEY",
            ErrorCode::ReadOnly => "READ_ONLY",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricBaseError>;

/// Unified error type used by core and catalog.
#[derive(Debug, Error)]
pub enum MetricBaseError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported catalog version")]
    UnsupportedVersion,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("stale key")]
    StaleKey,
    #[error("read only: {0}")]
    ReadOnly(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl MetricBaseError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            MetricBaseError::BadConfig(_) => ErrorCode::BadConfig,
            MetricBaseError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            MetricBaseError::NotFound(_) => ErrorCode::NotFound,
            MetricBaseError::StaleKey => ErrorCode::StaleKey,
            MetricBaseError::ReadOnly(_) => ErrorCode::ReadOnly,
            MetricBaseError::Internal(_) => ErrorCode::Internal,
        }
    }
}
