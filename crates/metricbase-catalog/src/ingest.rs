//! Text ingest: where a transport hands over a `(group, metric, payload)`.
//!
//! Transports deliver values as text. Numeric payloads sometimes carry a unit
//! suffix (`"12.5 km/h"`); it is stripped before the value is stored.

use tracing::debug;

use metricbase_core::error::{MetricBaseError, Result};
use metricbase_core::{Database, Metric};

/// Store `payload` on the metric `group_name/metric_name`.
///
/// Returns whether the stored text changed.
pub fn apply_text(
    db: &Database,
    group_name: &str,
    metric_name: &str,
    payload: &str,
    timestamp_ms: u64,
) -> Result<bool> {
    let metric = db
        .metric_by_group_name(group_name, metric_name)
        .ok_or_else(|| MetricBaseError::NotFound(format!("{group_name}/{metric_name}")))?;
    write_text(metric, payload, timestamp_ms)
}

/// Like [`apply_text`], resolving the group by identity.
pub fn apply_text_by_identity(
    db: &Database,
    group_identity: i64,
    metric_name: &str,
    payload: &str,
    timestamp_ms: u64,
) -> Result<bool> {
    let metric = db
        .metric_by_group_identity(group_identity, metric_name)
        .ok_or_else(|| MetricBaseError::NotFound(format!("{group_identity}/{metric_name}")))?;
    write_text(metric, payload, timestamp_ms)
}

fn write_text(metric: &Metric, payload: &str, timestamp_ms: u64) -> Result<bool> {
    if metric.is_read_only() {
        return Err(MetricBaseError::ReadOnly(metric.name()));
    }
    let text = if metric.kind().is_numeric() {
        strip_unit(payload, &metric.unit())
    } else {
        payload
    };
    let changed = metric.set_text(text);
    metric.set_timestamp(timestamp_ms);
    debug!(metric = %metric.name(), changed, "ingested");
    Ok(changed)
}

/// Remove a trailing unit from a numeric payload.
///
/// The metric's own unit is stripped when what remains is a number, so a
/// payload in a longer unit (`"12.5 mm"` against `"m"`) is not cut short.
/// Otherwise, if the first whitespace-separated token is a number, that token
/// is the value.
pub fn strip_unit<'a>(payload: &'a str, unit: &str) -> &'a str {
    let trimmed = payload.trim();
    if !unit.is_empty() {
        if let Some(head) = trimmed.strip_suffix(unit).map(str::trim_end) {
            if head.parse::<f64>().is_ok() {
                return head;
            }
        }
    }
    match trimmed.split_once(char::is_whitespace) {
        Some((head, _)) if head.parse::<f64>().is_ok() => head,
        _ => trimmed,
    }
}
