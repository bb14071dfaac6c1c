//! String-backed, type-tagged value cell.
//!
//! The stored text is always the canonical rendering of the last value written
//! and is replaced whole. The `valid` and `updated` flags are independent
//! atomics; a reader may observe a flag change slightly before or after the
//! text it describes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::trace;

use crate::codec::{FromCanonical, ScalarValue, ToCanonical};
use crate::kind::MetricType;

#[derive(Debug, Clone, Default)]
struct CellState {
    kind: MetricType,
    raw: String,
}

/// A type tag plus canonical text, guarded by its own lock.
#[derive(Debug, Default)]
pub struct ValueCell {
    state: Mutex<CellState>,
    valid: AtomicBool,
    updated: AtomicBool,
}

impl ValueCell {
    /// Empty text, type `String`, neither valid nor updated.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(kind: MetricType) -> Self {
        Self {
            state: Mutex::new(CellState {
                kind,
                raw: String::new(),
            }),
            ..Self::default()
        }
    }

    // Text is replaced whole, so a poisoned lock still guards consistent state.
    fn lock(&self) -> MutexGuard<'_, CellState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn kind(&self) -> MetricType {
        self.lock().kind
    }

    pub fn set_kind(&self, kind: MetricType) {
        self.lock().kind = kind;
    }

    /// Store the canonical text of `value`. Returns true if the text changed.
    pub fn set<T: ToCanonical>(&self, value: T) -> bool {
        self.replace(value.to_canonical())
    }

    /// Store raw text as-is. No validation beyond the change check.
    pub fn set_text(&self, text: impl Into<String>) -> bool {
        self.replace(text.into())
    }

    /// `None` clears the text.
    pub fn set_optional_text(&self, text: Option<&str>) -> bool {
        self.replace(text.unwrap_or_default().to_string())
    }

    fn replace(&self, text: String) -> bool {
        let changed = {
            let mut state = self.lock();
            let changed = state.raw != text;
            if changed {
                state.raw = text;
            }
            changed
        };
        self.valid.store(true, Ordering::Relaxed);
        if changed {
            self.updated.store(true, Ordering::Relaxed);
        }
        changed
    }

    /// Typed read. On parse failure returns `T::default()` and clears `valid`;
    /// the stored text is left untouched.
    pub fn get<T: FromCanonical + Default>(&self) -> T {
        self.try_get().unwrap_or_default()
    }

    /// Typed read that reports the failure. Clears `valid` like [`ValueCell::get`].
    pub fn try_get<T: FromCanonical>(&self) -> Option<T> {
        let parsed = {
            let state = self.lock();
            let parsed = T::from_canonical(&state.raw);
            if parsed.is_none() {
                trace!(raw = %state.raw, kind = %state.kind, "value does not parse");
            }
            parsed
        };
        if parsed.is_none() {
            self.valid.store(false, Ordering::Relaxed);
        }
        parsed
    }

    /// Decode by the cell's own type tag.
    pub fn get_scalar(&self) -> Option<ScalarValue> {
        let parsed = {
            let state = self.lock();
            ScalarValue::decode(state.kind, &state.raw)
        };
        if parsed.is_none() {
            self.valid.store(false, Ordering::Relaxed);
        }
        parsed
    }

    /// Stored text verbatim. Cannot fail.
    pub fn text(&self) -> String {
        self.lock().raw.clone()
    }

    pub fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Relaxed)
    }

    pub fn set_valid(&self, valid: bool) {
        self.valid.store(valid, Ordering::Relaxed);
    }

    pub fn is_updated(&self) -> bool {
        self.updated.load(Ordering::Relaxed)
    }

    pub fn set_updated(&self) {
        self.updated.store(true, Ordering::Relaxed);
    }

    pub fn reset_updated(&self) {
        self.updated.store(false, Ordering::Relaxed);
    }
}

impl Clone for ValueCell {
    fn clone(&self) -> Self {
        Self {
            state: Mutex::new(self.lock().clone()),
            valid: AtomicBool::new(self.is_valid()),
            updated: AtomicBool::new(self.is_updated()),
        }
    }
}
