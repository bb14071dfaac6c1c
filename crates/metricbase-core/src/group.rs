//! Metric groups: classification records metrics are tagged with.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GroupKind {
    #[default]
    General,
    CanMessage,
    Device,
}

impl GroupKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GroupKind::General => "General",
            GroupKind::CanMessage => "CanMessage",
            GroupKind::Device => "Device",
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, numbered group. `(name, identity)` is its key inside a database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    name: String,
    description: String,
    kind: GroupKind,
    identity: i64,
}

impl Group {
    pub fn new(name: impl Into<String>, identity: i64) -> Self {
        Self {
            name: name.into(),
            identity,
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Metrics keep the name they were created with.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: GroupKind) {
        self.kind = kind;
    }

    pub fn identity(&self) -> i64 {
        self.identity
    }

    pub fn set_identity(&mut self, identity: i64) {
        self.identity = identity;
    }

    pub(crate) fn matches(&self, name: &str, identity: i64) -> bool {
        self.name == name && self.identity == identity
    }
}
