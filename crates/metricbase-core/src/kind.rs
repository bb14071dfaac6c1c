//! Metric data type tags.
//!
//! The numbering follows the Sparkplug B data type table so codes can be
//! exchanged with a transport layer unchanged. Array and aggregate kinds only
//! classify a metric; cells never store them as payloads.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Data type tag of a metric or property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum MetricType {
    Unknown = 0,
    Int8 = 1,
    Int16 = 2,
    Int32 = 3,
    Int64 = 4,
    UInt8 = 5,
    UInt16 = 6,
    UInt32 = 7,
    UInt64 = 8,
    Float = 9,
    Double = 10,
    Boolean = 11,
    #[default]
    String = 12,
    DateTime = 13,
    Text = 14,
    #[serde(rename = "UUID")]
    Uuid = 15,
    DataSet = 16,
    Bytes = 17,
    File = 18,
    Template = 19,
    PropertySet = 20,
    PropertySetList = 21,
    Int8Array = 22,
    Int16Array = 23,
    Int32Array = 24,
    Int64Array = 25,
    UInt8Array = 26,
    UInt16Array = 27,
    UInt32Array = 28,
    UInt64Array = 29,
    FloatArray = 30,
    DoubleArray = 31,
    BooleanArray = 32,
    StringArray = 33,
    DateTimeArray = 34,
}

impl MetricType {
    /// Every tag, indexed by its numeric code.
    pub const ALL: [MetricType; 35] = [
        MetricType::Unknown,
        MetricType::Int8,
        MetricType::Int16,
        MetricType::Int32,
        MetricType::Int64,
        MetricType::UInt8,
        MetricType::UInt16,
        MetricType::UInt32,
        MetricType::UInt64,
        MetricType::Float,
        MetricType::Double,
        MetricType::Boolean,
        MetricType::String,
        MetricType::DateTime,
        MetricType::Text,
        MetricType::Uuid,
        MetricType::DataSet,
        MetricType::Bytes,
        MetricType::File,
        MetricType::Template,
        MetricType::PropertySet,
        MetricType::PropertySetList,
        MetricType::Int8Array,
        MetricType::Int16Array,
        MetricType::Int32Array,
        MetricType::Int64Array,
        MetricType::UInt8Array,
        MetricType::UInt16Array,
        MetricType::UInt32Array,
        MetricType::UInt64Array,
        MetricType::FloatArray,
        MetricType::DoubleArray,
        MetricType::BooleanArray,
        MetricType::StringArray,
        MetricType::DateTimeArray,
    ];

    /// Display name. Stable; used by config files and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricType::Unknown => "Unknown",
            MetricType::Int8 => "Int8",
            MetricType::Int16 => "Int16",
            MetricType::Int32 => "Int32",
            MetricType::Int64 => "Int64",
            MetricType::UInt8 => "UInt8",
            MetricType::UInt16 => "UInt16",
            MetricType::UInt32 => "UInt32",
            MetricType::UInt64 => "UInt64",
            MetricType::Float => "Float",
            MetricType::Double => "Double",
            MetricType::Boolean => "Boolean",
            MetricType::String => "String",
            MetricType::DateTime => "DateTime",
            MetricType::Text => "Text",
            MetricType::Uuid => "UUID",
            MetricType::DataSet => "DataSet",
            MetricType::Bytes => "Bytes",
            MetricType::File => "File",
            MetricType::Template => "Template",
            MetricType::PropertySet => "PropertySet",
            MetricType::PropertySetList => "PropertySetList",
            MetricType::Int8Array => "Int8Array",
            MetricType::Int16Array => "Int16Array",
            MetricType::Int32Array => "Int32Array",
            MetricType::Int64Array => "Int64Array",
            MetricType::UInt8Array => "UInt8Array",
            MetricType::UInt16Array => "UInt16Array",
            MetricType::UInt32Array => "UInt32Array",
            MetricType::UInt64Array => "UInt64Array",
            MetricType::FloatArray => "FloatArray",
            MetricType::DoubleArray => "DoubleArray",
            MetricType::BooleanArray => "BooleanArray",
            MetricType::StringArray => "StringArray",
            MetricType::DateTimeArray => "DateTimeArray",
        }
    }

    /// Reverse of [`MetricType::as_str`]. Unknown names map to `Unknown`.
    pub fn from_name(name: &str) -> MetricType {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == name)
            .unwrap_or(MetricType::Unknown)
    }

    /// Numeric code.
    pub fn repr(self) -> u8 {
        self as u8
    }

    /// Type for a numeric code. Out of range codes map to `Unknown`.
    pub fn from_repr(code: u8) -> MetricType {
        Self::ALL
            .get(usize::from(code))
            .copied()
            .unwrap_or(MetricType::Unknown)
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            MetricType::Int8
                | MetricType::Int16
                | MetricType::Int32
                | MetricType::Int64
                | MetricType::UInt8
                | MetricType::UInt16
                | MetricType::UInt32
                | MetricType::UInt64
        )
    }

    pub fn is_floating(self) -> bool {
        matches!(self, MetricType::Float | MetricType::Double)
    }

    pub fn is_numeric(self) -> bool {
        self.is_integer() || self.is_floating()
    }

    /// Array and aggregate kinds (classification only).
    pub fn is_array(self) -> bool {
        self.repr() >= MetricType::Int8Array.repr()
    }

    pub fn is_aggregate(self) -> bool {
        matches!(
            self,
            MetricType::DataSet
                | MetricType::File
                | MetricType::Template
                | MetricType::PropertySet
                | MetricType::PropertySetList
        )
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
