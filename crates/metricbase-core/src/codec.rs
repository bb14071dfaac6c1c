//! Canonical text codec for metric values.
//!
//! Every value is reduced to one canonical string before it is stored:
//! - booleans are `"1"` / `"0"`
//! - floats use the shortest text that parses back to the same bits
//! - integers use plain decimal
//! - bytes are lowercase hex, UUIDs the hyphenated lowercase form
//!
//! Decoding is fail-soft: it returns `None` instead of an error and the caller
//! decides how to report staleness.

use bytes::Bytes;
use uuid::Uuid;

use crate::kind::MetricType;

/// Converts a value into its canonical stored text.
pub trait ToCanonical {
    /// Natural type tag for this value.
    fn natural_kind(&self) -> MetricType;
    fn to_canonical(&self) -> String;
}

/// Parses a value back from its canonical text.
pub trait FromCanonical: Sized {
    fn from_canonical(text: &str) -> Option<Self>;
}

/// Float to text without losing precision.
pub fn float_to_string(value: f32) -> String {
    normalize_separator(value.to_string())
}

/// Double to text without losing precision.
pub fn double_to_string(value: f64) -> String {
    normalize_separator(value.to_string())
}

fn normalize_separator(text: String) -> String {
    if text.contains(',') {
        text.replace(',', ".")
    } else {
        text
    }
}

/// True iff the first character is one of `Y y T t 1`. Never fails.
pub fn parse_bool(text: &str) -> bool {
    matches!(text.chars().next(), Some('Y' | 'y' | 'T' | 't' | '1'))
}

impl ToCanonical for bool {
    fn natural_kind(&self) -> MetricType {
        MetricType::Boolean
    }
    fn to_canonical(&self) -> String {
        let text = if *self { "1" } else { "0" };
        text.to_string()
    }
}

impl FromCanonical for bool {
    fn from_canonical(text: &str) -> Option<Self> {
        Some(parse_bool(text))
    }
}

impl ToCanonical for f32 {
    fn natural_kind(&self) -> MetricType {
        MetricType::Float
    }
    fn to_canonical(&self) -> String {
        float_to_string(*self)
    }
}

impl FromCanonical for f32 {
    fn from_canonical(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }
}

impl ToCanonical for f64 {
    fn natural_kind(&self) -> MetricType {
        MetricType::Double
    }
    fn to_canonical(&self) -> String {
        double_to_string(*self)
    }
}

impl FromCanonical for f64 {
    fn from_canonical(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }
}

macro_rules! integer_codec {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl ToCanonical for $ty {
                fn natural_kind(&self) -> MetricType {
                    MetricType::$kind
                }
                fn to_canonical(&self) -> String {
                    self.to_string()
                }
            }

            impl FromCanonical for $ty {
                fn from_canonical(text: &str) -> Option<Self> {
                    text.trim().parse().ok()
                }
            }
        )*
    };
}

integer_codec! {
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
}

// 8-bit reads go through a wide intermediate and truncate.
impl ToCanonical for i8 {
    fn natural_kind(&self) -> MetricType {
        MetricType::Int8
    }
    fn to_canonical(&self) -> String {
        self.to_string()
    }
}

impl FromCanonical for i8 {
    fn from_canonical(text: &str) -> Option<Self> {
        text.trim().parse::<i64>().ok().map(|wide| wide as i8)
    }
}

impl ToCanonical for u8 {
    fn natural_kind(&self) -> MetricType {
        MetricType::UInt8
    }
    fn to_canonical(&self) -> String {
        self.to_string()
    }
}

impl FromCanonical for u8 {
    fn from_canonical(text: &str) -> Option<Self> {
        text.trim().parse::<i64>().ok().map(|wide| wide as u8)
    }
}

impl ToCanonical for String {
    fn natural_kind(&self) -> MetricType {
        MetricType::String
    }
    fn to_canonical(&self) -> String {
        self.clone()
    }
}

impl FromCanonical for String {
    fn from_canonical(text: &str) -> Option<Self> {
        Some(text.to_string())
    }
}

impl ToCanonical for &str {
    fn natural_kind(&self) -> MetricType {
        MetricType::String
    }
    fn to_canonical(&self) -> String {
        (*self).to_string()
    }
}

/// A missing text value is stored as the empty string.
impl<T: ToCanonical> ToCanonical for Option<T> {
    fn natural_kind(&self) -> MetricType {
        self.as_ref()
            .map(ToCanonical::natural_kind)
            .unwrap_or(MetricType::String)
    }
    fn to_canonical(&self) -> String {
        self.as_ref().map(ToCanonical::to_canonical).unwrap_or_default()
    }
}

impl ToCanonical for Uuid {
    fn natural_kind(&self) -> MetricType {
        MetricType::Uuid
    }
    fn to_canonical(&self) -> String {
        self.hyphenated().to_string()
    }
}

impl FromCanonical for Uuid {
    fn from_canonical(text: &str) -> Option<Self> {
        Uuid::parse_str(text.trim()).ok()
    }
}

impl ToCanonical for Bytes {
    fn natural_kind(&self) -> MetricType {
        MetricType::Bytes
    }
    fn to_canonical(&self) -> String {
        hex::encode(self)
    }
}

impl FromCanonical for Bytes {
    fn from_canonical(text: &str) -> Option<Self> {
        hex::decode(text.trim()).ok().map(Bytes::from)
    }
}

/// Any storable scalar, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f32),
    Double(f64),
    Text(String),
    /// Milliseconds since 1970.
    DateTime(u64),
    Uuid(Uuid),
    Bytes(Bytes),
}

impl ScalarValue {
    pub fn kind(&self) -> MetricType {
        match self {
            ScalarValue::Bool(_) => MetricType::Boolean,
            ScalarValue::Int(_) => MetricType::Int64,
            ScalarValue::UInt(_) => MetricType::UInt64,
            ScalarValue::Float(_) => MetricType::Float,
            ScalarValue::Double(_) => MetricType::Double,
            ScalarValue::Text(_) => MetricType::String,
            ScalarValue::DateTime(_) => MetricType::DateTime,
            ScalarValue::Uuid(_) => MetricType::Uuid,
            ScalarValue::Bytes(_) => MetricType::Bytes,
        }
    }

    /// Decode `text` as a value of `kind`.
    ///
    /// Returns `None` when the text does not parse, and for kinds that are
    /// never stored as a payload (`Unknown`, arrays, aggregates).
    pub fn decode(kind: MetricType, text: &str) -> Option<ScalarValue> {
        let value = match kind {
            MetricType::Int8 => ScalarValue::Int(i64::from(i8::from_canonical(text)?)),
            MetricType::Int16 => ScalarValue::Int(i64::from(i16::from_canonical(text)?)),
            MetricType::Int32 => ScalarValue::Int(i64::from(i32::from_canonical(text)?)),
            MetricType::Int64 => ScalarValue::Int(i64::from_canonical(text)?),
            MetricType::UInt8 => ScalarValue::UInt(u64::from(u8::from_canonical(text)?)),
            MetricType::UInt16 => ScalarValue::UInt(u64::from(u16::from_canonical(text)?)),
            MetricType::UInt32 => ScalarValue::UInt(u64::from(u32::from_canonical(text)?)),
            MetricType::UInt64 => ScalarValue::UInt(u64::from_canonical(text)?),
            MetricType::Float => ScalarValue::Float(f32::from_canonical(text)?),
            MetricType::Double => ScalarValue::Double(f64::from_canonical(text)?),
            MetricType::Boolean => ScalarValue::Bool(parse_bool(text)),
            MetricType::String | MetricType::Text => ScalarValue::Text(text.to_string()),
            MetricType::DateTime => ScalarValue::DateTime(u64::from_canonical(text)?),
            MetricType::Uuid => ScalarValue::Uuid(Uuid::from_canonical(text)?),
            MetricType::Bytes => ScalarValue::Bytes(Bytes::from_canonical(text)?),
            _ => return None,
        };
        Some(value)
    }
}

impl ToCanonical for ScalarValue {
    fn natural_kind(&self) -> MetricType {
        self.kind()
    }

    fn to_canonical(&self) -> String {
        match self {
            ScalarValue::Bool(v) => v.to_canonical(),
            ScalarValue::Int(v) => v.to_canonical(),
            ScalarValue::UInt(v) | ScalarValue::DateTime(v) => v.to_canonical(),
            ScalarValue::Float(v) => v.to_canonical(),
            ScalarValue::Double(v) => v.to_canonical(),
            ScalarValue::Text(v) => v.clone(),
            ScalarValue::Uuid(v) => v.to_canonical(),
            ScalarValue::Bytes(v) => v.to_canonical(),
        }
    }
}
