use rust_decimal::Decimal;
use serde_json::{Map, Number, Value as JsonValue};
use std::fmt::Write;
use time::{Date, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Dynamically typed scalar, used both for bound parameters and for returned cells.
///
/// Every variant but `Null` carries an `Option`: `Int32(None)` is a NULL that still remembers
/// its type, `Null` is a NULL of unknown type.
#[derive(Default, Debug, Clone)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Int8(Option<i8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    UInt8(Option<u8>),
    UInt16(Option<u16>),
    UInt32(Option<u32>),
    UInt64(Option<u64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Decimal(Option<Decimal>),
    Varchar(Option<String>),
    Blob(Option<Box<[u8]>>),
    Date(Option<Date>),
    Time(Option<Time>),
    Timestamp(Option<PrimitiveDateTime>),
    Uuid(Option<Uuid>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Boolean(l), Self::Boolean(r)) => l == r,
            (Self::Int8(l), Self::Int8(r)) => l == r,
            (Self::Int16(l), Self::Int16(r)) => l == r,
            (Self::Int32(l), Self::Int32(r)) => l == r,
            (Self::Int64(l), Self::Int64(r)) => l == r,
            (Self::UInt8(l), Self::UInt8(r)) => l == r,
            (Self::UInt16(l), Self::UInt16(r)) => l == r,
            (Self::UInt32(l), Self::UInt32(r)) => l == r,
            (Self::UInt64(l), Self::UInt64(r)) => l == r,
            (Self::Float32(l), Self::Float32(r)) => l == r,
            (Self::Float64(l), Self::Float64(r)) => l == r,
            (Self::Decimal(l), Self::Decimal(r)) => l == r,
            (Self::Varchar(l), Self::Varchar(r)) => l == r,
            (Self::Blob(l), Self::Blob(r)) => l == r,
            (Self::Date(l), Self::Date(r)) => l == r,
            (Self::Time(l), Self::Time(r)) => l == r,
            (Self::Timestamp(l), Self::Timestamp(r)) => l == r,
            (Self::Uuid(l), Self::Uuid(r)) => l == r,
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Boolean(v) => v.is_none(),
            Value::Int8(v) => v.is_none(),
            Value::Int16(v) => v.is_none(),
            Value::Int32(v) => v.is_none(),
            Value::Int64(v) => v.is_none(),
            Value::UInt8(v) => v.is_none(),
            Value::UInt16(v) => v.is_none(),
            Value::UInt32(v) => v.is_none(),
            Value::UInt64(v) => v.is_none(),
            Value::Float32(v) => v.is_none(),
            Value::Float64(v) => v.is_none(),
            Value::Decimal(v) => v.is_none(),
            Value::Varchar(v) => v.is_none(),
            Value::Blob(v) => v.is_none(),
            Value::Date(v) => v.is_none(),
            Value::Time(v) => v.is_none(),
            Value::Timestamp(v) => v.is_none(),
            Value::Uuid(v) => v.is_none(),
        }
    }

    pub fn same_type(&self, other: &Self) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
    }

    /// JSON rendition, the way row-returning drivers hand rows to callers: decimals and
    /// temporal values become strings, blobs become strings when they are valid UTF-8.
    pub fn to_json(&self) -> JsonValue {
        if self.is_null() {
            return JsonValue::Null;
        }
        match self {
            Value::Boolean(Some(v)) => JsonValue::Bool(*v),
            Value::Int8(Some(v)) => (*v).into(),
            Value::Int16(Some(v)) => (*v).into(),
            Value::Int32(Some(v)) => (*v).into(),
            Value::Int64(Some(v)) => (*v).into(),
            Value::UInt8(Some(v)) => (*v).into(),
            Value::UInt16(Some(v)) => (*v).into(),
            Value::UInt32(Some(v)) => (*v).into(),
            Value::UInt64(Some(v)) => (*v).into(),
            Value::Float32(Some(v)) => Number::from_f64(*v as f64)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::Float64(Some(v)) => Number::from_f64(*v)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::Decimal(Some(v)) => JsonValue::String(v.to_string()),
            Value::Varchar(Some(v)) => JsonValue::String(v.clone()),
            Value::Blob(Some(v)) => match std::str::from_utf8(v) {
                Ok(v) => JsonValue::String(v.to_owned()),
                Err(..) => JsonValue::Array(v.iter().map(|b| (*b).into()).collect()),
            },
            Value::Date(Some(v)) => JsonValue::String(format_date(v)),
            Value::Time(Some(v)) => JsonValue::String(format_time(v)),
            Value::Timestamp(Some(v)) => JsonValue::String(format!(
                "{} {}",
                format_date(&v.date()),
                format_time(&v.time())
            )),
            Value::Uuid(Some(v)) => JsonValue::String(v.hyphenated().to_string()),
            _ => JsonValue::Null,
        }
    }

    /// Inverse of [`Value::to_json`] for loosely typed driver responses. Nested arrays and
    /// objects are kept as their JSON text.
    pub fn from_json(value: &JsonValue) -> Value {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(v) => Value::Boolean(Some(*v)),
            JsonValue::Number(v) => {
                if let Some(v) = v.as_i64() {
                    Value::Int64(Some(v))
                } else if let Some(v) = v.as_u64() {
                    Value::UInt64(Some(v))
                } else {
                    Value::Float64(v.as_f64())
                }
            }
            JsonValue::String(v) => Value::Varchar(Some(v.clone())),
            JsonValue::Array(..) | JsonValue::Object(..) => {
                Value::Varchar(Some(value.to_string()))
            }
        }
    }
}

pub(crate) fn json_object<'a>(
    entries: impl IntoIterator<Item = (&'a String, &'a Value)>,
) -> Map<String, JsonValue> {
    entries
        .into_iter()
        .map(|(k, v)| (k.clone(), v.to_json()))
        .collect()
}

fn format_date(date: &Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

fn format_time(time: &Time) -> String {
    let mut out = format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    );
    if time.microsecond() != 0 {
        let _ = write!(out, ".{:06}", time.microsecond());
    }
    out
}
