use crate::{Error, Result, Value};
use rust_decimal::{Decimal, prelude::FromPrimitive, prelude::ToPrimitive};
use std::{any, borrow::Cow};
use time::{Date, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Conversion between native Rust types and the dynamically typed [`Value`].
///
/// It is used in both directions: `as_value` to bind parameters, `try_from_value` to read a
/// returned cell back. Integers convert across widths when the value fits, failing otherwise.
///
/// ```rust
/// use slimsql_core::{AsValue, Value};
/// let v = 42i32.as_value();
/// assert_eq!(v, Value::Int32(Some(42)));
/// let n: i64 = AsValue::try_from_value(v).unwrap();
/// assert_eq!(n, 42);
/// ```
pub trait AsValue {
    /// The NULL of this type, used when an `Option` is `None`.
    fn as_empty_value() -> Value;
    fn as_value(self) -> Value;
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

fn cannot_convert<T>(value: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert `{:?}` to {}",
        value,
        any::type_name::<T>()
    ))
}

impl AsValue for Value {
    fn as_empty_value() -> Value {
        Value::Null
    }
    fn as_value(self) -> Value {
        self
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

macro_rules! impl_as_value_integer {
    ($source:ty, $variant:path) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $variant(None)
            }
            fn as_value(self) -> Value {
                $variant(Some(self))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                let converted = match &value {
                    Value::Int8(Some(v)) => <$source>::try_from(*v).ok(),
                    Value::Int16(Some(v)) => <$source>::try_from(*v).ok(),
                    Value::Int32(Some(v)) => <$source>::try_from(*v).ok(),
                    Value::Int64(Some(v)) => <$source>::try_from(*v).ok(),
                    Value::UInt8(Some(v)) => <$source>::try_from(*v).ok(),
                    Value::UInt16(Some(v)) => <$source>::try_from(*v).ok(),
                    Value::UInt32(Some(v)) => <$source>::try_from(*v).ok(),
                    Value::UInt64(Some(v)) => <$source>::try_from(*v).ok(),
                    Value::Boolean(Some(v)) => Some(*v as $source),
                    Value::Decimal(Some(v)) if v.fract().is_zero() => {
                        v.to_i128().and_then(|v| <$source>::try_from(v).ok())
                    }
                    _ => None,
                };
                converted.ok_or_else(|| cannot_convert::<Self>(&value))
            }
        }
    };
}

impl_as_value_integer!(i8, Value::Int8);
impl_as_value_integer!(i16, Value::Int16);
impl_as_value_integer!(i32, Value::Int32);
impl_as_value_integer!(i64, Value::Int64);
impl_as_value_integer!(u8, Value::UInt8);
impl_as_value_integer!(u16, Value::UInt16);
impl_as_value_integer!(u32, Value::UInt32);
impl_as_value_integer!(u64, Value::UInt64);

impl AsValue for bool {
    fn as_empty_value() -> Value {
        Value::Boolean(None)
    }
    fn as_value(self) -> Value {
        Value::Boolean(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Boolean(Some(v)) => Ok(v),
            // MySQL BOOLEAN is a TINYINT(1)
            Value::Int8(Some(v)) => Ok(v != 0),
            Value::Int16(Some(v)) => Ok(v != 0),
            Value::Int32(Some(v)) => Ok(v != 0),
            Value::Int64(Some(v)) => Ok(v != 0),
            Value::UInt8(Some(v)) => Ok(v != 0),
            Value::UInt16(Some(v)) => Ok(v != 0),
            Value::UInt32(Some(v)) => Ok(v != 0),
            Value::UInt64(Some(v)) => Ok(v != 0),
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
}

impl AsValue for f32 {
    fn as_empty_value() -> Value {
        Value::Float32(None)
    }
    fn as_value(self) -> Value {
        Value::Float32(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float32(Some(v)) => Ok(v),
            Value::Float64(Some(v)) => Ok(v as f32),
            Value::Decimal(Some(v)) => v.to_f32().ok_or_else(|| cannot_convert::<Self>(&value)),
            _ => f64::try_from_value(value).map(|v| v as f32),
        }
    }
}

impl AsValue for f64 {
    fn as_empty_value() -> Value {
        Value::Float64(None)
    }
    fn as_value(self) -> Value {
        Value::Float64(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float64(Some(v)) => Ok(v),
            Value::Float32(Some(v)) => Ok(v as f64),
            Value::Decimal(Some(v)) => v.to_f64().ok_or_else(|| cannot_convert::<Self>(&value)),
            Value::Int8(Some(v)) => Ok(v as f64),
            Value::Int16(Some(v)) => Ok(v as f64),
            Value::Int32(Some(v)) => Ok(v as f64),
            Value::Int64(Some(v)) => Ok(v as f64),
            Value::UInt8(Some(v)) => Ok(v as f64),
            Value::UInt16(Some(v)) => Ok(v as f64),
            Value::UInt32(Some(v)) => Ok(v as f64),
            Value::UInt64(Some(v)) => Ok(v as f64),
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
}

impl AsValue for Decimal {
    fn as_empty_value() -> Value {
        Value::Decimal(None)
    }
    fn as_value(self) -> Value {
        Value::Decimal(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        let converted = match &value {
            Value::Decimal(Some(v)) => Some(*v),
            Value::Float32(Some(v)) => Decimal::from_f32(*v),
            Value::Float64(Some(v)) => Decimal::from_f64(*v),
            Value::Varchar(Some(v)) => v.parse().ok(),
            _ => i64::try_from_value(value.clone())
                .ok()
                .map(Decimal::from)
                .or_else(|| u64::try_from_value(value.clone()).ok().map(Decimal::from)),
        };
        converted.ok_or_else(|| cannot_convert::<Self>(&value))
    }
}

impl AsValue for String {
    fn as_empty_value() -> Value {
        Value::Varchar(None)
    }
    fn as_value(self) -> Value {
        Value::Varchar(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Varchar(Some(v)) => Ok(v),
            Value::Blob(Some(v)) => String::from_utf8(v.into_vec())
                .map_err(|e| Error::new(e).context("Blob is not a valid UTF-8 string")),
            Value::Uuid(Some(v)) => Ok(v.hyphenated().to_string()),
            Value::Decimal(Some(v)) => Ok(v.to_string()),
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
}

impl AsValue for &str {
    fn as_empty_value() -> Value {
        Value::Varchar(None)
    }
    fn as_value(self) -> Value {
        Value::Varchar(Some(self.to_owned()))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Err(cannot_convert::<Self>(&value))
    }
}

impl AsValue for Cow<'_, str> {
    fn as_empty_value() -> Value {
        Value::Varchar(None)
    }
    fn as_value(self) -> Value {
        Value::Varchar(Some(self.into_owned()))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        String::try_from_value(value).map(Cow::Owned)
    }
}

impl AsValue for Vec<u8> {
    fn as_empty_value() -> Value {
        Value::Blob(None)
    }
    fn as_value(self) -> Value {
        Value::Blob(Some(self.into_boxed_slice()))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Blob(Some(v)) => Ok(v.into_vec()),
            Value::Varchar(Some(v)) => Ok(v.into_bytes()),
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
}

impl AsValue for Date {
    fn as_empty_value() -> Value {
        Value::Date(None)
    }
    fn as_value(self) -> Value {
        Value::Date(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Date(Some(v)) => Ok(v),
            Value::Timestamp(Some(v)) => Ok(v.date()),
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
}

impl AsValue for Time {
    fn as_empty_value() -> Value {
        Value::Time(None)
    }
    fn as_value(self) -> Value {
        Value::Time(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Time(Some(v)) => Ok(v),
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
}

impl AsValue for PrimitiveDateTime {
    fn as_empty_value() -> Value {
        Value::Timestamp(None)
    }
    fn as_value(self) -> Value {
        Value::Timestamp(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Timestamp(Some(v)) => Ok(v),
            Value::Date(Some(v)) => Ok(v.midnight()),
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
}

impl AsValue for Uuid {
    fn as_empty_value() -> Value {
        Value::Uuid(None)
    }
    fn as_value(self) -> Value {
        Value::Uuid(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match &value {
            Value::Uuid(Some(v)) => Ok(*v),
            Value::Varchar(Some(v)) => {
                Uuid::parse_str(v).map_err(|_| cannot_convert::<Self>(&value))
            }
            Value::Blob(Some(v)) => {
                Uuid::from_slice(v).map_err(|_| cannot_convert::<Self>(&value))
            }
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            return Ok(None);
        }
        T::try_from_value(value).map(Some)
    }
}
