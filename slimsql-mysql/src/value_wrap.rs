use mysql_async::{
    Column,
    consts::{ColumnFlags, ColumnType},
};
use rust_decimal::Decimal;
use slimsql_core::{Error, Parse, Result, Value};
use time::{Date, Month, PrimitiveDateTime, Time};

/// MySQL collation id of binary strings.
const BINARY_CHARACTER_SET: u16 = 63;

pub(crate) struct ValueWrap(pub(crate) Value);

impl From<Value> for ValueWrap {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<ValueWrap> for mysql_async::Value {
    fn from(value: ValueWrap) -> Self {
        type SlimValue = Value;
        type MySQLValue = mysql_async::Value;
        match value.0 {
            _ if value.0.is_null() => MySQLValue::NULL,
            SlimValue::Boolean(Some(v)) => MySQLValue::from(v),
            SlimValue::Int8(Some(v)) => MySQLValue::from(v),
            SlimValue::Int16(Some(v)) => MySQLValue::from(v),
            SlimValue::Int32(Some(v)) => MySQLValue::from(v),
            SlimValue::Int64(Some(v)) => MySQLValue::from(v),
            SlimValue::UInt8(Some(v)) => MySQLValue::from(v),
            SlimValue::UInt16(Some(v)) => MySQLValue::from(v),
            SlimValue::UInt32(Some(v)) => MySQLValue::from(v),
            SlimValue::UInt64(Some(v)) => MySQLValue::from(v),
            SlimValue::Float32(Some(v)) => MySQLValue::from(v),
            SlimValue::Float64(Some(v)) => MySQLValue::from(v),
            SlimValue::Decimal(Some(v)) => MySQLValue::from(v),
            SlimValue::Varchar(Some(v)) => MySQLValue::from(v),
            SlimValue::Blob(Some(v)) => MySQLValue::Bytes(v.into_vec()),
            SlimValue::Date(Some(v)) => MySQLValue::from(v),
            SlimValue::Time(Some(v)) => MySQLValue::from(v),
            SlimValue::Timestamp(Some(v)) => MySQLValue::from(v),
            SlimValue::Uuid(Some(v)) => MySQLValue::from(v.hyphenated().to_string()),
            _ => MySQLValue::NULL,
        }
    }
}

/// Convert a cell to a [`Value`] using the type of its column.
///
/// The binary protocol sends typed values, the text protocol sends everything as bytes which
/// are parsed here. Text that cannot be parsed is kept as a string.
pub(crate) fn decode_value(value: mysql_async::Value, column: &Column) -> Value {
    type MySQLValue = mysql_async::Value;
    let column_type = column.column_type();
    match value {
        MySQLValue::NULL => Value::Null,
        MySQLValue::Int(v) => Value::Int64(Some(v)),
        MySQLValue::UInt(v) => Value::UInt64(Some(v)),
        MySQLValue::Float(v) => Value::Float32(Some(v)),
        MySQLValue::Double(v) => Value::Float64(Some(v)),
        MySQLValue::Date(year, month, day, hour, minute, second, microsecond) => {
            let date = Month::try_from(month)
                .map_err(Error::new)
                .and_then(|month| {
                    Date::from_calendar_date(year as _, month, day).map_err(Error::new)
                });
            let result = if column_type == ColumnType::MYSQL_TYPE_DATE {
                date.map(|v| Value::Date(Some(v)))
            } else {
                date.and_then(|date| {
                    Time::from_hms_micro(hour, minute, second, microsecond)
                        .map(|time| Value::Timestamp(Some(PrimitiveDateTime::new(date, time))))
                        .map_err(Error::new)
                })
            };
            result.unwrap_or_else(|e| {
                // Zero dates like 0000-00-00 have no representation
                log::warn!("{:#}", e.context("Cannot represent the MySQL date, using NULL"));
                Value::Null
            })
        }
        MySQLValue::Time(negative, days, hours, minutes, seconds, microseconds) => {
            match Time::from_hms_micro(hours, minutes, seconds, microseconds) {
                Ok(time) if !negative && days == 0 => Value::Time(Some(time)),
                _ => {
                    let hours = days as u64 * 24 + hours as u64;
                    let mut text = format!(
                        "{}{:02}:{:02}:{:02}",
                        if negative { "-" } else { "" },
                        hours,
                        minutes,
                        seconds
                    );
                    if microseconds != 0 {
                        text.push_str(&format!(".{:06}", microseconds));
                    }
                    Value::Varchar(Some(text))
                }
            }
        }
        MySQLValue::Bytes(bytes) => decode_text(bytes, column),
    }
}

fn decode_text(bytes: Vec<u8>, column: &Column) -> Value {
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => return Value::Blob(Some(e.into_bytes().into_boxed_slice())),
    };
    let unsigned = column.flags().contains(ColumnFlags::UNSIGNED_FLAG);
    let result: Result<Value> = match column.column_type() {
        ColumnType::MYSQL_TYPE_TINY
        | ColumnType::MYSQL_TYPE_SHORT
        | ColumnType::MYSQL_TYPE_INT24
        | ColumnType::MYSQL_TYPE_LONG
        | ColumnType::MYSQL_TYPE_LONGLONG
        | ColumnType::MYSQL_TYPE_YEAR => {
            if unsigned {
                text.parse().map(|v| Value::UInt64(Some(v))).map_err(Error::new)
            } else {
                text.parse().map(|v| Value::Int64(Some(v))).map_err(Error::new)
            }
        }
        ColumnType::MYSQL_TYPE_FLOAT => text
            .parse()
            .map(|v| Value::Float32(Some(v)))
            .map_err(Error::new),
        ColumnType::MYSQL_TYPE_DOUBLE => text
            .parse()
            .map(|v| Value::Float64(Some(v)))
            .map_err(Error::new),
        ColumnType::MYSQL_TYPE_DECIMAL | ColumnType::MYSQL_TYPE_NEWDECIMAL => {
            <Decimal as Parse>::parse(&text).map(|v| Value::Decimal(Some(v)))
        }
        ColumnType::MYSQL_TYPE_DATE | ColumnType::MYSQL_TYPE_NEWDATE => {
            <Date as Parse>::parse(&text).map(|v| Value::Date(Some(v)))
        }
        ColumnType::MYSQL_TYPE_DATETIME
        | ColumnType::MYSQL_TYPE_DATETIME2
        | ColumnType::MYSQL_TYPE_TIMESTAMP
        | ColumnType::MYSQL_TYPE_TIMESTAMP2 => {
            <PrimitiveDateTime as Parse>::parse(&text).map(|v| Value::Timestamp(Some(v)))
        }
        ColumnType::MYSQL_TYPE_TIME | ColumnType::MYSQL_TYPE_TIME2 => {
            <Time as Parse>::parse(&text).map(|v| Value::Time(Some(v)))
        }
        _ if column.character_set() == BINARY_CHARACTER_SET => {
            return Value::Blob(Some(text.into_bytes().into_boxed_slice()));
        }
        _ => return Value::Varchar(Some(text)),
    };
    result.unwrap_or_else(|e| {
        log::debug!("{:#}", e);
        Value::Varchar(Some(text))
    })
}
