use crate::Result;
use anyhow::Context;
use rust_decimal::Decimal;
use time::{Date, PrimitiveDateTime, Time, macros::format_description};

/// Parsing of the textual form databases use for values, for drivers that receive cells as
/// text.
pub trait Parse {
    fn parse(value: impl AsRef<str>) -> Result<Self>
    where
        Self: Sized;
}

impl Parse for Decimal {
    fn parse(value: impl AsRef<str>) -> Result<Self> {
        let value = value.as_ref();
        value
            .parse::<Decimal>()
            .with_context(|| format!("Cannot parse '{}' as rust_decimal::Decimal", value))
    }
}

impl Parse for Date {
    fn parse(value: impl AsRef<str>) -> Result<Self> {
        time::Date::parse(value.as_ref(), format_description!("[year]-[month]-[day]"))
            .with_context(|| format!("Cannot parse '{}' as time::Date", value.as_ref()))
    }
}

impl Parse for Time {
    fn parse(value: impl AsRef<str>) -> Result<Self> {
        let value = value.as_ref();
        time::Time::parse(
            value,
            format_description!("[hour]:[minute]:[second].[subsecond]"),
        )
        .or(time::Time::parse(
            value,
            format_description!("[hour]:[minute]:[second]"),
        ))
        .with_context(|| format!("Cannot parse '{}' as time::Time", value))
    }
}

impl Parse for PrimitiveDateTime {
    fn parse(value: impl AsRef<str>) -> Result<Self> {
        let value = value.as_ref();
        time::PrimitiveDateTime::parse(
            value,
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
        )
        .or(time::PrimitiveDateTime::parse(
            value,
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        ))
        .or(time::PrimitiveDateTime::parse(
            value,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        ))
        .or(time::PrimitiveDateTime::parse(
            value,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        ))
        .with_context(|| format!("Cannot parse '{}' as time::PrimitiveDateTime", value))
    }
}
