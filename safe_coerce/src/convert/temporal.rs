//! Date, date-time and instant conversion.
//!
//! Accepted text forms are ISO-8601 dates and timestamps plus their
//! slash-delimited variants. Timestamps without an offset are read as UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::{ConversionError, ConversionErrorKind};
use crate::kind::TypeKind;
use crate::value::Value;

use super::failure;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

const NAIVE_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
];

const OFFSET_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y/%m/%d %H:%M:%S%.f%:z"];

pub(super) fn to_date(input: &Value) -> Result<NaiveDate, ConversionError> {
    let target = TypeKind::Date;
    match input {
        Value::Text(text) => parse_text(text)
            .map(|parsed| parsed.date())
            .map_err(|kind| failure(kind, &target, input)),
        Value::DateTime(stamp) => Ok(stamp.date_naive()),
        Value::Time(stamp) => Ok(stamp.date_naive()),
        _ => Err(failure(ConversionErrorKind::Unsupported, &target, input)),
    }
}

pub(super) fn to_date_time(input: &Value) -> Result<DateTime<FixedOffset>, ConversionError> {
    let target = TypeKind::DateTime;
    match input {
        Value::Text(text) => parse_text(text)
            .map(Parsed::into_fixed)
            .map_err(|kind| failure(kind, &target, input)),
        Value::Date(date) => Ok(Parsed::Naive(date.and_time(NaiveTime::MIN)).into_fixed()),
        Value::Time(stamp) => Ok(stamp.fixed_offset()),
        _ => Err(failure(ConversionErrorKind::Unsupported, &target, input)),
    }
}

pub(super) fn to_time(input: &Value) -> Result<DateTime<Utc>, ConversionError> {
    let target = TypeKind::Time;
    match input {
        Value::Text(text) => parse_text(text)
            .map(|parsed| parsed.into_fixed().with_timezone(&Utc))
            .map_err(|kind| failure(kind, &target, input)),
        Value::Date(date) => Ok(date.and_time(NaiveTime::MIN).and_utc()),
        Value::DateTime(stamp) => Ok(stamp.with_timezone(&Utc)),
        _ => Err(failure(ConversionErrorKind::Unsupported, &target, input)),
    }
}

/// Result of parsing a temporal literal, before it is narrowed to a kind.
enum Parsed {
    Naive(NaiveDateTime),
    Offset(DateTime<FixedOffset>),
}

impl Parsed {
    fn date(&self) -> NaiveDate {
        match self {
            Self::Naive(stamp) => stamp.date(),
            Self::Offset(stamp) => stamp.date_naive(),
        }
    }

    fn into_fixed(self) -> DateTime<FixedOffset> {
        match self {
            Self::Naive(stamp) => stamp.and_utc().fixed_offset(),
            Self::Offset(stamp) => stamp,
        }
    }
}

fn parse_text(raw: &str) -> Result<Parsed, ConversionErrorKind> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ConversionErrorKind::Empty);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(text) {
        return Ok(Parsed::Offset(stamp));
    }
    if let Some(stamp) = OFFSET_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(text, format).ok())
    {
        return Ok(Parsed::Offset(stamp));
    }
    if let Some(stamp) = NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        return Ok(Parsed::Naive(stamp));
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .map(|date| Parsed::Naive(date.and_time(NaiveTime::MIN)))
        .ok_or(ConversionErrorKind::Malformed)
}
