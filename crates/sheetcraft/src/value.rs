//! Value normalization
//!
//! Anything a caller hands to [`RowBuilder::cell`](crate::RowBuilder::cell)
//! becomes a [`CellInput`] through `From`, and [`normalize`] maps every input
//! to exactly one [`CellContent`] kind. Dates and times become serial numbers
//! in the 1900 date system and carry a date format hint so they display as
//! dates.

use std::fmt::Display;
use std::time::SystemTime;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use sheetcraft_core::{CellValue, NumberFormat};

/// `NaiveDate::num_days_from_ce` of 1899-12-30, serial day zero
const SERIAL_EPOCH_DAYS_FROM_CE: i32 = 693_594;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// A value accepted by the row builder
#[derive(Debug, Clone, PartialEq)]
pub enum CellInput {
    Blank,
    Boolean(bool),
    Number(f64),
    Date(NaiveDate),
    /// A timestamp; zoned inputs are stored as UTC
    DateTime(NaiveDateTime),
    Text(String),
}

impl CellInput {
    /// Text from any displayable value
    pub fn display<T: Display + ?Sized>(value: &T) -> Self {
        CellInput::Text(value.to_string())
    }
}

impl From<bool> for CellInput {
    fn from(value: bool) -> Self {
        CellInput::Boolean(value)
    }
}

macro_rules! number_input {
    ($($t:ty),*) => {
        $(
            impl From<$t> for CellInput {
                fn from(value: $t) -> Self {
                    CellInput::Number(value as f64)
                }
            }
        )*
    };
}

number_input!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl From<&str> for CellInput {
    fn from(value: &str) -> Self {
        CellInput::Text(value.to_string())
    }
}

impl From<String> for CellInput {
    fn from(value: String) -> Self {
        CellInput::Text(value)
    }
}

impl From<&String> for CellInput {
    fn from(value: &String) -> Self {
        CellInput::Text(value.clone())
    }
}

impl From<char> for CellInput {
    fn from(value: char) -> Self {
        CellInput::Text(value.to_string())
    }
}

impl From<NaiveDate> for CellInput {
    fn from(value: NaiveDate) -> Self {
        CellInput::Date(value)
    }
}

impl From<NaiveDateTime> for CellInput {
    fn from(value: NaiveDateTime) -> Self {
        CellInput::DateTime(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for CellInput {
    fn from(value: DateTime<Tz>) -> Self {
        CellInput::DateTime(value.naive_utc())
    }
}

impl From<SystemTime> for CellInput {
    fn from(value: SystemTime) -> Self {
        CellInput::DateTime(DateTime::<Utc>::from(value).naive_utc())
    }
}

impl<T: Into<CellInput>> From<Option<T>> for CellInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellInput::Blank, Into::into)
    }
}

/// Concrete content of a normalized cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Blank,
    Boolean(bool),
    Number(f64),
    Text(String),
    /// Serial date number (days since 1899-12-30, fraction = time of day)
    Temporal(f64),
}

impl CellContent {
    /// The engine value stored for this content
    pub fn into_value(self) -> CellValue {
        match self {
            CellContent::Blank => CellValue::Empty,
            CellContent::Boolean(b) => CellValue::Boolean(b),
            CellContent::Number(n) | CellContent::Temporal(n) => CellValue::Number(n),
            CellContent::Text(s) => CellValue::String(s),
        }
    }
}

/// Result of [`normalize`]: the content plus an optional display format
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub content: CellContent,
    pub format: Option<NumberFormat>,
}

/// Classify an input, hinting temporal values with the short date format
pub fn normalize(input: CellInput) -> Normalized {
    normalize_with(input, &NumberFormat::date_short())
}

/// Classify an input, hinting temporal values with `date_format`
pub fn normalize_with(input: CellInput, date_format: &NumberFormat) -> Normalized {
    let temporal = |serial| Normalized {
        content: CellContent::Temporal(serial),
        format: Some(date_format.clone()),
    };
    let plain = |content| Normalized {
        content,
        format: None,
    };

    match input {
        CellInput::Blank => plain(CellContent::Blank),
        CellInput::Boolean(b) => plain(CellContent::Boolean(b)),
        CellInput::Number(n) => plain(CellContent::Number(n)),
        CellInput::Text(s) => plain(CellContent::Text(s)),
        CellInput::Date(d) => temporal(date_serial(d)),
        CellInput::DateTime(dt) => temporal(datetime_serial(dt)),
    }
}

/// Serial number of a calendar date
pub fn date_serial(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce() - SERIAL_EPOCH_DAYS_FROM_CE)
}

/// Serial number of a timestamp, time of day as the fractional part
pub fn datetime_serial(datetime: NaiveDateTime) -> f64 {
    let time = datetime.time();
    let seconds = f64::from(time.num_seconds_from_midnight())
        + f64::from(time.nanosecond()) / 1_000_000_000.0;
    date_serial(datetime.date()) + seconds / SECONDS_PER_DAY
}
