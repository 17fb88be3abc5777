// ⏰ Temporal helpers - date parsing, defaulting and calendar arithmetic
//
// Calendar differences follow relativedelta semantics: step whole months
// from the earlier date and clamp to the end of shorter months, so
// 2020-01-31 + 1 month = 2020-02-29.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::error::{LeaderError, Result};

/// Text format of every date column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// DATE VALUE (raw or normalized)
// ============================================================================

/// A date cell before or after normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateValue {
    /// Text as read from the CSV, expected `YYYY-MM-DD`
    Text(String),
    /// Structured date
    Date(NaiveDate),
}

impl DateValue {
    /// Parse text into a date; a structured date passes through unchanged.
    ///
    /// Idempotent: `v.normalize(c)?.normalize(c)? == v.normalize(c)?`.
    pub fn normalize(&self, column: &'static str) -> Result<DateValue> {
        match self {
            DateValue::Text(text) => parse_date(text, column).map(DateValue::Date),
            DateValue::Date(date) => Ok(DateValue::Date(*date)),
        }
    }

    /// Normalize and unwrap to the structured date
    pub fn to_date(&self, column: &'static str) -> Result<NaiveDate> {
        match self {
            DateValue::Text(text) => parse_date(text, column),
            DateValue::Date(date) => Ok(*date),
        }
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        DateValue::Date(date)
    }
}

impl From<&str> for DateValue {
    fn from(text: &str) -> Self {
        DateValue::Text(text.to_string())
    }
}

/// Parse a `YYYY-MM-DD` string. The row number is filled in by the caller.
pub fn parse_date(text: &str, column: &'static str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|_| LeaderError::Parse {
        row: 0,
        column,
        value: text.to_string(),
    })
}

// ============================================================================
// RESOLVED DATE (effective value + provenance)
// ============================================================================

/// Where an effective date came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    /// Present in the source data
    Recorded,
    /// Missing in the source, replaced by the load date
    DefaultedToNow,
}

/// Effective date that remembers whether it was defaulted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedDate {
    pub date: NaiveDate,
    pub source: DateSource,
}

impl ResolvedDate {
    pub fn recorded(date: NaiveDate) -> Self {
        ResolvedDate {
            date,
            source: DateSource::Recorded,
        }
    }

    pub fn defaulted(now: NaiveDate) -> Self {
        ResolvedDate {
            date: now,
            source: DateSource::DefaultedToNow,
        }
    }

    /// True when the event is ongoing (no date in the source)
    pub fn is_defaulted(&self) -> bool {
        self.source == DateSource::DefaultedToNow
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

// ============================================================================
// CALENDAR ARITHMETIC
// ============================================================================

fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    if months >= 0 {
        date.checked_add_months(Months::new(months as u32))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    }
}

/// Whole calendar months from `from` to `to` (negative if `to` is earlier).
pub fn whole_months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut months = (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32);

    if to >= from {
        while months > 0 && shift_months(from, months).map_or(true, |d| d > to) {
            months -= 1;
        }
    } else {
        while months < 0 && shift_months(from, months).map_or(true, |d| d < to) {
            months += 1;
        }
    }

    months
}

/// Whole calendar years from `from` to `to`, ignoring partial years.
pub fn whole_years_between(from: NaiveDate, to: NaiveDate) -> i32 {
    whole_months_between(from, to) / 12
}

/// Whole months in office divided by 12, rounded to two decimals.
pub fn years_in_office(assumed: NaiveDate, left: NaiveDate) -> f64 {
    let years = whole_months_between(assumed, left) as f64 / 12.0;
    (years * 100.0).round() / 100.0
}
