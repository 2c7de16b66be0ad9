//! Inclusive calendar-day date ranges.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A date range inclusive of both endpoints at day granularity.
///
/// `start` expands to 00:00:00.000 and `end` to 23:59:59.999 of the given
/// calendar days, so a one-day range covers the full day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        if end < start {
            return Err(DomainError::validation("end date is before start date"));
        }
        Ok(Self { start, end })
    }

    /// Single calendar day.
    pub fn day(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    /// Lower bound: start of the first day, UTC.
    pub fn begin(&self) -> DateTime<Utc> {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    /// Upper bound: last representable millisecond of the final day, UTC.
    pub fn finish(&self) -> DateTime<Utc> {
        let eod = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
            .unwrap_or(NaiveTime::MIN);
        self.end.and_time(eod).and_utc()
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.begin() && at <= self.finish()
    }

    /// Legacy `YYYY-MM` label derived from the start date.
    pub fn month_label(&self) -> String {
        self.start.format("%Y-%m").to_string()
    }
}
