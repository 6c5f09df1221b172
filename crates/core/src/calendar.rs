//! Calendar helpers shared by the rule checks.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::error::CoreError;

/// Number of days in `month` of `year`.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, CoreError> {
    let first = first_of_month(year, month)?;
    let next = if month == 12 {
        first_of_month(year + 1, 1)?
    } else {
        first_of_month(year, month + 1)?
    };
    Ok(next.signed_duration_since(first).num_days() as u32)
}

pub fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, CoreError> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CoreError::MalformedInput(format!("invalid month {year}-{month:02}")))
}

pub fn in_month(date: NaiveDate, year: i32, month: u32) -> bool {
    date.year() == year && date.month() == month
}

/// The first day of the week containing `date`, for weeks starting on
/// `week_starts_on`.
pub fn week_start(date: NaiveDate, week_starts_on: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_monday() - week_starts_on.num_days_from_monday()) % 7;
    date - Duration::days(i64::from(offset))
}
