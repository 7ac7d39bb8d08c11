//! Navigation math: moving between months, weeks, and days.
//!
//! Pure integer/date arithmetic over the reference date. Month values that
//! wander out of 1..=12 (e.g. from prev/next arithmetic on request input)
//! are wrapped, never rejected.

use chrono::{Datelike, Duration, NaiveDate};

/// Normalize a (year, month) pair where the month may be out of range,
/// wrapping whole years in either direction (month 0 becomes December of
/// the previous year, 13 becomes January of the next).
pub fn normalize_month(year: i32, month: i32) -> (i32, u32) {
    let total = year * 12 + (month - 1);
    (total.div_euclid(12), (total.rem_euclid(12) + 1) as u32)
}

pub fn prev_month(year: i32, month: u32) -> (i32, u32) {
    normalize_month(year, month as i32 - 1)
}

pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    normalize_month(year, month as i32 + 1)
}

pub fn prev_year(year: i32) -> i32 {
    year - 1
}

pub fn next_year(year: i32) -> i32 {
    year + 1
}

/// Number of days in a month, via the day before the first of the next
/// month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_y, next_m) = next_month(year, month);
    let first_of_next =
        NaiveDate::from_ymd_opt(next_y, next_m, 1).expect("normalized month has a first day");
    first_of_next
        .pred_opt()
        .expect("previous day exists")
        .day()
}

/// Clamp a desired day-of-month into the month's actual range.
pub fn clamp_day(year: i32, month: u32, day: u32) -> u32 {
    day.clamp(1, days_in_month(year, month))
}

/// First and last calendar day of a month.
pub fn month_bounds(year: i32, month: u32) -> (NaiveDate, NaiveDate) {
    let (year, month) = normalize_month(year, month as i32);
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("normalized month has a first day");
    let last = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))
        .expect("last day is within the month");
    (first, last)
}

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Sunday through Saturday bounds of the week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = week_start(date);
    (start, start + Duration::days(6))
}

pub fn prev_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(7)
}

pub fn next_week(date: NaiveDate) -> NaiveDate {
    date + Duration::days(7)
}

pub fn prev_day(date: NaiveDate) -> NaiveDate {
    date.pred_opt().expect("previous day exists")
}

pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().expect("next day exists")
}
