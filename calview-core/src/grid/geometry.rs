//! Grid construction. Geometry is decided entirely by the calendar math
//! and the injected clock; events come later.

use chrono::{Datelike, Duration, NaiveDate, Timelike};

use crate::clock::Clock;
use crate::nav;

use super::{DayCell, DayGrid, HourCell, MonthGrid, WeekGrid};

/// Build a month grid padded on both sides to whole Sunday-first weeks.
///
/// The leading pad count equals the weekday offset of the 1st (0 for a
/// month starting on Sunday); trailing pads top the sequence up to a
/// multiple of seven. A month that starts on Sunday and ends on Saturday
/// has no padding at all.
pub fn month_grid<'a>(year: i32, month: i32, clock: &dyn Clock) -> MonthGrid<'a> {
    let (year, month) = nav::normalize_month(year, month);
    let today = clock.today();

    let (first, last) = nav::month_bounds(year, month);
    let mut cells = Vec::with_capacity(42);

    for _ in 0..first.weekday().num_days_from_sunday() {
        cells.push(DayCell::padding());
    }
    let mut date = first;
    while date <= last {
        cells.push(DayCell::day(date, date == today));
        date = nav::next_day(date);
    }
    while cells.len() % 7 != 0 {
        cells.push(DayCell::padding());
    }

    MonthGrid { year, month, cells }
}

/// Build an hourly grid for the week containing `date`.
///
/// Rows run from `start_hour` to `end_hour` inclusive; out-of-range hours
/// are clamped to 0..=23 and an end before the start collapses to a single
/// row. Columns are Sunday through Saturday.
pub fn week_grid<'a>(
    date: NaiveDate,
    start_hour: u32,
    end_hour: u32,
    clock: &dyn Clock,
) -> WeekGrid<'a> {
    let (start_hour, end_hour) = clamp_hours(start_hour, end_hour);
    let now = clock.now();
    let today = now.date();

    let (start, end) = nav::week_bounds(date);
    let days: [NaiveDate; 7] = std::array::from_fn(|i| start + Duration::days(i as i64));
    let today_column = days.iter().position(|day| *day == today);

    let mut cells = Vec::with_capacity(((end_hour - start_hour + 1) * 7) as usize);
    for hour in start_hour..=end_hour {
        for day in days {
            let current = day == today && hour == now.hour();
            cells.push(HourCell::new(day, hour, current));
        }
    }

    WeekGrid {
        start,
        end,
        days,
        start_hour,
        end_hour,
        // ISO weeks are anchored on their Thursday, column 4 of a
        // Sunday-first row.
        week_number: days[4].iso_week().week(),
        today: today_column,
        cells,
        all_day: std::array::from_fn(|_| Vec::new()),
        all_day_hidden: [0; 7],
    }
}

/// Build an hourly grid for a single date. Same hour-range rules as
/// [`week_grid`].
pub fn day_grid<'a>(date: NaiveDate, start_hour: u32, end_hour: u32, clock: &dyn Clock) -> DayGrid<'a> {
    let (start_hour, end_hour) = clamp_hours(start_hour, end_hour);
    let now = clock.now();
    let today = date == now.date();

    let cells = (start_hour..=end_hour)
        .map(|hour| HourCell::new(date, hour, today && hour == now.hour()))
        .collect();

    DayGrid {
        date,
        today,
        start_hour,
        end_hour,
        cells,
        all_day: Vec::new(),
        all_day_hidden: 0,
    }
}

fn clamp_hours(start: u32, end: u32) -> (u32, u32) {
    let start = start.min(23);
    (start, end.min(23).max(start))
}
