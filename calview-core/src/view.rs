//! View requests: everything a grid needs to know about what the user
//! asked to see, captured up front so the grid math stays pure.

use chrono::{Datelike, NaiveDate};

use crate::clock::Clock;
use crate::event::EventStatus;
use crate::nav;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Month,
    Week,
    Day,
}

/// Sort key for events within a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBy {
    #[default]
    Start,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

/// A fully-resolved request for one calendar view.
///
/// The date fields always hold a real calendar date: constructors wrap
/// out-of-range months and clamp the day to the month's length, so
/// downstream code never sees February 30th.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRequest {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub granularity: Granularity,
    pub status: Option<EventStatus>,
    pub search: Option<String>,
    pub order_by: OrderBy,
    pub order: Order,
}

impl ViewRequest {
    /// Request centered on the clock's current date.
    pub fn current(granularity: Granularity, clock: &dyn Clock) -> Self {
        let today = clock.today();
        Self {
            year: today.year(),
            month: today.month(),
            day: today.day(),
            granularity,
            status: None,
            search: None,
            order_by: OrderBy::default(),
            order: Order::default(),
        }
    }

    /// Request for an explicit date. The month may be out of 1..=12 and is
    /// wrapped; the day is clamped into the resulting month.
    pub fn with_date(granularity: Granularity, year: i32, month: i32, day: u32) -> Self {
        let (year, month) = nav::normalize_month(year, month);
        let day = nav::clamp_day(year, month, day);
        Self {
            year,
            month,
            day,
            granularity,
            status: None,
            search: None,
            order_by: OrderBy::default(),
            order: Order::default(),
        }
    }

    /// The same request re-centered on another date, keeping filters and
    /// ordering. Wraps and clamps like [`ViewRequest::with_date`].
    pub fn at(mut self, year: i32, month: i32, day: u32) -> Self {
        let (year, month) = nav::normalize_month(year, month);
        self.year = year;
        self.month = month;
        self.day = nav::clamp_day(year, month, day);
        self
    }

    pub fn reference_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .expect("request holds a valid calendar date")
    }

    /// The inclusive date range this view covers.
    pub fn range(&self) -> (NaiveDate, NaiveDate) {
        match self.granularity {
            Granularity::Month => nav::month_bounds(self.year, self.month),
            Granularity::Week => nav::week_bounds(self.reference_date()),
            Granularity::Day => {
                let date = self.reference_date();
                (date, date)
            }
        }
    }
}
