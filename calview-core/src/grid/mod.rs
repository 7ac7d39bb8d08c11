//! Grid data model shared by the month, week, and day views.
//!
//! A grid owns its cells; cells borrow the events placed into them. Cell
//! layout is fixed at construction (see [`geometry`]), population happens
//! afterwards (see [`bucket`]) and may run repeatedly on the same grid.

pub mod bucket;
pub mod geometry;

use chrono::{Datelike, NaiveDate};

use crate::event::Event;
use crate::labels::CalendarLabels;

/// One day square in a month grid. Padding cells carry no date.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell<'a> {
    pub date: Option<NaiveDate>,
    pub today: bool,
    pub events: Vec<&'a Event>,
    pub hidden: usize,
}

impl<'a> DayCell<'a> {
    pub(crate) fn padding() -> Self {
        Self { date: None, today: false, events: Vec::new(), hidden: 0 }
    }

    pub(crate) fn day(date: NaiveDate, today: bool) -> Self {
        Self { date: Some(date), today, events: Vec::new(), hidden: 0 }
    }

    pub fn is_padding(&self) -> bool {
        self.date.is_none()
    }

    /// Semantic tags for this cell, in a stable order. Padding cells get
    /// the single tag `pad`; day cells get the lowercased weekday name,
    /// `today` when applicable, and `position-*`/`day-*`/`month-*`/`year-*`
    /// markers. Positions count from 0 at Sunday, matching the grid's
    /// week-start base.
    pub fn tags(&self, labels: &dyn CalendarLabels) -> Vec<String> {
        let Some(date) = self.date else {
            return vec!["pad".to_string()];
        };

        let position = date.weekday().num_days_from_sunday();
        let mut tags = vec![labels.weekday_name(position).to_lowercase()];
        if self.today {
            tags.push("today".to_string());
        }
        tags.push(format!("position-{position}"));
        tags.push(format!("day-{}", date.day()));
        tags.push(format!("month-{}", date.month()));
        tags.push(format!("year-{}", date.year()));
        tags
    }
}

/// One (hour, day) slot in an hourly grid.
#[derive(Debug, Clone, PartialEq)]
pub struct HourCell<'a> {
    pub date: NaiveDate,
    pub hour: u32,
    pub current: bool,
    pub events: Vec<&'a Event>,
    pub hidden: usize,
}

impl<'a> HourCell<'a> {
    pub(crate) fn new(date: NaiveDate, hour: u32, current: bool) -> Self {
        Self { date, hour, current, events: Vec::new(), hidden: 0 }
    }

    pub fn tags(&self, labels: &dyn CalendarLabels) -> Vec<String> {
        let position = self.date.weekday().num_days_from_sunday();
        let mut tags = vec![labels.weekday_name(position).to_lowercase()];
        if self.current {
            tags.push("current".to_string());
        }
        tags.push(format!("hour-{}", self.hour));
        tags.push(format!("day-{}", self.date.day()));
        tags.push(format!("month-{}", self.date.month()));
        tags.push(format!("year-{}", self.date.year()));
        tags
    }
}

/// A month of day cells, padded on both sides to whole weeks.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid<'a> {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<DayCell<'a>>,
}

impl<'a> MonthGrid<'a> {
    /// Rows of seven cells, Sunday first.
    pub fn weeks(&self) -> std::slice::Chunks<'_, DayCell<'a>> {
        self.cells.chunks(7)
    }

    pub fn cell_for(&self, date: NaiveDate) -> Option<&DayCell<'a>> {
        self.cells.iter().find(|cell| cell.date == Some(date))
    }

    pub(crate) fn cell_for_mut(&mut self, date: NaiveDate) -> Option<&mut DayCell<'a>> {
        self.cells.iter_mut().find(|cell| cell.date == Some(date))
    }
}

/// Seven days by N hours, hour-major: all of one hour's cells are adjacent.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekGrid<'a> {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: [NaiveDate; 7],
    pub start_hour: u32,
    pub end_hour: u32,
    pub week_number: u32,
    /// Column index of today within `days`, when the week contains it.
    pub today: Option<usize>,
    pub cells: Vec<HourCell<'a>>,
    pub all_day: [Vec<&'a Event>; 7],
    pub all_day_hidden: [usize; 7],
}

impl<'a> WeekGrid<'a> {
    /// Rows of seven cells, one row per hour.
    pub fn hours(&self) -> std::slice::Chunks<'_, HourCell<'a>> {
        self.cells.chunks(7)
    }

    pub fn cell(&self, hour: u32, weekday: usize) -> Option<&HourCell<'a>> {
        if hour < self.start_hour || hour > self.end_hour || weekday >= 7 {
            return None;
        }
        let row = (hour - self.start_hour) as usize;
        self.cells.get(row * 7 + weekday)
    }

    pub(crate) fn cell_mut(&mut self, hour: u32, weekday: usize) -> Option<&mut HourCell<'a>> {
        if hour < self.start_hour || hour > self.end_hour || weekday >= 7 {
            return None;
        }
        let row = (hour - self.start_hour) as usize;
        self.cells.get_mut(row * 7 + weekday)
    }
}

/// A single date by N hours.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGrid<'a> {
    pub date: NaiveDate,
    pub today: bool,
    pub start_hour: u32,
    pub end_hour: u32,
    pub cells: Vec<HourCell<'a>>,
    pub all_day: Vec<&'a Event>,
    pub all_day_hidden: usize,
}

impl<'a> DayGrid<'a> {
    pub fn cell(&self, hour: u32) -> Option<&HourCell<'a>> {
        if hour < self.start_hour || hour > self.end_hour {
            return None;
        }
        self.cells.get((hour - self.start_hour) as usize)
    }

    pub(crate) fn cell_mut(&mut self, hour: u32) -> Option<&mut HourCell<'a>> {
        if hour < self.start_hour || hour > self.end_hour {
            return None;
        }
        self.cells.get_mut((hour - self.start_hour) as usize)
    }
}
