//! Calendar event types.
//!
//! Events are parsed out of .ics files into these types, and the grid engine
//! works exclusively with them for bucketing and display.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// A calendar event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
    pub status: EventStatus,
    pub class: EventClass,
}

impl Event {
    /// All-day events carry a date without a time of day.
    pub fn is_all_day(&self) -> bool {
        matches!(self.start, EventTime::Date(_))
    }
}

/// When an event starts or ends. `DateTime` values are wall-clock times in
/// the viewer's timezone; `Date` marks an all-day event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventTime {
    DateTime(NaiveDateTime),
    Date(NaiveDate),
}

impl EventTime {
    /// The calendar date this instant falls on.
    pub fn date(&self) -> NaiveDate {
        match self {
            EventTime::DateTime(dt) => dt.date(),
            EventTime::Date(d) => *d,
        }
    }

    /// Hour of day (0-23) for timed values, `None` for all-day values.
    pub fn hour(&self) -> Option<u32> {
        match self {
            EventTime::DateTime(dt) => Some(dt.hour()),
            EventTime::Date(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    Confirmed,
    Tentative,
    Cancelled,
}

/// Visibility of the event's details (ICS CLASS property). Non-public
/// events hide their description in rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EventClass {
    #[default]
    Public,
    Private,
    Confidential,
}

impl EventClass {
    pub fn is_public(&self) -> bool {
        matches!(self, EventClass::Public)
    }
}
