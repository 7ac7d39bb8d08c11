//! Event placement into grid cells.
//!
//! Placement never mutates events; a grid cell holds borrowed references
//! in input order, capped per cell. Assigning to a grid first clears any
//! previous placement, so the same grid can be repopulated after a filter
//! change.

use chrono::NaiveDate;
use std::ops::RangeInclusive;

use crate::event::Event;

use super::{DayGrid, MonthGrid, WeekGrid};

pub const DEFAULT_MAX_PER_CELL: usize = 10;

/// What happens to events beyond a cell's cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Drop them without a trace.
    #[default]
    Drop,
    /// Drop them but count, so a renderer can show "+N more".
    Count,
}

#[derive(Debug, Clone, Copy)]
pub struct Bucketizer {
    max_per_cell: usize,
    policy: OverflowPolicy,
}

impl Default for Bucketizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PER_CELL)
    }
}

impl Bucketizer {
    pub fn new(max_per_cell: usize) -> Self {
        Self { max_per_cell, policy: OverflowPolicy::default() }
    }

    pub fn with_policy(max_per_cell: usize, policy: OverflowPolicy) -> Self {
        Self { max_per_cell, policy }
    }

    /// Place events on the month grid by their start date. Events outside
    /// the grid's month are ignored; overnight and all-day events land on
    /// their start date like any other.
    pub fn assign_month<'a>(&self, grid: &mut MonthGrid<'a>, events: &'a [Event]) {
        for cell in &mut grid.cells {
            cell.events.clear();
            cell.hidden = 0;
        }

        for event in events {
            if let Some(cell) = grid.cell_for_mut(event.start.date()) {
                self.place(&mut cell.events, &mut cell.hidden, event);
            }
        }
    }

    /// Place events on the week grid. All-day events go to the grid's
    /// all-day row; timed events fill every hour cell their span covers.
    /// Events whose end date is after their start date cross midnight and
    /// are skipped entirely (known gap, not truncated).
    pub fn assign_week<'a>(&self, grid: &mut WeekGrid<'a>, events: &'a [Event]) {
        for cell in &mut grid.cells {
            cell.events.clear();
            cell.hidden = 0;
        }
        for bucket in &mut grid.all_day {
            bucket.clear();
        }
        grid.all_day_hidden = [0; 7];

        for event in events {
            if event.is_all_day() {
                let date = event.start.date();
                if date < grid.start || date > grid.end {
                    continue;
                }
                let column = (date - grid.start).num_days() as usize;
                self.place(&mut grid.all_day[column], &mut grid.all_day_hidden[column], event);
                continue;
            }

            let Some((date, hours)) = hour_span(event) else {
                continue;
            };
            if date < grid.start || date > grid.end {
                continue;
            }
            let column = (date - grid.start).num_days() as usize;
            for hour in hours {
                if let Some(cell) = grid.cell_mut(hour, column) {
                    self.place(&mut cell.events, &mut cell.hidden, event);
                }
            }
        }
    }

    /// Place events on a single-day grid. Same rules as [`assign_week`],
    /// restricted to the grid's date.
    pub fn assign_day<'a>(&self, grid: &mut DayGrid<'a>, events: &'a [Event]) {
        for cell in &mut grid.cells {
            cell.events.clear();
            cell.hidden = 0;
        }
        grid.all_day.clear();
        grid.all_day_hidden = 0;

        for event in events {
            if event.is_all_day() {
                if event.start.date() == grid.date {
                    self.place(&mut grid.all_day, &mut grid.all_day_hidden, event);
                }
                continue;
            }

            let Some((date, hours)) = hour_span(event) else {
                continue;
            };
            if date != grid.date {
                continue;
            }
            for hour in hours {
                if let Some(cell) = grid.cell_mut(hour) {
                    self.place(&mut cell.events, &mut cell.hidden, event);
                }
            }
        }
    }

    fn place<'a>(&self, bucket: &mut Vec<&'a Event>, hidden: &mut usize, event: &'a Event) {
        if bucket.len() < self.max_per_cell {
            bucket.push(event);
        } else if self.policy == OverflowPolicy::Count {
            *hidden += 1;
        }
    }
}

/// The date and inclusive hour range a timed event occupies in an hourly
/// grid. `None` for all-day events, and for events that end on a later
/// date than they start: hourly cells cannot represent a span across
/// midnight, so those are left out rather than truncated.
fn hour_span(event: &Event) -> Option<(NaiveDate, RangeInclusive<u32>)> {
    let start_hour = event.start.hour()?;
    let date = event.start.date();
    if event.end.date() > date {
        return None;
    }
    let end_hour = event.end.hour().unwrap_or(start_hour).max(start_hour);
    Some((date, start_hour..=end_hour))
}
