//! Loading, filtering, and ordering events for a view.

use anyhow::Result;
use calview_core::calendar::Calendar;
use calview_core::clock::Clock;
use calview_core::event::{Event, EventStatus, EventTime};
use calview_core::view::{Granularity, Order, OrderBy, ViewRequest};
use chrono::Timelike;
use chrono_tz::Tz;
use clap::Args;

/// Event filters shared by the month, week, and day views.
#[derive(Args)]
pub struct FilterArgs {
    /// Only show this calendar (by slug)
    #[arg(short, long)]
    pub calendar: Option<String>,

    /// Only show events with this status (confirmed, tentative, cancelled)
    #[arg(long)]
    pub status: Option<String>,

    /// Only show events mentioning this term
    #[arg(long)]
    pub search: Option<String>,

    /// Sort events within a cell by "start" or "title"
    #[arg(long, default_value = "start")]
    pub order_by: String,

    /// Reverse the sort direction
    #[arg(long)]
    pub descending: bool,

    /// Show at most this many events per cell
    #[arg(long)]
    pub max_per_cell: Option<usize>,

    /// Mark capped cells with the number of hidden events
    #[arg(long)]
    pub more: bool,

    /// List event details under the grid
    #[arg(long)]
    pub detail: bool,
}

/// A request for the current period, with the CLI filters applied.
pub fn build_request(
    granularity: Granularity,
    filters: &FilterArgs,
    clock: &dyn Clock,
) -> Result<ViewRequest> {
    let mut request = ViewRequest::current(granularity, clock);
    request.status = parse_status(filters.status.as_deref())?;
    request.search = filters.search.clone();
    request.order_by = parse_order_by(&filters.order_by)?;
    request.order = if filters.descending {
        Order::Descending
    } else {
        Order::Ascending
    };

    Ok(request)
}

fn parse_status(value: Option<&str>) -> Result<Option<EventStatus>> {
    let Some(value) = value else {
        return Ok(None);
    };

    let status = match value.to_lowercase().as_str() {
        "confirmed" => EventStatus::Confirmed,
        "tentative" => EventStatus::Tentative,
        "cancelled" | "canceled" => EventStatus::Cancelled,
        other => anyhow::bail!(
            "Unknown status '{}'. Available: confirmed, tentative, cancelled",
            other
        ),
    };

    Ok(Some(status))
}

fn parse_order_by(value: &str) -> Result<OrderBy> {
    match value.to_lowercase().as_str() {
        "start" | "date" => Ok(OrderBy::Start),
        "title" => Ok(OrderBy::Title),
        other => anyhow::bail!("Unknown sort key '{}'. Available: start, title", other),
    }
}

/// Load every event the request's period covers, filtered and ordered.
/// An event belongs to the period when its start date falls inside it.
pub fn fetch_events(calendars: &[Calendar], request: &ViewRequest, tz: Tz) -> Result<Vec<Event>> {
    let (from, to) = request.range();

    let mut events = Vec::new();
    for calendar in calendars {
        events.extend(calendar.events(tz)?);
    }

    events.retain(|event| {
        let date = event.start.date();
        date >= from && date <= to
    });

    if let Some(status) = request.status {
        events.retain(|event| event.status == status);
    }

    if let Some(ref term) = request.search {
        let term = term.to_lowercase();
        events.retain(|event| matches_search(event, &term));
    }

    sort_events(&mut events, request);

    Ok(events)
}

fn matches_search(event: &Event, term: &str) -> bool {
    event.summary.to_lowercase().contains(term)
        || event
            .description
            .as_ref()
            .is_some_and(|d| d.to_lowercase().contains(term))
        || event
            .location
            .as_ref()
            .is_some_and(|l| l.to_lowercase().contains(term))
}

fn sort_events(events: &mut [Event], request: &ViewRequest) {
    match request.order_by {
        OrderBy::Start => events.sort_by_key(|event| start_key(event)),
        OrderBy::Title => {
            events.sort_by(|a, b| a.summary.to_lowercase().cmp(&b.summary.to_lowercase()))
        }
    }

    if request.order == Order::Descending {
        events.reverse();
    }
}

/// All-day events sort before timed events on the same date.
fn start_key(event: &Event) -> (chrono::NaiveDate, u32, u32) {
    match &event.start {
        EventTime::Date(d) => (*d, 0, 0),
        EventTime::DateTime(dt) => (dt.date(), 1 + dt.hour(), dt.minute()),
    }
}
