use anyhow::{Context, Result};
use calview_core::calendar::Calendar;
use calview_core::calview::Calview;
use calview_core::event::{Event, EventClass, EventStatus, EventTime};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use owo_colors::OwoColorize;

#[allow(clippy::too_many_arguments)]
pub fn run(
    calview: &Calview,
    calendars: &[Calendar],
    title: String,
    start: &str,
    end: Option<&str>,
    duration: Option<&str>,
    location: Option<String>,
    description: Option<String>,
    calendar_slug: Option<&str>,
) -> Result<()> {
    let start_time = parse_datetime_arg(start)?;

    let end_time = if let Some(end) = end {
        parse_datetime_arg(end)?
    } else if let Some(duration) = duration {
        apply_duration(&start_time, duration)?
    } else {
        default_end(&start_time)
    };

    let calendar = resolve_target_calendar(calview, calendars, calendar_slug)?;

    let event = Event {
        id: format!("local-{}", uuid::Uuid::new_v4()),
        summary: title,
        description,
        location,
        start: start_time,
        end: end_time,
        status: EventStatus::Confirmed,
        class: EventClass::Public,
    };

    let created = calendar.create_event(event)?;
    println!(
        "{}",
        format!("Created: {}", created.path.display()).green()
    );

    Ok(())
}

/// `YYYY-MM-DDTHH:MM` makes a timed event, `YYYY-MM-DD` an all-day one.
fn parse_datetime_arg(input: &str) -> Result<EventTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M") {
        return Ok(EventTime::DateTime(dt));
    }
    if let Ok(d) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(EventTime::Date(d));
    }

    anyhow::bail!(
        "Could not parse '{}' (expected YYYY-MM-DD or YYYY-MM-DDTHH:MM)",
        input
    )
}

fn apply_duration(start: &EventTime, input: &str) -> Result<EventTime> {
    let std_dur = humantime::parse_duration(input)
        .map_err(|e| anyhow::anyhow!("Could not parse duration '{}': {}", input, e))?;
    let dur = Duration::from_std(std_dur).context("Duration too large")?;

    Ok(match start {
        EventTime::DateTime(dt) => EventTime::DateTime(*dt + dur),
        // All-day events span whole days; sub-day durations still cover one.
        EventTime::Date(d) => EventTime::Date(*d + Duration::days(dur.num_days().max(1))),
    })
}

/// Default end: +1 hour for timed events, +1 day for all-day events.
fn default_end(start: &EventTime) -> EventTime {
    match start {
        EventTime::DateTime(dt) => EventTime::DateTime(*dt + Duration::hours(1)),
        EventTime::Date(d) => EventTime::Date(*d + Duration::days(1)),
    }
}

fn resolve_target_calendar<'a>(
    calview: &Calview,
    calendars: &'a [Calendar],
    slug: Option<&str>,
) -> Result<&'a Calendar> {
    if let Some(slug) = slug {
        return calendars.iter().find(|c| c.slug == slug).ok_or_else(|| {
            let available: Vec<_> = calendars.iter().map(|c| c.slug.as_str()).collect();
            anyhow::anyhow!(
                "Calendar '{}' not found. Available: {}",
                slug,
                available.join(", ")
            )
        });
    }

    // If only one calendar, use it
    if calendars.len() == 1 {
        return Ok(&calendars[0]);
    }

    if let Some(default) = calview.default_calendar()
        && let Some(calendar) = calendars.iter().find(|c| c.slug == default.slug)
    {
        return Ok(calendar);
    }

    let available: Vec<_> = calendars.iter().map(|c| c.slug.as_str()).collect();
    anyhow::bail!(
        "Multiple calendars found ({}). Use --calendar to specify one.",
        available.join(", ")
    )
}
