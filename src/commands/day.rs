use anyhow::Result;
use calview_core::calendar::Calendar;
use calview_core::calview::Calview;
use calview_core::clock::SystemClock;
use calview_core::grid::geometry;
use calview_core::labels::DefaultLabels;
use calview_core::view::Granularity;
use chrono::Datelike;

use crate::query::{self, FilterArgs};
use crate::render;

pub fn run(
    calview: &Calview,
    calendars: &[Calendar],
    date: Option<&str>,
    filters: &FilterArgs,
) -> Result<()> {
    let clock = SystemClock;
    let tz = calview.timezone()?;

    let mut request = query::build_request(Granularity::Day, filters, &clock)?;
    if let Some(date) = date {
        let date = super::parse_date_arg(date)?;
        request = request.at(date.year(), date.month() as i32, date.day());
    }

    let events = query::fetch_events(calendars, &request, tz)?;

    let (start_hour, end_hour) = calview.hour_span();
    let mut grid = geometry::day_grid(request.reference_date(), start_hour, end_hour, &clock);
    super::bucketizer(calview, filters).assign_day(&mut grid, &events);

    println!(
        "{}",
        render::render_day(&grid, &DefaultLabels, filters.detail)
    );

    Ok(())
}
