use anyhow::Result;
use calview_core::calendar::Calendar;
use calview_core::calview::Calview;
use calview_core::clock::SystemClock;
use calview_core::grid::geometry;
use calview_core::labels::DefaultLabels;
use calview_core::view::{Granularity, ViewRequest};

use crate::query::{self, FilterArgs};
use crate::render;

pub fn run(
    calview: &Calview,
    calendars: &[Calendar],
    year: Option<i32>,
    month: Option<i32>,
    filters: &FilterArgs,
) -> Result<()> {
    let clock = SystemClock;
    let tz = calview.timezone()?;

    let mut request = query::build_request(Granularity::Month, filters, &clock)?;
    if year.is_some() || month.is_some() {
        request = retarget(request, year, month);
    }

    let events = query::fetch_events(calendars, &request, tz)?;

    let mut grid = geometry::month_grid(request.year, request.month as i32, &clock);
    super::bucketizer(calview, filters).assign_month(&mut grid, &events);

    println!(
        "{}",
        render::render_month(&grid, &DefaultLabels, filters.detail)
    );

    Ok(())
}

/// Re-center on the requested month, keeping the current one where a
/// part was left out. An out-of-range month wraps into adjacent years.
fn retarget(request: ViewRequest, year: Option<i32>, month: Option<i32>) -> ViewRequest {
    let target_year = year.unwrap_or(request.year);
    let target_month = month.unwrap_or(request.month as i32);
    request.at(target_year, target_month, 1)
}
