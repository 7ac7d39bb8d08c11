use anyhow::{Context, Result};
use calview_core::calview::Calview;
use calview_core::grid::bucket::{Bucketizer, OverflowPolicy};
use chrono::NaiveDate;

use crate::query::FilterArgs;

pub mod calendars;
pub mod day;
pub mod month;
pub mod new;
pub mod week;

/// Bucketizer honoring the per-cell cap and overflow flags.
pub(crate) fn bucketizer(calview: &Calview, filters: &FilterArgs) -> Bucketizer {
    let max_per_cell = filters
        .max_per_cell
        .unwrap_or_else(|| calview.max_per_cell());
    let policy = if filters.more {
        OverflowPolicy::Count
    } else {
        OverflowPolicy::Drop
    };

    Bucketizer::with_policy(max_per_cell, policy)
}

pub(crate) fn parse_date_arg(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .with_context(|| format!("Could not parse date '{input}' (expected YYYY-MM-DD)"))
}
