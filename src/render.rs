//! Terminal rendering for the month, week, and day grids.

use calview_core::event::{Event, EventStatus, EventTime};
use calview_core::grid::{DayGrid, MonthGrid, WeekGrid};
use calview_core::labels::CalendarLabels;
use calview_core::nav;
use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;

pub fn render_month(grid: &MonthGrid, labels: &dyn CalendarLabels, detail: bool) -> String {
    let mut lines = Vec::new();

    let title = format!("{} {}", labels.month_name(grid.month), grid.year);
    lines.push(format!("{:^28}", title).bold().to_string());

    let header: String = (0..7u32)
        .map(|i| format!("{:>4}", labels.weekday_abbrev(i)))
        .collect();
    lines.push(header.dimmed().to_string());

    for week in grid.weeks() {
        let mut row = String::new();
        for cell in week {
            let Some(date) = cell.date else {
                row.push_str("    ");
                continue;
            };

            let num = date.day().to_string();
            let busy = !cell.events.is_empty() || cell.hidden > 0;
            // Pad before styling so reversed video doesn't swallow the gap.
            row.push_str(&" ".repeat(4 - num.len()));
            if cell.today {
                row.push_str(&num.reversed().to_string());
            } else if busy {
                row.push_str(&num.green().to_string());
            } else {
                row.push_str(&num);
            }
        }
        lines.push(row);
    }

    if detail {
        for cell in &grid.cells {
            let Some(date) = cell.date else { continue };
            if cell.events.is_empty() && cell.hidden == 0 {
                continue;
            }

            lines.push(String::new());
            let day_label = format!(
                "{} {} {}",
                labels.weekday_abbrev(date.weekday().num_days_from_sunday()),
                labels.month_abbrev(date.month()),
                date.day()
            );
            lines.push(day_label.bold().to_string());

            for event in &cell.events {
                lines.push(format!(
                    "  {} {}",
                    format_time(&event.start),
                    render_summary(event)
                ));
            }
            if cell.hidden > 0 {
                lines.push(format!("  {}", format!("+{} more", cell.hidden).dimmed()));
            }
        }
    }

    lines.push(String::new());
    let (prev_year, prev_month) = nav::prev_month(grid.year, grid.month);
    let (next_year, next_month) = nav::next_month(grid.year, grid.month);
    lines.push(
        format!(
            "months: calview month -m {prev_month} -y {prev_year} | calview month -m {next_month} -y {next_year}"
        )
        .dimmed()
        .to_string(),
    );
    lines.push(
        format!(
            " years: calview month -m {} -y {} | calview month -m {} -y {}",
            grid.month,
            nav::prev_year(grid.year),
            grid.month,
            nav::next_year(grid.year)
        )
        .dimmed()
        .to_string(),
    );
    if !grid.cells.iter().any(|cell| cell.today) {
        lines.push(" today: calview month".dimmed().to_string());
    }

    lines.join("\n")
}

pub fn render_week(grid: &WeekGrid, labels: &dyn CalendarLabels, detail: bool) -> String {
    let mut lines = Vec::new();

    lines.push(week_title(grid, labels).bold().to_string());
    lines.push(String::new());

    let mut header = " ".repeat(10);
    for (i, day) in grid.days.iter().enumerate() {
        let label = format!("{} {}", labels.weekday_abbrev(i as u32), day.day());
        let pad = " ".repeat(10usize.saturating_sub(label.chars().count()));
        if grid.today == Some(i) {
            header.push_str(&format!("{}{}", label.reversed(), pad));
        } else {
            header.push_str(&format!("{label}{pad}"));
        }
    }
    lines.push(header.trim_end().to_string());

    let empty = grid.all_day.iter().all(|day| day.is_empty())
        && grid.all_day_hidden.iter().all(|&hidden| hidden == 0)
        && grid
            .cells
            .iter()
            .all(|cell| cell.events.is_empty() && cell.hidden == 0);

    if empty {
        lines.push("No events found".dimmed().to_string());
    } else {
        let has_all_day = grid.all_day.iter().any(|day| !day.is_empty())
            || grid.all_day_hidden.iter().any(|&hidden| hidden > 0);
        if has_all_day {
            let mut row = format!("{}  ", format!("{:>8}", "all-day").dimmed());
            for i in 0..7 {
                let text = cell_text(&grid.all_day[i], grid.all_day_hidden[i]);
                row.push_str(&pad_right(&text, 10));
            }
            lines.push(row.trim_end().to_string());
        }

        for (offset, hour_row) in grid.hours().enumerate() {
            let hour = grid.start_hour + offset as u32;
            let gutter = format!("{:>8}", labels.hour_label(hour));
            let gutter = if hour_row.iter().any(|cell| cell.current) {
                gutter.reversed().to_string()
            } else {
                gutter.dimmed().to_string()
            };

            let mut row = format!("{gutter}  ");
            for cell in hour_row {
                let text = cell_text(&cell.events, cell.hidden);
                row.push_str(&pad_right(&text, 10));
            }
            lines.push(row.trim_end().to_string());
        }
    }

    if detail && !empty {
        for (i, day) in grid.days.iter().enumerate() {
            let mut entries: Vec<&Event> = grid.all_day[i].clone();
            let mut seen: Vec<&str> = entries.iter().map(|event| event.id.as_str()).collect();
            for hour_row in grid.hours() {
                for &event in &hour_row[i].events {
                    if !seen.contains(&event.id.as_str()) {
                        seen.push(event.id.as_str());
                        entries.push(event);
                    }
                }
            }

            if entries.is_empty() {
                continue;
            }

            lines.push(String::new());
            let day_label = format!(
                "{}, {} {}",
                labels.weekday_name(i as u32),
                labels.month_name(day.month()),
                day.day()
            );
            lines.push(day_label.bold().to_string());
            for event in entries {
                lines.push(format!(
                    "  {} {}",
                    format_time(&event.start),
                    render_summary(event)
                ));
            }
        }
    }

    lines.push(String::new());
    lines.push(
        format!(
            "weeks: calview week {} | calview week {}",
            nav::prev_week(grid.start).format("%Y-%m-%d"),
            nav::next_week(grid.start).format("%Y-%m-%d")
        )
        .dimmed()
        .to_string(),
    );
    if grid.today.is_none() {
        lines.push("today: calview week".dimmed().to_string());
    }

    lines.join("\n")
}

pub fn render_day(grid: &DayGrid, labels: &dyn CalendarLabels, detail: bool) -> String {
    let mut lines = Vec::new();

    let title = format!(
        "{}, {} {}, {}",
        labels.weekday_name(grid.date.weekday().num_days_from_sunday()),
        labels.month_name(grid.date.month()),
        grid.date.day(),
        grid.date.year()
    );
    lines.push(title.bold().to_string());
    lines.push(String::new());

    let empty = grid.all_day.is_empty()
        && grid.all_day_hidden == 0
        && grid
            .cells
            .iter()
            .all(|cell| cell.events.is_empty() && cell.hidden == 0);

    if empty {
        lines.push("No events found".dimmed().to_string());
    } else {
        if !grid.all_day.is_empty() || grid.all_day_hidden > 0 {
            let summaries: Vec<String> = grid.all_day.iter().map(|e| render_summary(e)).collect();
            let mut row = format!(
                "{}  {}",
                format!("{:>8}", "all-day").dimmed(),
                summaries.join(", ")
            );
            if grid.all_day_hidden > 0 {
                row.push_str(&format!(
                    " {}",
                    format!("+{} more", grid.all_day_hidden).dimmed()
                ));
            }
            lines.push(row.trim_end().to_string());
        }

        for cell in &grid.cells {
            let gutter = format!("{:>8}", labels.hour_label(cell.hour));
            let gutter = if cell.current {
                gutter.reversed().to_string()
            } else {
                gutter.dimmed().to_string()
            };

            let summaries: Vec<String> = cell.events.iter().map(|e| render_summary(e)).collect();
            let mut row = format!("{gutter}  {}", summaries.join(", "));
            if cell.hidden > 0 {
                row.push_str(&format!(" {}", format!("+{} more", cell.hidden).dimmed()));
            }
            lines.push(row.trim_end().to_string());
        }
    }

    if detail && !empty {
        let mut entries: Vec<&Event> = grid.all_day.clone();
        let mut seen: Vec<&str> = entries.iter().map(|event| event.id.as_str()).collect();
        for cell in &grid.cells {
            for &event in &cell.events {
                if !seen.contains(&event.id.as_str()) {
                    seen.push(event.id.as_str());
                    entries.push(event);
                }
            }
        }

        for event in entries {
            lines.push(String::new());
            lines.push(render_summary(event));
            lines.push(format!(
                "  {} {}",
                "Date:".dimmed(),
                format_date_range(event, labels)
            ));
            lines.push(format!("  {} {}", "Time:".dimmed(), format_time_range(event)));
            if let Some(ref location) = event.location {
                lines.push(format!("  {} {}", "Where:".dimmed(), location));
            }
            if !event.class.is_public() {
                lines.push(format!("  {}", "Private.".dimmed()));
            } else if let Some(ref description) = event.description {
                lines.push(format!("  {description}"));
            } else {
                lines.push(format!("  {}", "No description.".dimmed()));
            }
        }
    }

    lines.push(String::new());
    lines.push(
        format!(
            " days: calview day {} | calview day {}",
            nav::prev_day(grid.date).format("%Y-%m-%d"),
            nav::next_day(grid.date).format("%Y-%m-%d")
        )
        .dimmed()
        .to_string(),
    );
    if !grid.today {
        lines.push("today: calview day".dimmed().to_string());
    }

    lines.join("\n")
}

fn week_title(grid: &WeekGrid, labels: &dyn CalendarLabels) -> String {
    if grid.start.year() == grid.end.year() {
        format!(
            "{} {} - {} {}, {} (week {})",
            labels.month_name(grid.start.month()),
            grid.start.day(),
            labels.month_name(grid.end.month()),
            grid.end.day(),
            grid.end.year(),
            grid.week_number
        )
    } else {
        format!(
            "{} {}, {} - {} {}, {} (week {})",
            labels.month_name(grid.start.month()),
            grid.start.day(),
            grid.start.year(),
            labels.month_name(grid.end.month()),
            grid.end.day(),
            grid.end.year(),
            grid.week_number
        )
    }
}

/// Compact text for one week cell: a lone event shows its (truncated)
/// title, anything more collapses into counts.
fn cell_text(events: &[&Event], hidden: usize) -> String {
    match (events.len(), hidden) {
        (0, 0) => String::new(),
        (0, hidden) => format!("(+{hidden})"),
        (1, 0) => truncate(&events[0].summary, 9),
        (n, 0) => format!("{n} events"),
        (n, hidden) => format!("{n}(+{hidden})"),
    }
}

fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn pad_right(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.chars().count());
    format!("{}{}", text, " ".repeat(pad))
}

/// Status shows through styling: tentative events render yellow,
/// cancelled ones struck through.
fn render_summary(event: &Event) -> String {
    match event.status {
        EventStatus::Confirmed => event.summary.clone(),
        EventStatus::Tentative => event.summary.yellow().to_string(),
        EventStatus::Cancelled => event.summary.strikethrough().to_string(),
    }
}

/// Format the time portion of an event (e.g. "  15:00" or "all-day")
fn format_time(time: &EventTime) -> String {
    match time {
        EventTime::Date(_) => "all-day".to_string(),
        EventTime::DateTime(dt) => format!("{:>7}", dt.format("%H:%M")),
    }
}

fn format_date_range(event: &Event, labels: &dyn CalendarLabels) -> String {
    let date_label = |date: NaiveDate| {
        format!(
            "{} {}, {}",
            labels.month_name(date.month()),
            date.day(),
            date.year()
        )
    };

    let start = event.start.date();
    let end = event.end.date();
    if end > start {
        format!("{} - {}", date_label(start), date_label(end))
    } else {
        date_label(start)
    }
}

fn format_time_range(event: &Event) -> String {
    match (&event.start, &event.end) {
        (EventTime::DateTime(start), EventTime::DateTime(end)) => {
            format!("{} - {}", start.format("%H:%M"), end.format("%H:%M"))
        }
        _ => "all-day".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calview_core::clock::FixedClock;
    use calview_core::event::EventClass;
    use calview_core::grid::bucket::Bucketizer;
    use calview_core::grid::geometry;
    use calview_core::labels::DefaultLabels;
    use chrono::NaiveDate;

    fn clock_at(y: i32, m: u32, d: u32, hour: u32) -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
        )
    }

    fn make_event(id: &str, title: &str, day: u32, hour: u32, end_hour: u32) -> Event {
        Event {
            id: id.to_string(),
            summary: title.to_string(),
            description: None,
            location: None,
            start: EventTime::DateTime(
                NaiveDate::from_ymd_opt(2024, 3, day)
                    .unwrap()
                    .and_hms_opt(hour, 0, 0)
                    .unwrap(),
            ),
            end: EventTime::DateTime(
                NaiveDate::from_ymd_opt(2024, 3, day)
                    .unwrap()
                    .and_hms_opt(end_hour, 30, 0)
                    .unwrap(),
            ),
            status: EventStatus::Confirmed,
            class: EventClass::Public,
        }
    }

    // --- month ---

    #[test]
    fn month_shows_title_header_and_days() {
        let clock = clock_at(2024, 3, 15, 9);
        let grid = geometry::month_grid(2024, 3, &clock);
        let out = render_month(&grid, &DefaultLabels, false);

        assert!(out.contains("March 2024"));
        assert!(out.contains("Sun"));
        assert!(out.contains("Sat"));
        assert!(out.contains("31"));
    }

    #[test]
    fn month_detail_lists_cell_events() {
        let clock = clock_at(2024, 3, 1, 9);
        let events = vec![make_event("a", "Standup", 15, 9, 9)];
        let mut grid = geometry::month_grid(2024, 3, &clock);
        Bucketizer::default().assign_month(&mut grid, &events);

        let out = render_month(&grid, &DefaultLabels, true);
        assert!(out.contains("Fri Mar 15"));
        assert!(out.contains("Standup"));
        assert!(out.contains("09:00"));
    }

    #[test]
    fn month_footer_hints_at_neighbors() {
        let clock = clock_at(2024, 3, 15, 9);
        let grid = geometry::month_grid(2024, 3, &clock);
        let out = render_month(&grid, &DefaultLabels, false);

        assert!(out.contains("calview month -m 2 -y 2024"));
        assert!(out.contains("calview month -m 4 -y 2024"));
        assert!(out.contains("calview month -m 3 -y 2023"));
        // Today sits inside this grid, so no jump-back hint.
        assert!(!out.contains("today: calview month"));
    }

    #[test]
    fn month_footer_offers_today_when_showing_another_period() {
        let clock = clock_at(2024, 3, 15, 9);
        let grid = geometry::month_grid(2024, 7, &clock);
        let out = render_month(&grid, &DefaultLabels, false);
        assert!(out.contains("today: calview month"));
    }

    // --- week ---

    #[test]
    fn week_shows_title_and_columns() {
        let clock = clock_at(2024, 3, 15, 9);
        let events = vec![make_event("a", "Standup", 15, 9, 10)];
        let mut grid = geometry::week_grid(
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            8,
            17,
            &clock,
        );
        Bucketizer::default().assign_week(&mut grid, &events);

        let out = render_week(&grid, &DefaultLabels, false);
        assert!(out.contains("March 10 - March 16, 2024 (week 11)"));
        assert!(out.contains("Mon 11"));
        assert!(out.contains("Standup"));
        assert!(out.contains("9:00 am"));
    }

    #[test]
    fn week_collapses_crowded_cells_into_counts() {
        let clock = clock_at(2024, 3, 15, 9);
        let events = vec![
            make_event("a", "Standup", 15, 9, 9),
            make_event("b", "Planning", 15, 9, 9),
        ];
        let mut grid = geometry::week_grid(
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            8,
            17,
            &clock,
        );
        Bucketizer::default().assign_week(&mut grid, &events);

        let out = render_week(&grid, &DefaultLabels, false);
        assert!(out.contains("2 events"));
    }

    #[test]
    fn week_detail_lists_spanning_events_once_per_day() {
        let clock = clock_at(2024, 3, 15, 9);
        let events = vec![make_event("a", "Workshop", 15, 9, 11)];
        let mut grid = geometry::week_grid(
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            8,
            17,
            &clock,
        );
        Bucketizer::default().assign_week(&mut grid, &events);

        let out = render_week(&grid, &DefaultLabels, true);
        assert_eq!(out.matches("Workshop").count(), 4);
        assert!(out.contains("Friday, March 15"));
    }

    #[test]
    fn empty_week_says_so() {
        let clock = clock_at(2024, 3, 15, 9);
        let grid = geometry::week_grid(
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            8,
            17,
            &clock,
        );
        let out = render_week(&grid, &DefaultLabels, false);
        assert!(out.contains("No events found"));
    }

    // --- day ---

    #[test]
    fn day_lists_hours_and_footer() {
        let clock = clock_at(2024, 3, 15, 9);
        let events = vec![make_event("a", "Standup", 15, 9, 9)];
        let mut grid = geometry::day_grid(
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            8,
            17,
            &clock,
        );
        Bucketizer::default().assign_day(&mut grid, &events);

        let out = render_day(&grid, &DefaultLabels, false);
        assert!(out.contains("Friday, March 15, 2024"));
        assert!(out.contains("Standup"));
        assert!(out.contains("calview day 2024-03-14"));
        assert!(out.contains("calview day 2024-03-16"));
        assert!(!out.contains("today: calview day"));
    }

    #[test]
    fn day_detail_blocks_show_fields() {
        let clock = clock_at(2024, 3, 15, 9);
        let mut event = make_event("a", "Standup", 15, 9, 9);
        event.location = Some("Room 3".to_string());
        let mut private = make_event("b", "Review", 15, 10, 10);
        private.class = EventClass::Private;
        private.description = Some("Secret notes".to_string());
        let events = vec![event, private];

        let mut grid = geometry::day_grid(
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            8,
            17,
            &clock,
        );
        Bucketizer::default().assign_day(&mut grid, &events);

        let out = render_day(&grid, &DefaultLabels, true);
        assert!(out.contains("Where:"));
        assert!(out.contains("Room 3"));
        assert!(out.contains("March 15, 2024"));
        assert!(out.contains("09:00 - 09:30"));
        assert!(out.contains("No description."));
        assert!(out.contains("Private."));
        assert!(!out.contains("Secret notes"));
    }

    #[test]
    fn empty_day_says_so() {
        let clock = clock_at(2024, 3, 15, 9);
        let grid = geometry::day_grid(
            NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
            8,
            17,
            &clock,
        );
        let out = render_day(&grid, &DefaultLabels, false);
        assert!(out.contains("No events found"));
        assert!(out.contains("today: calview day"));
    }
}
