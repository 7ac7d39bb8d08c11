mod commands;
mod query;
mod render;

use anyhow::Result;
use calview_core::calendar::Calendar;
use calview_core::calview::Calview;
use clap::{Parser, Subcommand};

use query::FilterArgs;

#[derive(Parser)]
#[command(name = "calview")]
#[command(about = "View your local .ics calendars as month, week, and day grids")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month grid
    Month {
        /// Month to show, 1-12 (defaults to the current month)
        #[arg(short, long)]
        month: Option<i32>,

        /// Year to show (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Show a week, hour by hour
    Week {
        /// A date inside the week (YYYY-MM-DD, defaults to today)
        date: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Show a single day, hour by hour
    Day {
        /// The date to show (YYYY-MM-DD, defaults to today)
        date: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Create an event
    New {
        title: String,

        /// Start date/time ("2024-03-15T09:00", or "2024-03-15" for all-day)
        #[arg(short, long)]
        start: String,

        /// End date/time (same formats as --start)
        #[arg(short, long, conflicts_with = "duration")]
        end: Option<String>,

        /// Duration from the start (e.g. "45m", "2h", "3days")
        #[arg(short, long)]
        duration: Option<String>,

        /// Where the event happens
        #[arg(short, long)]
        location: Option<String>,

        /// Longer description
        #[arg(long)]
        description: Option<String>,

        /// Calendar to create the event in (by slug)
        #[arg(short, long)]
        calendar: Option<String>,
    },
    /// List calendars
    Calendars {
        /// Set the default calendar for new events
        #[arg(long)]
        default: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let calview = Calview::load()?;

    match cli.command {
        Commands::Month { month, year, filters } => {
            let calendars = resolve_calendars(&calview, filters.calendar.as_deref())?;
            commands::month::run(&calview, &calendars, year, month, &filters)
        }
        Commands::Week { date, filters } => {
            let calendars = resolve_calendars(&calview, filters.calendar.as_deref())?;
            commands::week::run(&calview, &calendars, date.as_deref(), &filters)
        }
        Commands::Day { date, filters } => {
            let calendars = resolve_calendars(&calview, filters.calendar.as_deref())?;
            commands::day::run(&calview, &calendars, date.as_deref(), &filters)
        }
        Commands::New {
            title,
            start,
            end,
            duration,
            location,
            description,
            calendar,
        } => {
            require_calendars(&calview)?;
            let calendars = calview.calendars();
            commands::new::run(
                &calview,
                &calendars,
                title,
                &start,
                end.as_deref(),
                duration.as_deref(),
                location,
                description,
                calendar.as_deref(),
            )
        }
        Commands::Calendars { default } => commands::calendars::run(calview, default.as_deref()),
    }
}

fn require_calendars(calview: &Calview) -> Result<()> {
    if calview.calendars().is_empty() {
        anyhow::bail!(
            "No calendars found in {}.\n\n\
            Create your first calendar with:\n  \
            mkdir -p {}\n\n\
            Then add an event:\n  \
            calview new \"Lunch\" --start 2024-03-15T12:00",
            calview.display_path().display(),
            calview.data_path().join("personal").display()
        );
    }

    Ok(())
}

fn resolve_calendars(calview: &Calview, calendar_filter: Option<&str>) -> Result<Vec<Calendar>> {
    let all_calendars = calview.calendars();

    match calendar_filter {
        Some(slug) => match all_calendars.into_iter().find(|c| c.slug == slug) {
            Some(cal) => Ok(vec![cal]),
            None => {
                let available: Vec<_> =
                    calview.calendars().iter().map(|c| c.slug.clone()).collect();
                anyhow::bail!(
                    "Calendar '{}' not found. Available: {}",
                    slug,
                    available.join(", ")
                );
            }
        },
        None => Ok(all_calendars),
    }
}
