//! Month, weekday, and hour labels.
//!
//! Rendering never hardcodes calendar names; it goes through this trait so
//! alternate locales can be plugged in.

/// Names for the parts of a calendar. Weekdays are counted from Sunday = 0;
/// months from January = 1.
pub trait CalendarLabels {
    fn month_name(&self, month: u32) -> &str;

    fn month_abbrev(&self, month: u32) -> &str;

    fn weekday_name(&self, weekday: u32) -> &str;

    fn weekday_abbrev(&self, weekday: u32) -> &str;

    /// Clock label for an hour of day, e.g. "9:00 am".
    fn hour_label(&self, hour: u32) -> String;
}

static MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

static MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

static WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

static WEEKDAY_ABBREVS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// English labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLabels;

impl CalendarLabels for DefaultLabels {
    fn month_name(&self, month: u32) -> &str {
        MONTHS[(month.clamp(1, 12) - 1) as usize]
    }

    fn month_abbrev(&self, month: u32) -> &str {
        MONTH_ABBREVS[(month.clamp(1, 12) - 1) as usize]
    }

    fn weekday_name(&self, weekday: u32) -> &str {
        WEEKDAYS[(weekday % 7) as usize]
    }

    fn weekday_abbrev(&self, weekday: u32) -> &str {
        WEEKDAY_ABBREVS[(weekday % 7) as usize]
    }

    fn hour_label(&self, hour: u32) -> String {
        let hour = hour % 24;
        let (clock_hour, suffix) = match hour {
            0 => (12, "am"),
            1..=11 => (hour, "am"),
            12 => (12, "pm"),
            _ => (hour - 12, "pm"),
        };
        format!("{}:00 {}", clock_hour, suffix)
    }
}
