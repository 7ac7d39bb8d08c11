//! ICS file generation.

use icalendar::{Calendar, Component, EventLike, Property, ValueType};

use crate::event::{Event, EventClass, EventStatus, EventTime};

/// Add a datetime property formatted for its EventTime variant.
fn add_datetime_property(ics_event: &mut icalendar::Event, name: &str, time: &EventTime) {
    match time {
        EventTime::Date(d) => {
            let mut prop = Property::new(name, d.format("%Y%m%d").to_string());
            prop.append_parameter(ValueType::Date);
            ics_event.append_property(prop);
        }
        EventTime::DateTime(dt) => {
            // Floating wall-clock time (no Z, no TZID)
            ics_event.add_property(name, dt.format("%Y%m%dT%H%M%S").to_string());
        }
    }
}

/// Generate .ics content for an event.
pub fn generate_ics(event: &Event) -> String {
    let mut cal = Calendar::new();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.id);
    ics_event.summary(&event.summary);

    // DTSTAMP is required by RFC 5545
    let dtstamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
    ics_event.add_property("DTSTAMP", dtstamp);

    add_datetime_property(&mut ics_event, "DTSTART", &event.start);
    add_datetime_property(&mut ics_event, "DTEND", &event.end);

    if let Some(ref desc) = event.description {
        ics_event.description(desc);
    }

    if let Some(ref loc) = event.location {
        ics_event.location(loc);
    }

    let status = match event.status {
        EventStatus::Confirmed => "CONFIRMED",
        EventStatus::Tentative => "TENTATIVE",
        EventStatus::Cancelled => "CANCELLED",
    };
    ics_event.add_property("STATUS", status);

    // CLASS:PUBLIC is the RFC default and stays implicit
    match event.class {
        EventClass::Public => {}
        EventClass::Private => {
            ics_event.add_property("CLASS", "PRIVATE");
        }
        EventClass::Confidential => {
            ics_event.add_property("CLASS", "CONFIDENTIAL");
        }
    }

    cal.push(ics_event.done());
    let cal = cal.done();

    cal.to_string()
}

/// The storage filename for an event: its start, then a slug of its title.
pub fn generate_filename(event: &Event) -> String {
    let slug = slugify(&event.summary);
    let slug = if slug.is_empty() { "event".to_string() } else { slug };

    let date_part = match &event.start {
        EventTime::Date(d) => d.format("%Y-%m-%d").to_string(),
        EventTime::DateTime(dt) => dt.format("%Y-%m-%dT%H%M").to_string(),
    };

    format!("{}__{}.ics", date_part, slug)
}

/// Convert a string to a filename-safe slug
pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else {
                '-'
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(50) // Limit slug length
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ics::parse_event;
    use chrono::NaiveDate;

    fn make_event() -> Event {
        Event {
            id: "event-123".to_string(),
            summary: "Team Standup".to_string(),
            description: None,
            location: None,
            start: EventTime::DateTime(
                NaiveDate::from_ymd_opt(2024, 3, 15)
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap(),
            ),
            end: EventTime::DateTime(
                NaiveDate::from_ymd_opt(2024, 3, 15)
                    .unwrap()
                    .and_hms_opt(9, 30, 0)
                    .unwrap(),
            ),
            status: EventStatus::Confirmed,
            class: EventClass::Public,
        }
    }

    #[test]
    fn timed_events_are_written_as_floating_times() {
        let ics = generate_ics(&make_event());
        assert!(ics.contains("DTSTART:20240315T090000"), "ICS:\n{ics}");
        assert!(ics.contains("DTEND:20240315T093000"), "ICS:\n{ics}");
        assert!(ics.contains("STATUS:CONFIRMED"), "ICS:\n{ics}");
    }

    #[test]
    fn all_day_events_get_value_date_parameters() {
        let mut event = make_event();
        event.start = EventTime::Date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        event.end = EventTime::Date(NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());

        let ics = generate_ics(&event);
        assert!(ics.contains("DTSTART;VALUE=DATE:20240315"), "ICS:\n{ics}");
        assert!(ics.contains("DTEND;VALUE=DATE:20240316"), "ICS:\n{ics}");
    }

    #[test]
    fn class_is_written_only_when_not_public() {
        let mut event = make_event();
        assert!(!generate_ics(&event).contains("CLASS:"));

        event.class = EventClass::Private;
        assert!(generate_ics(&event).contains("CLASS:PRIVATE"));
    }

    #[test]
    fn generated_ics_parses_back() {
        let mut event = make_event();
        event.location = Some("Room 2".to_string());
        event.status = EventStatus::Tentative;
        event.class = EventClass::Confidential;

        let parsed = parse_event(&generate_ics(&event), chrono_tz::UTC).expect("should parse");
        assert_eq!(parsed, event);
    }

    #[test]
    fn filenames_combine_start_and_slug() {
        let event = make_event();
        assert_eq!(generate_filename(&event), "2024-03-15T0900__team-standup.ics");

        let mut all_day = make_event();
        all_day.summary = "Book Fair!".to_string();
        all_day.start = EventTime::Date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(generate_filename(&all_day), "2024-03-15__book-fair.ics");

        let mut untitled = make_event();
        untitled.summary = "???".to_string();
        assert_eq!(generate_filename(&untitled), "2024-03-15T0900__event.ics");
    }

    #[test]
    fn slugify_normalizes_titles() {
        assert_eq!(slugify("Team Standup"), "team-standup");
        assert_eq!(slugify("Meeting: Q4 Review!"), "meeting-q4-review");
        assert_eq!(slugify("  Lots   of   spaces  "), "lots-of-spaces");
        assert_eq!(slugify("Special@#$%Characters"), "special-characters");
        assert_eq!(slugify(&"a".repeat(100)).len(), 50);
    }
}
