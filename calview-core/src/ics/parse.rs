//! ICS file parsing.

use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::event::{Event, EventClass, EventStatus, EventTime};

/// Parse ICS content into an [`Event`].
///
/// Timed values are converted to wall-clock time in `tz`; VALUE=DATE
/// values become all-day events. Returns `None` when the content has no
/// VEVENT, no UID, or no parseable DTSTART. A missing DTEND falls back to
/// the start, a missing SUMMARY becomes "(No title)".
pub fn parse_event(content: &str, tz: Tz) -> Option<Event> {
    let mut in_vevent = false;
    let mut in_valarm = false;
    let mut current_line = String::new();

    let mut uid = None;
    let mut summary = None;
    let mut description = None;
    let mut location = None;
    let mut dtstart = None;
    let mut dtend = None;
    let mut status = EventStatus::Confirmed;
    let mut class = EventClass::Public;

    for line in content.lines() {
        // Line folding (RFC 5545): continuation lines start with a single
        // space or tab. Only the first character is the indicator, the
        // rest is content.
        if line.starts_with(' ') || line.starts_with('\t') {
            current_line.push_str(&line[1..]);
            continue;
        }

        // Process the completed line. Alarm sub-components carry their own
        // SUMMARY/DESCRIPTION properties and must not bleed into the event.
        if !current_line.is_empty()
            && in_vevent
            && !in_valarm
            && let Some((key, params, value)) = parse_property(&current_line)
        {
            match key.as_str() {
                "UID" => uid = Some(value),
                "SUMMARY" => summary = Some(value),
                "DESCRIPTION" => description = Some(value),
                "LOCATION" => location = Some(value),
                "DTSTART" => dtstart = parse_datetime(&value, &params, tz),
                "DTEND" => dtend = parse_datetime(&value, &params, tz),
                "STATUS" => {
                    status = match value.as_str() {
                        "TENTATIVE" => EventStatus::Tentative,
                        "CANCELLED" => EventStatus::Cancelled,
                        _ => EventStatus::Confirmed,
                    };
                }
                "CLASS" => {
                    class = match value.as_str() {
                        "PRIVATE" => EventClass::Private,
                        "CONFIDENTIAL" => EventClass::Confidential,
                        _ => EventClass::Public,
                    };
                }
                _ => {}
            }
        }

        current_line = line.to_string();

        match line {
            "BEGIN:VEVENT" => in_vevent = true,
            "END:VEVENT" => in_vevent = false,
            "BEGIN:VALARM" => in_valarm = true,
            "END:VALARM" => in_valarm = false,
            _ => {}
        }
    }

    let uid = uid?;
    let start = dtstart?;
    let end = dtend.unwrap_or_else(|| start.clone());

    Some(Event {
        id: uid,
        summary: summary.unwrap_or_else(|| "(No title)".to_string()),
        description,
        location,
        start,
        end,
        status,
        class,
    })
}

/// Pull just the UID out of ICS content.
pub fn parse_uid(content: &str) -> Option<String> {
    content
        .lines()
        .find_map(|line| line.strip_prefix("UID:"))
        .map(|uid| uid.trim().to_string())
}

/// Split a property line into key, parameters, and unescaped value.
fn parse_property(line: &str) -> Option<(String, String, String)> {
    let colon = line.find(':')?;
    let key_part = &line[..colon];
    let value = &line[colon + 1..];

    let mut parts = key_part.splitn(2, ';');
    let key = parts.next()?.to_string();
    let params = parts.next().unwrap_or("").to_string();

    Some((key, params, unescape_value(value)))
}

/// Reverse RFC 5545 text escaping: \, \; \\ and \n (or \N).
fn unescape_value(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some(',') => result.push(','),
            Some(';') => result.push(';'),
            Some('\\') => result.push('\\'),
            Some('n') | Some('N') => result.push('\n'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}

/// Parse a DTSTART/DTEND value.
///
/// `YYYYMMDD` (or VALUE=DATE) is an all-day date. `YYYYMMDDTHHMMSSZ` is
/// UTC and gets converted into `tz`. A TZID parameter names the zone the
/// wall-clock value is in; an unrecognized TZID leaves the value floating,
/// as does a bare `YYYYMMDDTHHMMSS`.
fn parse_datetime(value: &str, params: &str, tz: Tz) -> Option<EventTime> {
    let is_date = params.contains("VALUE=DATE");

    if is_date || (value.len() == 8 && value.chars().all(|c| c.is_ascii_digit())) {
        let y = value.get(0..4)?.parse().ok()?;
        let m = value.get(4..6)?.parse().ok()?;
        let d = value.get(6..8)?.parse().ok()?;
        return Some(EventTime::Date(NaiveDate::from_ymd_opt(y, m, d)?));
    }

    if value.len() >= 15 && value.contains('T') {
        let y: i32 = value.get(0..4)?.parse().ok()?;
        let mo: u32 = value.get(4..6)?.parse().ok()?;
        let d: u32 = value.get(6..8)?.parse().ok()?;
        let h: u32 = value.get(9..11)?.parse().ok()?;
        let mi: u32 = value.get(11..13)?.parse().ok()?;
        let s: u32 = value.get(13..15)?.parse().ok()?;

        if value.ends_with('Z') {
            let instant = Utc.with_ymd_and_hms(y, mo, d, h, mi, s).single()?;
            return Some(EventTime::DateTime(instant.with_timezone(&tz).naive_local()));
        }

        if let Some(tzid) = params.split(';').find_map(|p| p.strip_prefix("TZID="))
            && let Ok(zone) = tzid.parse::<Tz>()
        {
            let instant = zone.with_ymd_and_hms(y, mo, d, h, mi, s).earliest()?;
            return Some(EventTime::DateTime(instant.with_timezone(&tz).naive_local()));
        }

        // Floating: already wall-clock time.
        let date = NaiveDate::from_ymd_opt(y, mo, d)?;
        return Some(EventTime::DateTime(date.and_hms_opt(h, mi, s)?));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(y: i32, m: u32, d: u32, h: u32, mi: u32) -> EventTime {
        EventTime::DateTime(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, mi, 0)
                .unwrap(),
        )
    }

    #[test]
    fn parses_a_basic_timed_event() {
        let ics = r#"BEGIN:VCALENDAR
VERSION:2.0
BEGIN:VEVENT
UID:abc-123
SUMMARY:Team Standup
LOCATION:Room 2
DTSTART:20240315T090000
DTEND:20240315T100000
END:VEVENT
END:VCALENDAR"#;

        let event = parse_event(ics, chrono_tz::UTC).expect("should parse");
        assert_eq!(event.id, "abc-123");
        assert_eq!(event.summary, "Team Standup");
        assert_eq!(event.location.as_deref(), Some("Room 2"));
        assert_eq!(event.start, naive(2024, 3, 15, 9, 0));
        assert_eq!(event.end, naive(2024, 3, 15, 10, 0));
        assert_eq!(event.status, EventStatus::Confirmed);
        assert_eq!(event.class, EventClass::Public);
        assert!(!event.is_all_day());
    }

    #[test]
    fn converts_utc_values_to_the_viewer_timezone() {
        let ics = r#"BEGIN:VCALENDAR
BEGIN:VEVENT
UID:utc-1
SUMMARY:Call
DTSTART:20240315T170000Z
DTEND:20240315T173000Z
END:VEVENT
END:VCALENDAR"#;

        // New York is UTC-4 in mid March 2024.
        let event = parse_event(ics, chrono_tz::America::New_York).expect("should parse");
        assert_eq!(event.start, naive(2024, 3, 15, 13, 0));
        assert_eq!(event.end, naive(2024, 3, 15, 13, 30));
    }

    #[test]
    fn honors_tzid_parameters() {
        let ics = r#"BEGIN:VCALENDAR
BEGIN:VEVENT
UID:tz-1
SUMMARY:Fika
DTSTART;TZID=Europe/Stockholm:20240315T090000
END:VEVENT
END:VCALENDAR"#;

        // Stockholm is UTC+1 in mid March 2024.
        let event = parse_event(ics, chrono_tz::UTC).expect("should parse");
        assert_eq!(event.start, naive(2024, 3, 15, 8, 0));
    }

    #[test]
    fn unknown_tzid_leaves_the_value_floating() {
        let ics = r#"BEGIN:VCALENDAR
BEGIN:VEVENT
UID:tz-2
SUMMARY:Somewhere
DTSTART;TZID=Mars/Olympus:20240315T090000
END:VEVENT
END:VCALENDAR"#;

        let event = parse_event(ics, chrono_tz::UTC).expect("should parse");
        assert_eq!(event.start, naive(2024, 3, 15, 9, 0));
    }

    #[test]
    fn date_values_become_all_day_events() {
        let ics = r#"BEGIN:VCALENDAR
BEGIN:VEVENT
UID:allday-1
SUMMARY:Book Fair
DTSTART;VALUE=DATE:20240315
DTEND;VALUE=DATE:20240316
END:VEVENT
END:VCALENDAR"#;

        let event = parse_event(ics, chrono_tz::UTC).expect("should parse");
        assert!(event.is_all_day());
        assert_eq!(event.start, EventTime::Date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()));

        // Same without the explicit parameter: a bare 8-digit value.
        let bare = ics.replace(";VALUE=DATE", "");
        let event = parse_event(&bare, chrono_tz::UTC).expect("should parse");
        assert!(event.is_all_day());
    }

    #[test]
    fn missing_end_falls_back_to_start() {
        let ics = r#"BEGIN:VCALENDAR
BEGIN:VEVENT
UID:noend-1
SUMMARY:Ping
DTSTART:20240315T090000
END:VEVENT
END:VCALENDAR"#;

        let event = parse_event(ics, chrono_tz::UTC).expect("should parse");
        assert_eq!(event.end, event.start);
    }

    #[test]
    fn missing_summary_gets_a_placeholder() {
        let ics = r#"BEGIN:VCALENDAR
BEGIN:VEVENT
UID:nosummary-1
DTSTART:20240315T090000
END:VEVENT
END:VCALENDAR"#;

        let event = parse_event(ics, chrono_tz::UTC).expect("should parse");
        assert_eq!(event.summary, "(No title)");
    }

    #[test]
    fn rejects_events_without_uid_or_start() {
        let no_uid = r#"BEGIN:VCALENDAR
BEGIN:VEVENT
SUMMARY:Mystery
DTSTART:20240315T090000
END:VEVENT
END:VCALENDAR"#;
        assert!(parse_event(no_uid, chrono_tz::UTC).is_none());

        let no_start = r#"BEGIN:VCALENDAR
BEGIN:VEVENT
UID:nostart-1
SUMMARY:Whenever
END:VEVENT
END:VCALENDAR"#;
        assert!(parse_event(no_start, chrono_tz::UTC).is_none());

        assert!(parse_event("", chrono_tz::UTC).is_none());
    }

    #[test]
    fn parses_status_and_class() {
        let ics = r#"BEGIN:VCALENDAR
BEGIN:VEVENT
UID:s-1
SUMMARY:Maybe
DTSTART:20240315T090000
STATUS:TENTATIVE
CLASS:PRIVATE
END:VEVENT
END:VCALENDAR"#;

        let event = parse_event(ics, chrono_tz::UTC).expect("should parse");
        assert_eq!(event.status, EventStatus::Tentative);
        assert_eq!(event.class, EventClass::Private);
        assert!(!event.class.is_public());
    }

    #[test]
    fn unfolds_continuation_lines() {
        let ics = "BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
UID:fold-1\r\n\
SUMMARY:Team \r\n standup and \r\n\tplanning\r\n\
DTSTART:20240315T090000\r\n\
END:VEVENT\r\n\
END:VCALENDAR";

        let event = parse_event(ics, chrono_tz::UTC).expect("should parse");
        assert_eq!(event.summary, "Team standup and planning");
    }

    #[test]
    fn unescapes_text_values() {
        let ics = r#"BEGIN:VCALENDAR
BEGIN:VEVENT
UID:esc-1
SUMMARY:Lunch\, maybe
DESCRIPTION:Agenda:\nbring slides\; bring coffee
DTSTART:20240315T120000
END:VEVENT
END:VCALENDAR"#;

        let event = parse_event(ics, chrono_tz::UTC).expect("should parse");
        assert_eq!(event.summary, "Lunch, maybe");
        assert_eq!(
            event.description.as_deref(),
            Some("Agenda:\nbring slides; bring coffee")
        );
    }

    #[test]
    fn alarm_properties_stay_out_of_the_event() {
        let ics = r#"BEGIN:VCALENDAR
BEGIN:VEVENT
UID:alarm-1
SUMMARY:Dentist
DTSTART:20240315T090000
BEGIN:VALARM
TRIGGER:-PT15M
ACTION:DISPLAY
DESCRIPTION:Reminder
END:VALARM
END:VEVENT
END:VCALENDAR"#;

        let event = parse_event(ics, chrono_tz::UTC).expect("should parse");
        assert_eq!(event.summary, "Dentist");
        assert!(event.description.is_none());
    }

    #[test]
    fn parse_uid_finds_the_uid_line() {
        let ics = "BEGIN:VCALENDAR\nBEGIN:VEVENT\nUID:the-uid\nEND:VEVENT\nEND:VCALENDAR";
        assert_eq!(parse_uid(ics).as_deref(), Some("the-uid"));
        assert!(parse_uid("BEGIN:VCALENDAR\nEND:VCALENDAR").is_none());
    }
}
