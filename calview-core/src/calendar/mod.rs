//! Calendar directory management.
//!
//! A calendar is a directory of .ics files, one event per file. Reading is
//! forgiving (files that fail to parse are skipped); writing picks
//! filenames that never clobber another event.

mod event;

pub use event::CalendarEvent;

use std::fmt;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;

use crate::error::{CalviewError, CalviewResult};
use crate::event::Event;
use crate::ics;

#[derive(Debug, Clone)]
pub struct Calendar {
    pub slug: String,
    pub path: PathBuf,
}

impl Calendar {
    pub fn new(slug: &str, path: PathBuf) -> Self {
        Calendar { slug: slug.to_string(), path }
    }

    /// Load all events in this calendar, converted into `tz`.
    pub fn events(&self, tz: Tz) -> CalviewResult<Vec<Event>> {
        let entries = std::fs::read_dir(&self.path)?;

        let events = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|e| e == "ics"))
            .filter_map(|path| CalendarEvent::from_file(path, tz).ok())
            .map(|stored| stored.event)
            .collect();

        Ok(events)
    }

    /// Write a new event into this calendar.
    pub fn create_event(&self, event: Event) -> CalviewResult<CalendarEvent> {
        std::fs::create_dir_all(&self.path)?;

        let path = self.unique_event_path(&event)?;
        let stored = CalendarEvent::new(path, event);
        stored.save()?;

        Ok(stored)
    }

    /// Find a filename for the event. A file already holding this event's
    /// UID is reused, so saving the same event twice overwrites instead of
    /// duplicating; unrelated collisions get numbered suffixes.
    fn unique_event_path(&self, event: &Event) -> CalviewResult<PathBuf> {
        let base = ics::generate_filename(event);
        let stem = base.strip_suffix(".ics").unwrap_or(&base).to_string();

        let candidate = self.path.join(&base);
        if claimable(&candidate, &event.id)? {
            return Ok(candidate);
        }

        // Collision - try suffixes
        for n in 2..=100 {
            let candidate = self.path.join(format!("{stem}-{n}.ics"));
            if claimable(&candidate, &event.id)? {
                return Ok(candidate);
            }
        }

        Err(CalviewError::Config(format!(
            "Too many filename collisions for '{}'",
            base
        )))
    }
}

fn claimable(path: &Path, uid: &str) -> CalviewResult<bool> {
    if !path.exists() {
        return Ok(true);
    }
    let content = std::fs::read_to_string(path)?;
    Ok(ics::parse_uid(&content).as_deref() == Some(uid))
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.slug)
    }
}
