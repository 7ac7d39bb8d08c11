//! Local event representation with file metadata.

use std::path::PathBuf;

use chrono_tz::Tz;

use crate::error::{CalviewError, CalviewResult};
use crate::event::Event;
use crate::ics::{generate_ics, parse_event};

/// A stored calendar event (one .ics file)
#[derive(Debug, Clone)]
pub struct CalendarEvent {
    pub event: Event,
    pub path: PathBuf,
}

impl CalendarEvent {
    pub fn new(path: PathBuf, event: Event) -> Self {
        CalendarEvent { path, event }
    }

    pub fn from_file(path: PathBuf, tz: Tz) -> CalviewResult<Self> {
        let content = std::fs::read_to_string(&path)?;

        let event = parse_event(&content, tz).ok_or_else(|| {
            CalviewError::IcsParse(format!("Failed to parse event from {}", path.display()))
        })?;

        Ok(CalendarEvent { path, event })
    }

    pub fn save(&self) -> CalviewResult<()> {
        std::fs::write(&self.path, generate_ics(&self.event))?;
        Ok(())
    }
}
