//! Calview root directory management.

use std::path::PathBuf;

use chrono_tz::Tz;
use config::{Config, File};

use crate::calendar::Calendar;
use crate::calview_config::CalviewConfig;
use crate::error::{CalviewError, CalviewResult};

#[derive(Clone)]
pub struct Calview {
    config: CalviewConfig,
}

impl Calview {
    pub fn load() -> CalviewResult<Self> {
        let config_path = CalviewConfig::config_path()?;

        if !config_path.exists() {
            CalviewConfig::create_default_config(&config_path)?;
        }

        let config: CalviewConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| CalviewError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalviewError::Config(e.to_string()))?;

        Ok(Calview { config })
    }

    pub fn data_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.config.calendar_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Returns the calendar directory path in display-friendly form,
    /// keeping `~` instead of expanding to the full home directory.
    pub fn display_path(&self) -> PathBuf {
        self.config.calendar_dir.clone()
    }

    /// Discover calendars by scanning calendar_dir for subdirectories.
    pub fn calendars(&self) -> Vec<Calendar> {
        let data_path = self.data_path();

        let Ok(entries) = std::fs::read_dir(&data_path) else {
            return Vec::new();
        };

        let mut calendars: Vec<Calendar> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .filter_map(|path| {
                let name = path.file_name().and_then(|n| n.to_str())?;
                if name.starts_with('.') {
                    return None;
                }
                Some(Calendar::new(name, path.clone()))
            })
            .collect();

        calendars.sort_by(|a, b| a.slug.cmp(&b.slug));
        calendars
    }

    pub fn default_calendar(&self) -> Option<Calendar> {
        let name = self.config.default_calendar.as_ref()?;
        self.calendars().into_iter().find(|c| &c.slug == name)
    }

    /// Make `slug` the default calendar for new events.
    pub fn set_default_calendar(&mut self, slug: &str) -> CalviewResult<()> {
        if !self.calendars().iter().any(|c| c.slug == slug) {
            return Err(CalviewError::CalendarNotFound(slug.to_string()));
        }
        self.config.default_calendar = Some(slug.to_string());
        self.config.save()
    }

    /// The timezone events are viewed in.
    pub fn timezone(&self) -> CalviewResult<Tz> {
        self.config.resolve_timezone()
    }

    /// How many events one grid cell shows before overflowing.
    pub fn max_per_cell(&self) -> usize {
        self.config.max_per_cell
    }

    /// First and last hour row of the week and day views.
    pub fn hour_span(&self) -> (u32, u32) {
        (self.config.day_start_hour, self.config.day_end_hour)
    }
}
