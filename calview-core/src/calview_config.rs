//! Global calview configuration.

use std::path::PathBuf;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{CalviewError, CalviewResult};
use crate::grid::bucket::DEFAULT_MAX_PER_CELL;

static DEFAULT_CALVIEW_PATH: &str = "~/calendar";

fn default_calview_path() -> PathBuf {
    PathBuf::from(DEFAULT_CALVIEW_PATH)
}

fn is_default_calview_path(p: &PathBuf) -> bool {
    *p == default_calview_path()
}

fn default_max_per_cell() -> usize {
    DEFAULT_MAX_PER_CELL
}

fn is_default_max_per_cell(n: &usize) -> bool {
    *n == default_max_per_cell()
}

fn default_day_start_hour() -> u32 {
    0
}

fn is_default_day_start_hour(h: &u32) -> bool {
    *h == default_day_start_hour()
}

fn default_day_end_hour() -> u32 {
    23
}

fn is_default_day_end_hour(h: &u32) -> bool {
    *h == default_day_end_hour()
}

/// Global configuration at ~/.config/calview/config.toml
#[derive(Serialize, Deserialize, Clone)]
pub struct CalviewConfig {
    #[serde(default = "default_calview_path", skip_serializing_if = "is_default_calview_path")]
    pub calendar_dir: PathBuf,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_calendar: Option<String>,

    /// IANA zone name; the system timezone applies when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default = "default_max_per_cell", skip_serializing_if = "is_default_max_per_cell")]
    pub max_per_cell: usize,

    #[serde(
        default = "default_day_start_hour",
        skip_serializing_if = "is_default_day_start_hour"
    )]
    pub day_start_hour: u32,

    #[serde(default = "default_day_end_hour", skip_serializing_if = "is_default_day_end_hour")]
    pub day_end_hour: u32,
}

impl CalviewConfig {
    pub fn config_path() -> CalviewResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalviewError::Config("Could not determine config directory".into()))?
            .join("calview");

        Ok(config_dir.join("config.toml"))
    }

    /// Save the current config to ~/.config/calview/config.toml
    pub fn save(&self) -> CalviewResult<()> {
        let config_path = Self::config_path()?;

        let content =
            toml::to_string_pretty(self).map_err(|e| CalviewError::Config(e.to_string()))?;

        std::fs::write(&config_path, content)
            .map_err(|e| CalviewError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &std::path::Path) -> CalviewResult<()> {
        let contents = format!(
            "\
# calview configuration

# Where your calendars live:
# calendar_dir = \"{}\"

# Default calendar for new events:
# default_calendar = \"personal\"

# Timezone events are shown in (IANA name, system zone when unset):
# timezone = \"Europe/Stockholm\"

# Most events shown in one grid cell:
# max_per_cell = {}

# First and last hour row of the week and day views:
# day_start_hour = 8
# day_end_hour = 20
",
            DEFAULT_CALVIEW_PATH, DEFAULT_MAX_PER_CELL
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalviewError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalviewError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// The timezone events are viewed in: the configured zone when set,
    /// otherwise the system zone, otherwise UTC.
    pub fn resolve_timezone(&self) -> CalviewResult<Tz> {
        if let Some(ref name) = self.timezone {
            return name
                .parse()
                .map_err(|_| CalviewError::Config(format!("Unknown timezone '{name}' in config")));
        }

        let system = iana_time_zone::get_timezone()
            .ok()
            .and_then(|name| name.parse().ok());

        Ok(system.unwrap_or(chrono_tz::UTC))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: CalviewConfig = toml::from_str("").unwrap();
        assert_eq!(config.calendar_dir, PathBuf::from("~/calendar"));
        assert!(config.default_calendar.is_none());
        assert!(config.timezone.is_none());
        assert_eq!(config.max_per_cell, DEFAULT_MAX_PER_CELL);
        assert_eq!(config.day_start_hour, 0);
        assert_eq!(config.day_end_hour, 23);
    }

    #[test]
    fn default_values_stay_out_of_the_serialized_config() {
        let mut config: CalviewConfig = toml::from_str("").unwrap();
        config.default_calendar = Some("personal".to_string());

        let serialized = toml::to_string_pretty(&config).unwrap();
        assert_eq!(serialized, "default_calendar = \"personal\"\n");
    }

    #[test]
    fn configured_values_round_trip() {
        let config: CalviewConfig = toml::from_str(
            r#"
calendar_dir = "~/cal"
timezone = "Europe/Stockholm"
max_per_cell = 3
day_start_hour = 8
day_end_hour = 20
"#,
        )
        .unwrap();
        assert_eq!(config.max_per_cell, 3);
        assert_eq!((config.day_start_hour, config.day_end_hour), (8, 20));

        let serialized = toml::to_string_pretty(&config).unwrap();
        let reparsed: CalviewConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(reparsed.calendar_dir, PathBuf::from("~/cal"));
        assert_eq!(reparsed.timezone.as_deref(), Some("Europe/Stockholm"));
    }

    #[test]
    fn timezone_resolution() {
        let mut config: CalviewConfig = toml::from_str("").unwrap();

        config.timezone = Some("Europe/Stockholm".to_string());
        assert_eq!(config.resolve_timezone().unwrap(), chrono_tz::Europe::Stockholm);

        config.timezone = Some("Atlantis/Somewhere".to_string());
        assert!(matches!(
            config.resolve_timezone(),
            Err(CalviewError::Config(_))
        ));

        // Unset falls back to the system zone or UTC, never errors.
        config.timezone = None;
        assert!(config.resolve_timezone().is_ok());
    }
}
