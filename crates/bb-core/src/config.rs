//! Configuration management
//!
//! Settings are resolved in the following order:
//! 1. Environment variables
//! 2. bb-gateway.toml configuration file
//! 3. Default values
//!
//! The defaults encode the canonical shop policy: 10:00-19:30 business
//! hours with 30-minute slots, in the America/Guayaquil zone.

use chrono::{Duration, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Business hours and slot policy for every venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessHours {
    /// Opening time of day (first bookable slot).
    #[serde(default = "default_opening")]
    pub opening: NaiveTime,

    /// Closing time of day. The closing boundary itself is a valid last
    /// slot start ("last appointment starts at closing"), not one past it.
    #[serde(default = "default_closing")]
    pub closing: NaiveTime,

    /// Slot granularity in minutes.
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,

    /// Appointment duration used when a booking does not specify one.
    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: u32,
}

fn default_opening() -> NaiveTime {
    NaiveTime::from_hms_opt(10, 0, 0).unwrap()
}

fn default_closing() -> NaiveTime {
    NaiveTime::from_hms_opt(19, 30, 0).unwrap()
}

fn default_slot_minutes() -> u32 {
    30
}

fn default_duration_minutes() -> u32 {
    60
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            opening: default_opening(),
            closing: default_closing(),
            slot_minutes: default_slot_minutes(),
            default_duration_minutes: default_duration_minutes(),
        }
    }
}

impl BusinessHours {
    /// Validate the invariants: opening before closing, nonzero step.
    pub fn validate(&self) -> Result<()> {
        if self.opening >= self.closing {
            return Err(Error::InvalidHours(format!(
                "opening {} is not before closing {}",
                self.opening, self.closing
            )));
        }
        if self.slot_minutes == 0 {
            return Err(Error::InvalidHours("slot_minutes must be nonzero".into()));
        }
        if self.default_duration_minutes == 0 {
            return Err(Error::InvalidHours(
                "default_duration_minutes must be nonzero".into(),
            ));
        }
        Ok(())
    }

    /// Candidate slot starts: opening, stepped by the granularity, keeping
    /// every boundary that lands on or before closing. The granularity
    /// does not have to divide the span evenly.
    pub fn slot_starts(&self) -> Vec<NaiveTime> {
        let step = Duration::minutes(self.slot_minutes as i64);
        let mut starts = Vec::new();
        let mut t = self.opening;
        while t <= self.closing {
            starts.push(t);
            let (next, wrapped) = t.overflowing_add_signed(step);
            if wrapped != 0 || next <= t {
                break;
            }
            t = next;
        }
        starts
    }

    /// Whether a requested start time falls inside business hours.
    /// Closing itself is an allowed start.
    pub fn allows_start(&self, time: NaiveTime) -> bool {
        time >= self.opening && time <= self.closing
    }
}

/// Calendar provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarSettings {
    /// REST API base URL.
    #[serde(default = "default_calendar_api_base")]
    pub api_base: String,

    /// Bearer token for the provider. Obtaining and refreshing the
    /// service-account token is a deployment concern, not handled here.
    #[serde(default, skip_serializing)]
    pub access_token: String,

    /// Local zone the shop operates in. Every slot boundary shifts with
    /// this value, so treat it as correctness-critical.
    #[serde(default = "default_time_zone")]
    pub time_zone: Tz,
}

fn default_calendar_api_base() -> String {
    "https://www.googleapis.com/calendar/v3".to_string()
}

fn default_time_zone() -> Tz {
    Tz::America__Guayaquil
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            api_base: default_calendar_api_base(),
            access_token: String::new(),
            time_zone: default_time_zone(),
        }
    }
}

/// Spreadsheet log settings. Logging is optional; with no spreadsheet id
/// configured the booking path skips the append entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsSettings {
    /// REST API base URL.
    #[serde(default = "default_sheets_api_base")]
    pub api_base: String,

    /// Bearer token for the Sheets API.
    #[serde(default, skip_serializing)]
    pub access_token: Option<String>,

    /// Target spreadsheet id.
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
}

fn default_sheets_api_base() -> String {
    "https://sheets.googleapis.com/v4".to_string()
}

impl Default for SheetsSettings {
    fn default() -> Self {
        Self {
            api_base: default_sheets_api_base(),
            access_token: None,
            spreadsheet_id: None,
        }
    }
}

impl SheetsSettings {
    /// Whether enough is configured to log bookings.
    pub fn enabled(&self) -> bool {
        self.spreadsheet_id.is_some() && self.access_token.is_some()
    }
}

/// HTTP serving settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Port for the HTTP API server.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

/// Main configuration for bb-gateway
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Calendar provider settings.
    #[serde(default)]
    pub calendar: CalendarSettings,

    /// Business hours and slot policy.
    #[serde(default)]
    pub hours: BusinessHours,

    /// Spreadsheet log settings.
    #[serde(default)]
    pub sheets: SheetsSettings,

    /// HTTP serving settings.
    #[serde(default)]
    pub server: ServerSettings,

    /// Optional path to a catalog TOML file replacing the built-in tables.
    #[serde(default)]
    pub catalog_file: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from the default locations, then apply
    /// environment overrides and validate.
    pub fn load() -> Result<Self> {
        let paths = ["bb-gateway.toml", "config/bb-gateway.toml"];

        let mut config = Self::default();
        for path in &paths {
            if Path::new(path).exists() {
                tracing::debug!("Loading configuration from {}", path);
                config = Self::from_file(path)?;
                break;
            }
        }

        config.apply_env()?;
        config.hours.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env(&mut self) -> Result<()> {
        if let Ok(token) = std::env::var("BB_CALENDAR_TOKEN") {
            self.calendar.access_token = token;
        }
        if let Ok(base) = std::env::var("BB_CALENDAR_API_BASE") {
            self.calendar.api_base = base;
        }
        if let Ok(zone) = std::env::var("BB_TIME_ZONE") {
            self.calendar.time_zone = zone
                .parse()
                .map_err(|_| Error::UnknownTimeZone(zone.clone()))?;
        }
        if let Ok(token) = std::env::var("BB_SHEETS_TOKEN") {
            self.sheets.access_token = Some(token);
        }
        if let Ok(id) = std::env::var("BB_SHEET_ID") {
            self.sheets.spreadsheet_id = Some(id);
        }
        if let Ok(port) = std::env::var("BB_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| Error::Config(format!("invalid BB_PORT: {}", port)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let hours = BusinessHours::default();
        assert_eq!(hours.opening, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        assert_eq!(hours.closing, NaiveTime::from_hms_opt(19, 30, 0).unwrap());
        assert_eq!(hours.slot_minutes, 30);
        assert!(hours.validate().is_ok());
    }

    #[test]
    fn test_slot_starts_cover_full_day() {
        let hours = BusinessHours::default();
        let starts = hours.slot_starts();

        // (19:30 - 10:00) / 30min + 1 = 20 candidates
        assert_eq!(starts.len(), 20);
        assert_eq!(starts[0], hours.opening);
        assert_eq!(*starts.last().unwrap(), hours.closing);

        for pair in starts.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::minutes(30));
        }
    }

    #[test]
    fn test_slot_starts_with_trailing_partial_step() {
        // 45-minute steps over 10:00-19:30 do not land on closing; the
        // last boundary at or before closing is kept.
        let hours = BusinessHours {
            slot_minutes: 45,
            ..Default::default()
        };
        let starts = hours.slot_starts();
        assert_eq!(starts[0], hours.opening);
        assert_eq!(
            *starts.last().unwrap(),
            NaiveTime::from_hms_opt(19, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_allows_start_boundaries() {
        let hours = BusinessHours::default();
        assert!(hours.allows_start(NaiveTime::from_hms_opt(10, 0, 0).unwrap()));
        assert!(hours.allows_start(NaiveTime::from_hms_opt(19, 30, 0).unwrap()));
        assert!(!hours.allows_start(NaiveTime::from_hms_opt(9, 59, 0).unwrap()));
        assert!(!hours.allows_start(NaiveTime::from_hms_opt(19, 31, 0).unwrap()));
    }

    #[test]
    fn test_invalid_hours_rejected() {
        let hours = BusinessHours {
            opening: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            ..Default::default()
        };
        assert!(hours.validate().is_err());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[hours]
opening = "09:00:00"
closing = "18:00:00"
slot_minutes = 20

[calendar]
time_zone = "America/Guayaquil"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.hours.opening,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        assert_eq!(config.hours.slot_minutes, 20);
        assert_eq!(config.hours.default_duration_minutes, 60); // default kept
        assert_eq!(config.calendar.time_zone, Tz::America__Guayaquil);
    }
}
