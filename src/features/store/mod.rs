//! # Feature: Reminder Store
//!
//! Persists the daily reminder time and the watering roster. Three backends
//! share the [`ReminderStore`] trait: process memory, Firebase Realtime
//! Database, and a local sqlite document table.
//!
//! Document layout (all backends):
//! - `reminder`: `"HH:MM"`
//! - `roster`: seven lowercase day names mapped to display names
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Add sqlite backend
//! - 1.1.0: Add Firebase backend, lowercase day keys
//! - 1.0.0: Initial in-memory store with 08:00 default

pub mod firebase;
pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use chrono::{NaiveTime, Timelike};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

use crate::core::StoreBackend;

pub use firebase::FirebaseStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub const REMINDER_KEY: &str = "reminder";
pub const ROSTER_KEY: &str = "roster";

/// Placeholder for a day nobody has been assigned to
pub const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Store returned status {0}")]
    Status(u16),
    #[error("Malformed value under '{key}': {reason}")]
    Malformed { key: String, reason: String },
    #[error("Database error: {0}")]
    Database(#[from] ::sqlite::Error),
}

impl StoreError {
    pub(crate) fn malformed(key: &str, reason: impl ToString) -> Self {
        StoreError::Malformed {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Wall-clock time of the daily broadcast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReminderTime {
    hour: u8,
    minute: u8,
}

impl ReminderTime {
    pub const DEFAULT: ReminderTime = ReminderTime { hour: 8, minute: 0 };

    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(ReminderTime { hour, minute })
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour.into(), self.minute.into(), 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl Default for ReminderTime {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time '{0}', expected HH:MM in 24-hour format")]
pub struct ParseTimeError(String);

impl FromStr for ReminderTime {
    type Err = ParseTimeError;

    /// Parses 24-hour `HH:MM`; a single-digit hour is accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map_err(|_| ParseTimeError(s.to_string()))?;
        // Both fields come from a validated NaiveTime
        Ok(ReminderTime {
            hour: parsed.hour() as u8,
            minute: parsed.minute() as u8,
        })
    }
}

/// Roster day key, ordered Monday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Lowercase storage key
    pub fn key(&self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl From<chrono::Weekday> for Day {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => Day::Monday,
            chrono::Weekday::Tue => Day::Tuesday,
            chrono::Weekday::Wed => Day::Wednesday,
            chrono::Weekday::Thu => Day::Thursday,
            chrono::Weekday::Fri => Day::Friday,
            chrono::Weekday::Sat => Day::Saturday,
            chrono::Weekday::Sun => Day::Sunday,
        }
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid day '{0}'")]
pub struct ParseDayError(String);

impl FromStr for Day {
    type Err = ParseDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Day::ALL
            .into_iter()
            .find(|day| day.key() == lowered)
            .ok_or_else(|| ParseDayError(s.to_string()))
    }
}

/// Day to person mapping; all seven days are always present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    entries: BTreeMap<Day, String>,
}

impl Roster {
    /// Roster with every day unassigned
    pub fn new() -> Self {
        Self::from_entries(std::iter::empty::<(Day, String)>())
    }

    /// Build from partial entries; missing days become [`UNASSIGNED`]
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Day, S)>,
        S: Into<String>,
    {
        let mut map: BTreeMap<Day, String> = Day::ALL
            .into_iter()
            .map(|day| (day, UNASSIGNED.to_string()))
            .collect();
        for (day, name) in entries {
            map.insert(day, name.into());
        }
        Roster { entries: map }
    }

    pub fn get(&self, day: Day) -> &str {
        self.entries.get(&day).map(String::as_str).unwrap_or(UNASSIGNED)
    }

    pub fn set(&mut self, day: Day, name: impl Into<String>) {
        self.entries.insert(day, name.into());
    }

    /// Entries Monday through Sunday
    pub fn iter(&self) -> impl Iterator<Item = (Day, &str)> {
        self.entries.iter().map(|(day, name)| (*day, name.as_str()))
    }

    /// Decode the stored document; unknown keys are ignored
    pub fn from_document(document: BTreeMap<String, String>) -> Self {
        Self::from_entries(
            document
                .into_iter()
                .filter_map(|(key, name)| key.parse::<Day>().ok().map(|day| (day, name))),
        )
    }

    pub fn to_document(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(day, name)| (day.key().to_string(), name.clone()))
            .collect()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

/// Persistence of reminder time and roster.
///
/// No validation happens here: callers hand over already-parsed values.
/// Writes are last-writer-wins.
#[async_trait]
pub trait ReminderStore: Send + Sync {
    async fn get_time(&self) -> Result<ReminderTime, StoreError>;

    async fn set_time(&self, time: ReminderTime) -> Result<(), StoreError>;

    async fn get_roster(&self) -> Result<Roster, StoreError>;

    /// Update a single day, leaving the other six untouched
    async fn set_roster(&self, day: Day, name: &str) -> Result<(), StoreError>;
}

/// Decode a stored `"HH:MM"` value
pub(crate) fn decode_time(raw: &str) -> Result<ReminderTime, StoreError> {
    raw.parse::<ReminderTime>()
        .map_err(|e| StoreError::malformed(REMINDER_KEY, e))
}

/// Open the configured backend
pub fn open_store(backend: &StoreBackend) -> Result<Arc<dyn ReminderStore>, StoreError> {
    let store: Arc<dyn ReminderStore> = match backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Firebase { database_url, auth } => {
            Arc::new(FirebaseStore::new(database_url.clone(), auth.clone())?)
        }
        StoreBackend::Sqlite { path } => Arc::new(SqliteStore::open(path)?),
    };
    Ok(store)
}
