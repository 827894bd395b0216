//! # Features
//!
//! Garden bot feature modules, leaves first: weather classification and
//! fetching, persistence, the daily job scheduler, and the notifier that ties
//! them together.

pub mod notifier;
pub mod scheduler;
pub mod store;
pub mod weather;

pub use notifier::{Broadcaster, DailyReminder, DiscordBroadcaster};
pub use scheduler::{JobScheduler, ScheduledTask, SchedulerError};
pub use store::{open_store, Day, ReminderStore, ReminderTime, Roster, StoreError};
pub use weather::{FetchError, ForecastCategory, ForecastFetcher};

/// Bot version reported by `/start`
pub fn get_bot_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
