//! # Core Module
//!
//! Configuration, the error taxonomy, and Discord reply limits shared by every
//! feature of the garden bot.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add typed `BotError` taxonomy replacing ad hoc anyhow errors in handlers
//! - 1.0.0: Initial creation with config and response modules

pub mod config;
pub mod error;
pub mod response;

// Re-export commonly used items
pub use config::{Config, StoreBackend};
pub use error::{BotError, BotResult};
pub use response::{truncate_for_message, MESSAGE_LIMIT};

/// Timezone used for all scheduling and date display
pub const GARDEN_TZ: chrono_tz::Tz = chrono_tz::Asia::Kuala_Lumpur;

/// Name of the single recurring broadcast job
pub const DAILY_REMINDER_JOB: &str = "daily_reminder";
