//! Per-command handler implementations
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 3.0.0: Garden commands (start, reminder, roster, forecast)
//! - 1.0.0: Initial extraction from monolithic command handler

pub mod forecast;
pub mod reminder;
pub mod roster;
pub mod start;

use std::sync::Arc;

use super::handler::SlashCommandHandler;

/// Create all registered command handlers
///
/// Returns a vector of handlers ready to be registered with CommandRegistry.
pub fn create_all_handlers() -> Vec<Arc<dyn SlashCommandHandler>> {
    vec![
        Arc::new(start::StartHandler),
        Arc::new(reminder::ReminderHandler),
        Arc::new(roster::RosterHandler),
        Arc::new(forecast::ForecastHandler),
    ]
}
