// Core layer - shared types and configuration
pub mod core;

// Features layer - weather, store, scheduler, notifier
pub mod features;

// Application layer - command dispatch
pub mod commands;

pub use core::{BotError, BotResult, Config};

pub use features::{
    // Notifier
    Broadcaster, DailyReminder, DiscordBroadcaster,
    // Scheduler
    JobScheduler, ScheduledTask,
    // Store
    Day, ReminderStore, ReminderTime, Roster,
    // Weather
    ForecastCategory, ForecastFetcher,
};
