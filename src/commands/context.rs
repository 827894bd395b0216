//! Shared context for command handlers
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Add edit lock serializing roster and reminder mutations
//! - 1.0.0: Initial implementation with core shared state

use chrono_tz::Tz;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use crate::features::notifier::DailyReminder;
use crate::features::scheduler::JobScheduler;
use crate::features::store::ReminderStore;
use crate::features::weather::ForecastFetcher;

/// Shared context for all command handlers
///
/// Contains the services every handler may need:
/// - the reminder store (time + roster)
/// - the forecast fetcher
/// - the job scheduler owning `daily_reminder`
/// - the daily reminder task, for rescheduling and `/send_reminder`
/// - an edit lock so mutations happen one at a time
/// - bot start time for uptime reporting
#[derive(Clone)]
pub struct CommandContext {
    pub store: Arc<dyn ReminderStore>,
    pub fetcher: ForecastFetcher,
    pub scheduler: Arc<JobScheduler>,
    pub daily_reminder: Arc<DailyReminder>,
    edit_lock: Arc<Mutex<()>>,
    pub start_time: std::time::Instant,
}

impl CommandContext {
    pub fn new(
        store: Arc<dyn ReminderStore>,
        fetcher: ForecastFetcher,
        scheduler: Arc<JobScheduler>,
        daily_reminder: Arc<DailyReminder>,
    ) -> Self {
        Self {
            store,
            fetcher,
            scheduler,
            daily_reminder,
            edit_lock: Arc::new(Mutex::new(())),
            start_time: std::time::Instant::now(),
        }
    }

    pub fn timezone(&self) -> Tz {
        self.scheduler.timezone()
    }

    /// Hold while mutating shared garden state
    pub async fn lock_edits(&self) -> MutexGuard<'_, ()> {
        self.edit_lock.lock().await
    }
}
