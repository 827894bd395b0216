//! # Feature: Notifier
//!
//! Composes the daily watering reminder and the forecast reply, and posts
//! broadcasts to the garden channel.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Forecast failures degrade to a fallback line instead of aborting the broadcast
//! - 1.1.0: Add on-duty line from the roster
//! - 1.0.0: Initial release with date, forecast and advice

pub mod broadcaster;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use log::{error, info, warn};
use std::sync::Arc;

use crate::features::scheduler::ScheduledTask;
use crate::features::store::{Day, ReminderStore, UNASSIGNED};
use crate::features::weather::{ForecastCategory, ForecastFetcher};

pub use broadcaster::{BroadcastError, Broadcaster, DiscordBroadcaster};

const SEPARATOR: &str = "━━━━━━━━━━━━━━━━━━━━";
const UNAVAILABLE: &str = "unavailable";

/// e.g. "Saturday, 01 March 2025"
pub fn format_date(now: DateTime<Utc>, tz: Tz) -> String {
    now.with_timezone(&tz).format("%A, %d %B %Y").to_string()
}

/// Roster day for `now` in `tz`
pub fn today(now: DateTime<Utc>, tz: Tz) -> Day {
    Day::from(now.with_timezone(&tz).weekday())
}

fn advice_for(forecast: Option<&str>) -> &'static str {
    forecast
        .map(ForecastCategory::classify)
        .unwrap_or(ForecastCategory::Unknown)
        .advice()
}

/// Broadcast body; `forecast` is `None` when the weather API failed
pub fn compose_daily_reminder(date: &str, on_duty: Option<&str>, forecast: Option<&str>) -> String {
    let mut message = format!("{SEPARATOR}\n📅 **{date}**\n");
    if let Some(name) = on_duty {
        message.push_str(&format!("👩‍🌾 **On duty:** {name}\n"));
    }
    message.push_str(&format!(
        "☁️ **Weather Forecast:** {}\n{SEPARATOR}\n\n{}\n\n🌍 **Sustainable Gardening Together!** 🌱",
        forecast.unwrap_or(UNAVAILABLE),
        advice_for(forecast)
    ));
    message
}

/// Reply to `/forecast`
pub fn compose_forecast(date: &str, forecast: &str) -> String {
    format!(
        "**24-Hour Weather Forecast**\n\n📅 **{date}**\n☁️ **Weather Forecast:** {forecast}\n\n{}",
        advice_for(Some(forecast))
    )
}

/// The daily broadcast job
pub struct DailyReminder {
    store: Arc<dyn ReminderStore>,
    fetcher: ForecastFetcher,
    broadcaster: Arc<dyn Broadcaster>,
    tz: Tz,
}

impl DailyReminder {
    pub fn new(
        store: Arc<dyn ReminderStore>,
        fetcher: ForecastFetcher,
        broadcaster: Arc<dyn Broadcaster>,
        tz: Tz,
    ) -> Self {
        Self {
            store,
            fetcher,
            broadcaster,
            tz,
        }
    }

    /// Build the reminder for `now`. Store and weather failures are logged
    /// and replaced by fallbacks.
    pub async fn compose(&self, now: DateTime<Utc>) -> String {
        let day = today(now, self.tz);
        let on_duty = match self.store.get_roster().await {
            Ok(roster) => Some(roster.get(day).to_string()).filter(|name| name != UNASSIGNED),
            Err(e) => {
                warn!("Roster unavailable for daily reminder: {e}");
                None
            }
        };

        let forecast = match self.fetcher.fetch_forecast().await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Forecast unavailable for daily reminder: {e}");
                None
            }
        };

        compose_daily_reminder(
            &format_date(now, self.tz),
            on_duty.as_deref(),
            forecast.as_deref(),
        )
    }

    pub async fn send(&self) -> Result<(), BroadcastError> {
        let message = self.compose(Utc::now()).await;
        self.broadcaster.broadcast(&message).await?;
        info!("✅ Daily reminder sent.");
        Ok(())
    }
}

#[async_trait]
impl ScheduledTask for DailyReminder {
    async fn run(&self) {
        if let Err(e) = self.send().await {
            error!("Failed to broadcast daily reminder: {e}");
        }
    }
}
