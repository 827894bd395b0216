//! Forecast command handler
//!
//! Handles: forecast
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Append watering advice; report fetch failures instead of dropping the reply
//! - 1.0.0: Initial implementation

use async_trait::async_trait;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandInvocation, SlashCommandHandler};
use crate::core::BotResult;
use crate::features::notifier::{compose_forecast, format_date};

/// Handler for /forecast
pub struct ForecastHandler;

#[async_trait]
impl SlashCommandHandler for ForecastHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["forecast"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &CommandInvocation,
    ) -> BotResult<String> {
        let forecast = ctx.fetcher.fetch_forecast().await?;
        info!(
            "[{}] 🌦️ Forecast fetched | Text: {forecast}",
            invocation.request_id
        );
        Ok(compose_forecast(&format_date(Utc::now(), ctx.timezone()), &forecast))
    }
}
