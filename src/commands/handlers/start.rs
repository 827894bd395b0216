//! Welcome command handler
//!
//! Handles: start
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use async_trait::async_trait;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandInvocation, SlashCommandHandler};
use crate::core::BotResult;
use crate::features::get_bot_version;

/// Handler for /start
pub struct StartHandler;

#[async_trait]
impl SlashCommandHandler for StartHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["start"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        _invocation: &CommandInvocation,
    ) -> BotResult<String> {
        let uptime = ctx.start_time.elapsed().as_secs();
        Ok(format!(
            "🌱 **Welcome to H2Grow!**\n\n\
             I can help you to give and manage reminders to water the community garden.\n\n\
             You can control me by sending these commands:\n\n\
             **Reminders**:\n\
             /showreminder - Show reminder time\n\
             /editreminder - Edit reminder time\n\
             /send_reminder - Send today's reminder now\n\n\
             **Roster**:\n\
             /showroster - Show roster\n\
             /editroster - Edit roster\n\n\
             **Weather**:\n\
             /forecast - View weather forecast\n\n\
             _v{} · up {}h {}m_",
            get_bot_version(),
            uptime / 3600,
            (uptime % 3600) / 60
        ))
    }
}
