//! Roster command handlers
//!
//! Handles: showroster, editroster
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.1.0: Multi-word names, case-insensitive day names
//! - 1.0.0: Initial implementation

use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandInvocation, SlashCommandHandler};
use crate::core::{BotError, BotResult};
use crate::features::store::Day;

const EDIT_USAGE: &str = "📝 Usage: /editroster <day> <name>\nExample: /editroster monday Alice Tan";

/// Handler for roster commands
pub struct RosterHandler;

#[async_trait]
impl SlashCommandHandler for RosterHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["showroster", "editroster"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &CommandInvocation,
    ) -> BotResult<String> {
        match invocation.name.as_str() {
            "showroster" => self.handle_show(&ctx).await,
            "editroster" => self.handle_edit(&ctx, invocation).await,
            other => Err(BotError::user_input(format!("❓ Unknown command `/{other}`."))),
        }
    }
}

impl RosterHandler {
    async fn handle_show(&self, ctx: &CommandContext) -> BotResult<String> {
        let roster = ctx.store.get_roster().await?;
        let mut reply = String::from("📋 **Watering Roster**\n");
        for (day, name) in roster.iter() {
            reply.push_str(&format!("\n**{day}:** {name}"));
        }
        Ok(reply)
    }

    /// Handle /editroster <day> <name...>
    async fn handle_edit(
        &self,
        ctx: &CommandContext,
        invocation: &CommandInvocation,
    ) -> BotResult<String> {
        let [day_str, name_parts @ ..] = invocation.args.as_slice() else {
            return Err(BotError::user_input(EDIT_USAGE));
        };
        if name_parts.is_empty() {
            return Err(BotError::user_input(EDIT_USAGE));
        }

        let day: Day = day_str.parse().map_err(|_| {
            BotError::user_input(format!(
                "❌ Invalid day '{day_str}'! Please use a day of the week, e.g. monday."
            ))
        })?;
        let name = name_parts.join(" ");

        let _guard = ctx.lock_edits().await;
        ctx.store.set_roster(day, &name).await?;

        info!(
            "[{}] 📋 Roster {} set to '{name}' by {}",
            invocation.request_id,
            day.key(),
            invocation.user_id
        );
        Ok(format!("✅ {day} roster updated to {name}!"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::handlers::test_support::test_context_with_store;
    use crate::commands::CommandRegistry;
    use crate::features::store::{MemoryStore, ReminderTime, Roster};

    fn seeded_roster() -> Roster {
        Roster::from_entries([
            (Day::Monday, "Alice"),
            (Day::Tuesday, "Ben"),
            (Day::Friday, "Chitra"),
        ])
    }

    async fn seeded_context() -> Arc<CommandContext> {
        let store = Arc::new(MemoryStore::with_state(ReminderTime::DEFAULT, seeded_roster()));
        test_context_with_store("http://127.0.0.1:9", store).await.0
    }

    async fn run(ctx: &Arc<CommandContext>, text: &str) -> BotResult<String> {
        CommandRegistry::with_default_handlers()
            .dispatch(ctx.clone(), &CommandInvocation::parse(text).unwrap())
            .await
    }

    #[tokio::test]
    async fn test_edit_changes_only_that_day() {
        let ctx = seeded_context().await;

        let reply = run(&ctx, "/editroster monday Bob Lee").await.unwrap();
        assert_eq!(reply, "✅ Monday roster updated to Bob Lee!");

        let mut expected = seeded_roster();
        expected.set(Day::Monday, "Bob Lee");
        assert_eq!(ctx.store.get_roster().await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_day_is_case_insensitive() {
        let ctx = seeded_context().await;
        run(&ctx, "/editroster SUNDAY Dana").await.unwrap();
        assert_eq!(ctx.store.get_roster().await.unwrap().get(Day::Sunday), "Dana");
    }

    #[tokio::test]
    async fn test_invalid_day_leaves_roster_unchanged() {
        let ctx = seeded_context().await;

        let err = run(&ctx, "/editroster funday Bob").await.unwrap_err();
        assert!(err.is_user_input());
        assert!(err.user_message().contains("Invalid day"));
        assert_eq!(ctx.store.get_roster().await.unwrap(), seeded_roster());
    }

    #[tokio::test]
    async fn test_missing_name_shows_usage() {
        let ctx = seeded_context().await;

        for text in ["/editroster", "/editroster monday"] {
            let err = run(&ctx, text).await.unwrap_err();
            assert_eq!(err.user_message(), EDIT_USAGE);
        }
        assert_eq!(ctx.store.get_roster().await.unwrap(), seeded_roster());
    }

    #[tokio::test]
    async fn test_show_lists_all_seven_days() {
        let ctx = seeded_context().await;
        let reply = run(&ctx, "/showroster").await.unwrap();

        assert!(reply.contains("**Monday:** Alice"));
        assert!(reply.contains("**Sunday:** Unassigned"));
        assert_eq!(reply.matches("\n**").count(), 7);
    }
}
