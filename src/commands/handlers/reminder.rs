//! Reminder command handlers
//!
//! Handles: showreminder, editreminder, send_reminder
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: editreminder persists and reschedules under the edit lock
//! - 1.1.0: Add send_reminder for on-demand broadcasts
//! - 1.0.0: Initial implementation

use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandInvocation, SlashCommandHandler};
use crate::core::{BotError, BotResult, DAILY_REMINDER_JOB};
use crate::features::store::ReminderTime;

const EDIT_USAGE: &str = "⏰ Usage: /editreminder HH:MM (24-hour format)";
const INVALID_TIME: &str = "❌ Invalid format! Please use HH:MM in 24-hour format.";

/// Handler for reminder-related commands
pub struct ReminderHandler;

#[async_trait]
impl SlashCommandHandler for ReminderHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["showreminder", "editreminder", "send_reminder"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &CommandInvocation,
    ) -> BotResult<String> {
        match invocation.name.as_str() {
            "showreminder" => self.handle_show(&ctx).await,
            "editreminder" => self.handle_edit(&ctx, invocation).await,
            "send_reminder" => self.handle_send(&ctx, invocation).await,
            other => Err(BotError::user_input(format!("❓ Unknown command `/{other}`."))),
        }
    }
}

impl ReminderHandler {
    /// Handle /showreminder - stored time plus what the scheduler holds
    async fn handle_show(&self, ctx: &CommandContext) -> BotResult<String> {
        let time = ctx.store.get_time().await?;
        let mut reply = format!("⏰ Daily reminder is set for **{time}** ({}).", ctx.timezone());

        match ctx.scheduler.scheduled_time(DAILY_REMINDER_JOB) {
            Some(scheduled) if scheduled == time => {
                if let Some(next) = ctx.scheduler.next_run(DAILY_REMINDER_JOB) {
                    reply.push_str(&format!(
                        "\nNext reminder: {}",
                        next.with_timezone(&ctx.timezone()).format("%A, %d %B %Y %H:%M")
                    ));
                }
            }
            Some(scheduled) => {
                warn!("Stored reminder {time} differs from scheduled job at {scheduled}");
                reply.push_str(&format!(
                    "\n⚠️ The running job is still set for {scheduled}. Run /editreminder to fix it."
                ));
            }
            None => {
                reply.push_str("\n⚠️ No reminder job is currently scheduled.");
            }
        }

        Ok(reply)
    }

    /// Handle /editreminder HH:MM
    async fn handle_edit(
        &self,
        ctx: &CommandContext,
        invocation: &CommandInvocation,
    ) -> BotResult<String> {
        let [time_str] = invocation.args.as_slice() else {
            return Err(BotError::user_input(EDIT_USAGE));
        };
        let time: ReminderTime = time_str
            .parse()
            .map_err(|_| BotError::user_input(INVALID_TIME))?;

        let _guard = ctx.lock_edits().await;
        ctx.store.set_time(time).await?;
        ctx.scheduler
            .schedule_daily(DAILY_REMINDER_JOB, time, ctx.daily_reminder.clone())?;

        info!(
            "[{}] ⏰ Reminder time changed to {time} by {}",
            invocation.request_id, invocation.user_id
        );
        Ok(format!("✅ Reminder time updated to {time} daily!"))
    }

    /// Handle /send_reminder - broadcast today's reminder right away
    async fn handle_send(
        &self,
        ctx: &CommandContext,
        invocation: &CommandInvocation,
    ) -> BotResult<String> {
        ctx.daily_reminder.send().await?;
        info!(
            "[{}] 📣 Manual reminder broadcast by {}",
            invocation.request_id, invocation.user_id
        );
        Ok("✅ Daily reminder sent to the garden channel.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::handlers::test_support::test_context;
    use crate::commands::CommandRegistry;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn run(ctx: &Arc<CommandContext>, text: &str) -> BotResult<String> {
        CommandRegistry::with_default_handlers()
            .dispatch(ctx.clone(), &CommandInvocation::parse(text).unwrap())
            .await
    }

    #[tokio::test]
    async fn test_edit_then_show_reports_new_time() {
        let (ctx, _) = test_context("http://127.0.0.1:9").await;

        let reply = run(&ctx, "/editreminder 18:30").await.unwrap();
        assert_eq!(reply, "✅ Reminder time updated to 18:30 daily!");

        let shown = run(&ctx, "/showreminder").await.unwrap();
        assert!(shown.contains("**18:30**"));
        assert!(!shown.contains("⚠️"));
        assert_eq!(ctx.scheduler.active_jobs(DAILY_REMINDER_JOB), 1);
    }

    #[tokio::test]
    async fn test_repeated_edits_leave_one_job() {
        let (ctx, _) = test_context("http://127.0.0.1:9").await;

        for time in ["07:00", "09:15", "18:30", "06:45"] {
            run(&ctx, &format!("/editreminder {time}")).await.unwrap();
            assert_eq!(ctx.scheduler.active_jobs(DAILY_REMINDER_JOB), 1);
        }
        assert_eq!(
            ctx.scheduler.scheduled_time(DAILY_REMINDER_JOB),
            ReminderTime::new(6, 45)
        );
        assert_eq!(ctx.store.get_time().await.unwrap(), ReminderTime::new(6, 45).unwrap());
    }

    #[tokio::test]
    async fn test_malformed_time_changes_nothing() {
        let (ctx, _) = test_context("http://127.0.0.1:9").await;
        run(&ctx, "/editreminder 08:00").await.unwrap();

        for text in ["/editreminder 25:00", "/editreminder 8pm", "/editreminder 12:60"] {
            let err = run(&ctx, text).await.unwrap_err();
            assert_eq!(err.user_message(), INVALID_TIME);
        }
        assert_eq!(ctx.store.get_time().await.unwrap(), ReminderTime::DEFAULT);
        assert_eq!(
            ctx.scheduler.scheduled_time(DAILY_REMINDER_JOB),
            Some(ReminderTime::DEFAULT)
        );
    }

    #[tokio::test]
    async fn test_wrong_arity_shows_usage() {
        let (ctx, _) = test_context("http://127.0.0.1:9").await;

        for text in ["/editreminder", "/editreminder 08:00 09:00"] {
            let err = run(&ctx, text).await.unwrap_err();
            assert!(err.is_user_input());
            assert_eq!(err.user_message(), EDIT_USAGE);
        }
        assert_eq!(ctx.scheduler.active_jobs(DAILY_REMINDER_JOB), 0);
    }

    #[tokio::test]
    async fn test_failed_registration_is_reported() {
        let (ctx, _) = test_context("http://127.0.0.1:9").await;
        run(&ctx, "/editreminder 08:00").await.unwrap();
        ctx.scheduler.shutdown();

        let err = run(&ctx, "/editreminder 18:30").await.unwrap_err();
        assert!(matches!(err, BotError::Scheduler(_)));
        assert!(err.user_message().contains("could not be scheduled"));

        let shown = run(&ctx, "/showreminder").await.unwrap();
        assert!(shown.contains("**18:30**"));
        assert!(shown.contains("No reminder job is currently scheduled"));
        assert_eq!(ctx.scheduler.active_jobs(DAILY_REMINDER_JOB), 0);
    }

    #[tokio::test]
    async fn test_show_warns_when_unscheduled() {
        let (ctx, _) = test_context("http://127.0.0.1:9").await;
        let shown = run(&ctx, "/showreminder").await.unwrap();
        assert!(shown.contains("**08:00**"));
        assert!(shown.contains("No reminder job is currently scheduled"));
    }

    #[tokio::test]
    async fn test_send_reminder_broadcasts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"records": [{"general": {"forecast": {"text": "Light Rain"}}}]}
            })))
            .mount(&server)
            .await;
        let (ctx, broadcaster) = test_context(&server.uri()).await;

        run(&ctx, "/send_reminder").await.unwrap();

        let sent = broadcaster.sent().await;
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("Light rain expected!"));
    }
}
