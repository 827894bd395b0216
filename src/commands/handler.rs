//! Slash command handler trait and invocation type
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Handlers receive a platform-neutral `CommandInvocation`
//! - 1.0.0: Initial implementation for modular command handling

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::context::CommandContext;
use crate::core::BotResult;

/// A command as typed by a user: name plus whitespace-separated tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub name: String,
    pub args: Vec<String>,
    pub user_id: String,
    pub request_id: Uuid,
}

impl CommandInvocation {
    pub fn new<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
            user_id: "unknown".to_string(),
            request_id: Uuid::new_v4(),
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Parse `"/editroster monday Bob Lee"` style text
    pub fn parse(text: &str) -> Option<Self> {
        let mut tokens = text.split_whitespace();
        let name = tokens.next()?.trim_start_matches('/');
        if name.is_empty() {
            return None;
        }
        Some(Self::new(name.to_lowercase(), tokens))
    }
}

/// Trait for slash command handlers
///
/// Each command handler implements this trait to process one or more slash commands.
/// Handlers are registered with a CommandRegistry and dispatched based on command name.
/// The returned text is the reply to the invoking user.
///
/// # Example
///
/// ```ignore
/// pub struct PingHandler;
///
/// #[async_trait]
/// impl SlashCommandHandler for PingHandler {
///     fn command_names(&self) -> &'static [&'static str] {
///         &["ping"]
///     }
///
///     async fn handle(
///         &self,
///         ctx: Arc<CommandContext>,
///         invocation: &CommandInvocation,
///     ) -> BotResult<String> {
///         Ok("Pong!".to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait SlashCommandHandler: Send + Sync {
    /// Command name(s) this handler processes
    ///
    /// A handler can process multiple commands if they share logic.
    fn command_names(&self) -> &'static [&'static str];

    /// Handle the command and produce the reply text
    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &CommandInvocation,
    ) -> BotResult<String>;
}
