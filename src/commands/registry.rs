//! Command handler registry
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Add `dispatch` and `reply_for` with typed error rendering
//! - 1.0.0: Initial implementation for handler dispatch

use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::sync::Arc;

use super::context::CommandContext;
use super::handler::{CommandInvocation, SlashCommandHandler};
use crate::core::{BotError, BotResult};

/// Registry mapping command names to handlers
///
/// The registry allows handlers to be registered and looked up by command name.
/// Multiple command names can map to the same handler if they share logic.
///
/// # Example
///
/// ```ignore
/// let mut registry = CommandRegistry::new();
/// registry.register(Arc::new(StartHandler));
///
/// let reply = registry.reply_for(ctx, &CommandInvocation::new("start", [""; 0])).await;
/// ```
#[derive(Clone)]
pub struct CommandRegistry {
    handlers: HashMap<&'static str, Arc<dyn SlashCommandHandler>>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registry with every garden command registered
    pub fn with_default_handlers() -> Self {
        let mut registry = Self::new();
        for handler in super::handlers::create_all_handlers() {
            registry.register(handler);
        }
        registry
    }

    /// Register a handler for its declared command names
    ///
    /// The handler is registered for all names returned by `command_names()`.
    pub fn register(&mut self, handler: Arc<dyn SlashCommandHandler>) {
        for name in handler.command_names() {
            self.handlers.insert(name, Arc::clone(&handler));
        }
    }

    /// Get handler for a command name
    ///
    /// Returns None if no handler is registered for the given name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn SlashCommandHandler>> {
        self.handlers.get(name).cloned()
    }

    /// Check if a command is registered
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Number of registered command names
    ///
    /// Note: This counts command names, not unique handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Get all registered command names
    pub fn command_names(&self) -> impl Iterator<Item = &&'static str> {
        self.handlers.keys()
    }

    /// Route an invocation to its handler
    pub async fn dispatch(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &CommandInvocation,
    ) -> BotResult<String> {
        let handler = self.get(&invocation.name).ok_or_else(|| {
            BotError::user_input(format!(
                "❓ Unknown command `/{}`. Send /start to see what I can do.",
                invocation.name
            ))
        })?;
        debug!(
            "[{}] Dispatching /{} with {} args",
            invocation.request_id,
            invocation.name,
            invocation.args.len()
        );
        handler.handle(ctx, invocation).await
    }

    /// Dispatch and render the outcome as reply text, logging failures
    pub async fn reply_for(&self, ctx: Arc<CommandContext>, invocation: &CommandInvocation) -> String {
        let request_id = invocation.request_id;
        match self.dispatch(ctx, invocation).await {
            Ok(reply) => {
                info!("[{request_id}] ✅ /{} completed", invocation.name);
                reply
            }
            Err(e) if e.is_user_input() => {
                warn!("[{request_id}] /{} rejected: {e}", invocation.name);
                e.user_message()
            }
            Err(e) => {
                error!("[{request_id}] /{} failed: {e}", invocation.name);
                e.user_message()
            }
        }
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
