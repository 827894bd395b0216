//! # Command System
//!
//! Slash command (/) handling for the garden bot.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Handlers work on parsed invocations and return typed errors
//! - 1.1.0: Add roster commands
//! - 1.0.0: Initial modular handler infrastructure (handler trait, context, registry)

pub mod context;
pub mod handler;
pub mod handlers;
pub mod registry;
pub mod slash;

// Re-export handler infrastructure
pub use context::CommandContext;
pub use handler::{CommandInvocation, SlashCommandHandler};
pub use registry::CommandRegistry;

pub use slash::{
    create_slash_commands, get_string_option, invocation_from_interaction,
    register_global_commands, register_guild_commands,
};
