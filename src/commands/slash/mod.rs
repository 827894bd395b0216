//! # Slash Commands (/)
//!
//! Discord native slash commands for the garden bot, and the conversion of an
//! interaction into a [`CommandInvocation`].
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 3.0.0: Garden command set; options flattened into positional tokens
//! - 1.0.0: Reorganized from monolithic slash_commands.rs

mod general;
mod reminder;
mod roster;

use anyhow::Result;
use log::info;
use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::Command;
use serenity::model::application::interaction::application_command::{
    ApplicationCommandInteraction, CommandDataOption,
};
use serenity::model::id::GuildId;
use serenity::prelude::Context;

use super::handler::CommandInvocation;

/// Creates all slash command definitions
pub fn create_slash_commands() -> Vec<CreateApplicationCommand> {
    let mut commands = Vec::new();

    // Welcome and forecast
    commands.extend(general::create_commands());

    // Reminder commands
    commands.extend(reminder::create_commands());

    // Roster commands
    commands.extend(roster::create_commands());

    commands
}

/// Registers all slash commands globally
pub async fn register_global_commands(ctx: &Context) -> Result<()> {
    let slash_commands = create_slash_commands();
    let count = slash_commands.len();

    Command::set_global_application_commands(&ctx.http, |commands| {
        for command in slash_commands {
            commands.add_application_command(command);
        }
        commands
    })
    .await?;

    info!("Global slash commands registered successfully ({count} commands)");
    Ok(())
}

/// Registers all slash commands for a specific guild (faster for testing)
pub async fn register_guild_commands(ctx: &Context, guild_id: GuildId) -> Result<()> {
    let slash_commands = create_slash_commands();
    let count = slash_commands.len();

    guild_id
        .set_application_commands(&ctx.http, |commands| {
            for command in slash_commands {
                commands.add_application_command(command);
            }
            commands
        })
        .await?;

    info!("Guild slash commands registered for guild {guild_id} ({count} commands)");
    Ok(())
}

/// Utility function to get string option from slash command
pub fn get_string_option(options: &[CommandDataOption], name: &str) -> Option<String> {
    options
        .iter()
        .find(|opt| opt.name == name)
        .and_then(|opt| opt.value.as_ref())
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

/// Option names in the order their values become positional tokens
fn option_order(command_name: &str) -> &'static [&'static str] {
    match command_name {
        "editreminder" => &["time"],
        "editroster" => &["day", "name"],
        _ => &[],
    }
}

/// Split declared option values into whitespace-separated tokens
pub fn flatten_tokens<F>(command_name: &str, lookup: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    option_order(command_name)
        .iter()
        .filter_map(|option| lookup(*option))
        .flat_map(|value| {
            value
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Build the platform-neutral invocation for a slash command interaction
pub fn invocation_from_interaction(command: &ApplicationCommandInteraction) -> CommandInvocation {
    let name = command.data.name.to_lowercase();
    let args = flatten_tokens(&name, |option| {
        get_string_option(&command.data.options, option)
    });
    CommandInvocation::new(name, args).with_user(command.user.id.to_string())
}
