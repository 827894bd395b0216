//! # Reminder Commands
//!
//! Show, edit and trigger the daily watering reminder.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Add /send_reminder
//! - 1.0.0: Initial implementation

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        create_showreminder_command(),
        create_editreminder_command(),
        create_send_reminder_command(),
    ]
}

fn create_showreminder_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("showreminder")
        .description("Show the daily reminder time");
    command
}

fn create_editreminder_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("editreminder")
        .description("Change the daily reminder time")
        .create_option(|option| {
            option
                .name("time")
                .description("New time in 24-hour HH:MM format, e.g. 18:30")
                .kind(CommandOptionType::String)
                .required(true)
                .min_length(3)
                .max_length(5)
        });
    command
}

fn create_send_reminder_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("send_reminder")
        .description("Send today's watering reminder to the garden channel now");
    command
}
