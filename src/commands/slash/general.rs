//! # General Commands
//!
//! Welcome text and the 24-hour forecast.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use serenity::builder::CreateApplicationCommand;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_start_command(), create_forecast_command()]
}

fn create_start_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("start")
        .description("Show the welcome message and the list of commands");
    command
}

fn create_forecast_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("forecast")
        .description("View the 24-hour weather forecast and watering advice");
    command
}
