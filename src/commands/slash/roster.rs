//! # Roster Commands
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

use crate::features::store::Day;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_showroster_command(), create_editroster_command()]
}

fn create_showroster_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("showroster")
        .description("Show who is watering on each day");
    command
}

fn create_editroster_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("editroster")
        .description("Assign a person to a day of the week")
        .create_option(|option| {
            option
                .name("day")
                .description("Day of the week")
                .kind(CommandOptionType::String)
                .required(true);
            for day in Day::ALL {
                option.add_string_choice(day.display_name(), day.key());
            }
            option
        })
        .create_option(|option| {
            option
                .name("name")
                .description("Who waters the plants on that day")
                .kind(CommandOptionType::String)
                .required(true)
                .min_length(1)
                .max_length(100)
        });
    command
}
