use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info, warn};
use serenity::async_trait;
use serenity::http::Http;
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::sync::Arc;

use h2grow::commands::{
    invocation_from_interaction, register_global_commands, register_guild_commands,
    CommandContext, CommandRegistry,
};
use h2grow::core::{truncate_for_message, Config, DAILY_REMINDER_JOB, GARDEN_TZ};
use h2grow::features::notifier::{DailyReminder, DiscordBroadcaster};
use h2grow::features::scheduler::JobScheduler;
use h2grow::features::store::{open_store, ReminderTime};
use h2grow::features::weather::ForecastFetcher;

struct Handler {
    registry: CommandRegistry,
    context: Arc<CommandContext>,
    guild_id: Option<GuildId>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        if let Some(guild_id) = self.guild_id {
            info!("🔧 Development mode: Registering commands for guild {guild_id}");
            if let Err(e) = register_guild_commands(&ctx, guild_id).await {
                error!("❌ Failed to register guild slash commands: {e}");
            } else {
                info!("✅ Successfully registered slash commands for guild {guild_id} (instant update)");
            }
        } else {
            info!("🌍 Production mode: Registering commands globally");
            if let Err(e) = register_global_commands(&ctx).await {
                error!("❌ Failed to register global slash commands: {e}");
            } else {
                info!("✅ Successfully registered slash commands globally (may take up to 1 hour to propagate)");
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::ApplicationCommand(command) = interaction else {
            return;
        };

        let invocation = invocation_from_interaction(&command);
        info!(
            "[{}] 📥 Slash command received | Command: {} | User: {} ({}) | Args: {}",
            invocation.request_id,
            invocation.name,
            command.user.name,
            invocation.user_id,
            invocation.args.len()
        );

        // Weather and store calls can exceed Discord's 3 second window
        if let Err(e) = command
            .create_interaction_response(&ctx.http, |response| {
                response.kind(InteractionResponseType::DeferredChannelMessageWithSource)
            })
            .await
        {
            error!("[{}] Failed to defer response: {e}", invocation.request_id);
            return;
        }

        let reply = self
            .registry
            .reply_for(Arc::clone(&self.context), &invocation)
            .await;

        if let Err(e) = command
            .edit_original_interaction_response(&ctx.http, |response| {
                response.content(truncate_for_message(&reply))
            })
            .await
        {
            error!("[{}] Failed to send reply: {e}", invocation.request_id);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting H2Grow garden bot v{}...", h2grow::features::get_bot_version());

    let store = open_store(&config.store_backend)?;
    let fetcher = ForecastFetcher::new(config.weather_api_url.clone())?;
    let broadcaster = Arc::new(DiscordBroadcaster::new(
        Arc::new(Http::new(&config.discord_token)),
        config.broadcast_channel_id,
    ));
    let scheduler = Arc::new(JobScheduler::new(GARDEN_TZ));
    let daily_reminder = Arc::new(DailyReminder::new(
        store.clone(),
        fetcher.clone(),
        broadcaster,
        GARDEN_TZ,
    ));

    let reminder_time = match store.get_time().await {
        Ok(time) => time,
        Err(e) => {
            error!("Failed to load reminder time, using {}: {e}", ReminderTime::DEFAULT);
            ReminderTime::DEFAULT
        }
    };
    scheduler.schedule_daily(DAILY_REMINDER_JOB, reminder_time, daily_reminder.clone())?;

    let context = Arc::new(CommandContext::new(
        store,
        fetcher,
        Arc::clone(&scheduler),
        daily_reminder,
    ));

    // Parse guild ID if provided for development mode
    let guild_id = config.discord_guild_id.as_ref().and_then(|id| match id.parse::<u64>() {
        Ok(id) => Some(GuildId(id)),
        Err(e) => {
            warn!("Ignoring DISCORD_GUILD_ID '{id}': {e}");
            None
        }
    });

    let handler = Handler {
        registry: CommandRegistry::with_default_handlers(),
        context,
        guild_id,
    };

    let intents = GatewayIntents::GUILDS;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            error!("This could indicate:");
            error!("  - Invalid bot token format");
            error!("  - Network issues reaching Discord API");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");
    info!("Gateway intents: {intents:?}");

    let result = client.start().await;
    scheduler.shutdown();

    if let Err(why) = result {
        error!("Gateway connection failed: {why:?}");
        error!("This could be due to:");
        error!("  - Invalid bot token");
        error!("  - Network connectivity issues");
        error!("  - Discord API outage");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
