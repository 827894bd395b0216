//! Environment-driven bot configuration
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.2.0: Add sqlite store backend and `DATABASE_PATH`
//! - 1.1.0: Add Firebase store backend selection
//! - 1.0.0: Initial release with Discord token, channel and weather URL

use anyhow::{anyhow, Context, Result};

/// data.gov.sg real-time 24-hour forecast endpoint
pub const DEFAULT_WEATHER_API_URL: &str =
    "https://api-open.data.gov.sg/v2/real-time/api/twenty-four-hr-forecast";
pub const DEFAULT_DATABASE_PATH: &str = "h2grow.db";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Where reminder time and roster are persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process memory, lost on restart
    Memory,
    /// Firebase Realtime Database over REST
    Firebase {
        database_url: String,
        auth: Option<String>,
    },
    /// Single-file sqlite document table
    Sqlite { path: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub discord_guild_id: Option<String>,
    pub broadcast_channel_id: u64,
    pub weather_api_url: String,
    pub store_backend: StoreBackend,
    pub log_level: String,
}

impl Config {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Treat blank values as unset
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let discord_token =
            get("DISCORD_TOKEN").ok_or_else(|| anyhow!("DISCORD_TOKEN must be set"))?;

        let broadcast_channel_id = get("BROADCAST_CHANNEL_ID")
            .ok_or_else(|| anyhow!("BROADCAST_CHANNEL_ID must be set"))?
            .trim()
            .parse::<u64>()
            .context("BROADCAST_CHANNEL_ID must be a numeric channel id")?;

        let store_backend = match get("STORE_BACKEND")
            .unwrap_or_else(|| "memory".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => StoreBackend::Memory,
            "firebase" => StoreBackend::Firebase {
                database_url: get("FIREBASE_DATABASE_URL").ok_or_else(|| {
                    anyhow!("FIREBASE_DATABASE_URL must be set when STORE_BACKEND=firebase")
                })?,
                auth: get("FIREBASE_AUTH"),
            },
            "sqlite" => StoreBackend::Sqlite {
                path: get("DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string()),
            },
            other => {
                return Err(anyhow!(
                    "Unknown STORE_BACKEND '{other}' (expected memory, firebase or sqlite)"
                ))
            }
        };

        Ok(Config {
            discord_token,
            discord_guild_id: get("DISCORD_GUILD_ID"),
            broadcast_channel_id,
            weather_api_url: get("WEATHER_API_URL")
                .unwrap_or_else(|| DEFAULT_WEATHER_API_URL.to_string()),
            store_backend,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}
