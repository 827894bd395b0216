//! Broadcast destination for the garden channel

use async_trait::async_trait;
use log::debug;
use serenity::http::Http;
use serenity::model::id::ChannelId;
use std::sync::Arc;
use thiserror::Error;

use crate::core::truncate_for_message;

#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error("Discord send failed: {0}")]
    Discord(#[from] serenity::Error),
}

/// Sink for messages addressed to the whole garden group
#[async_trait]
pub trait Broadcaster: Send + Sync {
    async fn broadcast(&self, text: &str) -> Result<(), BroadcastError>;
}

/// Posts to one fixed Discord channel
pub struct DiscordBroadcaster {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl DiscordBroadcaster {
    pub fn new(http: Arc<Http>, channel_id: u64) -> Self {
        Self {
            http,
            channel_id: ChannelId(channel_id),
        }
    }
}

#[async_trait]
impl Broadcaster for DiscordBroadcaster {
    async fn broadcast(&self, text: &str) -> Result<(), BroadcastError> {
        debug!("Broadcasting {} chars to channel {}", text.len(), self.channel_id);
        self.channel_id
            .say(&self.http, truncate_for_message(text))
            .await?;
        Ok(())
    }
}

/// Keeps every broadcast in memory, for tests
#[cfg(test)]
#[derive(Default)]
pub struct RecordingBroadcaster {
    sent: tokio::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingBroadcaster {
    pub async fn sent(&self) -> Vec<String> {
        self.sent.lock().await.clone()
    }
}

#[cfg(test)]
#[async_trait]
impl Broadcaster for RecordingBroadcaster {
    async fn broadcast(&self, text: &str) -> Result<(), BroadcastError> {
        self.sent.lock().await.push(text.to_string());
        Ok(())
    }
}
