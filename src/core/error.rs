//! Error taxonomy for command handling and scheduled jobs
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.1.0

use thiserror::Error;

use crate::features::notifier::BroadcastError;
use crate::features::scheduler::SchedulerError;
use crate::features::store::StoreError;
use crate::features::weather::FetchError;

pub type BotResult<T> = std::result::Result<T, BotError>;

/// Every failure a command or scheduled job can surface.
///
/// None of these are fatal to the process: the dispatcher turns each one into
/// a reply via [`BotError::user_message`] and keeps serving.
#[derive(Debug, Error)]
pub enum BotError {
    /// Malformed arguments; nothing was mutated
    #[error("{0}")]
    UserInput(String),

    #[error("Forecast fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    #[error("Broadcast error: {0}")]
    Broadcast(#[from] BroadcastError),
}

impl BotError {
    pub fn user_input(message: impl Into<String>) -> Self {
        BotError::UserInput(message.into())
    }

    pub fn is_user_input(&self) -> bool {
        matches!(self, BotError::UserInput(_))
    }

    /// Text shown to the invoking user
    pub fn user_message(&self) -> String {
        match self {
            BotError::UserInput(message) => message.clone(),
            BotError::Fetch(_) => {
                "⛅ Forecast unavailable right now. Please try again later.".to_string()
            }
            BotError::Store(_) => {
                "❌ Could not reach the garden records. Please try again later.".to_string()
            }
            BotError::Scheduler(e) => format!(
                "❌ The daily reminder could not be scheduled: {e}. Please ask an operator to check the bot."
            ),
            BotError::Broadcast(_) => {
                "❌ Could not post to the garden channel. Please try again later.".to_string()
            }
        }
    }
}
