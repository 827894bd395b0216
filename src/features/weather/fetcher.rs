//! 24-hour forecast fetcher
//!
//! One GET against the configured endpoint; the forecast text is read from
//! `data.records[0].general.forecast.text`. No timeout and no retry.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use log::{debug, warn};
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

const REQUEST_USER_AGENT: &str = "Mozilla/5.0";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Weather API returned status {0}")]
    Status(u16),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    data: ForecastData,
}

#[derive(Debug, Deserialize)]
struct ForecastData {
    records: Vec<ForecastRecord>,
}

#[derive(Debug, Deserialize)]
struct ForecastRecord {
    general: GeneralForecast,
}

#[derive(Debug, Deserialize)]
struct GeneralForecast {
    forecast: ForecastText,
}

#[derive(Debug, Deserialize)]
struct ForecastText {
    text: String,
}

#[derive(Debug, Clone)]
pub struct ForecastFetcher {
    client: Client,
    url: String,
}

impl ForecastFetcher {
    pub fn new(url: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Fetch the current 24-hour forecast text
    pub async fn fetch_forecast(&self) -> Result<String, FetchError> {
        debug!("Fetching 24-hour forecast from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, REQUEST_USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Weather API returned status {status}");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let text = parse_forecast_text(&body)?;
        debug!("24-hour forecast: {text}");
        Ok(text)
    }
}

fn parse_forecast_text(body: &[u8]) -> Result<String, FetchError> {
    let parsed: ForecastResponse =
        serde_json::from_slice(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    parsed
        .data
        .records
        .into_iter()
        .next()
        .map(|record| record.general.forecast.text)
        .ok_or_else(|| FetchError::Parse("forecast response has no records".to_string()))
}
