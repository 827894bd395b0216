//! # Feature: Weather
//!
//! Fetches the 24-hour forecast from data.gov.sg and turns its text into a
//! watering recommendation.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add explicit `Unknown` category for unlisted forecast text
//! - 1.0.0: Initial release with three-way classification

pub mod classifier;
pub mod fetcher;

pub use classifier::ForecastCategory;
pub use fetcher::{FetchError, ForecastFetcher};
