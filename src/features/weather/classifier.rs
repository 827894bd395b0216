//! Forecast text classification
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0

/// Dry and clear weather, watering is needed
pub const DRY_WEATHER: &[&str] = &[
    "Fair",
    "Fair (Day)",
    "Fair (Night)",
    "Fair and Warm",
    "Partly Cloudy",
    "Partly Cloudy (Day)",
    "Partly Cloudy (Night)",
    "Cloudy",
    "Hazy",
    "Slightly Hazy",
    "Windy",
    "Mist",
    "Fog",
];

/// Light to moderate rain, watering is optional
pub const LIGHT_MODERATE_RAIN: &[&str] = &[
    "Light Rain",
    "Moderate Rain",
    "Passing Showers",
    "Light Showers",
    "Showers",
];

/// Heavy rain and thunderstorms, no watering needed
pub const HEAVY_RAIN: &[&str] = &[
    "Heavy Rain",
    "Heavy Showers",
    "Thundery Showers",
    "Heavy Thundery Showers",
    "Heavy Thundery Showers with Gusty Winds",
];

/// Watering recommendation derived from forecast text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForecastCategory {
    Dry,
    LightRain,
    HeavyRain,
    /// Text not present in any table
    Unknown,
}

impl ForecastCategory {
    /// Classify forecast text by exact table membership (surrounding whitespace ignored)
    pub fn classify(text: &str) -> Self {
        let text = text.trim();
        if DRY_WEATHER.contains(&text) {
            ForecastCategory::Dry
        } else if LIGHT_MODERATE_RAIN.contains(&text) {
            ForecastCategory::LightRain
        } else if HEAVY_RAIN.contains(&text) {
            ForecastCategory::HeavyRain
        } else {
            ForecastCategory::Unknown
        }
    }

    /// Advice line for the reminder message
    pub fn advice(&self) -> &'static str {
        match self {
            ForecastCategory::Dry => {
                "💧 **Please water the plants today!**\nLet's keep them happy and hydrated. 🌿✨"
            }
            ForecastCategory::LightRain => {
                "⚠️ **Light rain expected!**\nConsider checking soil moisture before watering."
            }
            ForecastCategory::HeavyRain => {
                "🌧 **No watering needed today!**\nThe rain will take care of it. ☔️"
            }
            ForecastCategory::Unknown => {
                "🌱 **Forecast unclear!**\nPlease check the soil and water if it feels dry."
            }
        }
    }
}
