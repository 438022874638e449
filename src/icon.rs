//! Terminal stand-ins for WeatherAPI condition icons
//!
//! The API hands back an image URL per condition; a terminal can't show it,
//! so conditions are bucketed and drawn as a glyph instead.

use ratatui::style::Color;

use crate::state::Condition;

/// Broad condition buckets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeatherCondition {
    ClearSky,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
    Unknown,
}

impl WeatherCondition {
    /// Bucket a WeatherAPI condition code
    ///
    /// https://www.weatherapi.com/docs/weather_conditions.json
    pub fn from_code(code: u16) -> Self {
        match code {
            1000 => Self::ClearSky,
            1003 => Self::PartlyCloudy,
            1006 | 1009 => Self::Cloudy,
            1030 | 1135 | 1147 => Self::Fog,
            1072 | 1150 | 1153 | 1168 | 1171 => Self::Drizzle,
            1063 | 1180..=1201 | 1240..=1246 => Self::Rain,
            1066 | 1069 | 1114 | 1117 | 1204..=1237 | 1249..=1264 => Self::Snow,
            1087 | 1273..=1282 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    /// Best guess from the condition text, for responses without a code
    pub fn from_text(text: &str) -> Self {
        let text = text.to_lowercase();
        let has = |needle: &str| text.contains(needle);
        if has("thunder") {
            Self::Thunderstorm
        } else if has("snow") || has("sleet") || has("blizzard") || has("ice pellets") {
            Self::Snow
        } else if has("drizzle") {
            Self::Drizzle
        } else if has("rain") || has("shower") {
            Self::Rain
        } else if has("fog") || has("mist") {
            Self::Fog
        } else if has("partly") {
            Self::PartlyCloudy
        } else if has("cloud") || has("overcast") {
            Self::Cloudy
        } else if has("sunny") || has("clear") {
            Self::ClearSky
        } else {
            Self::Unknown
        }
    }

    pub fn from_condition(condition: &Condition) -> Self {
        match condition.code.map(Self::from_code) {
            Some(bucket) if bucket != Self::Unknown => bucket,
            _ => Self::from_text(&condition.text),
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::ClearSky => "\u{2600}\u{fe0f}",
            Self::PartlyCloudy => "\u{26c5}",
            Self::Cloudy => "\u{2601}\u{fe0f}",
            Self::Fog => "\u{1f32b}\u{fe0f}",
            Self::Drizzle => "\u{1f326}\u{fe0f}",
            Self::Rain => "\u{1f327}\u{fe0f}",
            Self::Snow => "\u{2744}\u{fe0f}",
            Self::Thunderstorm => "\u{26c8}\u{fe0f}",
            Self::Unknown => "\u{2753}",
        }
    }

    /// Accent color for the condition line
    pub fn color(self) -> Color {
        match self {
            Self::ClearSky => Color::Yellow,
            Self::PartlyCloudy => Color::Rgb(230, 210, 140),
            Self::Cloudy | Self::Fog => Color::Rgb(170, 170, 185),
            Self::Drizzle | Self::Rain => Color::Rgb(80, 140, 200),
            Self::Snow => Color::Rgb(200, 220, 255),
            Self::Thunderstorm => Color::Rgb(200, 180, 60),
            Self::Unknown => Color::Gray,
        }
    }
}
