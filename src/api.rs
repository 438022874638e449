//! WeatherAPI.com forecast client

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::state::{Condition, CurrentConditions, ForecastDay, ForecastReport, ResolvedLocation};

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// Days of forecast requested per call
pub const FORECAST_DAYS: u8 = 7;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetch failures, ordered by how they are classified
///
/// `Display` is the message shown to the user.
#[derive(Debug, Error, PartialEq)]
pub enum ForecastError {
    /// No credential configured; no request was made
    #[error("Weather API key is not configured. Set WEATHER_API_KEY and restart.")]
    MissingApiKey,

    /// The API answered with its own `{"error": {"message": ..}}` object
    #[error("{0}")]
    Upstream(String),

    /// Network failure, timeout, or a bare HTTP error status
    #[error("{0}")]
    Transport(String),

    /// Anything else; the detail is only logged
    #[error("An unknown error occurred while fetching weather data.")]
    Unknown(String),
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug)]
pub struct WeatherApiClient {
    client: Client,
    config: ApiConfig,
}

impl WeatherApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ForecastError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ForecastError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// The configured key, treating an empty string as absent
    fn api_key(&self) -> Option<&str> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    fn forecast_url(&self, key: &str, city: &str) -> String {
        format!(
            "{}/forecast.json?key={}&q={}&days={}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(key),
            urlencoding::encode(city),
            FORECAST_DAYS
        )
    }

    /// Fetch current conditions and the forecast for `city`
    ///
    /// The city is sent verbatim (URL-encoded). Fails with
    /// [`ForecastError::MissingApiKey`] before any I/O when no key is set.
    #[instrument(skip(self))]
    pub async fn fetch_forecast(&self, city: &str) -> Result<ForecastReport, ForecastError> {
        let Some(key) = self.api_key() else {
            warn!("No API key configured, skipping request");
            return Err(ForecastError::MissingApiKey);
        };

        debug!("Requesting forecast");
        let response = self
            .client
            .get(self.forecast_url(key, city))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Forecast request failed");
                ForecastError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            warn!(error = %e, "Failed to read forecast body");
            ForecastError::Transport(e.to_string())
        })?;

        let result = classify(status, &body);
        match &result {
            Ok(report) => debug!(days = report.days.len(), "Forecast loaded"),
            Err(ForecastError::Unknown(detail)) => warn!(%status, detail = %detail, "Unrecognised response"),
            Err(e) => warn!(%status, error = %e, "Forecast rejected"),
        }
        result
    }
}

/// Turn a status and raw body into a report or a classified error
///
/// A structured API error wins over the status code, which wins over the
/// generic fallback.
fn classify(status: StatusCode, body: &[u8]) -> Result<ForecastReport, ForecastError> {
    if let Ok(ErrorEnvelope { error }) = serde_json::from_slice::<ErrorEnvelope>(body) {
        return Err(ForecastError::Upstream(error.message));
    }

    if !status.is_success() {
        return Err(ForecastError::Transport(format!(
            "Request failed with status code {}",
            status.as_u16()
        )));
    }

    serde_json::from_slice::<ForecastResponse>(body)
        .map(ForecastReport::from)
        .map_err(|e| ForecastError::Unknown(e.to_string()))
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    location: Option<LocationData>,
    current: CurrentData,
    forecast: ForecastData,
}

#[derive(Debug, Deserialize)]
struct LocationData {
    name: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    localtime: String,
}

#[derive(Debug, Deserialize)]
struct CurrentData {
    temp_f: f64,
    condition: ConditionData,
    humidity: u8,
    wind_mph: f64,
    wind_dir: String,
}

#[derive(Debug, Deserialize)]
struct ConditionData {
    text: String,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    code: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct ForecastData {
    forecastday: Vec<ForecastDayData>,
}

#[derive(Debug, Deserialize)]
struct ForecastDayData {
    date: String,
    #[serde(default)]
    day: DayData,
}

#[derive(Debug, Default, Deserialize)]
struct DayData {
    avgtemp_f: Option<f64>,
    maxtemp_f: Option<f64>,
    mintemp_f: Option<f64>,
}

impl From<ForecastResponse> for ForecastReport {
    fn from(response: ForecastResponse) -> Self {
        let ForecastResponse {
            location,
            current,
            forecast,
        } = response;

        Self {
            location: location.map(|l| ResolvedLocation {
                name: l.name,
                region: l.region,
                country: l.country,
                localtime: l.localtime,
            }),
            current: CurrentConditions {
                temp_f: current.temp_f,
                condition: Condition {
                    text: current.condition.text,
                    icon: current.condition.icon,
                    code: current.condition.code,
                },
                humidity: current.humidity,
                wind_mph: current.wind_mph,
                wind_dir: current.wind_dir,
            },
            days: forecast
                .forecastday
                .into_iter()
                .map(|d| ForecastDay {
                    date: d.date,
                    avg_temp_f: d.day.avgtemp_f,
                    max_temp_f: d.day.maxtemp_f,
                    min_temp_f: d.day.mintemp_f,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MINIMAL: &str = r#"{
        "current": {
            "temp_f": 60.1,
            "condition": {"text": "Sunny", "icon": "//cdn.weatherapi.com/weather/64x64/day/113.png", "code": 1000},
            "humidity": 40,
            "wind_mph": 3.8,
            "wind_dir": "N"
        },
        "forecast": {"forecastday": [
            {"date": "2024-05-24", "day": {"avgtemp_f": 58.0, "maxtemp_f": 66.2}},
            {"date": "2024-05-25", "day": {"avgtemp_f": 57.0, "maxtemp_f": 63.0, "mintemp_f": 50.0}}
        ]}
    }"#;

    #[test]
    fn test_classify_success() {
        let report = classify(StatusCode::OK, MINIMAL.as_bytes()).unwrap();

        assert_eq!(report.location, None);
        assert_eq!(report.current.condition.code, Some(1000));
        assert_eq!(
            report.days[0],
            ForecastDay {
                date: "2024-05-24".into(),
                avg_temp_f: Some(58.0),
                max_temp_f: Some(66.2),
                min_temp_f: None,
            }
        );
        assert_eq!(report.days[1].date, "2024-05-25");
    }

    #[test]
    fn test_structured_error_beats_status() {
        let body = br#"{"error":{"code":1006,"message":"No matching location found."}}"#;
        assert_eq!(
            classify(StatusCode::BAD_REQUEST, body),
            Err(ForecastError::Upstream("No matching location found.".into()))
        );
    }

    #[test]
    fn test_bare_status_is_transport_error() {
        assert_eq!(
            classify(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>"),
            Err(ForecastError::Transport(
                "Request failed with status code 502".into()
            ))
        );
    }

    #[test]
    fn test_garbage_body_is_unknown() {
        let err = classify(StatusCode::OK, b"{\"current\": 1}").unwrap_err();
        assert!(matches!(err, ForecastError::Unknown(_)));
        assert_eq!(
            err.to_string(),
            "An unknown error occurred while fetching weather data."
        );
    }

    #[test]
    fn test_forecast_url_encodes_city() {
        let client = WeatherApiClient::new(ApiConfig {
            base_url: "http://localhost/v1/".into(),
            api_key: Some("abc".into()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            client.forecast_url("abc", "São Paulo"),
            "http://localhost/v1/forecast.json?key=abc&q=S%C3%A3o%20Paulo&days=7"
        );
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let client = WeatherApiClient::new(ApiConfig {
            api_key: Some("   ".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.api_key(), None);
    }
}
