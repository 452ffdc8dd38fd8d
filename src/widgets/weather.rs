//! Current weather at the configured location (OpenWeather).

use serde::Deserialize;

use super::WidgetError;
use crate::config::WeatherConfig;
use crate::http::{build_url, FetchError, HttpClient};

pub const WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    name: String,
    #[serde(default)]
    weather: Vec<Condition>,
    main: MainReadings,
    wind: Wind,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

/// What the weather widget shows.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub place: String,
    pub description: Option<String>,
    /// Temperature in °C, rounded
    pub temperature: i64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
}

impl WeatherReport {
    /// First display line: place and conditions.
    pub fn headline(&self) -> String {
        match &self.description {
            Some(desc) => format!("📍{}  |  {}", self.place, desc),
            None => format!("📍{}", self.place),
        }
    }

    /// Second display line: temperature, humidity, wind.
    pub fn readings(&self) -> String {
        format!(
            "Temp: {}°C  |  Humidity: {}%  |  Wind: {} m/s",
            self.temperature, self.humidity, self.wind_speed
        )
    }
}

impl From<WeatherResponse> for WeatherReport {
    fn from(response: WeatherResponse) -> Self {
        Self {
            place: response.name,
            description: response.weather.into_iter().next().map(|c| c.description),
            temperature: response.main.temp.round() as i64,
            humidity: response.main.humidity,
            wind_speed: response.wind.speed,
        }
    }
}

fn to_widget_error(err: FetchError) -> WidgetError {
    match err {
        FetchError::MissingKey(_) => {
            WidgetError::new("OpenWeather API key not found, check your configuration")
        }
        FetchError::Status { status, body } => {
            WidgetError::new("Failed to fetch weather data").with_detail(format!("HTTP {status}: {body}"))
        }
        other => WidgetError::new("Something went wrong fetching the weather").with_detail(other.to_string()),
    }
}

/// Fetches current conditions in metric units.
pub fn fetch_weather(client: &dyn HttpClient, config: &WeatherConfig) -> Result<WeatherReport, WidgetError> {
    let api_key = config
        .api_key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or(FetchError::MissingKey("OpenWeather API key"))
        .map_err(to_widget_error)?;

    let lat = config.latitude.to_string();
    let lon = config.longitude.to_string();
    let url = build_url(
        WEATHER_URL,
        &[
            ("lat", lat.as_str()),
            ("lon", lon.as_str()),
            ("appid", api_key),
            ("units", "metric"),
            ("lang", config.lang.as_str()),
        ],
    )
    .map_err(to_widget_error)?;

    let response = client
        .get(&url)
        .and_then(|r| r.error_for_status())
        .map_err(to_widget_error)?;
    let parsed: WeatherResponse = response.json().map_err(to_widget_error)?;
    Ok(parsed.into())
}
