//! OpenWeatherMap One Call client.

use inky_common::{CurrentConditions, DailyForecast, WeatherSnapshot};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::error::{SourceError, SourceResult};
use crate::{http_client, read_body, WeatherSource};

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const ONECALL_PATH: &str = "/data/2.5/onecall";

/// Location and credentials for a One Call request.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherQuery {
    pub latitude: f64,
    pub longitude: f64,
    /// Comma-separated blocks to leave out, e.g. `"minutely,hourly"`.
    pub exclude: String,
    pub api_key: String,
}

impl WeatherQuery {
    /// Query-string pairs, in request order.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("lat", self.latitude.to_string()),
            ("lon", self.longitude.to_string()),
            ("exclude", self.exclude.clone()),
            ("appid", self.api_key.clone()),
        ]
    }
}

#[derive(Debug, Default, Deserialize)]
struct OneCall {
    #[serde(default)]
    current: Option<RawCurrent>,
    #[serde(default)]
    daily: Option<Vec<RawDaily>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCurrent {
    temp: Option<f64>,
    #[serde(default)]
    weather: Option<Vec<RawWeather>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDaily {
    temp: Option<RawTemp>,
    #[serde(default)]
    weather: Option<Vec<RawWeather>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTemp {
    day: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawWeather {
    main: Option<String>,
    description: Option<String>,
    icon: Option<String>,
}

fn first(weather: Option<Vec<RawWeather>>) -> RawWeather {
    weather
        .and_then(|w| w.into_iter().next())
        .unwrap_or_default()
}

fn api_error(body: &Value) -> Option<SourceError> {
    let code = body.get("cod")?;
    let code = match code {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown error")
        .to_string();
    Some(SourceError::Api { code, message })
}

/// Decode a One Call body into a snapshot.
///
/// A body carrying a `cod` member is an API error. Missing members are kept
/// as `None` so the snapshot accessors can report them per field.
pub fn parse_onecall(body: &str) -> SourceResult<WeatherSnapshot> {
    let value: Value = serde_json::from_str(body)?;
    if let Some(err) = api_error(&value) {
        return Err(err);
    }
    let raw: OneCall = serde_json::from_value(value)?;

    let current = raw.current.unwrap_or_default();
    let now = first(current.weather);
    let current = CurrentConditions {
        temp: current.temp,
        condition: now.main,
        icon: now.icon,
    };

    let daily: Vec<DailyForecast> = raw
        .daily
        .unwrap_or_default()
        .into_iter()
        .map(|day| {
            let temp = day.temp.unwrap_or_default();
            let weather = first(day.weather);
            DailyForecast {
                temp_min: temp.min,
                temp_max: temp.max,
                temp_day: temp.day,
                icon: weather.icon,
                description: weather.description,
            }
        })
        .collect();

    debug!(days = daily.len(), "Parsed One Call response");
    Ok(WeatherSnapshot::new(current, daily))
}

/// Blocking One Call client.
pub struct OpenWeatherMap {
    client: Client,
    base_url: String,
    query: WeatherQuery,
}

impl OpenWeatherMap {
    pub fn new(query: WeatherQuery) -> SourceResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, query)
    }

    pub fn with_base_url(base_url: impl Into<String>, query: WeatherQuery) -> SourceResult<Self> {
        if query.api_key.is_empty() {
            warn!("WEATHER_API_TOKEN is empty; OpenWeatherMap will reject the request");
        }
        Ok(Self {
            client: http_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            query,
        })
    }

    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, ONECALL_PATH)
    }
}

impl WeatherSource for OpenWeatherMap {
    #[instrument(skip(self), fields(lat = self.query.latitude, lon = self.query.longitude))]
    fn fetch_weather(&self) -> SourceResult<WeatherSnapshot> {
        let response = self
            .client
            .get(self.url())
            .query(&self.query.params())
            .send()?;
        let body = read_body(response)?;
        let snapshot = parse_onecall(&body)?;
        info!(days = snapshot.daily.len(), "Fetched weather");
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_order() {
        let query = WeatherQuery {
            latitude: 51.5085,
            longitude: -0.1257,
            exclude: "minutely,hourly".into(),
            api_key: "abc".into(),
        };
        let keys: Vec<&str> = query.params().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["lat", "lon", "exclude", "appid"]);
        assert_eq!(query.params()[1].1, "-0.1257");
    }

    #[test]
    fn test_string_cod_is_api_error() {
        let err = parse_onecall(r#"{"cod": "429", "message": "slow down"}"#).unwrap_err();
        assert!(matches!(err, SourceError::Api { ref code, .. } if code == "429"));
    }

    #[test]
    fn test_empty_object_parses_to_empty_snapshot() {
        let snapshot = parse_onecall("{}").unwrap();
        assert_eq!(snapshot, WeatherSnapshot::default());
    }
}
