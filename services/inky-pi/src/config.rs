//! Runtime settings read from the environment (and `.env`).

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use inky_common::{InkyError, InkyResult, ScaleType};
use inky_sources::{HuxleyQuery, WeatherQuery};
use renderer::Accent;
use tracing::debug;

/// Blocks the One Call API can leave out.
pub const EXCLUDE_BLOCKS: [&str; 5] = ["current", "minutely", "hourly", "daily", "alerts"];

/// Most train slots that fit on the panel.
pub const MAX_TRAIN_NUMBER: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainModel {
    Huxley2,
}

impl FromStr for TrainModel {
    type Err = InkyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "HUXLEY2" => Ok(TrainModel::Huxley2),
            "OPEN_LIVE" | "OPENLDBWS" | "HUXLEY2_OPENLDBWS" => Err(InkyError::Config(format!(
                "TRAIN_MODEL {} is not supported; use HUXLEY2",
                s.trim()
            ))),
            other => Err(InkyError::Config(format!("unknown TRAIN_MODEL '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherModel {
    OpenWeatherMap,
}

impl FromStr for WeatherModel {
    type Err = InkyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "OPEN_WEATHER_MAP" => Ok(WeatherModel::OpenWeatherMap),
            other => Err(InkyError::Config(format!("unknown WEATHER_MODEL '{}'", other))),
        }
    }
}

/// Validated settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub accent: Accent,
    pub train_model: TrainModel,
    pub train_model_url: String,
    pub train_api_token: String,
    /// CRS code, upper case.
    pub station_from: String,
    pub station_to: String,
    pub train_number: usize,
    pub weather_model: WeatherModel,
    pub latitude: f64,
    pub longitude: f64,
    pub exclude_flags: String,
    pub weather_api_token: String,
    pub scale: ScaleType,
    pub desktop_preview_path: Option<PathBuf>,
}

fn config_error(key: &str, err: impl std::fmt::Display) -> InkyError {
    InkyError::Config(format!("{}: {}", key, err))
}

fn parse_crs(key: &str, value: &str) -> InkyResult<String> {
    let code = value.trim();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(config_error(key, format!("'{}' is not a three-letter CRS code", code)))
    }
}

fn parse_coordinate(key: &str, value: &str, limit: f64) -> InkyResult<f64> {
    let parsed: f64 = value.trim().parse().map_err(|e| config_error(key, e))?;
    if !parsed.is_finite() || parsed.abs() > limit {
        return Err(config_error(
            key,
            format!("{} is outside [-{}, {}]", parsed, limit, limit),
        ));
    }
    Ok(parsed)
}

fn parse_exclude(value: &str) -> InkyResult<String> {
    let blocks: Vec<&str> = value
        .split(',')
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .collect();
    if let Some(bad) = blocks.iter().find(|b| !EXCLUDE_BLOCKS.contains(b)) {
        return Err(config_error(
            "EXCLUDE_FLAGS",
            format!("'{}' is not one of {}", bad, EXCLUDE_BLOCKS.join(", ")),
        ));
    }
    Ok(blocks.join(","))
}

impl Settings {
    /// Build settings from a key lookup, applying defaults and validation.
    pub fn from_lookup<F>(lookup: F) -> InkyResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let accent = get("INKY_COLOR", "yellow")
            .parse::<Accent>()
            .map_err(|e| config_error("INKY_COLOR", e))?;
        let train_model: TrainModel = get("TRAIN_MODEL", "HUXLEY2").parse()?;
        let train_model_url = get("TRAIN_MODEL_URL", inky_sources::huxley2::DEFAULT_BASE_URL)
            .trim()
            .to_string();
        if train_model_url.is_empty() {
            return Err(config_error("TRAIN_MODEL_URL", "must not be empty"));
        }

        let train_number: usize = get("TRAIN_NUMBER", "3")
            .trim()
            .parse()
            .map_err(|e| config_error("TRAIN_NUMBER", e))?;
        if !(1..=MAX_TRAIN_NUMBER).contains(&train_number) {
            return Err(config_error(
                "TRAIN_NUMBER",
                format!("{} is outside 1..={}", train_number, MAX_TRAIN_NUMBER),
            ));
        }

        let settings = Settings {
            accent,
            train_model,
            train_model_url,
            train_api_token: get("TRAIN_API_TOKEN", ""),
            station_from: parse_crs("STATION_FROM", &get("STATION_FROM", "BHO"))?,
            station_to: parse_crs("STATION_TO", &get("STATION_TO", "WMW"))?,
            train_number,
            weather_model: get("WEATHER_MODEL", "OPEN_WEATHER_MAP").parse()?,
            latitude: parse_coordinate("LATITUDE", &get("LATITUDE", "51.5085"), 90.0)?,
            longitude: parse_coordinate("LONGITUDE", &get("LONGITUDE", "-0.1257"), 180.0)?,
            exclude_flags: parse_exclude(&get("EXCLUDE_FLAGS", "minutely,hourly"))?,
            weather_api_token: get("WEATHER_API_TOKEN", ""),
            scale: get("TEMPERATURE_SCALE", "celsius")
                .parse()
                .map_err(|e| config_error("TEMPERATURE_SCALE", e))?,
            desktop_preview_path: lookup("DESKTOP_PREVIEW_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        };
        debug!(
            accent = %settings.accent,
            from = %settings.station_from,
            to = %settings.station_to,
            trains = settings.train_number,
            scale = %settings.scale,
            "Loaded settings"
        );
        Ok(settings)
    }

    /// Read settings from process environment variables.
    pub fn from_env() -> InkyResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings from an explicit map.
    pub fn from_map(map: &HashMap<String, String>) -> InkyResult<Self> {
        Self::from_lookup(|key| map.get(key).cloned())
    }

    pub fn weather_query(&self) -> WeatherQuery {
        WeatherQuery {
            latitude: self.latitude,
            longitude: self.longitude,
            exclude: self.exclude_flags.clone(),
            api_key: self.weather_api_token.clone(),
        }
    }

    pub fn huxley_query(&self) -> HuxleyQuery {
        HuxleyQuery {
            from: self.station_from.clone(),
            to: self.station_to.clone(),
            count: self.train_number,
            token: Some(self.train_api_token.clone()).filter(|t| !t.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> InkyResult<Settings> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_map(&map)
    }

    #[test]
    fn test_defaults() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.accent, Accent::Yellow);
        assert_eq!(s.train_model, TrainModel::Huxley2);
        assert_eq!(s.train_model_url, "https://huxley2.azurewebsites.net");
        assert_eq!((s.station_from.as_str(), s.station_to.as_str()), ("BHO", "WMW"));
        assert_eq!(s.train_number, 3);
        assert_eq!(s.latitude, 51.5085);
        assert_eq!(s.longitude, -0.1257);
        assert_eq!(s.exclude_flags, "minutely,hourly");
        assert_eq!(s.scale, ScaleType::Celsius);
        assert_eq!(s.desktop_preview_path, None);
        assert_eq!(s.huxley_query().token, None);
    }

    #[test]
    fn test_overrides() {
        let s = settings(&[
            ("INKY_COLOR", "Red"),
            ("STATION_FROM", "bet"),
            ("TRAIN_NUMBER", "5"),
            ("TEMPERATURE_SCALE", "fahrenheit"),
            ("EXCLUDE_FLAGS", " minutely , alerts "),
            ("TRAIN_API_TOKEN", "secret"),
            ("DESKTOP_PREVIEW_PATH", "/tmp/inky.png"),
        ])
        .unwrap();
        assert_eq!(s.accent, Accent::Red);
        assert_eq!(s.station_from, "BET");
        assert_eq!(s.train_number, 5);
        assert_eq!(s.scale, ScaleType::Fahrenheit);
        assert_eq!(s.exclude_flags, "minutely,alerts");
        assert_eq!(s.huxley_query().token.as_deref(), Some("secret"));
        assert_eq!(s.desktop_preview_path, Some(PathBuf::from("/tmp/inky.png")));
    }

    #[test]
    fn test_rejections() {
        let cases: &[(&str, &str)] = &[
            ("INKY_COLOR", "green"),
            ("TRAIN_MODEL", "OPEN_LIVE"),
            ("TRAIN_MODEL", "carrier pigeon"),
            ("TRAIN_MODEL_URL", "  "),
            ("STATION_TO", "WALTHAMSTOW"),
            ("STATION_TO", "W1W"),
            ("TRAIN_NUMBER", "0"),
            ("TRAIN_NUMBER", "11"),
            ("TRAIN_NUMBER", "three"),
            ("WEATHER_MODEL", "MET_OFFICE"),
            ("LATITUDE", "91"),
            ("LONGITUDE", "-180.5"),
            ("LONGITUDE", "NaN"),
            ("EXCLUDE_FLAGS", "minutely,weekly"),
            ("TEMPERATURE_SCALE", "kelvin"),
        ];
        for (key, value) in cases {
            let err = settings(&[(key, value)]).unwrap_err();
            assert!(
                matches!(err, InkyError::Config(_)),
                "{}={} gave {:?}",
                key,
                value,
                err
            );
        }
    }
}
