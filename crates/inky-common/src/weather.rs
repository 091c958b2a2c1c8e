//! Weather snapshot and its display accessors.
//!
//! Fields are optional because upstream responses are frequently partial;
//! a missing field surfaces as `DataUnavailable` from the accessor that
//! needs it, never at construction time.

use serde::{Deserialize, Serialize};

use crate::error::{InkyError, InkyResult};
use crate::icon::{IconType, ScaleType};
use crate::text::placeholder;
use crate::units::format_temperature;

/// Number of daily entries a full snapshot carries (today plus 7 days).
pub const FORECAST_DAYS: usize = 8;

/// Conditions at fetch time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Kelvin.
    pub temp: Option<f64>,
    /// Short condition name, e.g. "Clouds".
    pub condition: Option<String>,
    /// Provider icon code, e.g. "04d".
    pub icon: Option<String>,
}

/// One day of forecast. All temperatures are Kelvin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub temp_day: Option<f64>,
    pub icon: Option<String>,
    pub description: Option<String>,
}

/// Weather data for one render cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    /// Index 0 is today.
    pub daily: Vec<DailyForecast>,
}

/// Validate a day index, returning it as a slice index.
pub fn check_day(day: i32) -> InkyResult<usize> {
    if (0..FORECAST_DAYS as i32).contains(&day) {
        Ok(day as usize)
    } else {
        Err(InkyError::invalid_parameter(
            "day",
            format!(
                "{} is out of range; forecasts cover 0 (today) to {} days ahead",
                day,
                FORECAST_DAYS - 1
            ),
        ))
    }
}

fn required<T: Clone>(value: &Option<T>, field: &str) -> InkyResult<T> {
    value
        .clone()
        .ok_or_else(|| InkyError::DataUnavailable(field.to_string()))
}

impl WeatherSnapshot {
    pub fn new(current: CurrentConditions, daily: Vec<DailyForecast>) -> Self {
        Self { current, daily }
    }

    fn day_entry(&self, day: i32) -> InkyResult<&DailyForecast> {
        let index = check_day(day)?;
        self.daily
            .get(index)
            .ok_or_else(|| InkyError::DataUnavailable(format!("daily[{}]", index)))
    }

    /// Icon category for a day; today uses the current-conditions icon.
    pub fn icon(&self, day: i32) -> InkyResult<IconType> {
        let index = check_day(day)?;
        let code = if index == 0 {
            required(&self.current.icon, "current.weather[0].icon")?
        } else {
            required(&self.day_entry(day)?.icon, "daily.weather[0].icon")?
        };
        IconType::from_code(&code)
    }

    /// Current temperature, e.g. `"16.3°C"`.
    pub fn current_temperature(&self, scale: ScaleType) -> InkyResult<String> {
        let kelvin = required(&self.current.temp, "current.temp")?;
        format_temperature(kelvin, scale)
    }

    /// Current condition name, e.g. `"Clouds"`.
    pub fn current_condition(&self) -> InkyResult<String> {
        required(&self.current.condition, "current.weather[0].main")
    }

    /// `"<temperature> - <condition>"`; each half falls back to its own
    /// placeholder.
    pub fn current_weather(&self, scale: ScaleType) -> String {
        format!(
            "{} - {}",
            placeholder(self.current_temperature(scale), "temperature"),
            placeholder(self.current_condition(), "condition")
        )
    }

    /// `"<min> – <max>"` for a day.
    pub fn temp_range(&self, day: i32, scale: ScaleType) -> InkyResult<String> {
        let entry = self.day_entry(day)?;
        let min = required(&entry.temp_min, "daily.temp.min")?;
        let max = required(&entry.temp_max, "daily.temp.max")?;
        Ok(format!(
            "{} \u{2013} {}",
            format_temperature(min, scale)?,
            format_temperature(max, scale)?
        ))
    }

    /// Free-text description for a day.
    pub fn condition(&self, day: i32) -> InkyResult<String> {
        required(&self.day_entry(day)?.description, "daily.weather[0].description")
    }

    /// Daytime temperature for a day.
    pub fn future_weather(&self, day: i32, scale: ScaleType) -> InkyResult<String> {
        let kelvin = required(&self.day_entry(day)?.temp_day, "daily.temp.day")?;
        format_temperature(kelvin, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> WeatherSnapshot {
        let daily = (0..FORECAST_DAYS)
            .map(|d| DailyForecast {
                temp_min: Some(280.15 + d as f64),
                temp_max: Some(290.15 + d as f64),
                temp_day: Some(285.15 + d as f64),
                icon: Some("10d".into()),
                description: Some(format!("day {}", d)),
            })
            .collect();
        WeatherSnapshot::new(
            CurrentConditions {
                temp: Some(289.46),
                condition: Some("Clouds".into()),
                icon: Some("04d".into()),
            },
            daily,
        )
    }

    #[test]
    fn test_check_day_bounds() {
        assert_eq!(check_day(0).unwrap(), 0);
        assert_eq!(check_day(7).unwrap(), 7);
        assert!(check_day(-1).is_err());
        assert!(check_day(8).is_err());
    }

    #[test]
    fn test_icon_uses_current_for_today() {
        let w = snapshot();
        assert_eq!(w.icon(0).unwrap(), IconType::BrokenClouds);
        assert_eq!(w.icon(3).unwrap(), IconType::Rain);
    }

    #[test]
    fn test_current_weather_line() {
        assert_eq!(snapshot().current_weather(ScaleType::Celsius), "16.3°C - Clouds");
    }

    #[test]
    fn test_temp_range_uses_en_dash() {
        assert_eq!(
            snapshot().temp_range(0, ScaleType::Celsius).unwrap(),
            "7.0°C \u{2013} 17.0°C"
        );
    }

    #[test]
    fn test_short_daily_list_is_data_unavailable() {
        let mut w = snapshot();
        w.daily.truncate(2);
        assert!(matches!(w.condition(5), Err(InkyError::DataUnavailable(_))));
        assert!(matches!(w.condition(9), Err(InkyError::InvalidParameter { .. })));
    }
}
