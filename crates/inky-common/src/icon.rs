//! Weather icon categories and temperature scales.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{InkyError, InkyResult};

/// The nine weather icon categories, keyed by OpenWeatherMap icon prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconType {
    /// `01`
    ClearSky,
    /// `02`
    FewClouds,
    /// `03`
    ScatteredClouds,
    /// `04`
    BrokenClouds,
    /// `09`
    ShowerRain,
    /// `10`
    Rain,
    /// `11`
    Thunderstorm,
    /// `13`
    Snow,
    /// `50`
    Mist,
}

impl IconType {
    /// Every variant, in icon-code order.
    pub const ALL: [IconType; 9] = [
        IconType::ClearSky,
        IconType::FewClouds,
        IconType::ScatteredClouds,
        IconType::BrokenClouds,
        IconType::ShowerRain,
        IconType::Rain,
        IconType::Thunderstorm,
        IconType::Snow,
        IconType::Mist,
    ];

    /// Resolve an OpenWeatherMap icon code such as `"04d"`.
    ///
    /// Only the two-character prefix is significant; the trailing day/night
    /// marker is ignored.
    pub fn from_code(code: &str) -> InkyResult<Self> {
        let prefix: String = code.chars().take(2).collect();
        match prefix.as_str() {
            "01" => Ok(IconType::ClearSky),
            "02" => Ok(IconType::FewClouds),
            "03" => Ok(IconType::ScatteredClouds),
            "04" => Ok(IconType::BrokenClouds),
            "09" => Ok(IconType::ShowerRain),
            "10" => Ok(IconType::Rain),
            "11" => Ok(IconType::Thunderstorm),
            "13" => Ok(IconType::Snow),
            "50" => Ok(IconType::Mist),
            _ => Err(InkyError::UnknownIconCode(code.to_string())),
        }
    }

    /// The two-character code prefix for this category.
    pub fn code(&self) -> &'static str {
        match self {
            IconType::ClearSky => "01",
            IconType::FewClouds => "02",
            IconType::ScatteredClouds => "03",
            IconType::BrokenClouds => "04",
            IconType::ShowerRain => "09",
            IconType::Rain => "10",
            IconType::Thunderstorm => "11",
            IconType::Snow => "13",
            IconType::Mist => "50",
        }
    }
}

impl fmt::Display for IconType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IconType::ClearSky => "clear sky",
            IconType::FewClouds => "few clouds",
            IconType::ScatteredClouds => "scattered clouds",
            IconType::BrokenClouds => "broken clouds",
            IconType::ShowerRain => "shower rain",
            IconType::Rain => "rain",
            IconType::Thunderstorm => "thunderstorm",
            IconType::Snow => "snow",
            IconType::Mist => "mist",
        };
        write!(f, "{}", name)
    }
}

/// Temperature presentation scale. Never changes the stored Kelvin values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    #[default]
    Celsius,
    Fahrenheit,
}

impl FromStr for ScaleType {
    type Err = InkyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "celsius" | "c" => Ok(ScaleType::Celsius),
            "fahrenheit" | "f" => Ok(ScaleType::Fahrenheit),
            other => Err(InkyError::invalid_parameter(
                "scale",
                format!("expected 'celsius' or 'fahrenheit', got '{}'", other),
            )),
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaleType::Celsius => write!(f, "celsius"),
            ScaleType::Fahrenheit => write!(f, "fahrenheit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_ignores_suffix() {
        assert_eq!(IconType::from_code("04d").unwrap(), IconType::BrokenClouds);
        assert_eq!(IconType::from_code("04n").unwrap(), IconType::BrokenClouds);
        assert_eq!(IconType::from_code("50").unwrap(), IconType::Mist);
    }

    #[test]
    fn test_code_round_trips_for_all_variants() {
        for icon in IconType::ALL {
            assert_eq!(IconType::from_code(icon.code()).unwrap(), icon);
        }
    }

    #[test]
    fn test_unknown_codes() {
        for code in ["", "0", "05d", "12n", "99", "xx"] {
            assert!(matches!(
                IconType::from_code(code),
                Err(InkyError::UnknownIconCode(_))
            ));
        }
    }

    #[test]
    fn test_scale_parsing() {
        assert_eq!("Celsius".parse::<ScaleType>().unwrap(), ScaleType::Celsius);
        assert_eq!(" fahrenheit ".parse::<ScaleType>().unwrap(), ScaleType::Fahrenheit);
        assert!("kelvin".parse::<ScaleType>().is_err());
    }
}
