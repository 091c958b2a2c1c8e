//! Temperature unit conversion.
//!
//! All conversions round to one decimal place. The rounding policy is the
//! nearest tenth of the exact binary value, with exact ties going to the
//! even digit, so `kelvin_to_celsius(0.0)` yields `-273.1` (the double
//! nearest to 273.15 sits just below the tie). Both conversions share
//! [`round_tenth`], which keeps rendered strings stable between scales.

use crate::error::{InkyError, InkyResult};
use crate::icon::ScaleType;

/// Offset between the Kelvin and Celsius scales.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Lowest physically meaningful Celsius temperature.
pub const ABSOLUTE_ZERO_C: f64 = -273.15;

/// Degree suffix for Celsius strings.
pub const DEG_C: &str = "\u{00B0}C";

/// Degree suffix for Fahrenheit strings.
pub const DEG_F: &str = "\u{00B0}F";

/// Round a value to one decimal place.
pub fn round_tenth(value: f64) -> InkyResult<f64> {
    if !value.is_finite() {
        return Err(InkyError::OutOfDomain(format!("{} is not finite", value)));
    }
    format!("{:.1}", value)
        .parse::<f64>()
        .map_err(|e| InkyError::OutOfDomain(format!("cannot round {}: {}", value, e)))
}

/// Convert Kelvin to Celsius, rounded to one decimal place.
///
/// Negative Kelvin values are rejected with `OutOfDomain`.
pub fn kelvin_to_celsius(kelvin: f64) -> InkyResult<f64> {
    if kelvin.is_nan() || kelvin < 0.0 {
        return Err(InkyError::OutOfDomain(format!(
            "Kelvin temperature cannot be less than 0 (got {})",
            kelvin
        )));
    }
    round_tenth(kelvin - KELVIN_OFFSET)
}

/// Convert Celsius to Fahrenheit, rounded to one decimal place.
///
/// Values below absolute zero are rejected with `OutOfDomain`.
pub fn celsius_to_fahrenheit(celsius: f64) -> InkyResult<f64> {
    if celsius.is_nan() || celsius < ABSOLUTE_ZERO_C {
        return Err(InkyError::OutOfDomain(format!(
            "Celsius temperature cannot be less than {} (got {})",
            ABSOLUTE_ZERO_C, celsius
        )));
    }
    round_tenth(celsius * 9.0 / 5.0 + 32.0)
}

/// Format a Kelvin reading in the requested scale, e.g. `"16.3°C"`.
///
/// Fahrenheit is derived from the already-rounded Celsius value, so the two
/// scales never disagree about which tenth a reading falls on.
pub fn format_temperature(kelvin: f64, scale: ScaleType) -> InkyResult<String> {
    let celsius = kelvin_to_celsius(kelvin)?;
    match scale {
        ScaleType::Celsius => Ok(format!("{:.1}{}", celsius, DEG_C)),
        ScaleType::Fahrenheit => {
            let fahrenheit = celsius_to_fahrenheit(celsius)?;
            Ok(format!("{:.1}{}", fahrenheit, DEG_F))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_tenth_rejects_non_finite() {
        assert!(round_tenth(f64::NAN).is_err());
        assert!(round_tenth(f64::INFINITY).is_err());
    }

    #[test]
    fn test_round_tenth_values() {
        assert_eq!(round_tenth(16.31).unwrap(), 16.3);
        assert_eq!(round_tenth(-0.04).unwrap(), 0.0);
        assert_eq!(round_tenth(99.96).unwrap(), 100.0);
    }

    #[test]
    fn test_format_temperature_scales() {
        assert_eq!(format_temperature(289.46, ScaleType::Celsius).unwrap(), "16.3°C");
        assert_eq!(format_temperature(273.15, ScaleType::Fahrenheit).unwrap(), "32.0°F");
        assert_eq!(format_temperature(373.15, ScaleType::Celsius).unwrap(), "100.0°C");
    }

    #[test]
    fn test_format_temperature_rejects_negative_kelvin() {
        let err = format_temperature(-5.0, ScaleType::Celsius).unwrap_err();
        assert!(matches!(err, InkyError::OutOfDomain(_)));
    }
}
