//! Canned data for rendering tests.

use chrono::{NaiveDate, NaiveDateTime};
use inky_common::{CurrentConditions, DailyForecast, TrainSchedule, TrainService, WeatherSnapshot, FORECAST_DAYS};

/// Fixed render clock: Fri 30 Aug 2024, 07:45.
pub fn render_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 8, 30)
        .and_then(|d| d.and_hms_opt(7, 45, 0))
        .expect("valid fixture date")
}

/// Icon codes used for days 0..8 of [`sample_snapshot`].
pub const SAMPLE_DAILY_ICONS: [&str; FORECAST_DAYS] =
    ["01d", "02d", "03d", "04d", "09d", "10d", "11d", "13d"];

/// One forecast day with the given Kelvin temperatures.
pub fn forecast_day(min: f64, max: f64, day: f64, icon: &str, description: &str) -> DailyForecast {
    DailyForecast {
        temp_min: Some(min),
        temp_max: Some(max),
        temp_day: Some(day),
        icon: Some(icon.to_string()),
        description: Some(description.to_string()),
    }
}

/// A complete eight-day snapshot.
///
/// Current: 289.46K (16.3°C), "Clouds", icon "04d". Day `d` runs from
/// 283.15K to 293.15K (10.0°C to 20.0°C) with a daytime reading of
/// `288.15 + d` and the description "day <d>".
pub fn sample_snapshot() -> WeatherSnapshot {
    let daily = SAMPLE_DAILY_ICONS
        .iter()
        .enumerate()
        .map(|(d, icon)| forecast_day(283.15, 293.15, 288.15 + d as f64, icon, &format!("day {}", d)))
        .collect();
    WeatherSnapshot::new(
        CurrentConditions {
            temp: Some(289.46),
            condition: Some("Clouds".to_string()),
            icon: Some("04d".to_string()),
        },
        daily,
    )
}

/// Snapshot with nothing in it, as produced when a fetch fails.
pub fn empty_snapshot() -> WeatherSnapshot {
    WeatherSnapshot::default()
}

pub fn service(time: &str, platform: Option<&str>, destination: &str, status: &str) -> TrainService {
    TrainService {
        scheduled: Some(time.to_string()),
        platform: platform.map(str::to_string),
        destination: Some(destination.to_string()),
        status: Some(status.to_string()),
    }
}

/// Two services out of three requested slots.
pub fn sample_schedule() -> TrainSchedule {
    TrainSchedule {
        origin: "Bethnal Green".to_string(),
        destination: "London Liverpool Street".to_string(),
        requested: 3,
        services: Some(vec![
            service("07:52", Some("1"), "London Liverpool Street", "On time"),
            service("08:04", None, "London Liverpool Street", "08:09"),
        ]),
        advisory: None,
    }
}

/// No services running, with no advisory either.
pub fn cancelled_schedule() -> TrainSchedule {
    TrainSchedule {
        origin: "Bethnal Green".to_string(),
        destination: "London Liverpool Street".to_string(),
        requested: 3,
        services: None,
        advisory: None,
    }
}

/// No services, with a network advisory to display instead.
pub fn advisory_schedule(advisory: &str) -> TrainSchedule {
    TrainSchedule {
        advisory: Some(advisory.to_string()),
        ..cancelled_schedule()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_snapshot_is_complete() {
        let snapshot = sample_snapshot();
        assert_eq!(snapshot.daily.len(), FORECAST_DAYS);
        for day in 0..FORECAST_DAYS as i32 {
            assert!(snapshot.icon(day).is_ok());
        }
    }

    #[test]
    fn test_render_time() {
        assert_eq!(render_time().format("%a %d %b %Y %H:%M").to_string(), "Fri 30 Aug 2024 07:45");
    }
}
