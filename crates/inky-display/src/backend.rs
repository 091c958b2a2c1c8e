//! The display capability interface shared by every output surface.

use chrono::{Duration, NaiveDateTime};
use inky_common::{IconType, InkyResult, Position, ScaleType, TrainSchedule, WeatherSnapshot};

/// Date line format, e.g. "Tue 03 Sep 2024".
pub const DATE_FORMAT: &str = "%a %d %b %Y";

/// Short day format for forecast labels, e.g. "Wed 04".
pub const SHORT_DATE_FORMAT: &str = "%a %d";

/// Clock format.
pub const TIME_FORMAT: &str = "%H:%M";

/// Greeting on the night screen.
pub const GOODNIGHT_MESSAGE: &str = "Good Night ^^";

/// A surface that frames are drawn onto.
///
/// Drawing calls only mutate in-memory state; nothing reaches the output
/// until [`flush`](DisplayBackend::flush). Use [`Frame`](crate::Frame) or
/// [`scoped`](crate::scoped) rather than calling `begin`/`flush` directly so
/// every frame is flushed exactly once.
pub trait DisplayBackend {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Start a fresh frame, discarding anything drawn before.
    fn begin(&mut self) -> InkyResult<()>;

    /// Push the current frame to the output.
    fn flush(&mut self) -> InkyResult<()>;

    fn draw_date(&mut self, pos: Position) -> InkyResult<()>;

    fn draw_time(&mut self, pos: Position) -> InkyResult<()>;

    /// Draw `count` train slots, one per line.
    fn draw_train_times(
        &mut self,
        schedule: &TrainSchedule,
        count: usize,
        pos: Position,
    ) -> InkyResult<()>;

    /// Current temperature and condition, today's range and description,
    /// and optionally tomorrow's description.
    fn draw_weather_forecast(
        &mut self,
        snapshot: &WeatherSnapshot,
        scale: ScaleType,
        pos: Position,
        show_tomorrow: bool,
    ) -> InkyResult<()>;

    /// Icon, date label and temperature for a single day.
    fn draw_mini_forecast(
        &mut self,
        snapshot: &WeatherSnapshot,
        scale: ScaleType,
        pos: Position,
        day: i32,
    ) -> InkyResult<()>;

    fn draw_weather_icon(&mut self, icon: IconType, pos: Position) -> InkyResult<()>;

    /// Mini forecasts for the next five days.
    fn draw_forecast_icons(
        &mut self,
        snapshot: &WeatherSnapshot,
        scale: ScaleType,
        pos: Position,
    ) -> InkyResult<()>;

    /// Night screen: greeting plus tomorrow's outlook.
    fn draw_goodnight(&mut self, snapshot: &WeatherSnapshot, scale: ScaleType) -> InkyResult<()>;
}

/// Calendar label for `day` days after `now`.
pub fn day_label(now: NaiveDateTime, day: i32) -> String {
    (now + Duration::days(day as i64))
        .format(SHORT_DATE_FORMAT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_day_label_rolls_over_month() {
        let now = NaiveDate::from_ymd_opt(2024, 8, 30)
            .and_then(|d| d.and_hms_opt(7, 45, 0))
            .unwrap();
        assert_eq!(day_label(now, 0), "Fri 30");
        assert_eq!(day_label(now, 3), "Mon 02");
    }
}
