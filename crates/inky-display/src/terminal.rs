//! Text rendering of frames for headless machines and quick checks.

use std::io::Write;

use chrono::NaiveDateTime;
use colored::Colorize;
use renderer::Accent;
use inky_common::layout::FORECAST_STRIP_DAYS;
use inky_common::text::placeholder;
use inky_common::{IconType, InkyResult, Position, ScaleType, TrainSchedule, WeatherSnapshot};
use tracing::warn;

use crate::backend::{day_label, DisplayBackend, DATE_FORMAT, GOODNIGHT_MESSAGE, TIME_FORMAT};

/// Emoji standing in for an icon.
pub fn icon_glyph(icon: IconType) -> &'static str {
    match icon {
        IconType::ClearSky => "\u{2600}",
        IconType::FewClouds | IconType::ScatteredClouds => "\u{26C5}",
        IconType::BrokenClouds => "\u{2601}",
        IconType::ShowerRain => "\u{1F327}",
        IconType::Rain => "\u{1F326}",
        IconType::Thunderstorm => "\u{26C8}",
        IconType::Snow => "\u{1F328}",
        IconType::Mist => "\u{1F32B}",
    }
}

/// Terminal colour for an accent. Black keeps the terminal's own
/// foreground so headings stay readable on dark backgrounds.
fn accent_color(accent: Accent) -> Option<colored::Color> {
    match accent {
        Accent::Black => None,
        Accent::Red => Some(colored::Color::Red),
        Accent::Yellow => Some(colored::Color::Yellow),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Line {
    text: String,
    emphasis: bool,
}

/// Writes each frame as plain lines of text. Positions are ignored; lines
/// appear in draw order.
pub struct TerminalBackend<W: Write> {
    out: W,
    now: NaiveDateTime,
    lines: Vec<Line>,
    color: bool,
    accent: Accent,
    boxed: bool,
}

impl TerminalBackend<std::io::Stdout> {
    /// Backend printing to stdout, coloured when stdout is a terminal.
    pub fn stdout(now: NaiveDateTime) -> Self {
        let mut backend = Self::new(std::io::stdout(), now);
        backend.color = std::io::IsTerminal::is_terminal(&std::io::stdout());
        backend.boxed = true;
        backend
    }
}

impl<W: Write> TerminalBackend<W> {
    /// Plain, unboxed output into `out`.
    pub fn new(out: W, now: NaiveDateTime) -> Self {
        Self {
            out,
            now,
            lines: Vec::new(),
            color: false,
            accent: Accent::Black,
            boxed: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Colour used for headings when colour output is on.
    pub fn with_accent(mut self, accent: Accent) -> Self {
        self.accent = accent;
        self
    }

    /// Frame the output with a box outline.
    pub fn with_box(mut self, boxed: bool) -> Self {
        self.boxed = boxed;
        self
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    /// Lines drawn since the last `begin`.
    pub fn pending_lines(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }

    fn push(&mut self, text: impl Into<String>) {
        self.lines.push(Line {
            text: text.into(),
            emphasis: false,
        });
    }

    fn push_emphasis(&mut self, text: impl Into<String>) {
        self.lines.push(Line {
            text: text.into(),
            emphasis: true,
        });
    }

    fn styled(&self, line: &Line) -> String {
        if !(self.color && line.emphasis) {
            return line.text.clone();
        }
        let bold = line.text.bold();
        match accent_color(self.accent) {
            Some(color) => bold.color(color).to_string(),
            None => bold.to_string(),
        }
    }

    fn mini_forecast_line(&self, snapshot: &WeatherSnapshot, scale: ScaleType, day: i32) -> String {
        let glyph = match snapshot.icon(day) {
            Ok(icon) => icon_glyph(icon),
            Err(e) => {
                warn!(day = day, error = %e, "Skipping forecast icon");
                "?"
            }
        };
        let weather = placeholder(snapshot.future_weather(day, scale), "weather");
        format!("{}: {} {}", day_label(self.now, day), glyph, weather)
    }
}

impl<W: Write> DisplayBackend for TerminalBackend<W> {
    fn name(&self) -> &'static str {
        "terminal"
    }

    fn begin(&mut self) -> InkyResult<()> {
        self.lines.clear();
        Ok(())
    }

    fn flush(&mut self) -> InkyResult<()> {
        let lines = std::mem::take(&mut self.lines);
        let mut rendered: Vec<String> = lines.iter().map(|l| self.styled(l)).collect();

        if self.boxed {
            let width = lines
                .iter()
                .map(|l| l.text.chars().count())
                .max()
                .unwrap_or(0);
            let edge = "\u{2500}".repeat(width + 2);
            let mut framed = Vec::with_capacity(rendered.len() + 2);
            framed.push(format!("\u{256D}{}", edge));
            framed.extend(rendered.drain(..).map(|l| format!("\u{2502} {}", l)));
            framed.push(format!("\u{2570}{}", edge));
            rendered = framed;
        }

        for line in &rendered {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn draw_date(&mut self, _pos: Position) -> InkyResult<()> {
        let date = self.now.format(DATE_FORMAT).to_string();
        self.push_emphasis(date);
        Ok(())
    }

    fn draw_time(&mut self, _pos: Position) -> InkyResult<()> {
        let time = self.now.format(TIME_FORMAT).to_string();
        self.push(time);
        Ok(())
    }

    fn draw_train_times(
        &mut self,
        schedule: &TrainSchedule,
        count: usize,
        _pos: Position,
    ) -> InkyResult<()> {
        for i in 0..count {
            let line = placeholder(schedule.line(i), "train data");
            self.push(line);
        }
        Ok(())
    }

    fn draw_weather_forecast(
        &mut self,
        snapshot: &WeatherSnapshot,
        scale: ScaleType,
        _pos: Position,
        show_tomorrow: bool,
    ) -> InkyResult<()> {
        self.push_emphasis(placeholder(snapshot.current_temperature(scale), "temperature"));
        self.push(placeholder(snapshot.current_condition(), "condition"));
        self.push(placeholder(snapshot.temp_range(0, scale), "range"));
        self.push(placeholder(snapshot.condition(0), "condition"));
        if show_tomorrow {
            let tomorrow = placeholder(snapshot.condition(1), "condition");
            self.push(format!("tomorrow: {}", tomorrow));
        }
        Ok(())
    }

    fn draw_mini_forecast(
        &mut self,
        snapshot: &WeatherSnapshot,
        scale: ScaleType,
        _pos: Position,
        day: i32,
    ) -> InkyResult<()> {
        inky_common::weather::check_day(day)?;
        let line = self.mini_forecast_line(snapshot, scale, day);
        self.push(line);
        Ok(())
    }

    fn draw_weather_icon(&mut self, icon: IconType, _pos: Position) -> InkyResult<()> {
        self.push(icon_glyph(icon));
        Ok(())
    }

    fn draw_forecast_icons(
        &mut self,
        snapshot: &WeatherSnapshot,
        scale: ScaleType,
        pos: Position,
    ) -> InkyResult<()> {
        for day in 1..=FORECAST_STRIP_DAYS as i32 {
            self.draw_mini_forecast(snapshot, scale, pos, day)?;
        }
        Ok(())
    }

    fn draw_goodnight(&mut self, snapshot: &WeatherSnapshot, scale: ScaleType) -> InkyResult<()> {
        self.push_emphasis(GOODNIGHT_MESSAGE);
        self.push(placeholder(snapshot.temp_range(1, scale), "range"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_icon_has_a_glyph() {
        for icon in IconType::ALL {
            assert!(!icon_glyph(icon).is_empty());
        }
        assert_eq!(icon_glyph(IconType::FewClouds), icon_glyph(IconType::ScatteredClouds));
    }

    #[test]
    fn test_accent_colors() {
        assert_eq!(accent_color(Accent::Black), None);
        assert_eq!(accent_color(Accent::Red), Some(colored::Color::Red));
        assert_eq!(accent_color(Accent::Yellow), Some(colored::Color::Yellow));
    }
}
