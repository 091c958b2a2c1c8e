//! Raster backend shared by the e-ink panel and the desktop preview.
//!
//! Everything is drawn in full colour onto a 400x300 canvas; the frame is
//! quantised to the panel palette only at flush, then handed to a
//! [`PanelDevice`]. Devices without a hardware border get one painted in.

use chrono::NaiveDateTime;
use inky_common::layout::{FORECAST_SPACING, FORECAST_STRIP_DAYS, SURFACE_HEIGHT, SURFACE_WIDTH, TRAIN_LINE_SPACING};
use inky_common::text::placeholder;
use inky_common::{IconType, InkyResult, Position, ScaleType, TrainSchedule, WeatherSnapshot};
use renderer::fonts::{
    GREETING_L, GREETING_M, GREETING_S, SIZE_M, SIZE_S, SIZE_XL, SIZE_XS,
};
use renderer::shapes::gen_closed_eye_icon;
use renderer::{draw_icon, Accent, Canvas, Color, Fonts, IndexedFrame, Palette, BLACK, WHITE};
use tracing::{debug, warn};

use crate::backend::{day_label, DisplayBackend, DATE_FORMAT, GOODNIGHT_MESSAGE, TIME_FORMAT};

/// Border thickness painted around the frame.
pub const BORDER_SIZE: i32 = 5;

/// Where a quantised frame ends up.
pub trait PanelDevice {
    fn name(&self) -> &'static str;

    /// Whether the border must be painted into the frame. The panel drives
    /// its border region from the controller and leaves the pixels alone.
    fn paints_border(&self) -> bool {
        false
    }

    /// Present a finished frame.
    fn show(&mut self, frame: &IndexedFrame) -> InkyResult<()>;
}

impl<T: PanelDevice + ?Sized> PanelDevice for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn paints_border(&self) -> bool {
        (**self).paints_border()
    }

    fn show(&mut self, frame: &IndexedFrame) -> InkyResult<()> {
        (**self).show(frame)
    }
}

/// Canvas-based implementation of [`DisplayBackend`].
pub struct ImageBackend<D: PanelDevice> {
    device: D,
    canvas: Canvas,
    palette: Palette,
    fonts: Fonts,
    now: NaiveDateTime,
}

impl<D: PanelDevice> ImageBackend<D> {
    /// Create a backend drawing frames timestamped `now`.
    pub fn new(device: D, accent: Accent, now: NaiveDateTime) -> InkyResult<Self> {
        Ok(Self {
            device,
            canvas: Canvas::new(SURFACE_WIDTH, SURFACE_HEIGHT, WHITE),
            palette: Palette::new(accent),
            fonts: Fonts::load()?,
            now,
        })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    fn accent(&self) -> Color {
        self.palette.accent.color()
    }

    fn text(&mut self, pos: Position, text: &str, size: f32, color: Color) {
        self.canvas.text(pos, text, &self.fonts.body, size, color);
    }

    fn greeting_text(&mut self, pos: Position, text: &str, size: f32, color: Color) {
        self.canvas.text(pos, text, &self.fonts.greeting, size, color);
    }

    /// Paint the frame border with the same stroke widths as the panel's
    /// border region.
    fn draw_border(&mut self) {
        let (w, h) = (self.canvas.width() as i32, self.canvas.height() as i32);
        let side = (BORDER_SIZE * 2) as u32;
        self.canvas.line((0, 0), (0, h), side - 1, BLACK);
        self.canvas.line((0, h), (w, h), side + 1, BLACK);
        self.canvas.line((w, h), (w, 0), side, BLACK);
        self.canvas.line((w, 0), (0, 0), side, BLACK);
    }
}

impl<D: PanelDevice> DisplayBackend for ImageBackend<D> {
    fn name(&self) -> &'static str {
        self.device.name()
    }

    fn begin(&mut self) -> InkyResult<()> {
        self.canvas.clear(WHITE);
        Ok(())
    }

    fn flush(&mut self) -> InkyResult<()> {
        if self.device.paints_border() {
            self.draw_border();
        }
        let frame = self.palette.quantise(&self.canvas);
        debug!(device = self.device.name(), accent = %self.palette.accent, "Showing frame");
        self.device.show(&frame)
    }

    fn draw_date(&mut self, pos: Position) -> InkyResult<()> {
        let date = self.now.format(DATE_FORMAT).to_string();
        self.text(pos, &date, SIZE_S, BLACK);
        Ok(())
    }

    fn draw_time(&mut self, pos: Position) -> InkyResult<()> {
        let time = format!("Updated {}", self.now.format(TIME_FORMAT));
        self.text(pos, &time, SIZE_S, BLACK);
        Ok(())
    }

    fn draw_train_times(
        &mut self,
        schedule: &TrainSchedule,
        count: usize,
        pos: Position,
    ) -> InkyResult<()> {
        for i in 0..count {
            let line = placeholder(schedule.line(i), "train data");
            let y = pos.y + i as i32 * TRAIN_LINE_SPACING;
            self.text(Position::new(pos.x, y), &line, SIZE_S, BLACK);
        }
        Ok(())
    }

    fn draw_weather_forecast(
        &mut self,
        snapshot: &WeatherSnapshot,
        scale: ScaleType,
        pos: Position,
        show_tomorrow: bool,
    ) -> InkyResult<()> {
        let temperature = placeholder(snapshot.current_temperature(scale), "temperature");
        let condition = placeholder(snapshot.current_condition(), "condition");
        let range = placeholder(snapshot.temp_range(0, scale), "range");
        let today = placeholder(snapshot.condition(0), "condition");

        self.text(pos, &temperature, SIZE_XL, BLACK);
        self.text(pos.offset(140, 13), &condition, SIZE_M, BLACK);
        self.text(pos.offset(0, 50), &range, SIZE_M, BLACK);
        self.text(pos.offset(0, 80), &today, SIZE_M, BLACK);
        if show_tomorrow {
            let tomorrow = format!("tomorrow: {}", placeholder(snapshot.condition(1), "condition"));
            self.text(pos.offset(0, 110), &tomorrow, SIZE_S, BLACK);
        }
        Ok(())
    }

    fn draw_mini_forecast(
        &mut self,
        snapshot: &WeatherSnapshot,
        scale: ScaleType,
        pos: Position,
        day: i32,
    ) -> InkyResult<()> {
        inky_common::weather::check_day(day)?;
        if day > 0 {
            let label = day_label(self.now, day);
            self.text(pos.offset(10, 5), &label, SIZE_XS, BLACK);
        }

        match snapshot.icon(day) {
            Ok(icon) => self.draw_weather_icon(icon, pos.offset(0, 27))?,
            Err(e) => warn!(day = day, error = %e, "Skipping forecast icon"),
        }

        let temperature = placeholder(snapshot.future_weather(day, scale), "weather");
        let (x, size) = if day > 0 { (pos.x + 10, SIZE_XS) } else { (pos.x, SIZE_S) };
        self.text(Position::new(x, pos.y + 90), &temperature, size, BLACK);
        Ok(())
    }

    fn draw_weather_icon(&mut self, icon: IconType, pos: Position) -> InkyResult<()> {
        draw_icon(&mut self.canvas, icon, pos, BLACK, WHITE);
        Ok(())
    }

    fn draw_forecast_icons(
        &mut self,
        snapshot: &WeatherSnapshot,
        scale: ScaleType,
        pos: Position,
    ) -> InkyResult<()> {
        for i in 0..FORECAST_STRIP_DAYS {
            let x = pos.x + i as i32 * FORECAST_SPACING;
            self.draw_mini_forecast(snapshot, scale, Position::new(x, pos.y), i as i32 + 1)?;
        }
        Ok(())
    }

    fn draw_goodnight(&mut self, snapshot: &WeatherSnapshot, scale: ScaleType) -> InkyResult<()> {
        let accent = self.accent();
        gen_closed_eye_icon(&mut self.canvas, accent);

        let x_mid = self.canvas.width() as i32 / 2;
        let y_mid = self.canvas.height() as i32 / 2;
        let (w, h) = renderer::canvas::measure_text(GOODNIGHT_MESSAGE, &self.fonts.greeting, GREETING_L);
        let message_pos = Position::new(x_mid - w / 2, y_mid - h / 2);
        self.greeting_text(message_pos, GOODNIGHT_MESSAGE, GREETING_L, BLACK);

        let range = placeholder(snapshot.temp_range(1, scale), "range");
        let outlook = placeholder(snapshot.condition(1), "condition");
        let weather_pos = Position::new(20, 210);
        self.greeting_text(weather_pos, &range, GREETING_M, accent);
        self.greeting_text(weather_pos.offset(0, 40), &outlook, GREETING_S, accent);
        Ok(())
    }
}

/// Device that keeps the last frame in memory. Used for headless renders
/// and tests.
#[derive(Debug, Default)]
pub struct MemoryDevice {
    pub frames: Vec<IndexedFrame>,
    border: bool,
}

impl MemoryDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture frames the way the desktop preview sees them.
    pub fn with_border(mut self) -> Self {
        self.border = true;
        self
    }

    pub fn last(&self) -> Option<&IndexedFrame> {
        self.frames.last()
    }
}

impl PanelDevice for MemoryDevice {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn paints_border(&self) -> bool {
        self.border
    }

    fn show(&mut self, frame: &IndexedFrame) -> InkyResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}
