//! The render programs: which draw calls make up each screen.

use std::fmt;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::ValueEnum;
use inky_common::layout::{
    DATE_POS, FORECAST_ICONS_POS, MINI_FORECAST_POS, TIME_POS, TRAIN_TIMES_POS,
    WEATHER_FORECAST_POS, WEATHER_ICON_POS,
};
use inky_common::{InkyResult, ScaleType, TrainSchedule, WeatherSnapshot};
use inky_display::{
    open_panel, scoped, DesktopPreview, DisplayBackend, ImageBackend, TerminalBackend,
};
use inky_sources::{TrainSource, WeatherSource};
use renderer::Accent;
use tracing::{info, warn};

use crate::config::Settings;

/// Which screen to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DisplayOption {
    #[default]
    Train,
    Weather,
    Night,
}

impl fmt::Display for DisplayOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayOption::Train => write!(f, "train"),
            DisplayOption::Weather => write!(f, "weather"),
            DisplayOption::Night => write!(f, "night"),
        }
    }
}

/// Where the screen goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputKind {
    #[default]
    Inky,
    Terminal,
    Desktop,
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputKind::Inky => write!(f, "inky"),
            OutputKind::Terminal => write!(f, "terminal"),
            OutputKind::Desktop => write!(f, "desktop"),
        }
    }
}

/// Data fetched for one render.
#[derive(Debug, Clone, Default)]
pub struct RenderData {
    pub weather: WeatherSnapshot,
    /// Only fetched for the train screen.
    pub trains: Option<TrainSchedule>,
}

/// The night screen always uses a coloured accent; a black-only setting
/// falls back to yellow.
pub fn night_accent(accent: Accent) -> Accent {
    match accent {
        Accent::Black => Accent::Yellow,
        other => other,
    }
}

/// Today's icon, skipped with a warning when the snapshot has no usable code.
fn draw_current_icon<B: DisplayBackend + ?Sized>(
    backend: &mut B,
    weather: &WeatherSnapshot,
) -> InkyResult<()> {
    match weather.icon(0) {
        Ok(icon) => backend.draw_weather_icon(icon, WEATHER_ICON_POS),
        Err(e) => {
            warn!(error = %e, kind = e.kind(), "Skipping current weather icon");
            Ok(())
        }
    }
}

/// Date, time, current weather with icon, and the next departures.
pub fn train_program<B: DisplayBackend + ?Sized>(
    backend: &mut B,
    weather: &WeatherSnapshot,
    trains: &TrainSchedule,
    scale: ScaleType,
) -> InkyResult<()> {
    scoped(backend, |b| {
        b.draw_date(DATE_POS)?;
        b.draw_time(TIME_POS)?;
        draw_current_icon(b, weather)?;
        b.draw_weather_forecast(weather, scale, WEATHER_FORECAST_POS, true)?;
        b.draw_train_times(trains, trains.requested, TRAIN_TIMES_POS)
    })
}

/// Date, time, today's mini forecast, the forecast text and a five-day strip.
pub fn weather_program<B: DisplayBackend + ?Sized>(
    backend: &mut B,
    weather: &WeatherSnapshot,
    scale: ScaleType,
) -> InkyResult<()> {
    scoped(backend, |b| {
        b.draw_date(DATE_POS)?;
        b.draw_time(TIME_POS)?;
        b.draw_mini_forecast(weather, scale, MINI_FORECAST_POS, 0)?;
        b.draw_weather_forecast(weather, scale, WEATHER_FORECAST_POS, false)?;
        b.draw_forecast_icons(weather, scale, FORECAST_ICONS_POS)
    })
}

/// Good night greeting with tomorrow's outlook.
pub fn night_program<B: DisplayBackend + ?Sized>(
    backend: &mut B,
    weather: &WeatherSnapshot,
    scale: ScaleType,
) -> InkyResult<()> {
    scoped(backend, |b| b.draw_goodnight(weather, scale))
}

/// Run `option` against an already open backend.
pub fn render<B: DisplayBackend + ?Sized>(
    option: DisplayOption,
    backend: &mut B,
    data: &RenderData,
    scale: ScaleType,
) -> Result<()> {
    info!(option = %option, backend = backend.name(), "Rendering");
    match option {
        DisplayOption::Train => {
            let trains = data
                .trains
                .as_ref()
                .context("train screen needs departures")?;
            train_program(backend, &data.weather, trains, scale)?
        }
        DisplayOption::Weather => weather_program(backend, &data.weather, scale)?,
        DisplayOption::Night => night_program(backend, &data.weather, scale)?,
    }
    info!(option = %option, "Render complete");
    Ok(())
}

/// Fetch what `option` needs. Any fetch failure aborts.
pub fn fetch(
    option: DisplayOption,
    weather: &dyn WeatherSource,
    trains: &dyn TrainSource,
) -> Result<RenderData> {
    let snapshot = weather
        .fetch_weather()
        .context("Failed to fetch weather data")?;
    let schedule = match option {
        DisplayOption::Train => Some(
            trains
                .fetch_departures()
                .context("Failed to fetch train departures")?,
        ),
        DisplayOption::Weather | DisplayOption::Night => None,
    };
    Ok(RenderData {
        weather: snapshot,
        trains: schedule,
    })
}

/// Accent a program draws with on any backend.
pub fn backend_accent(option: DisplayOption, configured: Accent) -> Accent {
    match option {
        DisplayOption::Night => night_accent(configured),
        DisplayOption::Train | DisplayOption::Weather => configured,
    }
}

/// Construct the requested backend. The panel is never swapped for another
/// output when it is unavailable.
pub fn open_backend(
    output: OutputKind,
    option: DisplayOption,
    settings: &Settings,
    now: NaiveDateTime,
) -> Result<Box<dyn DisplayBackend>> {
    let accent = backend_accent(option, settings.accent);
    let backend: Box<dyn DisplayBackend> = match output {
        OutputKind::Inky => {
            let panel = open_panel().context("Inky panel unavailable")?;
            Box::new(ImageBackend::new(panel, accent, now)?)
        }
        OutputKind::Desktop => {
            let preview = DesktopPreview::new(settings.desktop_preview_path.clone());
            Box::new(ImageBackend::new(preview, accent, now)?)
        }
        OutputKind::Terminal => Box::new(TerminalBackend::stdout(now).with_accent(accent)),
    };
    info!(output = %output, accent = %accent, "Backend ready");
    Ok(backend)
}

/// Fetch, open the output and render one screen.
pub fn run(
    option: DisplayOption,
    output: OutputKind,
    settings: &Settings,
    weather: &dyn WeatherSource,
    trains: &dyn TrainSource,
    now: NaiveDateTime,
) -> Result<()> {
    let data = fetch(option, weather, trains)?;
    let mut backend = open_backend(output, option, settings, now)?;
    render(option, backend.as_mut(), &data, settings.scale)
}
