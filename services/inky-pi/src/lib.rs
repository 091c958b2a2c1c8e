//! inky-pi: train times and weather on an e-ink display.

pub mod config;
pub mod logging;
pub mod program;

pub use config::Settings;
pub use program::{render, run, DisplayOption, OutputKind, RenderData};
