//! Common types and utilities shared across all inky-pi crates.

pub mod error;
pub mod icon;
pub mod layout;
pub mod text;
pub mod train;
pub mod units;
pub mod weather;

pub use error::{InkyError, InkyResult};
pub use icon::{IconType, ScaleType};
pub use layout::Position;
pub use text::{abbreviate_station_name, format_error_message, format_train_string, placeholder};
pub use train::{TrainSchedule, TrainService};
pub use units::{celsius_to_fahrenheit, kelvin_to_celsius};
pub use weather::{CurrentConditions, DailyForecast, WeatherSnapshot, FORECAST_DAYS};
