//! Surface coordinates and the default anchors of the 400x300 panel layout.

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// An (x, y) pixel position on a backend surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shift by a fixed offset.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        self.offset(rhs.x, rhs.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Panel surface width in pixels.
pub const SURFACE_WIDTH: u32 = 400;

/// Panel surface height in pixels.
pub const SURFACE_HEIGHT: u32 = 300;

pub const DATE_POS: Position = Position::new(10, 5);
pub const TIME_POS: Position = Position::new(257, 5);
pub const WEATHER_FORECAST_POS: Position = Position::new(135, 50);
pub const TRAIN_TIMES_POS: Position = Position::new(10, 205);
pub const WEATHER_ICON_POS: Position = Position::new(30, 90);
pub const MINI_FORECAST_POS: Position = Position::new(30, 40);
pub const FORECAST_ICONS_POS: Position = Position::new(10, 180);

/// Vertical distance between consecutive train lines.
pub const TRAIN_LINE_SPACING: i32 = 30;

/// Horizontal distance between forecast strip entries.
pub const FORECAST_SPACING: i32 = 78;

/// Number of future days in the forecast strip.
pub const FORECAST_STRIP_DAYS: usize = 5;
