//! Three-colour panel palette and nearest-colour quantisation.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use inky_common::InkyError;

use crate::canvas::{Canvas, Color, BLACK, RED, WHITE, YELLOW};

/// Palette index of white.
pub const WHITE_INDEX: u8 = 0;
/// Palette index of black.
pub const BLACK_INDEX: u8 = 1;
/// Palette index of the accent colour.
pub const ACCENT_INDEX: u8 = 2;

/// The third ink of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accent {
    /// Black/white panel; the accent prints as black.
    Black,
    Red,
    #[default]
    Yellow,
}

impl Accent {
    pub fn color(&self) -> Color {
        match self {
            Accent::Black => BLACK,
            Accent::Red => RED,
            Accent::Yellow => YELLOW,
        }
    }
}

impl FromStr for Accent {
    type Err = InkyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "black" => Ok(Accent::Black),
            "red" => Ok(Accent::Red),
            "yellow" => Ok(Accent::Yellow),
            other => Err(InkyError::invalid_parameter(
                "color",
                format!("expected black, red or yellow, got '{}'", other),
            )),
        }
    }
}

impl fmt::Display for Accent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Accent::Black => "black",
            Accent::Red => "red",
            Accent::Yellow => "yellow",
        };
        write!(f, "{}", name)
    }
}

/// White, black and one accent, in panel index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Accent,
}

impl Palette {
    pub fn new(accent: Accent) -> Self {
        Self { accent }
    }

    pub fn colors(&self) -> [Color; 3] {
        [WHITE, BLACK, self.accent.color()]
    }

    /// Index of the palette entry closest to `color` (RGB distance; ties go
    /// to the lower index).
    pub fn nearest(&self, color: Color) -> u8 {
        let Rgba([r, g, b, _]) = color;
        let mut best = (u32::MAX, WHITE_INDEX);
        for (index, Rgba([pr, pg, pb, _])) in self.colors().iter().enumerate() {
            let d = sq(r, *pr) + sq(g, *pg) + sq(b, *pb);
            if d < best.0 {
                best = (d, index as u8);
            }
        }
        best.1
    }

    /// Map every canvas pixel onto the palette.
    pub fn quantise(&self, canvas: &Canvas) -> IndexedFrame {
        let indices = canvas
            .image()
            .pixels()
            .map(|pixel| self.nearest(*pixel))
            .collect();
        IndexedFrame {
            width: canvas.width(),
            height: canvas.height(),
            palette: self.colors(),
            indices,
        }
    }
}

fn sq(a: u8, b: u8) -> u32 {
    let d = a as i32 - b as i32;
    (d * d) as u32
}

/// A quantised frame: one palette index per pixel, row major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedFrame {
    pub width: u32,
    pub height: u32,
    pub palette: [Color; 3],
    pub indices: Vec<u8>,
}

impl IndexedFrame {
    pub fn index_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.indices.get((y * self.width + x) as usize).copied()
    }

    /// Palette as `(r, g, b, a)` tuples for the PNG encoder.
    pub fn palette_tuples(&self) -> Vec<(u8, u8, u8, u8)> {
        self.palette
            .iter()
            .map(|Rgba([r, g, b, a])| (*r, *g, *b, *a))
            .collect()
    }

    /// Pack one bit per pixel, MSB first, set where `predicate` holds.
    /// Rows are padded to whole bytes.
    pub fn pack_plane<F: Fn(u8) -> bool>(&self, predicate: F) -> Vec<u8> {
        let row_bytes = (self.width as usize).div_ceil(8);
        let mut plane = vec![0u8; row_bytes * self.height as usize];
        for (i, &index) in self.indices.iter().enumerate() {
            if predicate(index) {
                let x = i % self.width as usize;
                let y = i / self.width as usize;
                plane[y * row_bytes + x / 8] |= 0x80 >> (x % 8);
            }
        }
        plane
    }
}
