//! Raster rendering for the inky-pi panel layouts.
//!
//! - Drawing surface and primitives (`canvas`)
//! - Weather icon shapes and their compositions (`shapes`, `icons`)
//! - Three-colour palette quantisation (`palette`)
//! - PNG encoding of finished frames (`png`)

pub mod canvas;
pub mod fonts;
pub mod icons;
pub mod palette;
pub mod png;
pub mod shapes;

pub use canvas::{Canvas, Color, BLACK, RED, WHITE, YELLOW};
pub use fonts::Fonts;
pub use icons::{draw_icon, render_icon};
pub use palette::{Accent, IndexedFrame, Palette};
