//! Embedded typefaces and the panel's text sizes.

use inky_common::{InkyError, InkyResult};
use rusttype::Font;

/// DejaVu Sans Bold, used for all data text.
const BODY_FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");

/// DejaVu Sans, used for the night greeting.
const GREETING_FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

pub const SIZE_XS: f32 = 16.0;
pub const SIZE_S: f32 = 20.0;
pub const SIZE_M: f32 = 25.0;
pub const SIZE_L: f32 = 35.0;
pub const SIZE_XL: f32 = 40.0;

pub const GREETING_S: f32 = 25.0;
pub const GREETING_M: f32 = 30.0;
pub const GREETING_L: f32 = 40.0;

/// The two typefaces a frame draws with.
#[derive(Debug, Clone)]
pub struct Fonts {
    pub body: Font<'static>,
    pub greeting: Font<'static>,
}

impl Fonts {
    /// Parse the embedded font files.
    pub fn load() -> InkyResult<Self> {
        Ok(Self {
            body: parse(BODY_FONT_DATA, "DejaVuSans-Bold")?,
            greeting: parse(GREETING_FONT_DATA, "DejaVuSans")?,
        })
    }
}

fn parse(data: &'static [u8], name: &str) -> InkyResult<Font<'static>> {
    Font::try_from_bytes(data).ok_or_else(|| {
        tracing::warn!(font = name, "Failed to parse embedded font");
        InkyError::Render(format!("embedded font {} is not a valid TrueType file", name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_fonts_parse() {
        let fonts = Fonts::load().unwrap();
        assert!(fonts.body.glyph_count() > 100);
        assert!(fonts.greeting.glyph_count() > 100);
    }
}
