//! Weather icon composition.

use inky_common::{IconType, Position};
use tracing::debug;

use crate::canvas::{Canvas, Color};
use crate::shapes::{
    gen_large_cloud, gen_large_sun, gen_lightning, gen_mist, gen_raindrop, gen_small_cloud,
    gen_small_sun, gen_snowflake,
};

/// Approximate footprint of every icon, in pixels.
pub const ICON_SIZE: (u32, u32) = (70, 62);

/// Draw `icon` with its top-left anchor at `pos`.
///
/// `color` paints the outlines, `neg` the cut-out negative space.
pub fn draw_icon(canvas: &mut Canvas, icon: IconType, pos: Position, color: Color, neg: Color) {
    debug!(icon = %icon, x = pos.x, y = pos.y, "Drawing weather icon");
    match icon {
        IconType::ClearSky => gen_large_sun(canvas, color, neg, pos.offset(7, 0)),
        IconType::FewClouds => {
            gen_small_sun(canvas, color, neg, pos);
            gen_large_cloud(canvas, color, neg, pos.offset(0, 5));
        }
        IconType::ScatteredClouds => gen_large_cloud(canvas, color, neg, pos),
        IconType::BrokenClouds => {
            gen_large_cloud(canvas, color, neg, pos);
            gen_small_cloud(canvas, color, neg, pos.offset(30, 25));
        }
        IconType::ShowerRain => {
            gen_large_cloud(canvas, color, neg, pos);
            gen_raindrop(canvas, color, pos.offset(25, 45));
            gen_raindrop(canvas, color, pos.offset(42, 45));
        }
        IconType::Rain => {
            gen_small_sun(canvas, color, neg, pos);
            gen_large_cloud(canvas, color, neg, pos.offset(0, 5));
            gen_raindrop(canvas, color, pos.offset(25, 50));
            gen_raindrop(canvas, color, pos.offset(42, 50));
        }
        IconType::Thunderstorm => {
            gen_large_cloud(canvas, color, neg, pos);
            gen_lightning(canvas, color, pos.offset(30, 45));
        }
        IconType::Snow => {
            gen_large_cloud(canvas, color, neg, pos);
            gen_snowflake(canvas, color, pos.offset(12, 45));
            gen_snowflake(canvas, color, pos.offset(26, 50));
            gen_snowflake(canvas, color, pos.offset(40, 45));
        }
        IconType::Mist => gen_mist(canvas, color, pos.offset(5, 0)),
    }
}

/// Render `icon` alone on a fresh `ICON_SIZE` canvas.
pub fn render_icon(icon: IconType, color: Color, neg: Color) -> Canvas {
    let mut canvas = Canvas::new(ICON_SIZE.0, ICON_SIZE.1, neg);
    draw_icon(&mut canvas, icon, Position::new(0, 0), color, neg);
    canvas
}
