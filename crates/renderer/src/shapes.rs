//! Base vector shapes for the weather icons.
//!
//! Every generator draws at fixed integer offsets from its anchor. Two-tone
//! shapes paint the outline in `color` first and then cut negative space in
//! `neg`, so draw order inside each function is significant.

use inky_common::Position;

use crate::canvas::{Canvas, Color};

const LARGE_SUN_STROKE: u32 = 5;
const SMALL_SUN_STROKE: u32 = 5;
const SNOWFLAKE_STROKE: u32 = 2;
const MIST_STROKE: u32 = 4;
const CLOSED_EYE_STROKE: u32 = 8;

/// 58x57 sun with four triangular rays and two diagonal rays.
pub fn gen_large_sun(canvas: &mut Canvas, color: Color, neg: Color, pos: Position) {
    let (x, y) = (pos.x, pos.y);
    canvas.polygon(&[(x + 29, y), (x + 34, y + 16), (x + 24, y + 16)], color);
    canvas.polygon(&[(x + 29, y + 56), (x + 34, y + 46), (x + 24, y + 46)], color);
    canvas.polygon(
        &[(x, y + 28), (x + 17, y + 23), (x + 17, y + 33), (x + 1, y + 28)],
        color,
    );
    canvas.polygon(&[(x + 57, y + 28), (x + 41, y + 23), (x + 41, y + 33)], color);
    canvas.line((x + 10, y + 10), (x + 47, y + 47), LARGE_SUN_STROKE, color);
    canvas.line((x + 10, y + 47), (x + 47, y + 10), LARGE_SUN_STROKE, color);
    canvas.ellipse((x + 12, y + 12, x + 45, y + 45), neg);
    canvas.ellipse((x + 17, y + 17, x + 40, y + 40), color);
}

/// 30x25 sun that peeks out from behind a cloud.
pub fn gen_small_sun(canvas: &mut Canvas, color: Color, neg: Color, pos: Position) {
    let (x, y) = (pos.x, pos.y);
    canvas.line((x + 5, y + 5), (x + 25, y + 25), SMALL_SUN_STROKE, color);
    canvas.line((x + 5, y + 25), (x + 25, y + 5), SMALL_SUN_STROKE, color);
    canvas.polygon(&[(x + 11, y + 10), (x, y + 15), (x + 20, y + 19)], color);
    canvas.polygon(&[(x + 15, y), (x + 10, y + 10), (x + 20, y + 10)], color);
    canvas.polygon(&[(x + 20, y + 10), (x + 30, y + 15), (x + 20, y + 20)], color);
    canvas.ellipse((x + 5, y + 5, x + 25, y + 25), color);
    canvas.ellipse((x + 10, y + 10, x + 20, y + 20), neg);
}

/// 65x40 cloud: four lobes with hollow centres.
pub fn gen_large_cloud(canvas: &mut Canvas, color: Color, neg: Color, pos: Position) {
    let (x, y) = (pos.x, pos.y);
    canvas.ellipse((x, y + 20, x + 20, y + 40), color);
    canvas.ellipse((x + 5, y + 10, x + 35, y + 40), color);
    canvas.ellipse((x + 15, y, x + 55, y + 40), color);
    canvas.ellipse((x + 35, y + 10, x + 65, y + 40), color);

    canvas.ellipse((x + 5, y + 25, x + 15, y + 35), neg);
    canvas.ellipse((x + 10, y + 15, x + 30, y + 35), neg);
    canvas.ellipse((x + 20, y + 5, x + 50, y + 35), neg);
    canvas.ellipse((x + 40, y + 15, x + 60, y + 35), neg);
}

/// 36x21 cloud, drawn over a large cloud for "broken clouds".
pub fn gen_small_cloud(canvas: &mut Canvas, color: Color, neg: Color, pos: Position) {
    let (x, y) = (pos.x, pos.y);
    canvas.ellipse((x, y + 10, x + 11, y + 21), color);
    canvas.ellipse((x + 5, y + 5, x + 21, y + 21), color);
    canvas.ellipse((x + 10, y, x + 31, y + 21), color);
    canvas.ellipse((x + 20, y + 5, x + 36, y + 21), color);

    canvas.ellipse((x + 3, y + 13, x + 8, y + 18), neg);
    canvas.ellipse((x + 8, y + 8, x + 18, y + 18), neg);
    canvas.ellipse((x + 13, y + 3, x + 28, y + 18), neg);
    canvas.ellipse((x + 23, y + 8, x + 33, y + 18), neg);
}

pub fn gen_raindrop(canvas: &mut Canvas, color: Color, pos: Position) {
    let (x, y) = (pos.x, pos.y);
    canvas.ellipse((x + 3, y + 3, x + 8, y + 7), color);
    canvas.polygon(&[(x, y), (x + 6, y + 6), (x + 7, y + 3), (x + 3, y)], color);
}

pub fn gen_lightning(canvas: &mut Canvas, color: Color, pos: Position) {
    let (x, y) = (pos.x, pos.y);
    canvas.polygon(
        &[
            (x, y),
            (x + 8, y),
            (x + 12, y + 6),
            (x + 6, y + 6),
            (x + 8, y + 12),
            (x, y + 4),
            (x + 7, y + 4),
        ],
        color,
    );
}

pub fn gen_snowflake(canvas: &mut Canvas, color: Color, pos: Position) {
    let (x, y) = (pos.x, pos.y);
    canvas.line((x + 5, y), (x + 5, y + 8), SNOWFLAKE_STROKE, color);
    canvas.line((x + 1, y + 1), (x + 10, y + 6), SNOWFLAKE_STROKE, color);
    canvas.line((x + 1, y + 6), (x + 10, y + 1), SNOWFLAKE_STROKE, color);
}

/// Six staggered horizontal strokes.
pub fn gen_mist(canvas: &mut Canvas, color: Color, pos: Position) {
    let (x, y) = (pos.x, pos.y);
    let strokes = [
        (22, 40, 0),
        (4, 47, 8),
        (15, 60, 16),
        (0, 55, 24),
        (9, 51, 32),
        (20, 40, 40),
    ];
    for (x0, x1, dy) in strokes {
        canvas.line((x + x0, y + dy), (x + x1, y + dy), MIST_STROKE, color);
    }
}

/// Sleeping eye centred horizontally at the top of the surface: a lid arc
/// with four lashes.
pub fn gen_closed_eye_icon(canvas: &mut Canvas, color: Color) {
    let x_mid = canvas.width() as i32 / 2;
    let y_mid = canvas.height() as i32 / 2;
    let (x0, y0) = (x_mid - 75, -50);
    let (x1, y1) = (x_mid + 75, y_mid - 75);

    canvas.arc((x0, y0, x1, y1), 20.0, 160.0, CLOSED_EYE_STROKE, color);

    let lashes = [
        ((9, 131), (29, 111)),
        ((49, 147), (59, 122)),
        ((104, 147), (94, 122)),
        ((144, 131), (124, 111)),
    ];
    for ((ax, ay), (bx, by)) in lashes {
        canvas.line(
            (x0 + ax, y0 + ay),
            (x0 + bx, y0 + by),
            CLOSED_EYE_STROKE,
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{BLACK, WHITE};

    #[test]
    fn test_large_cloud_has_hollow_centre() {
        let mut canvas = Canvas::new(80, 60, WHITE);
        gen_large_cloud(&mut canvas, BLACK, WHITE, Position::new(0, 0));
        // Lobe outline is black, centre of the big lobe is cut out.
        assert_eq!(canvas.pixel(35, 1), Some(BLACK));
        assert_eq!(canvas.pixel(35, 20), Some(WHITE));
    }

    #[test]
    fn test_large_sun_core_is_filled() {
        let mut canvas = Canvas::new(60, 60, WHITE);
        gen_large_sun(&mut canvas, BLACK, WHITE, Position::new(0, 0));
        assert_eq!(canvas.pixel(28, 28), Some(BLACK));
        assert_eq!(canvas.pixel(29, 10), Some(BLACK));
    }

    #[test]
    fn test_closed_eye_stays_in_upper_half() {
        let mut canvas = Canvas::new(400, 300, WHITE);
        gen_closed_eye_icon(&mut canvas, BLACK);
        let ink = canvas.image().enumerate_pixels().filter(|(_, _, p)| **p == BLACK);
        for (_, y, _) in ink {
            assert!(y < 110, "eye drawn at y={}", y);
        }
        assert!(canvas.count(BLACK) > 100);
    }
}
