//! RGBA drawing surface with the handful of primitives the panel layouts
//! need.
//!
//! Rectangles are given as inclusive `(x0, y0, x1, y1)` bounding boxes.
//! Angles are degrees, clockwise from three o'clock (screen y grows down).

use image::{Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_ellipse_mut, draw_line_segment_mut, draw_polygon_mut,
    draw_text_mut, text_size,
};
use imageproc::point::Point;
use inky_common::Position;
use rusttype::{Font, Scale};

/// Pixel colour on a canvas.
pub type Color = Rgba<u8>;

pub const WHITE: Color = Rgba([255, 255, 255, 255]);
pub const BLACK: Color = Rgba([0, 0, 0, 255]);
pub const RED: Color = Rgba([255, 0, 0, 255]);
pub const YELLOW: Color = Rgba([255, 255, 85, 255]);

/// Inclusive bounding box `(x0, y0, x1, y1)`.
pub type BBox = (i32, i32, i32, i32);

/// Drawing surface backed by an `RgbaImage`.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Raw RGBA bytes, row major.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Fill the whole surface.
    pub fn clear(&mut self, color: Color) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    /// Filled axis-aligned ellipse inscribed in `bbox`.
    pub fn ellipse(&mut self, bbox: BBox, color: Color) {
        let (x0, y0, x1, y1) = bbox;
        let center = ((x0 + x1) / 2, (y0 + y1) / 2);
        let rx = (x1 - x0).abs() / 2;
        let ry = (y1 - y0).abs() / 2;
        draw_filled_ellipse_mut(&mut self.image, center, rx, ry, color);
    }

    /// Filled polygon. A closing point equal to the first is ignored.
    pub fn polygon(&mut self, points: &[(i32, i32)], color: Color) {
        let mut poly: Vec<Point<i32>> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
        while poly.len() > 1 && poly.first() == poly.last() {
            poly.pop();
        }
        match poly.len() {
            0 => {}
            1 => self.put(poly[0].x, poly[0].y, color),
            _ => draw_polygon_mut(&mut self.image, &poly, color),
        }
    }

    /// Straight line `width` pixels thick.
    ///
    /// Thick lines are filled as a parallelogram around the centre line;
    /// endpoints are integral so the rounded outline stays convex.
    pub fn line(&mut self, from: (i32, i32), to: (i32, i32), width: u32, color: Color) {
        let start = (from.0 as f32, from.1 as f32);
        let end = (to.0 as f32, to.1 as f32);
        if width <= 1 {
            draw_line_segment_mut(&mut self.image, start, end, color);
            return;
        }

        let (dx, dy) = (end.0 - start.0, end.1 - start.1);
        let len = (dx * dx + dy * dy).sqrt();
        let half = width as f32 / 2.0;
        if len < f32::EPSILON {
            draw_filled_circle_mut(&mut self.image, from, (half as i32).max(1), color);
            return;
        }

        let nx = (-dy / len * half).round() as i32;
        let ny = (dx / len * half).round() as i32;
        let quad = [
            Point::new(from.0 + nx, from.1 + ny),
            Point::new(to.0 + nx, to.1 + ny),
            Point::new(to.0 - nx, to.1 - ny),
            Point::new(from.0 - nx, from.1 - ny),
        ];
        draw_polygon_mut(&mut self.image, &quad, color);
    }

    /// Elliptical arc inscribed in `bbox`, stroked inward from the edge.
    ///
    /// The stroke is stamped as discs every half degree along the centre
    /// line of the band.
    pub fn arc(&mut self, bbox: BBox, start_deg: f32, end_deg: f32, width: u32, color: Color) {
        let (x0, y0, x1, y1) = bbox;
        let cx = (x0 + x1) as f32 / 2.0;
        let cy = (y0 + y1) as f32 / 2.0;
        let inset = width as f32 / 2.0;
        let rx = ((x1 - x0).abs() as f32 / 2.0 - inset).max(0.0);
        let ry = ((y1 - y0).abs() as f32 / 2.0 - inset).max(0.0);

        let mut end = end_deg;
        while end < start_deg {
            end += 360.0;
        }
        let steps = ((end - start_deg) * 2.0).ceil().max(1.0) as usize;
        let radius = (width / 2) as i32;
        for i in 0..=steps {
            let deg = (start_deg + i as f32 * 0.5).min(end);
            let rad = deg.to_radians();
            let center = (
                (cx + rx * rad.cos()).round() as i32,
                (cy + ry * rad.sin()).round() as i32,
            );
            if radius > 0 {
                draw_filled_circle_mut(&mut self.image, center, radius, color);
            } else {
                self.put(center.0, center.1, color);
            }
        }
    }

    /// Anti-aliased text with its top-left corner at `pos`.
    pub fn text(&mut self, pos: Position, text: &str, font: &Font<'static>, size: f32, color: Color) {
        draw_text_mut(
            &mut self.image,
            color,
            pos.x,
            pos.y,
            Scale::uniform(size),
            font,
            text,
        );
    }

    fn put(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height() {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Colour at a pixel, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image.get_pixel_checked(x, y).copied()
    }

    /// Number of pixels exactly matching `color`.
    pub fn count(&self, color: Color) -> usize {
        self.image.pixels().filter(|p| **p == color).count()
    }
}

/// Rendered size of `text` in pixels.
pub fn measure_text(text: &str, font: &Font<'static>, size: f32) -> (i32, i32) {
    text_size(Scale::uniform(size), font, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_tolerates_closing_point() {
        let mut canvas = Canvas::new(20, 20, WHITE);
        canvas.polygon(&[(2, 2), (12, 2), (7, 12), (2, 2)], BLACK);
        assert_eq!(canvas.pixel(7, 5), Some(BLACK));
    }

    #[test]
    fn test_thick_line_covers_width() {
        let mut canvas = Canvas::new(20, 20, WHITE);
        canvas.line((2, 10), (17, 10), 4, BLACK);
        assert_eq!(canvas.pixel(10, 9), Some(BLACK));
        assert_eq!(canvas.pixel(10, 11), Some(BLACK));
        assert_eq!(canvas.pixel(10, 2), Some(WHITE));
    }

    #[test]
    fn test_zero_length_line_draws_dot() {
        let mut canvas = Canvas::new(10, 10, WHITE);
        canvas.line((5, 5), (5, 5), 3, BLACK);
        assert_eq!(canvas.pixel(5, 5), Some(BLACK));
    }

    #[test]
    fn test_clear() {
        let mut canvas = Canvas::new(4, 4, WHITE);
        canvas.ellipse((0, 0, 3, 3), RED);
        canvas.clear(WHITE);
        assert_eq!(canvas.count(WHITE), 16);
    }
}
