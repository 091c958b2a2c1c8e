//! Tests for PNG encoding of rendered frames.
//!
//! Encoded output is decoded again with the `image` crate, so these tests
//! check real PNG validity rather than byte layouts.

use inky_common::{IconType, Position};
use renderer::png::{create_png, create_png_indexed, encode_frame};
use renderer::{draw_icon, Accent, Canvas, Palette, BLACK, WHITE, YELLOW};
use std::io::Write;

// ============================================================================
// Helper functions
// ============================================================================

fn decode(bytes: &[u8]) -> image::RgbaImage {
    image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .expect("valid PNG")
        .to_rgba8()
}

fn sample_frame_canvas() -> Canvas {
    let mut canvas = Canvas::new(120, 80, WHITE);
    draw_icon(&mut canvas, IconType::BrokenClouds, Position::new(5, 5), BLACK, WHITE);
    draw_icon(&mut canvas, IconType::ClearSky, Position::new(50, 10), YELLOW, WHITE);
    canvas
}

// ============================================================================
// Basic PNG creation tests
// ============================================================================

#[test]
fn test_png_signature() {
    let pixels = [255, 0, 0, 255, 0, 255, 0, 255, 0, 255, 0, 255, 255, 0, 0, 255];
    let png = create_png(&pixels, 2, 2).unwrap();
    assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
}

#[test]
fn test_rgba_png_decodes_to_same_pixels() {
    let canvas = sample_frame_canvas();
    let png = create_png(canvas.as_bytes(), 120, 80).unwrap();
    assert_eq!(decode(&png).as_raw(), canvas.image().as_raw());
}

#[test]
fn test_indexed_frame_smaller_than_rgba() {
    let canvas = sample_frame_canvas();
    let frame = Palette::new(Accent::Yellow).quantise(&canvas);
    let indexed = encode_frame(&frame).unwrap();
    let rgba = create_png(canvas.as_bytes(), 120, 80).unwrap();
    assert!(indexed.len() < rgba.len());
}

#[test]
fn test_rgba_rejects_wrong_length() {
    assert!(create_png(&[0, 0, 0], 1, 1).is_err());
    assert!(create_png_indexed(1, 1, &[], &[0]).is_err());
}

// ============================================================================
// Quantised frames
// ============================================================================

#[test]
fn test_encoded_frame_matches_quantised_pixels() {
    let canvas = sample_frame_canvas();
    let frame = Palette::new(Accent::Yellow).quantise(&canvas);
    let decoded = decode(&encode_frame(&frame).unwrap());

    assert_eq!(decoded.dimensions(), (120, 80));
    for (x, y, pixel) in decoded.enumerate_pixels() {
        let index = frame.index_at(x, y).unwrap();
        assert_eq!(*pixel, frame.palette[index as usize], "({}, {})", x, y);
    }
}

#[test]
fn test_frame_survives_file_round_trip() {
    let canvas = sample_frame_canvas();
    let frame = Palette::new(Accent::Red).quantise(&canvas);
    let bytes = encode_frame(&frame).unwrap();

    let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    file.write_all(&bytes).unwrap();
    file.flush().unwrap();

    let reread = image::open(file.path()).unwrap().to_rgba8();
    assert_eq!(reread, decode(&bytes));
}

#[test]
fn test_encoding_is_deterministic() {
    let frame = Palette::new(Accent::Yellow).quantise(&sample_frame_canvas());
    assert_eq!(encode_frame(&frame).unwrap(), encode_frame(&frame).unwrap());
}
