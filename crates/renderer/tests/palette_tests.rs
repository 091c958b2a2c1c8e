//! Tests for palette quantisation and panel bit planes.

use inky_common::Position;
use renderer::palette::{ACCENT_INDEX, BLACK_INDEX, WHITE_INDEX};
use renderer::{Accent, Canvas, Fonts, Palette, BLACK, RED, WHITE};

#[test]
fn test_quantised_frame_has_only_three_indices() {
    let fonts = Fonts::load().unwrap();
    let mut canvas = Canvas::new(200, 60, WHITE);
    canvas.text(Position::new(5, 5), "Updated 07:45", &fonts.body, 20.0, BLACK);
    canvas.text(Position::new(5, 30), "10.0°C – 20.0°C", &fonts.body, 20.0, RED);

    let frame = Palette::new(Accent::Red).quantise(&canvas);
    assert_eq!(frame.indices.len(), 200 * 60);
    assert!(frame.indices.iter().all(|&i| i <= ACCENT_INDEX));
    assert!(frame.indices.contains(&BLACK_INDEX));
    assert!(frame.indices.contains(&ACCENT_INDEX));
    assert!(frame.indices.contains(&WHITE_INDEX));
}

#[test]
fn test_planes_are_disjoint() {
    let mut canvas = Canvas::new(16, 2, WHITE);
    canvas.line((0, 0), (7, 0), 1, BLACK);
    canvas.line((8, 1), (15, 1), 1, RED);

    let frame = Palette::new(Accent::Red).quantise(&canvas);
    let black = frame.pack_plane(|i| i == BLACK_INDEX);
    let accent = frame.pack_plane(|i| i == ACCENT_INDEX);
    assert_eq!(black, vec![0xFF, 0x00, 0x00, 0x00]);
    assert_eq!(accent, vec![0x00, 0x00, 0x00, 0xFF]);
}

#[test]
fn test_index_at_bounds() {
    let frame = Palette::new(Accent::Yellow).quantise(&Canvas::new(3, 3, WHITE));
    assert_eq!(frame.index_at(2, 2), Some(WHITE_INDEX));
    assert_eq!(frame.index_at(3, 0), None);
}
