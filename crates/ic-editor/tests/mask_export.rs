//! Integration tests: freehand mask drawing and black/white mask export.

use ic_core::{Color, DrawMode, MaskConfig, data_url_to_blob};
use ic_editor::{ExportKind, Inpainter};
use pretty_assertions::assert_eq;

const WHITE: [u8; 4] = [255, 255, 255, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

fn make_inpainter(width: u32, height: u32) -> Inpainter {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut ip = Inpainter::new();
    ip.create_mask_surface(MaskConfig::new(width, height))
        .expect("valid config");
    ip
}

/// Drag from `from` to `to` in one pointer gesture.
fn drag(ip: &mut Inpainter, from: (f64, f64), to: (f64, f64)) {
    ip.mask_pointer_down(from.0, from.1);
    ip.mask_pointer_move(to.0, to.1);
    ip.mask_pointer_up(to.0, to.1);
}

#[test]
fn white_stroke_thresholds_to_white_along_its_path() {
    let mut ip = make_inpainter(80, 40);
    ip.set_stroke_width(8.0);
    drag(&mut ip, (10.0, 20.0), (70.0, 20.0));

    let mask = ip.export_mask().unwrap();
    assert_eq!(mask.dimensions(), (80, 40));
    for x in 10..70 {
        for y in 17..23 {
            assert_eq!(mask.get_pixel(x, y).0, WHITE, "pixel ({x}, {y})");
        }
    }
    assert_eq!(mask.get_pixel(40, 5).0, BLACK);
    assert_eq!(mask.get_pixel(40, 35).0, BLACK);
}

#[test]
fn dark_stroke_thresholds_to_black() {
    let mut ip = make_inpainter(40, 40);
    // 127 * 3 = 381, below the cutoff.
    ip.set_stroke_color(Color::rgba(127.0 / 255.0, 127.0 / 255.0, 127.0 / 255.0, 1.0));
    drag(&mut ip, (5.0, 20.0), (35.0, 20.0));

    let mask = ip.export_mask().unwrap();
    assert!(mask.pixels().all(|p| p.0 == BLACK));
    // The raw surface did get painted.
    assert_eq!(ip.mask_surface().unwrap().pixels().get_pixel(20, 20).0[3], 255);
}

#[test]
fn bright_colored_stroke_crosses_the_cutoff() {
    let mut ip = make_inpainter(40, 40);
    // 200 + 100 + 100 = 400 > 383.
    ip.set_stroke_color(Color::parse("#c86464").unwrap());
    drag(&mut ip, (5.0, 20.0), (35.0, 20.0));
    assert_eq!(ip.export_mask().unwrap().get_pixel(20, 20).0, WHITE);
}

#[test]
fn polyline_strokes_join_without_gaps() {
    let mut ip = make_inpainter(60, 60);
    ip.set_stroke_width(6.0);
    ip.mask_pointer_down(10.0, 10.0);
    ip.mask_pointer_move(50.0, 10.0);
    ip.mask_pointer_move(50.0, 50.0);
    ip.mask_pointer_leave();

    let mask = ip.export_mask().unwrap();
    assert_eq!(mask.get_pixel(30, 10).0, WHITE);
    assert_eq!(mask.get_pixel(50, 10).0, WHITE, "corner joint");
    assert_eq!(mask.get_pixel(52, 11).0, WHITE, "outside of the round join");
    assert_eq!(mask.get_pixel(50, 30).0, WHITE);

    // The stroke ended on leave: further moves paint nothing.
    assert!(!ip.mask_pointer_move(10.0, 50.0));
    assert_eq!(ip.export_mask().unwrap().get_pixel(30, 50).0, BLACK);
}

#[test]
fn eraser_cuts_painted_pixels_back_to_black() {
    let mut ip = make_inpainter(50, 30);
    ip.set_stroke_width(10.0);
    drag(&mut ip, (5.0, 15.0), (45.0, 15.0));
    assert_eq!(ip.export_mask().unwrap().get_pixel(25, 15).0, WHITE);

    assert!(ip.set_drawing_mode_name("erase"));
    assert_eq!(ip.mask_surface().unwrap().mode(), DrawMode::Erase);
    drag(&mut ip, (20.0, 15.0), (30.0, 15.0));

    let mask = ip.export_mask().unwrap();
    assert_eq!(mask.get_pixel(25, 15).0, BLACK);
    assert_eq!(mask.get_pixel(8, 15).0, WHITE, "outside the eraser path");

    ip.set_drawing_mode(DrawMode::Brush);
    drag(&mut ip, (20.0, 15.0), (30.0, 15.0));
    assert_eq!(ip.export_mask().unwrap().get_pixel(25, 15).0, WHITE);
}

#[test]
fn mask_pointer_events_respect_zoom() {
    let mut ip = make_inpainter(40, 40);
    ip.set_zoom(2.0);
    ip.set_stroke_width(4.0);
    // Screen (20..60, 40) is canvas (10..30, 20).
    drag(&mut ip, (20.0, 40.0), (60.0, 40.0));
    let mask = ip.export_mask().unwrap();
    assert_eq!(mask.get_pixel(20, 20).0, WHITE);
    assert_eq!(mask.get_pixel(20, 35).0, BLACK);
}

#[test]
fn mask_surface_creation_is_idempotent() {
    let mut ip = make_inpainter(30, 20);
    drag(&mut ip, (0.0, 10.0), (30.0, 10.0));

    let again = ip.create_mask_surface(MaskConfig::new(500, 500)).unwrap();
    assert_eq!((again.width(), again.height()), (30, 20));
    assert_eq!(ip.export_mask().unwrap().get_pixel(15, 10).0, WHITE);
}

#[test]
fn clear_mask_resets_to_black() {
    let mut ip = make_inpainter(20, 20);
    drag(&mut ip, (0.0, 10.0), (20.0, 10.0));
    assert!(ip.clear_mask());
    assert!(ip.export_mask().unwrap().pixels().all(|p| p.0 == BLACK));
}

#[test]
fn mask_export_is_a_png_data_url() {
    let mut ip = make_inpainter(16, 16);
    drag(&mut ip, (0.0, 8.0), (16.0, 8.0));

    let url = ip.canvas_to_data_url("mask");
    let blob = data_url_to_blob(&url).unwrap();
    assert_eq!(blob.mime, "image/png");
    assert_eq!(Some(blob), ip.mask_to_blob());

    // No image canvas was created.
    assert_eq!(ip.export_data_url(ExportKind::Image), "");
}
