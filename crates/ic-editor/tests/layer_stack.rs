//! Integration tests: layer stack operations through the `Inpainter` facade.
//!
//! Layers are solid-color PNGs added as data URLs; z-order is checked
//! through the composited export so the whole add → reorder → render path
//! is exercised.

use ic_core::dataurl::encode_png_data_url;
use ic_core::viewport::MAX_ZOOM;
use ic_core::{CanvasConfig, LayerId, Rgba, RgbaImage, ZoomDirection};
use ic_editor::Inpainter;
use pretty_assertions::assert_eq;

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const YELLOW: [u8; 4] = [255, 255, 0, 255];

fn solid_data_url(w: u32, h: u32, rgba: [u8; 4]) -> String {
    encode_png_data_url(&RgbaImage::from_pixel(w, h, Rgba(rgba))).unwrap()
}

fn make_inpainter() -> Inpainter {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut ip = Inpainter::new();
    ip.create_image_canvas(CanvasConfig::new(40, 30).with_background("skyblue"))
        .expect("valid config");
    ip
}

/// Three overlapping 20×20 layers at the origin, bottom → top red, blue, yellow.
fn three_layers(ip: &mut Inpainter) -> (LayerId, LayerId, LayerId) {
    let red = ip.add_image_layer(&solid_data_url(20, 20, RED)).unwrap();
    let blue = ip.add_image_layer(&solid_data_url(20, 20, BLUE)).unwrap();
    let yellow = ip.add_image_layer(&solid_data_url(20, 20, YELLOW)).unwrap();
    (red, blue, yellow)
}

fn top_color(ip: &Inpainter) -> [u8; 4] {
    ip.export_composite().unwrap().get_pixel(5, 5).0
}

fn order(ip: &Inpainter) -> Vec<LayerId> {
    ip.layers().into_iter().map(|l| l.id).collect()
}

// ─── Adding ─────────────────────────────────────────────────────────────

#[test]
fn layers_are_appended_on_top_at_origin() {
    let mut ip = make_inpainter();
    let (red, blue, yellow) = three_layers(&mut ip);

    assert_eq!(order(&ip), vec![red, blue, yellow]);
    assert_eq!(top_color(&ip), YELLOW);

    let info = &ip.layers()[0];
    assert_eq!((info.left, info.top, info.width, info.height), (0, 0, 20, 20));

    // Outside every layer the background shows through.
    let out = ip.export_composite().unwrap();
    assert_eq!(out.dimensions(), (40, 30));
    assert_eq!(out.get_pixel(30, 25).0, [135, 206, 235, 255]);
}

#[test]
fn undecodable_source_adds_nothing() {
    let mut ip = make_inpainter();
    assert!(ip.add_image_layer("data:image/png;base64,bm90IGEgcG5n").is_none());
    assert!(ip.add_image_layer("not even a data url").is_none());
    assert!(ip.layers().is_empty());
}

#[test]
fn raw_bytes_can_be_added() {
    let mut ip = make_inpainter();
    let png = ic_core::dataurl::encode_png(&RgbaImage::from_pixel(3, 3, Rgba(RED))).unwrap();
    let id = ip.add_image_bytes(&png).unwrap();
    assert_eq!(order(&ip), vec![id]);
}

// ─── Reordering ─────────────────────────────────────────────────────────

#[test]
fn reorder_without_selection_is_noop() {
    let mut ip = make_inpainter();
    let (red, blue, yellow) = three_layers(&mut ip);

    assert!(!ip.bring_to_front());
    assert!(!ip.bring_forward());
    assert!(!ip.send_to_back());
    assert!(!ip.send_backward());
    assert!(!ip.delete_selected());
    assert_eq!(order(&ip), vec![red, blue, yellow]);
}

#[test]
fn reorder_selected_layer_changes_composite() {
    let mut ip = make_inpainter();
    let (red, blue, yellow) = three_layers(&mut ip);

    assert!(ip.select_layer(red));
    assert!(ip.bring_forward());
    assert_eq!(order(&ip), vec![blue, red, yellow]);
    assert_eq!(top_color(&ip), YELLOW);

    assert!(ip.bring_to_front());
    assert_eq!(order(&ip), vec![blue, yellow, red]);
    assert_eq!(top_color(&ip), RED);
    assert!(!ip.bring_to_front(), "already on top");

    assert!(ip.send_backward());
    assert_eq!(order(&ip), vec![blue, red, yellow]);
    assert_eq!(top_color(&ip), YELLOW);

    assert!(ip.send_to_back());
    assert_eq!(order(&ip), vec![red, blue, yellow]);
    assert!(!ip.send_backward(), "already at bottom");
}

// ─── Selection & deletion ───────────────────────────────────────────────

#[test]
fn pointer_down_selects_topmost_layer() {
    let mut ip = make_inpainter();
    let red = ip.add_image_layer(&solid_data_url(30, 30, RED)).unwrap();
    let blue = ip.add_image_layer(&solid_data_url(10, 10, BLUE)).unwrap();

    assert!(ip.image_pointer_down(5.0, 5.0));
    assert_eq!(ip.selected(), Some(blue));

    assert!(ip.image_pointer_down(20.0, 20.0));
    assert_eq!(ip.selected(), Some(red));

    // Clicking the same layer again changes nothing.
    assert!(!ip.image_pointer_down(21.0, 21.0));

    // Empty space clears the selection.
    assert!(ip.image_pointer_down(35.0, 5.0));
    assert_eq!(ip.selected(), None);
}

#[test]
fn pointer_down_respects_zoom() {
    let mut ip = make_inpainter();
    let _red = ip.add_image_layer(&solid_data_url(30, 30, RED)).unwrap();
    let blue = ip.add_image_layer(&solid_data_url(10, 10, BLUE)).unwrap();

    ip.set_zoom(2.0);
    // Screen (18, 18) is canvas (9, 9), inside the blue layer.
    ip.image_pointer_down(18.0, 18.0);
    assert_eq!(ip.selected(), Some(blue));
}

#[test]
fn delete_selected_removes_layer_and_clears_selection() {
    let mut ip = make_inpainter();
    let (red, blue, yellow) = three_layers(&mut ip);

    ip.select_layer(yellow);
    assert!(ip.delete_selected());
    assert_eq!(order(&ip), vec![red, blue]);
    assert_eq!(ip.selected(), None);
    assert_eq!(top_color(&ip), BLUE);

    assert!(!ip.delete_selected(), "nothing selected any more");
    assert_eq!(order(&ip), vec![red, blue]);
}

#[test]
fn layer_listing_marks_selection() {
    let mut ip = make_inpainter();
    let (_, blue, _) = three_layers(&mut ip);
    ip.select_layer(blue);
    let selected: Vec<bool> = ip.layers().iter().map(|l| l.selected).collect();
    assert_eq!(selected, vec![false, true, false]);
}

#[test]
fn recreating_canvas_starts_empty() {
    let mut ip = make_inpainter();
    three_layers(&mut ip);
    ip.create_image_canvas(CanvasConfig::new(10, 10));
    assert!(ip.layers().is_empty());
    assert_eq!(ip.export_composite().unwrap().get_pixel(0, 0).0, [0, 128, 0, 255]);
}

#[test]
fn failed_recreate_keeps_existing_canvas() {
    let mut ip = make_inpainter();
    let red = ip.add_image_layer(&solid_data_url(20, 20, RED)).unwrap();

    assert!(ip.create_image_canvas(CanvasConfig::new(0, 30)).is_none());

    let canvas = ip.image_canvas().expect("previous canvas survives");
    assert_eq!((canvas.width(), canvas.height()), (40, 30));
    assert_eq!(order(&ip), vec![red]);
    assert_eq!(top_color(&ip), RED);
}

#[test]
fn max_zoom_leaves_export_at_canvas_size() {
    let mut ip = make_inpainter();
    three_layers(&mut ip);
    for _ in 0..100 {
        ip.control_zoom(ZoomDirection::In);
    }
    assert_eq!(ip.viewport().zoom(), MAX_ZOOM);
    assert_eq!(ip.export_composite().unwrap().dimensions(), (40, 30));
}
