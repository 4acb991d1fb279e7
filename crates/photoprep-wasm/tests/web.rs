//! Browser-side tests, run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use photoprep_wasm::{JsEditSession, JsPresetStore};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn png(width: u32, height: u32) -> js_sys::Uint8Array {
    let image = image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x * 20) as u8, (y * 20) as u8, 90, 255])
    });
    let mut bytes = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    js_sys::Uint8Array::from(bytes.as_slice())
}

fn session(count: u32) -> JsEditSession {
    let images = js_sys::Array::new();
    for i in 0..count {
        images.push(&png(12 + i, 8));
    }
    JsEditSession::new("listing-1", images, None).unwrap()
}

#[wasm_bindgen_test]
fn commit_returns_rotated_jpeg() {
    let mut s = session(1);
    s.apply_transform("rotateRight").unwrap();
    let out = s.commit().unwrap();
    assert_eq!((out.width(), out.height()), (8, 12));
    assert_eq!(out.slot(), Some(0));
    assert_eq!(&out.bytes()[..2], &[0xFF, 0xD8]);
    assert_eq!(s.edited_slots(), vec![0]);
}

#[wasm_bindgen_test]
fn unknown_filter_is_rejected() {
    let mut s = session(1);
    let err = s.set_filter("exposure", 10).unwrap_err();
    assert!(err.as_string().unwrap().starts_with("validation"));
}

#[wasm_bindgen_test]
fn crop_then_apply_to_all() {
    let mut s = session(2);
    s.begin_crop(Some("1:1".into())).unwrap();
    assert!(s.is_cropping());
    assert!(s.commit().is_err());
    assert_eq!(s.apply_crop().unwrap(), vec![8, 8]);

    s.set_filter("contrast", 140).unwrap();
    let outputs = s.apply_to_all().unwrap();
    assert_eq!(outputs.length(), 2);
    let field = |i: u32, name: &str| {
        js_sys::Reflect::get(&outputs.get(i), &JsValue::from_str(name))
            .unwrap()
            .as_f64()
    };
    assert_eq!((field(0, "slot"), field(1, "slot")), (Some(0.0), Some(1.0)));
    assert_eq!((field(0, "width"), field(0, "height")), (Some(8.0), Some(8.0)));
    assert_eq!((field(1, "width"), field(1, "height")), (Some(13.0), Some(8.0)));
    assert!(s.applied_to_all());
    assert!(s.next_image());
    assert!(!s.applied_to_all());
}

#[wasm_bindgen_test]
fn presets_round_trip_through_store() {
    let mut store = JsPresetStore::new();
    let mut s = session(1);
    s.set_filter("brightness", 120).unwrap();
    let preset = s.save_preset(&mut store, "Sunny").unwrap();
    assert_eq!(s.selected_preset().as_deref(), Some("Sunny"));

    s.reset();
    s.apply_preset(preset).unwrap();
    assert!(s.is_dirty());

    let listed = js_sys::Array::from(&store.list().unwrap());
    assert_eq!(listed.length(), 1);
}

#[wasm_bindgen_test]
fn close_returns_history() {
    let mut s = session(1);
    s.set_filter("shadows", 40).unwrap();
    s.commit().unwrap();
    let records = js_sys::Array::from(&s.close().unwrap());
    assert_eq!(records.length(), 1);
    assert!(records.get(0) != JsValue::UNDEFINED);
}
