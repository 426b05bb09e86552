use std::fs;
use std::path::PathBuf;

use rfcanvas::rendering::raster::pixel_digest;
use rfcanvas::{BlitRequest, CanvasConfig};

fn golden_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens/expected");
    p.push(name);
    p
}

#[test]
fn golden_scene_matches_fixture() {
    let json = fs::read_to_string("tests/goldens/scenes/scene1.json").expect("read fixture");
    let requests = BlitRequest::parse_json(&json).expect("parse fixture");

    let cfg = CanvasConfig { width: 16, height: 8, background: [0, 0, 0, 255], ..Default::default() };
    let (_doc, blitter) = rfcanvas::new_blitter(&cfg).expect("create canvas");
    assert_eq!(blitter.blit_all(&requests).unwrap(), 4);

    let digest = pixel_digest(blitter.canvas());

    let expected_path = golden_path("scene1.sha256");
    if std::env::var("UPDATE_GOLDENS").is_ok() {
        fs::create_dir_all("tests/goldens/expected").ok();
        fs::write(&expected_path, format!("{}\n", digest)).expect("write golden");
        println!("Updated golden: {:?}", expected_path);
        return;
    }

    if !expected_path.exists() {
        println!(
            "No golden at {:?}; run with UPDATE_GOLDENS=1 to create it. Skipping.",
            expected_path
        );
        return;
    }

    let exp = fs::read_to_string(&expected_path).expect("unable to read golden");
    let exp_bytes = hex::decode(exp.trim()).expect("invalid hex in golden");
    let got_bytes = hex::decode(&digest).unwrap();
    assert_eq!(got_bytes, exp_bytes);
}

#[test]
fn golden_scene_spot_pixels() {
    let json = fs::read_to_string("tests/goldens/scenes/scene1.json").expect("read fixture");
    let requests = BlitRequest::parse_json(&json).expect("parse fixture");
    let cfg = CanvasConfig { width: 16, height: 8, background: [0, 0, 0, 255], ..Default::default() };
    let (_doc, blitter) = rfcanvas::new_blitter(&cfg).unwrap();
    blitter.blit_all(&requests).unwrap();

    let c = blitter.canvas();
    // blue block clipped into the corner
    assert_eq!(c.pixel(0, 0), Some([0, 0, 255, 255]));
    assert_eq!(c.pixel(1, 1), Some([0, 0, 255, 255]));
    // red only where green did not overwrite it
    assert_eq!(c.pixel(2, 2), Some([255, 0, 0, 255]));
    // half-transparent green replaces red instead of blending
    assert_eq!(c.pixel(5, 4), Some([0, 255, 0, 128]));
    // second pixel of the last request falls off the right edge
    assert_eq!(c.pixel(15, 7), Some([255, 255, 0, 255]));
    assert_eq!(c.pixel(14, 7), Some([0, 0, 0, 255]));
}
