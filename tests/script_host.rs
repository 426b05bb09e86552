#![cfg(feature = "script")]

use rfcanvas::{CanvasConfig, ScriptHost};

fn host(cfg: &CanvasConfig) -> ScriptHost {
    let (_doc, blitter) = rfcanvas::new_blitter(cfg).expect("create canvas");
    ScriptHost::new(blitter, cfg).expect("create host")
}

#[test]
fn script_draws_checkerboard_in_order() {
    let cfg = CanvasConfig { width: 4, height: 4, ..Default::default() };
    let mut h = host(&cfg);
    let script = r#"
        for (var y = 0; y < canvas.height; y++) {
            for (var x = 0; x < canvas.width; x++) {
                var on = (x + y) % 2 === 0;
                updateImageData({ width: 1, height: 1, x: x, y: y,
                                  data: on ? [255, 255, 255, 255] : [0, 0, 0, 255] });
            }
        }
        // overwrite the top-left pixel last
        updateImageData({ width: 1, height: 1, x: 0, y: 0, data: [1, 2, 3, 4] });
        "done";
    "#;
    let res = h.eval(script).unwrap();
    assert!(!res.is_error, "{}", res.value);

    let c = h.blitter().canvas();
    assert_eq!(c.pixel(0, 0), Some([1, 2, 3, 4]));
    assert_eq!(c.pixel(1, 0), Some([0, 0, 0, 255]));
    assert_eq!(c.pixel(1, 1), Some([255, 255, 255, 255]));
    assert_eq!(c.pixel(3, 2), Some([0, 0, 0, 255]));
}

#[test]
fn queue_is_drained_between_evals() {
    let cfg = CanvasConfig { width: 2, height: 1, ..Default::default() };
    let mut h = host(&cfg);
    h.eval("updateImageData({width:1,height:1,x:0,y:0,data:[5,5,5,5]})").unwrap();
    h.eval("updateImageData({width:1,height:1,x:1,y:0,data:[6,6,6,6]})").unwrap();
    let res = h.eval("__rfcanvas_blits.length").unwrap();
    assert_eq!(res.value, "0");
    assert_eq!(h.blitter().canvas().pixels(), vec![5, 5, 5, 5, 6, 6, 6, 6]);
}

#[test]
fn image_data_shaped_argument() {
    let cfg = CanvasConfig { width: 3, height: 3, ..Default::default() };
    let mut h = host(&cfg);
    let script = r#"
        var i = { width: 2, height: 2, x: 1, y: 1, data: new Uint8ClampedArray(16) };
        for (var k = 0; k < 16; k++) { i.data[k] = 200; }
        updateImageData(i);
    "#;
    h.eval(script).unwrap();
    let c = h.blitter().canvas();
    assert_eq!(c.pixel(2, 2), Some([200, 200, 200, 200]));
    assert_eq!(c.pixel(0, 0), Some([0, 0, 0, 0]));
}

#[test]
fn pixel_values_are_clamped_like_a_clamped_array() {
    let cfg = CanvasConfig { width: 1, height: 1, ..Default::default() };
    let mut h = host(&cfg);
    let res = h.eval("updateImageData({width:1,height:1,x:0,y:0,data:[300,-5,1.5,255]})").unwrap();
    assert!(!res.is_error, "{}", res.value);
    assert_eq!(h.blitter().canvas().pixel(0, 0), Some([255, 0, 2, 255]));
}

#[test]
fn string_dimensions_are_coerced() {
    let cfg = CanvasConfig { width: 2, height: 2, ..Default::default() };
    let mut h = host(&cfg);
    h.eval("updateImageData({width:'1',height:'1',x:'1',y:1,data:[7,7,7,7]})").unwrap();
    assert_eq!(h.blitter().canvas().pixel(1, 1), Some([7, 7, 7, 7]));
}
