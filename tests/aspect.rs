#![cfg(target_arch = "wasm32")]

use folio_nav::pointer::{to_normalized, to_pixel, Viewport};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn approx_eq2(a: [f64; 2], b: [f64; 2], eps: f64) -> bool {
    (a[0] - b[0]).abs() < eps && (a[1] - b[1]).abs() < eps
}

#[wasm_bindgen_test]
fn mapping_round_trips_in_both_orientations() {
    let wide = Viewport::new(1920.0, 1080.0).unwrap();
    let tall = Viewport::new(1080.0, 1920.0).unwrap();

    let samples = [[0.0, 0.0], [960.0, 540.0], [17.5, 1001.0], [1919.0, 3.0]];
    for vp in [wide, tall] {
        for &px in &samples {
            let back = to_pixel(to_normalized(px, vp), vp);
            assert!(approx_eq2(back, px, 1e-9), "{px:?} -> {back:?} in {vp:?}");
        }
    }
}

#[wasm_bindgen_test]
fn cross_axis_is_aspect_corrected() {
    // The same pixel distance from the centre along the long axis maps to the
    // same normalized length in both orientations.
    let wide = Viewport::new(1600.0, 900.0).unwrap();
    let tall = Viewport::new(900.0, 1600.0).unwrap();

    let a = to_normalized([800.0 + 300.0, 450.0], wide);
    let b = to_normalized([450.0, 800.0 - 300.0], tall);
    assert!((a[0] - b[1]).abs() < 1e-9, "a={a:?} b={b:?}");
}
