#![cfg(not(target_arch = "wasm32"))]

use folio_nav::filter::{ScreenFilter, DEFAULT_TIME_STEP};
use folio_nav::layout::NavItem;
use folio_nav::pointer::{to_normalized, to_pixel, Viewport};
use folio_nav::{NavAnimator, NavConfig, PointerKind};
use proptest::prelude::*;

fn viewport() -> impl Strategy<Value = Viewport> {
    (1.0f64..4000.0, 1.0f64..4000.0).prop_map(|(w, h)| Viewport::new(w, h).unwrap())
}

/// Window shapes between 1:2 and 2:1.
fn screen_viewport() -> impl Strategy<Value = Viewport> {
    (200.0f64..4000.0, 0.5f64..=2.0).prop_map(|(w, r)| Viewport::new(w, w * r).unwrap())
}

proptest! {
    #[test]
    fn pixel_normalized_round_trip(vp in viewport(), x in -5000.0f64..5000.0, y in -5000.0f64..5000.0) {
        let back = to_pixel(to_normalized([x, y], vp), vp);
        prop_assert!((back[0] - x).abs() < 1e-6, "x {} -> {}", x, back[0]);
        prop_assert!((back[1] - y).abs() < 1e-6, "y {} -> {}", y, back[1]);
    }

    #[test]
    fn on_screen_positions_normalize_into_unit_square(vp in screen_viewport(), fx in 0.0f64..=1.0, fy in 0.0f64..=1.0) {
        let [x, y] = to_normalized([fx * vp.width, fy * vp.height], vp);
        prop_assert!(x.abs() <= 0.5 + 1e-9 || y.abs() <= 0.5 + 1e-9);
        prop_assert!(x.abs() <= 1.0 + 1e-9 && y.abs() <= 1.0 + 1e-9);
    }

    #[test]
    fn screen_filter_only_takes_finite_pairs(values in prop::collection::vec(prop::num::f64::ANY, 0..4)) {
        let mut f = ScreenFilter::new(2.0, Viewport::new(800.0, 600.0).unwrap(), DEFAULT_TIME_STEP);
        let accepted = f.set_pointer(&values).is_ok();
        let valid = values.len() == 2 && values.iter().all(|v| v.is_finite());
        prop_assert_eq!(accepted, valid);
        if !valid {
            prop_assert_eq!(f.pointer(), [0.0, 0.0]);
        }
    }

    #[test]
    fn smoothing_never_overshoots(start in 0.0f64..1000.0, target in 0.0f64..1000.0, steps in 1usize..200) {
        let vp = Viewport::new(1000.0, 800.0).unwrap();
        let items = vec![NavItem::new("Home", "/", 200.0, 120.0)];
        let mut nav = NavAnimator::new(NavConfig::default(), items, vp);
        nav.open();
        nav.set_pointer_px([start, 400.0]).unwrap();
        nav.pointer_move([target, 400.0], PointerKind::Mouse);

        let mut last = (target - start).abs();
        for _ in 0..steps {
            nav.step();
            let gap = (target - nav.pointer().pixel[0]).abs();
            prop_assert!(gap <= last + 1e-9);
            let before = target - start;
            let now = target - nav.pointer().pixel[0];
            prop_assert!(before == 0.0 || now.abs() < 1e-9 || before.signum() == now.signum());
            last = gap;
        }
    }
}
