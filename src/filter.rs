//! Post-processing filters and their uniform sets.
//!
//! A filter owns its uniforms and knows which fragment program it drives;
//! drawing is left to a [`Compositor`], which in the browser is the WebGL
//! renderer and in tests is whatever records the calls.

use tracing::{debug, trace};

use crate::error::{NavError, NavResult};
use crate::pointer::{Point, Viewport};

/// Time added to a filter's clock on each apply.
pub const DEFAULT_TIME_STEP: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Hover,
    Screen,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniform {
    pub name: &'static str,
    pub value: UniformValue,
}

impl Uniform {
    fn float(name: &'static str, v: f32) -> Self {
        Self { name, value: UniformValue::Float(v) }
    }

    fn vec2(name: &'static str, v: [f32; 2]) -> Self {
        Self { name, value: UniformValue::Vec2(v) }
    }
}

/// Receives one filter pass: which program to run and the uniforms to bind.
pub trait Compositor {
    fn composite(&mut self, kind: FilterKind, uniforms: &[Uniform]);
}

pub trait Filter {
    fn kind(&self) -> FilterKind;

    /// Advance per-pass state.
    fn tick(&mut self);

    fn uniforms(&self) -> Vec<Uniform>;

    /// Tick, then hand the updated uniform set to the compositor.
    fn apply(&mut self, compositor: &mut dyn Compositor) {
        self.tick();
        compositor.composite(self.kind(), &self.uniforms());
    }
}

/// Shimmer shown on a hovered or focused item.
#[derive(Debug, Clone)]
pub struct HoverFilter {
    time: f32,
    step: f32,
}

impl HoverFilter {
    pub fn new(step: f32) -> Self {
        Self { time: 0.0, step }
    }

    pub fn time(&self) -> f32 {
        self.time
    }
}

impl Default for HoverFilter {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_STEP)
    }
}

impl Filter for HoverFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Hover
    }

    fn tick(&mut self) {
        self.time += self.step;
    }

    fn uniforms(&self) -> Vec<Uniform> {
        vec![Uniform::float("time", self.time)]
    }
}

/// Whole-stage distortion centred on the pointer.
#[derive(Debug, Clone)]
pub struct ScreenFilter {
    time: f32,
    step: f32,
    pointer: Point,
    device_resolution: f64,
    resolution: [f64; 2],
    ratio: f64,
}

impl ScreenFilter {
    pub fn new(device_resolution: f64, viewport: Viewport, step: f32) -> Self {
        let mut filter = Self {
            time: 0.0,
            step,
            pointer: [0.0, 0.0],
            device_resolution,
            resolution: [0.0, 0.0],
            ratio: 1.0,
        };
        filter.on_resize(viewport);
        filter
    }

    /// Accepts exactly two finite numbers; anything else leaves the
    /// previous pointer in place.
    pub fn set_pointer(&mut self, value: &[f64]) -> NavResult<()> {
        match value {
            [x, y] if x.is_finite() && y.is_finite() => {
                self.pointer = [*x, *y];
                trace!(x, y, "screen filter pointer");
                Ok(())
            }
            _ => Err(NavError::InvalidPointer(value.to_vec())),
        }
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn on_resize(&mut self, viewport: Viewport) {
        let w = viewport.width * self.device_resolution;
        let h = viewport.height * self.device_resolution;
        self.resolution = [w, h];
        self.ratio = if h < w { w / h } else { h / w };
        debug!(w, h, ratio = self.ratio, "screen filter resized");
    }

    pub fn resolution(&self) -> [f64; 2] {
        self.resolution
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn time(&self) -> f32 {
        self.time
    }
}

impl Filter for ScreenFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Screen
    }

    fn tick(&mut self) {
        self.time += self.step;
    }

    fn uniforms(&self) -> Vec<Uniform> {
        vec![
            Uniform::float("time", self.time),
            Uniform::vec2("mouse", [self.pointer[0] as f32, self.pointer[1] as f32]),
            Uniform::vec2(
                "u_resolution",
                [self.resolution[0] as f32, self.resolution[1] as f32],
            ),
            Uniform::float("ratio", self.ratio as f32),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        passes: Vec<(FilterKind, Vec<Uniform>)>,
    }

    impl Compositor for Recorder {
        fn composite(&mut self, kind: FilterKind, uniforms: &[Uniform]) {
            self.passes.push((kind, uniforms.to_vec()));
        }
    }

    fn screen() -> ScreenFilter {
        ScreenFilter::new(2.0, Viewport::new(1600.0, 900.0).unwrap(), DEFAULT_TIME_STEP)
    }

    #[test]
    fn apply_ticks_before_compositing() {
        let mut hover = HoverFilter::default();
        let mut rec = Recorder::default();
        hover.apply(&mut rec);
        hover.apply(&mut rec);

        assert_eq!(rec.passes.len(), 2);
        assert_eq!(rec.passes[0].0, FilterKind::Hover);
        assert_eq!(rec.passes[0].1, vec![Uniform::float("time", 0.01)]);
        assert!((hover.time() - 0.02).abs() < 1e-6);
    }

    #[test]
    fn set_pointer_accepts_finite_pair() {
        let mut f = screen();
        f.set_pointer(&[0.2, -0.3]).unwrap();
        assert_eq!(f.pointer(), [0.2, -0.3]);

        let mut rec = Recorder::default();
        f.apply(&mut rec);
        let mouse = rec.passes[0].1.iter().find(|u| u.name == "mouse").unwrap();
        assert_eq!(mouse.value, UniformValue::Vec2([0.2, -0.3]));
    }

    #[test]
    fn set_pointer_rejects_bad_input() {
        let mut f = screen();
        f.set_pointer(&[0.1, 0.1]).unwrap();

        assert!(f.set_pointer(&[f64::NAN, 0.0]).is_err());
        assert!(f.set_pointer(&[0.0, f64::INFINITY]).is_err());
        assert!(f.set_pointer(&[0.5]).is_err());
        assert!(f.set_pointer(&[0.5, 0.5, 0.5]).is_err());
        assert!(f.set_pointer(&[]).is_err());
        assert_eq!(f.pointer(), [0.1, 0.1]);
    }

    #[test]
    fn resize_tracks_long_over_short_side() {
        let mut f = screen();
        assert_eq!(f.resolution(), [3200.0, 1800.0]);
        assert!((f.ratio() - 16.0 / 9.0).abs() < 1e-12);

        f.on_resize(Viewport::new(400.0, 800.0).unwrap());
        assert_eq!(f.resolution(), [800.0, 1600.0]);
        assert_eq!(f.ratio(), 2.0);
    }
}
