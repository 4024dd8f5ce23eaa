//! Pixel ↔ normalized pointer coordinates.
//!
//! Normalized space is centred on the viewport, y points up, and the cross
//! axis is scaled by the aspect ratio so that a circle in normalized space is
//! a circle on screen whatever the window shape.

use crate::error::{NavError, NavResult};

/// A position as `[x, y]`.
pub type Point = [f64; 2];

/// Window size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Rejects zero, negative and non-finite sizes.
    pub fn new(width: f64, height: f64) -> NavResult<Self> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(width) && ok(height) {
            Ok(Self { width, height })
        } else {
            Err(NavError::InvalidViewport { width, height })
        }
    }

    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }

    /// Height over width.
    pub fn ratio(&self) -> f64 {
        self.height / self.width
    }

    pub fn centre(&self) -> Point {
        [self.width * 0.5, self.height * 0.5]
    }
}

pub fn to_normalized(px: Point, vp: Viewport) -> Point {
    let ratio = vp.ratio();
    let [cx, cy] = vp.centre();
    if vp.is_portrait() {
        [(px[0] - cx) / vp.width, -(px[1] - cy) / vp.height * ratio]
    } else {
        [(px[0] - cx) / vp.width / ratio, -(px[1] - cy) / vp.height]
    }
}

pub fn to_pixel(pos: Point, vp: Viewport) -> Point {
    let ratio = vp.ratio();
    let [cx, cy] = vp.centre();
    if vp.is_portrait() {
        [pos[0] * vp.width + cx, -pos[1] * vp.height / ratio + cy]
    } else {
        [pos[0] * vp.width * ratio + cx, -pos[1] * vp.height + cy]
    }
}
