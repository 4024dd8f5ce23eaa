//! Horizontal strip layout of the menu items.

use crate::filter::HoverFilter;
use crate::pointer::{Point, Viewport};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn contains(&self, p: Point) -> bool {
        p[0] >= self.x && p[0] < self.x + self.width && p[1] >= self.y && p[1] < self.y + self.height
    }
}

/// One menu entry. Geometry is fixed at creation; only the hover filter
/// attachment changes afterwards.
#[derive(Debug, Clone)]
pub struct NavItem {
    pub title: String,
    pub link: String,
    pub width: f64,
    pub height: f64,
    /// Left edge relative to the container origin.
    pub x: f64,
    pub hover: HoverFilter,
    pub hovered: bool,
}

impl NavItem {
    pub fn new(title: impl Into<String>, link: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            width,
            height,
            x: 0.0,
            hover: HoverFilter::default(),
            hovered: false,
        }
    }
}

/// Lays items out left to right, centred on the container origin, and
/// returns the total strip width.
pub fn layout_items(items: &mut [NavItem]) -> f64 {
    let total: f64 = items.iter().map(|i| i.width).sum();
    let mut pos = 0.0;
    for item in items.iter_mut() {
        item.x = total * -0.5 + pos;
        pos += item.width;
    }
    total
}

/// Pixel pointer position that brings item `idx` under the screen filter's
/// focus.
pub fn focus_position(items: &[NavItem], nav_width: f64, idx: usize, vp: Viewport) -> Point {
    let c: f64 = items
        .iter()
        .take(idx + 1)
        .enumerate()
        .map(|(i, item)| {
            let share = item.width / nav_width;
            if i < idx {
                share
            } else {
                share / 2.0
            }
        })
        .sum();
    [vp.width * 0.1 + vp.width * 0.8 * c, vp.height * 0.5]
}

/// Container x offset for a pixel pointer: the strip scrolls opposite to the
/// pointer.
pub fn container_offset(nav_width: f64, pointer_x: f64, vp: Viewport) -> f64 {
    let p = pointer_x / vp.width;
    -(nav_width * 0.5) + (1.0 - p) * nav_width
}

/// Screen-space rectangle of an item. The stage origin is the viewport
/// centre and items hang below it.
pub fn item_rect(item: &NavItem, container_x: f64, vp: Viewport) -> Rect {
    let [cx, cy] = vp.centre();
    Rect {
        x: cx + container_x + item.x,
        y: cy,
        width: item.width,
        height: item.height,
    }
}

pub fn mask_rect(vp: Viewport, padding: f64) -> Rect {
    Rect {
        x: -padding,
        y: -padding,
        width: vp.width + 2.0 * padding,
        height: vp.height + 2.0 * padding,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(widths: &[f64]) -> Vec<NavItem> {
        widths
            .iter()
            .enumerate()
            .map(|(i, w)| NavItem::new(format!("item{i}"), format!("/{i}"), *w, 120.0))
            .collect()
    }

    #[test]
    fn strip_is_centred() {
        let mut its = items(&[100.0, 200.0, 100.0]);
        let total = layout_items(&mut its);
        assert_eq!(total, 400.0);
        let xs: Vec<f64> = its.iter().map(|i| i.x).collect();
        assert_eq!(xs, vec![-200.0, -100.0, 100.0]);
    }

    #[test]
    fn focus_of_first_item_uses_half_its_share() {
        let mut its = items(&[100.0, 300.0]);
        let total = layout_items(&mut its);
        let vp = Viewport::new(1000.0, 800.0).unwrap();

        let p0 = focus_position(&its, total, 0, vp);
        assert!((p0[0] - (100.0 + 800.0 * 0.125)).abs() < 1e-9);
        assert_eq!(p0[1], 400.0);

        let p1 = focus_position(&its, total, 1, vp);
        assert!((p1[0] - (100.0 + 800.0 * (0.25 + 0.375))).abs() < 1e-9);
    }

    #[test]
    fn pointer_at_left_edge_pushes_strip_right() {
        let vp = Viewport::new(1000.0, 800.0).unwrap();
        assert_eq!(container_offset(400.0, 0.0, vp), 200.0);
        assert_eq!(container_offset(400.0, 1000.0, vp), -200.0);
        assert_eq!(container_offset(400.0, 500.0, vp), 0.0);
    }

    #[test]
    fn item_rect_follows_container() {
        let mut its = items(&[100.0, 100.0]);
        layout_items(&mut its);
        let vp = Viewport::new(1000.0, 800.0).unwrap();
        let r = item_rect(&its[1], 10.0, vp);
        assert_eq!(r, Rect { x: 510.0, y: 400.0, width: 100.0, height: 120.0 });
        assert!(r.contains([550.0, 450.0]));
        assert!(!r.contains([505.0, 450.0]));
    }

    #[test]
    fn mask_extends_past_viewport() {
        let vp = Viewport::new(1000.0, 800.0).unwrap();
        let m = mask_rect(vp, 100.0);
        assert_eq!(m, Rect { x: -100.0, y: -100.0, width: 1200.0, height: 1000.0 });
    }
}
