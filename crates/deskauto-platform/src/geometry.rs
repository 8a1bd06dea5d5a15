//! Screen-space points and rectangles.

use serde::{Deserialize, Serialize};

/// A screen or client coordinate. Coordinates may be negative: the
/// virtual desktop can extend left of / above the primary monitor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A normalized screen rectangle (width/height never negative).
/// An empty rectangle signals "no such region".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const EMPTY: Rect = Rect {
        left: 0,
        top: 0,
        width: 0,
        height: 0,
    };

    /// Build from corner coordinates, normalizing so width/height >= 0.
    pub fn from_corners(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left: left.min(right),
            top: top.min(bottom),
            width: (right - left).abs(),
            height: (bottom - top).abs(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Point at fraction `t` along the line from `a` to `b`.
/// `t = 0.0` yields `a` exactly, `t = 1.0` yields `b` exactly.
pub fn lerp(a: Point, b: Point, t: f64) -> (f64, f64) {
    let x = a.x as f64 + (b.x - a.x) as f64 * t;
    let y = a.y as f64 + (b.y - a.y) as f64 * t;
    (x, y)
}

/// Select the `index`-th rectangle of a display list. Negative and
/// past-the-end indices yield `Rect::EMPTY` ("no such display").
pub fn rect_at(rects: &[Rect], index: i32) -> Rect {
    usize::try_from(index)
        .ok()
        .and_then(|i| rects.get(i))
        .copied()
        .unwrap_or(Rect::EMPTY)
}

/// Clamp `p` into `[0, width-1] x [0, height-1]`.
pub fn clamp_to_display(p: Point, width: i32, height: i32) -> Point {
    Point {
        x: p.x.clamp(0, width - 1),
        y: p.y.clamp(0, height - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints_exact() {
        let a = Point::new(3, -7);
        let b = Point::new(-20, 41);
        assert_eq!(lerp(a, b, 0.0), (3.0, -7.0));
        assert_eq!(lerp(a, b, 1.0), (-20.0, 41.0));
    }

    #[test]
    fn test_lerp_midpoint() {
        let a = Point::new(0, 0);
        let b = Point::new(10, 10);
        assert_eq!(lerp(a, b, 0.5), (5.0, 5.0));
    }

    #[test]
    fn test_rect_from_corners_normalizes() {
        let r = Rect::from_corners(10, 20, -5, 4);
        assert_eq!(r.left, -5);
        assert_eq!(r.top, 4);
        assert_eq!(r.width, 15);
        assert_eq!(r.height, 16);
    }

    #[test]
    fn test_empty_rect() {
        assert!(Rect::EMPTY.is_empty());
        assert!(Rect::from_corners(5, 5, 5, 9).is_empty());
        assert!(!Rect::from_corners(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn test_rect_at_selects_in_range() {
        let rects = [
            Rect::from_corners(0, 0, 100, 100),
            Rect::from_corners(100, 0, 300, 150),
        ];
        assert_eq!(rect_at(&rects, 0), rects[0]);
        assert_eq!(rect_at(&rects, 1), rects[1]);
    }

    #[test]
    fn test_rect_at_out_of_range_is_empty() {
        let rects = [Rect::from_corners(0, 0, 100, 100)];
        assert!(rect_at(&rects, -1).is_empty());
        assert!(rect_at(&rects, 1).is_empty());
        assert!(rect_at(&[], 0).is_empty());
    }

    #[test]
    fn test_clamp_to_display() {
        assert_eq!(
            clamp_to_display(Point::new(-3, 5), 100, 100),
            Point::new(0, 5)
        );
        assert_eq!(
            clamp_to_display(Point::new(150, 99), 100, 100),
            Point::new(99, 99)
        );
    }
}
