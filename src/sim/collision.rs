//! Collision and visibility geometry
//!
//! Every rectangle in the simulation is center-origin: `center` plus full
//! `width`/`height`, matching entity positions. All predicates are closed
//! (touching counts) and side-effect free.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle anchored at its center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents()
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents()
    }

    /// Corners in order: top-left, top-right, bottom-right, bottom-left (y down)
    pub fn corners(&self) -> [Vec2; 4] {
        let min = self.min();
        let max = self.max();
        [
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ]
    }
}

/// AABB overlap test; rectangles sharing only an edge overlap
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    a_min.x <= b_max.x && a_max.x >= b_min.x && a_min.y <= b_max.y && a_max.y >= b_min.y
}

/// Point inside or on the boundary of the rectangle
pub fn point_in_rect(point: Vec2, rect: &Rect) -> bool {
    let min = rect.min();
    let max = rect.max();
    point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
}

/// Whether the segment `p1..p2` touches the rectangle
///
/// True if either endpoint lies inside, or the segment crosses one of the four
/// edges. Used for line-of-sight occlusion.
pub fn segment_intersects_rect(p1: Vec2, p2: Vec2, rect: &Rect) -> bool {
    if point_in_rect(p1, rect) || point_in_rect(p2, rect) {
        return true;
    }

    let [tl, tr, br, bl] = rect.corners();
    let edges = [(tl, tr), (tr, br), (bl, br), (tl, bl)];
    edges
        .iter()
        .any(|&(e1, e2)| segment_intersects_segment(p1, p2, e1, e2))
}

/// Parametric segment/segment intersection
///
/// Solves `a1 + u(a2 - a1) = b1 + v(b2 - b1)` for `u, v`. Parallel or
/// coincident segments have a zero denominator and report no intersection.
pub fn segment_intersects_segment(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
    let da = a2 - a1;
    let db = b2 - b1;
    let denom = db.y * da.x - db.x * da.y;
    if denom == 0.0 {
        return false;
    }

    let offset = a1 - b1;
    let u = (db.x * offset.y - db.y * offset.x) / denom;
    let v = (da.x * offset.y - da.y * offset.x) / denom;

    (0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), w, h)
    }

    #[test]
    fn test_overlap_basic() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(overlaps(&a, &rect(5.0, 5.0, 10.0, 10.0)));
        assert!(!overlaps(&a, &rect(20.0, 0.0, 10.0, 10.0)));
        assert!(!overlaps(&a, &rect(0.0, -20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_shared_edge_counts_as_overlap() {
        // Right edge of a at x=5, left edge of b at x=5
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(10.0, 0.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
        // Corner contact
        assert!(overlaps(&a, &rect(10.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = rect(0.0, 0.0, 100.0, 100.0);
        let inner = rect(10.0, -10.0, 5.0, 5.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn test_point_in_rect() {
        let r = rect(100.0, 100.0, 50.0, 20.0);
        assert!(point_in_rect(Vec2::new(100.0, 100.0), &r));
        assert!(point_in_rect(Vec2::new(125.0, 110.0), &r)); // corner
        assert!(!point_in_rect(Vec2::new(126.0, 100.0), &r));
        assert!(!point_in_rect(Vec2::new(100.0, 89.0), &r));
    }

    #[test]
    fn test_segment_crossing_rect() {
        let r = rect(50.0, 50.0, 20.0, 20.0);
        // Passes straight through, both endpoints outside
        assert!(segment_intersects_rect(
            Vec2::new(0.0, 50.0),
            Vec2::new(100.0, 50.0),
            &r
        ));
        // Diagonal through the box
        assert!(segment_intersects_rect(
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 100.0),
            &r
        ));
        // Passes above the box
        assert!(!segment_intersects_rect(
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            &r
        ));
        // Stops short of the box
        assert!(!segment_intersects_rect(
            Vec2::new(0.0, 50.0),
            Vec2::new(30.0, 50.0),
            &r
        ));
    }

    #[test]
    fn test_segment_endpoint_inside_rect() {
        let r = rect(50.0, 50.0, 20.0, 20.0);
        assert!(segment_intersects_rect(
            Vec2::new(50.0, 50.0),
            Vec2::new(500.0, 500.0),
            &r
        ));
        // Whole segment inside: no edge crossing, still blocked
        assert!(segment_intersects_rect(
            Vec2::new(45.0, 45.0),
            Vec2::new(55.0, 55.0),
            &r
        ));
    }

    #[test]
    fn test_segment_segment() {
        let a1 = Vec2::new(0.0, 0.0);
        let a2 = Vec2::new(10.0, 10.0);
        assert!(segment_intersects_segment(
            a1,
            a2,
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 0.0)
        ));
        // Would cross if extended, but too short
        assert!(!segment_intersects_segment(
            a1,
            a2,
            Vec2::new(0.0, 10.0),
            Vec2::new(4.0, 7.0)
        ));
        // Touching at an endpoint
        assert!(segment_intersects_segment(
            a1,
            a2,
            Vec2::new(10.0, 10.0),
            Vec2::new(20.0, 0.0)
        ));
    }

    #[test]
    fn test_parallel_and_degenerate_segments() {
        let a1 = Vec2::new(0.0, 0.0);
        let a2 = Vec2::new(10.0, 0.0);
        assert!(!segment_intersects_segment(
            a1,
            a2,
            Vec2::new(0.0, 5.0),
            Vec2::new(10.0, 5.0)
        ));
        // Coincident
        assert!(!segment_intersects_segment(a1, a2, a1, a2));
        // Zero-length segment
        assert!(!segment_intersects_segment(
            a1,
            a2,
            Vec2::new(5.0, 0.0),
            Vec2::new(5.0, 0.0)
        ));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 0.0f32..200.0, ah in 0.0f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 0.0f32..200.0, bh in 0.0f32..200.0,
        ) {
            let a = rect(ax, ay, aw, ah);
            let b = rect(bx, by, bw, bh);
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn rect_center_is_inside(
            x in -500.0f32..500.0, y in -500.0f32..500.0,
            w in 0.0f32..200.0, h in 0.0f32..200.0,
        ) {
            let r = rect(x, y, w, h);
            prop_assert!(point_in_rect(r.center, &r));
            prop_assert!(segment_intersects_rect(r.center, Vec2::new(x + 1000.0, y), &r));
        }
    }
}
