//! Axis-aligned bounding box collision
//!
//! Every collision in the game (ball vs brick, ball vs paddle) is a plain
//! AABB overlap test. The ball is boxed as a square whose side equals its
//! radius, anchored at the ball position - not a circle test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Shift the box by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            size: self.size,
        }
    }

    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        intersects(self, other)
    }
}

/// Inclusive AABB overlap: boxes that only share an edge or corner intersect
pub fn intersects(a: &Aabb, b: &Aabb) -> bool {
    let a_max = a.max();
    let b_max = b.max();
    !(b.min.x > a_max.x || b_max.x < a.min.x || b.min.y > a_max.y || b_max.y < a.min.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_disjoint_boxes() {
        let a = Aabb::new(0.0, 0.0, 1.0, 1.0);
        let b = Aabb::new(5.0, 5.0, 1.0, 1.0);
        assert!(!intersects(&a, &b));
        assert!(!intersects(&b, &a));
    }

    #[test]
    fn test_shared_edge_counts() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        // Right neighbour touching along x = 10
        let b = Aabb::new(10.0, 0.0, 10.0, 10.0);
        assert!(intersects(&a, &b));
        // Corner contact only
        let c = Aabb::new(10.0, 10.0, 5.0, 5.0);
        assert!(intersects(&a, &c));
    }

    #[test]
    fn test_contained_box() {
        let outer = Aabb::new(0.0, 0.0, 40.0, 10.0);
        let inner = Aabb::new(5.0, 2.0, 3.0, 3.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn test_separated_on_one_axis_only() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        // Overlaps horizontally but sits below
        let b = Aabb::new(2.0, 10.5, 4.0, 4.0);
        assert!(!intersects(&a, &b));
    }

    fn arb_box() -> impl Strategy<Value = Aabb> {
        (-500i32..500, -500i32..500, 0i32..100, 0i32..100)
            .prop_map(|(x, y, w, h)| Aabb::new(x as f32, y as f32, w as f32, h as f32))
    }

    proptest! {
        #[test]
        fn prop_intersects_is_symmetric(a in arb_box(), b in arb_box()) {
            prop_assert_eq!(intersects(&a, &b), intersects(&b, &a));
        }

        #[test]
        fn prop_translation_preserves_result(
            a in arb_box(),
            b in arb_box(),
            dx in -200i32..200,
            dy in -200i32..200,
        ) {
            // Integer offsets keep the float comparisons exact
            let offset = Vec2::new(dx as f32, dy as f32);
            prop_assert_eq!(
                intersects(&a, &b),
                intersects(&a.translated(offset), &b.translated(offset))
            );
        }

        #[test]
        fn prop_box_intersects_itself(a in arb_box()) {
            prop_assert!(intersects(&a, &a));
        }
    }
}
