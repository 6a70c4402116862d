//! Axis-aligned box geometry for entity collision
//!
//! Every collidable body in the trench is a rectangle described by its
//! center and half-extents. Overlap uses strict inequality, so two boxes
//! that exactly share an edge are flush, not colliding.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box given by center and half-extents
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Aabb {
    /// Center of the box
    pub center: Vec2,
    /// Half-extents on each axis (non-negative)
    pub half: Vec2,
}

impl Aabb {
    /// Build a box from its center and full width/height
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size.abs() / 2.0,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.half.x * 2.0
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.half.y * 2.0
    }

    /// Strict overlap test: center distance must be less than the combined
    /// half-extents on both axes. Zero-size boxes degenerate to point tests.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let diff = (self.center - other.center).abs();
        let combined = self.half + other.half;
        diff.x < combined.x && diff.y < combined.y
    }

    /// Penetration depth along X. Positive iff the boxes overlap on X.
    #[inline]
    pub fn penetration_x(&self, other: &Aabb) -> f32 {
        (self.half.x + other.half.x) - (self.center.x - other.center.x).abs()
    }

    /// Penetration depth along Y. Positive iff the boxes overlap on Y.
    #[inline]
    pub fn penetration_y(&self, other: &Aabb) -> f32 {
        (self.half.y + other.half.y) - (self.center.y - other.center.y).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_strict_at_shared_edge() {
        // Two unit boxes exactly side by side: |dx| == combined halves
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let b = Aabb::new(Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));

        // Nudge inward and they collide
        let c = Aabb::new(Vec2::new(0.99, 0.0), Vec2::new(1.0, 1.0));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn overlap_needs_both_axes() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        // Overlapping on X, separated on Y
        let b = Aabb::new(Vec2::new(0.2, 3.0), Vec2::new(1.0, 1.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn penetration_depths() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0));
        let b = Aabb::new(Vec2::new(1.5, 0.5), Vec2::new(2.0, 2.0));
        assert!(a.overlaps(&b));
        assert!((a.penetration_x(&b) - 0.5).abs() < 1e-6);
        assert!((a.penetration_y(&b) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn zero_size_degenerates_to_point() {
        let point = Aabb::new(Vec2::new(0.1, 0.1), Vec2::ZERO);
        let box_ = Aabb::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        assert!(point.overlaps(&box_));

        let outside = Aabb::new(Vec2::new(2.0, 0.0), Vec2::ZERO);
        assert!(!outside.overlaps(&box_));
    }

    #[test]
    fn negative_size_is_normalized() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(-1.0, -1.0));
        assert!((a.width() - 1.0).abs() < 1e-6);
        assert!((a.height() - 1.0).abs() < 1e-6);
    }
}
