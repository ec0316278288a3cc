//! Axis-aligned rectangle overlap tests
//!
//! Everything in the arena is an axis-aligned square, so collision detection
//! reduces to a single strict AABB overlap test.

use glam::Vec2;

/// An axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn square(pos: Vec2, edge: f32) -> Self {
        Self {
            pos,
            size: Vec2::splat(edge),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Strict AABB overlap. Rectangles that merely share an edge do not collide,
/// matching the per-pixel feel of the game: a rock grazing past the player's
/// side is a near miss, not a hit.
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.pos.x < b.right() && a.right() > b.pos.x && a.pos.y < b.bottom() && a.bottom() > b.pos.y
}
