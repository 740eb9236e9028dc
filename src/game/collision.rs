//! Rectangles and hitboxes
//!
//! Axis-aligned rectangle math shared by collision detection and UI
//! hit-testing. A `Hitbox` is the collision sub-rectangle within an
//! entity's sprite bounds, stored as an offset plus size and resolved
//! against the entity's position each check.

use serde::{Deserialize, Serialize};

/// A rectangle defined by position and size. Origin top-left, y down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Center X
    pub fn center_x(&self) -> f32 {
        self.x + self.w * 0.5
    }

    /// Center Y
    pub fn center_y(&self) -> f32 {
        self.y + self.h * 0.5
    }

    /// Check if point is inside (used for button hit-testing)
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Standard AABB test: true iff the projections overlap on both axes.
    /// Rectangles that merely touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() <= other.x
            || other.right() <= self.x
            || self.bottom() <= other.y
            || other.bottom() <= self.y)
    }
}

/// Collision sub-rectangle within an entity's bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub offset_x: f32,
    pub offset_y: f32,
    pub w: f32,
    pub h: f32,
}

impl Hitbox {
    pub const fn new(offset_x: f32, offset_y: f32, w: f32, h: f32) -> Self {
        Self { offset_x, offset_y, w, h }
    }

    /// Shrink a full bounding box by `inset` on every side, clamping to
    /// non-negative size so the geometry stays well-formed.
    pub fn inset(width: f32, height: f32, inset: f32) -> Self {
        Self {
            offset_x: inset,
            offset_y: inset,
            w: (width - inset * 2.0).max(0.0),
            h: (height - inset * 2.0).max(0.0),
        }
    }

    /// Resolve against an entity position to an absolute rectangle.
    pub fn resolve(&self, x: f32, y: f32) -> Rect {
        Rect::new(x + self.offset_x, y + self.offset_y, self.w, self.h)
    }
}
