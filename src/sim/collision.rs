//! Collision detection for axis-aligned boxes
//!
//! Two predicates, used OR'd for bullet hits:
//! - [`check_collision`]: rectangle overlap after shrinking both boxes by a
//!   symmetric inward padding, so near-misses are forgiven on every side.
//! - [`swept_past`]: coarse tunneling fallback for fast projectiles that can
//!   jump clear over a box between ticks.
//!
//! They can disagree in edge cases (exactly half-height alignment, deep
//! padding on small boxes); both are kept as-is rather than unified.

/// An axis-aligned box, top-left anchored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Padded AABB overlap test
///
/// `pad` is the inward shrink applied to all four sides of both boxes,
/// already scaled by the caller. Symmetric: `check_collision(a, b, pad) ==
/// check_collision(b, a, pad)`.
#[inline]
pub fn check_collision(a: Rect, b: Rect, pad: f32) -> bool {
    a.x + pad < b.x + b.w - pad
        && a.x + a.w - pad > b.x + pad
        && a.y + pad < b.y + b.h - pad
        && a.y + a.h - pad > b.y + pad
}

/// Tunneling fallback for a projectile that moved from `old_x` to `new.x`
/// in one tick: it used to be short of the target's trailing edge, is now
/// past its leading edge, and its origin is vertically within half the
/// target's height of the target's center.
#[inline]
pub fn swept_past(old_x: f32, new: Rect, target: Rect) -> bool {
    old_x < target.x + target.w
        && new.x > target.x
        && (new.y - (target.y + target.h / 2.0)).abs() < target.h / 2.0
}
