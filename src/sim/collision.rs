//! Touch detection between tracked points and targets
//!
//! A touch is an existence check: one tracked point inside the reach is enough,
//! and several points inside it still count as a single touch.

use glam::Vec2;

/// True if any tracked point lies within `reach` of `center` (boundary inclusive)
#[inline]
pub fn any_within(points: &[Vec2], center: Vec2, reach: f32) -> bool {
    let reach_sq = reach * reach;
    points.iter().any(|p| p.distance_squared(center) <= reach_sq)
}
