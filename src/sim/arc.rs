//! Arc geometry for slider paths
//!
//! A slider path is cut from a circle:
//! - center, radius: the circle the path lies on
//! - start_deg, span_deg: angular extent, in degrees, measured in screen space
//!   (y grows downward, so positive angles turn clockwise on screen)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::polar_to_cartesian;

/// A circular arc in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderArc {
    pub center: Vec2,
    pub radius: f32,
    pub start_deg: f32,
    pub span_deg: f32,
}

impl SliderArc {
    pub fn new(center: Vec2, radius: f32, start_deg: f32, span_deg: f32) -> Self {
        Self {
            center,
            radius,
            start_deg,
            span_deg,
        }
    }

    #[inline]
    pub fn end_deg(&self) -> f32 {
        self.start_deg + self.span_deg
    }

    /// Point at fraction `t` (0 = start, 1 = end) along the arc
    pub fn point_at(&self, t: f32) -> Vec2 {
        let deg = self.start_deg + (self.end_deg() - self.start_deg) * t;
        self.center + polar_to_cartesian(self.radius, deg.to_radians())
    }

    /// `num_points` equally spaced points from start to end, both included
    pub fn sample(&self, num_points: usize) -> Vec<Vec2> {
        (0..num_points)
            .map(|i| {
                let t = i as f32 / (num_points - 1).max(1) as f32;
                self.point_at(t)
            })
            .collect()
    }
}
