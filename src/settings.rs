//! Game settings and tuning
//!
//! Nothing here is read from disk: the resolution list is fixed and the
//! session tuning defaults to the constants in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A supported capture resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Every resolution offered on the config screen, in display order
    pub const ALL: [Resolution; 4] = [
        Resolution::new(640, 480),
        Resolution::new(800, 600),
        Resolution::new(1280, 720),
        Resolution::new(1920, 1080),
    ];

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn label(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// Tuning for one game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub target_radius: f32,
    pub hit_margin: f32,
    pub arc_timer_lifespan: f64,
    pub slider_duration: f64,
    pub slider_arc_radius: f32,
    pub slider_arc_span_deg: f32,
    pub slider_points: usize,
    pub slider_engage_window: usize,
    pub follow_radius: f32,
    pub spawn_interval: f64,
    /// Normal, ArcTimer, Slider
    pub spawn_weights: [f32; 3],
    pub pause_threshold: usize,
    pub hud_margin: f32,
    pub edge_margin: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            target_radius: TARGET_RADIUS,
            hit_margin: HIT_MARGIN,
            arc_timer_lifespan: ARC_TIMER_LIFESPAN,
            slider_duration: SLIDER_DURATION,
            slider_arc_radius: SLIDER_ARC_RADIUS,
            slider_arc_span_deg: SLIDER_ARC_SPAN_DEG,
            slider_points: SLIDER_POINTS,
            slider_engage_window: SLIDER_ENGAGE_WINDOW,
            follow_radius: FOLLOW_RADIUS,
            spawn_interval: SPAWN_INTERVAL,
            spawn_weights: SPAWN_WEIGHTS,
            pause_threshold: PAUSE_THRESHOLD,
            hud_margin: HUD_MARGIN,
            edge_margin: EDGE_MARGIN,
        }
    }
}

/// Player-facing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Index into [`Resolution::ALL`]
    resolution_index: usize,
    pub session: SessionConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resolution_index: 0,
            session: SessionConfig::default(),
        }
    }
}

impl Settings {
    pub fn resolution_index(&self) -> usize {
        self.resolution_index
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::ALL[self.resolution_index.min(Resolution::ALL.len() - 1)]
    }

    /// Select a resolution by index, clamping anything out of range
    pub fn select_resolution(&mut self, index: usize) {
        let len = Resolution::ALL.len();
        if index >= len {
            log::debug!(
                "{}",
                crate::GameError::InvalidSelection { index, len }
            );
        }
        self.resolution_index = index.min(len - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_selection_is_clamped() {
        let mut settings = Settings::default();
        settings.select_resolution(99);
        assert_eq!(settings.resolution_index(), Resolution::ALL.len() - 1);
        assert_eq!(settings.resolution(), Resolution::new(1920, 1080));
    }

    #[test]
    fn test_default_matches_constants() {
        let settings = Settings::default();
        assert_eq!(settings.resolution(), Resolution::new(640, 480));
        assert_eq!(settings.session.pause_threshold, PAUSE_THRESHOLD);
        assert_eq!(settings.session.spawn_weights, SPAWN_WEIGHTS);
        assert_eq!(Resolution::ALL[3].label(), "1920x1080");
    }
}
