//! Palm Rush - a hand-tracked reflex game
//!
//! Core modules:
//! - `sim`: Session engine (entities, spawning, hit evaluation, slider following)
//! - `app`: Top-level screen state machine (menu, config, game, exit)
//! - `game`: Frame-synchronous loop wiring the engine to its collaborators
//! - `platform`: Traits for capture, pose tracking, rendering, input and time
//! - `renderer`: Per-frame snapshots handed to the render collaborator
//! - `audio`: Music/effect dispatch with graceful fallback to silence
//! - `settings`: Resolution table and session tuning

pub mod app;
pub mod audio;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{App, Screen};
pub use error::GameError;
pub use settings::{Resolution, SessionConfig, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Radius of every spawned target (pixels)
    pub const TARGET_RADIUS: f32 = 20.0;
    /// Extra reach added to a target's radius when testing for a touch
    pub const HIT_MARGIN: f32 = 10.0;

    /// Seconds an arc-timer target stays alive before it counts as a miss
    pub const ARC_TIMER_LIFESPAN: f64 = 2.0;

    /// Seconds a slider takes to travel its whole path
    pub const SLIDER_DURATION: f64 = 3.0;
    /// Radius of the circle the slider path is cut from
    pub const SLIDER_ARC_RADIUS: f32 = 100.0;
    /// Angular span of the slider path (degrees)
    pub const SLIDER_ARC_SPAN_DEG: f32 = 120.0;
    /// Number of points sampled along the slider path
    pub const SLIDER_POINTS: usize = 20;
    /// Path indices below this still accept engagement
    pub const SLIDER_ENGAGE_WINDOW: usize = 10;
    /// Max distance between a tracked point and the active path point while following
    pub const FOLLOW_RADIUS: f32 = 40.0;

    /// Baseline seconds between spawns
    pub const SPAWN_INTERVAL: f64 = 1.5;
    /// Spawn weights for Normal, ArcTimer and Slider
    pub const SPAWN_WEIGHTS: [f32; 3] = [0.4, 0.4, 0.2];
    /// Live entity count that freezes the session
    pub const PAUSE_THRESHOLD: usize = 3;

    /// Height reserved at the top of the canvas for the score HUD
    pub const HUD_MARGIN: f32 = 60.0;
    /// Minimum gap between any spawned shape and the canvas edges
    pub const EDGE_MARGIN: f32 = 20.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
