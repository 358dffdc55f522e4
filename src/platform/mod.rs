//! Platform abstraction layer
//!
//! The engine never talks to a camera, a pose model, a window or a sound
//! device directly. Each of those is a trait here:
//! - Frame capture ([`FrameSource`])
//! - Hand tracking ([`PoseProvider`])
//! - Drawing ([`RenderSink`])
//! - Sound ([`AudioSink`])
//! - Input events ([`InputSource`])
//! - Time ([`Clock`])

pub mod headless;

use glam::Vec2;

use crate::audio::SoundEffect;
use crate::error::GameError;
use crate::renderer::{FrameSnapshot, MenuView};
use crate::settings::Resolution;

/// One captured video frame. The engine only looks at its size.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Opaque image data for the pose provider
    pub pixels: Vec<u8>,
}

pub trait FrameSource {
    /// Start capturing at `resolution`
    fn open(&mut self, resolution: Resolution) -> Result<(), GameError>;
    /// Block until the next frame arrives
    fn read(&mut self) -> Result<Frame, GameError>;
    fn close(&mut self) {}
}

pub trait PoseProvider {
    /// Tracked points in canvas pixels; empty when no hand is visible
    fn track(&mut self, frame: &Frame) -> Vec<Vec2>;
}

pub trait RenderSink {
    fn draw_game(&mut self, frame: &FrameSnapshot);
    fn draw_menu(&mut self, menu: &MenuView);
}

pub trait AudioSink {
    /// Start (or restart) the looping background track
    fn play_music(&mut self);
    fn stop_music(&mut self);
    fn play_effect(&mut self, effect: SoundEffect);
}

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Space,
    Up,
    Down,
    C,
    Q,
}

/// A discrete input event, polled once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Leave the current screen (ends a session, or the program from a menu)
    Quit,
    /// Restart a paused session
    Reset,
    /// Window closed: terminate from anywhere
    Close,
    PointerMove(Vec2),
    PointerClick(Vec2),
    Key(Key),
}

pub trait InputSource {
    /// Drain pending events without blocking
    fn poll(&mut self) -> Vec<InputEvent>;
}

pub trait Clock {
    /// Monotonic seconds
    fn now(&self) -> f64;
}

/// The collaborators one game run is wired to
pub struct Platform {
    pub frames: Box<dyn FrameSource>,
    pub pose: Box<dyn PoseProvider>,
    pub render: Box<dyn RenderSink>,
    pub input: Box<dyn InputSource>,
    pub clock: Box<dyn Clock>,
}
