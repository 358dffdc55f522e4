//! Headless collaborators
//!
//! A complete platform without camera, window or speakers: a synthetic frame
//! source, a demo hand that reaches for whatever is on screen, a renderer that
//! logs frames, scripted input and a clock that advances a fixed step per
//! sample. Used by the binary's demo run and by the loop tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use glam::Vec2;

use super::{AudioSink, Clock, Frame, FrameSource, InputEvent, InputSource, PoseProvider, RenderSink};
use crate::audio::SoundEffect;
use crate::error::GameError;
use crate::renderer::{FrameSnapshot, MenuView, Shape};
use crate::settings::Resolution;
use crate::sim::{EntityType, SliderPhase};

/// Last game frame drawn, shared between the renderer and the demo hand
pub type SharedScreen = Rc<RefCell<Option<FrameSnapshot>>>;

/// Offsets of the five tracked palm landmarks (wrist-side thumb joint and
/// the four finger knuckles) around the palm center
const PALM_LANDMARKS: [Vec2; 5] = [
    Vec2::new(-22.0, 6.0),
    Vec2::new(-12.0, -18.0),
    Vec2::new(0.0, -22.0),
    Vec2::new(11.0, -19.0),
    Vec2::new(21.0, -13.0),
];

/// Frame source producing blank frames at the requested resolution
#[derive(Debug, Clone, Default)]
pub struct SyntheticCamera {
    size: Option<Resolution>,
    frames_read: u64,
    /// Fail reads after this many frames
    fail_after: Option<u64>,
    /// Refuse to open at all
    unplugged: bool,
}

impl SyntheticCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// A camera that drops out after `frames` reads
    pub fn failing_after(frames: u64) -> Self {
        Self {
            fail_after: Some(frames),
            ..Self::default()
        }
    }

    /// A camera that cannot be opened
    pub fn unplugged() -> Self {
        Self {
            unplugged: true,
            ..Self::default()
        }
    }
}

impl FrameSource for SyntheticCamera {
    fn open(&mut self, resolution: Resolution) -> Result<(), GameError> {
        if self.unplugged {
            return Err(GameError::CaptureUnavailable("no camera attached".into()));
        }
        self.size = Some(resolution);
        self.frames_read = 0;
        Ok(())
    }

    fn read(&mut self) -> Result<Frame, GameError> {
        let size = self
            .size
            .ok_or_else(|| GameError::CaptureUnavailable("camera not opened".into()))?;
        if self.fail_after.is_some_and(|n| self.frames_read >= n) {
            return Err(GameError::CaptureUnavailable(format!(
                "camera stopped after {} frames",
                self.frames_read
            )));
        }
        self.frames_read += 1;
        Ok(Frame {
            width: size.width,
            height: size.height,
            pixels: Vec::new(),
        })
    }

    fn close(&mut self) {
        self.size = None;
    }
}

/// A simulated hand that looks at the last drawn frame and moves its palm
/// toward the most urgent target, at a limited speed
#[derive(Debug)]
pub struct DemoHand {
    screen: SharedScreen,
    pos: Option<Vec2>,
    /// Pixels per frame
    max_speed: f32,
    /// Every `period` frames the hand leaves the camera for `length` frames
    dropout: Option<(u64, u64)>,
    frame: u64,
}

impl DemoHand {
    pub fn new(screen: SharedScreen, max_speed: f32) -> Self {
        Self {
            screen,
            pos: None,
            max_speed,
            dropout: None,
            frame: 0,
        }
    }

    pub fn with_dropout(mut self, period: u64, length: u64) -> Self {
        self.dropout = Some((period.max(1), length));
        self
    }

    fn hidden(&self) -> bool {
        self.dropout
            .is_some_and(|(period, length)| self.frame % period < length)
    }

    /// Sliders first (they must be engaged early), then the arc timer closest
    /// to running out, then the oldest plain target
    fn pick_target(frame: &FrameSnapshot) -> Option<Vec2> {
        let slider = frame.entities.iter().find_map(|e| match &e.shape {
            Shape::SliderPath { head, phase, .. } if *phase != SliderPhase::Failed => Some(*head),
            _ => None,
        });
        let timer = frame
            .entities
            .iter()
            .filter(|e| e.kind == EntityType::ArcTimer)
            .max_by(|a, b| {
                a.progress
                    .partial_cmp(&b.progress)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        let oldest = frame.entities.iter().min_by_key(|e| e.id);
        slider
            .or_else(|| timer.map(|e| e.shape_center()))
            .or_else(|| oldest.map(|e| e.shape_center()))
    }
}

impl PoseProvider for DemoHand {
    fn track(&mut self, frame: &Frame) -> Vec<Vec2> {
        self.frame += 1;
        let rest = Vec2::new(frame.width as f32 / 2.0, frame.height as f32 * 0.75);
        let current = *self.pos.get_or_insert(rest);

        let target = self
            .screen
            .borrow()
            .as_ref()
            .and_then(Self::pick_target)
            .unwrap_or(rest);
        let step = (target - current).clamp_length_max(self.max_speed);
        let next = current + step;
        self.pos = Some(next);

        if self.hidden() {
            return Vec::new();
        }
        PALM_LANDMARKS.iter().map(|o| next + *o).collect()
    }
}

/// Renderer that keeps the last frame for the demo hand and logs every frame
#[derive(Debug, Default)]
pub struct LogRenderer {
    screen: SharedScreen,
    frames_drawn: u64,
}

impl LogRenderer {
    pub fn new(screen: SharedScreen) -> Self {
        Self {
            screen,
            frames_drawn: 0,
        }
    }
}

impl RenderSink for LogRenderer {
    fn draw_game(&mut self, frame: &FrameSnapshot) {
        self.frames_drawn += 1;
        if log::log_enabled!(log::Level::Trace) {
            match serde_json::to_string(frame) {
                Ok(json) => log::trace!("frame {}: {}", self.frames_drawn, json),
                Err(e) => log::warn!("could not serialize frame: {e}"),
            }
        }
        *self.screen.borrow_mut() = Some(frame.clone());
    }

    fn draw_menu(&mut self, menu: &MenuView) {
        self.frames_drawn += 1;
        *self.screen.borrow_mut() = None;
        log::trace!("menu '{}' with {} buttons", menu.title, menu.buttons.len());
    }
}

/// Input source replaying `(frame, event)` pairs. Once the script runs dry it
/// sends a single [`InputEvent::Close`].
#[derive(Debug, Default)]
pub struct ScriptedInput {
    script: VecDeque<(u64, InputEvent)>,
    frame: u64,
    closed: bool,
}

impl ScriptedInput {
    /// `script` must be ordered by frame number
    pub fn new(script: impl IntoIterator<Item = (u64, InputEvent)>) -> Self {
        Self {
            script: script.into_iter().collect(),
            frame: 0,
            closed: false,
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        self.frame += 1;
        let mut events = Vec::new();
        while let Some((at, event)) = self.script.front().copied() {
            if at > self.frame {
                break;
            }
            events.push(event);
            self.script.pop_front();
        }
        if self.script.is_empty() && events.is_empty() && !self.closed {
            self.closed = true;
            events.push(InputEvent::Close);
        }
        events
    }
}

/// Clock that advances `step` seconds every time it is sampled
#[derive(Debug)]
pub struct SteppedClock {
    t: Cell<f64>,
    step: f64,
}

impl SteppedClock {
    pub fn new(step: f64) -> Self {
        Self {
            t: Cell::new(0.0),
            step,
        }
    }
}

impl Clock for SteppedClock {
    fn now(&self) -> f64 {
        let t = self.t.get();
        self.t.set(t + self.step);
        t
    }
}

/// Audio sink that only logs
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play_music(&mut self) {
        log::debug!("music on");
    }

    fn stop_music(&mut self) {
        log::debug!("music off");
    }

    fn play_effect(&mut self, effect: SoundEffect) {
        log::debug!("sfx {effect:?}");
    }
}
