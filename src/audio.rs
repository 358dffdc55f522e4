//! Audio dispatch
//!
//! Turns game events into music/effect calls on an [`AudioSink`]. If the sink
//! could not be created the manager stays silent and the game carries on.

use crate::error::GameError;
use crate::platform::AudioSink;
use crate::sim::{GameEvent, Outcome, SliderOutcome};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Target touched
    Hit,
    /// Arc timer ran out
    Expired,
    /// Slider followed to the end
    SliderComplete,
    /// Slider dropped or never engaged
    SliderFailed,
    /// Backlog froze the session
    GameOver,
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Option<Box<dyn AudioSink>>,
    music_playing: bool,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::silent()
    }
}

impl AudioManager {
    /// Wrap the result of opening an audio device. Failure is logged, not fatal.
    pub fn new(sink: Result<Box<dyn AudioSink>, GameError>) -> Self {
        let sink = match sink {
            Ok(sink) => Some(sink),
            Err(e) => {
                log::warn!("{e} - audio disabled");
                None
            }
        };
        Self {
            sink,
            music_playing: false,
            muted: false,
        }
    }

    pub fn silent() -> Self {
        Self {
            sink: None,
            music_playing: false,
            muted: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    /// Mute/unmute effects and music
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.stop_music();
        }
    }

    pub fn start_music(&mut self) {
        if self.muted {
            return;
        }
        if let Some(sink) = self.sink.as_mut() {
            sink.play_music();
            self.music_playing = true;
        }
    }

    pub fn stop_music(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            if self.music_playing {
                sink.stop_music();
            }
        }
        self.music_playing = false;
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        if let Some(sink) = self.sink.as_mut() {
            sink.play_effect(effect);
        }
    }

    /// React to one frame's events: effects for resolutions, music off on
    /// pause and back on after a reset
    pub fn on_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Spawned { .. } => {}
                GameEvent::Resolved(verdict) => self.play(match verdict.outcome {
                    Outcome::Hit => SoundEffect::Hit,
                    Outcome::Expired => SoundEffect::Expired,
                    Outcome::Slider(SliderOutcome::CompletedSuccess) => SoundEffect::SliderComplete,
                    Outcome::Slider(SliderOutcome::CompletedFailure) => SoundEffect::SliderFailed,
                }),
                GameEvent::Paused => {
                    self.stop_music();
                    self.play(SoundEffect::GameOver);
                }
                GameEvent::Reset => self.start_music(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EntityType, Verdict};
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Music,
        Stop,
        Effect(SoundEffect),
    }

    struct Recorder(Rc<RefCell<Vec<Call>>>);

    impl AudioSink for Recorder {
        fn play_music(&mut self) {
            self.0.borrow_mut().push(Call::Music);
        }
        fn stop_music(&mut self) {
            self.0.borrow_mut().push(Call::Stop);
        }
        fn play_effect(&mut self, effect: SoundEffect) {
            self.0.borrow_mut().push(Call::Effect(effect));
        }
    }

    fn recording() -> (AudioManager, Rc<RefCell<Vec<Call>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let manager = AudioManager::new(Ok(Box::new(Recorder(log.clone()))));
        (manager, log)
    }

    #[test]
    fn test_init_failure_is_silent() {
        let mut audio = AudioManager::new(Err(GameError::AudioInitFailure("no device".into())));
        assert!(!audio.is_enabled());
        audio.start_music();
        audio.on_events(&[GameEvent::Paused, GameEvent::Reset]);
        assert!(!audio.is_music_playing());
    }

    #[test]
    fn test_pause_stops_music_and_reset_restarts() {
        let (mut audio, log) = recording();
        audio.start_music();
        audio.on_events(&[GameEvent::Paused]);
        assert!(!audio.is_music_playing());
        audio.on_events(&[GameEvent::Reset]);
        assert!(audio.is_music_playing());
        assert_eq!(
            *log.borrow(),
            vec![
                Call::Music,
                Call::Stop,
                Call::Effect(SoundEffect::GameOver),
                Call::Music
            ]
        );
    }

    #[test]
    fn test_resolutions_map_to_effects() {
        let (mut audio, log) = recording();
        let verdict = |outcome: Outcome| {
            GameEvent::Resolved(Verdict {
                id: 1,
                kind: EntityType::Normal,
                outcome,
                pos: Vec2::ZERO,
            })
        };
        audio.on_events(&[
            verdict(Outcome::Hit),
            verdict(Outcome::Expired),
            verdict(Outcome::Slider(SliderOutcome::CompletedSuccess)),
        ]);
        assert_eq!(
            *log.borrow(),
            vec![
                Call::Effect(SoundEffect::Hit),
                Call::Effect(SoundEffect::Expired),
                Call::Effect(SoundEffect::SliderComplete),
            ]
        );
    }

    #[test]
    fn test_muted_plays_nothing() {
        let (mut audio, log) = recording();
        audio.set_muted(true);
        audio.start_music();
        audio.play(SoundEffect::Hit);
        assert!(log.borrow().is_empty());
    }
}
