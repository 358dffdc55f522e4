//! Frame-synchronous main loop
//!
//! Drives the [`App`] screens against a [`Platform`]. Menus draw and consume
//! input until a transition happens; the game screen runs one [`Session`]:
//!
//! acquire frame → track points → tick → audio/render → poll input
//!
//! Commands polled at the end of a frame take effect at the top of the next
//! one. A capture failure ends the session and returns to the menu.

use serde::Serialize;

use crate::app::{App, GameCommand, Screen};
use crate::audio::AudioManager;
use crate::error::GameError;
use crate::platform::Platform;
use crate::renderer::{FrameSnapshot, MenuView};
use crate::settings::Resolution;
use crate::sim::{GameEvent, Session, TickInput, tick};

/// Why a session stopped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SessionEnd {
    /// Quit input: back to the menu
    Left,
    /// Window closed: the program exits
    Closed,
    /// The frame source failed
    CaptureLost(String),
    /// The session tuning was rejected before play began
    ConfigRejected(String),
}

/// Bookkeeping for one finished session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub resolution: Resolution,
    /// Score when the session ended
    pub score: u64,
    /// Best score reached across resets
    pub best_score: u64,
    pub frames: u64,
    pub hits: u64,
    pub misses: u64,
    pub pauses: u64,
    pub resets: u64,
    pub end: SessionEnd,
}

impl SessionSummary {
    fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            score: 0,
            best_score: 0,
            frames: 0,
            hits: 0,
            misses: 0,
            pauses: 0,
            resets: 0,
            end: SessionEnd::Left,
        }
    }

    fn record(&mut self, events: &[GameEvent], session: &Session) {
        self.frames += 1;
        for event in events {
            match event {
                GameEvent::Spawned { .. } => {}
                GameEvent::Resolved(verdict) => {
                    if verdict.outcome.scores() {
                        self.hits += 1;
                    } else {
                        self.misses += 1;
                    }
                }
                GameEvent::Paused => self.pauses += 1,
                GameEvent::Reset => self.resets += 1,
            }
        }
        self.score = session.score();
        self.best_score = self.best_score.max(self.score);
    }
}

pub struct Game {
    app: App,
    platform: Platform,
    audio: AudioManager,
    seed: u64,
    summaries: Vec<SessionSummary>,
}

impl Game {
    /// `seed` drives spawning; each session gets its own stream derived from it
    pub fn new(app: App, platform: Platform, audio: AudioManager, seed: u64) -> Self {
        Self {
            app,
            platform,
            audio,
            seed,
            summaries: Vec::new(),
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Run until the app reaches [`Screen::Exit`]
    pub fn run(&mut self) -> &[SessionSummary] {
        log::info!("starting on {:?}", self.app.screen());
        loop {
            match self.app.screen() {
                Screen::Menu | Screen::Config => self.menu_frame(),
                Screen::Game => {
                    let summary = self.run_session();
                    log::info!(
                        "session over ({:?}): score {}, {} hits, {} misses",
                        summary.end,
                        summary.score,
                        summary.hits,
                        summary.misses
                    );
                    if summary.end == SessionEnd::Closed {
                        self.app.close();
                    } else {
                        self.app.end_session();
                    }
                    self.summaries.push(summary);
                }
                Screen::Exit => break,
            }
        }
        log::info!("exiting after {} session(s)", self.summaries.len());
        &self.summaries
    }

    fn menu_frame(&mut self) {
        self.platform.render.draw_menu(&MenuView::capture(&self.app));
        for event in self.platform.input.poll() {
            // Events after the one that leaves the menus are dropped
            if matches!(self.app.handle(&event), Screen::Game | Screen::Exit) {
                break;
            }
        }
    }

    /// Play one session on the game screen
    pub fn run_session(&mut self) -> SessionSummary {
        let resolution = self.app.resolution();
        let mut summary = SessionSummary::new(resolution);
        summary.end = match self.play(resolution, &mut summary) {
            Ok(end) => end,
            Err(GameError::CaptureUnavailable(reason)) => {
                log::error!("capture unavailable: {reason} - leaving session");
                SessionEnd::CaptureLost(reason)
            }
            Err(e) => {
                log::error!("session not started: {e}");
                SessionEnd::ConfigRejected(e.to_string())
            }
        };
        self.audio.stop_music();
        self.platform.frames.close();
        summary
    }

    fn play(
        &mut self,
        resolution: Resolution,
        summary: &mut SessionSummary,
    ) -> Result<SessionEnd, GameError> {
        self.platform.frames.open(resolution)?;
        let first = self.platform.frames.read()?;
        let seed = self.seed.wrapping_add(self.summaries.len() as u64);
        let mut session = Session::new(
            self.app.settings().session.clone(),
            first.width as f32,
            first.height as f32,
            seed,
            self.platform.clock.now(),
        )?;
        log::info!("session started at {} (seed {seed})", resolution.label());
        self.audio.start_music();

        let mut frame = Some(first);
        let mut reset = false;
        loop {
            let frame_data = match frame.take() {
                Some(f) => f,
                None => self.platform.frames.read()?,
            };
            let points = self.platform.pose.track(&frame_data);
            let now = self.platform.clock.now();

            let input = TickInput {
                points,
                reset: std::mem::take(&mut reset),
            };
            let events = tick(&mut session, &input, now);
            summary.record(&events, &session);
            self.audio.on_events(&events);
            self.platform
                .render
                .draw_game(&FrameSnapshot::capture(&session, &input.points, now));

            let mut command = None;
            for event in self.platform.input.poll() {
                match self.app.game_command(&event) {
                    Some(GameCommand::Reset) => reset = true,
                    Some(other) => {
                        command = Some(other);
                        break;
                    }
                    None => {}
                }
            }
            match command {
                Some(GameCommand::Leave) => return Ok(SessionEnd::Left),
                Some(GameCommand::Close) => return Ok(SessionEnd::Closed),
                Some(GameCommand::Reset) | None => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::MenuAction;
    use crate::platform::headless::{
        DemoHand, LogAudio, LogRenderer, ScriptedInput, SharedScreen, SteppedClock,
        SyntheticCamera,
    };
    use crate::platform::{FrameSource, InputEvent, Key};
    use crate::settings::Settings;
    use std::rc::Rc;

    fn platform(camera: impl FrameSource + 'static, script: Vec<(u64, InputEvent)>) -> Platform {
        let screen: SharedScreen = Rc::default();
        Platform {
            frames: Box::new(camera),
            pose: Box::new(DemoHand::new(screen.clone(), 25.0)),
            render: Box::new(LogRenderer::new(screen)),
            input: Box::new(ScriptedInput::new(script)),
            clock: Box::new(SteppedClock::new(1.0 / 30.0)),
        }
    }

    fn game(camera: impl FrameSource + 'static, script: Vec<(u64, InputEvent)>) -> Game {
        Game::new(
            App::default(),
            platform(camera, script),
            AudioManager::new(Ok(Box::new(LogAudio))),
            99,
        )
    }

    #[test]
    fn test_menu_quit_exits_without_session() {
        let mut g = game(SyntheticCamera::new(), vec![(1, InputEvent::Key(Key::Q))]);
        assert!(g.run().is_empty());
        assert_eq!(g.app().screen(), Screen::Exit);
    }

    #[test]
    fn test_capture_failure_returns_to_menu() {
        let mut g = game(
            SyntheticCamera::failing_after(10),
            vec![(1, InputEvent::Key(Key::Enter)), (1000, InputEvent::Quit)],
        );
        let summaries = g.run().to_vec();
        assert_eq!(summaries.len(), 1);
        assert!(matches!(summaries[0].end, SessionEnd::CaptureLost(_)));
        assert_eq!(summaries[0].frames, 10);
        // Back on the menu, the later quit ends the program
        assert_eq!(g.app().screen(), Screen::Exit);
    }

    #[test]
    fn test_unplugged_camera_never_starts() {
        let mut g = game(SyntheticCamera::unplugged(), vec![(1, InputEvent::Key(Key::Enter))]);
        let summaries = g.run().to_vec();
        assert_eq!(summaries[0].frames, 0);
        assert!(!g.audio.is_music_playing());
    }

    #[test]
    fn test_quit_leaves_session_then_close_exits() {
        let mut g = game(
            SyntheticCamera::new(),
            vec![(1, InputEvent::Key(Key::Enter)), (20, InputEvent::Quit)],
        );
        let summaries = g.run().to_vec();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].end, SessionEnd::Left);
        assert_eq!(g.app().screen(), Screen::Exit);
    }

    #[test]
    fn test_close_during_session_exits() {
        let mut g = game(
            SyntheticCamera::new(),
            vec![(1, InputEvent::Key(Key::Enter)), (5, InputEvent::Close)],
        );
        let summaries = g.run().to_vec();
        assert_eq!(summaries[0].end, SessionEnd::Closed);
        assert_eq!(g.app().screen(), Screen::Exit);
    }

    #[test]
    fn test_config_resolution_reaches_session() {
        let mut app = App::default();
        app.apply(MenuAction::Configure);
        app.apply(MenuAction::SelectResolution(1));
        app.apply(MenuAction::Start);
        let mut g = Game::new(
            app,
            platform(SyntheticCamera::new(), vec![(3, InputEvent::Quit)]),
            AudioManager::silent(),
            5,
        );
        let summary = g.run_session();
        assert_eq!(summary.resolution, Resolution::new(800, 600));
        assert_eq!(summary.frames, 3);
    }

    #[test]
    fn test_idle_session_pauses_and_reset_recovers() {
        // A hand that never shows up lets the backlog pile up
        let screen: SharedScreen = Rc::default();
        let platform = Platform {
            frames: Box::new(SyntheticCamera::new()),
            pose: Box::new(DemoHand::new(screen.clone(), 0.0).with_dropout(1, 1)),
            render: Box::new(LogRenderer::new(screen)),
            input: Box::new(ScriptedInput::new([
                (300, InputEvent::Key(Key::Space)),
                (310, InputEvent::Quit),
            ])),
            clock: Box::new(SteppedClock::new(1.0 / 30.0)),
        };
        let mut settings = Settings::default();
        settings.session.spawn_weights = [1.0, 0.0, 0.0];
        let mut app = App::new(settings);
        app.apply(MenuAction::Start);
        let mut g = Game::new(app, platform, AudioManager::silent(), 3);
        let summary = g.run_session();
        assert_eq!(summary.hits, 0);
        assert_eq!(summary.pauses, 1);
        assert_eq!(summary.resets, 1);
        assert_eq!(summary.frames, 310);
    }

    #[test]
    fn test_summary_serializes() {
        let summary = SessionSummary::new(Resolution::new(640, 480));
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"best_score\":0"));
        assert!(json.contains("\"Left\""));
    }

    #[test]
    fn test_rejected_weights_are_not_a_capture_loss() {
        let mut settings = Settings::default();
        settings.session.spawn_weights = [0.0, 0.0, 0.0];
        let mut app = App::new(settings);
        app.apply(MenuAction::Start);
        let mut g = Game::new(
            app,
            platform(SyntheticCamera::new(), Vec::new()),
            AudioManager::silent(),
            1,
        );
        let summary = g.run_session();
        assert!(matches!(summary.end, SessionEnd::ConfigRejected(_)));
        assert_eq!(summary.frames, 0);
    }
}
