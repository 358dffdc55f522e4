//! Palm Rush entry point
//!
//! Without a camera or window attached this runs a scripted demo on the
//! headless platform: configure a resolution, play a session with the demo
//! hand, restart after the first pause and quit. Session summaries are
//! printed as JSON.

use std::rc::Rc;

use glam::Vec2;

use palm_rush::audio::AudioManager;
use palm_rush::game::Game;
use palm_rush::platform::headless::{
    DemoHand, LogAudio, LogRenderer, ScriptedInput, SharedScreen, SteppedClock, SyntheticCamera,
};
use palm_rush::platform::{InputEvent, Key, Platform};
use palm_rush::{App, Settings};

const FRAME_STEP: f64 = 1.0 / 30.0;

fn demo_platform() -> Platform {
    let app = App::default();
    let configure = app.buttons()[1].clone();

    let screen: SharedScreen = Rc::default();
    let script = [
        (2, InputEvent::PointerMove(configure.min + Vec2::splat(4.0))),
        (4, InputEvent::PointerClick((configure.min + configure.max) / 2.0)),
        (6, InputEvent::Key(Key::Down)),
        (8, InputEvent::Key(Key::Enter)),
        // Space only restarts while paused; earlier presses are ignored
        (900, InputEvent::Key(Key::Space)),
        (1500, InputEvent::Key(Key::Space)),
        (2400, InputEvent::Quit),
    ];

    Platform {
        frames: Box::new(SyntheticCamera::new()),
        pose: Box::new(DemoHand::new(screen.clone(), 18.0).with_dropout(600, 200)),
        render: Box::new(LogRenderer::new(screen)),
        input: Box::new(ScriptedInput::new(script)),
        clock: Box::new(SteppedClock::new(FRAME_STEP)),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Palm Rush (headless demo) starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(42);

    let mut game = Game::new(
        App::new(Settings::default()),
        demo_platform(),
        AudioManager::new(Ok(Box::new(LogAudio))),
        seed,
    );

    for summary in game.run() {
        match serde_json::to_string_pretty(summary) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("could not serialize summary: {e}"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
