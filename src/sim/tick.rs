//! Per-frame session update
//!
//! One call per frame, with one clock sample shared by every entity:
//! reset (if requested while paused) → spawn (if due) → evaluate → backlog check.

use glam::Vec2;

use super::state::{GameEvent, Session};

/// Inputs for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Tracked points from the pose collaborator (may be empty)
    pub points: Vec<Vec2>,
    /// Restart request; only honoured while paused
    pub reset: bool,
}

/// Advance the session to `now`, returning what happened this frame
pub fn tick(session: &mut Session, input: &TickInput, now: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.reset && session.is_paused() {
        session.reset(now);
        log::info!("session reset");
        events.push(GameEvent::Reset);
    }

    // Frozen until reset
    if session.is_paused() {
        return events;
    }

    if session.spawn_due(now) {
        let (id, kind) = session.spawn(now);
        events.push(GameEvent::Spawned { id, kind });
    }

    let report = session.evaluate(&input.points, now);
    events.extend(report.verdicts.into_iter().map(GameEvent::Resolved));

    if session.check_backlog() {
        events.push(GameEvent::Paused);
    }

    events
}
