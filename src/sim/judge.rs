//! Per-frame hit/miss evaluation
//!
//! Evaluation is two-phase: every entity is judged against the same tracked
//! points and the same `now`, and only afterwards are the resolved entities
//! removed and the score delta applied. No entity sees a sibling's removal
//! within the frame.

use glam::Vec2;

use super::collision::any_within;
use super::slider::{SliderOutcome, SliderStep};
use super::state::{Entity, EntityKind, EntityType};
use crate::settings::SessionConfig;

/// How an entity left play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Touched a Normal or ArcTimer target
    Hit,
    /// ArcTimer ran out before it was touched
    Expired,
    /// Slider reached the end of its travel time
    Slider(SliderOutcome),
}

impl Outcome {
    /// True if this outcome is worth a point
    pub fn scores(&self) -> bool {
        matches!(
            self,
            Outcome::Hit | Outcome::Slider(SliderOutcome::CompletedSuccess)
        )
    }
}

/// A resolved entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub id: u32,
    pub kind: EntityType,
    pub outcome: Outcome,
    /// Where the entity was when it resolved
    pub pos: Vec2,
}

/// Everything the evaluator decided this frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub verdicts: Vec<Verdict>,
    pub score_delta: u64,
}

/// Decide whether `entity` resolves this frame. Only slider state is touched.
fn judge(entity: &mut Entity, points: &[Vec2], now: f64, config: &SessionConfig) -> Option<Outcome> {
    let reach = entity.radius + config.hit_margin;
    match &mut entity.kind {
        EntityKind::Normal { pos } => any_within(points, *pos, reach).then_some(Outcome::Hit),
        EntityKind::ArcTimer {
            pos,
            spawn_time,
            lifespan,
        } => {
            if now - *spawn_time >= *lifespan {
                Some(Outcome::Expired)
            } else if any_within(points, *pos, reach) {
                Some(Outcome::Hit)
            } else {
                None
            }
        }
        EntityKind::Slider(slider) => {
            match slider.step(points, now, config.slider_engage_window, config.follow_radius) {
                SliderStep::Running(_) => None,
                SliderStep::Finished(outcome) => Some(Outcome::Slider(outcome)),
            }
        }
    }
}

/// Judge every live entity, then drop the resolved ones and total the score
pub fn evaluate(
    entities: &mut Vec<Entity>,
    points: &[Vec2],
    now: f64,
    config: &SessionConfig,
) -> FrameReport {
    let mut verdicts = Vec::new();
    // Removal goes by position so entities sharing an id stay independent
    let resolved: Vec<bool> = entities
        .iter_mut()
        .map(|entity| match judge(entity, points, now, config) {
            Some(outcome) => {
                verdicts.push(Verdict {
                    id: entity.id,
                    kind: entity.entity_type(),
                    outcome,
                    pos: entity.active_point(),
                });
                true
            }
            None => false,
        })
        .collect();

    if verdicts.is_empty() {
        return FrameReport::default();
    }

    let mut flags = resolved.into_iter();
    entities.retain(|_| !flags.next().unwrap_or(false));
    let score_delta = verdicts.iter().filter(|v| v.outcome.scores()).count() as u64;

    for v in &verdicts {
        log::debug!("{:?} #{} resolved: {:?}", v.kind, v.id, v.outcome);
    }

    FrameReport {
        verdicts,
        score_delta,
    }
}
