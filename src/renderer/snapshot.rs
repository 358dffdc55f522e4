//! Per-frame game snapshot

use glam::Vec2;
use serde::Serialize;

use crate::sim::{EntityKind, EntityType, Session, SliderPhase};

/// Colors for game elements (RGBA, 0-1)
pub mod colors {
    pub const TARGET: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
    pub const ARC_TIMER: [f32; 4] = [1.0, 0.65, 0.0, 1.0];
    pub const SLIDER_ACTIVE: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const SLIDER_FAILED: [f32; 4] = [0.6, 0.6, 0.6, 1.0];
}

/// Gap between an arc-timer disc and its countdown ring
const RING_GAP: f32 = 15.0;

pub const HINT: &str = "Put your palm over the balls to score";
pub const PAUSE_TITLE: &str = "Paused for inactivity - you lost";
pub const PAUSE_PROMPT: &str = "Press SPACE to restart";

/// Geometry to draw for one entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Shape {
    /// Filled disc
    Disc { center: Vec2, radius: f32 },
    /// Filled disc plus a ring swept clockwise from 0 to `sweep_deg`
    TimedDisc {
        center: Vec2,
        radius: f32,
        ring_radius: f32,
        sweep_deg: f32,
    },
    /// Outlined discs along the untravelled path, filled disc at the head
    SliderPath {
        head: Vec2,
        trail: Vec<Vec2>,
        radius: f32,
        phase: SliderPhase,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub id: u32,
    pub kind: EntityType,
    pub shape: Shape,
    /// Timer fill in `0..=1`
    pub progress: f32,
    pub color: [f32; 4],
}

impl EntityView {
    /// Point a hand should aim at for this entity
    pub fn shape_center(&self) -> Vec2 {
        match &self.shape {
            Shape::Disc { center, .. } | Shape::TimedDisc { center, .. } => *center,
            Shape::SliderPath { head, .. } => *head,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: String,
    pub entity_count: String,
    /// Two lines shown while the session is paused
    pub banner: Option<[String; 2]>,
    pub hint: String,
}

/// Everything the render collaborator needs for one game frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub width: f32,
    pub height: f32,
    pub time: f64,
    pub entities: Vec<EntityView>,
    pub points: Vec<Vec2>,
    pub hud: Hud,
}

impl FrameSnapshot {
    pub fn capture(session: &Session, points: &[Vec2], now: f64) -> Self {
        let area = session.area();
        let entities = session
            .entities()
            .iter()
            .map(|e| {
                let progress = e.progress(now);
                let (shape, color) = match &e.kind {
                    EntityKind::Normal { pos } => (
                        Shape::Disc {
                            center: *pos,
                            radius: e.radius,
                        },
                        colors::TARGET,
                    ),
                    EntityKind::ArcTimer { pos, .. } => (
                        Shape::TimedDisc {
                            center: *pos,
                            radius: e.radius,
                            ring_radius: e.radius + RING_GAP,
                            sweep_deg: progress * 360.0,
                        },
                        colors::ARC_TIMER,
                    ),
                    EntityKind::Slider(slider) => {
                        let phase = slider.phase();
                        let color = if phase == SliderPhase::Failed {
                            colors::SLIDER_FAILED
                        } else {
                            colors::SLIDER_ACTIVE
                        };
                        (
                            Shape::SliderPath {
                                head: slider.active_point(),
                                trail: slider.remaining_path().to_vec(),
                                radius: e.radius,
                                phase,
                            },
                            color,
                        )
                    }
                };
                EntityView {
                    id: e.id,
                    kind: e.entity_type(),
                    shape,
                    progress,
                    color,
                }
            })
            .collect();

        let banner = session
            .is_paused()
            .then(|| [PAUSE_TITLE.to_string(), PAUSE_PROMPT.to_string()]);

        Self {
            width: area.width,
            height: area.height,
            time: now,
            entities,
            points: points.to_vec(),
            hud: Hud {
                score: format!("Score: {}", session.score()),
                entity_count: format!("Balls: {}", session.entities().len()),
                banner,
                hint: HINT.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SessionConfig;
    use crate::sim::{Entity, Slider, SliderArc};

    fn session() -> Session {
        Session::new(SessionConfig::default(), 640.0, 480.0, 1, 0.0).unwrap()
    }

    #[test]
    fn test_arc_timer_ring_sweeps_with_time() {
        let mut s = session();
        s.insert(Entity::arc_timer(1, Vec2::new(200.0, 200.0), 20.0, 0.0, 2.0));
        let snap = FrameSnapshot::capture(&s, &[], 0.5);
        match &snap.entities[0].shape {
            Shape::TimedDisc {
                ring_radius,
                sweep_deg,
                ..
            } => {
                assert_eq!(*ring_radius, 35.0);
                assert!((sweep_deg - 90.0).abs() < 0.01);
            }
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn test_slider_trail_is_untravelled_path() {
        let mut s = session();
        let arc = SliderArc::new(Vec2::new(320.0, 280.0), 100.0, 0.0, 120.0);
        s.insert(Entity::slider(1, 20.0, Slider::new(&arc, 20, 0.0, 3.0)));
        let snap = FrameSnapshot::capture(&s, &[], 0.0);
        match &snap.entities[0].shape {
            Shape::SliderPath { trail, phase, .. } => {
                assert_eq!(trail.len(), 20);
                assert_eq!(*phase, SliderPhase::Unengaged);
            }
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn test_hud_text_and_banner() {
        let mut s = session();
        let snap = FrameSnapshot::capture(&s, &[], 0.0);
        assert_eq!(snap.hud.score, "Score: 0");
        assert_eq!(snap.hud.banner, None);

        for id in 0..3 {
            s.insert(Entity::normal(id, Vec2::new(300.0, 300.0), 20.0));
        }
        crate::sim::tick(&mut s, &crate::sim::TickInput::default(), 0.1);
        let snap = FrameSnapshot::capture(&s, &[Vec2::new(1.0, 2.0)], 0.1);
        assert_eq!(snap.hud.entity_count, "Balls: 3");
        assert!(snap.hud.banner.is_some());
        assert_eq!(snap.points, vec![Vec2::new(1.0, 2.0)]);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut s = session();
        s.insert(Entity::normal(1, Vec2::new(100.0, 120.0), 20.0));
        let json = serde_json::to_string(&FrameSnapshot::capture(&s, &[], 0.0)).unwrap();
        assert!(json.contains("\"Disc\""));
        assert!(json.contains("Score: 0"));
    }
}
