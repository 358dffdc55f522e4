//! Session state and entity types
//!
//! Everything a running session owns lives here. The per-frame update in
//! [`super::tick`] and the controller methods on [`Session`] are the only
//! places that change it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::judge::{self, FrameReport};
use super::slider::Slider;
use super::spawn::{PlayArea, Spawner};
use crate::error::GameError;
use crate::settings::SessionConfig;

/// Discriminant of an entity, for reports and snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Normal,
    ArcTimer,
    Slider,
}

/// Per-type entity state
#[derive(Debug, Clone, Serialize)]
pub enum EntityKind {
    /// Touch it to score. Never expires.
    Normal { pos: Vec2 },
    /// Touch it before `lifespan` runs out; expiry is a miss
    ArcTimer {
        pos: Vec2,
        spawn_time: f64,
        lifespan: f64,
    },
    /// Follow the moving point along a frozen path
    Slider(Slider),
}

/// One on-screen target
#[derive(Debug, Clone, Serialize)]
pub struct Entity {
    pub(crate) id: u32,
    pub(crate) radius: f32,
    pub(crate) kind: EntityKind,
}

impl Entity {
    pub fn normal(id: u32, pos: Vec2, radius: f32) -> Self {
        debug_assert!(radius > 0.0);
        Self {
            id,
            radius,
            kind: EntityKind::Normal { pos },
        }
    }

    pub fn arc_timer(id: u32, pos: Vec2, radius: f32, spawn_time: f64, lifespan: f64) -> Self {
        debug_assert!(radius > 0.0);
        Self {
            id,
            radius,
            kind: EntityKind::ArcTimer {
                pos,
                spawn_time,
                lifespan,
            },
        }
    }

    pub fn slider(id: u32, radius: f32, slider: Slider) -> Self {
        debug_assert!(radius > 0.0);
        Self {
            id,
            radius,
            kind: EntityKind::Slider(slider),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    pub fn entity_type(&self) -> EntityType {
        match self.kind {
            EntityKind::Normal { .. } => EntityType::Normal,
            EntityKind::ArcTimer { .. } => EntityType::ArcTimer,
            EntityKind::Slider(_) => EntityType::Slider,
        }
    }

    /// The position a touch is tested against this frame
    pub fn active_point(&self) -> Vec2 {
        match &self.kind {
            EntityKind::Normal { pos } | EntityKind::ArcTimer { pos, .. } => *pos,
            EntityKind::Slider(slider) => slider.active_point(),
        }
    }

    /// Presentation-only timer fill in `0.0..=1.0` (0 for targets without a timer)
    pub fn progress(&self, now: f64) -> f32 {
        match &self.kind {
            EntityKind::Normal { .. } => 0.0,
            EntityKind::ArcTimer {
                spawn_time,
                lifespan,
                ..
            } => arc_timer_progress(*spawn_time, *lifespan, now),
            EntityKind::Slider(slider) => slider.progress(now).min(1.0) as f32,
        }
    }
}

/// `min(elapsed / lifespan, 1.0)`
pub fn arc_timer_progress(spawn_time: f64, lifespan: f64, now: f64) -> f32 {
    if lifespan <= 0.0 {
        return 1.0;
    }
    ((now - spawn_time).max(0.0) / lifespan).min(1.0) as f32
}

/// Things that happened during a frame, for audio and logging
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Spawned { id: u32, kind: EntityType },
    Resolved(judge::Verdict),
    /// Live entity backlog hit the threshold; the session is frozen
    Paused,
    /// Player restarted a paused session
    Reset,
}

/// One run of gameplay from entering the game screen to leaving it
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    area: PlayArea,
    spawner: Spawner,
    score: u64,
    /// Live entities in spawn order
    entities: Vec<Entity>,
    last_spawn: f64,
    spawn_interval: f64,
    paused: bool,
    next_id: u32,
}

impl Session {
    /// Start a session on a canvas of `width` x `height`
    pub fn new(
        config: SessionConfig,
        width: f32,
        height: f32,
        seed: u64,
        now: f64,
    ) -> Result<Self, GameError> {
        let area = PlayArea::new(width, height, config.hud_margin, config.edge_margin);
        let spawner = Spawner::new(&config, seed)?;
        Ok(Self {
            spawn_interval: config.spawn_interval,
            config,
            area,
            spawner,
            score: 0,
            entities: Vec::new(),
            last_spawn: now,
            paused: false,
            next_id: 1,
        })
    }

    pub fn area(&self) -> &PlayArea {
        &self.area
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn last_spawn(&self) -> f64 {
        self.last_spawn
    }

    pub fn spawn_interval(&self) -> f64 {
        self.spawn_interval
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an already built entity (scripted scenarios, tests)
    pub fn insert(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// True if the spawn timer has run out and the session is live
    pub fn spawn_due(&self, now: f64) -> bool {
        !self.paused && now - self.last_spawn >= self.spawn_interval
    }

    /// Spawn one entity and rearm the spawn timer
    pub(crate) fn spawn(&mut self, now: f64) -> (u32, EntityType) {
        let id = self.next_entity_id();
        let (entity, next_interval) = self.spawner.spawn(id, now, &self.config, &self.area);
        let kind = entity.entity_type();
        log::debug!(
            "spawned {:?} #{} at {:?}, next spawn in {:.2}s",
            kind,
            id,
            entity.active_point(),
            next_interval
        );
        self.entities.push(entity);
        self.last_spawn = now;
        self.spawn_interval = next_interval;
        (id, kind)
    }

    /// Judge every entity against this frame's points, then apply all
    /// removals and the score delta in one step
    pub(crate) fn evaluate(&mut self, points: &[Vec2], now: f64) -> FrameReport {
        let report = judge::evaluate(&mut self.entities, points, now, &self.config);
        self.score += report.score_delta;
        report
    }

    /// Freeze the session if the backlog reached the threshold.
    /// Returns true only on the frame the pause begins.
    pub(crate) fn check_backlog(&mut self) -> bool {
        if !self.paused && self.entities.len() >= self.config.pause_threshold {
            self.paused = true;
            log::info!(
                "session paused with {} live entities (score {})",
                self.entities.len(),
                self.score
            );
            return true;
        }
        false
    }

    /// Clear entities and score, unpause, and restart the spawn timer at `now`
    pub fn reset(&mut self, now: f64) {
        self.entities.clear();
        self.score = 0;
        self.paused = false;
        self.last_spawn = now;
        self.spawn_interval = self.config.spawn_interval;
    }
}
