//! Spawn scheduling and placement
//!
//! The spawner picks a target type by weight, places it inside the playable
//! area (below the HUD band, clear of the edges) and reports how long the
//! session should wait before the next spawn.

use glam::Vec2;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arc::SliderArc;
use super::slider::Slider;
use super::state::{Entity, EntityType};
use crate::error::GameError;
use crate::settings::SessionConfig;

/// Order matches [`SessionConfig::spawn_weights`]
const SPAWN_TYPES: [EntityType; 3] = [EntityType::Normal, EntityType::ArcTimer, EntityType::Slider];

/// The region shapes may occupy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
    /// Band at the top reserved for the HUD
    pub top_margin: f32,
    /// Gap kept between shapes and every edge
    pub edge_margin: f32,
}

impl PlayArea {
    pub fn new(width: f32, height: f32, top_margin: f32, edge_margin: f32) -> Self {
        Self {
            width,
            height,
            top_margin,
            edge_margin,
        }
    }

    /// Top-left corner of the usable rectangle
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.edge_margin, self.top_margin + self.edge_margin)
    }

    /// Bottom-right corner of the usable rectangle
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.width - self.edge_margin, self.height - self.edge_margin)
    }

    /// True if a disc of `radius` around `center` lies fully inside
    pub fn contains_disc(&self, center: Vec2, radius: f32) -> bool {
        let (min, max) = (self.min(), self.max());
        center.x - radius >= min.x
            && center.y - radius >= min.y
            && center.x + radius <= max.x
            && center.y + radius <= max.y
    }

    /// Range of centers for a disc of `reach`, or `None` if it cannot fit
    fn center_range(&self, reach: f32) -> Option<(Vec2, Vec2)> {
        let lo = self.min() + Vec2::splat(reach);
        let hi = self.max() - Vec2::splat(reach);
        (lo.x <= hi.x && lo.y <= hi.y).then_some((lo, hi))
    }

    /// Middle of the usable rectangle
    fn center(&self) -> Vec2 {
        (self.min() + self.max()) * 0.5
    }
}

/// Seeded entity factory
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    weights: WeightedIndex<f32>,
}

impl Spawner {
    pub fn new(config: &SessionConfig, seed: u64) -> Result<Self, GameError> {
        let weights = WeightedIndex::new(config.spawn_weights)
            .map_err(|e| GameError::InvalidSpawnWeights(e.to_string()))?;
        Ok(Self {
            rng: Pcg32::seed_from_u64(seed),
            weights,
        })
    }

    /// Draw a target type from the weighted distribution
    pub fn roll_type(&mut self) -> EntityType {
        SPAWN_TYPES[self.weights.sample(&mut self.rng)]
    }

    /// Build one entity. Returns it with the interval to wait before the
    /// next spawn: a slider's travel time after a slider, the baseline
    /// otherwise.
    pub fn spawn(
        &mut self,
        id: u32,
        now: f64,
        config: &SessionConfig,
        area: &PlayArea,
    ) -> (Entity, f64) {
        let radius = config.target_radius;
        match self.roll_type() {
            EntityType::Slider => match self.place_slider_arc(config, area) {
                Some(arc) => {
                    let slider = Slider::new(&arc, config.slider_points, now, config.slider_duration);
                    (Entity::slider(id, radius, slider), config.slider_duration)
                }
                None => {
                    log::warn!("slider does not fit a {}x{} canvas, spawning a target instead", area.width, area.height);
                    let pos = self.place_target(radius, area);
                    (Entity::normal(id, pos, radius), config.spawn_interval)
                }
            },
            EntityType::ArcTimer => {
                let pos = self.place_target(radius, area);
                let entity = Entity::arc_timer(id, pos, radius, now, config.arc_timer_lifespan);
                (entity, config.spawn_interval)
            }
            EntityType::Normal => {
                let pos = self.place_target(radius, area);
                (Entity::normal(id, pos, radius), config.spawn_interval)
            }
        }
    }

    /// Uniform position for a target disc; the area's center if none fits
    fn place_target(&mut self, radius: f32, area: &PlayArea) -> Vec2 {
        match area.center_range(radius) {
            Some((lo, hi)) => Vec2::new(
                self.rng.random_range(lo.x..=hi.x),
                self.rng.random_range(lo.y..=hi.y),
            ),
            None => area.center(),
        }
    }

    /// An arc whose full circle, thickened by the target radius, fits the area
    fn place_slider_arc(&mut self, config: &SessionConfig, area: &PlayArea) -> Option<SliderArc> {
        let reach = config.slider_arc_radius + config.target_radius;
        let (lo, hi) = area.center_range(reach)?;
        let center = Vec2::new(
            self.rng.random_range(lo.x..=hi.x),
            self.rng.random_range(lo.y..=hi.y),
        );
        let span = config.slider_arc_span_deg.clamp(0.0, 359.0);
        let start = self.rng.random_range(0.0..(360.0 - span));
        Some(SliderArc::new(center, config.slider_arc_radius, start, span))
    }
}
