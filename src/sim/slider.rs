//! Slider following state machine
//!
//! A slider's active point walks a frozen path over `duration` seconds. The
//! player engages by reaching the active point while it is still inside the
//! engage window (the first few path points), and must then stay within the
//! follow radius until the end. Losing contact once fails the slider for good.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arc::SliderArc;
use super::collision::any_within;

/// Non-terminal slider states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SliderPhase {
    Unengaged,
    Following,
    Failed,
}

/// How a slider ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SliderOutcome {
    CompletedSuccess,
    CompletedFailure,
}

/// Result of stepping a slider for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderStep {
    Running(SliderPhase),
    Finished(SliderOutcome),
}

/// Slider-specific entity state
#[derive(Debug, Clone, Serialize)]
pub struct Slider {
    pub(crate) spawn_time: f64,
    pub(crate) duration: f64,
    pub(crate) arc: SliderArc,
    /// Frozen at spawn
    path: Vec<Vec2>,
    /// Only ever moves forward
    index: usize,
    following: bool,
    /// Sticky once set
    failed: bool,
}

impl Slider {
    /// Build a slider whose path is `num_points` (at least 2) samples of `arc`
    pub fn new(arc: &SliderArc, num_points: usize, spawn_time: f64, duration: f64) -> Self {
        Self {
            spawn_time,
            duration,
            arc: *arc,
            path: arc.sample(num_points.max(2)),
            index: 0,
            following: false,
            failed: false,
        }
    }

    pub fn spawn_time(&self) -> f64 {
        self.spawn_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// The arc the path was sampled from
    pub fn arc(&self) -> &SliderArc {
        &self.arc
    }

    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    /// Path points not yet travelled, starting with the active one
    pub fn remaining_path(&self) -> &[Vec2] {
        &self.path[self.index..]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_following(&self) -> bool {
        self.following
    }

    pub fn has_failed(&self) -> bool {
        self.failed
    }

    pub fn phase(&self) -> SliderPhase {
        if self.failed {
            SliderPhase::Failed
        } else if self.following {
            SliderPhase::Following
        } else {
            SliderPhase::Unengaged
        }
    }

    pub fn active_point(&self) -> Vec2 {
        self.path[self.index]
    }

    /// Elapsed fraction of the travel time; may exceed 1.0
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (now - self.spawn_time).max(0.0) / self.duration
    }

    /// Advance one frame.
    ///
    /// At time-up the slider succeeds only if it was engaged and never lost
    /// contact. Before that the active index follows elapsed time and the
    /// engage/disengage rules are applied against the active point.
    pub(crate) fn step(
        &mut self,
        points: &[Vec2],
        now: f64,
        engage_window: usize,
        follow_radius: f32,
    ) -> SliderStep {
        let t = self.progress(now);
        if t >= 1.0 {
            let outcome = if self.following && !self.failed {
                SliderOutcome::CompletedSuccess
            } else {
                SliderOutcome::CompletedFailure
            };
            return SliderStep::Finished(outcome);
        }

        let last = self.path.len() - 1;
        let target = ((t * last as f64).floor() as usize).min(last);
        self.index = self.index.max(target);

        let in_range = any_within(points, self.active_point(), follow_radius);
        if self.index < engage_window && in_range {
            self.following = true;
        } else if self.following && !in_range {
            self.failed = true;
        }

        SliderStep::Running(self.phase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FOLLOW_RADIUS, SLIDER_ENGAGE_WINDOW};

    fn slider() -> Slider {
        let arc = SliderArc::new(Vec2::new(300.0, 300.0), 100.0, 0.0, 120.0);
        Slider::new(&arc, 20, 0.0, 3.0)
    }

    fn step(s: &mut Slider, points: &[Vec2], now: f64) -> SliderStep {
        s.step(points, now, SLIDER_ENGAGE_WINDOW, FOLLOW_RADIUS)
    }

    /// A tracked point sitting exactly on the slider's active point at `now`
    fn on_track(s: &Slider, now: f64) -> Vec<Vec2> {
        let last = s.path().len() - 1;
        let idx = ((s.progress(now) * last as f64).floor() as usize).min(last);
        vec![s.path()[idx]]
    }

    #[test]
    fn test_engage_then_lose_contact_fails() {
        let mut s = slider();

        let p0 = vec![s.path()[0]];
        assert_eq!(step(&mut s, &p0, 0.05), SliderStep::Running(SliderPhase::Following));
        assert_eq!(s.index(), 0);

        assert_eq!(step(&mut s, &[], 1.5), SliderStep::Running(SliderPhase::Failed));
        assert!(s.has_failed());

        assert_eq!(
            step(&mut s, &[], 3.0),
            SliderStep::Finished(SliderOutcome::CompletedFailure)
        );
    }

    #[test]
    fn test_follow_to_the_end_succeeds() {
        let mut s = slider();
        let mut now = 0.0;
        while now < 3.0 {
            let pts = on_track(&s, now);
            assert!(matches!(step(&mut s, &pts, now), SliderStep::Running(SliderPhase::Following)));
            now += 1.0 / 60.0;
        }
        assert_eq!(
            step(&mut s, &[], 3.0),
            SliderStep::Finished(SliderOutcome::CompletedSuccess)
        );
    }

    #[test]
    fn test_failure_is_sticky_even_if_contact_returns() {
        let mut s = slider();
        let start = [s.path()[0]];
        step(&mut s, &start, 0.0);
        step(&mut s, &[Vec2::new(-500.0, -500.0)], 0.2);
        assert!(s.has_failed());

        // Back on track for the rest of the run, inside and past the window
        let mut now = 0.3;
        while now < 3.0 {
            let pts = on_track(&s, now);
            assert_eq!(step(&mut s, &pts, now), SliderStep::Running(SliderPhase::Failed));
            now += 0.1;
        }
        assert_eq!(
            step(&mut s, &[], 3.2),
            SliderStep::Finished(SliderOutcome::CompletedFailure)
        );
    }

    #[test]
    fn test_late_engagement_is_ignored() {
        let mut s = slider();
        // Past the window: 1.8s / 3.0s * 19 = index 11
        let now = 1.8;
        let pts = on_track(&s, now);
        assert_eq!(step(&mut s, &pts, now), SliderStep::Running(SliderPhase::Unengaged));
        assert!(s.index() >= SLIDER_ENGAGE_WINDOW);
        assert!(!s.is_following());
        assert_eq!(
            step(&mut s, &[], 3.0),
            SliderStep::Finished(SliderOutcome::CompletedFailure)
        );
    }

    #[test]
    fn test_never_touched_fails_without_error() {
        let mut s = slider();
        assert_eq!(step(&mut s, &[], 1.0), SliderStep::Running(SliderPhase::Unengaged));
        assert_eq!(
            step(&mut s, &[], 3.0),
            SliderStep::Finished(SliderOutcome::CompletedFailure)
        );
    }

    #[test]
    fn test_index_tracks_time_and_clamps() {
        let mut s = slider();
        step(&mut s, &[], 1.5);
        assert_eq!(s.index(), 9);
        step(&mut s, &[], 2.99);
        assert_eq!(s.index(), 18);
        assert_eq!(s.remaining_path().len(), 2);
    }

    #[test]
    fn test_path_has_at_least_two_points() {
        let arc = SliderArc::new(Vec2::ZERO, 100.0, 0.0, 120.0);
        let s = Slider::new(&arc, 1, 0.0, 3.0);
        assert_eq!(s.path().len(), 2);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn index_never_decreases(
                deltas in proptest::collection::vec(0.0f64..0.4, 1..40),
                touch in proptest::collection::vec(any::<bool>(), 40),
            ) {
                let mut s = slider();
                let mut now = 0.0;
                let mut last_index = 0;
                for (i, dt) in deltas.iter().enumerate() {
                    now += dt;
                    let pts = if touch[i] { on_track(&s, now) } else { Vec::new() };
                    let failed_before = s.has_failed();
                    match step(&mut s, &pts, now) {
                        SliderStep::Running(_) => {
                            prop_assert!(s.index() >= last_index);
                            last_index = s.index();
                        }
                        SliderStep::Finished(outcome) => {
                            if failed_before {
                                prop_assert_eq!(outcome, SliderOutcome::CompletedFailure);
                            }
                            break;
                        }
                    }
                    prop_assert!(!s.has_failed() || s.is_following());
                    if failed_before {
                        prop_assert!(s.has_failed());
                    }
                }
            }
        }
    }

    #[test]
    fn test_read_accessors_match_construction() {
        let arc = SliderArc::new(Vec2::new(300.0, 300.0), 100.0, 10.0, 120.0);
        let s = Slider::new(&arc, 20, 4.0, 3.0);
        assert_eq!(s.spawn_time(), 4.0);
        assert_eq!(s.duration(), 3.0);
        assert_eq!(*s.arc(), arc);
        assert_eq!(s.path()[0], arc.point_at(0.0));
    }
}
