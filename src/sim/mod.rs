//! Game session engine
//!
//! All gameplay logic lives here. This module must stay free of platform code:
//! - Time comes in as one `now` sample per frame
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or capture dependencies

pub mod arc;
pub mod collision;
pub mod judge;
pub mod slider;
pub mod spawn;
pub mod state;
pub mod tick;

pub use arc::SliderArc;
pub use collision::any_within;
pub use judge::{FrameReport, Outcome, Verdict, evaluate};
pub use slider::{Slider, SliderOutcome, SliderPhase, SliderStep};
pub use spawn::{PlayArea, Spawner};
pub use state::{Entity, EntityKind, EntityType, GameEvent, Session, arc_timer_progress};
pub use tick::{TickInput, tick};
