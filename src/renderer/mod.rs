//! Frame descriptions for the render collaborator
//!
//! Nothing here draws. Each frame the engine packs what is on screen into a
//! plain, serializable description and hands it to a [`crate::platform::RenderSink`].

pub mod menu;
pub mod snapshot;

pub use menu::{ButtonView, MenuView};
pub use snapshot::{EntityView, FrameSnapshot, Hud, Shape, colors};
