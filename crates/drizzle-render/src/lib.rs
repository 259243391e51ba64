//! Terminal rendering for drizzle.
//!
//! The world is drawn on a ratatui [`Canvas`](ratatui::widgets::canvas::Canvas)
//! whose bounds match the world size, so geometry from `drizzle-core` is used
//! as is. [`Viewport`] maps mouse cells back into the world, and the layout
//! types give the event loops the same rectangles the renderer used.

mod chars;
mod color;
mod engine;
mod layout;
mod panel;
mod shapes;
mod sky;
mod viewport;

pub use engine::{render_engine, render_engine_panel};
pub use layout::{EngineLayout, RainLayout};
pub use panel::{ButtonKind, EnginePanelLayout, SliderPanelLayout, SliderSlot};
pub use sky::{render_rain_panel, render_sky};
pub use viewport::{Viewport, marker_for};
