//! Core types and logic for the drizzle animations.
//!
//! Everything here works in world units (a virtual pixel space with y
//! pointing down) and knows nothing about terminals. The rain toy is driven
//! through [`Sky`], the engine animation through [`EngineParams`],
//! [`EngineClock`] and [`engine::layout`].

mod cloud;
pub mod engine;
mod geometry;
mod rain;
mod sky;
mod slider;

pub use cloud::{Cloud, CloudShape};
pub use engine::{EngineClock, EngineControl, EngineParams};
pub use geometry::{Bounds, Point};
pub use rain::{MAX_DENSITY, ParamRange, RainConfig, Raindrop};
pub use sky::{MouseButton, Sky, SkyChange};
pub use slider::{SliderKind, SliderPositions};

/// Width of the rain world in world units.
pub const RAIN_WORLD_WIDTH: f64 = 1000.0;

/// Height of the rain world in world units.
pub const RAIN_WORLD_HEIGHT: f64 = 800.0;
