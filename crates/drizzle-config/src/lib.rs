//! Configuration and persistence for drizzle.
//!
//! [`Config`] is the user's TOML settings file; [`CloudStore`] keeps one JSON
//! file of rain settings per cloud while the cloud exists.

mod error;
mod settings;
mod store;

pub use error::{ConfigError, StoreError};
pub use settings::{Config, EngineSettings, MarkerStyle, RainSettings};
pub use store::CloudStore;
