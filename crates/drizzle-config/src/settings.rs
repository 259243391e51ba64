//! User settings loaded from `config.toml`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use drizzle_core::{EngineParams, RainConfig};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Name of the settings file inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Name of the log file inside the data directory.
const LOG_FILE: &str = "drizzle.log";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "drizzle")
}

/// Canvas resolution used to draw the world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerStyle {
    /// Two square-ish pixels per cell, solid colors.
    #[default]
    HalfBlock,
    /// Eight dots per cell, finest detail.
    Braille,
    /// One full block per cell.
    Block,
}

/// Settings of the rain toy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainSettings {
    /// Frames per second; rain speeds are per frame.
    pub fps: u32,
    /// Directory holding the per-cloud files; the working directory if unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_dir: Option<PathBuf>,
    /// Width of the slider panel in columns.
    pub panel_width: u16,
    pub marker: MarkerStyle,
    /// Settings given to new clouds; the sliders move around these.
    pub defaults: RainConfig,
}

impl Default for RainSettings {
    fn default() -> Self {
        Self {
            fps: 60,
            store_dir: None,
            panel_width: 34,
            marker: MarkerStyle::default(),
            defaults: RainConfig::default(),
        }
    }
}

impl RainSettings {
    /// Directory for cloud files.
    pub fn store_dir(&self) -> PathBuf {
        self.store_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn frame_duration(&self) -> Duration {
        frame_duration(self.fps)
    }
}

/// Settings of the engine animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub fps: u32,
    /// Height of the control panel in rows.
    pub panel_height: u16,
    pub marker: MarkerStyle,
    /// Parameters on start and after a reset.
    pub defaults: EngineParams,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            fps: 60,
            panel_height: 12,
            marker: MarkerStyle::default(),
            defaults: EngineParams::default(),
        }
    }
}

impl EngineSettings {
    pub fn frame_duration(&self) -> Duration {
        frame_duration(self.fps)
    }
}

fn frame_duration(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / fps.clamp(1, 240) as f64)
}

/// All user settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rain: RainSettings,
    pub engine: EngineSettings,
}

impl Config {
    /// Platform location of the settings file.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Platform location of the log file.
    pub fn log_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.data_dir().join(LOG_FILE))
    }

    /// Load from the platform location, falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.sanitized())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let text = self.to_toml()?;
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, text).map_err(write_err)
    }

    /// Pull hand-edited values back into usable ranges.
    fn sanitized(mut self) -> Self {
        self.rain.defaults = self.rain.defaults.normalized();
        self.engine.defaults = self.engine.defaults.clamped();
        self.rain.panel_width = self.rain.panel_width.max(20);
        self.engine.panel_height = self.engine.panel_height.max(8);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::load_from(&dir.path().join("nope.toml")).expect("load");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[rain]
fps = 30
marker = "braille"

[engine.defaults]
cylinders = 6
"#,
        )
        .expect("write");

        let config = Config::load_from(&path).expect("load");
        assert_eq!(config.rain.fps, 30);
        assert_eq!(config.rain.marker, MarkerStyle::Braille);
        assert_eq!(config.rain.panel_width, 34);
        assert_eq!(config.rain.defaults, RainConfig::default());
        assert_eq!(config.engine.defaults.cylinders, 6);
        assert_eq!(config.engine.defaults.piston_size, 50);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[rain.defaults]
density = 5
speed = [10, 4]
drop_length = [6, 12]
drop_width = [1, 2]

[engine.defaults]
cylinders = 99
"#,
        )
        .expect("write");

        let config = Config::load_from(&path).expect("load");
        assert_eq!(config.rain.defaults.speed.min, 4.0);
        assert_eq!(config.rain.defaults.speed.max, 10.0);
        assert_eq!(config.engine.defaults.cylinders, 10);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[rain\nfps = ").expect("write");

        let err = Config::load_from(&path).expect_err("should fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.rain.store_dir = Some(dir.path().join("clouds"));
        config.engine.fps = 30;

        config.save_to(&path).expect("save");
        assert_eq!(Config::load_from(&path).expect("load"), config);
    }

    #[test]
    fn test_frame_duration() {
        let settings = RainSettings::default();
        assert_eq!(settings.frame_duration(), Duration::from_secs_f64(1.0 / 60.0));
        let stalled = EngineSettings {
            fps: 0,
            ..EngineSettings::default()
        };
        assert_eq!(stalled.frame_duration(), Duration::from_secs(1));
    }
}
