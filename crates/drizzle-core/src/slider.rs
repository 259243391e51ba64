//! Slider mapping between a knob position in `[0, 1]` and rain parameters.
//!
//! Every slider moves a parameter around its configured default. A spread is
//! a quarter of the default width (a quarter of the default value for
//! density); the knob sweeps the value from one spread below the default
//! centre to three spreads above it, keeping a window of two spreads for
//! range parameters.

use crate::rain::{ParamRange, RainConfig};

/// The four rain sliders, in panel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliderKind {
    Density,
    Speed,
    DropLength,
    DropWidth,
}

impl SliderKind {
    /// All sliders in display order.
    pub const ALL: [SliderKind; 4] = [
        SliderKind::Density,
        SliderKind::Speed,
        SliderKind::DropLength,
        SliderKind::DropWidth,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            SliderKind::Density => "Density",
            SliderKind::Speed => "Speed",
            SliderKind::DropLength => "Droplet Length",
            SliderKind::DropWidth => "Droplet Width",
        }
    }

    /// Smallest value the slider may produce.
    fn floor(self) -> f64 {
        match self {
            SliderKind::Density | SliderKind::DropWidth => 1.0,
            SliderKind::Speed | SliderKind::DropLength => 0.0,
        }
    }

    fn range(self, config: &RainConfig) -> Option<ParamRange> {
        match self {
            SliderKind::Density => None,
            SliderKind::Speed => Some(config.speed),
            SliderKind::DropLength => Some(config.drop_length),
            SliderKind::DropWidth => Some(config.drop_width),
        }
    }

    fn range_mut(self, config: &mut RainConfig) -> Option<&mut ParamRange> {
        match self {
            SliderKind::Density => None,
            SliderKind::Speed => Some(&mut config.speed),
            SliderKind::DropLength => Some(&mut config.drop_length),
            SliderKind::DropWidth => Some(&mut config.drop_width),
        }
    }

    /// Centre and spread derived from the defaults.
    fn anchor(self, defaults: &RainConfig) -> (f64, f64) {
        match self.range(defaults) {
            Some(range) => (range.mid(), (range.max - range.min).abs() / 4.0),
            None => (defaults.density, defaults.density.abs() / 4.0),
        }
    }

    /// Write the value for `position` into `config`.
    pub fn apply(self, config: &mut RainConfig, defaults: &RainConfig, position: f64) {
        let (center, spread) = self.anchor(defaults);
        let low = center - spread + position.clamp(0.0, 1.0) * 2.0 * spread;
        let floor = self.floor();

        match self.range_mut(config) {
            Some(range) => {
                *range = ParamRange::new(low.max(floor), (low + 2.0 * spread).max(floor));
            }
            None => config.density = low.max(floor),
        }
    }

    /// Knob position shown when a cloud is selected: the midpoint's place
    /// within the default range, or density as a share of twice its default.
    pub fn position_of(self, config: &RainConfig, defaults: &RainConfig) -> f64 {
        let (value, lo, hi) = match (self.range(config), self.range(defaults)) {
            (Some(range), Some(default)) => (range.mid(), default.min, default.max),
            _ => (config.density, 0.0, 2.0 * defaults.density),
        };
        if (hi - lo).abs() <= f64::EPSILON {
            return 0.5;
        }
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    }

    /// Label with the current value, e.g. `Speed: 4.00 - 10.00`.
    pub fn describe(self, config: &RainConfig) -> String {
        match self.range(config) {
            Some(range) => format!("{}: {:.2} - {:.2}", self.label(), range.min, range.max),
            None => format!("{}: {:.2}", self.label(), config.density),
        }
    }
}

/// Knob positions of the four sliders for one cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderPositions {
    density: f64,
    speed: f64,
    drop_length: f64,
    drop_width: f64,
}

impl Default for SliderPositions {
    fn default() -> Self {
        Self {
            density: 0.5,
            speed: 0.5,
            drop_length: 0.5,
            drop_width: 0.5,
        }
    }
}

impl SliderPositions {
    /// Place every knob where `config` sits relative to `defaults`.
    pub fn from_config(config: &RainConfig, defaults: &RainConfig) -> Self {
        let mut positions = Self::default();
        for kind in SliderKind::ALL {
            positions.set(kind, kind.position_of(config, defaults));
        }
        positions
    }

    pub fn get(&self, kind: SliderKind) -> f64 {
        match kind {
            SliderKind::Density => self.density,
            SliderKind::Speed => self.speed,
            SliderKind::DropLength => self.drop_length,
            SliderKind::DropWidth => self.drop_width,
        }
    }

    pub fn set(&mut self, kind: SliderKind, position: f64) {
        let position = position.clamp(0.0, 1.0);
        match kind {
            SliderKind::Density => self.density = position,
            SliderKind::Speed => self.speed = position,
            SliderKind::DropLength => self.drop_length = position,
            SliderKind::DropWidth => self.drop_width = position,
        }
    }
}
