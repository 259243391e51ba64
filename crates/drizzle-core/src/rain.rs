//! Rain parameters and falling drops.

use serde::{Deserialize, Serialize};

/// An inclusive `(min, max)` range, stored on disk as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Midpoint of the range.
    pub fn mid(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Ordered, non-negative copy of the range.
    fn normalized(self) -> Self {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        Self::new(lo.max(0.0), hi.max(0.0))
    }

    /// Integer bounds used for drop sizes: both ends truncated.
    pub fn whole(&self) -> (u32, u32) {
        let lo = self.min.max(0.0) as u32;
        let hi = self.max.max(0.0) as u32;
        (lo, hi.max(lo))
    }
}

impl From<[f64; 2]> for ParamRange {
    fn from([min, max]: [f64; 2]) -> Self {
        Self::new(min, max)
    }
}

impl From<ParamRange> for [f64; 2] {
    fn from(range: ParamRange) -> Self {
        [range.min, range.max]
    }
}

/// Highest density accepted from a settings file.
pub const MAX_DENSITY: f64 = 1000.0;

/// Rain settings of one cloud.
///
/// Serialized as a flat object with the keys `density`, `speed`,
/// `drop_length` and `drop_width`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    /// Upper bound of drops spawned per frame.
    pub density: f64,
    /// Fall speed in world units per frame.
    pub speed: ParamRange,
    /// Drop length in world units.
    pub drop_length: ParamRange,
    /// Drop width in world units.
    pub drop_width: ParamRange,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            density: 5.0,
            speed: ParamRange::new(4.0, 10.0),
            drop_length: ParamRange::new(6.0, 12.0),
            drop_width: ParamRange::new(1.0, 2.0),
        }
    }
}

impl RainConfig {
    /// Repair values read from an untrusted source: ranges are ordered,
    /// nothing is negative and density is capped at [`MAX_DENSITY`].
    pub fn normalized(self) -> Self {
        Self {
            density: self.density.clamp(0.0, MAX_DENSITY),
            speed: self.speed.normalized(),
            drop_length: self.drop_length.normalized(),
            drop_width: self.drop_width.normalized(),
        }
    }
}

/// A single falling drop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Raindrop {
    pub x: f64,
    pub y: f64,
    pub length: f64,
    pub width: f64,
    pub speed: f64,
}

impl Raindrop {
    /// Advance one frame.
    pub fn fall(&mut self) {
        self.y += self.speed;
    }

    /// True once the drop's top edge has passed `height`.
    pub fn is_below(&self, height: f64) -> bool {
        self.y > height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_midpoints() {
        let config = RainConfig::default();
        assert_eq!(config.speed.mid(), 7.0);
        assert_eq!(config.drop_length.mid(), 9.0);
        assert_eq!(config.drop_width.mid(), 1.5);
    }

    #[test]
    fn test_normalized_orders_and_clamps() {
        let config = RainConfig {
            density: -2.0,
            speed: ParamRange::new(9.0, 3.0),
            drop_length: ParamRange::new(-4.0, 5.0),
            drop_width: ParamRange::new(1.0, 2.0),
        }
        .normalized();

        assert_eq!(config.density, 0.0);
        assert_eq!(config.speed, ParamRange::new(3.0, 9.0));
        assert_eq!(config.drop_length, ParamRange::new(0.0, 5.0));
        assert_eq!(config.drop_width, ParamRange::new(1.0, 2.0));
    }

    #[test]
    fn test_normalized_caps_density() {
        let config = RainConfig {
            density: 4.0e9,
            ..RainConfig::default()
        }
        .normalized();
        assert_eq!(config.density, MAX_DENSITY);
    }

    #[test]
    fn test_whole_truncates() {
        assert_eq!(ParamRange::new(5.5, 8.9).whole(), (5, 8));
        assert_eq!(ParamRange::new(1.0, 1.25).whole(), (1, 1));
    }

    #[test]
    fn test_raindrop_falls_and_leaves() {
        let mut drop = Raindrop {
            x: 10.0,
            y: 795.0,
            length: 6.0,
            width: 1.0,
            speed: 4.0,
        };
        drop.fall();
        assert_eq!(drop.y, 799.0);
        assert!(!drop.is_below(800.0));
        drop.fall();
        assert!(drop.is_below(800.0));
    }
}
