//! Clouds and the rain they produce.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::geometry::{Bounds, Point};
use crate::rain::{RainConfig, Raindrop};
use crate::slider::SliderPositions;

/// Cloud width range for newly placed clouds.
const CLOUD_WIDTH: (u32, u32) = (80, 120);

/// Cloud height range for newly placed clouds.
const CLOUD_HEIGHT: (u32, u32) = (20, 50);

/// Outline of a cloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudShape {
    Rectangle,
    Oval,
    /// Apex at the top centre, base along the bottom edge.
    Triangle,
}

impl CloudShape {
    pub const ALL: [CloudShape; 3] = [
        CloudShape::Rectangle,
        CloudShape::Oval,
        CloudShape::Triangle,
    ];
}

/// A cloud with its own rain settings and drops.
#[derive(Debug, Clone)]
pub struct Cloud {
    /// Identifier, also used to name the cloud's settings file.
    pub id: u64,
    pub bounds: Bounds,
    pub shape: CloudShape,
    pub config: RainConfig,
    /// Knob positions shown while this cloud is selected.
    pub sliders: SliderPositions,
    pub drops: Vec<Raindrop>,
}

impl Cloud {
    pub fn new(id: u64, bounds: Bounds, shape: CloudShape, config: RainConfig) -> Self {
        Self {
            id,
            bounds,
            shape,
            config,
            sliders: SliderPositions::default(),
            drops: Vec::new(),
        }
    }

    /// Create a cloud of random size and shape with its top-left at `at`,
    /// kept inside `world`.
    pub fn random_at<R: Rng + ?Sized>(
        id: u64,
        at: Point,
        world: &Bounds,
        config: RainConfig,
        rng: &mut R,
    ) -> Self {
        let width = rng.gen_range(CLOUD_WIDTH.0..=CLOUD_WIDTH.1) as f64;
        let height = rng.gen_range(CLOUD_HEIGHT.0..=CLOUD_HEIGHT.1) as f64;
        let shape = *CloudShape::ALL
            .choose(rng)
            .unwrap_or(&CloudShape::Rectangle);
        let bounds = Bounds::new(at.x, at.y, width, height).clamped_within(world);
        Self::new(id, bounds, shape, config)
    }

    /// Spawn this frame's drops along the bottom edge.
    pub fn generate_raindrops<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let density = self.config.density.max(0.0) as u32;
        if density == 0 {
            return;
        }

        let (len_lo, len_hi) = self.config.drop_length.whole();
        let (width_lo, width_hi) = self.config.drop_width.whole();
        let speed = self.config.speed;
        let left = self.bounds.left().floor() as i64;
        let right = (self.bounds.right().floor() as i64).max(left);

        let count = rng.gen_range(1..=density);
        self.drops.reserve(count as usize);
        for _ in 0..count {
            self.drops.push(Raindrop {
                x: rng.gen_range(left..=right) as f64,
                y: self.bounds.bottom(),
                length: rng.gen_range(len_lo..=len_hi) as f64,
                width: rng.gen_range(width_lo..=width_hi) as f64,
                speed: rng.gen_range(speed.min..=speed.max.max(speed.min)),
            });
        }
    }

    /// Move every drop one frame and forget the ones below `world_height`.
    pub fn update(&mut self, world_height: f64) {
        for drop in &mut self.drops {
            drop.fall();
        }
        self.drops.retain(|drop| !drop.is_below(world_height));
    }

    /// Check whether `point` is over the cloud's bounding box.
    pub fn contains(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::rain::ParamRange;

    fn world() -> Bounds {
        Bounds::new(0.0, 0.0, 1000.0, 800.0)
    }

    #[test]
    fn test_random_at_sizes_and_position() {
        let mut rng = StdRng::seed_from_u64(7);
        for id in 0..50 {
            let cloud = Cloud::random_at(
                id,
                Point::new(200.0, 150.0),
                &world(),
                RainConfig::default(),
                &mut rng,
            );
            assert!((80.0..=120.0).contains(&cloud.bounds.width));
            assert!((20.0..=50.0).contains(&cloud.bounds.height));
            assert_eq!(cloud.bounds.top_left(), Point::new(200.0, 150.0));
        }
    }

    #[test]
    fn test_random_at_stays_in_world() {
        let mut rng = StdRng::seed_from_u64(11);
        let cloud = Cloud::random_at(
            1,
            Point::new(995.0, 799.0),
            &world(),
            RainConfig::default(),
            &mut rng,
        );
        assert!(cloud.bounds.right() <= 1000.0);
        assert!(cloud.bounds.bottom() <= 800.0);
    }

    #[test]
    fn test_generated_drops_respect_config() {
        let mut rng = StdRng::seed_from_u64(3);
        let bounds = Bounds::new(100.0, 50.0, 90.0, 30.0);
        let mut cloud = Cloud::new(1, bounds, CloudShape::Oval, RainConfig::default());

        for _ in 0..100 {
            cloud.generate_raindrops(&mut rng);
        }
        assert!(!cloud.drops.is_empty());
        assert!(cloud.drops.len() <= 500);

        for drop in &cloud.drops {
            assert!(drop.x >= 100.0 && drop.x <= 190.0);
            assert_eq!(drop.y, 80.0);
            assert!((6.0..=12.0).contains(&drop.length));
            assert!((1.0..=2.0).contains(&drop.width));
            assert!((4.0..=10.0).contains(&drop.speed));
        }
    }

    #[test]
    fn test_zero_density_spawns_nothing() {
        let mut rng = StdRng::seed_from_u64(5);
        let config = RainConfig {
            density: 0.4,
            ..RainConfig::default()
        };
        let mut cloud = Cloud::new(1, Bounds::new(0.0, 0.0, 80.0, 20.0), CloudShape::Rectangle, config);
        cloud.generate_raindrops(&mut rng);
        assert!(cloud.drops.is_empty());
    }

    #[test]
    fn test_degenerate_ranges_do_not_panic() {
        let mut rng = StdRng::seed_from_u64(9);
        let config = RainConfig {
            density: 1.0,
            speed: ParamRange::new(3.0, 3.0),
            drop_length: ParamRange::new(4.5, 4.9),
            drop_width: ParamRange::new(1.0, 1.0),
        };
        let mut cloud = Cloud::new(1, Bounds::new(0.0, 0.0, 80.0, 20.0), CloudShape::Triangle, config);
        cloud.generate_raindrops(&mut rng);
        assert_eq!(cloud.drops.len(), 1);
        assert_eq!(cloud.drops[0].speed, 3.0);
        assert_eq!(cloud.drops[0].length, 4.0);
    }

    #[test]
    fn test_update_discards_fallen_drops() {
        let mut cloud = Cloud::new(
            1,
            Bounds::new(0.0, 0.0, 80.0, 20.0),
            CloudShape::Rectangle,
            RainConfig::default(),
        );
        cloud.drops.push(Raindrop {
            x: 5.0,
            y: 790.0,
            length: 6.0,
            width: 1.0,
            speed: 20.0,
        });
        cloud.drops.push(Raindrop {
            x: 6.0,
            y: 100.0,
            length: 6.0,
            width: 1.0,
            speed: 5.0,
        });
        cloud.update(800.0);
        assert_eq!(cloud.drops.len(), 1);
        assert_eq!(cloud.drops[0].y, 105.0);
    }
}
