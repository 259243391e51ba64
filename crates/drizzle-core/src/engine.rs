//! Piston engine kinematics.
//!
//! The engine lives in a 1200 x 600 world. Cylinders are spread evenly
//! across the width; each piston rides on a crank of the configured radius
//! with a phase offset of one radian per cylinder.

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Point};

/// Width of the engine world in world units.
pub const WORLD_WIDTH: f64 = 1200.0;

/// Height of the engine world in world units.
pub const WORLD_HEIGHT: f64 = 600.0;

/// Top edge of every cylinder.
const CYLINDER_TOP: f64 = 250.0;

/// Cylinder and piston width.
const CYLINDER_WIDTH: f64 = 40.0;

/// Height of the crankshaft axis the rods and zigzags attach to.
const CRANK_AXIS_Y: f64 = 300.0;

/// Number of zigzag teeth drawn per cylinder.
const ZIGZAG_TEETH: usize = 5;

/// Horizontal distance between zigzag teeth.
const ZIGZAG_STEP: f64 = 8.0;

/// Tooth amplitude of the zigzag.
const ZIGZAG_AMPLITUDE: f64 = 20.0;

/// One adjustable engine parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineControl {
    AngularSpeed,
    Cylinders,
    PistonSize,
    CrankRadius,
}

impl EngineControl {
    /// All controls in panel order.
    pub const ALL: [EngineControl; 4] = [
        EngineControl::AngularSpeed,
        EngineControl::Cylinders,
        EngineControl::PistonSize,
        EngineControl::CrankRadius,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EngineControl::AngularSpeed => "Angular speed",
            EngineControl::Cylinders => "Cylinders",
            EngineControl::PistonSize => "Piston size",
            EngineControl::CrankRadius => "Crank radius",
        }
    }

    /// Inclusive value range.
    pub fn range(self) -> (u32, u32) {
        match self {
            EngineControl::AngularSpeed => (1, 100),
            EngineControl::Cylinders => (1, 10),
            EngineControl::PistonSize => (20, 120),
            EngineControl::CrankRadius => (20, 75),
        }
    }

    /// Next control, wrapping around.
    pub fn next(self) -> Self {
        match self {
            EngineControl::AngularSpeed => EngineControl::Cylinders,
            EngineControl::Cylinders => EngineControl::PistonSize,
            EngineControl::PistonSize => EngineControl::CrankRadius,
            EngineControl::CrankRadius => EngineControl::AngularSpeed,
        }
    }

    /// Previous control, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            EngineControl::AngularSpeed => EngineControl::CrankRadius,
            EngineControl::Cylinders => EngineControl::AngularSpeed,
            EngineControl::PistonSize => EngineControl::Cylinders,
            EngineControl::CrankRadius => EngineControl::PistonSize,
        }
    }

    /// Value closest to `fraction` of the way through the range.
    pub fn value_at(self, fraction: f64) -> u32 {
        let (lo, hi) = self.range();
        let span = (hi - lo) as f64;
        lo + (fraction.clamp(0.0, 1.0) * span).round() as u32
    }

    /// Where `value` sits in the range, from 0 to 1.
    pub fn fraction_of(self, value: u32) -> f64 {
        let (lo, hi) = self.range();
        (value.clamp(lo, hi) - lo) as f64 / (hi - lo) as f64
    }
}

/// Slider-controlled engine parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineParams {
    /// Tenths of a radian per second.
    pub angular_speed: u32,
    pub cylinders: u32,
    pub piston_size: u32,
    pub crank_radius: u32,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            angular_speed: 50,
            cylinders: 4,
            piston_size: 50,
            crank_radius: 50,
        }
    }
}

impl EngineParams {
    pub fn get(&self, control: EngineControl) -> u32 {
        match control {
            EngineControl::AngularSpeed => self.angular_speed,
            EngineControl::Cylinders => self.cylinders,
            EngineControl::PistonSize => self.piston_size,
            EngineControl::CrankRadius => self.crank_radius,
        }
    }

    /// Set a parameter, clamped to its range.
    pub fn set(&mut self, control: EngineControl, value: u32) {
        let (lo, hi) = control.range();
        let value = value.clamp(lo, hi);
        match control {
            EngineControl::AngularSpeed => self.angular_speed = value,
            EngineControl::Cylinders => self.cylinders = value,
            EngineControl::PistonSize => self.piston_size = value,
            EngineControl::CrankRadius => self.crank_radius = value,
        }
    }

    /// Add `delta` to a parameter, clamped to its range.
    pub fn adjust(&mut self, control: EngineControl, delta: i32) {
        let value = self.get(control) as i64 + delta as i64;
        self.set(control, value.max(0) as u32);
    }

    /// Copy with every parameter pulled into its range.
    pub fn clamped(self) -> Self {
        let mut params = self;
        for control in EngineControl::ALL {
            params.set(control, self.get(control));
        }
        params
    }

    /// Angular speed in radians per second.
    pub fn omega(&self) -> f64 {
        self.angular_speed as f64 / 10.0
    }

    /// Cylinder height for the current piston size and crank radius.
    pub fn cylinder_height(&self) -> f64 {
        5.0 + self.piston_size as f64 + self.crank_radius as f64 * 1.5
    }
}

/// Animation clock; only advances while running.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EngineClock {
    running: bool,
    time: f64,
}

impl EngineClock {
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds since the animation was started.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Start from time zero; does nothing when already running.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.time = 0.0;
        }
    }

    /// Stop and rewind.
    pub fn reset(&mut self) {
        self.running = false;
        self.time = 0.0;
    }

    pub fn advance(&mut self, seconds: f64) {
        if self.running {
            self.time += seconds;
        }
    }
}

/// Geometry of one cylinder at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderGeometry {
    pub cylinder: Bounds,
    pub piston: Bounds,
    /// Rod from the piston bottom to the crank axis; absent on the first cylinder.
    pub rod: Option<(Point, Point)>,
    /// Vertical zigzag segments hanging off the crank axis.
    pub zigzag: Vec<(Point, Point)>,
}

/// Compute every cylinder's geometry at `time` seconds.
pub fn layout(params: &EngineParams, time: f64) -> Vec<CylinderGeometry> {
    let params = params.clamped();
    let n = params.cylinders as usize;
    let omega = params.omega();
    let piston_size = params.piston_size as f64;
    let crank_radius = params.crank_radius as f64;
    let cylinder_height = params.cylinder_height();

    (0..n)
        .map(|i| {
            let x_offset = (i + 1) as f64 * (WORLD_WIDTH / (n + 1) as f64);
            let left = x_offset - CYLINDER_WIDTH / 2.0;

            let piston_y = CYLINDER_TOP + cylinder_height
                - crank_radius * (1.0 + (omega * time + i as f64).sin());

            let rod = (i > 0).then(|| {
                (
                    Point::new(left, piston_y + piston_size),
                    Point::new(left, CRANK_AXIS_Y),
                )
            });

            let zigzag = (0..ZIGZAG_TEETH)
                .map(|j| {
                    let x = left + j as f64 * ZIGZAG_STEP;
                    let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
                    (
                        Point::new(x, CRANK_AXIS_Y),
                        Point::new(x, CRANK_AXIS_Y + ZIGZAG_AMPLITUDE * sign),
                    )
                })
                .collect();

            CylinderGeometry {
                cylinder: Bounds::new(left, CYLINDER_TOP, CYLINDER_WIDTH, cylinder_height),
                piston: Bounds::new(left, piston_y, CYLINDER_WIDTH, piston_size),
                rod,
                zigzag,
            }
        })
        .collect()
}
