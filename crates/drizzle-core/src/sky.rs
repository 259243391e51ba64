//! The rain scene and its mouse interaction rules.

use rand::Rng;

use crate::cloud::Cloud;
use crate::geometry::{Bounds, Point};
use crate::rain::RainConfig;
use crate::slider::{SliderKind, SliderPositions};

/// Mouse buttons the sky reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Something the caller has to persist after an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkyChange {
    /// A cloud was placed; its settings need loading or creating.
    Created(u64),
    /// A cloud's rain settings changed.
    ConfigChanged(u64),
    /// A cloud was removed; its settings file can go.
    Removed(u64),
}

/// A cloud being moved with the mouse.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    cloud_id: u64,
    /// Cloud top-left minus the grab point.
    offset: Point,
}

/// All clouds plus the selection, drag and slider state.
#[derive(Debug)]
pub struct Sky {
    world: Bounds,
    defaults: RainConfig,
    /// Clouds in draw order; the last one is drawn on top.
    clouds: Vec<Cloud>,
    selected: Option<u64>,
    drag: Option<Drag>,
    active_slider: Option<SliderKind>,
    next_id: u64,
}

impl Sky {
    /// Create an empty sky of the given world size.
    pub fn new(width: f64, height: f64, defaults: RainConfig) -> Self {
        Self {
            world: Bounds::new(0.0, 0.0, width, height),
            defaults,
            clouds: Vec::new(),
            selected: None,
            drag: None,
            active_slider: None,
            next_id: 1,
        }
    }

    pub fn defaults(&self) -> &RainConfig {
        &self.defaults
    }

    pub fn clouds(&self) -> &[Cloud] {
        &self.clouds
    }

    pub fn cloud(&self, id: u64) -> Option<&Cloud> {
        self.clouds.iter().find(|c| c.id == id)
    }

    fn cloud_mut(&mut self, id: u64) -> Option<&mut Cloud> {
        self.clouds.iter_mut().find(|c| c.id == id)
    }

    pub fn selected(&self) -> Option<&Cloud> {
        self.selected.and_then(|id| self.cloud(id))
    }

    pub fn active_slider(&self) -> Option<SliderKind> {
        self.active_slider
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Topmost cloud under `point`.
    fn cloud_at(&self, point: Point) -> Option<&Cloud> {
        self.clouds.iter().rev().find(|c| c.contains(point))
    }

    /// Handle a button press over the sky.
    pub fn press<R: Rng + ?Sized>(
        &mut self,
        button: MouseButton,
        point: Point,
        rng: &mut R,
    ) -> Option<SkyChange> {
        match button {
            MouseButton::Left => {
                if let Some((id, top_left)) = self.cloud_at(point).map(|c| (c.id, c.bounds.top_left())) {
                    self.selected = Some(id);
                    self.drag = Some(Drag {
                        cloud_id: id,
                        offset: Point::new(top_left.x - point.x, top_left.y - point.y),
                    });
                    None
                } else {
                    let id = self.next_id;
                    self.next_id += 1;
                    let mut cloud = Cloud::random_at(id, point, &self.world, self.defaults, rng);
                    cloud.sliders = SliderPositions::from_config(&cloud.config, &self.defaults);
                    self.clouds.push(cloud);
                    self.selected = Some(id);
                    Some(SkyChange::Created(id))
                }
            }
            MouseButton::Right => self.remove_selected(),
            MouseButton::Middle => None,
        }
    }

    /// Handle a button release.
    pub fn release(&mut self, button: MouseButton, point: Point) {
        match button {
            MouseButton::Left => {
                self.drag = None;
                self.active_slider = None;
            }
            MouseButton::Right | MouseButton::Middle => {
                if self.cloud_at(point).is_none() {
                    self.selected = None;
                }
            }
        }
    }

    /// Drop the selection, e.g. after a click outside the sky.
    pub fn deselect(&mut self) {
        self.selected = None;
        self.active_slider = None;
    }

    /// Move the dragged cloud so the grab point follows `point`.
    pub fn drag_to(&mut self, point: Point) {
        let Some(drag) = self.drag else {
            return;
        };
        let world = self.world;
        if let Some(cloud) = self.cloud_mut(drag.cloud_id) {
            let top_left = Point::new(point.x + drag.offset.x, point.y + drag.offset.y);
            cloud.bounds = cloud.bounds.moved_to(top_left).clamped_within(&world);
        }
    }

    pub fn grab_slider(&mut self, kind: SliderKind) {
        self.active_slider = Some(kind);
    }

    pub fn release_slider(&mut self) {
        self.active_slider = None;
    }

    /// Move a slider of the selected cloud and recompute its parameter.
    pub fn set_slider(&mut self, kind: SliderKind, position: f64) -> Option<SkyChange> {
        let id = self.selected?;
        let defaults = self.defaults;
        let cloud = self.cloud_mut(id)?;

        cloud.sliders.set(kind, position);
        let before = cloud.config;
        kind.apply(&mut cloud.config, &defaults, cloud.sliders.get(kind));
        (cloud.config != before).then_some(SkyChange::ConfigChanged(id))
    }

    /// Replace a cloud's settings, e.g. with what was found on disk.
    pub fn set_config(&mut self, id: u64, config: RainConfig) {
        let defaults = self.defaults;
        if let Some(cloud) = self.cloud_mut(id) {
            cloud.config = config;
            cloud.sliders = SliderPositions::from_config(&config, &defaults);
        }
    }

    /// Remove the selected cloud.
    pub fn remove_selected(&mut self) -> Option<SkyChange> {
        let id = self.selected.take()?;
        self.clouds.retain(|c| c.id != id);
        if self.drag.is_some_and(|d| d.cloud_id == id) {
            self.drag = None;
        }
        Some(SkyChange::Removed(id))
    }

    /// Select the cloud after the current one in draw order, wrapping around.
    pub fn select_next(&mut self) {
        if self.clouds.is_empty() {
            self.selected = None;
            return;
        }
        let next = match self
            .selected
            .and_then(|id| self.clouds.iter().position(|c| c.id == id))
        {
            Some(index) => (index + 1) % self.clouds.len(),
            None => 0,
        };
        self.selected = Some(self.clouds[next].id);
    }

    /// Remove every cloud, returning their ids.
    pub fn drain(&mut self) -> Vec<u64> {
        self.selected = None;
        self.drag = None;
        self.active_slider = None;
        self.clouds.drain(..).map(|c| c.id).collect()
    }

    /// Advance the rain by one frame.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let height = self.world.bottom();
        for cloud in &mut self.clouds {
            cloud.generate_raindrops(rng);
            cloud.update(height);
        }
    }
}
