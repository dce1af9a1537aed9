//! Interface to the simulation engine the view is fed from.
//!
//! The engine owns all ecological state. The view only ever sees it
//! through fresh snapshot values pulled once per frame, never through
//! references into the engine.

use serde::{Deserialize, Serialize};

use crate::core::types::{Role, Sex, SimId};

/// One live creature at the moment of the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreatureSnapshot {
    pub id: SimId,
    pub x: f32,
    pub y: f32,
    pub role: Role,
    pub sex: Sex,
}

/// One grass patch at the moment of the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrassPatchSnapshot {
    pub id: SimId,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Absolute health, only shown as text.
    pub health: f32,
    /// Health relative to the patch maximum. Expected in [0, 1], not guaranteed.
    pub normalized_health: f32,
}

/// Axis-aligned world rectangle in simulation units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl WorldBounds {
    pub fn new(x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> Self {
        Self { x_min, x_max, y_min, y_max }
    }

    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }
}

/// Capabilities the view consumes from a simulation engine.
///
/// Every call is synchronous from the caller's point of view. Bounds may
/// change between frames and must be re-read each time.
pub trait SimulationEngine {
    /// Reinitialise all internal state.
    fn reset_simulation(&mut self);

    /// Advance the simulation by `dt` seconds.
    fn step(&mut self, dt: f32);

    /// Every live creature. May be empty; order carries no meaning.
    fn creature_snapshot(&self) -> Vec<CreatureSnapshot>;

    /// Every live grass patch. May be empty; order carries no meaning.
    fn grass_snapshot(&self) -> Vec<GrassPatchSnapshot>;

    fn world_x_min(&self) -> f32;
    fn world_x_max(&self) -> f32;
    fn world_y_min(&self) -> f32;
    fn world_y_max(&self) -> f32;

    fn world_width(&self) -> f32 {
        self.world_x_max() - self.world_x_min()
    }

    fn world_height(&self) -> f32 {
        self.world_y_max() - self.world_y_min()
    }

    /// All four bounds read together.
    fn world_bounds(&self) -> WorldBounds {
        WorldBounds::new(
            self.world_x_min(),
            self.world_x_max(),
            self.world_y_min(),
            self.world_y_max(),
        )
    }
}
