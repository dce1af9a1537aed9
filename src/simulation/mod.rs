//! Built-in predator/prey/grass simulation.
//!
//! A small self-contained engine implementing [`SimulationEngine`] so the
//! viewer has something real to mirror. Creatures wander, graze, hunt,
//! breed and die of age or hunger.
//!
//! [`SimulationEngine`]: crate::engine::SimulationEngine

pub mod creature;
pub mod field;
pub mod settings;

pub use creature::Creature;
pub use field::{Field, GrassPatch};
pub use settings::Settings;
