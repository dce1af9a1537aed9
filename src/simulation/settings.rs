//! Simulation settings shared by the field and every creature.
//!
//! Rates are per simulated second unless noted otherwise. Hunger is a
//! "fullness" value: the maximum means sated, zero means starved.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, VolterriaError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === WORLD ===
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,

    // === POPULATION ===
    /// Prey spawned on reset
    pub numprey: usize,
    /// Predators spawned on reset
    pub numpred: usize,
    pub probability_female_prey: f64,
    pub probability_female_pred: f64,

    // === MOTION ===
    /// Soft speed cap (units / second); also the range of random acceleration
    pub vmax: f32,
    /// How often a creature re-rolls its acceleration (seconds)
    ///
    /// Keeps motion from changing direction every frame.
    pub accel_tick: f32,

    // === HUNGER & LIBIDO ===
    /// Predators eat on contact while fullness is at or below this
    pub pred_hunger_threshold: f32,
    /// Prey graze while fullness is below this
    pub prey_hunger_threshold: f32,
    /// Libido both partners need before mating
    pub pred_libido_threshold: f32,
    pub prey_libido_threshold: f32,
    pub pred_hunger_max: f32,
    pub prey_hunger_max: f32,
    pub pred_libido_max: f32,
    pub prey_libido_max: f32,
    /// Interval between hunger/libido updates (seconds)
    pub hunger_tick_seconds: f32,
    pub prey_libido_rate: f32,
    pub pred_libido_rate: f32,
    pub prey_starve_rate: f32,
    pub pred_starve_rate: f32,

    /// Distance within which creatures eat or mate (world units)
    pub interaction_radius: f32,

    // === AGING ===
    /// Base lifespan of prey (simulated seconds)
    pub prey_max_age: f32,
    pub pred_max_age: f32,
    /// Lifespans are jittered by ± this fraction
    pub age_variation_fraction: f32,

    // === GRASS ===
    pub grass_patch_rows: u32,
    pub grass_patch_cols: u32,
    pub grass_max_health: f32,
    /// Health regained per second
    pub grass_regrow_rate: f32,
    /// Patch radius as a fraction of the smaller cell dimension
    pub grass_radius_frac: f32,
    /// Health a patch can lose to grazing per second
    pub grass_eat_rate: f32,
    /// Fullness a prey gains per bite
    pub grass_bite_nourishment: f32,

    /// Fixed RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            x_min: 0.0,
            x_max: 1000.0,
            y_min: 0.0,
            y_max: 1000.0,

            numprey: 40,
            numpred: 8,
            probability_female_prey: 0.5,
            probability_female_pred: 0.5,

            vmax: 40.0,
            accel_tick: 0.125,

            pred_hunger_threshold: 8.0,
            prey_hunger_threshold: 5.0,
            pred_libido_threshold: 3.0,
            prey_libido_threshold: 3.0,
            pred_hunger_max: 10.0,
            prey_hunger_max: 10.0,
            pred_libido_max: 10.0,
            prey_libido_max: 10.0,
            hunger_tick_seconds: 0.5,
            prey_libido_rate: 0.5,
            pred_libido_rate: 0.2,
            prey_starve_rate: 0.1,
            pred_starve_rate: 0.25,

            interaction_radius: 10.0,

            prey_max_age: 22.0,
            pred_max_age: 66.0,
            age_variation_fraction: 0.25,

            grass_patch_rows: 3,
            grass_patch_cols: 3,
            grass_max_health: 7.0,
            grass_regrow_rate: 0.2,
            grass_radius_frac: 0.5,
            grass_eat_rate: 0.3,
            grass_bite_nourishment: 0.1,

            seed: None,
        }
    }
}

impl Settings {
    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.x_max < self.x_min || self.y_max < self.y_min {
            return Err(VolterriaError::InvalidConfig(format!(
                "world bounds are inverted: x {}..{}, y {}..{}",
                self.x_min, self.x_max, self.y_min, self.y_max
            )));
        }

        for (name, p) in [
            ("probability_female_prey", self.probability_female_prey),
            ("probability_female_pred", self.probability_female_pred),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(VolterriaError::InvalidConfig(format!(
                    "{} ({}) must lie in [0, 1]",
                    name, p
                )));
            }
        }

        if self.accel_tick <= 0.0 || self.hunger_tick_seconds <= 0.0 {
            return Err(VolterriaError::InvalidConfig(
                "accel_tick and hunger_tick_seconds must be positive".into(),
            ));
        }

        if self.grass_max_health <= 0.0 {
            return Err(VolterriaError::InvalidConfig(format!(
                "grass_max_health ({}) must be positive",
                self.grass_max_health
            )));
        }

        if !(0.0..1.0).contains(&self.age_variation_fraction) {
            return Err(VolterriaError::InvalidConfig(format!(
                "age_variation_fraction ({}) must lie in [0, 1)",
                self.age_variation_fraction
            )));
        }

        Ok(())
    }
}
