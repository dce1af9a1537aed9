//! A single prey or predator and its per-frame update.

use rand::Rng;

use super::settings::Settings;
use crate::core::types::{Role, Sex, SimId, Vec2};

#[derive(Debug, Clone)]
pub struct Creature {
    id: SimId,
    role: Role,
    sex: Sex,
    position: Vec2,
    velocity: Vec2,
    acceleration: Vec2,
    alive: bool,
    /// Fullness: 0 = starving
    hunger: f32,
    libido: f32,
    age: f32,
    max_age: f32,
    accel_timer: f32,
    hunger_timer: f32,
}

impl Creature {
    pub fn new<R: Rng>(
        id: SimId,
        settings: &Settings,
        role: Role,
        sex: Sex,
        position: Vec2,
        velocity: Vec2,
        rng: &mut R,
    ) -> Self {
        let (hunger, libido_threshold, base_max_age) = match role {
            Role::Predator => (
                settings.pred_hunger_max,
                settings.pred_libido_threshold,
                settings.pred_max_age,
            ),
            _ => (
                settings.prey_hunger_max,
                settings.prey_libido_threshold,
                settings.prey_max_age,
            ),
        };

        let libido = if libido_threshold > 0.0 {
            rng.gen_range(0.0..libido_threshold)
        } else {
            0.0
        };

        let frac = settings.age_variation_fraction;
        let max_age = if frac > 0.0 {
            base_max_age * rng.gen_range((1.0 - frac)..(1.0 + frac))
        } else {
            base_max_age
        };

        Self {
            id,
            role,
            sex,
            position,
            velocity,
            acceleration: Vec2::ZERO,
            alive: true,
            hunger,
            libido,
            age: 0.0,
            max_age,
            accel_timer: 0.0,
            hunger_timer: 0.0,
        }
    }

    pub fn id(&self) -> SimId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn hunger(&self) -> f32 {
        self.hunger
    }

    pub fn libido(&self) -> f32 {
        self.libido
    }

    pub fn age(&self) -> f32 {
        self.age
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn set_hunger(&mut self, hunger: f32) {
        self.hunger = hunger;
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn hunger_max(&self, settings: &Settings) -> f32 {
        match self.role {
            Role::Predator => settings.pred_hunger_max,
            _ => settings.prey_hunger_max,
        }
    }

    fn libido_max(&self, settings: &Settings) -> f32 {
        match self.role {
            Role::Predator => settings.pred_libido_max,
            _ => settings.prey_libido_max,
        }
    }

    fn starve_rate(&self, settings: &Settings) -> f32 {
        match self.role {
            Role::Predator => settings.pred_starve_rate,
            _ => settings.prey_starve_rate,
        }
    }

    fn libido_rate(&self, settings: &Settings) -> f32 {
        match self.role {
            Role::Predator => settings.pred_libido_rate,
            _ => settings.prey_libido_rate,
        }
    }

    pub fn libido_threshold(&self, settings: &Settings) -> f32 {
        match self.role {
            Role::Predator => settings.pred_libido_threshold,
            _ => settings.prey_libido_threshold,
        }
    }

    /// Advance age, metabolism and motion by `dt` seconds.
    pub fn update<R: Rng>(&mut self, dt: f32, settings: &Settings, rng: &mut R) {
        if !self.alive {
            return;
        }

        self.age += dt;
        if self.age >= self.max_age {
            self.alive = false;
            return;
        }

        self.hunger_timer += dt;
        self.accel_timer += dt;

        if self.hunger_timer >= settings.hunger_tick_seconds {
            self.hunger_timer -= settings.hunger_tick_seconds;

            self.hunger -= self.starve_rate(settings) * settings.hunger_tick_seconds;
            if self.hunger < 0.0 {
                self.hunger = 0.0;
                self.alive = false;
                return;
            }

            self.libido = (self.libido + self.libido_rate(settings) * settings.hunger_tick_seconds)
                .min(self.libido_max(settings));
        }

        self.wander(settings, rng);
        self.integrate(dt);
        self.apply_world_bounds(settings);
    }

    fn wander<R: Rng>(&mut self, settings: &Settings, rng: &mut R) {
        if self.accel_timer < settings.accel_tick {
            return;
        }
        self.accel_timer -= settings.accel_tick;

        if settings.vmax > 0.0 {
            self.acceleration = Vec2::new(
                rng.gen_range(-settings.vmax..settings.vmax),
                rng.gen_range(-settings.vmax..settings.vmax),
            );
        }
        self.velocity = self.velocity.clamp_length(settings.vmax);
    }

    fn integrate(&mut self, dt: f32) {
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Clamp into the world and reflect motion off whichever wall was hit.
    fn apply_world_bounds(&mut self, settings: &Settings) {
        let mut bounce_x = false;
        let mut bounce_y = false;

        if self.position.x < settings.x_min {
            self.position.x = settings.x_min;
            bounce_x = true;
        } else if self.position.x > settings.x_max {
            self.position.x = settings.x_max;
            bounce_x = true;
        }

        if self.position.y < settings.y_min {
            self.position.y = settings.y_min;
            bounce_y = true;
        } else if self.position.y > settings.y_max {
            self.position.y = settings.y_max;
            bounce_y = true;
        }

        if bounce_x {
            self.velocity.x = -self.velocity.x;
            self.acceleration.x = -self.acceleration.x;
        }
        if bounce_y {
            self.velocity.y = -self.velocity.y;
            self.acceleration.y = -self.acceleration.y;
        }
    }

    /// Predator meal: half a tank, capped at the maximum.
    pub fn on_eat(&mut self, settings: &Settings) {
        if self.role != Role::Predator {
            return;
        }
        self.hunger = (self.hunger + settings.pred_hunger_max * 0.5).min(settings.pred_hunger_max);
    }

    pub fn on_mate(&mut self) {
        self.libido = 0.0;
    }

    pub fn add_hunger(&mut self, amount: f32, settings: &Settings) {
        self.hunger = (self.hunger + amount).min(self.hunger_max(settings));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn prey(settings: &Settings, position: Vec2, velocity: Vec2) -> Creature {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        Creature::new(1, settings, Role::Prey, Sex::Female, position, velocity, &mut rng)
    }

    #[test]
    fn test_dies_of_old_age() {
        let settings = Settings {
            age_variation_fraction: 0.0,
            prey_max_age: 1.0,
            ..Settings::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut c = prey(&settings, Vec2::new(500.0, 500.0), Vec2::ZERO);

        c.update(0.6, &settings, &mut rng);
        assert!(c.is_alive());
        c.update(0.6, &settings, &mut rng);
        assert!(!c.is_alive());
    }

    #[test]
    fn test_starves_when_fullness_runs_out() {
        let settings = Settings {
            prey_hunger_max: 0.1,
            prey_starve_rate: 1.0,
            hunger_tick_seconds: 0.5,
            ..Settings::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut c = prey(&settings, Vec2::new(500.0, 500.0), Vec2::ZERO);

        c.update(0.5, &settings, &mut rng);
        assert!(!c.is_alive());
        assert_eq!(c.hunger(), 0.0);
    }

    #[test]
    fn test_bounces_off_world_edge() {
        let settings = Settings {
            vmax: 0.0,
            ..Settings::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut c = prey(&settings, Vec2::new(999.0, 500.0), Vec2::new(100.0, 0.0));

        c.update(0.05, &settings, &mut rng);
        assert_eq!(c.position().x, settings.x_max);
        assert!(c.velocity().x < 0.0);
    }

    #[test]
    fn test_predator_meal_is_capped() {
        let settings = Settings::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut wolf = Creature::new(
            2,
            &settings,
            Role::Predator,
            Sex::Male,
            Vec2::ZERO,
            Vec2::ZERO,
            &mut rng,
        );
        wolf.set_hunger(8.0);
        wolf.on_eat(&settings);
        assert_eq!(wolf.hunger(), settings.pred_hunger_max);
    }
}
