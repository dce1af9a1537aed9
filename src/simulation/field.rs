//! The field: owns creatures and grass patches and applies the
//! interaction rules (grazing, predation, mating).

use rand::distributions::{Bernoulli, Distribution};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::creature::Creature;
use super::settings::Settings;
use crate::core::types::{Role, Sex, SimId, Vec2};
use crate::engine::{CreatureSnapshot, GrassPatchSnapshot, SimulationEngine};

#[derive(Debug, Clone)]
pub struct GrassPatch {
    pub id: SimId,
    pub center: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
}

impl GrassPatch {
    /// Regrow toward the maximum.
    pub fn update(&mut self, dt: f32, regrow_rate: f32) {
        self.health = (self.health + regrow_rate * dt).clamp(0.0, self.max_health);
    }

    pub fn health_normalized(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        self.center.distance_squared(&p) <= self.radius * self.radius
    }
}

/// Built-in simulation engine.
pub struct Field {
    settings: Settings,
    creatures: Vec<Creature>,
    grass: Vec<GrassPatch>,
    rng: ChaCha8Rng,
    next_id: SimId,
}

impl Field {
    /// Create a populated field.
    pub fn new(settings: Settings) -> Self {
        let rng = match settings.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let mut field = Self {
            settings,
            creatures: Vec::new(),
            grass: Vec::new(),
            rng,
            next_id: 0,
        };
        field.initialize_creatures();
        field.initialize_grass();
        field
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn grass_patches(&self) -> &[GrassPatch] {
        &self.grass
    }

    pub fn creatures_mut(&mut self) -> &mut [Creature] {
        &mut self.creatures
    }

    pub fn set_default_population(&mut self, prey: usize, predators: usize) {
        self.settings.numprey = prey;
        self.settings.numpred = predators;
    }

    pub fn set_world_dimensions(&mut self, width: f32, height: f32) {
        self.settings.x_max = self.settings.x_min + width;
        self.settings.y_max = self.settings.y_min + height;
    }

    pub fn set_field_width(&mut self, width: f32) {
        self.settings.x_max = self.settings.x_min + width;
    }

    pub fn set_field_height(&mut self, height: f32) {
        self.settings.y_max = self.settings.y_min + height;
    }

    /// Next creature id. Ids only wrap after `i32::MAX` births, far beyond
    /// any live population, so no two live creatures share one.
    fn issue_id(&mut self) -> SimId {
        let id = self.next_id;
        self.next_id = self.next_id.checked_add(1).unwrap_or(0);
        id
    }

    fn random_position(&mut self) -> Vec2 {
        let s = &self.settings;
        let (x_min, x_max, y_min, y_max) = (s.x_min, s.x_max, s.y_min, s.y_max);
        Vec2::new(
            sample_between(&mut self.rng, x_min, x_max),
            sample_between(&mut self.rng, y_min, y_max),
        )
    }

    fn random_velocity(&mut self) -> Vec2 {
        let vmax = self.settings.vmax;
        Vec2::new(
            sample_between(&mut self.rng, -vmax, vmax),
            sample_between(&mut self.rng, -vmax, vmax),
        )
    }

    fn random_sex(&mut self, role: Role) -> Sex {
        let p = match role {
            Role::Predator => self.settings.probability_female_pred,
            _ => self.settings.probability_female_prey,
        };
        let female = Bernoulli::new(p.clamp(0.0, 1.0))
            .map(|d| d.sample(&mut self.rng))
            .unwrap_or(false);
        if female {
            Sex::Female
        } else {
            Sex::Male
        }
    }

    fn spawn(&mut self, role: Role, position: Vec2) -> Creature {
        let id = self.issue_id();
        let velocity = self.random_velocity();
        let sex = self.random_sex(role);
        let creature = Creature::new(
            id,
            &self.settings,
            role,
            sex,
            position,
            velocity,
            &mut self.rng,
        );
        tracing::trace!(id, ?role, ?sex, "creature spawned");
        creature
    }

    fn initialize_creatures(&mut self) {
        self.creatures.clear();
        let (numprey, numpred) = (self.settings.numprey, self.settings.numpred);
        self.creatures.reserve((numprey + numpred) * 4);

        for _ in 0..numprey {
            let pos = self.random_position();
            let c = self.spawn(Role::Prey, pos);
            self.creatures.push(c);
        }
        for _ in 0..numpred {
            let pos = self.random_position();
            let c = self.spawn(Role::Predator, pos);
            self.creatures.push(c);
        }
    }

    /// Lay patches out on a rows x cols grid, one centred in each cell.
    fn initialize_grass(&mut self) {
        self.grass.clear();
        let s = &self.settings;
        let rows = s.grass_patch_rows;
        let cols = s.grass_patch_cols;
        if rows == 0 || cols == 0 {
            return;
        }

        let cell_w = s.width() / cols as f32;
        let cell_h = s.height() / rows as f32;
        let radius = s.grass_radius_frac * cell_w.min(cell_h);

        let mut id: SimId = 0;
        for ry in 0..rows {
            for cx in 0..cols {
                self.grass.push(GrassPatch {
                    id,
                    center: Vec2::new(
                        s.x_min + (cx as f32 + 0.5) * cell_w,
                        s.y_min + (ry as f32 + 0.5) * cell_h,
                    ),
                    radius,
                    health: s.grass_max_health,
                    max_health: s.grass_max_health,
                });
                id += 1;
            }
        }
    }

    fn handle_grass(&mut self, dt: f32) {
        let settings = &self.settings;
        for patch in &mut self.grass {
            patch.update(dt, settings.grass_regrow_rate);
        }

        let eat_capacity = settings.grass_eat_rate * dt;
        for patch in &mut self.grass {
            if patch.health <= 0.0 {
                continue;
            }
            let mut remaining = eat_capacity;
            for c in self.creatures.iter_mut() {
                if remaining <= 0.0 {
                    break;
                }
                if !c.is_alive()
                    || c.role() != Role::Prey
                    || c.hunger() >= settings.prey_hunger_threshold
                    || !patch.contains(c.position())
                {
                    continue;
                }
                let bite = eat_capacity.min(remaining);
                patch.health = (patch.health - bite).max(0.0);
                remaining = (remaining - bite).max(0.0);
                c.add_hunger(settings.grass_bite_nourishment, settings);
            }
        }
    }

    fn handle_interactions(&mut self) {
        let radius2 = self.settings.interaction_radius * self.settings.interaction_radius;
        let mut births: Vec<(Role, Vec2, f32)> = Vec::new();

        let n = self.creatures.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (head, tail) = self.creatures.split_at_mut(j);
                let a = &mut head[i];
                let b = &mut tail[0];
                if !a.is_alive() || !b.is_alive() {
                    continue;
                }
                if a.position().distance_squared(&b.position()) > radius2 {
                    continue;
                }

                if a.role() != b.role() {
                    let (predator, prey) = match (a.role(), b.role()) {
                        (Role::Predator, Role::Prey) => (a, b),
                        (Role::Prey, Role::Predator) => (b, a),
                        _ => continue,
                    };
                    if predator.hunger() <= self.settings.pred_hunger_threshold {
                        predator.on_eat(&self.settings);
                        prey.kill();
                    }
                } else if a.sex() != b.sex() {
                    let threshold = a.libido_threshold(&self.settings);
                    if a.libido() >= threshold && b.libido() >= threshold {
                        births.push((
                            a.role(),
                            a.position().midpoint(&b.position()),
                            0.5 * (a.hunger() + b.hunger()),
                        ));
                        a.on_mate();
                        b.on_mate();
                    }
                }
            }
        }

        for (role, position, hunger) in births {
            let mut child = self.spawn(role, position);
            child.set_hunger(hunger);
            self.creatures.push(child);
        }
    }
}

impl SimulationEngine for Field {
    fn reset_simulation(&mut self) {
        tracing::info!(
            prey = self.settings.numprey,
            predators = self.settings.numpred,
            "Resetting simulation"
        );
        self.initialize_creatures();
        self.initialize_grass();
    }

    fn step(&mut self, dt: f32) {
        for c in self.creatures.iter_mut() {
            c.update(dt, &self.settings, &mut self.rng);
        }
        self.handle_grass(dt);
        self.handle_interactions();
        self.creatures.retain(|c| c.is_alive());
    }

    fn creature_snapshot(&self) -> Vec<CreatureSnapshot> {
        self.creatures
            .iter()
            .filter(|c| c.is_alive())
            .map(|c| CreatureSnapshot {
                id: c.id(),
                x: c.position().x,
                y: c.position().y,
                role: c.role(),
                sex: c.sex(),
            })
            .collect()
    }

    fn grass_snapshot(&self) -> Vec<GrassPatchSnapshot> {
        self.grass
            .iter()
            .map(|g| GrassPatchSnapshot {
                id: g.id,
                x: g.center.x,
                y: g.center.y,
                radius: g.radius,
                health: g.health,
                normalized_health: g.health_normalized(),
            })
            .collect()
    }

    fn world_x_min(&self) -> f32 {
        self.settings.x_min
    }

    fn world_x_max(&self) -> f32 {
        self.settings.x_max
    }

    fn world_y_min(&self) -> f32 {
        self.settings.y_min
    }

    fn world_y_max(&self) -> f32 {
        self.settings.y_max
    }
}

/// Uniform sample in `[lo, hi)`, or `lo` for an empty range.
fn sample_between<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(settings: Settings) -> Field {
        Field::new(Settings {
            seed: Some(42),
            ..settings
        })
    }

    #[test]
    fn test_initial_population() {
        let field = seeded(Settings {
            numprey: 5,
            numpred: 2,
            ..Settings::default()
        });
        let snap = field.creature_snapshot();
        assert_eq!(snap.iter().filter(|c| c.role == Role::Prey).count(), 5);
        assert_eq!(snap.iter().filter(|c| c.role == Role::Predator).count(), 2);
    }

    #[test]
    fn test_creature_ids_unique() {
        let mut field = seeded(Settings::default());
        for _ in 0..120 {
            field.step(1.0 / 60.0);
        }
        let mut ids: Vec<SimId> = field.creature_snapshot().iter().map(|c| c.id).collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn test_grass_grid_layout() {
        let field = seeded(Settings {
            grass_patch_rows: 2,
            grass_patch_cols: 4,
            ..Settings::default()
        });
        let grass = field.grass_snapshot();
        assert_eq!(grass.len(), 8);
        // 1000 / 4 = 250 wide cells, 1000 / 2 = 500 tall cells
        assert_eq!(grass[0].x, 125.0);
        assert_eq!(grass[0].y, 250.0);
        assert_eq!(grass[0].radius, 125.0);
        assert!(grass.iter().all(|g| g.normalized_health == 1.0));
    }

    #[test]
    fn test_predator_eats_adjacent_prey() {
        let mut field = seeded(Settings {
            numprey: 1,
            numpred: 1,
            vmax: 0.0,
            pred_hunger_max: 10.0,
            pred_hunger_threshold: 10.0,
            grass_patch_rows: 0,
            ..Settings::default()
        });
        for c in field.creatures_mut() {
            c.set_position(Vec2::new(500.0, 500.0));
        }

        field.step(0.01);

        let snap = field.creature_snapshot();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].role, Role::Predator);
    }

    #[test]
    fn test_world_resize_is_visible_through_bounds() {
        let mut field = seeded(Settings::default());
        field.set_world_dimensions(200.0, 50.0);
        assert_eq!(field.world_width(), 200.0);
        assert_eq!(field.world_height(), 50.0);
    }

    #[test]
    fn test_reset_restores_population() {
        let mut field = seeded(Settings {
            numprey: 3,
            numpred: 0,
            ..Settings::default()
        });
        for c in field.creatures_mut() {
            c.kill();
        }
        field.step(0.01);
        assert!(field.creature_snapshot().is_empty());

        field.reset_simulation();
        assert_eq!(field.creature_snapshot().len(), 3);
    }
}
