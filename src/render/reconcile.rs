//! Per-frame reconciliation of entity pools against fresh snapshots.
//!
//! For each kind: mark every id in the snapshot as seen, create a visual
//! for ids the pool has never held, update every seen visual in place,
//! then release whatever the pool holds that was not seen. After a pass
//! the pool's id set equals the snapshot's id set exactly.

use ahash::AHashSet;

use super::colors::{creature_appearance, grass_color, grass_label, Color, LABEL_COLOR};
use super::host::{LabelAlign, NodeKind, RenderHost};
use super::mapper::CoordinateMapper;
use super::metrics::{CreatureSyncStats, KindStats};
use super::pool::{CreatureVisual, EntityPool, GrassVisual};
use crate::core::config::ViewConfig;
use crate::core::types::{Role, SimId};
use crate::engine::{CreatureSnapshot, GrassPatchSnapshot};

/// The three pools a view keeps alive between frames.
#[derive(Debug, Default)]
pub struct VisualPools {
    pub prey: EntityPool<CreatureVisual>,
    pub predators: EntityPool<CreatureVisual>,
    pub grass: EntityPool<GrassVisual>,
}

impl VisualPools {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total visuals across all kinds.
    pub fn len(&self) -> usize {
        self.prey.len() + self.predators.len() + self.grass.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Release every pooled visual back to the host.
    pub fn clear<H: RenderHost + ?Sized>(&mut self, host: &mut H) -> usize {
        self.grass.clear(host) + self.prey.clear(host) + self.predators.clear(host)
    }
}

/// Drives the pools from snapshots. Holds only scratch sets reused
/// between frames.
#[derive(Debug, Default)]
pub struct Reconciler {
    seen_prey: AHashSet<SimId>,
    seen_predators: AHashSet<SimId>,
    seen_grass: AHashSet<SimId>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror `patches` into the grass pool.
    pub fn sync_grass<H: RenderHost + ?Sized>(
        &mut self,
        pool: &mut EntityPool<GrassVisual>,
        patches: &[GrassPatchSnapshot],
        mapper: &CoordinateMapper,
        config: &ViewConfig,
        host: &mut H,
    ) -> KindStats {
        let mut stats = KindStats::default();
        self.seen_grass.clear();

        for patch in patches {
            self.seen_grass.insert(patch.id);

            let (visual, created) =
                pool.get_or_create(patch.id, || create_grass_visual(patch.id, config, host));
            let visual = *visual;
            if created {
                stats.created += 1;
                tracing::trace!(id = patch.id, "grass patch visual created");
            }

            let pos = mapper.world_to_screen(patch.x, patch.y);
            host.set_position(visual.shape, pos);
            host.set_circle_radius(visual.shape, mapper.scale_length(patch.radius));
            host.set_fill(visual.shape, grass_color(patch.normalized_health));
            host.set_position(visual.label, pos);
            host.set_text(visual.label, &grass_label(patch.health));
            stats.updated += 1;
        }

        stats.destroyed = pool.prune(&self.seen_grass, host);
        stats
    }

    /// Mirror `creatures` into the prey and predator pools.
    ///
    /// Records with a role the view does not know are skipped and produce
    /// no visual.
    pub fn sync_creatures<H: RenderHost + ?Sized>(
        &mut self,
        prey: &mut EntityPool<CreatureVisual>,
        predators: &mut EntityPool<CreatureVisual>,
        creatures: &[CreatureSnapshot],
        mapper: &CoordinateMapper,
        config: &ViewConfig,
        host: &mut H,
    ) -> CreatureSyncStats {
        let mut stats = CreatureSyncStats::default();
        self.seen_prey.clear();
        self.seen_predators.clear();

        for creature in creatures {
            let (pool, seen, kind_stats) = match creature.role {
                Role::Prey => (&mut *prey, &mut self.seen_prey, &mut stats.prey),
                Role::Predator => (
                    &mut *predators,
                    &mut self.seen_predators,
                    &mut stats.predators,
                ),
                Role::Unknown(raw) => {
                    tracing::trace!(id = creature.id, raw, "skipping creature with unknown role");
                    stats.skipped += 1;
                    continue;
                }
            };
            seen.insert(creature.id);

            let (visual, created) = pool.get_or_create(creature.id, || {
                create_creature_visual(creature, config, host)
            });
            let visual = *visual;
            if created {
                kind_stats.created += 1;
                tracing::trace!(id = creature.id, role = ?creature.role, "creature visual created");
            }

            host.set_position(visual.node, mapper.world_to_screen(creature.x, creature.y));
            kind_stats.updated += 1;
        }

        stats.prey.destroyed = prey.prune(&self.seen_prey, host);
        stats.predators.destroyed = predators.prune(&self.seen_predators, host);

        if stats.skipped > 0 {
            tracing::debug!(skipped = stats.skipped, "creatures with unknown role not drawn");
        }
        stats
    }
}

fn create_grass_visual<H: RenderHost + ?Sized>(
    id: SimId,
    config: &ViewConfig,
    host: &mut H,
) -> GrassVisual {
    let shape = host.attach(NodeKind::Circle);
    host.set_stroke(shape, Color::CLEAR);

    let label = host.attach(NodeKind::Label {
        font_size: config.grass_label_font_size,
        align: LabelAlign::Center,
    });
    host.set_fill(label, LABEL_COLOR);
    host.set_text(label, &id.to_string());

    GrassVisual { shape, label }
}

/// Attach a creature circle. Appearance is fixed here and never revisited.
fn create_creature_visual<H: RenderHost + ?Sized>(
    creature: &CreatureSnapshot,
    config: &ViewConfig,
    host: &mut H,
) -> CreatureVisual {
    let node = host.attach(NodeKind::Circle);
    if let Some(look) = creature_appearance(creature.role, creature.sex, config) {
        host.set_fill(node, look.fill);
        host.set_stroke(node, look.stroke);
        host.set_circle_radius(node, look.radius);
    }
    CreatureVisual { node }
}
