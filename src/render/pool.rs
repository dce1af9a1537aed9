//! Id-keyed pools of visual handles.
//!
//! One pool per entity kind. A pool exclusively owns the handles in it:
//! a handle leaves the pool only by being released back to the host.

use std::collections::hash_map::Entry;

use ahash::{AHashMap, AHashSet};

use super::host::{NodeId, RenderHost};
use crate::core::types::SimId;

/// Something a pool can hand back to the host when its entity goes away.
pub trait PooledVisual {
    /// Detach every node this visual owns.
    fn release<H: RenderHost + ?Sized>(self, host: &mut H);
}

/// A creature is drawn as a single circle node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatureVisual {
    pub node: NodeId,
}

impl PooledVisual for CreatureVisual {
    fn release<H: RenderHost + ?Sized>(self, host: &mut H) {
        host.detach(self.node);
    }
}

/// A grass patch is a circle plus a health label sharing one lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrassVisual {
    pub shape: NodeId,
    pub label: NodeId,
}

impl PooledVisual for GrassVisual {
    fn release<H: RenderHost + ?Sized>(self, host: &mut H) {
        host.detach(self.shape);
        host.detach(self.label);
    }
}

/// Map from simulation id to the visual standing for it.
#[derive(Debug)]
pub struct EntityPool<V> {
    entries: AHashMap<SimId, V>,
}

impl<V> Default for EntityPool<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> EntityPool<V> {
    pub fn new() -> Self {
        Self {
            entries: AHashMap::new(),
        }
    }

    pub fn get(&self, id: SimId) -> Option<&V> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: SimId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = SimId> + '_ {
        self.entries.keys().copied()
    }

    /// Ids in ascending order.
    pub fn sorted_ids(&self) -> Vec<SimId> {
        let mut ids: Vec<SimId> = self.ids().collect();
        ids.sort_unstable();
        ids
    }

    /// The visual for `id`, creating it on a miss.
    ///
    /// The flag is true when `create` ran.
    pub fn get_or_create(&mut self, id: SimId, create: impl FnOnce() -> V) -> (&V, bool) {
        match self.entries.entry(id) {
            Entry::Occupied(entry) => (entry.into_mut(), false),
            Entry::Vacant(entry) => (entry.insert(create()), true),
        }
    }
}

impl<V: PooledVisual> EntityPool<V> {
    /// Release every entry whose id is not in `seen`.
    ///
    /// Afterwards the pool's ids are a subset of `seen`. Returns the number
    /// of entries released.
    pub fn prune<H: RenderHost + ?Sized>(&mut self, seen: &AHashSet<SimId>, host: &mut H) -> usize {
        let stale: Vec<SimId> = self
            .entries
            .keys()
            .copied()
            .filter(|id| !seen.contains(id))
            .collect();

        for id in &stale {
            if let Some(visual) = self.entries.remove(id) {
                tracing::trace!(id, "releasing pooled visual");
                visual.release(host);
            }
        }
        stale.len()
    }

    /// Release everything.
    pub fn clear<H: RenderHost + ?Sized>(&mut self, host: &mut H) -> usize {
        let released = self.entries.len();
        for (_, visual) in self.entries.drain() {
            visual.release(host);
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::host::NodeKind;
    use crate::render::scene::SceneCanvas;

    fn creature(canvas: &mut SceneCanvas) -> CreatureVisual {
        CreatureVisual {
            node: canvas.attach(NodeKind::Circle),
        }
    }

    #[test]
    fn test_get_or_create_only_creates_once() {
        let mut canvas = SceneCanvas::default();
        let mut pool = EntityPool::new();

        let (first, created) = pool.get_or_create(7, || creature(&mut canvas));
        let first = *first;
        assert!(created);

        let (second, created) = pool.get_or_create(7, || panic!("already pooled"));
        assert!(!created);
        assert_eq!(*second, first);
        assert_eq!(canvas.len(), 1);
    }

    #[test]
    fn test_prune_removes_exactly_unseen() {
        let mut canvas = SceneCanvas::default();
        let mut pool = EntityPool::new();
        for id in [1, 2, 3, 4] {
            pool.get_or_create(id, || creature(&mut canvas));
        }

        let seen: AHashSet<SimId> = [2, 4, 99].into_iter().collect();
        let released = pool.prune(&seen, &mut canvas);

        assert_eq!(released, 2);
        assert_eq!(pool.sorted_ids(), vec![2, 4]);
        assert_eq!(canvas.len(), 2);
    }

    #[test]
    fn test_grass_release_detaches_both_nodes() {
        let mut canvas = SceneCanvas::default();
        let mut pool = EntityPool::new();
        pool.get_or_create(0, || GrassVisual {
            shape: canvas.attach(NodeKind::Circle),
            label: canvas.attach(NodeKind::Circle),
        });
        assert_eq!(canvas.len(), 2);

        pool.prune(&AHashSet::new(), &mut canvas);
        assert!(pool.is_empty());
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut canvas = SceneCanvas::default();
        let mut pool = EntityPool::new();
        for id in 0..10 {
            pool.get_or_create(id, || creature(&mut canvas));
        }
        assert_eq!(pool.clear(&mut canvas), 10);
        assert!(pool.is_empty());
        assert!(canvas.is_empty());
    }
}
