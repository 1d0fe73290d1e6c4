//! Entity registry
//!
//! The [`Manager`] is the sole owner of every entity. Entities live in one
//! dense vector in creation order; a per-kind index lists the handles of each
//! kind so callers can walk "all bricks" or "all balls" without scanning.
//!
//! Destruction is deferred: collision code only *marks* entities, and
//! [`Manager::refresh`] purges them once per frame. Until then every marked
//! entity stays visible to queries, so resolution always sees a stable set.

use super::entity::{Entity, EntityKind, FrameContext, Variant};
use crate::renderer::Renderer;

/// Stable handle to an entity owned by a [`Manager`]
///
/// Handles are never reused within a manager, so a handle to a purged
/// entity simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

/// Owning entity store with a per-kind index
#[derive(Debug, Default)]
pub struct Manager {
    /// Live entities, sorted by id (= creation order)
    entities: Vec<(EntityId, Entity)>,
    /// Handles grouped by kind, each in creation order
    groups: [Vec<EntityId>; EntityKind::COUNT],
    next_id: u32,
}

impl Manager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Take ownership of `value` and index it under its kind
    pub fn create<T: Variant>(&mut self, value: T) -> EntityId {
        let id = self.next_entity_id();
        self.entities.push((id, value.into_entity()));
        self.groups[T::KIND.index()].push(id);
        id
    }

    /// Handles of every `T`, in creation order (empty if there are none)
    pub fn get_all<T: Variant>(&self) -> &[EntityId] {
        &self.groups[T::KIND.index()]
    }

    pub fn count<T: Variant>(&self) -> usize {
        self.get_all::<T>().len()
    }

    pub fn is_empty_of<T: Variant>(&self) -> bool {
        self.get_all::<T>().is_empty()
    }

    /// Total number of entities, marked ones included
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn position(&self, id: EntityId) -> Option<usize> {
        position_of(&self.entities, id)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.position(id).map(|i| &self.entities[i].1)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let i = self.position(id)?;
        Some(&mut self.entities[i].1)
    }

    /// Look up an entity as its concrete type
    pub fn get<T: Variant>(&self, id: EntityId) -> Option<&T> {
        self.entity(id).and_then(T::downcast_ref)
    }

    pub fn get_mut<T: Variant>(&mut self, id: EntityId) -> Option<&mut T> {
        self.entity_mut(id).and_then(T::downcast_mut)
    }

    /// Iterate every `T` in creation order
    pub fn iter<T: Variant>(&self) -> impl Iterator<Item = &T> + '_ {
        self.get_all::<T>().iter().filter_map(|id| self.get::<T>(*id))
    }

    /// Call `f` once per indexed `T`, in creation order
    pub fn for_each<T: Variant, F: FnMut(&mut T)>(&mut self, mut f: F) {
        let Self {
            entities, groups, ..
        } = self;
        for id in &groups[T::KIND.index()] {
            if let Some(i) = position_of(entities, *id) {
                if let Some(value) = T::downcast_mut(&mut entities[i].1) {
                    f(value);
                }
            }
        }
    }

    /// Call `f` for every (A, B) pair, A-major, both in creation order
    ///
    /// A and B must be different kinds.
    pub fn for_each_pair<A: Variant, B: Variant, F: FnMut(&mut A, &mut B)>(&mut self, mut f: F) {
        if A::KIND == B::KIND {
            log::warn!("for_each_pair called with a single kind {:?}", A::KIND);
            return;
        }
        let Self {
            entities, groups, ..
        } = self;

        for a_id in &groups[A::KIND.index()] {
            let Some(ai) = position_of(entities, *a_id) else {
                continue;
            };
            for b_id in &groups[B::KIND.index()] {
                let Some(bi) = position_of(entities, *b_id) else {
                    continue;
                };
                let Some(((_, ea), (_, eb))) = pair_mut(entities, ai, bi) else {
                    continue;
                };
                if let (Some(a), Some(b)) = (A::downcast_mut(ea), B::downcast_mut(eb)) {
                    f(a, b);
                }
            }
        }
    }

    /// Update every entity once, in creation order
    pub fn update(&mut self, ctx: &FrameContext<'_>) {
        for (_, entity) in &mut self.entities {
            entity.update(ctx);
        }
    }

    /// Purge every destroyed entity from the index and the store
    ///
    /// Survivors keep their relative order. Returns the number purged.
    pub fn refresh(&mut self) -> usize {
        let Self {
            entities, groups, ..
        } = self;
        for group in groups.iter_mut() {
            group.retain(|id| {
                position_of(entities, *id).is_some_and(|i| !entities[i].1.destroyed())
            });
        }

        let before = entities.len();
        entities.retain(|(_, e)| !e.destroyed());
        let purged = before - entities.len();
        if purged > 0 {
            log::trace!("refresh purged {} entities, {} left", purged, entities.len());
        }
        purged
    }

    /// Draw every entity, in creation order
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        for (_, entity) in &self.entities {
            entity.draw(renderer);
        }
    }

    /// Drop every entity and empty the index
    pub fn clear(&mut self) {
        self.entities.clear();
        for group in &mut self.groups {
            group.clear();
        }
    }
}

/// Index of `id` in a store sorted by id
fn position_of(entities: &[(EntityId, Entity)], id: EntityId) -> Option<usize> {
    entities.binary_search_by_key(&id, |(eid, _)| *eid).ok()
}

/// Two distinct mutable elements of a slice
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> Option<(&mut T, &mut T)> {
    if a == b || a >= items.len() || b >= items.len() {
        return None;
    }
    if a < b {
        let (lo, hi) = items.split_at_mut(b);
        Some((&mut lo[a], &mut hi[0]))
    } else {
        let (lo, hi) = items.split_at_mut(a);
        Some((&mut hi[0], &mut lo[b]))
    }
}
