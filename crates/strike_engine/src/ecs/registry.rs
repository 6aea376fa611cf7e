//! Entity registry: lifecycle, lookups, tag groups, and recycle pools
//!
//! The registry is the single owner of all live entities. Destruction is
//! deferred: `destroy` only marks the entity, and the end-of-tick `sweep`
//! excises marked entities in reverse insertion order, either freeing them
//! or returning them to their recycle pool with components reset.

use std::collections::HashMap;

use log::debug;

use super::components::{Component, DuplicateComponent, Signature};
use super::entity::{Entity, EntityConfig, EntityId};

/// Owner of all live entities, their tag groups, and recycle pools
#[derive(Debug, Default)]
pub struct EntityRegistry {
    next_index: u32,
    entities: Vec<Entity>,
    slots: HashMap<u32, usize>,
    tag_groups: HashMap<String, Vec<EntityId>>,
    pools: HashMap<String, Vec<Entity>>,
}

impl EntityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a live, active entity with a fresh id. Never fails.
    pub fn create(&mut self, config: EntityConfig) -> EntityId {
        let id = EntityId::new(self.next_index);
        self.next_index += 1;
        let entity = Entity::new(id, config);
        self.attach(entity);
        id
    }

    /// Draw a slot from the named recycle pool and bind it to a new logical
    /// identity (same index, bumped generation).
    ///
    /// Returns `None` when the pool is empty; callers fall back to
    /// [`create`](Self::create).
    pub fn spawn_from_pool(&mut self, kind: &str, config: EntityConfig) -> Option<EntityId> {
        let mut entity = self.pools.get_mut(kind)?.pop()?;
        entity.reactivate(config);
        let id = entity.id();
        self.attach(entity);
        debug!("reused pooled entity {id} from pool '{kind}'");
        Some(id)
    }

    fn attach(&mut self, entity: Entity) {
        let id = entity.id();
        for tag in entity.tags() {
            self.tag_groups.entry(tag.to_owned()).or_default().push(id);
        }
        self.slots.insert(id.index, self.entities.len());
        self.entities.push(entity);
    }

    /// Mark an entity for removal at the next sweep. Idempotent; stale or
    /// unknown ids are a no-op.
    pub fn destroy(&mut self, id: EntityId) {
        if let Some(entity) = self.get_mut(id) {
            entity.mark_destroyed();
        }
    }

    /// Generation-checked lookup; `None` for unknown or stale ids
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        let entity = &self.entities[*self.slots.get(&id.index)?];
        (entity.id() == id).then_some(entity)
    }

    /// Generation-checked mutable lookup
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let entity = &mut self.entities[*self.slots.get(&id.index)?];
        (entity.id() == id).then_some(entity)
    }

    /// Members of a tag group.
    ///
    /// Additions show up immediately; removals take effect at the sweep, so
    /// callers filter through [`Entity::processable`] for liveness.
    pub fn tagged(&self, tag: &str) -> &[EntityId] {
        self.tag_groups.get(tag).map_or(&[], Vec::as_slice)
    }

    /// Attach one more component to a live entity
    pub fn add_component(
        &mut self,
        id: EntityId,
        component: Component,
    ) -> Result<(), DuplicateComponent> {
        match self.get_mut(id) {
            Some(entity) => entity.components.insert(component),
            None => Ok(()), // stale id: soft no-op, like destroy
        }
    }

    /// Iterate all entities in insertion order, including ones marked for
    /// removal this tick
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Ids of live entities whose component set is a superset of `required`
    pub fn matching(&self, required: Signature) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.processable() && e.matches(required))
            .map(Entity::id)
            .collect()
    }

    /// Number of live entities carrying all of `required`
    pub fn count_matching(&self, required: Signature) -> usize {
        self.entities
            .iter()
            .filter(|e| e.processable() && e.matches(required))
            .count()
    }

    /// Total entity count, including ones marked for removal this tick
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the registry holds no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of slots waiting in the named recycle pool
    pub fn pooled(&self, kind: &str) -> usize {
        self.pools.get(kind).map_or(0, Vec::len)
    }

    /// End-of-tick sweep: excise every entity marked for removal.
    ///
    /// Iterates in reverse insertion order so removal never perturbs the
    /// indices of not-yet-visited entries. Pool-typed entities are reset and
    /// recycled; the rest are freed outright.
    pub fn sweep(&mut self) {
        let mut removed = 0usize;
        let mut i = self.entities.len();
        while i > 0 {
            i -= 1;
            if !self.entities[i].pending_removal() {
                continue;
            }
            let mut entity = self.entities.remove(i);
            removed += 1;
            let id = entity.id();
            let tags: Vec<String> = entity.tags().map(str::to_owned).collect();
            for tag in &tags {
                if let Some(group) = self.tag_groups.get_mut(tag) {
                    group.retain(|member| *member != id);
                    if group.is_empty() {
                        self.tag_groups.remove(tag);
                    }
                }
            }
            self.slots.remove(&id.index);
            if let Some(kind) = entity.pool_kind().map(str::to_owned) {
                entity.recycle();
                self.pools.entry(kind).or_default().push(entity);
            }
        }
        if removed > 0 {
            self.slots.clear();
            for (pos, entity) in self.entities.iter().enumerate() {
                self.slots.insert(entity.id().index, pos);
            }
            debug!("sweep removed {removed} entities, {} remain", self.entities.len());
        }
    }
}
