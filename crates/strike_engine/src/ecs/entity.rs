//! Entity identity and per-entity state
//!
//! An entity is an identity plus a bag of components. Identity is a
//! generational index: the `index` is monotonically increasing and never
//! reused for fresh entities, while pooled slots keep their index and bump
//! the `generation` on every reuse. A lookup with a stale generation fails,
//! so a recycled slot can never be mistaken for its previous occupant.

use std::collections::HashSet;

use log::error;

use super::components::{Component, ComponentTable, Signature};

/// Generational entity identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EntityId {
    /// Slot index, unique at time of creation
    pub index: u32,
    /// Reuse counter; bumped each time the slot is recycled
    pub generation: u32,
}

impl EntityId {
    /// Create an id for a fresh (generation zero) entity
    pub(crate) fn new(index: u32) -> Self {
        Self {
            index,
            generation: 0,
        }
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Creation-time description of an entity
#[derive(Debug, Clone, Default)]
pub struct EntityConfig {
    components: Vec<Component>,
    tags: Vec<String>,
    always_update: bool,
    pool_kind: Option<String>,
}

impl EntityConfig {
    /// Create an empty config
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a transform component
    pub fn with_transform(mut self, c: super::components::TransformComponent) -> Self {
        self.components.push(Component::Transform(c));
        self
    }

    /// Attach a movement component
    pub fn with_movement(mut self, c: super::components::MovementComponent) -> Self {
        self.components.push(Component::Movement(c));
        self
    }

    /// Attach a weapon component
    pub fn with_weapon(mut self, c: super::components::WeaponComponent) -> Self {
        self.components.push(Component::Weapon(c));
        self
    }

    /// Attach a projectile component
    pub fn with_projectile(mut self, c: super::components::ProjectileComponent) -> Self {
        self.components.push(Component::Projectile(c));
        self
    }

    /// Attach a visual component
    pub fn with_visual(mut self, c: super::components::VisualComponent) -> Self {
        self.components.push(Component::Visual(c));
        self
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Exempt the entity from visibility-based update skipping
    pub fn with_always_update(mut self) -> Self {
        self.always_update = true;
        self
    }

    /// Return the entity to the named recycle pool instead of freeing it
    pub fn with_pool_kind(mut self, kind: impl Into<String>) -> Self {
        self.pool_kind = Some(kind.into());
        self
    }

    pub(crate) fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// A live simulation entity
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    active: bool,
    pending_removal: bool,
    always_update: bool,
    tags: HashSet<String>,
    pool_kind: Option<String>,
    /// Attached components; systems mutate only the slots they require
    pub components: ComponentTable,
}

impl Entity {
    pub(crate) fn new(id: EntityId, config: EntityConfig) -> Self {
        let mut entity = Self {
            id,
            active: true,
            pending_removal: false,
            always_update: false,
            tags: HashSet::new(),
            pool_kind: None,
            components: ComponentTable::default(),
        };
        entity.apply_config(config);
        entity
    }

    /// Populate this entity from a config, keeping originals on duplicates
    pub(crate) fn apply_config(&mut self, config: EntityConfig) {
        for component in config.components {
            if let Err(err) = self.components.insert(component) {
                // Programmer error: assert in strict builds, keep the
                // original component in production.
                debug_assert!(false, "{err} on entity {}", self.id);
                error!("{err} on entity {}; keeping the original", self.id);
            }
        }
        self.tags.extend(config.tags);
        self.always_update = config.always_update;
        self.pool_kind = config.pool_kind;
    }

    /// Entity identifier
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Whether the renderer should display this entity
    pub fn active(&self) -> bool {
        self.active
    }

    /// Whether this entity will be excised at the end-of-tick sweep
    pub fn pending_removal(&self) -> bool {
        self.pending_removal
    }

    /// Whether this entity skips visibility-based update gating
    pub fn always_update(&self) -> bool {
        self.always_update
    }

    /// Tag membership test
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Iterate over this entity's tags (unordered)
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Recycle pool this entity returns to, if any
    pub fn pool_kind(&self) -> Option<&str> {
        self.pool_kind.as_deref()
    }

    /// Signature derived from the attached components
    pub fn signature(&self) -> Signature {
        self.components.signature()
    }

    /// Whether this entity's component set is a superset of `required`
    pub fn matches(&self, required: Signature) -> bool {
        self.signature().contains(required)
    }

    /// Whether a system may process this entity this tick
    pub fn processable(&self) -> bool {
        self.active && !self.pending_removal
    }

    /// Mark for removal at the end-of-tick sweep; idempotent
    pub(crate) fn mark_destroyed(&mut self) {
        self.active = false;
        self.pending_removal = true;
    }

    /// Reset this entity for pool storage: components zeroed, tags cleared,
    /// generation bumped so stale ids stop resolving.
    pub(crate) fn recycle(&mut self) {
        self.components.reset();
        self.tags.clear();
        self.always_update = false;
        self.active = false;
        self.pending_removal = false;
        self.id.generation += 1;
    }

    /// Bind a pooled slot to a new logical identity
    pub(crate) fn reactivate(&mut self, config: EntityConfig) {
        self.active = true;
        self.pending_removal = false;
        self.components = ComponentTable::default();
        self.apply_config(config);
    }
}
