//! Render snapshot
//!
//! A flat, copy-out view of the world taken after the end-of-tick sweep.
//! The renderer reads the snapshot; it never touches the registry, so the
//! simulation stays free to mutate between frames.

use crate::ecs::components::VisualComponent;
use crate::ecs::{EntityId, EntityRegistry};
use crate::foundation::math::Vec3;

/// One entity as the renderer sees it
#[derive(Debug, Clone)]
pub struct EntityView {
    /// Entity identifier, stable for the entity's lifetime
    pub id: EntityId,
    /// World position
    pub position: Vec3,
    /// Euler rotation in radians
    pub rotation: Vec3,
    /// Per-axis scale
    pub scale: Vec3,
    /// Whether the entity should be displayed; always true for snapshots
    /// taken after the sweep
    pub active: bool,
    /// Tags, sorted for stable output
    pub tags: Vec<String>,
    /// Opaque visual data, if the entity carries any
    pub visual: Option<VisualComponent>,
}

/// All renderable entities as of the most recent completed tick
#[derive(Debug, Clone, Default)]
pub struct WorldSnapshot {
    tick: u64,
    entities: Vec<EntityView>,
}

impl WorldSnapshot {
    /// Capture every transform-bearing entity, in insertion order
    pub fn capture(registry: &EntityRegistry, tick: u64) -> Self {
        let entities = registry
            .iter()
            .filter_map(|entity| {
                let transform = entity.components.transform.as_ref()?;
                let mut tags: Vec<String> = entity.tags().map(str::to_owned).collect();
                tags.sort_unstable();
                Some(EntityView {
                    id: entity.id(),
                    position: transform.position,
                    rotation: transform.rotation,
                    scale: transform.scale,
                    active: entity.active(),
                    tags,
                    visual: entity.components.visual.clone(),
                })
            })
            .collect();
        Self { tick, entities }
    }

    /// Tick this snapshot was captured after
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// The captured entity views
    pub fn entities(&self) -> &[EntityView] {
        &self.entities
    }

    /// Number of captured entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether nothing was captured
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
