//! System scheduling
//!
//! Systems declare a required-component [`Signature`] and a priority; each
//! tick they run in ascending priority order over exactly the entities whose
//! component set is a superset of their signature.
//!
//! Tick-boundary contract: entities spawned by a system are appended to the
//! registry immediately, so they are visible to systems that have not run
//! yet this tick, but are never retroactively visited by systems that
//! already finished. Removal is deferred to the end-of-tick sweep.

use log::error;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::config::SimConfig;
use crate::events::EventBus;
use crate::spatial::SpatialGrid;
use crate::visibility::VisibilityGate;

use super::components::Signature;
use super::entity::EntityId;
use super::registry::EntityRegistry;

/// Per-tick context handed to every system invocation.
///
/// The grid and gate are tick-scoped read-only snapshots; the registry and
/// event bus are the only mutable targets.
pub struct TickCtx<'a> {
    /// Clamped frame delta in seconds
    pub dt: f32,
    /// The live entity set
    pub registry: &'a mut EntityRegistry,
    /// Spatial buckets rebuilt at the start of this tick
    pub grid: &'a SpatialGrid,
    /// Visibility gate recomputed at the start of this tick
    pub gate: &'a VisibilityGate,
    /// Domain event bus; dispatch is synchronous and inline
    pub events: &'a mut EventBus,
    /// Seeded RNG for gameplay randomness
    pub rng: &'a mut StdRng,
    /// Simulation configuration
    pub config: &'a SimConfig,
}

/// Stateless logic run once per matching entity per tick
pub trait System {
    /// Identifier used for enable/disable and logging
    fn name(&self) -> &str;

    /// Components an entity must carry for this system to process it
    fn signature(&self) -> Signature;

    /// Execution order; lower runs first
    fn priority(&self) -> i32 {
        0
    }

    /// Process one matching entity
    fn process(&mut self, id: EntityId, ctx: &mut TickCtx<'_>);
}

/// Raised when a system cannot be scheduled.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// A system declared an empty required-component signature
    #[error("system '{0}' declares an empty signature")]
    MalformedSignature(String),
}

struct Entry {
    system: Box<dyn System>,
    enabled: bool,
}

/// Priority-ordered system executor
#[derive(Default)]
pub struct Scheduler {
    entries: Vec<Entry>,
}

impl Scheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a system; rejects malformed (empty) signatures.
    pub fn register(&mut self, system: Box<dyn System>) -> Result<(), ScheduleError> {
        if system.signature().is_empty() {
            let name = system.name().to_owned();
            error!("refusing to schedule system '{name}' with empty signature");
            return Err(ScheduleError::MalformedSignature(name));
        }
        self.entries.push(Entry {
            system,
            enabled: true,
        });
        // Stable sort keeps registration order among equal priorities.
        self.entries
            .sort_by_key(|entry| entry.system.priority());
        Ok(())
    }

    /// Enable or disable a system by name; returns `false` if unknown.
    ///
    /// A disabled system is skipped wholesale: its matching entities are
    /// untouched by it for the tick.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        for entry in &mut self.entries {
            if entry.system.name() == name {
                entry.enabled = enabled;
                return true;
            }
        }
        false
    }

    /// Number of registered systems
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no systems are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run all enabled systems for one tick, ascending priority.
    ///
    /// Returns the number of entities each system processed, in run order;
    /// disabled systems report zero.
    pub fn run(&mut self, ctx: &mut TickCtx<'_>) -> Vec<(String, usize)> {
        let mut processed = Vec::with_capacity(self.entries.len());
        for entry in &mut self.entries {
            let mut count = 0;
            if entry.enabled {
                // The match set is computed per system, so entities spawned
                // by earlier systems this tick are included here.
                let matching = ctx.registry.matching(entry.system.signature());
                for id in matching {
                    // Cancellation point: an earlier invocation this pass
                    // may have marked the entity.
                    let still_live = ctx
                        .registry
                        .get(id)
                        .is_some_and(super::entity::Entity::processable);
                    if still_live {
                        entry.system.process(id, ctx);
                        count += 1;
                    }
                }
            }
            processed.push((entry.system.name().to_owned(), count));
        }
        processed
    }
}
