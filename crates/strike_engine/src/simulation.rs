//! Simulation orchestration
//!
//! One `tick` runs the full frame pipeline: clamp dt, rebuild the spatial
//! grid, refresh the visibility gate, run the scheduled systems, sweep the
//! registry, and capture the render snapshot. Single-threaded and
//! synchronous; the grid and gate are read-only while systems execute.

use std::time::{Duration, Instant};

use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SimConfig;
use crate::ecs::{
    EntityConfig, EntityId, EntityRegistry, ScheduleError, Scheduler, System, TickCtx,
};
use crate::events::{EventBus, EventHandler, GameEventKind};
use crate::snapshot::WorldSnapshot;
use crate::spatial::SpatialGrid;
use crate::systems::{MovementSystem, ProjectileSystem, WeaponSystem};
use crate::visibility::{Camera, VisibilityGate};

/// Counters describing the most recent completed tick
#[derive(Debug, Clone, Default)]
pub struct TickStats {
    /// Completed tick number
    pub tick: u64,
    /// Entities in the registry after the sweep
    pub entities: usize,
    /// Entities processed by each system, in run order
    pub processed: Vec<(String, usize)>,
    /// Wall-clock duration of the tick
    pub duration: Duration,
}

/// The per-frame combat simulation kernel
pub struct Simulation {
    config: SimConfig,
    registry: EntityRegistry,
    scheduler: Scheduler,
    grid: SpatialGrid,
    gate: VisibilityGate,
    events: EventBus,
    camera: Camera,
    rng: StdRng,
    paused: bool,
    tick_count: u64,
    stats: TickStats,
    snapshot: WorldSnapshot,
}

impl Simulation {
    /// Create a simulation with the built-in systems registered at their
    /// fixed priorities (movement 10, weapons 20, projectiles 30)
    pub fn new(config: SimConfig) -> Self {
        let mut scheduler = Scheduler::new();
        let built_ins: [Box<dyn System>; 3] = [
            Box::new(MovementSystem),
            Box::new(WeaponSystem),
            Box::new(ProjectileSystem),
        ];
        for system in built_ins {
            // Built-in signatures are non-empty, so this cannot fail.
            if let Err(err) = scheduler.register(system) {
                error!("failed to register built-in system: {err}");
            }
        }

        let grid = SpatialGrid::new(config.cell_size);
        let camera = config.camera.to_camera();
        let rng = StdRng::seed_from_u64(config.seed);
        info!(
            "simulation ready: cell_size={}, seed={}",
            config.cell_size, config.seed
        );
        Self {
            config,
            registry: EntityRegistry::new(),
            scheduler,
            grid,
            gate: VisibilityGate::new(),
            events: EventBus::new(),
            camera,
            rng,
            paused: false,
            tick_count: 0,
            stats: TickStats::default(),
            snapshot: WorldSnapshot::default(),
        }
    }

    /// Create a simulation with default configuration
    pub fn with_defaults() -> Self {
        Self::new(SimConfig::default())
    }

    /// Advance the world by one frame.
    ///
    /// `dt` is clamped to `[0, max_delta_time]` so a backgrounded host does
    /// not produce a catastrophic catch-up step. A paused simulation is a
    /// strict no-op: no time passes, no events fire, the snapshot is stale.
    pub fn tick(&mut self, dt: f32) {
        if self.paused {
            return;
        }
        let start = Instant::now();
        let dt = dt.clamp(0.0, self.config.max_delta_time);
        self.tick_count += 1;

        self.grid.clear();
        for entity in self.registry.iter() {
            if !entity.processable() {
                continue;
            }
            if let Some(transform) = entity.components.transform.as_ref() {
                self.grid
                    .insert(entity.id(), transform.position.x, transform.position.z);
            }
        }

        self.gate.update(&self.camera);

        let mut ctx = TickCtx {
            dt,
            registry: &mut self.registry,
            grid: &self.grid,
            gate: &self.gate,
            events: &mut self.events,
            rng: &mut self.rng,
            config: &self.config,
        };
        let processed = self.scheduler.run(&mut ctx);

        self.registry.sweep();
        self.snapshot = WorldSnapshot::capture(&self.registry, self.tick_count);
        self.stats = TickStats {
            tick: self.tick_count,
            entities: self.registry.len(),
            processed,
            duration: start.elapsed(),
        };
    }

    /// Create an entity; visible to later-priority systems the same tick
    /// when called from inside one
    pub fn spawn(&mut self, config: EntityConfig) -> EntityId {
        self.registry.create(config)
    }

    /// Mark an entity for removal at the end of the current tick
    pub fn despawn(&mut self, id: EntityId) {
        self.registry.destroy(id);
    }

    /// Register an additional system; callers pick priorities around the
    /// built-in 10/20/30
    pub fn register_system(&mut self, system: Box<dyn System>) -> Result<(), ScheduleError> {
        self.scheduler.register(system)
    }

    /// Enable or disable a system by name; returns `false` if unknown
    pub fn set_system_enabled(&mut self, name: &str, enabled: bool) -> bool {
        self.scheduler.set_enabled(name, enabled)
    }

    /// Register an event handler for one event kind
    pub fn register_event_handler(&mut self, kind: GameEventKind, handler: Box<dyn EventHandler>) {
        self.events.register_handler(kind, handler);
    }

    /// Stop advancing time
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume advancing time
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Whether the simulation is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Replace the active camera used for visibility gating
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    /// The active camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The live entity set
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Mutable access to the live entity set, for setup between ticks
    pub fn registry_mut(&mut self) -> &mut EntityRegistry {
        &mut self.registry
    }

    /// Configuration this simulation was built with
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Render snapshot captured after the most recent tick
    pub fn snapshot(&self) -> &WorldSnapshot {
        &self.snapshot
    }

    /// Counters for the most recent tick
    pub fn stats(&self) -> &TickStats {
        &self.stats
    }

    /// Number of completed ticks
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
