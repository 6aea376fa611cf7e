//! # Strike Engine
//!
//! Per-frame simulation kernel for a real-time combat game.
//!
//! ## Features
//!
//! - **ECS Core**: entity registry with tag groups, recycle pools, and
//!   signature-matched systems run in priority order
//! - **Spatial Grid**: uniform XZ bucket grid for near-linear proximity
//!   queries
//! - **Visibility Gating**: frustum-based update skipping, never culling
//!   existence
//! - **Weapons & Projectiles**: cooldown state machines, spread fans,
//!   pooled projectiles with target homing
//! - **Deterministic Runs**: seeded RNG and a clamped fixed-step tick
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use strike_engine::prelude::*;
//!
//! fn main() {
//!     strike_engine::foundation::logging::init();
//!
//!     let mut sim = Simulation::with_defaults();
//!     sim.spawn(
//!         EntityConfig::new()
//!             .with_transform(TransformComponent::identity())
//!             .with_weapon(WeaponComponent::default())
//!             .with_tag("player")
//!             .with_always_update(),
//!     );
//!
//!     loop {
//!         sim.tick(1.0 / 60.0);
//!         // Hand sim.snapshot() to the renderer.
//!     }
//! }
//! ```

pub mod config;
pub mod ecs;
pub mod events;
pub mod foundation;
pub mod simulation;
pub mod snapshot;
pub mod spatial;
pub mod systems;
pub mod visibility;

pub use config::{ConfigError, SimConfig};
pub use simulation::{Simulation, TickStats};

/// Common imports for engine users
pub mod prelude {
    pub use crate::config::SimConfig;
    pub use crate::ecs::components::{
        MovementComponent, ProjectileComponent, TransformComponent, VisualComponent,
        WeaponComponent,
    };
    pub use crate::ecs::{
        EntityConfig, EntityId, EntityRegistry, Signature, System, TickCtx,
    };
    pub use crate::events::{EventBus, EventHandler, GameEvent, GameEventKind};
    pub use crate::foundation::math::{Mat4, Vec3};
    pub use crate::foundation::time::Timer;
    pub use crate::simulation::{Simulation, TickStats};
    pub use crate::snapshot::{EntityView, WorldSnapshot};
    pub use crate::spatial::SpatialGrid;
    pub use crate::visibility::{Camera, VisibilityGate};
}
