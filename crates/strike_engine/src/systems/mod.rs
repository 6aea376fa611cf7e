//! Built-in simulation systems
//!
//! Registered by [`Simulation::new`](crate::simulation::Simulation::new) at
//! fixed priorities: movement (10), weapons (20), projectiles (30). Gaps are
//! deliberate so callers can interleave their own systems, AI between
//! movement and weapons being the usual case.

pub mod movement;
pub mod projectile;
pub mod weapon;

pub use movement::MovementSystem;
pub use projectile::ProjectileSystem;
pub use weapon::WeaponSystem;

/// Recycle pool shared by every projectile entity
pub const PROJECTILE_POOL: &str = "projectile";
