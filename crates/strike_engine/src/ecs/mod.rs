//! Entity-Component-System core
//!
//! Composition over inheritance: entity behavior is determined entirely by
//! which components are attached, and systems filter the live entity set by
//! signature superset each tick.

pub mod components;
pub mod entity;
pub mod registry;
pub mod scheduler;

pub use components::{Component, ComponentTable, DuplicateComponent, Signature};
pub use entity::{Entity, EntityConfig, EntityId};
pub use registry::EntityRegistry;
pub use scheduler::{ScheduleError, Scheduler, System, TickCtx};
