//! Camera visibility gating
//!
//! Gates expensive per-tick work (AI, animation) by camera visibility.
//! Culling affects update scheduling only, never existence: a culled entity
//! stays live in the registry and spatial grid and simply skips the gated
//! logic until it is back in view.

pub mod camera;
pub mod frustum;
pub mod gate;

pub use camera::Camera;
pub use frustum::{Frustum, Plane};
pub use gate::VisibilityGate;
