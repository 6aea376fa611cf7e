//! Per-entity update gate driven by the active frustum

use crate::ecs::Entity;
use crate::foundation::math::Vec3;
use crate::visibility::{Camera, Frustum};

/// Decides whether gated per-tick work should run for an entity
///
/// Freshly constructed gates pass everything; culling only begins once
/// [`VisibilityGate::update`] has been fed a camera.
#[derive(Debug, Default)]
pub struct VisibilityGate {
    frustum: Frustum,
}

impl VisibilityGate {
    /// Gate that passes all entities until the first camera update
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-extract frustum planes from the camera; called once per tick
    pub fn update(&mut self, camera: &Camera) {
        self.frustum = Frustum::from_view_projection(&camera.view_projection());
    }

    /// Raw sphere visibility against the current frustum
    pub fn is_visible(&self, center: Vec3, radius: f32, margin: f32) -> bool {
        self.frustum.contains_sphere(center, radius, margin)
    }

    /// Whether gated logic should run for `entity` this tick
    ///
    /// Entities flagged always-update bypass the frustum test entirely.
    pub fn should_update(&self, entity: &Entity, center: Vec3, radius: f32, margin: f32) -> bool {
        entity.always_update() || self.is_visible(center, radius, margin)
    }
}
