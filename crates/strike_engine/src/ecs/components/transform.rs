//! Transform component
//!
//! Pure data component representing spatial state in world space.
//! Rotation is stored as Euler angles; yaw (the Y angle) drives the planar
//! aim direction used by weapons and AI.

use crate::foundation::math::{utils, Vec3};

/// Spatial transform: position, rotation, scale
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// World space position
    pub position: Vec3,

    /// Euler rotation angles in radians (X, Y, Z); Y is yaw
    pub rotation: Vec3,

    /// Scale factors per axis
    pub scale: Vec3,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Create an identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: set yaw (rotation around Y) in radians
    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.rotation.y = yaw;
        self
    }

    /// Builder pattern: set uniform scale
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Planar aim direction derived from yaw: +Z at zero rotation
    pub fn forward(&self) -> Vec3 {
        utils::rotate_y(Vec3::new(0.0, 0.0, 1.0), self.rotation.y)
    }

    /// Restore default values (pool reuse)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
