//! Active camera description
//!
//! The simulation only needs the camera's combined view-projection matrix
//! to derive frustum planes; rendering owns everything else about it.

use crate::foundation::math::{utils, Mat4, Point3, Vec3};

/// Perspective camera snapshot used for visibility computation
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position in world space
    pub position: Vec3,
    /// Look-at target in world space
    pub target: Vec3,
    /// Up reference vector
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Viewport aspect ratio (width / height)
    pub aspect: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 30.0, 30.0),
            target: Vec3::zeros(),
            up: Vec3::y(),
            fov_y: utils::deg_to_rad(60.0),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 500.0,
        }
    }
}

impl Camera {
    /// Create a camera looking from `position` toward `target`
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            ..Default::default()
        }
    }

    /// World-to-view matrix (right-handed)
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(
            &Point3::from(self.position),
            &Point3::from(self.target),
            &self.up,
        )
    }

    /// Perspective projection matrix
    pub fn projection(&self) -> Mat4 {
        nalgebra::Perspective3::new(self.aspect, self.fov_y, self.near, self.far).to_homogeneous()
    }

    /// Combined view-projection matrix, recomputed on demand
    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}
