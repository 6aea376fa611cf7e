//! Math utilities and types
//!
//! Provides fundamental math types for 3D simulation and game logic.

pub use nalgebra::{Matrix4, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math utility functions
pub mod utils {
    use super::Vec3;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * std::f32::consts::PI / 180.0
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * 180.0 / std::f32::consts::PI
    }

    /// Linear interpolation between two values
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Squared distance between two points projected onto the XZ plane
    ///
    /// Proximity decisions in the simulation are planar; the Y axis only
    /// matters for rendering and the frustum test.
    pub fn planar_distance_sq(a: Vec3, b: Vec3) -> f32 {
        let dx = b.x - a.x;
        let dz = b.z - a.z;
        dx * dx + dz * dz
    }

    /// Rotate a direction vector around the Y axis by `angle` radians
    pub fn rotate_y(v: Vec3, angle: f32) -> Vec3 {
        let (sin, cos) = angle.sin_cos();
        Vec3::new(v.x * cos + v.z * sin, v.y, -v.x * sin + v.z * cos)
    }
}
