//! View frustum extraction and sphere containment
//!
//! Planes are extracted directly from the combined view-projection matrix
//! (Gribb/Hartmann), so the frustum stays correct for any camera the matrix
//! describes without re-deriving geometry from FOV and aspect.

use crate::foundation::math::{Mat4, Vec3};

/// Infinite plane in normal-distance form, normal pointing inward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal (zero for a degenerate, always-passing plane)
    pub normal: Vec3,
    /// Signed distance term; `normal.dot(p) + d` is the point distance
    pub d: f32,
}

impl Plane {
    /// Build from raw `ax + by + cz + d = 0` coefficients, normalizing
    /// so signed distances are in world units
    pub fn from_coefficients(a: f32, b: f32, c: f32, d: f32) -> Self {
        let normal = Vec3::new(a, b, c);
        let length = normal.magnitude();
        if length <= f32::EPSILON {
            // Degenerate plane: treat as always-passing rather than NaN.
            return Self {
                normal: Vec3::zeros(),
                d: 0.0,
            };
        }
        Self {
            normal: normal / length,
            d: d / length,
        }
    }

    /// Signed distance from `point`; positive is the inside half-space
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(&point) + self.d
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            normal: Vec3::zeros(),
            d: 0.0,
        }
    }
}

/// Six-plane view frustum with inward-facing normals
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    /// Extract planes from a combined view-projection matrix
    ///
    /// Row combinations follow Gribb/Hartmann: left/right from row 4 ± row 1,
    /// bottom/top from row 4 ± row 2, near/far from row 4 ± row 3.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let row = |i: usize| [vp[(i, 0)], vp[(i, 1)], vp[(i, 2)], vp[(i, 3)]];
        let (r0, r1, r2, r3) = (row(0), row(1), row(2), row(3));
        let combine = |sign: f32, r: [f32; 4]| {
            Plane::from_coefficients(
                r3[0] + sign * r[0],
                r3[1] + sign * r[1],
                r3[2] + sign * r[2],
                r3[3] + sign * r[3],
            )
        };
        Self {
            planes: [
                combine(1.0, r0),  // left
                combine(-1.0, r0), // right
                combine(1.0, r1),  // bottom
                combine(-1.0, r1), // top
                combine(1.0, r2),  // near
                combine(-1.0, r2), // far
            ],
        }
    }

    /// Test whether a sphere intersects or lies inside the frustum
    ///
    /// `margin` expands the sphere so borderline entities keep updating a
    /// little past the screen edge instead of popping.
    pub fn contains_sphere(&self, center: Vec3, radius: f32, margin: f32) -> bool {
        let reach = radius + margin;
        self.planes
            .iter()
            .all(|plane| plane.signed_distance(center) >= -reach)
    }
}
