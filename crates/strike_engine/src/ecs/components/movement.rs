//! Movement component for entities that move in 3D space

use crate::foundation::math::Vec3;

/// Velocity state and integration parameters
#[derive(Debug, Clone, PartialEq)]
pub struct MovementComponent {
    /// Linear velocity in units per second
    pub velocity: Vec3,

    /// Nominal travel speed, used by steering logic when re-aiming velocity
    pub speed: f32,

    /// Maximum speed limit (0 = no limit)
    pub max_speed: f32,

    /// Velocity damping per second (0 = none)
    pub drag: f32,
}

impl Default for MovementComponent {
    fn default() -> Self {
        Self {
            velocity: Vec3::zeros(),
            speed: 0.0,
            max_speed: 0.0,
            drag: 0.0,
        }
    }
}

impl MovementComponent {
    /// Create a stationary movement component
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with an initial velocity; `speed` is set to its magnitude
    pub fn with_velocity(velocity: Vec3) -> Self {
        Self {
            velocity,
            speed: velocity.magnitude(),
            ..Default::default()
        }
    }

    /// Builder pattern: set the maximum speed
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed.max(0.0);
        self
    }

    /// Builder pattern: set drag
    pub fn with_drag(mut self, drag: f32) -> Self {
        self.drag = drag.max(0.0);
        self
    }

    /// Apply drag and the speed limit for one step
    pub fn integrate(&mut self, delta_time: f32) {
        if self.drag > 0.0 {
            self.velocity *= (1.0 - self.drag * delta_time).max(0.0);
        }
        if self.max_speed > 0.0 {
            let speed = self.velocity.magnitude();
            if speed > self.max_speed {
                self.velocity = self.velocity / speed * self.max_speed;
            }
        }
    }

    /// Position delta for this frame
    pub fn position_delta(&self, delta_time: f32) -> Vec3 {
        self.velocity * delta_time
    }

    /// Restore default values (pool reuse)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_with_velocity_sets_speed() {
        let m = MovementComponent::with_velocity(Vec3::new(3.0, 0.0, 4.0));
        assert_relative_eq!(m.speed, 5.0);
    }

    #[test]
    fn test_max_speed_limit() {
        let mut m =
            MovementComponent::with_velocity(Vec3::new(10.0, 0.0, 0.0)).with_max_speed(5.0);
        m.integrate(0.1);
        assert!(m.velocity.magnitude() <= 5.0 + 1e-6);
    }

    #[test]
    fn test_drag_slows_velocity() {
        let mut m = MovementComponent::with_velocity(Vec3::new(1.0, 0.0, 0.0)).with_drag(0.5);
        m.integrate(0.1);
        assert!(m.velocity.magnitude() < 1.0);
    }

    #[test]
    fn test_position_delta() {
        let m = MovementComponent::with_velocity(Vec3::new(2.0, 1.0, 0.5));
        assert_relative_eq!(m.position_delta(0.5), Vec3::new(1.0, 0.5, 0.25));
    }
}
