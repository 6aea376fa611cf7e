//! Weapon component: a per-entity firing state machine
//!
//! A weapon is **Ready** while `cooldown_remaining <= 0` and ammo is
//! available (or infinite). Firing moves it to **Cooling**; the cooldown
//! decays by `dt` each tick until the weapon is Ready again.

use crate::foundation::math::utils::deg_to_rad;

/// Weapon stats and cooldown state
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponComponent {
    /// Seconds until the weapon is Ready again
    pub cooldown_remaining: f32,
    /// Cooldown applied after each successful fire
    pub cooldown_duration: f32,
    /// Remaining ammo; `None` means infinite
    pub ammo: Option<u32>,
    /// Pellets created per fire
    pub projectiles_per_shot: u32,
    /// Total angular spread of a shot, in degrees
    pub spread_degrees: f32,
    /// Launch speed of each pellet
    pub projectile_speed: f32,
    /// Lifetime of each pellet in seconds
    pub projectile_lifetime: f32,
    /// Damage carried by each pellet
    pub damage: f32,
    /// Pellets survive their first hit
    pub piercing: bool,
    /// Pellets steer toward a tracked target
    pub homing: bool,
    /// Steering strength for homing pellets
    pub homing_strength: f32,
    /// Pellets detonate on expiry/hit
    pub explosive: bool,
    /// Detonation radius for explosive pellets
    pub explosion_radius: f32,
    /// Visual size of each pellet (opaque to the simulation)
    pub projectile_size: f32,
    /// Visual color of each pellet (opaque to the simulation)
    pub projectile_color: String,
    /// Trigger state, set by the owner's input/AI collaborator
    pub trigger: bool,
}

impl Default for WeaponComponent {
    fn default() -> Self {
        Self {
            cooldown_remaining: 0.0,
            cooldown_duration: 0.5,
            ammo: None,
            projectiles_per_shot: 1,
            spread_degrees: 0.0,
            projectile_speed: 40.0,
            projectile_lifetime: 2.0,
            damage: 1.0,
            piercing: false,
            homing: false,
            homing_strength: 0.0,
            explosive: false,
            explosion_radius: 0.0,
            projectile_size: 0.2,
            projectile_color: String::from("#ffffff"),
            trigger: false,
        }
    }
}

impl WeaponComponent {
    /// Create a weapon with the given cooldown
    pub fn new(cooldown_duration: f32) -> Self {
        Self {
            cooldown_duration,
            ..Default::default()
        }
    }

    /// Builder pattern: set finite ammo
    pub fn with_ammo(mut self, ammo: u32) -> Self {
        self.ammo = Some(ammo);
        self
    }

    /// Builder pattern: set pellet count and spread
    pub fn with_spread(mut self, projectiles_per_shot: u32, spread_degrees: f32) -> Self {
        self.projectiles_per_shot = projectiles_per_shot.max(1);
        self.spread_degrees = spread_degrees;
        self
    }

    /// Builder pattern: enable homing pellets
    pub fn with_homing(mut self, strength: f32) -> Self {
        self.homing = true;
        self.homing_strength = strength;
        self
    }

    /// Whether the weapon is in the Ready state
    pub fn can_fire(&self) -> bool {
        self.cooldown_remaining <= 0.0 && self.ammo.map_or(true, |a| a > 0)
    }

    /// Attempt to fire: deducts ammo and starts the cooldown.
    ///
    /// Returns `false` with no side effects when on cooldown or out of ammo.
    pub fn try_fire(&mut self) -> bool {
        if !self.can_fire() {
            return false;
        }
        if let Some(ammo) = self.ammo {
            self.ammo = Some(ammo - 1);
        }
        self.cooldown_remaining = self.cooldown_duration;
        true
    }

    /// Decay the cooldown by one tick
    pub fn tick(&mut self, delta_time: f32) {
        if self.cooldown_remaining > 0.0 {
            self.cooldown_remaining -= delta_time;
        }
    }

    /// Total spread in radians
    pub fn spread_radians(&self) -> f32 {
        deg_to_rad(self.spread_degrees)
    }

    /// Restore default values (pool reuse)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Deterministic angular offsets for a multi-pellet fan, in radians.
///
/// Pellets are evenly spaced across the full spread, symmetric around the
/// aim direction: `offset(i) = i * spread/(n-1) - spread/2`. Single-pellet
/// weapons do not use this; their offset is drawn at random so they feel
/// inaccurate rather than patterned.
pub fn fan_offsets(count: u32, spread_radians: f32) -> Vec<f32> {
    debug_assert!(count >= 2, "fan offsets are defined for multi-pellet shots");
    let n = count.max(2);
    let step = spread_radians / (n - 1) as f32;
    (0..n)
        .map(|i| i as f32 * step - spread_radians / 2.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ready_by_default() {
        let w = WeaponComponent::default();
        assert!(w.can_fire());
    }

    #[test]
    fn test_fire_starts_cooldown() {
        let mut w = WeaponComponent::new(0.5);
        assert!(w.try_fire());
        assert!(!w.can_fire());
        assert_relative_eq!(w.cooldown_remaining, 0.5);
    }

    #[test]
    fn test_second_fire_within_cooldown_refused() {
        let mut w = WeaponComponent::new(0.5);
        assert!(w.try_fire());
        assert!(!w.try_fire());
    }

    #[test]
    fn test_cooldown_decays_to_ready() {
        let mut w = WeaponComponent::new(0.3);
        w.try_fire();
        for _ in 0..30 {
            w.tick(0.016);
        }
        assert!(w.can_fire());
    }

    #[test]
    fn test_ammo_deducted_and_exhausted() {
        let mut w = WeaponComponent::new(0.0).with_ammo(2);
        assert!(w.try_fire());
        assert!(w.try_fire());
        assert_eq!(w.ammo, Some(0));
        assert!(!w.try_fire());
    }

    #[test]
    fn test_infinite_ammo_never_exhausts() {
        let mut w = WeaponComponent::new(0.0);
        for _ in 0..100 {
            assert!(w.try_fire());
        }
        assert_eq!(w.ammo, None);
    }

    #[test]
    fn test_fan_offsets_symmetric_three_way() {
        let spread = deg_to_rad(30.0);
        let offsets = fan_offsets(3, spread);
        assert_eq!(offsets.len(), 3);
        assert_relative_eq!(offsets[0], deg_to_rad(-15.0), epsilon = 1e-6);
        assert_relative_eq!(offsets[1], 0.0, epsilon = 1e-6);
        assert_relative_eq!(offsets[2], deg_to_rad(15.0), epsilon = 1e-6);
    }

    #[test]
    fn test_fan_offsets_cover_full_spread() {
        let spread = deg_to_rad(40.0);
        let offsets = fan_offsets(5, spread);
        assert_relative_eq!(offsets[0], -spread / 2.0, epsilon = 1e-6);
        assert_relative_eq!(offsets[4], spread / 2.0, epsilon = 1e-6);
    }
}
