//! Projectile component
//!
//! Carries lifecycle and targeting state for an in-flight pellet. Straight
//! pellets only age; homing pellets additionally track a target entity.

use crate::ecs::entity::EntityId;

use super::WeaponComponent;

/// Projectile lifecycle and homing state
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileComponent {
    /// Seconds since launch
    pub age: f32,
    /// Seconds before self-destruction
    pub lifetime: f32,
    /// Damage applied by the collision collaborator
    pub damage: f32,
    /// Entity that fired this projectile
    pub owner: EntityId,
    /// Tag of the firing side (`player` / `enemy`)
    pub owner_tag: String,
    /// Tag this projectile seeks and damages
    pub target_tag: String,
    /// Cached homing target; revalidated every tick
    pub target: Option<EntityId>,
    /// Whether this projectile steers toward its target
    pub homing: bool,
    /// Steering strength when homing
    pub homing_strength: f32,
    /// Set by the external collision collaborator on impact
    pub has_hit: bool,
    /// Survives its first hit
    pub piercing: bool,
    /// Detonates on expiry/hit
    pub explosive: bool,
    /// Detonation radius
    pub explosion_radius: f32,
}

impl ProjectileComponent {
    /// Copy projectile parameters from the firing weapon
    pub fn from_weapon(
        weapon: &WeaponComponent,
        owner: EntityId,
        owner_tag: impl Into<String>,
        target_tag: impl Into<String>,
    ) -> Self {
        Self {
            age: 0.0,
            lifetime: weapon.projectile_lifetime,
            damage: weapon.damage,
            owner,
            owner_tag: owner_tag.into(),
            target_tag: target_tag.into(),
            target: None,
            homing: weapon.homing,
            homing_strength: weapon.homing_strength,
            has_hit: false,
            piercing: weapon.piercing,
            explosive: weapon.explosive,
            explosion_radius: weapon.explosion_radius,
        }
    }

    /// Whether this projectile should be destroyed this tick
    pub fn expired(&self) -> bool {
        self.age >= self.lifetime || self.has_hit
    }

    /// Restore default values (pool reuse)
    pub fn reset(&mut self) {
        self.age = 0.0;
        self.lifetime = 0.0;
        self.damage = 0.0;
        self.owner = EntityId::default();
        self.owner_tag.clear();
        self.target_tag.clear();
        self.target = None;
        self.homing = false;
        self.homing_strength = 0.0;
        self.has_hit = false;
        self.piercing = false;
        self.explosive = false;
        self.explosion_radius = 0.0;
    }
}
