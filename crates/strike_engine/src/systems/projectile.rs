//! Projectile lifecycle and homing
//!
//! Ages every projectile, destroys expired or spent ones, and steers homing
//! pellets toward the nearest entity carrying their target tag. The steer
//! blend factor is a fixed per-tick fraction of `homing_strength`, not
//! dt-scaled; turn rate therefore varies with tick rate.

use crate::ecs::{EntityId, Signature, System, TickCtx};
use crate::foundation::math::{utils, Vec3};

/// Velocities below this magnitude carry no usable heading to blend from
const MIN_STEER_SPEED: f32 = 1e-4;

/// Ages, expires, and steers projectiles
#[derive(Debug, Default)]
pub struct ProjectileSystem;

impl ProjectileSystem {
    /// Nearest live target-tagged entity by planar distance; first found
    /// wins ties
    fn nearest_target(
        ctx: &TickCtx<'_>,
        from: Vec3,
        target_tag: &str,
    ) -> Option<(EntityId, Vec3)> {
        let mut best: Option<(EntityId, Vec3, f32)> = None;
        for &candidate in ctx.registry.tagged(target_tag) {
            let Some(entity) = ctx.registry.get(candidate) else {
                continue;
            };
            if !entity.processable() {
                continue;
            }
            let Some(transform) = entity.components.transform.as_ref() else {
                continue;
            };
            let dist_sq = utils::planar_distance_sq(from, transform.position);
            if best.as_ref().map_or(true, |(_, _, d)| dist_sq < *d) {
                best = Some((candidate, transform.position, dist_sq));
            }
        }
        best.map(|(id, position, _)| (id, position))
    }

    /// Cached target position if it is still live and still a valid target
    fn revalidate(
        ctx: &TickCtx<'_>,
        cached: Option<EntityId>,
        target_tag: &str,
    ) -> Option<(EntityId, Vec3)> {
        let id = cached?;
        let entity = ctx.registry.get(id)?;
        if !entity.processable() || !entity.has_tag(target_tag) {
            return None;
        }
        let transform = entity.components.transform.as_ref()?;
        Some((id, transform.position))
    }
}

impl System for ProjectileSystem {
    fn name(&self) -> &str {
        "projectiles"
    }

    fn signature(&self) -> Signature {
        Signature::TRANSFORM | Signature::MOVEMENT | Signature::PROJECTILE
    }

    fn priority(&self) -> i32 {
        30
    }

    fn process(&mut self, id: EntityId, ctx: &mut TickCtx<'_>) {
        // Age, expire, and copy out the homing inputs under one borrow.
        let (position, velocity, speed, target_tag, cached, strength) = {
            let Some(entity) = ctx.registry.get_mut(id) else {
                return;
            };
            let components = &mut entity.components;
            let (Some(projectile), Some(transform), Some(movement)) = (
                components.projectile.as_mut(),
                components.transform.as_ref(),
                components.movement.as_ref(),
            ) else {
                return;
            };
            projectile.age += ctx.dt;
            if projectile.expired() {
                ctx.registry.destroy(id);
                return;
            }
            if !projectile.homing {
                return;
            }
            (
                transform.position,
                movement.velocity,
                movement.speed,
                projectile.target_tag.clone(),
                projectile.target,
                projectile.homing_strength,
            )
        };

        let current_speed = velocity.magnitude();
        if current_speed < MIN_STEER_SPEED {
            return;
        }

        let target = Self::revalidate(ctx, cached, &target_tag)
            .or_else(|| Self::nearest_target(ctx, position, &target_tag));
        let Some((target_id, target_pos)) = target else {
            // No candidates: forget the stale cache and fly straight.
            if cached.is_some() {
                if let Some(entity) = ctx.registry.get_mut(id) {
                    if let Some(projectile) = entity.components.projectile.as_mut() {
                        projectile.target = None;
                    }
                }
            }
            return;
        };

        let bearing = target_pos - position;
        if bearing.magnitude() < MIN_STEER_SPEED {
            return;
        }
        let bearing = bearing.normalize();
        let heading = velocity / current_speed;

        // Fixed per-tick blend; strength 10 and up snaps straight onto the
        // bearing.
        let blend = (strength * 0.1).min(1.0);
        let steered = heading.lerp(&bearing, blend);
        if steered.magnitude() < MIN_STEER_SPEED {
            return;
        }
        let cruise = if speed > 0.0 { speed } else { current_speed };
        let new_velocity = steered.normalize() * cruise;

        if let Some(entity) = ctx.registry.get_mut(id) {
            let components = &mut entity.components;
            if let Some(movement) = components.movement.as_mut() {
                movement.velocity = new_velocity;
            }
            if let Some(projectile) = components.projectile.as_mut() {
                projectile.target = Some(target_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::ecs::components::{
        MovementComponent, ProjectileComponent, TransformComponent, WeaponComponent,
    };
    use crate::ecs::{Entity, EntityConfig, EntityRegistry, Scheduler};
    use crate::events::EventBus;
    use crate::spatial::SpatialGrid;
    use crate::visibility::VisibilityGate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Angle in radians between an entity's velocity and the bearing to a
    /// point
    fn angular_error(entity: &Entity, target: Vec3) -> f32 {
        let transform = entity.components.transform.as_ref().unwrap();
        let movement = entity.components.movement.as_ref().unwrap();
        let bearing = (target - transform.position).normalize();
        movement
            .velocity
            .normalize()
            .dot(&bearing)
            .clamp(-1.0, 1.0)
            .acos()
    }

    fn run_projectiles(registry: &mut EntityRegistry, dt: f32) {
        let mut scheduler = Scheduler::new();
        scheduler.register(Box::new(ProjectileSystem)).unwrap();
        let grid = SpatialGrid::new(4.0);
        let gate = VisibilityGate::new();
        let mut events = EventBus::new();
        let mut rng = StdRng::seed_from_u64(1);
        let config = SimConfig::default();
        let mut ctx = TickCtx {
            dt,
            registry,
            grid: &grid,
            gate: &gate,
            events: &mut events,
            rng: &mut rng,
            config: &config,
        };
        scheduler.run(&mut ctx);
    }

    fn pellet(weapon: &WeaponComponent, velocity: Vec3) -> EntityConfig {
        EntityConfig::new()
            .with_transform(TransformComponent::identity())
            .with_movement(MovementComponent::with_velocity(velocity))
            .with_projectile(ProjectileComponent::from_weapon(
                weapon,
                EntityId::default(),
                "player",
                "enemy",
            ))
    }

    fn enemy_at(position: Vec3) -> EntityConfig {
        EntityConfig::new()
            .with_transform(TransformComponent::from_position(position))
            .with_tag("enemy")
    }

    #[test]
    fn test_expiry_destroys_after_sweep() {
        let mut registry = EntityRegistry::new();
        let weapon = WeaponComponent {
            projectile_lifetime: 0.1,
            ..Default::default()
        };
        let id = registry.create(pellet(&weapon, Vec3::new(0.0, 0.0, 10.0)));

        run_projectiles(&mut registry, 0.05);
        assert!(registry.get(id).unwrap().processable());

        run_projectiles(&mut registry, 0.06);
        // Marked this tick; gone after the sweep.
        assert!(!registry.get(id).unwrap().processable());
        registry.sweep();
        assert!(registry.get(id).is_none());
    }

    #[test]
    fn test_hit_flag_destroys() {
        let mut registry = EntityRegistry::new();
        let weapon = WeaponComponent::default();
        let id = registry.create(pellet(&weapon, Vec3::new(0.0, 0.0, 10.0)));
        registry
            .get_mut(id)
            .unwrap()
            .components
            .projectile
            .as_mut()
            .unwrap()
            .has_hit = true;

        run_projectiles(&mut registry, 0.016);
        assert!(!registry.get(id).unwrap().processable());
    }

    #[test]
    fn test_non_homing_flies_straight() {
        let mut registry = EntityRegistry::new();
        let weapon = WeaponComponent::default();
        let id = registry.create(pellet(&weapon, Vec3::new(0.0, 0.0, 10.0)));
        registry.create(enemy_at(Vec3::new(50.0, 0.0, 0.0)));

        run_projectiles(&mut registry, 0.016);
        let velocity = registry.get(id).unwrap().components.movement.as_ref().unwrap().velocity;
        assert_eq!(velocity, Vec3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn test_homing_error_is_non_increasing() {
        let mut registry = EntityRegistry::new();
        let weapon = WeaponComponent::default().with_homing(2.0);
        // Launch perpendicular to the bearing so there is error to burn off.
        let id = registry.create(pellet(&weapon, Vec3::new(0.0, 0.0, 20.0)));
        let target = Vec3::new(50.0, 0.0, 0.0);
        registry.create(enemy_at(target));

        let mut last = angular_error(registry.get(id).unwrap(), target);
        assert!(last > 1.0, "setup should start well off-bearing");
        for _ in 0..20 {
            run_projectiles(&mut registry, 0.016);
            let error = angular_error(registry.get(id).unwrap(), target);
            assert!(error <= last + 1e-5, "error grew from {last} to {error}");
            last = error;
        }
        assert!(last < 0.2, "twenty steers should nearly close the error");
    }

    #[test]
    fn test_homing_picks_nearest_and_caches() {
        let mut registry = EntityRegistry::new();
        let weapon = WeaponComponent::default().with_homing(1.0);
        let id = registry.create(pellet(&weapon, Vec3::new(0.0, 0.0, 20.0)));
        let near = registry.create(enemy_at(Vec3::new(10.0, 0.0, 0.0)));
        let _far = registry.create(enemy_at(Vec3::new(40.0, 0.0, 0.0)));

        run_projectiles(&mut registry, 0.016);
        let projectile = registry.get(id).unwrap().components.projectile.as_ref().unwrap();
        assert_eq!(projectile.target, Some(near));
    }

    #[test]
    fn test_dead_cached_target_is_replaced() {
        let mut registry = EntityRegistry::new();
        let weapon = WeaponComponent::default().with_homing(1.0);
        let id = registry.create(pellet(&weapon, Vec3::new(0.0, 0.0, 20.0)));
        let first = registry.create(enemy_at(Vec3::new(10.0, 0.0, 0.0)));
        let second = registry.create(enemy_at(Vec3::new(40.0, 0.0, 0.0)));

        run_projectiles(&mut registry, 0.016);
        registry.destroy(first);
        registry.sweep();

        run_projectiles(&mut registry, 0.016);
        let projectile = registry.get(id).unwrap().components.projectile.as_ref().unwrap();
        assert_eq!(projectile.target, Some(second));
    }

    #[test]
    fn test_homing_speed_stays_configured() {
        let mut registry = EntityRegistry::new();
        let weapon = WeaponComponent {
            projectile_speed: 20.0,
            ..Default::default()
        }
        .with_homing(3.0);
        let id = registry.create(pellet(&weapon, Vec3::new(0.0, 0.0, 20.0)));
        registry.create(enemy_at(Vec3::new(30.0, 0.0, 0.0)));

        for _ in 0..5 {
            run_projectiles(&mut registry, 0.016);
        }
        let speed = registry
            .get(id)
            .unwrap()
            .components
            .movement
            .as_ref()
            .unwrap()
            .velocity
            .magnitude();
        assert!((speed - 20.0).abs() < 1e-3);
    }
}
