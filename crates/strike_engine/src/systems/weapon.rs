//! Weapon firing
//!
//! Decays cooldowns and turns a held trigger into projectile entities. The
//! multi-pellet fan is deterministic; a lone pellet with nonzero spread gets
//! a random offset instead, so single-shot weapons read as inaccurate rather
//! than patterned.

use log::debug;
use rand::Rng;

use crate::ecs::components::weapon::fan_offsets;
use crate::ecs::components::{
    MovementComponent, ProjectileComponent, TransformComponent, VisualComponent,
};
use crate::ecs::{EntityConfig, EntityId, Signature, System, TickCtx};
use crate::events::GameEvent;
use crate::foundation::math::{utils, Vec3};

use super::PROJECTILE_POOL;

/// Mesh identifier stamped on every spawned pellet
const PROJECTILE_MESH: &str = "projectile";

/// Ticks weapon cooldowns and fires held triggers
#[derive(Debug, Default)]
pub struct WeaponSystem;

impl WeaponSystem {
    /// Owner and target side tags derived from the firer's tags
    fn side_tags(player: bool, enemy: bool) -> (&'static str, &'static str) {
        if player {
            ("player", "enemy")
        } else if enemy {
            ("enemy", "player")
        } else {
            ("", "")
        }
    }
}

impl System for WeaponSystem {
    fn name(&self) -> &str {
        "weapons"
    }

    fn signature(&self) -> Signature {
        Signature::TRANSFORM | Signature::WEAPON
    }

    fn priority(&self) -> i32 {
        20
    }

    fn process(&mut self, id: EntityId, ctx: &mut TickCtx<'_>) {
        // Cooldown decay and the firing decision; copy out everything pellet
        // construction needs so the registry borrow can be released.
        let (position, yaw, pellet_count, owner_tag, target_tag) = {
            let Some(entity) = ctx.registry.get_mut(id) else {
                return;
            };
            let (owner_tag, target_tag) =
                Self::side_tags(entity.has_tag("player"), entity.has_tag("enemy"));
            let components = &mut entity.components;
            let (Some(weapon), Some(transform)) =
                (components.weapon.as_mut(), components.transform.as_ref())
            else {
                return;
            };
            weapon.tick(ctx.dt);
            if !weapon.trigger || !weapon.can_fire() {
                return;
            }
            (
                transform.position,
                transform.rotation.y,
                weapon.projectiles_per_shot.max(1),
                owner_tag,
                target_tag,
            )
        };

        // Projectile cap: a shot that would exceed it is skipped outright,
        // with no ammo or cooldown spent.
        let live = ctx.registry.count_matching(Signature::PROJECTILE);
        if live + pellet_count as usize > ctx.config.max_projectiles {
            debug!("weapon on {id} skipped: projectile cap reached ({live} live)");
            return;
        }

        let weapon = {
            let Some(entity) = ctx.registry.get_mut(id) else {
                return;
            };
            let Some(weapon) = entity.components.weapon.as_mut() else {
                return;
            };
            if !weapon.try_fire() {
                return;
            }
            weapon.clone()
        };

        ctx.events.emit(&GameEvent::WeaponFired {
            owner: id,
            weapon: weapon.clone(),
        });

        let spread = weapon.spread_radians();
        let offsets = if pellet_count >= 2 {
            fan_offsets(pellet_count, spread)
        } else if spread > 0.0 {
            let half = spread / 2.0;
            vec![ctx.rng.gen_range(-half..=half)]
        } else {
            vec![0.0]
        };

        for offset in offsets {
            let aim = yaw + offset;
            let dir = utils::rotate_y(Vec3::new(0.0, 0.0, 1.0), aim);
            let muzzle = position + dir * ctx.config.projectile_standoff;
            let config = EntityConfig::new()
                .with_transform(TransformComponent::from_position(muzzle).with_yaw(aim))
                .with_movement(MovementComponent::with_velocity(
                    dir * weapon.projectile_speed,
                ))
                .with_projectile(ProjectileComponent::from_weapon(
                    &weapon, id, owner_tag, target_tag,
                ))
                .with_visual(
                    VisualComponent::new(PROJECTILE_MESH, weapon.projectile_size)
                        .with_color(weapon.projectile_color.clone()),
                )
                .with_pool_kind(PROJECTILE_POOL);

            let pellet = ctx
                .registry
                .spawn_from_pool(PROJECTILE_POOL, config.clone())
                .unwrap_or_else(|| ctx.registry.create(config));
            ctx.events.emit(&GameEvent::ProjectileCreated {
                owner: id,
                projectile: pellet,
            });
        }
    }
}
