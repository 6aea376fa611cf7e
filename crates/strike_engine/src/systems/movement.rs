//! Velocity integration

use crate::ecs::{EntityId, Signature, System, TickCtx};

/// Applies drag, the speed limit, and velocity to every moving entity
#[derive(Debug, Default)]
pub struct MovementSystem;

impl System for MovementSystem {
    fn name(&self) -> &str {
        "movement"
    }

    fn signature(&self) -> Signature {
        Signature::TRANSFORM | Signature::MOVEMENT
    }

    fn priority(&self) -> i32 {
        10
    }

    fn process(&mut self, id: EntityId, ctx: &mut TickCtx<'_>) {
        let Some(entity) = ctx.registry.get_mut(id) else {
            return;
        };
        let components = &mut entity.components;
        if let (Some(movement), Some(transform)) =
            (components.movement.as_mut(), components.transform.as_mut())
        {
            movement.integrate(ctx.dt);
            transform.position += movement.position_delta(ctx.dt);
        }
    }
}
