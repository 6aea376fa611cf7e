//! Headless skirmish demo
//!
//! Spawns a player turret surrounded by a wave of chasing enemies, runs the
//! simulation for a fixed number of ticks, and logs what happened. No
//! renderer: the per-tick snapshot is exactly what one would consume.

use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use strike_engine::foundation::math::utils;
use strike_engine::prelude::*;

const TICK_RATE: f32 = 1.0 / 60.0;
const RUN_TICKS: u32 = 600;
const WAVE_SIZE: u32 = 8;
const WAVE_RADIUS: f32 = 25.0;
const CHASE_SPEED: f32 = 4.0;

/// Shot counters shared between the event handlers and the summary
#[derive(Default)]
struct ShotLog {
    fired: u32,
    created: u32,
}

/// Logs weapon and projectile events and tallies them
struct ShotLogger {
    log: Rc<RefCell<ShotLog>>,
}

impl EventHandler for ShotLogger {
    fn on_event(&mut self, event: &GameEvent) -> bool {
        match event {
            GameEvent::WeaponFired { owner, weapon } => {
                self.log.borrow_mut().fired += 1;
                debug!("entity {owner} fired (ammo: {:?})", weapon.ammo);
            }
            GameEvent::ProjectileCreated { projectile, .. } => {
                self.log.borrow_mut().created += 1;
                debug!("projectile {projectile} spawned");
            }
        }
        false
    }
}

/// Steers enemies toward the player, skipping enemies the camera cannot see
struct ChaseSystem;

impl System for ChaseSystem {
    fn name(&self) -> &str {
        "chase"
    }

    fn signature(&self) -> Signature {
        Signature::TRANSFORM | Signature::MOVEMENT
    }

    fn priority(&self) -> i32 {
        15
    }

    fn process(&mut self, id: EntityId, ctx: &mut TickCtx<'_>) {
        let position = {
            let Some(entity) = ctx.registry.get(id) else {
                return;
            };
            if !entity.has_tag("enemy") {
                return;
            }
            let Some(transform) = entity.components.transform.as_ref() else {
                return;
            };
            let radius = entity.components.visual.as_ref().map_or(1.0, |v| v.size);
            if !ctx
                .gate
                .should_update(entity, transform.position, radius, 0.0)
            {
                return;
            }
            transform.position
        };

        // Broadphase through the grid, exact planar check on the candidates.
        let target = ctx
            .grid
            .query(position.x, position.z, WAVE_RADIUS * 2.0)
            .into_iter()
            .filter(|&c| {
                ctx.registry
                    .get(c)
                    .is_some_and(|e| e.processable() && e.has_tag("player"))
            })
            .min_by(|&a, &b| {
                let da = utils::planar_distance_sq(position, position_of(ctx, a));
                let db = utils::planar_distance_sq(position, position_of(ctx, b));
                da.total_cmp(&db)
            });

        let Some(target) = target else { return };
        let bearing = position_of(ctx, target) - position;
        if bearing.magnitude() < 1e-4 {
            return;
        }
        if let Some(entity) = ctx.registry.get_mut(id) {
            if let Some(movement) = entity.components.movement.as_mut() {
                movement.velocity = bearing.normalize() * CHASE_SPEED;
            }
        }
    }
}

fn position_of(ctx: &TickCtx<'_>, id: EntityId) -> Vec3 {
    ctx.registry
        .get(id)
        .and_then(|e| e.components.transform.as_ref())
        .map_or(Vec3::zeros(), |t| t.position)
}

fn spawn_player(sim: &mut Simulation) -> EntityId {
    sim.spawn(
        EntityConfig::new()
            .with_transform(TransformComponent::identity())
            .with_weapon(
                WeaponComponent {
                    trigger: true,
                    cooldown_duration: 0.4,
                    projectile_lifetime: 3.0,
                    ..Default::default()
                }
                .with_spread(3, 20.0)
                .with_homing(2.0),
            )
            .with_visual(VisualComponent::new("turret", 1.5).with_color("#44ccff"))
            .with_tag("player")
            .with_always_update(),
    )
}

fn spawn_wave(sim: &mut Simulation, rng: &mut StdRng) {
    for i in 0..WAVE_SIZE {
        let angle = utils::deg_to_rad(360.0 * i as f32 / WAVE_SIZE as f32);
        let radius = WAVE_RADIUS + rng.gen_range(-4.0..4.0);
        let position = Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius);
        sim.spawn(
            EntityConfig::new()
                .with_transform(TransformComponent::from_position(position))
                .with_movement(MovementComponent::new().with_max_speed(CHASE_SPEED))
                .with_visual(VisualComponent::new("raider", 1.0).with_color("#ff5533"))
                .with_tag("enemy"),
        );
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    strike_engine::foundation::logging::init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::from_file(path)?,
        None => SimConfig::default(),
    };
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut sim = Simulation::new(config);
    sim.register_system(Box::new(ChaseSystem))?;

    let shots = Rc::new(RefCell::new(ShotLog::default()));
    sim.register_event_handler(
        GameEventKind::WeaponFired,
        Box::new(ShotLogger {
            log: Rc::clone(&shots),
        }),
    );
    sim.register_event_handler(
        GameEventKind::ProjectileCreated,
        Box::new(ShotLogger {
            log: Rc::clone(&shots),
        }),
    );

    spawn_player(&mut sim);
    spawn_wave(&mut sim, &mut rng);
    info!("skirmish start: {} entities", sim.registry().len());

    let mut timer = Timer::new();
    for tick in 1..=RUN_TICKS {
        timer.update();
        sim.tick(TICK_RATE);
        if tick % 120 == 0 {
            let stats = sim.stats();
            info!(
                "tick {}: {} entities, last tick took {:?}",
                stats.tick, stats.entities, stats.duration
            );
        }
    }

    let shots = shots.borrow();
    info!(
        "skirmish over: {} ticks ({:.2}s real), {} shots, {} projectiles, {} entities on screen",
        sim.tick_count(),
        timer.total_time(),
        shots.fired,
        shots.created,
        sim.snapshot().len()
    );
    Ok(())
}
