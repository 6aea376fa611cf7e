//! Data-only components and the closed component-kind set
//!
//! Entity "types" are expressed purely by which components are attached,
//! never by subclassing. The set of component kinds is closed and resolved
//! at compile time through the [`Signature`] bitmask.

pub mod movement;
pub mod projectile;
pub mod transform;
pub mod visual;
pub mod weapon;

pub use movement::MovementComponent;
pub use projectile::ProjectileComponent;
pub use transform::TransformComponent;
pub use visual::VisualComponent;
pub use weapon::WeaponComponent;

use bitflags::bitflags;
use thiserror::Error;

bitflags! {
    /// Bitmask over the closed set of component kinds.
    ///
    /// Systems declare a required signature; an entity matches when its own
    /// signature is a superset of the system's.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Signature: u8 {
        /// Position, rotation, scale
        const TRANSFORM = 1 << 0;
        /// Velocity integration parameters
        const MOVEMENT = 1 << 1;
        /// Weapon firing state machine
        const WEAPON = 1 << 2;
        /// Projectile lifecycle and homing state
        const PROJECTILE = 1 << 3;
        /// Opaque rendering/collision pass-through
        const VISUAL = 1 << 4;
    }
}

/// A component instance tagged with its kind, used at entity creation
#[derive(Debug, Clone)]
pub enum Component {
    /// Spatial transform
    Transform(TransformComponent),
    /// Velocity and integration parameters
    Movement(MovementComponent),
    /// Weapon state machine
    Weapon(WeaponComponent),
    /// Projectile state
    Projectile(ProjectileComponent),
    /// Opaque visual/collider data
    Visual(VisualComponent),
}

impl Component {
    /// The signature bit this component occupies
    pub fn kind(&self) -> Signature {
        match self {
            Self::Transform(_) => Signature::TRANSFORM,
            Self::Movement(_) => Signature::MOVEMENT,
            Self::Weapon(_) => Signature::WEAPON,
            Self::Projectile(_) => Signature::PROJECTILE,
            Self::Visual(_) => Signature::VISUAL,
        }
    }
}

/// Raised when a component kind is registered twice on one entity.
///
/// This is a programmer error: strict builds assert, production callers log
/// and keep the original component.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("component {0:?} registered twice on the same entity")]
pub struct DuplicateComponent(pub Signature);

/// Dense per-entity component table: at most one instance per kind
#[derive(Debug, Clone, Default)]
pub struct ComponentTable {
    /// Spatial transform, if attached
    pub transform: Option<TransformComponent>,
    /// Movement state, if attached
    pub movement: Option<MovementComponent>,
    /// Weapon state, if attached
    pub weapon: Option<WeaponComponent>,
    /// Projectile state, if attached
    pub projectile: Option<ProjectileComponent>,
    /// Visual pass-through, if attached
    pub visual: Option<VisualComponent>,
}

impl ComponentTable {
    /// Signature derived from the currently attached components
    pub fn signature(&self) -> Signature {
        let mut sig = Signature::empty();
        sig.set(Signature::TRANSFORM, self.transform.is_some());
        sig.set(Signature::MOVEMENT, self.movement.is_some());
        sig.set(Signature::WEAPON, self.weapon.is_some());
        sig.set(Signature::PROJECTILE, self.projectile.is_some());
        sig.set(Signature::VISUAL, self.visual.is_some());
        sig
    }

    /// Attach a component; the slot for its kind must be empty
    pub fn insert(&mut self, component: Component) -> Result<(), DuplicateComponent> {
        let kind = component.kind();
        if self.signature().contains(kind) {
            return Err(DuplicateComponent(kind));
        }
        match component {
            Component::Transform(c) => self.transform = Some(c),
            Component::Movement(c) => self.movement = Some(c),
            Component::Weapon(c) => self.weapon = Some(c),
            Component::Projectile(c) => self.projectile = Some(c),
            Component::Visual(c) => self.visual = Some(c),
        }
        Ok(())
    }

    /// Reset every attached component to its default values.
    ///
    /// Used when an entity is returned to a recycle pool: the slots keep
    /// their kinds but lose all state.
    pub fn reset(&mut self) {
        if let Some(c) = &mut self.transform {
            c.reset();
        }
        if let Some(c) = &mut self.movement {
            c.reset();
        }
        if let Some(c) = &mut self.weapon {
            c.reset();
        }
        if let Some(c) = &mut self.projectile {
            c.reset();
        }
        if let Some(c) = &mut self.visual {
            c.reset();
        }
    }
}
