//! Domain event bus
//!
//! Chain-of-responsibility dispatch: handlers register per event kind, a
//! handler returning `true` consumes the event and stops forwarding.
//! Dispatch is synchronous and inline at the emission site; there is no
//! deferred queue, so a handler observes the world exactly as the emitting
//! system left it.

use std::collections::HashMap;

use crate::ecs::components::WeaponComponent;
use crate::ecs::EntityId;

/// Event kind, used as the handler registration key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEventKind {
    /// A weapon completed a firing attempt
    WeaponFired,
    /// A projectile entity entered the world
    ProjectileCreated,
}

/// A gameplay event with its payload
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// A weapon fired; `weapon` is a copy of its state at fire time
    WeaponFired {
        /// Entity that owns the weapon
        owner: EntityId,
        /// Weapon state after the shot was deducted
        weapon: WeaponComponent,
    },
    /// A projectile entity was spawned
    ProjectileCreated {
        /// Entity that fired it
        owner: EntityId,
        /// The new projectile entity
        projectile: EntityId,
    },
}

impl GameEvent {
    /// Registration key for this event
    pub fn kind(&self) -> GameEventKind {
        match self {
            Self::WeaponFired { .. } => GameEventKind::WeaponFired,
            Self::ProjectileCreated { .. } => GameEventKind::ProjectileCreated,
        }
    }
}

/// Receives events of the kinds it registered for
pub trait EventHandler {
    /// Handle one event; return `true` to consume it and stop forwarding
    fn on_event(&mut self, event: &GameEvent) -> bool;
}

/// Per-kind handler registry with immediate dispatch
#[derive(Default)]
pub struct EventBus {
    handlers: HashMap<GameEventKind, Vec<Box<dyn EventHandler>>>,
}

impl EventBus {
    /// Create a bus with no handlers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one event kind; handlers run in
    /// registration order
    pub fn register_handler(&mut self, kind: GameEventKind, handler: Box<dyn EventHandler>) {
        self.handlers.entry(kind).or_default().push(handler);
    }

    /// Dispatch an event to its kind's handler chain, stopping at the
    /// first handler that consumes it. No-op when nothing is registered.
    pub fn emit(&mut self, event: &GameEvent) {
        if let Some(chain) = self.handlers.get_mut(&event.kind()) {
            for handler in chain.iter_mut() {
                if handler.on_event(event) {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Counter {
        hits: Rc<RefCell<u32>>,
        consume: bool,
    }

    impl EventHandler for Counter {
        fn on_event(&mut self, _event: &GameEvent) -> bool {
            *self.hits.borrow_mut() += 1;
            self.consume
        }
    }

    fn fired_event() -> GameEvent {
        GameEvent::WeaponFired {
            owner: EntityId::default(),
            weapon: WeaponComponent::new(0.5),
        }
    }

    #[test]
    fn test_emit_without_handlers_is_noop() {
        let mut bus = EventBus::new();
        bus.emit(&fired_event());
    }

    #[test]
    fn test_handlers_only_see_registered_kind() {
        let mut bus = EventBus::new();
        let hits = Rc::new(RefCell::new(0));
        bus.register_handler(
            GameEventKind::ProjectileCreated,
            Box::new(Counter {
                hits: Rc::clone(&hits),
                consume: false,
            }),
        );
        bus.emit(&fired_event());
        assert_eq!(*hits.borrow(), 0);
        bus.emit(&GameEvent::ProjectileCreated {
            owner: EntityId::default(),
            projectile: EntityId::default(),
        });
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_consuming_handler_stops_the_chain() {
        let mut bus = EventBus::new();
        let first = Rc::new(RefCell::new(0));
        let second = Rc::new(RefCell::new(0));
        bus.register_handler(
            GameEventKind::WeaponFired,
            Box::new(Counter {
                hits: Rc::clone(&first),
                consume: true,
            }),
        );
        bus.register_handler(
            GameEventKind::WeaponFired,
            Box::new(Counter {
                hits: Rc::clone(&second),
                consume: false,
            }),
        );
        bus.emit(&fired_event());
        assert_eq!(*first.borrow(), 1);
        assert_eq!(*second.borrow(), 0);
    }
}
