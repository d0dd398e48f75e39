//! Event bus for outbound combat notifications.
//!
//! The core publishes every observable state change here: stat updates,
//! resolved damage, defeats, and skill impacts. The presentation layer
//! drains the bus once per frame to drive HP bars, floating combat text,
//! death transitions, and projectile spawning. Publication is synchronous:
//! an event is on the bus before the call that caused it returns, so a
//! consumer never observes a stale HP value after the fact.

use crossbeam_channel::{bounded, Receiver, Sender};
use serde::{Deserialize, Serialize};

use skirmish_common::{EntityId, SkillId};

use crate::stats::{DamageResult, Stats};

/// Event types emitted by the combat core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// An entity's stat block changed (damage, heal).
    StatsChanged {
        /// Affected entity
        entity_id: EntityId,
        /// Snapshot of the stats after the change
        stats: Stats,
    },
    /// A damage application resolved against an entity.
    DamageResolved {
        /// Entity that took the damage
        entity_id: EntityId,
        /// Full damage record (pre/post HP, final damage, critical flag)
        result: DamageResult,
    },
    /// An entity's HP reached zero.
    Defeated {
        /// Defeated entity
        entity_id: EntityId,
    },
    /// A skill cast completed its cast phase and takes effect now.
    ///
    /// This is the single integration point for applying skill damage,
    /// spawning projectiles, or resolving area effects.
    SkillImpact {
        /// Casting entity
        caster: EntityId,
        /// Skill that fired
        skill: SkillId,
        /// Base damage configured for the skill
        base_damage: i32,
    },
}

/// Event bus broadcasting combat events to the host.
#[derive(Debug)]
pub struct EventBus {
    /// Sender for publishing events
    sender: Sender<CombatEvent>,
    /// Receiver for collecting events
    receiver: Receiver<CombatEvent>,
    /// Channel capacity
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl EventBus {
    /// Creates a new event bus with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// Publishes an event to the bus.
    pub fn publish(&self, event: CombatEvent) {
        // Non-blocking send - if full, event is dropped
        let _ = self.sender.try_send(event);
    }

    /// Drains all pending events.
    pub fn drain(&self) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }

    /// Returns the number of pending events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Returns the channel capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Creates a new sender handle for publishing events.
    #[must_use]
    pub fn sender(&self) -> Sender<CombatEvent> {
        self.sender.clone()
    }
}
