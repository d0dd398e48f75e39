//! Registry of live combat-capable entities.
//!
//! The registry is the single source of truth for "who can be targeted
//! right now". Gameplay code registers an entity on creation and
//! unregisters it on destruction or death; that pair is the registry's
//! only lifecycle contract. Range strategies and the collision resolver
//! query it through copy-on-read snapshots, so a snapshot stays valid
//! while the registry is mutated elsewhere.
//!
//! There is no global instance: the host constructs one registry per
//! combat scene and passes it into every consumer.

use std::collections::HashMap;

use glam::Vec2;
use parking_lot::RwLock;
use tracing::{debug, trace};

use skirmish_common::{CombatError, CombatResult, EntityId};

use crate::collision::Collider;
use crate::events::{CombatEvent, EventBus};
use crate::stats::{AttributeSet, DamageRequest, DamageResult, Stats};

/// Default length of the invulnerability window armed after a damaging
/// hit, in seconds.
pub const DEFAULT_HIT_INVINCIBILITY: f32 = 0.2;

/// Registry-owned combat state for one entity.
#[derive(Debug, Clone)]
pub struct Combatant {
    /// Entity identifier.
    pub id: EntityId,
    /// Position in world units.
    pub position: Vec2,
    /// Collision box, offset from the position.
    pub collider: Collider,
    /// Hit points and combat attributes.
    pub attributes: AttributeSet,
    /// Remaining invulnerability, ticked down by [`EntityRegistry::update`].
    pub invincible_remaining: f32,
    /// Invulnerability window armed after each damaging hit.
    pub hit_invincibility: f32,
}

impl Combatant {
    /// Creates a combatant with the default collider and hit window.
    #[must_use]
    pub fn new(id: EntityId, position: Vec2, stats: Stats) -> Self {
        Self {
            id,
            position,
            collider: Collider::default(),
            attributes: AttributeSet::new(stats),
            invincible_remaining: 0.0,
            hit_invincibility: DEFAULT_HIT_INVINCIBILITY,
        }
    }

    /// Set the collision box.
    #[must_use]
    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.collider = collider;
        self
    }

    /// Set the post-hit invulnerability window (0 disables it).
    #[must_use]
    pub fn with_hit_invincibility(mut self, window: f32) -> Self {
        self.hit_invincibility = window.max(0.0);
        self
    }

    /// Alive and not currently invulnerable.
    #[must_use]
    pub fn is_attackable(&self) -> bool {
        !self.attributes.is_dead() && self.invincible_remaining <= 0.0
    }
}

/// Value snapshot of a targetable entity, safe to hold across registry
/// mutations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSnapshot {
    /// Entity identifier.
    pub id: EntityId,
    /// Position at snapshot time.
    pub position: Vec2,
    /// Collision box at snapshot time.
    pub collider: Collider,
}

/// Shared registry of all combat-capable entities in a scene.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    /// Registered combatants by ID.
    entries: RwLock<HashMap<EntityId, Combatant>>,
}

impl EntityRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a combatant. Idempotent: an already-registered ID keeps
    /// its existing entry. Returns `true` if the entry was added.
    pub fn register(&self, combatant: Combatant) -> bool {
        let mut entries = self.entries.write();
        if entries.contains_key(&combatant.id) {
            return false;
        }
        debug!(id = combatant.id.raw(), "entity registered");
        entries.insert(combatant.id, combatant);
        true
    }

    /// Removes a combatant. No-op for unknown IDs. Returns `true` if an
    /// entry was removed.
    pub fn unregister(&self, id: EntityId) -> bool {
        let removed = self.entries.write().remove(&id).is_some();
        if removed {
            debug!(id = id.raw(), "entity unregistered");
        }
        removed
    }

    /// Whether the ID is registered (alive or not).
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entries.read().contains_key(&id)
    }

    /// Number of registered entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Removes every entry (scene teardown).
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Copy-on-read snapshot of every currently-attackable entity.
    ///
    /// No ordering guarantee. Entities that fail `is_attackable` at query
    /// time are excluded.
    #[must_use]
    pub fn snapshot(&self) -> Vec<TargetSnapshot> {
        self.entries
            .read()
            .values()
            .filter(|c| c.is_attackable())
            .map(|c| TargetSnapshot {
                id: c.id,
                position: c.position,
                collider: c.collider,
            })
            .collect()
    }

    /// Position of a registered entity.
    pub fn position(&self, id: EntityId) -> CombatResult<Vec2> {
        self.entries
            .read()
            .get(&id)
            .map(|c| c.position)
            .ok_or(CombatError::EntityNotFound(id))
    }

    /// Moves a registered entity.
    ///
    /// Callers are expected to have routed the target position through the
    /// collision resolver first.
    pub fn set_position(&self, id: EntityId, position: Vec2) -> CombatResult<()> {
        let mut entries = self.entries.write();
        let combatant = entries.get_mut(&id).ok_or(CombatError::EntityNotFound(id))?;
        combatant.position = position;
        Ok(())
    }

    /// Collider of a registered entity.
    pub fn collider(&self, id: EntityId) -> CombatResult<Collider> {
        self.entries
            .read()
            .get(&id)
            .map(|c| c.collider)
            .ok_or(CombatError::EntityNotFound(id))
    }

    /// Stat snapshot of a registered entity.
    pub fn stats(&self, id: EntityId) -> CombatResult<Stats> {
        self.entries
            .read()
            .get(&id)
            .map(|c| c.attributes.stats())
            .ok_or(CombatError::EntityNotFound(id))
    }

    /// Whether the entity is registered and currently attackable.
    #[must_use]
    pub fn is_attackable(&self, id: EntityId) -> bool {
        self.entries
            .read()
            .get(&id)
            .is_some_and(Combatant::is_attackable)
    }

    /// Resolves a damage request against a registered entity.
    ///
    /// Returns `Ok(None)` when the target exists but is not attackable
    /// (dead or invulnerable) - an advisory no-op, no events fire. On a
    /// resolved hit, `StatsChanged` and `DamageResolved` (and `Defeated`
    /// on a lethal hit) are published before this returns, and the
    /// post-hit invulnerability window is armed.
    pub fn apply_damage(
        &self,
        id: EntityId,
        request: &DamageRequest,
        events: &EventBus,
    ) -> CombatResult<Option<DamageResult>> {
        let (result, stats) = {
            let mut entries = self.entries.write();
            let combatant = entries.get_mut(&id).ok_or(CombatError::EntityNotFound(id))?;
            if !combatant.is_attackable() {
                return Ok(None);
            }

            let result = combatant.attributes.apply_damage(request);
            if result.final_damage > 0 {
                combatant.invincible_remaining = combatant.hit_invincibility;
            }
            (result, combatant.attributes.stats())
        };

        trace!(
            id = id.raw(),
            damage = result.final_damage,
            hp = result.hp_after,
            "damage resolved"
        );
        events.publish(CombatEvent::StatsChanged {
            entity_id: id,
            stats,
        });
        events.publish(CombatEvent::DamageResolved {
            entity_id: id,
            result,
        });
        if result.is_lethal() {
            debug!(id = id.raw(), "entity defeated");
            events.publish(CombatEvent::Defeated { entity_id: id });
        }
        Ok(Some(result))
    }

    /// Heals a registered entity, publishing `StatsChanged` if HP moved.
    pub fn heal(&self, id: EntityId, amount: i32, events: &EventBus) -> CombatResult<()> {
        let stats = {
            let mut entries = self.entries.write();
            let combatant = entries.get_mut(&id).ok_or(CombatError::EntityNotFound(id))?;
            if !combatant.attributes.heal(amount) {
                return Ok(());
            }
            combatant.attributes.stats()
        };

        events.publish(CombatEvent::StatsChanged {
            entity_id: id,
            stats,
        });
        Ok(())
    }

    /// Ticks every invulnerability countdown by the frame delta.
    pub fn update(&self, dt: f32) {
        let mut entries = self.entries.write();
        for combatant in entries.values_mut() {
            if combatant.invincible_remaining > 0.0 {
                combatant.invincible_remaining = (combatant.invincible_remaining - dt).max(0.0);
            }
        }
    }
}
