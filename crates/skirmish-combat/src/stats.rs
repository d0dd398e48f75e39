//! Attribute and damage resolution.
//!
//! This module provides:
//! - The base stat block (HP/MP, attack, defense, speeds)
//! - The linear damage formula with critical multiplier
//! - Clamped healing
//!
//! The formula is a single-hit linear model:
//! `final = max(1, base + attacker_attack - defender_defense)`, multiplied
//! and rounded when the request is critical. Damage-over-time and status
//! stacks are out of scope; the request/result shapes leave room for them.

use serde::{Deserialize, Serialize};

/// Core attributes for a combat-capable entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Maximum hit points.
    pub max_hp: i32,
    /// Current hit points.
    pub hp: i32,
    /// Maximum mana points.
    pub max_mp: i32,
    /// Current mana points.
    pub mp: i32,
    /// Attack attribute, added on top of weapon base attack.
    pub attack: i32,
    /// Defense attribute, subtracted from incoming damage.
    pub defense: i32,
    /// Attacks per second multiplier.
    pub attack_speed: f32,
    /// Movement speed in world units per second.
    pub move_speed: f32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            max_hp: 100,
            hp: 100,
            max_mp: 50,
            mp: 50,
            attack: 10,
            defense: 5,
            attack_speed: 1.0,
            move_speed: 120.0,
        }
    }
}

impl Stats {
    /// Creates a stat block at full HP/MP.
    #[must_use]
    pub fn new(max_hp: i32, max_mp: i32, attack: i32, defense: i32) -> Self {
        Self {
            max_hp,
            hp: max_hp,
            max_mp,
            mp: max_mp,
            attack,
            defense,
            ..Default::default()
        }
    }

    /// Set attack speed.
    #[must_use]
    pub fn with_attack_speed(mut self, attack_speed: f32) -> Self {
        self.attack_speed = attack_speed;
        self
    }

    /// Set movement speed.
    #[must_use]
    pub fn with_move_speed(mut self, move_speed: f32) -> Self {
        self.move_speed = move_speed;
        self
    }

    /// Fraction of HP remaining (0.0-1.0).
    #[must_use]
    pub fn hp_percent(&self) -> f32 {
        if self.max_hp <= 0 {
            0.0
        } else {
            (self.hp as f32 / self.max_hp as f32).clamp(0.0, 1.0)
        }
    }
}

/// A single damage application request.
///
/// Transient value object: built by the attack path, consumed by the
/// resolver, never stored. Criticality is decided by the caller so the
/// core stays free of random state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageRequest {
    /// Base damage before attributes (weapon base attack or skill damage).
    pub base_damage: i32,
    /// Attacker's attack attribute.
    pub attacker_attack: i32,
    /// Whether this hit is critical.
    pub critical: bool,
    /// Critical damage multiplier.
    pub critical_mul: f32,
}

impl DamageRequest {
    /// Creates a non-critical request with the given base damage.
    #[must_use]
    pub fn new(base_damage: i32) -> Self {
        Self {
            base_damage,
            attacker_attack: 0,
            critical: false,
            critical_mul: 1.5,
        }
    }

    /// Adds the attacker's attack attribute.
    #[must_use]
    pub fn with_attacker_attack(mut self, attack: i32) -> Self {
        self.attacker_attack = attack;
        self
    }

    /// Marks the request as critical with the given multiplier.
    #[must_use]
    pub fn as_critical(mut self, multiplier: f32) -> Self {
        self.critical = true;
        self.critical_mul = multiplier.max(1.0);
        self
    }
}

/// Result of one damage application.
///
/// Consumed by presentation for floating damage text and death
/// transitions; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageResult {
    /// Damage actually dealt.
    pub final_damage: i32,
    /// Whether the hit was critical.
    pub critical: bool,
    /// HP before the hit.
    pub hp_before: i32,
    /// HP after the hit.
    pub hp_after: i32,
}

impl DamageResult {
    /// Whether this hit brought the target from alive to dead.
    #[must_use]
    pub fn is_lethal(&self) -> bool {
        self.hp_before > 0 && self.hp_after <= 0
    }
}

/// Owns one actor's hit-point pool and resolves damage against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSet {
    /// Current attribute values.
    stats: Stats,
}

impl Default for AttributeSet {
    fn default() -> Self {
        Self::new(Stats::default())
    }
}

impl AttributeSet {
    /// Creates an attribute set from a stat block.
    #[must_use]
    pub fn new(stats: Stats) -> Self {
        Self { stats }
    }

    /// Snapshot of the current stats.
    #[must_use]
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Whether HP has reached zero.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.stats.hp <= 0
    }

    /// Resolves a damage request against this actor's defense and HP pool.
    ///
    /// `final = max(1, base + attacker_attack - defense)`; critical hits
    /// multiply the floored value and round to nearest. HP is clamped to
    /// `[0, max_hp]`.
    pub fn apply_damage(&mut self, request: &DamageRequest) -> DamageResult {
        let hp_before = self.stats.hp;

        let mut damage =
            (request.base_damage + request.attacker_attack - self.stats.defense).max(1);
        if request.critical {
            damage = (damage as f32 * request.critical_mul).round() as i32;
        }

        self.stats.hp = (self.stats.hp - damage).clamp(0, self.stats.max_hp);

        let result = DamageResult {
            final_damage: damage,
            critical: request.critical,
            hp_before,
            hp_after: self.stats.hp,
        };
        debug_assert!(self.stats.hp >= 0 && self.stats.hp <= self.stats.max_hp);
        result
    }

    /// Restores HP, clamped to max. No effect when dead or `amount <= 0`.
    ///
    /// Returns `true` if HP changed.
    pub fn heal(&mut self, amount: i32) -> bool {
        if amount <= 0 || self.is_dead() {
            return false;
        }
        let before = self.stats.hp;
        self.stats.hp = (self.stats.hp + amount).clamp(0, self.stats.max_hp);
        self.stats.hp != before
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_final_damage_at_least_one(
            base in -1000i32..1000,
            attack in -1000i32..1000,
            defense in -1000i32..1000,
            critical in proptest::bool::ANY,
            multiplier in 1.0f32..4.0,
        ) {
            let mut attrs = AttributeSet::new(Stats::new(1000, 0, 0, defense));
            let mut request = DamageRequest::new(base).with_attacker_attack(attack);
            if critical {
                request = request.as_critical(multiplier);
            }

            let result = attrs.apply_damage(&request);
            prop_assert!(result.final_damage >= 1);
        }

        #[test]
        fn prop_hp_stays_in_range(
            damage_seq in proptest::collection::vec(0i32..500, 0..20),
        ) {
            let mut attrs = AttributeSet::new(Stats::new(100, 0, 0, 10));
            for base in damage_seq {
                attrs.apply_damage(&DamageRequest::new(base));
                let hp = attrs.stats().hp;
                prop_assert!((0..=100).contains(&hp));
            }
        }
    }
}
