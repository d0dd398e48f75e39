//! Attack styles: named on-hit behaviors bound to a range shape.
//!
//! A style pairs one [`RangeStrategy`] with its timing (cooldown and
//! post-attack stiffness) and the damage-application step. Styles are
//! stateless; all per-actor timing lives in the cooldown manager and the
//! character. Adding a style means adding an implementation and a
//! [`StyleKind`] tag, never touching existing ones.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

use skirmish_common::EntityId;

use crate::events::EventBus;
use crate::range::{CircleRange, RangeStrategy, RectangleRange, SectorRange};
use crate::registry::EntityRegistry;
use crate::stats::{DamageRequest, DamageResult};
use crate::weapon::Weapon;

/// Tag identifying an attack style (weapon-to-style binding key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleKind {
    /// Forward slash (knife/sword).
    Slash,
    /// Wide-arc swing (knife/axe/hammer).
    Swing,
    /// Forward thrust (spear/sword).
    Stab,
    /// Ground smash (hammer).
    Smash,
}

/// Everything a style needs to resolve one strike.
///
/// Borrowed for the duration of a single `execute` call; positions and
/// directions are plain values.
#[derive(Debug)]
pub struct StrikeContext<'a> {
    /// Registry to query for targets and apply damage through.
    pub registry: &'a EntityRegistry,
    /// Bus receiving the resulting combat events.
    pub events: &'a EventBus,
    /// Acting entity (never hit by its own strike).
    pub attacker: EntityId,
    /// Attacker position, the range origin.
    pub origin: Vec2,
    /// Attacker's attack attribute, added to weapon base attack.
    pub attacker_attack: i32,
    /// Requested attack direction.
    pub direction: Vec2,
}

/// One target hit by a strike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrikeHit {
    /// Entity that was hit.
    pub target: EntityId,
    /// Resolved damage record.
    pub result: DamageResult,
}

/// A named on-hit behavior.
pub trait AttackStyle: std::fmt::Debug + Send + Sync {
    /// Style tag.
    fn kind(&self) -> StyleKind;

    /// Cooldown after use, in seconds.
    fn cooldown(&self) -> f32;

    /// Post-attack stiffness, in seconds.
    fn stiffness(&self) -> f32;

    /// The range shape this style strikes with.
    fn range(&self) -> &dyn RangeStrategy;

    /// Resolves the strike: detects targets through the range strategy and
    /// applies `weapon base attack + attacker attack` to each one.
    ///
    /// Targets that stop being attackable between detection and
    /// application are skipped silently.
    fn execute(&self, weapon: &Weapon, ctx: &StrikeContext<'_>) -> Vec<StrikeHit> {
        let targets =
            self.range()
                .detect_targets(ctx.registry, ctx.origin, ctx.direction, weapon.distance_unit());
        trace!(
            attacker = ctx.attacker.raw(),
            style = ?self.kind(),
            candidates = targets.len(),
            "strike resolved targets"
        );

        let request = DamageRequest::new(weapon.base_attack()).with_attacker_attack(ctx.attacker_attack);

        targets
            .into_iter()
            .filter(|&target| target != ctx.attacker)
            .filter_map(|target| {
                ctx.registry
                    .apply_damage(target, &request, ctx.events)
                    .ok()
                    .flatten()
                    .map(|result| StrikeHit { target, result })
            })
            .collect()
    }
}

/// Forward slash: a lane straight ahead.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlashStyle {
    range: RectangleRange,
}

impl SlashStyle {
    /// Creates the slash style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttackStyle for SlashStyle {
    fn kind(&self) -> StyleKind {
        StyleKind::Slash
    }

    fn cooldown(&self) -> f32 {
        0.4
    }

    fn stiffness(&self) -> f32 {
        0.15
    }

    fn range(&self) -> &dyn RangeStrategy {
        &self.range
    }
}

/// Wide-arc swing: a 120-degree sector.
#[derive(Debug, Clone, Copy)]
pub struct SwingStyle {
    range: SectorRange,
}

impl Default for SwingStyle {
    fn default() -> Self {
        Self {
            range: SectorRange::new(120.0),
        }
    }
}

impl SwingStyle {
    /// Creates the swing style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttackStyle for SwingStyle {
    fn kind(&self) -> StyleKind {
        StyleKind::Swing
    }

    fn cooldown(&self) -> f32 {
        0.5
    }

    fn stiffness(&self) -> f32 {
        0.2
    }

    fn range(&self) -> &dyn RangeStrategy {
        &self.range
    }
}

/// Forward thrust: the same lane as slash, faster recovery.
#[derive(Debug, Clone, Copy, Default)]
pub struct StabStyle {
    range: RectangleRange,
}

impl StabStyle {
    /// Creates the stab style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttackStyle for StabStyle {
    fn kind(&self) -> StyleKind {
        StyleKind::Stab
    }

    fn cooldown(&self) -> f32 {
        0.35
    }

    fn stiffness(&self) -> f32 {
        0.12
    }

    fn range(&self) -> &dyn RangeStrategy {
        &self.range
    }
}

/// Ground smash: a disc ahead of the attacker, slow and heavy.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmashStyle {
    range: CircleRange,
}

impl SmashStyle {
    /// Creates the smash style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttackStyle for SmashStyle {
    fn kind(&self) -> StyleKind {
        StyleKind::Smash
    }

    fn cooldown(&self) -> f32 {
        0.9
    }

    fn stiffness(&self) -> f32 {
        0.35
    }

    fn range(&self) -> &dyn RangeStrategy {
        &self.range
    }
}
