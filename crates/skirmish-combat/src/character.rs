//! Character orchestration: the single entry point for attack requests.
//!
//! A character ties together one actor's equipped weapon, cooldown
//! manager, stiffness window, and skill set. Every attack request runs the
//! same gate pipeline: stiffness, weapon, style support, cooldown - then
//! resolves targets, applies damage, and arms stiffness and cooldown.
//! Rejected requests are dropped, never buffered; spamming the attack key
//! has no effect until both stiffness and the style's cooldown clear.

use glam::Vec2;
use tracing::{debug, trace};

use skirmish_common::{CombatResult, EntityId, SkillId};

use crate::collision::{resolve_movement_against_all, Aabb, MovementResolution};
use crate::cooldown::CooldownManager;
use crate::events::EventBus;
use crate::registry::EntityRegistry;
use crate::skill::{SkillSet, SkillSpec};
use crate::style::{StrikeContext, StrikeHit, StyleKind};
use crate::time::CombatClock;
use crate::weapon::Weapon;

/// Character archetype, deciding the default loadout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Archetype {
    /// Sword wielder.
    Swordsman,
    /// Knife wielder.
    Knifeman,
    /// Spear wielder.
    Spearman,
    /// Hammer wielder.
    Hammerman,
}

impl Archetype {
    /// Stock weapon for this archetype.
    #[must_use]
    pub fn default_weapon(self) -> Weapon {
        match self {
            Self::Swordsman => Weapon::sword(),
            Self::Knifeman => Weapon::knife(),
            Self::Spearman => Weapon::spear(),
            Self::Hammerman => Weapon::hammer(),
        }
    }
}

/// Four-way facing, for hosts that drive attack direction from movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    /// Facing -Y.
    Down,
    /// Facing -X.
    Left,
    /// Facing +X.
    Right,
    /// Facing +Y.
    Up,
}

impl Facing {
    /// Unit direction vector for this facing.
    #[must_use]
    pub fn to_dir(self) -> Vec2 {
        match self {
            Self::Down => Vec2::NEG_Y,
            Self::Left => Vec2::NEG_X,
            Self::Right => Vec2::X,
            Self::Up => Vec2::Y,
        }
    }

    /// Dominant facing for a free direction vector; the horizontal axis
    /// wins ties. Zero vectors face down.
    #[must_use]
    pub fn from_dir(dir: Vec2) -> Self {
        if dir == Vec2::ZERO {
            return Self::Down;
        }
        if dir.x.abs() >= dir.y.abs() {
            if dir.x >= 0.0 {
                Self::Right
            } else {
                Self::Left
            }
        } else if dir.y >= 0.0 {
            Self::Up
        } else {
            Self::Down
        }
    }
}

/// Status of one attack request.
///
/// Rejections are advisory, not errors: under normal input spam most
/// requests are rejected, and the next key press simply tries again.
#[derive(Debug, Clone, PartialEq)]
pub enum AttackOutcome {
    /// No weapon equipped.
    NoWeapon,
    /// The equipped weapon does not support the requested style.
    UnsupportedStyle,
    /// The style is still cooling down.
    OnCooldown {
        /// Seconds until the style is usable.
        remaining: f32,
    },
    /// The actor is inside its post-attack stiffness window.
    Stiff {
        /// Seconds until the actor can act again.
        remaining: f32,
    },
    /// The actor is not registered in the entity registry.
    Unregistered,
    /// The strike resolved; `hits` may be empty if nothing was in range.
    Resolved {
        /// Damage records per struck target.
        hits: Vec<StrikeHit>,
    },
}

impl AttackOutcome {
    /// Whether the request passed every gate and resolved.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// One actor's combat orchestration state.
#[derive(Debug)]
pub struct Character {
    /// Registry entry this character acts through.
    id: EntityId,
    /// Archetype deciding the default loadout.
    archetype: Archetype,
    /// Equipped weapon, if any.
    weapon: Option<Weapon>,
    /// Per-style cooldown gate.
    cooldowns: CooldownManager,
    /// Remaining post-attack stiffness, ticked by [`Character::update`].
    stiffness_remaining: f32,
    /// This actor's abilities.
    skills: SkillSet,
    /// Optional arena bounds movement is clamped into.
    bounds: Option<Aabb>,
}

impl Character {
    /// Creates a character wielding its archetype's stock weapon.
    ///
    /// The entity itself must be registered separately; the character only
    /// references it by ID.
    #[must_use]
    pub fn new(id: EntityId, archetype: Archetype) -> Self {
        Self {
            id,
            archetype,
            weapon: Some(archetype.default_weapon()),
            cooldowns: CooldownManager::new(),
            stiffness_remaining: 0.0,
            skills: SkillSet::new(id),
            bounds: None,
        }
    }

    /// Entity this character acts through.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Archetype tag.
    #[must_use]
    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    /// Currently equipped weapon.
    #[must_use]
    pub fn equipped_weapon(&self) -> Option<&Weapon> {
        self.weapon.as_ref()
    }

    /// Equips a weapon, returning the previous one.
    pub fn equip_weapon(&mut self, weapon: Weapon) -> Option<Weapon> {
        self.weapon.replace(weapon)
    }

    /// Removes the equipped weapon.
    pub fn disarm(&mut self) -> Option<Weapon> {
        self.weapon.take()
    }

    /// Cooldown state, for UI display.
    #[must_use]
    pub fn cooldowns(&self) -> &CooldownManager {
        &self.cooldowns
    }

    /// Whether the actor is inside its stiffness window.
    #[must_use]
    pub fn is_stiff(&self) -> bool {
        self.stiffness_remaining > 0.0
    }

    /// Remaining stiffness in seconds.
    #[must_use]
    pub fn stiffness_remaining(&self) -> f32 {
        self.stiffness_remaining
    }

    /// Enters stiffness for the given duration, replacing any remainder.
    pub fn enter_stiffness(&mut self, duration: f32) {
        self.stiffness_remaining = duration.max(0.0);
    }

    /// Restricts movement to an arena rectangle (`None` lifts the limit).
    pub fn set_bounds(&mut self, bounds: Option<Aabb>) {
        self.bounds = bounds;
    }

    /// This actor's skills.
    #[must_use]
    pub fn skills(&self) -> &SkillSet {
        &self.skills
    }

    /// Adds a skill to this actor.
    pub fn learn_skill(&mut self, spec: SkillSpec) {
        self.skills.learn(spec);
    }

    /// Requests a skill cast. Succeeds only from that skill's Ready state.
    pub fn cast(&mut self, id: &SkillId) -> bool {
        self.skills.cast(id)
    }

    /// Advances stiffness and skill timers by one tick's delta.
    pub fn update(&mut self, dt: f32, events: &EventBus) {
        if self.stiffness_remaining > 0.0 {
            self.stiffness_remaining = (self.stiffness_remaining - dt).max(0.0);
        }
        self.skills.update(dt, events);
    }

    /// Requests an attack with the given style toward `direction`.
    ///
    /// Gate order: stiffness, weapon presence, style support, cooldown.
    /// On success the style resolves targets and applies damage, then the
    /// actor enters the style's stiffness and the style starts cooling
    /// down. Stiffness and cooldown gate independently: stiffness blocks
    /// every new attack, cooldown only this style.
    pub fn perform_attack(
        &mut self,
        style: StyleKind,
        direction: Vec2,
        registry: &EntityRegistry,
        events: &EventBus,
        clock: &CombatClock,
    ) -> AttackOutcome {
        if self.is_stiff() {
            return AttackOutcome::Stiff {
                remaining: self.stiffness_remaining,
            };
        }
        let now = clock.now();

        let (hits, stiffness, cooldown) = {
            let Some(weapon) = self.weapon.as_ref() else {
                return AttackOutcome::NoWeapon;
            };
            let Some(style_impl) = weapon.style(style) else {
                trace!(actor = self.id.raw(), style = ?style, "style not supported");
                return AttackOutcome::UnsupportedStyle;
            };
            if !self.cooldowns.is_ready(style, now) {
                return AttackOutcome::OnCooldown {
                    remaining: self.cooldowns.remaining(style, now),
                };
            }

            let (origin, attack) = match (registry.position(self.id), registry.stats(self.id)) {
                (Ok(origin), Ok(stats)) => (origin, stats.attack),
                _ => return AttackOutcome::Unregistered,
            };

            let ctx = StrikeContext {
                registry,
                events,
                attacker: self.id,
                origin,
                attacker_attack: attack,
                direction,
            };
            (
                style_impl.execute(weapon, &ctx),
                style_impl.stiffness(),
                style_impl.cooldown(),
            )
        };

        debug!(
            actor = self.id.raw(),
            style = ?style,
            hits = hits.len(),
            "attack resolved"
        );
        self.enter_stiffness(stiffness);
        self.cooldowns.start_cooldown(style, cooldown, now);
        AttackOutcome::Resolved { hits }
    }

    /// Requests a move to `target`, routed through the collision resolver
    /// against every other registered entity (and the arena bounds, if
    /// set) before the position is committed.
    pub fn try_move(
        &self,
        target: Vec2,
        registry: &EntityRegistry,
    ) -> CombatResult<MovementResolution> {
        let current = registry.position(self.id)?;
        let collider = registry.collider(self.id)?;

        let resolution = resolve_movement_against_all(
            registry,
            self.id,
            &collider,
            current,
            target,
            self.bounds.as_ref(),
        );
        registry.set_position(self.id, resolution.position)?;
        Ok(resolution)
    }
}
