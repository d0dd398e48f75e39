//! Timed skill state machine.
//!
//! Skills are abilities with a cast delay and a backswing delay, decoupled
//! from the instant-resolution melee styles. Each skill cycles strictly
//! Ready -> Casting -> BackSwing -> Cooldown -> Ready, advanced by the
//! per-tick delta. The instant the cast phase completes, exactly one
//! [`CombatEvent::SkillImpact`] fires - that event is the sole integration
//! point for damage application, projectile spawning, or area effects; the
//! machine itself computes no damage.

use serde::{Deserialize, Serialize};
use tracing::trace;

use skirmish_common::{EntityId, SkillId};

use crate::events::{CombatEvent, EventBus};

/// Phase of a skill's cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillState {
    /// Idle, accepts `cast()`.
    Ready,
    /// Cast delay running; no effect yet.
    Casting,
    /// Effect applied, recovery running.
    BackSwing,
    /// Cooling down before the next use.
    Cooldown,
}

/// Immutable configuration of one ability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSpec {
    /// Skill identifier.
    pub id: SkillId,
    /// Display name.
    pub name: String,
    /// Cast delay in seconds.
    pub cast_time: f32,
    /// Backswing delay in seconds.
    pub back_swing: f32,
    /// Cooldown in seconds.
    pub cooldown: f32,
    /// Base damage carried on the impact event.
    pub base_damage: i32,
}

impl SkillSpec {
    /// Creates a skill spec; negative durations clamp to zero.
    #[must_use]
    pub fn new(
        id: impl Into<SkillId>,
        name: impl Into<String>,
        cast_time: f32,
        back_swing: f32,
        cooldown: f32,
        base_damage: i32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cast_time: cast_time.max(0.0),
            back_swing: back_swing.max(0.0),
            cooldown: cooldown.max(0.0),
            base_damage,
        }
    }
}

/// One ability instance owned by one actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// Immutable configuration.
    spec: SkillSpec,
    /// Current phase.
    state: SkillState,
    /// Time accumulated in the current phase.
    elapsed_in_state: f32,
    /// Remaining cooldown while in [`SkillState::Cooldown`].
    cd_remaining: f32,
}

impl Skill {
    /// Creates a ready skill from its spec.
    #[must_use]
    pub fn new(spec: SkillSpec) -> Self {
        Self {
            spec,
            state: SkillState::Ready,
            elapsed_in_state: 0.0,
            cd_remaining: 0.0,
        }
    }

    /// Immutable configuration.
    #[must_use]
    pub fn spec(&self) -> &SkillSpec {
        &self.spec
    }

    /// Current phase.
    #[must_use]
    pub fn state(&self) -> SkillState {
        self.state
    }

    /// Time accumulated in the current phase, for animation driving.
    #[must_use]
    pub fn elapsed_in_state(&self) -> f32 {
        self.elapsed_in_state
    }

    /// Remaining cooldown, zero outside the cooldown phase.
    #[must_use]
    pub fn cooldown_remaining(&self) -> f32 {
        self.cd_remaining
    }

    /// Requests a cast. Succeeds only from Ready; any other phase rejects
    /// the request with no state change (never queued).
    pub fn cast(&mut self) -> bool {
        if self.state != SkillState::Ready {
            return false;
        }
        self.state = SkillState::Casting;
        self.elapsed_in_state = 0.0;
        true
    }

    /// Advances the machine by one tick's delta.
    ///
    /// Returns `true` on the tick the cast phase completes - the impact
    /// instant. At most one phase transition happens per tick.
    pub fn tick(&mut self, dt: f32) -> bool {
        match self.state {
            SkillState::Ready => false,
            SkillState::Casting => {
                self.elapsed_in_state += dt;
                if self.elapsed_in_state >= self.spec.cast_time {
                    self.state = SkillState::BackSwing;
                    self.elapsed_in_state = 0.0;
                    return true;
                }
                false
            }
            SkillState::BackSwing => {
                self.elapsed_in_state += dt;
                if self.elapsed_in_state >= self.spec.back_swing {
                    self.state = SkillState::Cooldown;
                    self.cd_remaining = self.spec.cooldown;
                    self.elapsed_in_state = 0.0;
                }
                false
            }
            SkillState::Cooldown => {
                self.cd_remaining -= dt;
                if self.cd_remaining <= 0.0 {
                    self.cd_remaining = 0.0;
                    self.state = SkillState::Ready;
                    self.elapsed_in_state = 0.0;
                }
                debug_assert!(self.cd_remaining >= 0.0);
                false
            }
        }
    }
}

/// All skills of one actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSet {
    /// Owning actor, stamped on impact events.
    owner: EntityId,
    /// Skill instances.
    skills: Vec<Skill>,
}

impl SkillSet {
    /// Creates an empty skill set for an actor.
    #[must_use]
    pub fn new(owner: EntityId) -> Self {
        Self {
            owner,
            skills: Vec::new(),
        }
    }

    /// Adds a skill from its spec.
    pub fn learn(&mut self, spec: SkillSpec) {
        self.skills.push(Skill::new(spec));
    }

    /// All skills, read-only.
    #[must_use]
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    /// Looks up a skill by ID.
    #[must_use]
    pub fn skill(&self, id: &SkillId) -> Option<&Skill> {
        self.skills.iter().find(|s| &s.spec.id == id)
    }

    /// Requests a cast by ID. Fails for unknown skills and for any skill
    /// not in Ready.
    pub fn cast(&mut self, id: &SkillId) -> bool {
        let Some(skill) = self.skills.iter_mut().find(|s| &s.spec.id == id) else {
            return false;
        };
        let started = skill.cast();
        if started {
            trace!(owner = self.owner.raw(), skill = %id, "cast started");
        }
        started
    }

    /// Advances every skill by the tick delta, publishing one
    /// `SkillImpact` per cast that completes this tick.
    pub fn update(&mut self, dt: f32, events: &EventBus) {
        for skill in &mut self.skills {
            if skill.tick(dt) {
                trace!(owner = self.owner.raw(), skill = %skill.spec.id, "skill impact");
                events.publish(CombatEvent::SkillImpact {
                    caster: self.owner,
                    skill: skill.spec.id.clone(),
                    base_damage: skill.spec.base_damage,
                });
            }
        }
    }
}
