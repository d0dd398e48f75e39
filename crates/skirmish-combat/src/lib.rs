//! # Skirmish Combat
//!
//! Real-time combat resolution core for Project Skirmish.
//!
//! This crate decides, for a given actor and a chosen attack or skill,
//! which targets are affected, how much damage they take, and how timing
//! (cooldowns, cast/backswing windows, post-attack stiffness) gates
//! further actions:
//! - Entity registry (who can be targeted right now)
//! - Collision detection and separation for movement requests
//! - Pluggable range geometry (sector, rectangle, circle)
//! - Weapons and attack styles with per-style cooldowns
//! - Character orchestration with stiffness windows
//! - Timed skill state machine (cast / backswing / cooldown)
//! - Linear damage resolution with event notifications
//!
//! The core is logically single-threaded cooperative: the host drives it
//! with per-tick `update(dt)` calls and an injected [`CombatClock`],
//! and drains the [`EventBus`] for presentation feedback. Rendering,
//! input, assets, and AI live outside this crate.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod character;
pub mod collision;
pub mod cooldown;
pub mod events;
pub mod range;
pub mod registry;
pub mod skill;
pub mod stats;
pub mod style;
pub mod time;
pub mod weapon;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::character::*;
    pub use crate::collision::*;
    pub use crate::cooldown::*;
    pub use crate::events::*;
    pub use crate::range::*;
    pub use crate::registry::*;
    pub use crate::skill::*;
    pub use crate::stats::*;
    pub use crate::style::*;
    pub use crate::time::*;
    pub use crate::weapon::*;
    pub use skirmish_common::prelude::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    /// One combat scene: registry, bus, clock.
    struct Scene {
        registry: EntityRegistry,
        events: EventBus,
        clock: CombatClock,
    }

    impl Scene {
        fn new() -> Self {
            Self {
                registry: EntityRegistry::new(),
                events: EventBus::default(),
                clock: CombatClock::new(),
            }
        }

        fn spawn(&self, raw: u64, x: f32, y: f32, stats: Stats) -> EntityId {
            let id = EntityId::from_raw(raw);
            self.registry
                .register(Combatant::new(id, Vec2::new(x, y), stats));
            id
        }

        /// Advances the whole scene by one tick.
        fn tick(&mut self, dt: f32, actors: &mut [&mut Character]) {
            self.clock.advance(dt);
            self.registry.update(dt);
            for actor in actors {
                actor.update(dt, &self.events);
            }
        }
    }

    #[test]
    fn test_end_to_end_damage_formula() {
        let scene = Scene::new();
        let attacker_id = scene.spawn(1, 0.0, 0.0, Stats::new(100, 0, 20, 0));
        let target = scene.spawn(2, 20.0, 0.0, Stats::new(100, 0, 0, 5));
        let mut attacker = Character::new(attacker_id, Archetype::Knifeman);

        let outcome = attacker.perform_attack(
            StyleKind::Slash,
            Vec2::X,
            &scene.registry,
            &scene.events,
            &scene.clock,
        );

        // knife base 10 + attack 20 - defense 5 = 25
        let AttackOutcome::Resolved { hits } = outcome else {
            panic!("attack rejected");
        };
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].result.final_damage, 25);
        assert_eq!(scene.registry.stats(target).expect("registered").hp, 75);
    }

    #[test]
    fn test_end_to_end_damage_floor() {
        let scene = Scene::new();
        let attacker_id = scene.spawn(1, 0.0, 0.0, Stats::new(100, 0, 20, 0));
        let target = scene.spawn(2, 20.0, 0.0, Stats::new(100, 0, 0, 40));
        let mut attacker = Character::new(attacker_id, Archetype::Knifeman);

        attacker.perform_attack(
            StyleKind::Slash,
            Vec2::X,
            &scene.registry,
            &scene.events,
            &scene.clock,
        );

        // 10 + 20 - 40 floors at 1
        assert_eq!(scene.registry.stats(target).expect("registered").hp, 99);
    }

    #[test]
    fn test_attack_spam_within_cooldown_is_dropped() {
        let mut scene = Scene::new();
        let attacker_id = scene.spawn(1, 0.0, 0.0, Stats::new(100, 0, 20, 0));
        let target = scene.spawn(2, 20.0, 0.0, Stats::new(100, 0, 0, 5));
        let mut attacker = Character::new(attacker_id, Archetype::Knifeman);

        let first = attacker.perform_attack(
            StyleKind::Slash,
            Vec2::X,
            &scene.registry,
            &scene.events,
            &scene.clock,
        );
        assert!(first.is_resolved());
        let hp_after_first = scene.registry.stats(target).expect("registered").hp;
        scene.events.drain();

        // Past stiffness (0.15) but inside the 0.4s slash cooldown
        let mut actors = [&mut attacker];
        scene.tick(0.2, &mut actors);

        let second = attacker.perform_attack(
            StyleKind::Slash,
            Vec2::X,
            &scene.registry,
            &scene.events,
            &scene.clock,
        );
        assert!(matches!(second, AttackOutcome::OnCooldown { .. }));

        // Zero damage events, target HP unchanged
        assert!(scene.events.drain().is_empty());
        assert_eq!(
            scene.registry.stats(target).expect("registered").hp,
            hp_after_first
        );
    }

    #[test]
    fn test_attack_lands_again_after_cooldown_clears() {
        let mut scene = Scene::new();
        let attacker_id = scene.spawn(1, 0.0, 0.0, Stats::new(100, 0, 20, 0));
        let target = scene.spawn(2, 20.0, 0.0, Stats::new(100, 0, 0, 5));
        let mut attacker = Character::new(attacker_id, Archetype::Knifeman);

        attacker.perform_attack(
            StyleKind::Slash,
            Vec2::X,
            &scene.registry,
            &scene.events,
            &scene.clock,
        );

        // Clears stiffness, cooldown, and the target's post-hit window
        let mut actors = [&mut attacker];
        scene.tick(0.5, &mut actors);

        let outcome = attacker.perform_attack(
            StyleKind::Slash,
            Vec2::X,
            &scene.registry,
            &scene.events,
            &scene.clock,
        );
        assert!(outcome.is_resolved());
        assert_eq!(scene.registry.stats(target).expect("registered").hp, 50);
    }

    #[test]
    fn test_skill_impact_drives_damage_application() {
        let mut scene = Scene::new();
        let caster_id = scene.spawn(1, 0.0, 0.0, Stats::new(100, 0, 20, 0));
        let target = scene.spawn(2, 20.0, 0.0, Stats::new(100, 0, 0, 5));
        let mut caster = Character::new(caster_id, Archetype::Swordsman);
        caster.learn_skill(SkillSpec::new("fireball", "Fireball", 0.5, 0.3, 2.0, 40));

        assert!(caster.cast(&SkillId::from("fireball")));

        let mut actors = [&mut caster];
        scene.tick(0.5, &mut actors);

        // The host consumes the impact event and applies the damage
        let impacts: Vec<CombatEvent> = scene.events.drain();
        let CombatEvent::SkillImpact {
            caster: who,
            base_damage,
            ..
        } = &impacts[0]
        else {
            panic!("expected SkillImpact");
        };
        assert_eq!(*who, caster_id);

        let attack = scene.registry.stats(caster_id).expect("registered").attack;
        let request = DamageRequest::new(*base_damage).with_attacker_attack(attack);
        let result = scene
            .registry
            .apply_damage(target, &request, &scene.events)
            .expect("registered")
            .expect("attackable");

        // 40 + 20 - 5 = 55
        assert_eq!(result.final_damage, 55);
    }

    #[test]
    fn test_dead_entities_stop_being_targets() {
        let scene = Scene::new();
        let attacker_id = scene.spawn(1, 0.0, 0.0, Stats::new(100, 0, 100, 0));
        let target = scene.spawn(2, 20.0, 0.0, Stats::new(10, 0, 0, 0));
        let mut attacker = Character::new(attacker_id, Archetype::Knifeman);

        let outcome = attacker.perform_attack(
            StyleKind::Slash,
            Vec2::X,
            &scene.registry,
            &scene.events,
            &scene.clock,
        );
        let AttackOutcome::Resolved { hits } = outcome else {
            panic!("attack rejected");
        };
        assert!(hits[0].result.is_lethal());

        // Dead target no longer appears in snapshots
        assert!(!scene.registry.is_attackable(target));
        assert!(scene.registry.snapshot().iter().all(|t| t.id != target));

        // Gameplay unregisters on death; the registry reflects it
        scene.registry.unregister(target);
        assert_eq!(scene.registry.len(), 1);
    }

    #[test]
    fn test_separation_keeps_combatants_apart() {
        let scene = Scene::new();
        let mover_id = scene.spawn(1, 0.0, 0.0, Stats::default());
        scene.spawn(2, 60.0, 0.0, Stats::default());
        let mover = Character::new(mover_id, Archetype::Swordsman);

        // Walk straight at the other combatant in small steps
        let mut blocked = false;
        for step in 1..=20 {
            let target = Vec2::new(step as f32 * 5.0, 0.0);
            let res = mover.try_move(target, &scene.registry).expect("registered");
            blocked |= res.collided;
        }
        assert!(blocked);

        let final_pos = scene.registry.position(mover_id).expect("registered");
        let other = scene.registry.collider(EntityId::from_raw(2)).expect("registered");
        let mine = scene.registry.collider(mover_id).expect("registered");
        assert!(!collision::overlaps(
            final_pos,
            &mine,
            Vec2::new(60.0, 0.0),
            &other,
        ));
    }
}
