//! Per-actor attack cooldown bookkeeping.
//!
//! Each style a character uses records an "earliest next use" timestamp on
//! the injected [`CombatClock`](crate::time::CombatClock); an absent entry
//! means the style has never been used and is ready immediately. Each
//! actor owns its own manager; cooldowns are never shared across actors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::style::StyleKind;

/// Timestamp gate answering "is this style usable now".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CooldownManager {
    /// Earliest next use per style, in clock seconds.
    ready_at: HashMap<StyleKind, f64>,
}

impl CooldownManager {
    /// Creates a manager with every style ready.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the style is usable at `now`.
    #[must_use]
    pub fn is_ready(&self, style: StyleKind, now: f64) -> bool {
        match self.ready_at.get(&style) {
            None => true,
            Some(&ready_at) => now >= ready_at,
        }
    }

    /// Records a use: the style becomes ready again at `now + duration`.
    /// Overwrites any prior entry.
    pub fn start_cooldown(&mut self, style: StyleKind, duration: f32, now: f64) {
        self.ready_at.insert(style, now + f64::from(duration.max(0.0)));
    }

    /// Seconds until the style is ready, zero when usable.
    #[must_use]
    pub fn remaining(&self, style: StyleKind, now: f64) -> f32 {
        match self.ready_at.get(&style) {
            None => 0.0,
            Some(&ready_at) => (ready_at - now).max(0.0) as f32,
        }
    }

    /// Clears all cooldowns (death/reset).
    pub fn clear(&mut self) {
        self.ready_at.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unused_style_is_ready() {
        let cooldowns = CooldownManager::new();
        assert!(cooldowns.is_ready(StyleKind::Slash, 0.0));
        assert_eq!(cooldowns.remaining(StyleKind::Slash, 0.0), 0.0);
    }

    #[test]
    fn test_cooldown_gates_until_elapsed() {
        let mut cooldowns = CooldownManager::new();
        cooldowns.start_cooldown(StyleKind::Slash, 0.4, 1.0);

        assert!(!cooldowns.is_ready(StyleKind::Slash, 1.0));
        assert!(!cooldowns.is_ready(StyleKind::Slash, 1.39));
        assert!(cooldowns.is_ready(StyleKind::Slash, 1.4));
    }

    #[test]
    fn test_styles_cool_down_independently() {
        let mut cooldowns = CooldownManager::new();
        cooldowns.start_cooldown(StyleKind::Slash, 10.0, 0.0);

        assert!(!cooldowns.is_ready(StyleKind::Slash, 1.0));
        assert!(cooldowns.is_ready(StyleKind::Swing, 1.0));
    }

    #[test]
    fn test_remaining_never_negative() {
        let mut cooldowns = CooldownManager::new();
        cooldowns.start_cooldown(StyleKind::Swing, 0.5, 0.0);

        assert!((cooldowns.remaining(StyleKind::Swing, 0.2) - 0.3).abs() < 1e-6);
        assert_eq!(cooldowns.remaining(StyleKind::Swing, 100.0), 0.0);
    }

    #[test]
    fn test_restart_overwrites() {
        let mut cooldowns = CooldownManager::new();
        cooldowns.start_cooldown(StyleKind::Slash, 10.0, 0.0);
        cooldowns.start_cooldown(StyleKind::Slash, 0.1, 0.0);

        assert!(cooldowns.is_ready(StyleKind::Slash, 0.1));
    }

    #[test]
    fn test_zero_duration_ready_immediately() {
        let mut cooldowns = CooldownManager::new();
        cooldowns.start_cooldown(StyleKind::Stab, 0.0, 5.0);
        assert!(cooldowns.is_ready(StyleKind::Stab, 5.0));
    }

    #[test]
    fn test_clear_resets_all() {
        let mut cooldowns = CooldownManager::new();
        cooldowns.start_cooldown(StyleKind::Slash, 10.0, 0.0);
        cooldowns.start_cooldown(StyleKind::Swing, 10.0, 0.0);

        cooldowns.clear();
        assert!(cooldowns.is_ready(StyleKind::Slash, 0.0));
        assert!(cooldowns.is_ready(StyleKind::Swing, 0.0));
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_cooldown_gates_until_duration_elapses(
            duration in 0.01f32..100.0,
            start in 0.0f64..1000.0,
        ) {
            let mut cooldowns = CooldownManager::new();
            cooldowns.start_cooldown(StyleKind::Slash, duration, start);

            prop_assert!(!cooldowns.is_ready(StyleKind::Slash, start));
            prop_assert!(
                !cooldowns.is_ready(StyleKind::Slash, start + f64::from(duration) * 0.5)
            );

            let ready_time = start + f64::from(duration);
            prop_assert!(cooldowns.is_ready(StyleKind::Slash, ready_time));
            prop_assert_eq!(cooldowns.remaining(StyleKind::Slash, ready_time), 0.0);
        }

        #[test]
        fn prop_remaining_never_negative(
            duration in 0.0f32..100.0,
            start in 0.0f64..1000.0,
            probe in 0.0f64..3000.0,
        ) {
            let mut cooldowns = CooldownManager::new();
            cooldowns.start_cooldown(StyleKind::Swing, duration, start);
            prop_assert!(cooldowns.remaining(StyleKind::Swing, probe) >= 0.0);
        }
    }
}
