//! Injected clock for combat timing.
//!
//! The combat core never reads wall-clock time. Every timestamp comparison
//! (cooldowns, stiffness, skill phases) runs against a [`CombatClock`] that
//! the host advances once per update tick, which keeps the whole core
//! deterministic and testable.

use serde::{Deserialize, Serialize};

/// Monotonic simulation clock, advanced externally once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatClock {
    /// Total elapsed simulation time in seconds.
    elapsed: f64,
}

impl CombatClock {
    /// Creates a clock at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the clock by one tick's delta.
    ///
    /// Negative deltas are ignored; the clock is monotonic.
    pub fn advance(&mut self, dt: f32) {
        if dt > 0.0 {
            self.elapsed += f64::from(dt);
        }
    }

    /// Current simulation time in seconds.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_advances() {
        let mut clock = CombatClock::new();
        assert_eq!(clock.now(), 0.0);

        clock.advance(0.5);
        clock.advance(0.25);
        assert!((clock.now() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_clock_ignores_negative_delta() {
        let mut clock = CombatClock::new();
        clock.advance(1.0);
        clock.advance(-2.0);
        assert!((clock.now() - 1.0).abs() < 1e-9);
    }
}
