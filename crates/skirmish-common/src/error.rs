//! Error types for Project Skirmish.

use crate::ids::EntityId;
use thiserror::Error;

/// Top-level error type for combat-core operations.
///
/// Gated combat requests (attack on cooldown, cast while busy) are advisory
/// and report rejection through status values, not through this type. Errors
/// here mean the caller addressed something that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CombatError {
    /// No registered entity has this ID.
    #[error("Entity not found: {0:?}")]
    EntityNotFound(EntityId),
}

/// Result type alias for combat-core operations.
pub type CombatResult<T> = Result<T, CombatError>;
