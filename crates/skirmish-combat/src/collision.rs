//! Axis-aligned collision detection and separation.
//!
//! This module provides:
//! - AABB overlap tests between entity colliders
//! - Minimal-translation push vectors for overlapping pairs
//! - Movement adjustment against a single obstacle or every registered
//!   entity, with optional arena-bounds clamping
//!
//! Movement requests are routed through here before the new position is
//! committed. All functions take and return positions by value.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use skirmish_common::EntityId;

use crate::registry::EntityRegistry;

/// Extra separation applied on top of the overlap depth so that a pushed
/// box does not immediately re-collide due to floating-point error.
const SEPARATION_MARGIN: f32 = 1.0;

/// Axis-aligned bounding box in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec2,
    /// Maximum corner.
    pub max: Vec2,
}

impl Aabb {
    /// Creates an AABB from its minimum corner and size.
    #[must_use]
    pub fn new(min: Vec2, width: f32, height: f32) -> Self {
        Self {
            min,
            max: min + Vec2::new(width, height),
        }
    }

    /// Creates an AABB from its center and half extents.
    #[must_use]
    pub fn from_center(center: Vec2, half_width: f32, half_height: f32) -> Self {
        let half = Vec2::new(half_width, half_height);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Center point of the box.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Tests overlap with another box (touching edges do not overlap).
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Clamps a point into the box.
    #[must_use]
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }
}

/// Collision box attached to an entity, offset from its position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    /// Offset of the box's minimum corner from the entity position.
    pub offset: Vec2,
    /// Box width.
    pub width: f32,
    /// Box height.
    pub height: f32,
}

impl Default for Collider {
    /// 32x32 box centered on the entity position.
    fn default() -> Self {
        Self {
            offset: Vec2::new(-16.0, -16.0),
            width: 32.0,
            height: 32.0,
        }
    }
}

impl Collider {
    /// Creates a collider with an explicit offset and size.
    #[must_use]
    pub fn new(offset: Vec2, width: f32, height: f32) -> Self {
        Self {
            offset,
            width,
            height,
        }
    }

    /// Creates a centered collider of the given size.
    #[must_use]
    pub fn centered(width: f32, height: f32) -> Self {
        Self {
            offset: Vec2::new(-width / 2.0, -height / 2.0),
            width,
            height,
        }
    }

    /// World-space bounds of this collider for an entity at `position`.
    #[must_use]
    pub fn world_bounds(&self, position: Vec2) -> Aabb {
        Aabb::new(position + self.offset, self.width, self.height)
    }
}

/// Tests whether two positioned colliders overlap.
#[must_use]
pub fn overlaps(pos_a: Vec2, a: &Collider, pos_b: Vec2, b: &Collider) -> bool {
    a.world_bounds(pos_a).overlaps(&b.world_bounds(pos_b))
}

/// Computes the push vector that separates `a` from `b`.
///
/// The push runs along the axis with the smaller overlap (X only when its
/// overlap is strictly smaller), with a fixed margin added so the boxes end
/// up fully separated. Exactly-coincident centers push along +X.
#[must_use]
pub fn push_vector(a: &Aabb, b: &Aabb) -> Vec2 {
    let overlap_x = (a.max.x.min(b.max.x) - a.min.x.max(b.min.x)).max(0.0);
    let overlap_y = (a.max.y.min(b.max.y) - a.min.y.max(b.min.y)).max(0.0);
    let delta = a.center() - b.center();

    if delta == Vec2::ZERO {
        // Coincident centers: no direction to derive, push along +X
        return Vec2::new(overlap_x + SEPARATION_MARGIN, 0.0);
    }

    if overlap_x < overlap_y {
        let sign = if delta.x >= 0.0 { 1.0 } else { -1.0 };
        Vec2::new(sign * (overlap_x + SEPARATION_MARGIN), 0.0)
    } else {
        let sign = if delta.y >= 0.0 { 1.0 } else { -1.0 };
        Vec2::new(0.0, sign * (overlap_y + SEPARATION_MARGIN))
    }
}

/// Result of adjusting a movement request against collisions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementResolution {
    /// Position the mover may actually occupy.
    pub position: Vec2,
    /// Whether any collision occurred.
    pub collided: bool,
}

impl MovementResolution {
    /// A resolution that granted the request unchanged.
    #[must_use]
    pub fn unobstructed(position: Vec2) -> Self {
        Self {
            position,
            collided: false,
        }
    }
}

/// Adjusts a movement request against a single obstacle.
///
/// If `target` overlaps the obstacle, the push vector is applied to it
/// once; if the pushed position still overlaps, the move is rejected and
/// the mover stays at `current`.
#[must_use]
pub fn check_and_adjust_movement(
    current: Vec2,
    target: Vec2,
    mover: &Collider,
    obstacle_pos: Vec2,
    obstacle: &Collider,
) -> MovementResolution {
    let obstacle_bounds = obstacle.world_bounds(obstacle_pos);
    if !mover.world_bounds(target).overlaps(&obstacle_bounds) {
        return MovementResolution::unobstructed(target);
    }

    let push = push_vector(&mover.world_bounds(target), &obstacle_bounds);
    let adjusted = target + push;

    if mover.world_bounds(adjusted).overlaps(&obstacle_bounds) {
        MovementResolution {
            position: current,
            collided: true,
        }
    } else {
        MovementResolution {
            position: adjusted,
            collided: true,
        }
    }
}

/// Adjusts a movement request against every attackable registered entity
/// except `exclude` (typically the mover itself), then clamps the result
/// into `bounds` when given.
#[must_use]
pub fn resolve_movement_against_all(
    registry: &EntityRegistry,
    exclude: EntityId,
    mover: &Collider,
    current: Vec2,
    target: Vec2,
    bounds: Option<&Aabb>,
) -> MovementResolution {
    let mut position = target;
    let mut collided = false;

    for other in registry.snapshot() {
        if other.id == exclude {
            continue;
        }
        let step = check_and_adjust_movement(current, position, mover, other.position, &other.collider);
        position = step.position;
        collided |= step.collided;
    }

    if let Some(bounds) = bounds {
        position = bounds.clamp_point(position);
    }

    MovementResolution { position, collided }
}
