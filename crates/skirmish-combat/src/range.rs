//! Attack range geometry.
//!
//! A [`RangeStrategy`] decides which registered entities an attack can
//! reach, given the attacker's origin, facing, and the weapon's distance
//! unit. Each strategy also exposes its boundary vertices so the host can
//! draw a debug overlay. Strategies hold no mutable state; adding a new
//! shape means adding a new implementation, never touching existing ones.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use skirmish_common::EntityId;

use crate::registry::EntityRegistry;

/// Tag identifying a range shape (for configuration and debug display).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeKind {
    /// Arc in front of the attacker (wide sweeps).
    Sector,
    /// Forward lane (thrusts and straight slashes).
    Rectangle,
    /// Disc ahead of the attacker (ground smashes).
    Circle,
}

/// Pluggable target-selection geometry.
pub trait RangeStrategy: std::fmt::Debug + Send + Sync {
    /// Entities inside the shape, queried from the registry's current
    /// attackable snapshot.
    ///
    /// `facing` is normalized internally; a zero vector falls back to +X.
    fn detect_targets(
        &self,
        registry: &EntityRegistry,
        origin: Vec2,
        facing: Vec2,
        distance_unit: f32,
    ) -> Vec<EntityId>;

    /// Boundary vertices of the shape, for diagnostic/visual overlays.
    fn boundary(&self, origin: Vec2, facing: Vec2, distance_unit: f32) -> Vec<Vec2>;

    /// Shape tag.
    fn kind(&self) -> RangeKind;
}

fn normalize_facing(facing: Vec2) -> Vec2 {
    let dir = facing.normalize_or_zero();
    if dir == Vec2::ZERO {
        Vec2::X
    } else {
        dir
    }
}

/// Sector (arc) range, e.g. a 120-degree sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorRange {
    /// Total arc in degrees.
    arc_deg: f32,
}

impl SectorRange {
    /// Creates a sector covering `arc_deg` degrees, centered on facing.
    #[must_use]
    pub fn new(arc_deg: f32) -> Self {
        Self {
            arc_deg: arc_deg.clamp(0.0, 360.0),
        }
    }

    /// Total arc in degrees.
    #[must_use]
    pub fn arc_deg(&self) -> f32 {
        self.arc_deg
    }

    fn contains(&self, origin: Vec2, facing: Vec2, target: Vec2, radius: f32) -> bool {
        let distance = origin.distance(target);
        if distance > radius {
            return false;
        }
        // Angle between facing and the direction to the target; the dot is
        // clamped to [-1, 1] to guard float overshoot before acos
        let to_target = (target - origin).normalize_or_zero();
        let angle_deg = facing.dot(to_target).clamp(-1.0, 1.0).acos().to_degrees();
        angle_deg <= self.arc_deg / 2.0
    }
}

impl RangeStrategy for SectorRange {
    fn detect_targets(
        &self,
        registry: &EntityRegistry,
        origin: Vec2,
        facing: Vec2,
        distance_unit: f32,
    ) -> Vec<EntityId> {
        let facing = normalize_facing(facing);
        registry
            .snapshot()
            .into_iter()
            .filter(|t| self.contains(origin, facing, t.position, distance_unit))
            .map(|t| t.id)
            .collect()
    }

    fn boundary(&self, origin: Vec2, facing: Vec2, distance_unit: f32) -> Vec<Vec2> {
        let facing = normalize_facing(facing);
        let half = (self.arc_deg / 2.0).to_radians();
        vec![
            origin,
            origin + Vec2::from_angle(half).rotate(facing) * distance_unit,
            origin + Vec2::from_angle(-half).rotate(facing) * distance_unit,
        ]
    }

    fn kind(&self) -> RangeKind {
        RangeKind::Sector
    }
}

/// Forward-lane rectangle range.
///
/// Length = distance unit, width = length / 3, centered half a length
/// ahead of the origin along facing.
///
/// Containment uses the axis-aligned bounding extent of the rotated
/// rectangle's four corners, not true oriented-box containment. For
/// non-axis-aligned facings this over-includes targets near the corners;
/// the behavior is deliberate (see DESIGN.md) and callers relying on
/// diagonal attacks should expect the looser test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RectangleRange;

/// Width of the lane as a fraction of its length.
const WIDTH_RATIO: f32 = 1.0 / 3.0;

impl RectangleRange {
    /// Creates the forward-lane range.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn corners(origin: Vec2, facing: Vec2, length: f32) -> [Vec2; 4] {
        let width = length * WIDTH_RATIO;
        let center = origin + facing * (length / 2.0);
        let perpendicular = Vec2::new(-facing.y, facing.x);
        let half_width = perpendicular * (width / 2.0);
        let half_length = facing * (length / 2.0);

        [
            center + half_width - half_length,
            center - half_width - half_length,
            center - half_width + half_length,
            center + half_width + half_length,
        ]
    }
}

impl RangeStrategy for RectangleRange {
    fn detect_targets(
        &self,
        registry: &EntityRegistry,
        origin: Vec2,
        facing: Vec2,
        distance_unit: f32,
    ) -> Vec<EntityId> {
        let facing = normalize_facing(facing);
        let corners = Self::corners(origin, facing, distance_unit);

        let min = corners.iter().copied().reduce(Vec2::min).unwrap_or(origin);
        let max = corners.iter().copied().reduce(Vec2::max).unwrap_or(origin);

        registry
            .snapshot()
            .into_iter()
            .filter(|t| {
                t.position.x >= min.x
                    && t.position.x <= max.x
                    && t.position.y >= min.y
                    && t.position.y <= max.y
            })
            .map(|t| t.id)
            .collect()
    }

    fn boundary(&self, origin: Vec2, facing: Vec2, distance_unit: f32) -> Vec<Vec2> {
        let facing = normalize_facing(facing);
        Self::corners(origin, facing, distance_unit).to_vec()
    }

    fn kind(&self) -> RangeKind {
        RangeKind::Rectangle
    }
}

/// Disc range for ground smashes.
///
/// Radius = distance unit, centered half a unit ahead along facing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CircleRange;

/// Segments used to approximate the disc boundary for overlays.
const CIRCLE_SEGMENTS: usize = 16;

impl CircleRange {
    /// Creates the disc range.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn center(origin: Vec2, facing: Vec2, distance_unit: f32) -> Vec2 {
        origin + facing * (distance_unit / 2.0)
    }
}

impl RangeStrategy for CircleRange {
    fn detect_targets(
        &self,
        registry: &EntityRegistry,
        origin: Vec2,
        facing: Vec2,
        distance_unit: f32,
    ) -> Vec<EntityId> {
        let facing = normalize_facing(facing);
        let center = Self::center(origin, facing, distance_unit);

        registry
            .snapshot()
            .into_iter()
            .filter(|t| center.distance(t.position) <= distance_unit)
            .map(|t| t.id)
            .collect()
    }

    fn boundary(&self, origin: Vec2, facing: Vec2, distance_unit: f32) -> Vec<Vec2> {
        let facing = normalize_facing(facing);
        let center = Self::center(origin, facing, distance_unit);

        (0..CIRCLE_SEGMENTS)
            .map(|i| {
                let angle = std::f32::consts::TAU * i as f32 / CIRCLE_SEGMENTS as f32;
                center + Vec2::new(angle.cos(), angle.sin()) * distance_unit
            })
            .collect()
    }

    fn kind(&self) -> RangeKind {
        RangeKind::Circle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Combatant;
    use crate::stats::Stats;

    fn registry_with(positions: &[(u64, f32, f32)]) -> EntityRegistry {
        let registry = EntityRegistry::new();
        for &(raw, x, y) in positions {
            registry.register(Combatant::new(
                EntityId::from_raw(raw),
                Vec2::new(x, y),
                Stats::default(),
            ));
        }
        registry
    }

    fn at_angle(distance: f32, degrees: f32) -> (f32, f32) {
        let rad = degrees.to_radians();
        (distance * rad.cos(), distance * rad.sin())
    }

    #[test]
    fn test_sector_inclusion_by_distance() {
        let near = at_angle(20.0, 0.0);
        let far = at_angle(40.0, 0.0);
        let registry = registry_with(&[(1, near.0, near.1), (2, far.0, far.1)]);
        let sector = SectorRange::new(120.0);

        let hits = sector.detect_targets(&registry, Vec2::ZERO, Vec2::X, 32.0);
        assert_eq!(hits, vec![EntityId::from_raw(1)]);
    }

    #[test]
    fn test_sector_inclusion_by_angle() {
        let inside = at_angle(20.0, 59.0);
        let outside = at_angle(20.0, 61.0);
        let registry = registry_with(&[(1, inside.0, inside.1), (2, outside.0, outside.1)]);
        let sector = SectorRange::new(120.0);

        let hits = sector.detect_targets(&registry, Vec2::ZERO, Vec2::X, 32.0);
        assert_eq!(hits, vec![EntityId::from_raw(1)]);
    }

    #[test]
    fn test_sector_boundary_vertices() {
        let sector = SectorRange::new(120.0);
        let vertices = sector.boundary(Vec2::ZERO, Vec2::X, 32.0);

        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[0], Vec2::ZERO);
        // Both edge rays sit at the full radius
        assert!((vertices[1].length() - 32.0).abs() < 1e-3);
        assert!((vertices[2].length() - 32.0).abs() < 1e-3);
        // and 60 degrees off the facing ray
        let angle = vertices[1].normalize().dot(Vec2::X).acos().to_degrees();
        assert!((angle - 60.0).abs() < 1e-2);
    }

    #[test]
    fn test_rectangle_lane() {
        // Directly ahead at half length: inside. 20 units to the side at
        // the same forward distance: outside the width envelope (32/3).
        let registry = registry_with(&[(1, 16.0, 0.0), (2, 16.0, 20.0)]);
        let rect = RectangleRange::new();

        let hits = rect.detect_targets(&registry, Vec2::ZERO, Vec2::X, 32.0);
        assert_eq!(hits, vec![EntityId::from_raw(1)]);
    }

    #[test]
    fn test_rectangle_does_not_reach_backward() {
        let registry = registry_with(&[(1, -10.0, 0.0)]);
        let rect = RectangleRange::new();

        let hits = rect.detect_targets(&registry, Vec2::ZERO, Vec2::X, 32.0);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_rectangle_diagonal_overincludes_corner() {
        // With a diagonal facing the bounding-extent test accepts a point
        // near the corner that an oriented-box test would reject. This
        // pins the documented looser behavior.
        let diagonal = Vec2::new(1.0, 1.0).normalize();
        let registry = registry_with(&[(1, 20.0, 2.0)]);
        let rect = RectangleRange::new();

        let hits = rect.detect_targets(&registry, Vec2::ZERO, diagonal, 32.0);
        assert_eq!(hits, vec![EntityId::from_raw(1)]);
    }

    #[test]
    fn test_rectangle_boundary_has_four_corners() {
        let rect = RectangleRange::new();
        let vertices = rect.boundary(Vec2::ZERO, Vec2::Y, 30.0);

        assert_eq!(vertices.len(), 4);
        // Lane extends 30 units along +Y, 5 to each side
        assert!(vertices.iter().all(|v| v.y >= -1e-3 && v.y <= 30.0 + 1e-3));
        assert!(vertices.iter().all(|v| v.x.abs() - 5.0 < 1e-3));
    }

    #[test]
    fn test_circle_centered_ahead() {
        // Center sits at (16, 0) with radius 32: a target behind the
        // attacker at (-10, 0) is still within the disc, one at (-20, 0)
        // is not.
        let registry = registry_with(&[(1, -10.0, 0.0), (2, -20.0, 0.0)]);
        let circle = CircleRange::new();

        let hits = circle.detect_targets(&registry, Vec2::ZERO, Vec2::X, 32.0);
        assert_eq!(hits, vec![EntityId::from_raw(1)]);
    }

    #[test]
    fn test_zero_facing_falls_back_to_x() {
        let registry = registry_with(&[(1, 16.0, 0.0)]);
        let rect = RectangleRange::new();

        let hits = rect.detect_targets(&registry, Vec2::ZERO, Vec2::ZERO, 32.0);
        assert_eq!(hits, vec![EntityId::from_raw(1)]);
    }
}
