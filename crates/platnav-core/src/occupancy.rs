//! Collision boundary and the occupancy oracle built on top of it.

use crate::{ProbeConfig, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec2,
    /// Distance from the ray origin to `point`.
    pub distance: f32,
}

/// Physics queries against the solid geometry of the host world.
///
/// Implementations must be side-effect free.
pub trait CollisionWorld {
    fn overlap_circle(&self, center: Vec2, radius: f32) -> bool;

    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<RayHit>;

    /// Sweep a box of `size` from `center` along `direction`.
    ///
    /// The default sweeps three parallel rays across the box extent perpendicular to
    /// `direction` and reports the nearest hit. Hosts with a native box cast should override it.
    fn box_cast(
        &self,
        center: Vec2,
        size: Vec2,
        direction: Vec2,
        max_distance: f32,
    ) -> Option<RayHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec2::ZERO {
            return None;
        }
        let side = Vec2::new(-dir.y, dir.x);
        let half_extent = 0.5 * (side.x.abs() * size.x + side.y.abs() * size.y);

        [-half_extent, 0.0, half_extent]
            .into_iter()
            .filter_map(|offset| self.raycast(center + side * offset, dir, max_distance))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

impl<C: CollisionWorld + ?Sized> CollisionWorld for &C {
    fn overlap_circle(&self, center: Vec2, radius: f32) -> bool {
        (**self).overlap_circle(center, radius)
    }

    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<RayHit> {
        (**self).raycast(origin, direction, max_distance)
    }

    fn box_cast(
        &self,
        center: Vec2,
        size: Vec2,
        direction: Vec2,
        max_distance: f32,
    ) -> Option<RayHit> {
        (**self).box_cast(center, size, direction, max_distance)
    }
}

/// Navigability questions asked by the grid and waypoint builders.
pub trait Occupancy {
    /// Overlap test with the clearance radius.
    fn is_solid(&self, point: Vec2) -> bool;

    /// Overlap test with the ground-check radius; used for horizontal neighbor tests.
    fn is_obstructed(&self, point: Vec2) -> bool;

    fn has_ground_below(&self, point: Vec2, probe_distance: f32) -> bool;

    /// Empty at `point` with ground support underneath.
    fn is_open_with_support(&self, point: Vec2) -> bool;

    fn is_clear(&self, point: Vec2, radius: f32) -> bool;

    fn has_line_of_sight(&self, from: Vec2, to: Vec2) -> bool;

    /// Height of the first surface straight below `point`, if any within `max_distance`.
    fn ground_height(&self, point: Vec2, max_distance: f32) -> Option<f32>;
}

/// [`Occupancy`] over a [`CollisionWorld`] using layered probes.
///
/// Ground support is detected by, in order: overlap circles at fixed offsets below the point,
/// a thin box swept straight down, and a fan of angled rays. The first positive probe wins,
/// which keeps thin and sloped platforms from being missed.
#[derive(Debug, Clone)]
pub struct OccupancyOracle<C> {
    world: C,
    probe: ProbeConfig,
}

impl<C: CollisionWorld> OccupancyOracle<C> {
    pub fn new(world: C, probe: ProbeConfig) -> Self {
        Self { world, probe }
    }

    pub fn world(&self) -> &C {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut C {
        &mut self.world
    }

    pub fn probe(&self) -> &ProbeConfig {
        &self.probe
    }

    fn overlap_probes_hit(&self, point: Vec2) -> bool {
        self.probe.probe_heights.iter().any(|&offset| {
            self.world
                .overlap_circle(point - Vec2::new(0.0, offset), self.probe.ground_check_radius)
        })
    }

    fn box_probe_hit(&self, point: Vec2, probe_distance: f32) -> bool {
        let size = Vec2::new(
            self.probe.ground_check_radius * 2.0,
            self.probe.box_cast_thickness,
        );
        self.world
            .box_cast(point, size, Vec2::DOWN, probe_distance)
            .is_some()
    }

    fn fan_probe_hit(&self, point: Vec2, probe_distance: f32) -> bool {
        self.probe.fan_angles.iter().any(|&angle| {
            self.world
                .raycast(point, Vec2::DOWN.rotated(angle), probe_distance)
                .is_some()
        })
    }
}

impl<C: CollisionWorld> Occupancy for OccupancyOracle<C> {
    fn is_solid(&self, point: Vec2) -> bool {
        self.world.overlap_circle(point, self.probe.clearance_radius)
    }

    fn is_obstructed(&self, point: Vec2) -> bool {
        self.world
            .overlap_circle(point, self.probe.ground_check_radius)
    }

    fn has_ground_below(&self, point: Vec2, probe_distance: f32) -> bool {
        self.overlap_probes_hit(point)
            || self.box_probe_hit(point, probe_distance)
            || self.fan_probe_hit(point, probe_distance)
    }

    fn is_open_with_support(&self, point: Vec2) -> bool {
        !self.is_solid(point) && self.has_ground_below(point, self.probe.ground_check_distance)
    }

    fn is_clear(&self, point: Vec2, radius: f32) -> bool {
        !self.world.overlap_circle(point, radius)
    }

    fn has_line_of_sight(&self, from: Vec2, to: Vec2) -> bool {
        let delta = to - from;
        let distance = delta.length();
        if distance <= f32::EPSILON {
            return !self.is_solid(from);
        }
        self.world.raycast(from, delta, distance).is_none()
    }

    fn ground_height(&self, point: Vec2, max_distance: f32) -> Option<f32> {
        self.world
            .raycast(point, Vec2::DOWN, max_distance)
            .map(|hit| hit.point.y)
    }
}
