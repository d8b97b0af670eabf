//! Axis-aligned solid rectangles: the reference collision world.

use serde::{Deserialize, Serialize};

use crate::occupancy::{CollisionWorld, RayHit};
use crate::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Build from two corners in any order.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: Vec2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vec2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.min.x, self.max.x),
            p.y.clamp(self.min.y, self.max.y),
        )
    }

    pub fn distance_squared_to(&self, p: Vec2) -> f32 {
        self.closest_point(p).distance_squared(p)
    }

    pub fn expanded(&self, by: f32) -> Self {
        Self {
            min: self.min - Vec2::new(by, by),
            max: self.max + Vec2::new(by, by),
        }
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Vec2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Vec2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Slab test. Returns the entry distance along `dir` (0 when `origin` is inside).
    fn ray_entry(&self, origin: Vec2, dir: Vec2, max_distance: f32) -> Option<f32> {
        let mut t_min = 0.0_f32;
        let mut t_max = max_distance;

        for (o, d, lo, hi) in [
            (origin.x, dir.x, self.min.x, self.max.x),
            (origin.y, dir.y, self.min.y, self.max.y),
        ] {
            if d.abs() <= f32::EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let (mut t0, mut t1) = ((lo - o) * inv, (hi - o) * inv);
            if t0 > t1 {
                core::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

/// A static world made of solid rectangles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolidBoxes {
    pub solids: Vec<Aabb>,
}

impl SolidBoxes {
    pub fn new(solids: Vec<Aabb>) -> Self {
        Self { solids }
    }

    pub fn push(&mut self, solid: Aabb) {
        self.solids.push(solid);
    }

    /// Union of all solids, or `None` for an empty world.
    pub fn bounds(&self) -> Option<Aabb> {
        let mut iter = self.solids.iter();
        let first = *iter.next()?;
        Some(iter.fold(first, |acc, b| acc.union(b)))
    }
}

impl CollisionWorld for SolidBoxes {
    fn overlap_circle(&self, center: Vec2, radius: f32) -> bool {
        let r2 = radius * radius;
        self.solids
            .iter()
            .any(|b| b.distance_squared_to(center) <= r2)
    }

    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<RayHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec2::ZERO || max_distance < 0.0 {
            return None;
        }

        self.solids
            .iter()
            .filter_map(|b| b.ray_entry(origin, dir, max_distance))
            .min_by(f32::total_cmp)
            .map(|distance| RayHit {
                point: origin + dir * distance,
                distance,
            })
    }
}
