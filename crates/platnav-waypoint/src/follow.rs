use platnav_core::{NavPath, TickContext, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FollowStatus {
    Moving,
    Arrived,
}

/// Moves a point along a [`NavPath`] at a fixed speed.
#[derive(Debug, Clone)]
pub struct PathFollower {
    path: NavPath,
    speed: f32,
    arrival_distance: f32,
    next_index: usize,
}

impl PathFollower {
    pub fn new(path: NavPath, speed: f32, arrival_distance: f32) -> Self {
        Self {
            path,
            speed,
            arrival_distance,
            next_index: 0,
        }
    }

    pub fn path(&self) -> &NavPath {
        &self.path
    }

    /// Point currently being steered toward.
    pub fn next_point(&self) -> Option<Vec2> {
        self.path.points.get(self.next_index).copied()
    }

    pub fn remaining(&self) -> &[Vec2] {
        &self.path.points[self.next_index.min(self.path.points.len())..]
    }

    pub fn is_finished(&self) -> bool {
        self.next_index >= self.path.points.len()
    }

    /// Advance `position` by `speed * dt` along the remaining points.
    ///
    /// Points within `arrival_distance` are consumed without moving.
    pub fn advance(&mut self, position: Vec2, ctx: &TickContext) -> (Vec2, FollowStatus) {
        let mut current = position;
        while let Some(target) = self.next_point() {
            if current.distance(target) > self.arrival_distance {
                break;
            }
            self.next_index += 1;
        }

        let dt = ctx.dt_seconds.max(0.0);
        let mut remaining = self.speed.max(0.0) * dt;

        while self.next_index < self.path.points.len() && remaining > 0.0 {
            let target = self.path.points[self.next_index];
            let to_target = target - current;
            let dist = to_target.length();

            if dist <= f32::EPSILON {
                self.next_index += 1;
                continue;
            }

            if remaining >= dist {
                current = target;
                self.next_index += 1;
                remaining -= dist;
                continue;
            }

            current = current + to_target * (remaining / dist);
            break;
        }

        let status = if self.is_finished() {
            FollowStatus::Arrived
        } else {
            FollowStatus::Moving
        };
        (current, status)
    }
}
