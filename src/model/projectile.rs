use glam::Vec3;
use tracing::debug;

use crate::config::{ProjectileTuning, RetirementPolicy};
use super::RigidPose;

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    /// Spawn point, kept for the range test
    pub origin: Vec3,
    pub pose: RigidPose,
    /// Craft forward at spawn time
    pub direction: Vec3,
    /// Craft down at spawn time
    pub drop: Vec3,
}

impl Projectile {
    pub fn new(origin: Vec3, forward: Vec3, down: Vec3, tuning: &ProjectileTuning) -> Self {
        let muzzle = origin
            + forward / tuning.muzzle_forward_divisor
            + down / tuning.muzzle_drop_divisor;
        Self {
            origin,
            pose: RigidPose::from_translation(muzzle),
            direction: forward,
            drop: down,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.pose.translation()
    }

    /// `|origin| - |position|`. Only meaningful because everything in the
    /// scene happens close to the world origin.
    pub fn travelled(&self) -> f32 {
        self.origin.length() - self.position().length()
    }

    pub fn is_expired(&self, max_range: f32) -> bool {
        self.travelled() > max_range
    }
}

/// Owns every live projectile.
#[derive(Debug, Clone)]
pub struct ProjectilePool {
    live: Vec<Projectile>,
    tuning: ProjectileTuning,
}

impl ProjectilePool {
    pub fn new(tuning: ProjectileTuning) -> Self {
        Self {
            live: Vec::new(),
            tuning,
        }
    }

    pub fn spawn(&mut self, position: Vec3, forward: Vec3, down: Vec3) {
        let projectile = Projectile::new(position, forward, down, &self.tuning);
        debug!(origin = ?position, live = self.live.len() + 1, "projectile spawned");
        self.live.push(projectile);
    }

    /// Move every projectile along the craft's *current* forward axis.
    pub fn advance(&mut self, craft_forward: Vec3) {
        let step = craft_forward / self.tuning.step_divisor;
        for projectile in &mut self.live {
            projectile.pose = projectile.pose.translated(step);
        }
    }

    /// Remove projectiles past the maximum range, returns how many went.
    pub fn retire_expired(&mut self) -> usize {
        let max_range = self.tuning.max_range;
        let before = self.live.len();

        match self.tuning.retirement {
            RetirementPolicy::AllExpired => {
                self.live.retain(|p| !p.is_expired(max_range));
            }
            RetirementPolicy::LastExpiredOnly => {
                if let Some(idx) = self.live.iter().rposition(|p| p.is_expired(max_range)) {
                    self.live.remove(idx);
                }
            }
        }

        let retired = before - self.live.len();
        if retired > 0 {
            debug!(retired, live = self.live.len(), "projectiles retired");
        }
        retired
    }

    pub fn tuning(&self) -> &ProjectileTuning {
        &self.tuning
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Projectile> {
        self.live.iter()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
