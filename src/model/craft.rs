use glam::{EulerRot, Quat, Vec3};

use crate::config::CraftTuning;
use super::RigidPose;

/// The player's craft: orientation, position and the two damped rates
#[derive(Debug, Clone, PartialEq)]
pub struct CraftState {
    pub orientation: Quat,
    pub position: Vec3,
    pub velocity: f32,
    pub roll_rate: f32,
}

impl CraftState {
    pub fn new(tuning: &CraftTuning) -> Self {
        let orientation = Quat::from_euler(
            EulerRot::YXZ,
            tuning.start_yaw,
            tuning.start_pitch,
            tuning.start_roll,
        );
        Self::at_rest(orientation, tuning.start_position)
    }

    pub fn at_rest(orientation: Quat, position: Vec3) -> Self {
        Self {
            orientation,
            position,
            velocity: 0.0,
            roll_rate: 0.0,
        }
    }

    pub fn pose(&self) -> RigidPose {
        RigidPose::from_rotation_translation(self.orientation, self.position)
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    pub fn down(&self) -> Vec3 {
        -self.up()
    }
}
