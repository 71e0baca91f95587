use glam::{Mat4, Vec3};

use crate::config::CameraRig;
use super::RigidPose;

/// Chase camera, re-derived from the craft pose every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    pub eye: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl CameraState {
    pub fn new(rig: &CameraRig, width: u32, height: u32) -> Self {
        Self {
            eye: Vec3::new(0.0, 30.0, 80.0),
            look_at: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: rig.fov_y,
            aspect: aspect(width, height),
            z_near: rig.z_near,
            z_far: rig.z_far,
        }
    }

    /// Place the camera behind and above the craft, looking just over its nose.
    pub fn follow(&mut self, craft: &RigidPose, rig: &CameraRig) {
        self.eye = craft.transform_point(rig.follow_offset);
        self.look_at = craft.transform_point(rig.look_at_offset);
        self.up = craft.up().normalize_or_zero();
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = aspect(width, height);
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.look_at, self.up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.z_near, self.z_far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

fn aspect(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec2};

    #[test]
    fn test_follow_sits_behind_and_above() {
        let rig = CameraRig::default();
        let mut cam = CameraState::new(&rig, 1600, 900);
        let craft = RigidPose::from_rotation_translation(Quat::IDENTITY, Vec3::new(5.0, 0.0, 0.0));
        cam.follow(&craft, &rig);

        assert!(cam.eye.abs_diff_eq(Vec3::new(5.0, 0.09, 0.2), 1e-6));
        assert!(cam.look_at.abs_diff_eq(Vec3::new(5.0, 0.05, 0.0), 1e-6));
        assert_eq!(cam.up, Vec3::Y);
    }

    #[test]
    fn test_look_at_projects_to_screen_centre() {
        let rig = CameraRig::default();
        let mut cam = CameraState::new(&rig, 1600, 900);
        let craft = RigidPose::from_rotation_translation(Quat::from_rotation_y(1.0), Vec3::new(3.0, 4.0, 5.0));
        cam.follow(&craft, &rig);

        let clip = cam.view_proj() * cam.look_at.extend(1.0);
        let ndc = Vec2::new(clip.x, clip.y) / clip.w;
        assert!(ndc.abs_diff_eq(Vec2::ZERO, 1e-4), "{ndc}");
    }

    #[test]
    fn test_aspect_tracks_resize() {
        let mut cam = CameraState::new(&CameraRig::default(), 1600, 900);
        cam.set_aspect(800, 800);
        assert_eq!(cam.aspect, 1.0);
    }
}
