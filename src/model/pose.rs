use glam::{Affine3A, Mat4, Quat, Vec3};

/// World-space affine transform of a movable object.
///
/// Stored column-vector style (`glam`), so `a * b` applies `b` first. Basis
/// accessors follow the right-handed convention where forward is `-Z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidPose {
    affine: Affine3A,
}

impl Default for RigidPose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl RigidPose {
    pub const IDENTITY: Self = Self { affine: Affine3A::IDENTITY };

    pub fn from_affine(affine: Affine3A) -> Self {
        Self { affine }
    }

    pub fn from_rotation_translation(rotation: Quat, translation: Vec3) -> Self {
        Self::from_affine(Affine3A::from_rotation_translation(rotation, translation))
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self::from_affine(Affine3A::from_translation(translation))
    }

    pub fn affine(&self) -> Affine3A {
        self.affine
    }

    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from(self.affine)
    }

    pub fn translation(&self) -> Vec3 {
        Vec3::from(self.affine.translation)
    }

    pub fn up(&self) -> Vec3 {
        Vec3::from(self.affine.matrix3.y_axis)
    }

    pub fn down(&self) -> Vec3 {
        -self.up()
    }

    pub fn forward(&self) -> Vec3 {
        -Vec3::from(self.affine.matrix3.z_axis)
    }

    /// Map a point given in this pose's local frame into world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.affine.transform_point3(local)
    }

    /// Apply `world` after this pose (rotations/scales act about the world origin).
    pub fn then(&self, world: Affine3A) -> Self {
        Self::from_affine(world * self.affine)
    }

    /// Shift by a world-space offset without touching the linear part.
    pub fn translated(&self, offset: Vec3) -> Self {
        self.then(Affine3A::from_translation(offset))
    }

    pub fn abs_diff_eq(&self, other: &Self, max_abs_diff: f32) -> bool {
        self.affine.abs_diff_eq(other.affine, max_abs_diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity_basis() {
        let pose = RigidPose::IDENTITY;
        assert_eq!(pose.up(), Vec3::Y);
        assert_eq!(pose.forward(), Vec3::NEG_Z);
        assert_eq!(pose.down(), Vec3::NEG_Y);
        assert_eq!(pose.translation(), Vec3::ZERO);
    }

    #[test]
    fn test_transform_point_uses_rotation_and_translation() {
        let pose = RigidPose::from_rotation_translation(
            Quat::from_rotation_y(FRAC_PI_2),
            Vec3::new(1.0, 2.0, 3.0),
        );
        // A quarter turn about +Y maps -Z onto -X
        let p = pose.transform_point(Vec3::NEG_Z);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 2.0, 3.0), 1e-6), "got {p}");
        assert!(pose.forward().abs_diff_eq(Vec3::NEG_X, 1e-6));
    }

    #[test]
    fn test_then_rotates_about_world_origin() {
        let pose = RigidPose::from_translation(Vec3::new(10.0, 0.0, 0.0));
        let turned = pose.then(Affine3A::from_rotation_y(FRAC_PI_2));
        assert!(turned
            .translation()
            .abs_diff_eq(Vec3::new(0.0, 0.0, -10.0), 1e-5));
        assert!((turned.translation().length() - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_translated_keeps_orientation() {
        let pose = RigidPose::from_rotation_translation(Quat::from_rotation_x(0.3), Vec3::ZERO);
        let moved = pose.translated(Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(moved.forward(), pose.forward());
        assert_eq!(moved.translation(), Vec3::new(0.0, 5.0, 0.0));
    }
}
