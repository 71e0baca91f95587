use glam::{Affine3A, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::{SimError, SimResult};
use super::RigidPose;

/// Stable index of a body inside its [`OrbitSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub usize);

impl BodyHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Per-body update rule. Spinning bodies accumulate their rotation frame by
/// frame (and drift accordingly), satellites are recomputed from the absolute
/// simulation time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbitMotion {
    /// Incremental rotation about the world Y axis, applied once per frame.
    /// A body placed off the origin therefore also revolves around it.
    Spin { degrees_per_frame: f32 },
    /// `parent ∘ rotZ(tilt) ∘ rotY(phase + speed·t) ∘ translate(radius) ∘ scale`
    AbsoluteOrbit { radians_per_second: f32, tilt: f32 },
}

/// Static description of a body, used to build an [`OrbitSystem`].
#[derive(Debug, Clone, PartialEq)]
pub struct BodySpec {
    pub name: String,
    pub radius: f32,
    pub scale: f32,
    /// `None` draws a whole-degree phase from the system's RNG
    pub phase_degrees: Option<f32>,
    pub motion: OrbitMotion,
    pub parent: Option<BodyHandle>,
}

#[derive(Debug, Clone)]
pub struct OrbitBody {
    pub name: String,
    pub pose: RigidPose,
    pub radius: f32,
    pub scale: f32,
    pub phase_degrees: f32,
    pub motion: OrbitMotion,
    pub parent: Option<BodyHandle>,
}

impl OrbitBody {
    fn placed(spec: &BodySpec, phase_degrees: f32, parent_pose: Option<&RigidPose>) -> Self {
        let mut body = Self {
            name: spec.name.clone(),
            pose: RigidPose::IDENTITY,
            radius: spec.radius,
            scale: spec.scale,
            phase_degrees,
            motion: spec.motion,
            parent: spec.parent,
        };
        body.pose = match body.motion {
            OrbitMotion::Spin { .. } => body.initial_placement(),
            OrbitMotion::AbsoluteOrbit { radians_per_second, tilt } => {
                body.orbit_pose(parent_pose, radians_per_second, tilt, 0.0)
            }
        };
        body
    }

    /// Scale, push out to the orbit radius, then turn to the starting phase.
    pub fn initial_placement(&self) -> RigidPose {
        RigidPose::from_affine(
            Affine3A::from_rotation_y(self.phase_degrees.to_radians())
                * Affine3A::from_translation(Vec3::new(self.radius, 0.0, 0.0))
                * Affine3A::from_scale(Vec3::splat(self.scale)),
        )
    }

    /// Closed-form satellite pose at absolute time `time`.
    fn orbit_pose(
        &self,
        parent_pose: Option<&RigidPose>,
        radians_per_second: f32,
        tilt: f32,
        time: f32,
    ) -> RigidPose {
        let angle = self.phase_degrees.to_radians() + radians_per_second * time;
        let local = Affine3A::from_rotation_z(tilt)
            * Affine3A::from_rotation_y(angle)
            * Affine3A::from_translation(Vec3::new(self.radius, 0.0, 0.0))
            * Affine3A::from_scale(Vec3::splat(self.scale));
        let parent = parent_pose.copied().unwrap_or(RigidPose::IDENTITY);
        RigidPose::from_affine(parent.affine() * local)
    }

    /// Advance this body by one frame and return its new pose.
    pub fn update(&mut self, parent_pose: Option<&RigidPose>, total_time: f32) -> RigidPose {
        self.pose = match self.motion {
            OrbitMotion::Spin { degrees_per_frame } => self
                .pose
                .then(Affine3A::from_rotation_y(degrees_per_frame.to_radians())),
            OrbitMotion::AbsoluteOrbit { radians_per_second, tilt } => {
                self.orbit_pose(parent_pose, radians_per_second, tilt, total_time)
            }
        };
        self.pose
    }
}

/// Arena of bodies. A parent is always added before its children, so index
/// order is a valid update order and cycles cannot be expressed. Only
/// `AbsoluteOrbit` bodies may have a parent.
#[derive(Debug, Clone)]
pub struct OrbitSystem {
    bodies: Vec<OrbitBody>,
    rng: StdRng,
}

impl OrbitSystem {
    pub fn new(phase_seed: u64) -> Self {
        Self {
            bodies: Vec::new(),
            rng: StdRng::seed_from_u64(phase_seed),
        }
    }

    pub fn from_specs(specs: &[BodySpec], phase_seed: u64) -> SimResult<Self> {
        let mut system = Self::new(phase_seed);
        for spec in specs {
            system.add_body(spec)?;
        }
        Ok(system)
    }

    pub fn add_body(&mut self, spec: &BodySpec) -> SimResult<BodyHandle> {
        let parent_pose = match spec.parent {
            Some(parent) => match self.bodies.get(parent.0) {
                Some(body) => Some(body.pose),
                None => {
                    return Err(SimError::UnknownParent {
                        body: spec.name.clone(),
                        parent,
                    })
                }
            },
            None => None,
        };
        // Spin accumulates in world space and never reads a parent pose
        if parent_pose.is_some() && matches!(spec.motion, OrbitMotion::Spin { .. }) {
            return Err(SimError::InvalidConfig(format!(
                "spinning body {} cannot have a parent",
                spec.name
            )));
        }

        let phase = match spec.phase_degrees {
            Some(phase) => phase,
            None => self.rng.random_range(0u32..360) as f32,
        };

        let handle = BodyHandle(self.bodies.len());
        debug!(body = %spec.name, ?handle, phase, "adding orbit body");
        self.bodies
            .push(OrbitBody::placed(spec, phase, parent_pose.as_ref()));
        Ok(handle)
    }

    /// Update every body, parents first.
    pub fn update(&mut self, total_time: f32) {
        for idx in 0..self.bodies.len() {
            let parent_pose = self.bodies[idx].parent.map(|p| self.bodies[p.0].pose);
            self.bodies[idx].update(parent_pose.as_ref(), total_time);
        }
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&OrbitBody> {
        self.bodies.get(handle.0)
    }

    pub fn find(&self, name: &str) -> Option<BodyHandle> {
        self.bodies.iter().position(|b| b.name == name).map(BodyHandle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &OrbitBody)> {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyHandle(i), b))
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::solar_system;
    use std::f32::consts::FRAC_PI_4;

    fn moon_spec(parent: BodyHandle) -> BodySpec {
        BodySpec {
            name: "moon".to_string(),
            radius: 2.0,
            scale: 0.5,
            phase_degrees: Some(0.0),
            motion: OrbitMotion::AbsoluteOrbit {
                radians_per_second: 1.5,
                tilt: FRAC_PI_4,
            },
            parent: Some(parent),
        }
    }

    fn planet_spec(radius: f32, degrees_per_frame: f32) -> BodySpec {
        BodySpec {
            name: "planet".to_string(),
            radius,
            scale: 1.0,
            phase_degrees: Some(30.0),
            motion: OrbitMotion::Spin { degrees_per_frame },
            parent: None,
        }
    }

    #[test]
    fn test_satellite_matches_closed_form() {
        let mut system = OrbitSystem::new(1);
        // Parent that never moves so the closed form can be written down directly
        let parent = system.add_body(&planet_spec(16.0, 0.0)).unwrap();
        let moon = system.add_body(&moon_spec(parent)).unwrap();
        let parent_pose = system.get(parent).unwrap().pose;

        for t in [0.0_f32, 0.016, 1.0, 7.25, 123.0] {
            system.update(t);
            let expected = parent_pose.affine()
                * Affine3A::from_rotation_z(FRAC_PI_4)
                * Affine3A::from_rotation_y(1.5 * t)
                * Affine3A::from_translation(Vec3::new(2.0, 0.0, 0.0))
                * Affine3A::from_scale(Vec3::splat(0.5));
            let got = system.get(moon).unwrap().pose;
            assert!(
                got.abs_diff_eq(&RigidPose::from_affine(expected), 1e-4),
                "t={t}: {got:?}"
            );
        }
    }

    #[test]
    fn test_satellite_does_not_depend_on_frame_count() {
        let mut stepped = OrbitSystem::from_specs(&solar_system(), 9).unwrap();
        let mut direct = OrbitSystem::from_specs(&solar_system(), 9).unwrap();
        let moon = stepped.find("moon").unwrap();

        // Same number of parent updates, different clock sampling for the moon
        for frame in 1..=10 {
            stepped.update(frame as f32 * 0.3);
            direct.update(if frame == 10 { 3.0 } else { 0.0 });
        }
        let a = stepped.get(moon).unwrap().pose;
        let b = direct.get(moon).unwrap().pose;
        assert!(a.abs_diff_eq(&b, 1e-4), "{a:?} vs {b:?}");
    }

    #[test]
    fn test_spin_at_origin_stays_in_place() {
        let mut system = OrbitSystem::from_specs(&solar_system(), 3).unwrap();
        let sun = system.find("sun").unwrap();
        for frame in 0..500 {
            system.update(frame as f32 / 60.0);
        }
        let pose = system.get(sun).unwrap().pose;
        assert!(pose.translation().length() < 1e-4);
        // Uniform scale of 2 survives the accumulated spin
        assert!((pose.up().length() - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_spin_off_origin_keeps_radius() {
        let mut system = OrbitSystem::new(0);
        let handle = system.add_body(&planet_spec(21.0, 0.2375)).unwrap();
        let before = system.get(handle).unwrap().pose.translation();
        for _ in 0..1000 {
            system.update(0.0);
        }
        let after = system.get(handle).unwrap().pose.translation();
        assert!((after.length() - 21.0).abs() < 1e-2, "radius drifted to {}", after.length());
        assert!((after.y).abs() < 1e-4);
        assert!(before.distance(after) > 1.0, "body should have moved along its circle");
    }

    #[test]
    fn test_initial_placement_uses_phase() {
        let mut system = OrbitSystem::new(0);
        let handle = system.add_body(&planet_spec(10.0, 0.0)).unwrap();
        let pos = system.get(handle).unwrap().pose.translation();
        let phase = 30f32.to_radians();
        let expected = Vec3::new(10.0 * phase.cos(), 0.0, -10.0 * phase.sin());
        assert!(pos.abs_diff_eq(expected, 1e-4), "{pos} vs {expected}");
    }

    #[test]
    fn test_random_phases_are_reproducible_and_whole_degrees() {
        let a = OrbitSystem::from_specs(&solar_system(), 42).unwrap();
        let b = OrbitSystem::from_specs(&solar_system(), 42).unwrap();
        for ((_, x), (_, y)) in a.iter().zip(b.iter()) {
            assert_eq!(x.phase_degrees, y.phase_degrees);
            assert_eq!(x.phase_degrees.fract(), 0.0);
            assert!((0.0..360.0).contains(&x.phase_degrees));
        }
    }

    #[test]
    fn test_unknown_parent_is_rejected() {
        let mut system = OrbitSystem::new(0);
        let err = system.add_body(&moon_spec(BodyHandle(4))).unwrap_err();
        assert!(matches!(err, SimError::UnknownParent { parent: BodyHandle(4), .. }));
        assert!(system.is_empty());
    }

    #[test]
    fn test_spinning_child_is_rejected() {
        let mut system = OrbitSystem::new(0);
        let earth = system.add_body(&planet_spec(16.0, 0.15)).unwrap();
        let child = BodySpec {
            name: "ring".to_string(),
            parent: Some(earth),
            ..planet_spec(2.0, 0.5)
        };
        let err = system.add_body(&child).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)), "{err:?}");
        assert_eq!(system.len(), 1);
    }

    #[test]
    fn test_satellite_of_moving_parent_is_placed_relative_to_it() {
        let mut system = OrbitSystem::new(0);
        let earth = system.add_body(&planet_spec(16.0, 0.15)).unwrap();
        let moon = system.add_body(&moon_spec(earth)).unwrap();
        for frame in 1..=120 {
            system.update(frame as f32 / 60.0);
            let e = system.get(earth).unwrap().pose.translation();
            let m = system.get(moon).unwrap().pose.translation();
            assert!((e.distance(m) - 2.0).abs() < 1e-3, "frame {frame}: distance {}", e.distance(m));
        }
    }
}
