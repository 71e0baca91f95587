use std::f32::consts::FRAC_PI_4;

use glam::Vec3;

use crate::error::{SimError, SimResult};
use crate::model::{BodyHandle, BodySpec, OrbitMotion};

/// Window the native runner opens.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "SpaceSim".to_string(),
            width: 1600,
            height: 900,
        }
    }
}

/// Flight handling of the craft
#[derive(Debug, Clone)]
pub struct CraftTuning {
    /// Multiplier applied to roll rate and velocity every frame
    pub drag: f32,
    pub roll_step: f32,
    pub thrust_step: f32,
    /// Pointer offset (pixels from screen centre) is divided by this to get yaw/pitch per frame
    pub pointer_divisor: f32,
    pub roll_limit: f32,
    pub velocity_limit: f32,
    /// When false the limits are ignored and only drag bounds the rates
    pub clamp_rates: bool,
    pub start_position: Vec3,
    pub start_yaw: f32,
    pub start_pitch: f32,
    pub start_roll: f32,
}

impl Default for CraftTuning {
    fn default() -> Self {
        Self {
            drag: 0.8,
            roll_step: 0.5,
            thrust_step: 2.0,
            pointer_divisor: 15_000.0,
            roll_limit: 200.0,
            velocity_limit: 100.0,
            clamp_rates: true,
            start_position: Vec3::new(0.0, 28.0, 77.0),
            start_yaw: 0.0,
            start_pitch: -0.17,
            start_roll: 0.0,
        }
    }
}

/// Chase camera mounted on the craft, offsets in craft-local space
#[derive(Debug, Clone)]
pub struct CameraRig {
    pub follow_offset: Vec3,
    pub look_at_offset: Vec3,
    pub fov_y: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub skybox_scale: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            follow_offset: Vec3::new(0.0, 0.09, 0.2),
            look_at_offset: Vec3::new(0.0, 0.05, 0.0),
            fov_y: FRAC_PI_4,
            z_near: 0.1,
            z_far: 2000.0,
            skybox_scale: 1000.0,
        }
    }
}

/// How many expired projectiles are removed in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetirementPolicy {
    #[default]
    AllExpired,
    /// Only the last expired projectile found in the scan is removed
    LastExpiredOnly,
}

#[derive(Debug, Clone)]
pub struct ProjectileTuning {
    /// Per-frame advance is `craft.forward / step_divisor`
    pub step_divisor: f32,
    pub muzzle_forward_divisor: f32,
    pub muzzle_drop_divisor: f32,
    pub max_range: f32,
    pub render_scale: f32,
    pub retirement: RetirementPolicy,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            step_divisor: 5.0,
            muzzle_forward_divisor: 6.0,
            muzzle_drop_divisor: 20.0,
            max_range: 200.0,
            render_scale: 0.005,
            retirement: RetirementPolicy::AllExpired,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub window: WindowConfig,
    pub craft: CraftTuning,
    pub camera: CameraRig,
    pub projectiles: ProjectileTuning,
    pub bodies: Vec<BodySpec>,
    /// Seed for the initial orbital phases
    pub phase_seed: u64,
    pub max_frame_dt: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            craft: CraftTuning::default(),
            camera: CameraRig::default(),
            projectiles: ProjectileTuning::default(),
            bodies: solar_system(),
            phase_seed: 0x5eed,
            max_frame_dt: 0.1,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> SimResult<()> {
        let craft = &self.craft;
        if !(craft.drag > 0.0 && craft.drag <= 1.0) {
            return Err(invalid(format!("craft drag must be in (0, 1], got {}", craft.drag)));
        }
        if !positive(craft.pointer_divisor) {
            return Err(invalid(format!("pointer divisor must be positive, got {}", craft.pointer_divisor)));
        }
        if craft.clamp_rates && !(positive(craft.roll_limit) && positive(craft.velocity_limit)) {
            return Err(invalid("rate limits must be positive when clamping is enabled".to_string()));
        }

        let proj = &self.projectiles;
        for (name, value) in [
            ("step divisor", proj.step_divisor),
            ("muzzle forward divisor", proj.muzzle_forward_divisor),
            ("muzzle drop divisor", proj.muzzle_drop_divisor),
            ("max range", proj.max_range),
        ] {
            if !positive(value) {
                return Err(invalid(format!("projectile {name} must be positive, got {value}")));
            }
        }

        let cam = &self.camera;
        if !(positive(cam.fov_y) && positive(cam.z_near) && cam.z_far > cam.z_near) {
            return Err(invalid("camera projection needs fov > 0 and 0 < near < far".to_string()));
        }

        if self.window.width == 0 || self.window.height == 0 {
            return Err(invalid("window size must be non-zero".to_string()));
        }
        if !positive(self.max_frame_dt) {
            return Err(invalid(format!("max frame dt must be positive, got {}", self.max_frame_dt)));
        }
        Ok(())
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn invalid(message: String) -> SimError {
    SimError::InvalidConfig(message)
}

/// Sun, five planets and the earth's moon.
pub fn solar_system() -> Vec<BodySpec> {
    let planet = |name: &str, radius: f32, scale: f32, degrees_per_frame: f32| BodySpec {
        name: name.to_string(),
        radius,
        scale,
        phase_degrees: None,
        motion: OrbitMotion::Spin { degrees_per_frame },
        parent: None,
    };

    vec![
        BodySpec {
            phase_degrees: Some(0.0),
            ..planet("sun", 0.0, 2.0, 0.05)
        },
        planet("earth", 16.0, 1.0, 0.15),
        planet("mars", 21.0, 0.6, 0.2375),
        planet("jupiter", 27.0, 1.7, 0.325),
        planet("saturn", 36.0, 1.6, 0.4125),
        planet("uranus", 43.0, 1.5, 0.5),
        BodySpec {
            name: "moon".to_string(),
            radius: 2.0,
            scale: 0.5,
            phase_degrees: Some(0.0),
            motion: OrbitMotion::AbsoluteOrbit {
                radians_per_second: 1.5,
                tilt: FRAC_PI_4,
            },
            parent: Some(BodyHandle(1)),
        },
    ]
}
