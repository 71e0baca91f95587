// MODEL: Simulation state
pub mod pose;
pub mod craft;
pub mod camera;
pub mod orbit;
pub mod projectile;

pub use pose::RigidPose;
pub use craft::CraftState;
pub use camera::CameraState;
pub use orbit::{BodyHandle, BodySpec, OrbitBody, OrbitMotion, OrbitSystem};
pub use projectile::{Projectile, ProjectilePool};
