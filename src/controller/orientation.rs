use glam::{Quat, Vec3};

/// Rotate `orientation` by simultaneous yaw, pitch and roll rates.
///
/// The three rates are taken about the orientation's own up, right and forward
/// axes, summed into one rotation vector and applied as a single axis-angle
/// rotation, so there is no yaw/pitch/roll ordering.
///
/// All-zero input returns `orientation` unchanged. A combined vector too small
/// to normalise is treated the same way. The result is renormalised so
/// repeated integration does not drift away from a pure rotation.
pub fn integrate(orientation: Quat, yaw: f32, pitch: f32, roll: f32) -> Quat {
    if yaw == 0.0 && pitch == 0.0 && roll == 0.0 {
        return orientation;
    }

    let right = orientation * Vec3::X;
    let up = orientation * Vec3::Y;
    let forward = orientation * Vec3::NEG_Z;
    let combined = right * pitch + up * yaw + forward * roll;

    let Some(axis) = combined.try_normalize() else {
        return orientation;
    };
    let angle = combined.length();

    (Quat::from_axis_angle(axis, angle) * orientation).normalize()
}
