//! Locomotion Math Helpers
//!
//! Small frame-rate aware helpers on top of `glam`:
//! - critically damped smoothing (`smooth_damp`)
//! - exponential blend factors for rotation smoothing
//! - flattening camera axes onto the ground plane
//! - facing rotations for a movement direction

use glam::{Quat, Vec2, Vec3};

/// Squared input magnitude above which the character counts as moving.
pub const MOVE_EPSILON_SQ: f32 = 0.01;

/// Minimum smooth time accepted by `smooth_damp`.
const MIN_SMOOTH_TIME: f32 = 0.0001;

/// Move `current` toward `target` with critical damping.
///
/// `velocity` is the damping state and must be kept between calls.
/// `smooth_time` is roughly the time to reach the target.
/// The result never overshoots the target.
pub fn smooth_damp(
    current: Vec2,
    target: Vec2,
    velocity: &mut Vec2,
    smooth_time: f32,
    dt: f32,
) -> Vec2 {
    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;

    // Pade approximation of exp(-omega * dt)
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    // Clamp to the target if we passed it this step
    if (target - current).dot(output - target) > 0.0 {
        output = target;
        *velocity = Vec2::ZERO;
    }

    output
}

/// Blend factor for exponential approach at `rate` per second.
///
/// Equivalent to `rate * dt` for small steps but stable for any `dt`.
#[inline]
pub fn exp_blend(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt).exp()
}

/// Project an axis onto the ground plane and renormalise.
///
/// Returns zero if the axis is vertical.
#[inline]
pub fn flatten_axis(axis: Vec3) -> Vec3 {
    Vec3::new(axis.x, 0.0, axis.z).normalize_or_zero()
}

/// Rotation about +Y that makes the local +Z axis face `direction`.
///
/// Only the horizontal part of `direction` is used.
pub fn facing_rotation(direction: Vec3) -> Option<Quat> {
    let flat = flatten_axis(direction);
    if flat == Vec3::ZERO {
        return None;
    }
    Some(Quat::from_rotation_y(flat.x.atan2(flat.z)))
}

/// Check whether an input sample counts as movement.
#[inline]
pub fn is_moving(input: Vec2) -> bool {
    input.length_squared() > MOVE_EPSILON_SQ
}
