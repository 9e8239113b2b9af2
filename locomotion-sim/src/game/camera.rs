//! Follow Camera
//!
//! Third-person orbit camera with a single yaw accumulator.
//! The controller only needs its ground-plane basis.

use glam::{Quat, Vec3};

use crate::core::math::flatten_axis;
use crate::game::config::CameraConfig;

/// Camera axes flattened onto the ground plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraBasis {
    /// Horizontal forward, unit length (or zero if the camera looks straight down)
    pub forward: Vec3,
    /// Horizontal right, unit length (or zero)
    pub right: Vec3,
}

impl CameraBasis {
    /// Build from a view direction; the basis is flattened.
    pub fn from_forward(forward: Vec3) -> Self {
        let forward = flatten_axis(forward);
        let right = Vec3::Y.cross(forward).normalize_or_zero();
        Self { forward, right }
    }

    /// Camera looking down +Z with +X to the right.
    pub fn world() -> Self {
        Self { forward: Vec3::Z, right: Vec3::X }
    }

    /// Project a stick sample onto the ground plane.
    #[inline]
    pub fn project(&self, input: glam::Vec2) -> Vec3 {
        self.forward * input.y + self.right * input.x
    }
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self::world()
    }
}

/// Camera placement for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    /// World position
    pub position: Vec3,
    /// Unit view direction
    pub forward: Vec3,
}

impl CameraPose {
    /// Ground-plane basis of this pose.
    pub fn basis(&self) -> CameraBasis {
        CameraBasis::from_forward(self.forward)
    }
}

/// Orbit camera following a target.
#[derive(Clone, Debug)]
pub struct FollowCamera {
    offset: Vec3,
    look_offset: Vec3,
    rotation_speed: f32,
    yaw_degrees: f32,
    pose: CameraPose,
}

impl FollowCamera {
    /// Create a camera already placed around `target`.
    pub fn new(config: &CameraConfig, target: Vec3) -> Self {
        let mut camera = Self {
            offset: Vec3::from_array(config.offset),
            look_offset: Vec3::from_array(config.look_offset),
            rotation_speed: config.rotation_speed,
            yaw_degrees: 0.0,
            pose: CameraPose { position: Vec3::ZERO, forward: Vec3::Z },
        };
        camera.place(target);
        camera
    }

    /// Accumulate pointer yaw and re-place around `target`.
    pub fn update(&mut self, target: Vec3, pointer_dx: f32, dt: f32) -> CameraPose {
        self.yaw_degrees += pointer_dx * self.rotation_speed * dt;
        self.place(target);
        self.pose
    }

    fn place(&mut self, target: Vec3) {
        let rotation = Quat::from_rotation_y(self.yaw_degrees.to_radians());
        let position = target + rotation * self.offset;
        let look_at = target + self.look_offset;
        let forward = (look_at - position).try_normalize().unwrap_or(self.pose.forward);
        self.pose = CameraPose { position, forward };
    }

    /// Current yaw in degrees.
    pub fn yaw_degrees(&self) -> f32 {
        self.yaw_degrees
    }

    /// Current pose.
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    /// Current ground-plane basis.
    pub fn basis(&self) -> CameraBasis {
        self.pose.basis()
    }
}
