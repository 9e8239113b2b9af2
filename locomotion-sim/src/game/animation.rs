//! Animation and HUD Outputs
//!
//! The controller derives a parameter snapshot each locomotion tick.
//! Hosts forward it to whatever animator and stamina widget they own.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Animator float parameter: local strafe axis.
pub const PARAM_MOVE_X: &str = "MoveX";
/// Animator float parameter: local forward axis.
pub const PARAM_MOVE_Z: &str = "MoveZ";
/// Animator bool parameter: moving.
pub const PARAM_IS_MOVING: &str = "IsMoving";
/// Animator bool parameter: sprint granted.
pub const PARAM_SPRINT: &str = "Sprint";
/// Animator trigger: roll started.
pub const TRIGGER_ROLL: &str = "Roll";

/// Animation parameters for one locomotion tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationFrame {
    /// Character-local strafe component, in [-1, 1]
    pub move_x: f32,
    /// Character-local forward component, in [-1, 1]
    pub move_z: f32,
    /// Smoothed input is above the movement threshold
    pub is_moving: bool,
    /// Sprint was granted this tick
    pub sprint: bool,
}

impl AnimationFrame {
    /// Derive local axes from a world move vector and the current facing.
    pub fn from_world_move(world_move: Vec3, orientation: Quat, is_moving: bool, sprint: bool) -> Self {
        let local = orientation.inverse() * world_move;
        Self {
            move_x: local.x.clamp(-1.0, 1.0),
            move_z: local.z.clamp(-1.0, 1.0),
            is_moving,
            sprint,
        }
    }

    /// Write every parameter to a sink.
    pub fn apply<S: AnimationSink + ?Sized>(&self, sink: &mut S) {
        sink.set_float(PARAM_MOVE_X, self.move_x);
        sink.set_float(PARAM_MOVE_Z, self.move_z);
        sink.set_bool(PARAM_IS_MOVING, self.is_moving);
        sink.set_bool(PARAM_SPRINT, self.sprint);
    }
}

/// Receiver for animator parameters.
pub trait AnimationSink {
    /// Set a float parameter.
    fn set_float(&mut self, name: &str, value: f32);

    /// Set a bool parameter.
    fn set_bool(&mut self, name: &str, value: bool);

    /// Fire a one-shot trigger.
    fn set_trigger(&mut self, name: &str);
}

/// Receiver for the stamina bar.
pub trait StaminaDisplay {
    /// Show the current value against capacity.
    fn show(&mut self, current: f32, max: f32);
}

/// Sink that drops everything, for headless hosts.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl AnimationSink for NullSink {
    fn set_float(&mut self, _name: &str, _value: f32) {}
    fn set_bool(&mut self, _name: &str, _value: bool) {}
    fn set_trigger(&mut self, _name: &str) {}
}

impl StaminaDisplay for NullSink {
    fn show(&mut self, _current: f32, _max: f32) {}
}
