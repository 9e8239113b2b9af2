//! Roll and Jump Actions
//!
//! Discrete actions requested by input events. Both are gated by policy;
//! a rejected request is a logged no-op, never an error.

use std::fmt;

use tracing::debug;

use crate::game::camera::CameraBasis;
use crate::game::config::LocomotionConfig;
use crate::game::events::LocomotionEvent;
use crate::game::state::{CharacterState, RollState};

/// Why a roll request was ignored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RollRejection {
    /// A roll is already in progress
    AlreadyRolling,
    /// Previous roll started too recently
    CoolingDown {
        /// Seconds until a roll is allowed again
        remaining: f32,
    },
    /// Not enough stamina to pay the cost
    InsufficientStamina {
        /// Stamina available
        available: f32,
        /// Stamina required
        required: f32,
    },
}

impl fmt::Display for RollRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollRejection::AlreadyRolling => write!(f, "already rolling"),
            RollRejection::CoolingDown { remaining } => {
                write!(f, "cooling down ({:.2}s left)", remaining)
            }
            RollRejection::InsufficientStamina { available, required } => {
                write!(f, "insufficient stamina ({:.1} < {:.1})", available, required)
            }
        }
    }
}

/// Why a jump request was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JumpRejection {
    /// Jump capability is switched off
    Disabled,
    /// A roll is in progress
    Rolling,
    /// Not standing on anything
    Airborne,
}

/// Check whether a roll may start now.
///
/// Gates, in order: already rolling, cooldown (inclusive), stamina.
pub fn roll_gate(state: &CharacterState, config: &LocomotionConfig) -> Result<(), RollRejection> {
    if state.is_rolling() {
        return Err(RollRejection::AlreadyRolling);
    }

    if let Some(since) = state.time_since_roll() {
        if since <= config.roll_cooldown {
            return Err(RollRejection::CoolingDown {
                remaining: config.roll_cooldown - since,
            });
        }
    }

    if !state.stamina.can_afford(config.roll_cost) {
        return Err(RollRejection::InsufficientStamina {
            available: state.stamina.current(),
            required: config.roll_cost,
        });
    }

    Ok(())
}

/// Try to start a roll.
/// Returns an event if the roll was accepted.
pub fn try_start_roll(
    state: &mut CharacterState,
    config: &LocomotionConfig,
    camera: &CameraBasis,
) -> Option<LocomotionEvent> {
    if let Err(reason) = roll_gate(state, config) {
        debug!(tick = state.tick, %reason, "roll rejected");
        return None;
    }

    state.stamina.spend(config.roll_cost);

    let direction = roll_direction(state, camera);
    state.roll = RollState::Rolling {
        timer: config.roll_duration,
        direction,
    };
    state.last_roll_time = Some(state.elapsed);

    debug!(
        tick = state.tick,
        stamina = state.stamina.current(),
        "roll started"
    );

    Some(LocomotionEvent::roll_started(
        state.tick,
        direction,
        state.stamina.current(),
    ))
}

/// Camera-relative movement direction, or the character's forward
/// axis when there is no meaningful input.
fn roll_direction(state: &CharacterState, camera: &CameraBasis) -> glam::Vec3 {
    if state.is_moving() {
        if let Some(dir) = camera.project(state.smooth_input).try_normalize() {
            return dir;
        }
    }
    state.forward()
}

/// Check whether a jump may start now.
pub fn jump_gate(state: &CharacterState, config: &LocomotionConfig) -> Result<(), JumpRejection> {
    if !config.jump_enabled {
        return Err(JumpRejection::Disabled);
    }
    if state.is_rolling() {
        return Err(JumpRejection::Rolling);
    }
    if !state.grounded {
        return Err(JumpRejection::Airborne);
    }
    Ok(())
}

/// Try to jump.
/// Returns an event if the jump was accepted.
pub fn try_jump(state: &mut CharacterState, config: &LocomotionConfig) -> Option<LocomotionEvent> {
    if let Err(reason) = jump_gate(state, config) {
        debug!(tick = state.tick, ?reason, "jump rejected");
        return None;
    }

    let velocity = config.jump_velocity();
    state.vertical_velocity = velocity;
    Some(LocomotionEvent::jumped(state.tick, velocity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    fn setup() -> (CharacterState, LocomotionConfig) {
        let config = LocomotionConfig::default();
        let mut state = CharacterState::new(Vec3::ZERO, &config);
        state.grounded = true;
        (state, config)
    }

    #[test]
    fn test_roll_accepted_spends_stamina() {
        let (mut state, config) = setup();
        let event = try_start_roll(&mut state, &config, &CameraBasis::world());

        assert!(event.is_some());
        assert!(state.is_rolling());
        assert_eq!(state.stamina.current(), 80.0);
        assert_eq!(state.last_roll_time, Some(0.0));
        assert_eq!(state.roll.remaining(), config.roll_duration);
    }

    #[test]
    fn test_roll_rejected_while_rolling() {
        let (mut state, config) = setup();
        state.roll = RollState::Rolling { timer: 0.3, direction: Vec3::Z };

        assert_eq!(roll_gate(&state, &config), Err(RollRejection::AlreadyRolling));
        assert!(try_start_roll(&mut state, &config, &CameraBasis::world()).is_none());
        assert_eq!(state.stamina.current(), 100.0);
    }

    #[test]
    fn test_roll_rejected_during_cooldown() {
        let (mut state, config) = setup();
        state.last_roll_time = Some(0.0);
        state.elapsed = 0.5;

        assert!(matches!(
            roll_gate(&state, &config),
            Err(RollRejection::CoolingDown { .. })
        ));

        // Exactly at the cooldown boundary is still rejected
        state.elapsed = 1.0;
        assert!(roll_gate(&state, &config).is_err());

        state.elapsed = 1.25;
        assert!(roll_gate(&state, &config).is_ok());
    }

    #[test]
    fn test_roll_rejected_without_stamina() {
        let (mut state, config) = setup();
        state.stamina.set(19.0);

        assert_eq!(
            roll_gate(&state, &config),
            Err(RollRejection::InsufficientStamina { available: 19.0, required: 20.0 })
        );
        assert!(try_start_roll(&mut state, &config, &CameraBasis::world()).is_none());
        assert_eq!(state.stamina.current(), 19.0);
    }

    #[test]
    fn test_roll_direction_camera_relative() {
        let (mut state, config) = setup();
        state.smooth_input = Vec2::new(1.0, 0.0);

        // Camera looking down -X: its right is +Z
        let camera = CameraBasis::from_forward(Vec3::NEG_X);
        try_start_roll(&mut state, &config, &camera);

        match state.roll {
            RollState::Rolling { direction, .. } => {
                assert!((direction - Vec3::Z).length() < 1e-5, "got {:?}", direction);
            }
            RollState::Idle => panic!("roll should have started"),
        }
    }

    #[test]
    fn test_roll_direction_falls_back_to_forward() {
        let (mut state, config) = setup();
        state.orientation = glam::Quat::from_rotation_y(std::f32::consts::PI);

        try_start_roll(&mut state, &config, &CameraBasis::world());
        match state.roll {
            RollState::Rolling { direction, .. } => {
                assert!((direction - Vec3::NEG_Z).length() < 1e-5);
            }
            RollState::Idle => panic!("roll should have started"),
        }
    }

    #[test]
    fn test_jump_velocity_when_enabled() {
        let (mut state, mut config) = setup();
        config.jump_enabled = true;

        let event = try_jump(&mut state, &config);
        assert!(event.is_some());
        assert!((state.vertical_velocity - 1.98).abs() < 0.01);
    }

    #[test]
    fn test_jump_gates() {
        let (mut state, mut config) = setup();
        assert_eq!(jump_gate(&state, &config), Err(JumpRejection::Disabled));

        config.jump_enabled = true;
        state.grounded = false;
        assert_eq!(jump_gate(&state, &config), Err(JumpRejection::Airborne));

        state.grounded = true;
        state.roll = RollState::Rolling { timer: 0.1, direction: Vec3::Z };
        assert_eq!(jump_gate(&state, &config), Err(JumpRejection::Rolling));
        assert!(try_jump(&mut state, &config).is_none());
        assert_eq!(state.vertical_velocity, 0.0);
    }
}
