//! Character State Definitions
//!
//! Everything the controller mutates between ticks.
//! Owned by exactly one `LocomotionController`.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::hash::{compute_state_hash, StateHash, StateHasher};
use crate::core::math::is_moving;
use crate::game::config::LocomotionConfig;
use crate::game::stamina::Stamina;

// =============================================================================
// ROLL STATE
// =============================================================================

/// Roll sub-state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum RollState {
    /// Normal locomotion
    #[default]
    Idle,
    /// Roll in progress; overrides locomotion until `timer` runs out
    Rolling {
        /// Seconds left
        timer: f32,
        /// World-space unit direction
        direction: Vec3,
    },
}

impl RollState {
    /// Is a roll in progress?
    #[inline]
    pub fn is_rolling(&self) -> bool {
        matches!(self, RollState::Rolling { .. })
    }

    /// Seconds left in the current roll (0 when idle).
    #[inline]
    pub fn remaining(&self) -> f32 {
        match self {
            RollState::Idle => 0.0,
            RollState::Rolling { timer, .. } => *timer,
        }
    }

    fn hash_into(&self, hasher: &mut StateHasher) {
        match self {
            RollState::Idle => hasher.update_u8(0),
            RollState::Rolling { timer, direction } => {
                hasher.update_u8(1);
                hasher.update_f32(*timer);
                hasher.update_vec3(*direction);
            }
        }
    }
}

// =============================================================================
// CHARACTER STATE
// =============================================================================

/// State of a single controlled character.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CharacterState {
    /// World position (mirrors the movement primitive after each move)
    pub position: Vec3,

    /// World orientation; local +Z is forward
    pub orientation: Quat,

    /// Accumulated vertical velocity from gravity and jumps
    pub vertical_velocity: f32,

    /// Grounded flag reported by the previous tick's move.
    /// Gravity handling reads it one tick late.
    pub grounded: bool,

    /// Latest unprocessed stick sample
    pub raw_input: Vec2,

    /// Damped approximation of `raw_input`
    pub smooth_input: Vec2,

    /// Damping velocity for `smooth_input`
    pub smooth_velocity: Vec2,

    /// Sprint modifier currently held
    pub sprint_held: bool,

    /// Sprint was granted on the last locomotion tick
    pub sprinting: bool,

    /// Stamina pool
    pub stamina: Stamina,

    /// Roll sub-state
    pub roll: RollState,

    /// Controller clock when the last roll started
    pub last_roll_time: Option<f32>,

    /// Controller clock (sum of accepted tick lengths)
    pub elapsed: f32,

    /// Number of accepted ticks
    pub tick: u32,
}

impl CharacterState {
    /// Create a character at a spawn position with full stamina.
    pub fn new(position: Vec3, config: &LocomotionConfig) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
            vertical_velocity: 0.0,
            grounded: false,
            raw_input: Vec2::ZERO,
            smooth_input: Vec2::ZERO,
            smooth_velocity: Vec2::ZERO,
            sprint_held: false,
            sprinting: false,
            stamina: Stamina::full(config.max_stamina),
            roll: RollState::Idle,
            last_roll_time: None,
            elapsed: 0.0,
            tick: 0,
        }
    }

    /// Character forward axis in world space.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::Z
    }

    /// Is the smoothed input large enough to count as movement?
    #[inline]
    pub fn is_moving(&self) -> bool {
        is_moving(self.smooth_input)
    }

    /// Is a roll in progress?
    #[inline]
    pub fn is_rolling(&self) -> bool {
        self.roll.is_rolling()
    }

    /// Seconds since the last roll started, if any.
    pub fn time_since_roll(&self) -> Option<f32> {
        self.last_roll_time.map(|t| self.elapsed - t)
    }

    /// Hash every field for replay verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, self.elapsed, |hasher| {
            hasher.update_vec3(self.position);
            hasher.update_quat(self.orientation);
            hasher.update_f32(self.vertical_velocity);
            hasher.update_bool(self.grounded);
            hasher.update_vec2(self.raw_input);
            hasher.update_vec2(self.smooth_input);
            hasher.update_vec2(self.smooth_velocity);
            hasher.update_bool(self.sprint_held);
            hasher.update_bool(self.sprinting);
            hasher.update_f32(self.stamina.current());
            hasher.update_f32(self.stamina.max());
            self.roll.hash_into(hasher);
            hasher.update_opt_f32(self.last_roll_time);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_character() {
        let state = CharacterState::new(Vec3::ZERO, &LocomotionConfig::default());
        assert_eq!(state.stamina.current(), 100.0);
        assert!(!state.is_rolling());
        assert!(!state.is_moving());
        assert_eq!(state.forward(), Vec3::Z);
        assert!(state.time_since_roll().is_none());
    }

    #[test]
    fn test_roll_state_remaining() {
        let roll = RollState::Rolling { timer: 0.25, direction: Vec3::X };
        assert!(roll.is_rolling());
        assert_eq!(roll.remaining(), 0.25);
        assert_eq!(RollState::Idle.remaining(), 0.0);
    }

    #[test]
    fn test_hash_tracks_state() {
        let config = LocomotionConfig::default();
        let a = CharacterState::new(Vec3::ZERO, &config);
        let mut b = a.clone();
        assert_eq!(a.compute_hash(), b.compute_hash());

        b.stamina.spend(1.0);
        assert_ne!(a.compute_hash(), b.compute_hash());

        let mut c = a.clone();
        c.roll = RollState::Rolling { timer: 0.5, direction: Vec3::Z };
        assert_ne!(a.compute_hash(), c.compute_hash());
    }
}
