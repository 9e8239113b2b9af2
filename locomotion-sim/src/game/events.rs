//! Locomotion Events
//!
//! Discrete things that happened during a tick, for logging and replay
//! comparison. Continuous outputs live in `TickOutput` instead.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LocomotionEventData {
    /// Roll accepted and started
    RollStarted {
        /// World-space unit direction
        direction: Vec3,
        /// Stamina left after paying the cost
        stamina_after: f32,
    },

    /// Roll timer ran out
    RollFinished,

    /// Jump accepted
    Jumped {
        /// Initial vertical velocity
        velocity: f32,
    },

    /// Sprint granted after not being granted
    SprintStarted,

    /// Sprint no longer granted
    SprintStopped {
        /// Sprint ended because stamina hit zero
        exhausted: bool,
    },

    /// Movement primitive reported ground contact after being airborne
    Landed {
        /// Vertical velocity just before contact
        impact_velocity: f32,
    },

    /// Stamina regenerated back to capacity
    StaminaFull,
}

/// An event with the tick it happened on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocomotionEvent {
    /// Controller tick when the event occurred
    pub tick: u32,

    /// Event data
    pub data: LocomotionEventData,
}

impl LocomotionEvent {
    /// Create a new event.
    pub fn new(tick: u32, data: LocomotionEventData) -> Self {
        Self { tick, data }
    }

    /// Create roll started event.
    pub fn roll_started(tick: u32, direction: Vec3, stamina_after: f32) -> Self {
        Self::new(tick, LocomotionEventData::RollStarted { direction, stamina_after })
    }

    /// Create roll finished event.
    pub fn roll_finished(tick: u32) -> Self {
        Self::new(tick, LocomotionEventData::RollFinished)
    }

    /// Create jumped event.
    pub fn jumped(tick: u32, velocity: f32) -> Self {
        Self::new(tick, LocomotionEventData::Jumped { velocity })
    }

    /// Create sprint started event.
    pub fn sprint_started(tick: u32) -> Self {
        Self::new(tick, LocomotionEventData::SprintStarted)
    }

    /// Create sprint stopped event.
    pub fn sprint_stopped(tick: u32, exhausted: bool) -> Self {
        Self::new(tick, LocomotionEventData::SprintStopped { exhausted })
    }

    /// Create landed event.
    pub fn landed(tick: u32, impact_velocity: f32) -> Self {
        Self::new(tick, LocomotionEventData::Landed { impact_velocity })
    }

    /// Create stamina full event.
    pub fn stamina_full(tick: u32) -> Self {
        Self::new(tick, LocomotionEventData::StaminaFull)
    }

    /// Is this a roll start?
    pub fn is_roll_started(&self) -> bool {
        matches!(self.data, LocomotionEventData::RollStarted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_constructors() {
        let event = LocomotionEvent::roll_started(3, Vec3::Z, 80.0);
        assert_eq!(event.tick, 3);
        assert!(event.is_roll_started());
        assert!(!LocomotionEvent::roll_finished(4).is_roll_started());
        assert_eq!(
            LocomotionEvent::sprint_stopped(5, true).data,
            LocomotionEventData::SprintStopped { exhausted: true }
        );
    }

    #[test]
    fn test_event_json() {
        let event = LocomotionEvent::jumped(7, 1.98);
        let json = serde_json::to_string(&event).unwrap();
        let back: LocomotionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
