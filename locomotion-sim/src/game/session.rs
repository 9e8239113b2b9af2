//! Character Session
//!
//! Drives one controller and its follow camera at a fixed tick length,
//! recording every input frame so the run can be replayed and checked.

use tracing::{debug, info};

use crate::core::hash::StateHash;
use crate::game::camera::FollowCamera;
use crate::game::config::{ConfigError, SimConfig};
use crate::game::controller::{LocomotionController, TickOutput};
use crate::game::events::LocomotionEvent;
use crate::game::input::{InputFrame, InputRecording};
use crate::game::motor::MovementPrimitive;

/// Ticks between recorded state hashes.
pub const CHECKPOINT_INTERVAL: u32 = 60;

/// State hash taken at a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    /// Tick the hash was taken after
    pub tick: u32,
    /// Character state hash
    pub hash: StateHash,
}

/// One controlled character plus its camera, at a fixed tick length.
pub struct Session<M: MovementPrimitive> {
    controller: LocomotionController<M>,
    camera: FollowCamera,
    recording: InputRecording,
    checkpoints: Vec<Checkpoint>,
    pending_flags: u8,
    dt: f32,
}

impl<M: MovementPrimitive> Session<M> {
    /// Create a session. `dt` must be finite and positive.
    pub fn new(config: &SimConfig, motor: M, dt: f32) -> Result<Self, ConfigError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(ConfigError::NonPositive { field: "dt", value: dt });
        }

        let controller = LocomotionController::new(config.locomotion.clone(), motor)?;
        let camera = FollowCamera::new(&config.camera, controller.state().position);

        Ok(Self {
            controller,
            camera,
            recording: InputRecording::new(dt),
            checkpoints: Vec::new(),
            pending_flags: 0,
            dt,
        })
    }

    /// Queue a roll request for the next step.
    pub fn request_roll(&mut self) {
        self.pending_flags |= InputFrame::FLAG_ROLL;
    }

    /// Queue a jump request for the next step.
    pub fn request_jump(&mut self) {
        self.pending_flags |= InputFrame::FLAG_JUMP;
    }

    /// Run one tick: character first, then the camera catches up.
    ///
    /// Queued requests are merged into `frame` before it is recorded.
    pub fn step(&mut self, mut frame: InputFrame) -> TickOutput {
        frame.flags |= std::mem::take(&mut self.pending_flags);

        let basis = self.camera.basis();
        let output = self.controller.tick(&frame, &basis, self.dt);
        self.recording.record(output.tick, frame);

        self.camera.update(
            self.controller.state().position,
            frame.look_delta(),
            self.dt,
        );

        if output.tick % CHECKPOINT_INTERVAL == 0 {
            self.checkpoints.push(Checkpoint {
                tick: output.tick,
                hash: self.controller.state().compute_hash(),
            });
        }

        output
    }

    /// Controller.
    pub fn controller(&self) -> &LocomotionController<M> {
        &self.controller
    }

    /// Follow camera.
    pub fn camera(&self) -> &FollowCamera {
        &self.camera
    }

    /// Input recorded so far.
    pub fn recording(&self) -> &InputRecording {
        &self.recording
    }

    /// State hashes recorded so far.
    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    /// Fixed tick length.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Hash of the character state right now.
    pub fn state_hash(&self) -> StateHash {
        self.controller.state().compute_hash()
    }
}

/// Replay a recording through a fresh session.
///
/// Returns the session after the last recorded tick and every event.
pub fn replay_recording<M: MovementPrimitive>(
    config: &SimConfig,
    recording: &InputRecording,
    motor: M,
) -> Result<(Session<M>, Vec<LocomotionEvent>), ConfigError> {
    let mut session = Session::new(config, motor, recording.dt)?;
    let mut events = Vec::new();

    for (_tick, frame) in recording.replay_iter() {
        events.extend(session.step(frame).events);
    }

    debug!(ticks = recording.tick_count(), events = events.len(), "replay finished");
    Ok((session, events))
}

/// First checkpoint where two runs disagree, if any.
pub fn first_divergence(expected: &[Checkpoint], actual: &[Checkpoint]) -> Option<u32> {
    let diverged = expected
        .iter()
        .zip(actual)
        .find(|(a, b)| a != b)
        .map(|(a, _)| a.tick);

    if diverged.is_none() && expected.len() != actual.len() {
        let tick = expected
            .get(actual.len())
            .or_else(|| actual.get(expected.len()))
            .map(|c| c.tick);
        info!(expected = expected.len(), actual = actual.len(), "checkpoint count differs");
        return tick;
    }
    diverged
}
