//! Input Capture and Quantisation
//!
//! Per-tick input frames and their delta-compressed recording.
//! Axes are quantised to i8 so a recording replays bit-for-bit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::hash::{StateHash, StateHasher};

// =============================================================================
// AXIS LOOKUP TABLE
// =============================================================================

/// Lookup table for converting i8 axis input to f32 in [-1, 1].
///
/// Index 128 (-128 as i8) is reserved for "stick released" and maps to 0.
pub static AXIS_LUT: [f32; 256] = {
    let mut lut = [0.0f32; 256];
    let mut i = 0usize;
    while i < 256 {
        let signed = if i < 128 { i as i32 } else { i as i32 - 256 };
        if signed != -128 {
            lut[i] = signed as f32 / 127.0;
        }
        i += 1;
    }
    lut
};

/// Convert i8 axis input to f32 using the lookup table.
#[inline]
pub fn axis_to_f32(input: i8) -> f32 {
    AXIS_LUT[(input as u8) as usize]
}

/// Quantise an axis value in [-1, 1] to i8.
#[inline]
pub fn f32_to_axis(value: f32) -> i8 {
    (value.clamp(-1.0, 1.0) * 127.0).round() as i8
}

// =============================================================================
// INPUT FRAME
// =============================================================================

/// Input state for a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Strafe axis: -127 (left) to +127 (right); -128 = released
    pub move_x: i8,

    /// Forward axis: -127 (back) to +127 (forward); -128 = released
    pub move_y: i8,

    /// Horizontal pointer delta for the follow camera (clamped pixels)
    pub look_x: i8,

    /// Action flags:
    /// - Bit 0: Sprint held
    /// - Bit 1: Roll requested this tick
    /// - Bit 2: Jump requested this tick
    pub flags: u8,
}

impl InputFrame {
    /// Special value indicating a released stick
    pub const NO_INPUT: i8 = -128;

    /// Sprint held flag bit
    pub const FLAG_SPRINT: u8 = 0x01;

    /// Roll request flag bit
    pub const FLAG_ROLL: u8 = 0x02;

    /// Jump request flag bit
    pub const FLAG_JUMP: u8 = 0x04;

    /// Create an idle frame.
    pub const fn new() -> Self {
        Self {
            move_x: Self::NO_INPUT,
            move_y: Self::NO_INPUT,
            look_x: 0,
            flags: 0,
        }
    }

    /// Create a frame with a movement direction.
    pub const fn with_movement(move_x: i8, move_y: i8) -> Self {
        Self {
            move_x,
            move_y,
            look_x: 0,
            flags: 0,
        }
    }

    /// Create a frame from a continuous stick sample.
    pub fn from_axis(axis: Vec2) -> Self {
        Self::with_movement(f32_to_axis(axis.x), f32_to_axis(axis.y))
    }

    /// Movement axis in [-1, 1] per component.
    #[inline]
    pub fn move_axis(&self) -> Vec2 {
        Vec2::new(axis_to_f32(self.move_x), axis_to_f32(self.move_y))
    }

    /// Camera pointer delta.
    #[inline]
    pub fn look_delta(&self) -> f32 {
        self.look_x as f32
    }

    /// Is sprint held?
    #[inline]
    pub fn sprint_held(&self) -> bool {
        self.flags & Self::FLAG_SPRINT != 0
    }

    /// Was a roll requested this tick?
    #[inline]
    pub fn roll_pressed(&self) -> bool {
        self.flags & Self::FLAG_ROLL != 0
    }

    /// Was a jump requested this tick?
    #[inline]
    pub fn jump_pressed(&self) -> bool {
        self.flags & Self::FLAG_JUMP != 0
    }

    /// Is this frame completely idle?
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.move_x == Self::NO_INPUT
            && self.move_y == Self::NO_INPUT
            && self.look_x == 0
            && self.flags == 0
    }

    /// Builder: hold sprint.
    pub const fn sprinting(mut self) -> Self {
        self.flags |= Self::FLAG_SPRINT;
        self
    }

    /// Builder: request a roll.
    pub const fn rolling(mut self) -> Self {
        self.flags |= Self::FLAG_ROLL;
        self
    }

    /// Builder: request a jump.
    pub const fn jumping(mut self) -> Self {
        self.flags |= Self::FLAG_JUMP;
        self
    }

    /// Builder: pointer delta.
    pub const fn looking(mut self, look_x: i8) -> Self {
        self.look_x = look_x;
        self
    }

    /// Set or clear a flag bit.
    #[inline]
    pub fn set_flag(&mut self, flag: u8, on: bool) {
        if on {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }
}

impl Default for InputFrame {
    fn default() -> Self {
        Self::new()
    }
}

/// Input with the tick it started on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDelta {
    /// Tick when this input state began
    pub tick: u32,
    /// The new input state
    pub frame: InputFrame,
}

impl InputDelta {
    /// Create new delta entry.
    pub fn new(tick: u32, frame: InputFrame) -> Self {
        Self { tick, frame }
    }
}

// =============================================================================
// INPUT RECORDING
// =============================================================================

/// Complete input recording for one character session.
///
/// Only ticks where the frame changed are stored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputRecording {
    /// Fixed tick length the session ran at (seconds)
    pub dt: f32,

    /// Last recorded tick
    pub end_tick: u32,

    deltas: Vec<InputDelta>,

    #[serde(skip)]
    last_frame: Option<InputFrame>,
}

impl InputRecording {
    /// Create an empty recording for a fixed tick length.
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            end_tick: 0,
            deltas: Vec::with_capacity(256),
            last_frame: None,
        }
    }

    /// Record input for a tick. Only stores if the frame changed.
    pub fn record(&mut self, tick: u32, frame: InputFrame) {
        self.end_tick = tick;

        if self.last_frame != Some(frame) {
            self.deltas.push(InputDelta::new(tick, frame));
            self.last_frame = Some(frame);
        }
    }

    /// Get input at a specific tick.
    pub fn get_input_at(&self, tick: u32) -> InputFrame {
        let idx = self.deltas.partition_point(|d| d.tick <= tick);
        if idx == 0 {
            InputFrame::new()
        } else {
            self.deltas[idx - 1].frame
        }
    }

    /// All stored deltas.
    pub fn deltas(&self) -> &[InputDelta] {
        &self.deltas
    }

    /// Number of stored deltas.
    pub fn delta_count(&self) -> usize {
        self.deltas.len()
    }

    /// Number of ticks covered (first recorded tick is 1).
    pub fn tick_count(&self) -> u32 {
        self.end_tick
    }

    /// Iterate every tick from 1 to `end_tick`.
    pub fn replay_iter(&self) -> ReplayIterator<'_> {
        ReplayIterator {
            recording: self,
            current_tick: 1,
            delta_idx: 0,
            current_frame: InputFrame::new(),
        }
    }

    /// Serialise to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialise from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Serialise to compact binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Deserialise from compact binary.
    pub fn from_bytes(data: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(data)
    }

    /// Fingerprint of the recorded inputs.
    pub fn compute_hash(&self) -> Result<StateHash, bincode::Error> {
        let mut hasher = StateHasher::for_input_recording();
        hasher.update_bytes(&self.to_bytes()?);
        Ok(hasher.finalize())
    }
}

/// Iterator replaying a recording tick by tick.
pub struct ReplayIterator<'a> {
    recording: &'a InputRecording,
    current_tick: u32,
    delta_idx: usize,
    current_frame: InputFrame,
}

impl Iterator for ReplayIterator<'_> {
    type Item = (u32, InputFrame);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_tick > self.recording.end_tick {
            return None;
        }

        while let Some(delta) = self.recording.deltas.get(self.delta_idx) {
            if delta.tick > self.current_tick {
                break;
            }
            self.current_frame = delta.frame;
            self.delta_idx += 1;
        }

        let item = (self.current_tick, self.current_frame);
        self.current_tick += 1;
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_lut_values() {
        assert_eq!(AXIS_LUT[0], 0.0);
        assert_eq!(AXIS_LUT[127], 1.0);
        assert_eq!(AXIS_LUT[129], -1.0);
        assert_eq!(AXIS_LUT[128], 0.0); // released

        for i in 1..=127usize {
            assert_eq!(AXIS_LUT[i], -AXIS_LUT[256 - i], "LUT should be symmetric for {}", i);
        }
    }

    #[test]
    fn test_quantise_axis() {
        assert_eq!(f32_to_axis(1.0), 127);
        assert_eq!(f32_to_axis(-1.0), -127);
        assert_eq!(f32_to_axis(5.0), 127);
        assert_eq!(f32_to_axis(0.0), 0);
        assert_eq!(axis_to_f32(f32_to_axis(0.5)), 64.0 / 127.0);
    }

    #[test]
    fn test_idle_frame_has_no_movement() {
        let frame = InputFrame::new();
        assert!(frame.is_idle());
        assert_eq!(frame.move_axis(), Vec2::ZERO);
    }

    #[test]
    fn test_frame_from_stick_sample() {
        let frame = InputFrame::from_axis(Vec2::new(0.5, -2.0));
        assert_eq!(frame.move_x, 64);
        assert_eq!(frame.move_y, -127);
        assert_eq!(frame.move_axis(), Vec2::new(64.0 / 127.0, -1.0));
        assert_eq!(frame.flags, 0);
    }

    #[test]
    fn test_frame_flags() {
        let frame = InputFrame::with_movement(0, 127).sprinting().rolling();
        assert!(frame.sprint_held());
        assert!(frame.roll_pressed());
        assert!(!frame.jump_pressed());

        let mut frame = frame;
        frame.set_flag(InputFrame::FLAG_SPRINT, false);
        frame.set_flag(InputFrame::FLAG_JUMP, true);
        assert!(!frame.sprint_held());
        assert!(frame.jump_pressed());
    }

    #[test]
    fn test_recording_delta_compression() {
        let mut recording = InputRecording::new(0.02);
        let frame = InputFrame::with_movement(100, 50);
        for t in 1..=4 {
            recording.record(t, frame);
        }
        assert_eq!(recording.delta_count(), 1);

        recording.record(5, InputFrame::with_movement(-100, -50));
        assert_eq!(recording.delta_count(), 2);
    }

    #[test]
    fn test_recording_stores_leading_idle_frame() {
        let mut recording = InputRecording::new(0.02);
        recording.record(1, InputFrame::new());
        recording.record(2, InputFrame::with_movement(0, 127));

        assert_eq!(recording.delta_count(), 2);
        assert!(recording.get_input_at(1).is_idle());
    }

    #[test]
    fn test_recording_get_at() {
        let mut recording = InputRecording::new(0.02);
        let f1 = InputFrame::with_movement(50, 0);
        let f2 = InputFrame::with_movement(-50, 0);

        recording.record(10, f1);
        recording.record(20, f2);

        assert!(recording.get_input_at(5).is_idle());
        assert_eq!(recording.get_input_at(10), f1);
        assert_eq!(recording.get_input_at(15), f1);
        assert_eq!(recording.get_input_at(100), f2);
    }

    #[test]
    fn test_replay_iterator() {
        let mut recording = InputRecording::new(0.02);
        recording.record(1, InputFrame::with_movement(10, 0));
        recording.record(2, InputFrame::with_movement(10, 0));
        recording.record(3, InputFrame::with_movement(20, 0));
        recording.record(4, InputFrame::with_movement(20, 0));

        let frames: Vec<_> = recording.replay_iter().collect();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0], (1, InputFrame::with_movement(10, 0)));
        assert_eq!(frames[1].1.move_x, 10);
        assert_eq!(frames[2].1.move_x, 20);
        assert_eq!(frames[3].0, 4);
    }

    #[test]
    fn test_recording_serialisation() {
        let mut recording = InputRecording::new(0.02);
        recording.record(1, InputFrame::with_movement(0, 127).sprinting());
        recording.record(7, InputFrame::new().rolling());

        let json = recording.to_json().unwrap();
        let from_json = InputRecording::from_json(&json).unwrap();
        assert_eq!(from_json.deltas(), recording.deltas());

        let bytes = recording.to_bytes().unwrap();
        let from_bytes = InputRecording::from_bytes(&bytes).unwrap();
        assert_eq!(from_bytes.end_tick, 7);
        assert_eq!(recording.compute_hash().unwrap(), from_bytes.compute_hash().unwrap());
    }
}
