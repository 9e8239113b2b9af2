//! # Locomotion Sim
//!
//! Engine-agnostic third-person locomotion: smoothed stick input,
//! camera-relative movement, gravity, sprint, a timed roll and a
//! stamina pool, advanced once per frame.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      LOCOMOTION SIM                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Math and hashing primitives              │
//! │  ├── math.rs      - Smooth-damp, exp blend, facing           │
//! │  └── hash.rs      - State hashing for replay checks          │
//! │                                                              │
//! │  game/            - Character logic                          │
//! │  ├── config.rs    - Tunables and validation                  │
//! │  ├── input.rs     - Input frames and recordings              │
//! │  ├── state.rs     - Character and roll state                 │
//! │  ├── stamina.rs   - Clamped stamina pool                     │
//! │  ├── roll.rs      - Roll and jump gating                     │
//! │  ├── controller.rs- Per-frame state machine                  │
//! │  ├── motor.rs     - Movement primitive seam                  │
//! │  ├── animation.rs - Animator / HUD outputs                   │
//! │  ├── camera.rs    - Follow camera                            │
//! │  ├── fps.rs       - Frame-rate meter                         │
//! │  ├── events.rs    - Discrete events                          │
//! │  └── session.rs   - Fixed-step driver and replay             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Collaborators
//!
//! Collision, animation playback and UI belong to the host. The
//! controller talks to them through `MovementPrimitive`,
//! `AnimationSink` and `StaminaDisplay`.
//!
//! ## Replay
//!
//! Inputs are quantised to i8 and recorded per tick. Replaying a
//! recording with the same tick length on the same platform reproduces
//! the character state hash exactly.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::hash::StateHash;
pub use crate::game::camera::{CameraBasis, FollowCamera};
pub use crate::game::config::{ConfigError, LocomotionConfig, SimConfig};
pub use crate::game::controller::{LocomotionController, TickOutput};
pub use crate::game::input::{InputFrame, InputRecording};
pub use crate::game::motor::{FlatGround, MoveOutcome, MovementPrimitive};
pub use crate::game::session::{replay_recording, Session};
pub use crate::game::state::{CharacterState, RollState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default fixed tick rate for the demo session (Hz)
pub const DEFAULT_TICK_RATE: u32 = 60;
