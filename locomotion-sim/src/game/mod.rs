//! Character Logic Module
//!
//! ## Module Structure
//!
//! - `config`: Tunables and validation
//! - `input`: Input frames, recording, replay iteration
//! - `state`: Character state and roll sub-state
//! - `stamina`: Clamped stamina pool
//! - `roll`: Roll and jump gating
//! - `controller`: Per-frame locomotion state machine
//! - `motor`: Movement primitive seam
//! - `animation`: Animator and stamina HUD outputs
//! - `camera`: Follow camera
//! - `fps`: Frame-rate meter
//! - `events`: Discrete events for logs and replay
//! - `session`: Fixed-step driver and replay

pub mod config;
pub mod input;
pub mod state;
pub mod stamina;
pub mod roll;
pub mod controller;
pub mod motor;
pub mod animation;
pub mod camera;
pub mod fps;
pub mod events;
pub mod session;

// Re-export key types
pub use config::{ConfigError, LocomotionConfig, SimConfig};
pub use controller::{LocomotionController, TickOutput};
pub use events::{LocomotionEvent, LocomotionEventData};
pub use input::{InputFrame, InputRecording};
pub use state::{CharacterState, RollState};
