//! Core primitives.
//!
//! Math helpers and state hashing shared by the game modules.

pub mod math;
pub mod hash;

// Re-export core types
pub use hash::{compute_state_hash, StateHash, StateHasher};
pub use math::{exp_blend, facing_rotation, flatten_axis, smooth_damp, MOVE_EPSILON_SQ};
