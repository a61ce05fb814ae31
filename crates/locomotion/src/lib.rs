//! Locomotion: translates held keys into a new player position each frame.
//!
//! # Invariants
//! - One [`Locomotion::update`] per rendered frame; speeds and gravity are
//!   per-frame increments, not scaled by wall-clock time.
//! - A horizontal step that leaves the room is rejected whole: both x and z
//!   return to their pre-step values.
//! - A jump starts only on a rising edge of the jump key while grounded and
//!   not already jumping.
//! - Landing leaves height exactly at ground level and velocity exactly zero.
//! - Look direction is owned by a [`LookController`]; this crate never
//!   computes orientation.

pub mod locomotion;
pub mod look;
pub mod player;

pub use locomotion::{Locomotion, LocomotionEvent, integrate_vertical, step_horizontal, try_jump};
pub use look::{FixedLook, LookController};
pub use player::{JumpParams, PlayerState, RoomBounds};
