//! Shared types and configuration used across the walkaround workspace.
//!
//! # Invariants
//! - Every tunable lives in [`WalkConfig`]; nothing else hard-codes room or
//!   player constants.
//! - A config that passed [`WalkConfig::validate`] always yields a positive
//!   boundary limit.

pub mod config;
pub mod types;

pub use config::{CameraConfig, ConfigError, PlayerConfig, RoomConfig, WalkConfig};
pub use types::{Rgba, Transform};
