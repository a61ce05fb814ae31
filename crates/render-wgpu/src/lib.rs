//! wgpu render backend for the walkaround room.
//!
//! Draws a checker floor and the four walls as instanced boxes. The camera is
//! a pointer-lock style first-person camera that also serves as the
//! locomotion look controller.
//!
//! # Invariants
//! - Renderer never mutates player state.
//! - Camera position is copied from the player after each locomotion update;
//!   the camera itself only owns orientation.

mod camera;
mod gpu;
mod shaders;

pub use camera::FirstPersonCamera;
pub use gpu::WgpuRenderer;
