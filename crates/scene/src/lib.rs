//! Scene: the room as plain data, plus a renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read the scene and a view; they never touch player state.
//! - The room is built once from config and never changes.

mod renderer;
mod room;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};
pub use room::{Floor, RoomScene, SceneBox, WallSide};

pub fn crate_info() -> &'static str {
    "walkaround-scene v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("scene"));
    }
}
