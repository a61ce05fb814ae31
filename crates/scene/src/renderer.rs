use crate::room::RoomScene;
use glam::Vec3;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Unit view direction.
    pub forward: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 2.0, 0.0),
            forward: Vec3::NEG_Z,
            fov_degrees: 75.0,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene and a view, then produces output. It runs
/// after the frame's locomotion update and never feeds back into it.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the scene from the given view.
    fn render(&self, scene: &RoomScene, view: &RenderView) -> Self::Output;
}

/// Renders the scene as human-readable text, for the CLI and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &RoomScene, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Room (floor {:.0}x{:.0}, {} checker tiles) ===\n",
            scene.floor.size, scene.floor.size, scene.floor.repeat
        ));
        out.push_str(&format!("Walls: {}\n", scene.walls.len()));
        out.push_str(&format!(
            "Camera: eye=({:.2}, {:.2}, {:.2}) forward=({:.2}, {:.2}, {:.2}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.forward.x,
            view.forward.y,
            view.forward.z,
            view.fov_degrees
        ));

        for wall in &scene.walls {
            let p = wall.transform.position;
            let s = wall.transform.scale;
            out.push_str(&format!(
                "  [{:<5}] center=({:.1}, {:.1}, {:.1}) size=({:.1}, {:.1}, {:.1})\n",
                wall.side.name(),
                p.x,
                p.y,
                p.z,
                s.x,
                s.y,
                s.z
            ));
        }

        out
    }
}
