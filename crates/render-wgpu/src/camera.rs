use glam::{Mat4, Vec3};
use walkaround_common::CameraConfig;
use walkaround_locomotion::LookController;

const PITCH_LIMIT_DEGREES: f32 = 89.0;

/// First-person camera driven by pointer-lock mouse deltas.
///
/// Walking ignores pitch: forward and right are the view axes flattened onto
/// the floor, so looking up does not slow you down or lift you off the ground.
pub struct FirstPersonCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub sensitivity: f32,
}

impl Default for FirstPersonCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), Vec3::new(0.0, 2.0, 0.0))
    }
}

impl FirstPersonCamera {
    /// Looking down -Z from `position`.
    pub fn from_config(config: &CameraConfig, position: Vec3) -> Self {
        Self {
            position,
            yaw: -90.0_f32.to_radians(),
            pitch: 0.0,
            fov: config.fov_degrees.to_radians(),
            aspect: 16.0 / 9.0,
            near: config.near,
            far: config.far,
            sensitivity: config.sensitivity,
        }
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// View direction projected onto the floor.
    pub fn horizontal_forward(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin())
    }

    pub fn right(&self) -> Vec3 {
        self.horizontal_forward().cross(Vec3::Y).normalize()
    }

    /// Apply a mouse delta in pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch -= dy * self.sensitivity;
        self.pitch = self.pitch.clamp(
            -PITCH_LIMIT_DEGREES.to_radians(),
            PITCH_LIMIT_DEGREES.to_radians(),
        );
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl LookController for FirstPersonCamera {
    fn forward_axis(&self) -> Vec3 {
        self.horizontal_forward()
    }

    fn right_axis(&self) -> Vec3 {
        self.right()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera() {
        let cam = FirstPersonCamera::default();
        assert_eq!(cam.position.y, 2.0);
        let vp = cam.view_projection();
        // Should produce a valid matrix (no NaN)
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn starts_facing_negative_z() {
        let cam = FirstPersonCamera::default();
        assert!((cam.forward() - Vec3::NEG_Z).length() < 1e-6);
        assert!((cam.right() - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn walking_ignores_pitch() {
        let mut cam = FirstPersonCamera::default();
        cam.rotate(0.0, -400.0);
        assert!(cam.forward().y > 0.5);

        let mut p = cam.position;
        cam.move_forward(&mut p, 1.0);
        assert_eq!(p.y, cam.position.y);
        assert!(((p - cam.position).length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = FirstPersonCamera::default();
        cam.rotate(0.0, -1_000_000.0);
        assert!(cam.pitch <= 89.0_f32.to_radians() + 1e-6);
        cam.rotate(0.0, 2_000_000.0);
        assert!(cam.pitch >= -89.0_f32.to_radians() - 1e-6);
    }

    #[test]
    fn yaw_turns_the_walking_axes() {
        let mut cam = FirstPersonCamera::default();
        // Quarter turn to the right.
        cam.rotate(90.0_f32.to_radians() / cam.sensitivity, 0.0);
        assert!((cam.forward_axis() - Vec3::X).length() < 1e-4);
        assert!((cam.right_axis() - Vec3::Z).length() < 1e-4);
    }

    #[test]
    fn aspect_from_window_size() {
        let mut cam = FirstPersonCamera::default();
        cam.set_aspect(800, 0);
        assert_eq!(cam.aspect, 800.0);
        cam.set_aspect(1280, 720);
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);
    }
}
