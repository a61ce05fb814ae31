use glam::Vec3;

/// Supplies the horizontal axes the player walks along.
///
/// Implemented by whatever owns the view orientation (the pointer-lock
/// camera on desktop). Axes are expected to be unit length and horizontal.
pub trait LookController {
    /// Direction of "forward" on the floor plane.
    fn forward_axis(&self) -> Vec3;

    /// Direction of "strafe right" on the floor plane.
    fn right_axis(&self) -> Vec3;

    /// Move `position` along the forward axis by `distance`.
    fn move_forward(&self, position: &mut Vec3, distance: f32) {
        *position += self.forward_axis() * distance;
    }

    /// Move `position` along the right axis by `distance`.
    fn move_right(&self, position: &mut Vec3, distance: f32) {
        *position += self.right_axis() * distance;
    }
}

/// A look controller with fixed axes, for headless runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLook {
    pub forward: Vec3,
    pub right: Vec3,
}

impl FixedLook {
    /// Facing the given yaw in degrees, measured from -Z towards +X.
    pub fn from_yaw_degrees(yaw: f32) -> Self {
        let (sin, cos) = yaw.to_radians().sin_cos();
        let forward = Vec3::new(sin, 0.0, -cos);
        Self {
            forward,
            right: forward.cross(Vec3::Y),
        }
    }
}

impl Default for FixedLook {
    /// Facing -Z with +X to the right.
    fn default() -> Self {
        Self {
            forward: Vec3::NEG_Z,
            right: Vec3::X,
        }
    }
}

impl LookController for FixedLook {
    fn forward_axis(&self) -> Vec3 {
        self.forward
    }

    fn right_axis(&self) -> Vec3 {
        self.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_faces_negative_z() {
        let look = FixedLook::default();
        let mut p = Vec3::ZERO;
        look.move_forward(&mut p, 1.0);
        look.move_right(&mut p, 2.0);
        assert_eq!(p, Vec3::new(2.0, 0.0, -1.0));
    }

    #[test]
    fn yaw_rotates_towards_positive_x() {
        let look = FixedLook::from_yaw_degrees(90.0);
        assert!((look.forward - Vec3::X).length() < 1e-6);
        assert!((look.right - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn zero_yaw_matches_default() {
        let look = FixedLook::from_yaw_degrees(0.0);
        assert!((look.forward - Vec3::NEG_Z).length() < 1e-6);
        assert!((look.right - Vec3::X).length() < 1e-6);
    }
}
