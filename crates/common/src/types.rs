use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Axis-aligned box of the given size centred on `center`.
    pub fn boxed(center: Vec3, size: Vec3) -> Self {
        Self {
            position: center,
            scale: size,
            ..Self::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Linear RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    /// Opaque colour from a `0xRRGGBB` literal.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self([channel(16), channel(8), channel(0), 1.0])
    }

    pub fn r(&self) -> f32 {
        self.0[0]
    }

    pub fn g(&self) -> f32 {
        self.0[1]
    }

    pub fn b(&self) -> f32 {
        self.0[2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.scale, Vec3::ONE);
    }

    #[test]
    fn boxed_transform_scales_unit_cube() {
        let t = Transform::boxed(Vec3::new(0.0, 5.0, -25.0), Vec3::new(50.0, 10.0, 1.0));
        let corner = t.matrix().transform_point3(Vec3::splat(0.5));
        assert_eq!(corner, Vec3::new(25.0, 10.0, -24.5));
    }

    #[test]
    fn rgba_from_hex() {
        let c = Rgba::from_hex(0xff0080);
        assert_eq!(c.r(), 1.0);
        assert_eq!(c.g(), 0.0);
        assert!((c.b() - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.0[3], 1.0);
    }
}
