//! Types and GLSL-style helpers shared between the ocean shader and its host.

#![cfg_attr(target_arch = "spirv", no_std)]

use bytemuck::{Pod, Zeroable};
use core::ops::{Add, Mul, Sub};
use spirv_std::glam::{vec2, vec3, Mat4, Vec2, Vec3};

pub use spirv_std::glam;

// Note: This cfg is incorrect on its surface, it really should be "are we compiling with std", but
// we tie #[no_std] above to the same condition, so it's fine.
#[cfg(target_arch = "spirv")]
use spirv_std::num_traits::Float;

/// Per-frame values the host pushes to the fragment stage.
///
/// Vectors are spelled out as scalars so the block has the same layout on
/// the CPU and in SPIR-V without any padding rules getting involved.
#[derive(Copy, Clone, PartialEq, Pod, Zeroable)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
#[repr(C)]
pub struct ShaderConstants {
    pub width: u32,
    pub height: u32,
    pub time: f32,
    pub camera_x: f32,
    pub camera_y: f32,
    pub camera_z: f32,
    pub light_x: f32,
    pub light_y: f32,
    pub light_z: f32,
}

impl ShaderConstants {
    pub fn resolution(&self) -> Vec2 {
        vec2(self.width as f32, self.height as f32)
    }

    pub fn camera_position(&self) -> Vec3 {
        vec3(self.camera_x, self.camera_y, self.camera_z)
    }

    pub fn light_direction(&self) -> Vec3 {
        vec3(self.light_x, self.light_y, self.light_z)
    }
}

/// Matrices consumed by the vertex stage (uniform buffer, set 0, binding 0).
#[derive(Copy, Clone, PartialEq)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
#[repr(C)]
pub struct Transforms {
    pub model: Mat4,
    pub model_view_projection: Mat4,
}

impl Transforms {
    /// Both matrices in column-major order, ready for a std140 upload.
    pub fn to_cols_array(&self) -> [f32; 32] {
        let mut out = [0.0; 32];
        out[..16].copy_from_slice(&self.model.to_cols_array());
        out[16..].copy_from_slice(&self.model_view_projection.to_cols_array());
        out
    }
}

pub fn pow(v: Vec3, power: f32) -> Vec3 {
    vec3(v.x.powf(power), v.y.powf(power), v.z.powf(power))
}

pub fn mix<X: Copy + Mul<A, Output = X> + Add<Output = X> + Sub<Output = X>, A: Copy>(
    x: X,
    y: X,
    a: A,
) -> X {
    x - x * a + y * a
}

pub trait FloatExt {
    fn gl_fract(self) -> Self;
}

impl FloatExt for f32 {
    fn gl_fract(self) -> f32 {
        self - self.floor()
    }
}

/// Per-component GLSL builtins for the 2D wave-domain math.
pub trait VecExt {
    fn gl_fract(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
}

impl VecExt for Vec2 {
    fn gl_fract(self) -> Vec2 {
        vec2(self.x.gl_fract(), self.y.gl_fract())
    }

    fn sin(self) -> Vec2 {
        vec2(self.x.sin(), self.y.sin())
    }

    fn cos(self) -> Vec2 {
        vec2(self.x.cos(), self.y.cos())
    }
}

pub trait Reflect {
    /// GLSL `reflect`: mirrors `self` about the plane with unit `normal`.
    fn reflect(self, normal: Self) -> Self;
}

impl Reflect for Vec3 {
    fn reflect(self, normal: Vec3) -> Vec3 {
        self - 2.0 * normal.dot(self) * normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn gl_fract_wraps_negative_values_into_unit_range() {
        assert_abs_diff_eq!((-0.25f32).gl_fract(), 0.75, epsilon = 1e-6);
        assert_abs_diff_eq!(3.5f32.gl_fract(), 0.5, epsilon = 1e-6);
        let v = vec2(-1.5, 2.25).gl_fract();
        assert_abs_diff_eq!(v.x, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(v.y, 0.25, epsilon = 1e-6);
    }

    #[test]
    fn mix_hits_both_endpoints() {
        assert_abs_diff_eq!(mix(2.0f32, 6.0, 0.0), 2.0);
        assert_abs_diff_eq!(mix(2.0f32, 6.0, 1.0), 6.0);
        assert_abs_diff_eq!(mix(2.0f32, 6.0, 0.25), 3.0);
        let m = mix(Vec2::ZERO, Vec2::ONE, vec2(0.5, 1.0));
        assert_abs_diff_eq!(m.x, 0.5);
        assert_abs_diff_eq!(m.y, 1.0);
    }

    #[test]
    fn wave_trig_is_per_component() {
        let uv = vec2(core::f32::consts::FRAC_PI_2, 0.0);
        assert!(uv.sin().abs_diff_eq(vec2(1.0, 0.0), 1e-6));
        assert!(uv.cos().abs_diff_eq(vec2(0.0, 1.0), 1e-6));
    }

    #[test]
    fn reflect_flips_the_normal_component() {
        let r = vec3(1.0, -1.0, 0.0).reflect(Vec3::Y);
        assert_abs_diff_eq!(r.x, 1.0);
        assert_abs_diff_eq!(r.y, 1.0);
        assert_abs_diff_eq!(r.z, 0.0);
    }

    #[test]
    fn constants_expose_vectors() {
        let constants = ShaderConstants {
            width: 800,
            height: 600,
            time: 1.5,
            camera_x: 5.0,
            camera_y: 10.0,
            camera_z: 20.0,
            light_x: 0.0,
            light_y: 1.0,
            light_z: 0.0,
        };
        assert_eq!(constants.resolution(), vec2(800.0, 600.0));
        assert_eq!(constants.camera_position(), vec3(5.0, 10.0, 20.0));
        assert_eq!(constants.light_direction(), Vec3::Y);
        assert_eq!(bytemuck::bytes_of(&constants).len(), 36);
    }

    #[test]
    fn transforms_pack_model_first() {
        let transforms = Transforms {
            model: Mat4::from_translation(vec3(1.0, 2.0, 3.0)),
            model_view_projection: Mat4::IDENTITY,
        };
        let cols = transforms.to_cols_array();
        assert_eq!(&cols[12..15], &[1.0, 2.0, 3.0]);
        assert_eq!(&cols[16..32], &Mat4::IDENTITY.to_cols_array());
    }
}
