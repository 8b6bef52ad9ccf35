//! Ocean surface shader stages.
//!
//! Built to SPIR-V by `spirv-builder` for the wgpu host, and linked as an
//! ordinary library by the software renderer, which calls [`vs`] and [`fs`]
//! directly.

#![cfg_attr(target_arch = "spirv", no_std)]

use shared::*;
use spirv_std::glam::{Vec2, Vec3, Vec4};
use spirv_std::spirv;

pub mod seascape;

/// Varyings produced by the vertex stage.
#[derive(Copy, Clone, PartialEq)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub struct VertexOutput {
    pub world_position: Vec3,
    pub tex_coord: Vec2,
    pub clip_position: Vec4,
}

pub fn vs(transforms: &Transforms, position: Vec3, tex_coord: Vec2) -> VertexOutput {
    let local = position.extend(1.0);
    VertexOutput {
        world_position: (transforms.model * local).truncate(),
        tex_coord,
        clip_position: transforms.model_view_projection * local,
    }
}

pub fn fs(constants: &ShaderConstants, world_position: Vec3) -> Vec4 {
    let mut color = Vec4::ZERO;
    seascape::Inputs {
        resolution: constants.resolution(),
        time: constants.time,
        camera_position: constants.camera_position(),
        light_direction: constants.light_direction(),
    }
    .main_image(&mut color, world_position);
    color
}

#[spirv(fragment)]
pub fn main_fs(
    world_position: Vec3,
    _tex_coord: Vec2,
    #[spirv(push_constant)] constants: &ShaderConstants,
    output: &mut Vec4,
) {
    *output = fs(constants, world_position);
}

#[spirv(vertex)]
pub fn main_vs(
    position: Vec3,
    tex_coord: Vec2,
    #[spirv(uniform, descriptor_set = 0, binding = 0)] transforms: &Transforms,
    out_world_position: &mut Vec3,
    out_tex_coord: &mut Vec2,
    #[spirv(position)] builtin_pos: &mut Vec4,
) {
    let out = vs(transforms, position, tex_coord);
    *out_world_position = out.world_position;
    *out_tex_coord = out.tex_coord;
    *builtin_pos = out.clip_position;
}

#[cfg(test)]
mod tests {
    use super::*;
    use spirv_std::glam::{vec2, vec3, Mat4};

    fn constants() -> ShaderConstants {
        let light = vec3(0.3, 0.5, 1.0).normalize();
        ShaderConstants {
            width: 800,
            height: 600,
            time: 0.0,
            camera_x: 5.0,
            camera_y: 10.0,
            camera_z: 20.0,
            light_x: light.x,
            light_y: light.y,
            light_z: light.z,
        }
    }

    #[test]
    fn vertex_stage_separates_world_and_clip_space() {
        let model = Mat4::from_rotation_x(-core::f32::consts::FRAC_PI_2);
        let projection = Mat4::from_scale(vec3(2.0, 2.0, 0.5));
        let transforms = Transforms {
            model,
            model_view_projection: projection * model,
        };

        let out = vs(&transforms, vec3(3.0, 4.0, 0.0), vec2(0.25, 0.75));
        assert!(out.world_position.abs_diff_eq(vec3(3.0, 0.0, -4.0), 1e-5));
        assert_eq!(out.tex_coord, vec2(0.25, 0.75));
        assert!(out.clip_position.abs_diff_eq(Vec4::new(6.0, 0.0, -2.0, 1.0), 1e-5));
    }

    #[test]
    fn fragment_stage_is_opaque() {
        let constants = constants();
        for world in [Vec3::ZERO, vec3(-12.0, 0.0, 3.5), vec3(40.0, 0.0, -45.0)] {
            let color = fs(&constants, world);
            assert_eq!(color.w, 1.0);
            assert!(color.truncate().is_finite());
            assert!(color.truncate().min_element() >= 0.0);
        }
    }

    #[test]
    fn fragment_stage_reads_only_its_snapshot() {
        let constants = constants();
        let world = vec3(2.0, 0.0, -1.0);
        assert_eq!(fs(&constants, world), fs(&constants, world));

        let later = ShaderConstants {
            time: 0.02,
            ..constants
        };
        assert_ne!(fs(&constants, world), fs(&later, world));
    }
}
