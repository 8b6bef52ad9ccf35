//! CPU backend: runs the shader crate's stages per pixel and writes PNGs.

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use rayon::prelude::*;
use shared::glam::Vec4;
use shared::{ShaderConstants, Transforms};

use crate::{FrameState, PlaneMesh, RayCaster, Result};

const CLEAR_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

pub struct SoftwareRenderer {
    mesh: PlaneMesh,
}

impl SoftwareRenderer {
    pub fn new(mesh: PlaneMesh) -> Self {
        Self { mesh }
    }

    /// Renders one frame. Rows are shaded in parallel; every worker reads the
    /// same uniform snapshot.
    pub fn render(&self, frame: &FrameState) -> RgbaImage {
        let (width, height) = frame.size();
        let constants = frame.constants();
        let transforms = frame.transforms(&self.mesh);
        let rays = frame.camera().ray_caster(width, height);

        let mut image = RgbaImage::from_pixel(width, height, CLEAR_COLOR);
        let row_len = width as usize * 4;
        image
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, pixel) in row.chunks_exact_mut(4).enumerate() {
                    let shaded = self.shade(&constants, &transforms, &rays, x as u32, y as u32);
                    if let Some(color) = shaded {
                        pixel.copy_from_slice(&to_rgba8(color).0);
                    }
                }
            });
        image
    }

    /// Renders `frames` consecutive frames, advancing the clock after each.
    /// With more than one frame the index is appended to the file stem.
    pub fn render_sequence(
        &self,
        frame: &mut FrameState,
        frames: u32,
        output: &Path,
    ) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(frames as usize);
        for index in 0..frames {
            let path = frame_path(output, index, frames);
            let image = self.render(frame);
            image.save(&path)?;
            tracing::info!(path = %path.display(), time = frame.time(), "wrote frame");
            written.push(path);
            frame.advance();
        }
        Ok(written)
    }

    /// Vertex then fragment stage for the mesh point under one pixel, or
    /// `None` when the pixel is not covered.
    fn shade(
        &self,
        constants: &ShaderConstants,
        transforms: &Transforms,
        rays: &RayCaster,
        x: u32,
        y: u32,
    ) -> Option<Vec4> {
        let (origin, dir) = rays.ray(x, y);
        let hit = self.mesh.hit(origin, dir)?;
        let varyings = seascape_shaders::vs(transforms, hit.local, hit.uv);
        let clip = varyings.clip_position;
        if clip.w <= 0.0 || clip.z < 0.0 || clip.z > clip.w {
            return None;
        }
        Some(seascape_shaders::fs(constants, varyings.world_position))
    }
}

pub fn to_rgba8(color: Vec4) -> Rgba<u8> {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba([
        channel(color.x),
        channel(color.y),
        channel(color.z),
        channel(color.w),
    ])
}

fn frame_path(output: &Path, index: u32, frames: u32) -> PathBuf {
    if frames <= 1 {
        return output.to_path_buf();
    }
    let stem = output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_owned());
    let name = match output.extension() {
        Some(ext) => format!("{stem}_{index:04}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{index:04}"),
    };
    output.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::glam::vec4;

    #[test]
    fn colors_are_clamped_to_bytes() {
        assert_eq!(to_rgba8(vec4(0.0, 0.5, 1.0, 1.0)), Rgba([0, 128, 255, 255]));
        assert_eq!(to_rgba8(vec4(-0.3, 2.2, f32::NAN, 1.0)), Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn sequences_number_their_frames() {
        let output = Path::new("out/sea.png");
        assert_eq!(frame_path(output, 0, 1), PathBuf::from("out/sea.png"));
        assert_eq!(frame_path(output, 7, 3), PathBuf::from("out/sea_0007.png"));
        assert_eq!(frame_path(Path::new("sea"), 2, 3), PathBuf::from("sea_0002"));
    }
}
