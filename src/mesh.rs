use bytemuck::{Pod, Zeroable};
use shared::glam::{vec2, vec3, Mat4, Vec2, Vec3};

pub const OCEAN_SIZE: f32 = 100.0;
pub const OCEAN_SEGMENTS: u32 = 256;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Where a ray crosses the plane, in the mesh's local frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaneHit {
    pub t: f32,
    pub local: Vec3,
    pub uv: Vec2,
}

/// A subdivided rectangle in the local XY plane, centred on the origin,
/// placed in the world by `model`.
#[derive(Clone, Debug)]
pub struct PlaneMesh {
    width: f32,
    height: f32,
    model: Mat4,
    inverse_model: Mat4,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl PlaneMesh {
    pub fn new(width: f32, height: f32, segments_x: u32, segments_y: u32) -> Self {
        let segments_x = segments_x.max(1);
        let segments_y = segments_y.max(1);
        let segment_width = width / segments_x as f32;
        let segment_height = height / segments_y as f32;

        let mut vertices = Vec::with_capacity(((segments_x + 1) * (segments_y + 1)) as usize);
        for iy in 0..=segments_y {
            let y = iy as f32 * segment_height - height / 2.0;
            for ix in 0..=segments_x {
                let x = ix as f32 * segment_width - width / 2.0;
                vertices.push(Vertex {
                    position: [x, -y, 0.0],
                    uv: [
                        ix as f32 / segments_x as f32,
                        1.0 - iy as f32 / segments_y as f32,
                    ],
                });
            }
        }

        let row = segments_x + 1;
        let mut indices = Vec::with_capacity((segments_x * segments_y * 6) as usize);
        for iy in 0..segments_y {
            for ix in 0..segments_x {
                let a = ix + row * iy;
                let b = ix + row * (iy + 1);
                let c = ix + 1 + row * (iy + 1);
                let d = ix + 1 + row * iy;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self {
            width,
            height,
            model: Mat4::IDENTITY,
            inverse_model: Mat4::IDENTITY,
            vertices,
            indices,
        }
    }

    /// The ocean plane: 100 x 100 units, laid flat on the XZ plane.
    pub fn ocean() -> Self {
        Self::new(OCEAN_SIZE, OCEAN_SIZE, OCEAN_SEGMENTS, OCEAN_SEGMENTS)
            .with_model(Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2))
    }

    pub fn with_model(mut self, model: Mat4) -> Self {
        self.model = model;
        self.inverse_model = model.inverse();
        self
    }

    pub fn model(&self) -> Mat4 {
        self.model
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Intersects a world-space ray with the plane, front or back.
    pub fn hit(&self, origin: Vec3, dir: Vec3) -> Option<PlaneHit> {
        let origin = self.inverse_model.transform_point3(origin);
        let dir = self.inverse_model.transform_vector3(dir);
        if dir.z.abs() < 1e-6 {
            return None;
        }
        let t = -origin.z / dir.z;
        if t <= 0.0 {
            return None;
        }
        let local = origin + dir * t;
        if local.x.abs() > self.width / 2.0 || local.y.abs() > self.height / 2.0 {
            return None;
        }
        Some(PlaneHit {
            t,
            local: vec3(local.x, local.y, 0.0),
            uv: vec2(local.x / self.width + 0.5, local.y / self.height + 0.5),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn ocean_grid_counts() {
        let mesh = PlaneMesh::ocean();
        assert_eq!(mesh.vertices.len(), 257 * 257);
        assert_eq!(mesh.index_count(), 256 * 256 * 6);
        let last = mesh.vertices.len() as u32 - 1;
        assert!(mesh.indices.iter().all(|&i| i <= last));
    }

    #[test]
    fn corners_carry_uvs() {
        let mesh = PlaneMesh::new(10.0, 4.0, 2, 2);
        assert_eq!(mesh.vertices[0].position, [-5.0, 2.0, 0.0]);
        assert_eq!(mesh.vertices[0].uv, [0.0, 1.0]);
        assert_eq!(mesh.vertices[8].position, [5.0, -2.0, 0.0]);
        assert_eq!(mesh.vertices[8].uv, [1.0, 0.0]);
    }

    #[test]
    fn ocean_lies_on_xz() {
        let mesh = PlaneMesh::ocean();
        let corner = mesh.model().transform_point3(vec3(50.0, 50.0, 0.0));
        assert!(corner.abs_diff_eq(vec3(50.0, 0.0, -50.0), 1e-4), "{corner:?}");
    }

    #[test]
    fn ray_hits_inside_extents() {
        let mesh = PlaneMesh::ocean();
        let origin = vec3(5.0, 10.0, 20.0);
        let hit = mesh.hit(origin, (Vec3::ZERO - origin).normalize()).unwrap();
        assert!(hit.local.abs_diff_eq(Vec3::ZERO, 1e-3));
        assert_abs_diff_eq!(hit.t, origin.length(), epsilon = 1e-3);
        assert!(hit.uv.abs_diff_eq(vec2(0.5, 0.5), 1e-4));

        let from_below = mesh.hit(vec3(1.0, -3.0, 1.0), Vec3::Y).unwrap();
        assert_abs_diff_eq!(from_below.t, 3.0, epsilon = 1e-4);
    }

    #[test]
    fn hits_follow_a_replaced_model() {
        let lifted = PlaneMesh::ocean().with_model(
            Mat4::from_translation(vec3(0.0, 2.0, 0.0))
                * Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2),
        );
        let hit = lifted.hit(vec3(1.0, 10.0, 1.0), -Vec3::Y).unwrap();
        assert_abs_diff_eq!(hit.t, 8.0, epsilon = 1e-4);
        assert!(hit.local.abs_diff_eq(vec3(1.0, -1.0, 0.0), 1e-4), "{:?}", hit.local);
    }

    #[test]
    fn ray_misses_outside_extents_parallel_or_behind() {
        let mesh = PlaneMesh::ocean();
        assert!(mesh.hit(vec3(80.0, 10.0, 0.0), -Vec3::Y).is_none());
        assert!(mesh.hit(vec3(0.0, 10.0, 0.0), Vec3::X).is_none());
        assert!(mesh.hit(vec3(0.0, 10.0, 0.0), Vec3::Y).is_none());
    }
}
