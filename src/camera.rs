use shared::glam::{vec3, Mat4, Vec3};

pub const FOV_Y_DEGREES: f32 = 55.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 4000.0;

/// Perspective camera. Looks down `-Z` with `+Y` up unless told otherwise.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(position: Vec3, aspect: f32) -> Self {
        Self {
            position,
            forward: vec3(0.0, 0.0, -1.0),
            up: Vec3::Y,
            fov_y: FOV_Y_DEGREES.to_radians(),
            aspect,
            near: NEAR,
            far: FAR,
        }
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward, self.up)
    }

    /// Projection with wgpu's `[0, 1]` depth range.
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Unprojects pixels of a `width` x `height` viewport. The inverse
    /// view-projection is taken once here, not per pixel.
    pub fn ray_caster(&self, width: u32, height: u32) -> RayCaster {
        RayCaster {
            origin: self.position,
            inverse_view_projection: self.view_projection().inverse(),
            width: width as f32,
            height: height as f32,
        }
    }
}

/// Per-frame pixel-to-ray mapping for one camera and viewport.
#[derive(Copy, Clone, Debug)]
pub struct RayCaster {
    origin: Vec3,
    inverse_view_projection: Mat4,
    width: f32,
    height: f32,
}

impl RayCaster {
    /// World-space ray through the centre of pixel `(x, y)`, with `y` growing
    /// downwards. Returns `(origin, direction)`.
    pub fn ray(&self, x: u32, y: u32) -> (Vec3, Vec3) {
        let ndc_x = (x as f32 + 0.5) / self.width * 2.0 - 1.0;
        let ndc_y = 1.0 - (y as f32 + 0.5) / self.height * 2.0;
        let near = self
            .inverse_view_projection
            .project_point3(vec3(ndc_x, ndc_y, 0.0));
        let far = self
            .inverse_view_projection
            .project_point3(vec3(ndc_x, ndc_y, 1.0));
        (self.origin, (far - near).normalize())
    }
}
