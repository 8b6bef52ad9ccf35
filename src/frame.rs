use shared::glam::{vec3, Vec3};
use shared::{ShaderConstants, Transforms};

use crate::{Camera, Error, PlaneMesh, Result};

pub const DEFAULT_TIME_STEP: f32 = 0.02;

pub fn default_camera_position() -> Vec3 {
    vec3(5.0, 10.0, 20.0)
}

pub fn default_light_direction() -> Vec3 {
    vec3(0.3, 0.5, 1.0).normalize()
}

/// Everything the backends read to draw one frame.
///
/// Only mutated between frames: [`FrameState::advance`] steps the clock and
/// [`FrameState::resize`] follows the viewport. Backends take a
/// [`ShaderConstants`]/[`Transforms`] snapshot and share it read-only across
/// all invocations of the frame.
#[derive(Clone, Debug)]
pub struct FrameState {
    time: f32,
    time_step: f32,
    width: u32,
    height: u32,
    camera: Camera,
    light_direction: Vec3,
}

impl FrameState {
    pub fn new(width: u32, height: u32, camera_position: Vec3) -> Result<Self> {
        check_viewport(width, height)?;
        Ok(Self {
            time: 0.0,
            time_step: DEFAULT_TIME_STEP,
            width,
            height,
            camera: Camera::new(camera_position, width as f32 / height as f32),
            light_direction: default_light_direction(),
        })
    }

    /// Starts the clock at `time`, which must be finite.
    pub fn with_time(mut self, time: f32) -> Result<Self> {
        if !time.is_finite() {
            return Err(Error::InvalidTime { time });
        }
        self.time = time;
        Ok(self)
    }

    /// The clock only runs forwards: the step must be finite and positive.
    pub fn with_time_step(mut self, time_step: f32) -> Result<Self> {
        if !time_step.is_finite() || time_step <= 0.0 {
            return Err(Error::InvalidTimeStep { time_step });
        }
        self.time_step = time_step;
        Ok(self)
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Steps the clock by the fixed time step and returns the new time.
    pub fn advance(&mut self) -> f32 {
        self.time += self.time_step;
        self.time
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        check_viewport(width, height)?;
        self.width = width;
        self.height = height;
        self.camera.set_aspect(width, height);
        tracing::debug!(width, height, "viewport resized");
        Ok(())
    }

    pub fn constants(&self) -> ShaderConstants {
        let camera = self.camera.position;
        ShaderConstants {
            width: self.width,
            height: self.height,
            time: self.time,
            camera_x: camera.x,
            camera_y: camera.y,
            camera_z: camera.z,
            light_x: self.light_direction.x,
            light_y: self.light_direction.y,
            light_z: self.light_direction.z,
        }
    }

    pub fn transforms(&self, mesh: &PlaneMesh) -> Transforms {
        let model = mesh.model();
        Transforms {
            model,
            model_view_projection: self.camera.view_projection() * model,
        }
    }
}

fn check_viewport(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidViewport { width, height });
    }
    Ok(())
}
