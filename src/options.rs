use std::path::PathBuf;

use clap::Parser;
use shared::glam::{vec3, Vec3};

use crate::frame::DEFAULT_TIME_STEP;

/// Animated procedural ocean, ray-marched in a fragment shader.
#[derive(Parser, Debug, Clone)]
#[command(name = "seascape", version)]
pub struct Options {
    /// Viewport width in pixels
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Shader time of the first frame
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true, value_parser = parse_time)]
    pub time: f32,

    /// Time added after every frame
    #[arg(long, default_value_t = DEFAULT_TIME_STEP, value_parser = parse_time_step)]
    pub time_step: f32,

    /// Number of frames to render to disk
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub frames: u32,

    /// PNG to write (frame index is appended when rendering several frames)
    #[arg(short, long, value_name = "PATH", default_value = "seascape.png")]
    pub output: PathBuf,

    /// Open an interactive window instead of writing images
    #[arg(long, conflicts_with_all = ["output", "frames"])]
    pub window: bool,

    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
    pub camera_x: f32,

    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    pub camera_y: f32,

    #[arg(long, default_value_t = 20.0, allow_negative_numbers = true)]
    pub camera_z: f32,
}

impl Options {
    pub fn camera_position(&self) -> Vec3 {
        vec3(self.camera_x, self.camera_y, self.camera_z)
    }
}

fn parse_time(arg: &str) -> Result<f32, String> {
    let time: f32 = arg.parse().map_err(|err| format!("{err}"))?;
    if !time.is_finite() {
        return Err(format!("`{arg}` is not a finite time"));
    }
    Ok(time)
}

fn parse_time_step(arg: &str) -> Result<f32, String> {
    let step = parse_time(arg)?;
    if step <= 0.0 {
        return Err(format!("`{arg}` must be greater than zero"));
    }
    Ok(step)
}
