use std::process::ExitCode;

use clap::Parser;
use seascape::{FrameState, Options, PlaneMesh, Result, SoftwareRenderer};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    match run(Options::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(options: Options) -> Result<()> {
    let mut frame = FrameState::new(options.width, options.height, options.camera_position())?
        .with_time(options.time)?
        .with_time_step(options.time_step)?;

    if options.window {
        return window(frame);
    }

    let renderer = SoftwareRenderer::new(PlaneMesh::ocean());
    let written = renderer.render_sequence(&mut frame, options.frames, &options.output)?;
    tracing::info!(frames = written.len(), "done");
    Ok(())
}

#[cfg(feature = "gpu")]
fn window(frame: FrameState) -> Result<()> {
    seascape::gpu::run(frame)
}

#[cfg(not(feature = "gpu"))]
fn window(_frame: FrameState) -> Result<()> {
    Err(seascape::Error::GpuUnavailable)
}
