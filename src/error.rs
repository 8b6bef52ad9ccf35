/// Errors raised by the host. The shader itself has no failure modes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid start time {time}, expected a finite value")]
    InvalidTime { time: f32 },

    #[error("invalid time step {time_step}, expected a finite positive value")]
    InvalidTimeStep { time_step: f32 },

    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),

    #[error("the window needs a build with the `gpu` feature")]
    GpuUnavailable,

    #[cfg(feature = "gpu")]
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[cfg(feature = "gpu")]
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[cfg(feature = "gpu")]
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[cfg(feature = "gpu")]
    #[error("surface reports no usable format")]
    UnsupportedSurface,

    #[cfg(feature = "gpu")]
    #[error("no suitable GPU adapter")]
    NoAdapter,

    #[cfg(feature = "gpu")]
    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[cfg(feature = "gpu")]
    #[error("failed to acquire frame: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
