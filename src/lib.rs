//! Host side of the seascape renderer.
//!
//! Owns everything around the shader: the camera, the plane mesh the ocean is
//! drawn on, the per-frame uniform snapshot, and two backends that invoke the
//! vertex and fragment stages. [`SoftwareRenderer`] calls the shader crate
//! directly on the CPU; [`gpu`] (feature `gpu`) runs its SPIR-V build in a
//! `winit` window through `wgpu`.

pub mod camera;
pub mod error;
pub mod frame;
#[cfg(feature = "gpu")]
pub mod gpu;
pub mod mesh;
pub mod options;
pub mod software;

pub use camera::{Camera, RayCaster};
pub use error::{Error, Result};
pub use frame::FrameState;
pub use mesh::{PlaneHit, PlaneMesh, Vertex};
pub use options::Options;
pub use software::SoftwareRenderer;
