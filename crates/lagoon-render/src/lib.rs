//! Lagoon renderer — terrain, skybox, and a planar-reflection water surface
//! on idiomatic wgpu.
//!
//! One frame is three render passes wired through a small render graph:
//!
//! - a reflection pass with the camera mirrored across the water plane,
//!   terrain clipped below the waterline, into an offscreen target;
//! - a refraction pass with the plain camera, terrain clipped above the
//!   waterline, into a second offscreen target;
//! - a composite pass that draws sky, terrain, and the water quad, which
//!   samples both offscreen targets in screen space.
//!
//! The graph orders passes from their declared target reads/writes, so the
//! composite pass can never sample a target the frame has not written yet.

pub mod assets;
pub mod graph;
pub mod passes;
pub mod procedural;

mod bindings;
mod mesh;
mod pipeline;
mod renderer;
mod stage;
mod targets;
mod texture;

pub use assets::{AssetKind, AssetLoader, DecodedImage};
pub use mesh::{GpuMesh, SceneMeshes};
pub use renderer::{Renderer, RendererConfig};
pub use stage::StageMask;
pub use targets::OffscreenTarget;

/// Result type for renderer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during rendering
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("pipeline error: {0}")]
    Pipeline(String),

    #[error("graph error: {0}")]
    Graph(String),

    #[error("resource error: {0}")]
    Resource(String),

    #[error("asset error: {0}")]
    Asset(String),

    #[error("wgpu error: {0}")]
    Wgpu(String),

    #[error(transparent)]
    Core(#[from] lagoon_core::Error),
}

impl From<wgpu::Error> for Error {
    fn from(err: wgpu::Error) -> Self {
        Error::Wgpu(err.to_string())
    }
}
