//! Core types for the Lagoon terrain/water renderer.
//!
//! Everything in this crate is CPU-side and GPU-agnostic: the grid mesh
//! builder, the per-frame camera snapshot, and the water plane state.
//! The `lagoon-render` crate owns all wgpu resources built from these.

pub mod camera;
pub mod grid;
pub mod water;

mod error;

pub use camera::SceneSnapshot;
pub use error::{Error, Result};
pub use grid::GridMesh;
pub use water::WaterState;
