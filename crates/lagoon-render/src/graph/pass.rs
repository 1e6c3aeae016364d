//! Render pass trait and execution context.

use crate::bindings::ViewBindGroups;
use crate::mesh::SceneMeshes;
use crate::pipeline::PipelineSet;
use crate::stage::StageMask;
use crate::targets::OffscreenTarget;
use crate::Result;

use super::PassResourceBuilder;

/// Render pass trait - implemented by the frame's passes
pub trait RenderPass: Send + Sync {
    /// Unique name for this pass
    fn name(&self) -> &str;

    /// Declare resource dependencies.
    ///
    /// Called once during graph building to determine pass ordering: a pass
    /// that reads a target runs after every pass that writes it.
    fn declare_resources(&self, _builder: &mut PassResourceBuilder) {
        // Default: no resource dependencies
    }

    /// Record this pass's GPU commands. Called every frame.
    fn execute(&mut self, ctx: &mut PassContext) -> Result<()>;
}

/// Context for pass execution.
///
/// Everything here is owned by the renderer and shared read-only with every
/// pass; only the encoder is handed out mutably.
pub struct PassContext<'a> {
    /// Command encoder for recording GPU commands
    pub encoder: &'a mut wgpu::CommandEncoder,

    /// Compiled pipelines for all stages and target kinds
    pub pipelines: &'a PipelineSet,

    /// Static terrain/water/sky meshes
    pub meshes: &'a SceneMeshes,

    /// Which stages to draw this frame
    pub stages: StageMask,

    /// The visible frame target and its depth buffer
    pub frame_view: &'a wgpu::TextureView,
    pub frame_depth: &'a wgpu::TextureView,

    /// Offscreen targets owned by the renderer, fully rewritten every frame
    pub reflection: &'a OffscreenTarget,
    pub refraction: &'a OffscreenTarget,

    /// Per-pass view/globals uniform bind groups (group 0)
    pub view_groups: &'a ViewBindGroups,

    /// Heightmap + albedo (group 1 of the terrain pipeline)
    pub terrain_bind_group: &'a wgpu::BindGroup,

    /// Cubemap (group 1 of the sky pipeline)
    pub sky_bind_group: &'a wgpu::BindGroup,

    /// Reflection/refraction/distortion/normal maps (group 1 of the water
    /// pipeline)
    pub water_bind_group: &'a wgpu::BindGroup,
}
