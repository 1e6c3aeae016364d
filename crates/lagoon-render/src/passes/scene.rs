//! Shared sky + terrain draw sequence.
//!
//! All three passes draw the same environment; they differ only in camera,
//! clip mode (both carried by the per-pass view bind group) and target.

use crate::mesh::{GpuMesh, SceneMeshes};
use crate::pipeline::{PipelineSet, TargetKind};
use crate::stage::StageMask;

pub(crate) struct EnvironmentDraw<'a> {
    pub pipelines: &'a PipelineSet,
    pub meshes: &'a SceneMeshes,
    pub stages: StageMask,
    pub view_group: &'a wgpu::BindGroup,
    pub sky_group: &'a wgpu::BindGroup,
    pub terrain_group: &'a wgpu::BindGroup,
}

impl EnvironmentDraw<'_> {
    pub fn record(&self, rpass: &mut wgpu::RenderPass, kind: TargetKind) {
        if self.stages.contains(StageMask::SKYBOX) {
            rpass.set_pipeline(self.pipelines.sky(kind));
            rpass.set_bind_group(0, self.view_group, &[]);
            rpass.set_bind_group(1, self.sky_group, &[]);
            draw_mesh(rpass, &self.meshes.sky);
        }
        if self.stages.contains(StageMask::TERRAIN) {
            rpass.set_pipeline(self.pipelines.terrain(kind));
            rpass.set_bind_group(0, self.view_group, &[]);
            rpass.set_bind_group(1, self.terrain_group, &[]);
            draw_mesh(rpass, &self.meshes.terrain);
        }
    }
}

pub(crate) fn draw_mesh(rpass: &mut wgpu::RenderPass, mesh: &GpuMesh) {
    rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
    rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
    rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
}

pub(crate) fn clear_color_attachment<'a>(
    view: &'a wgpu::TextureView,
) -> Option<wgpu::RenderPassColorAttachment<'a>> {
    Some(wgpu::RenderPassColorAttachment {
        view,
        resolve_target: None,
        ops: wgpu::Operations {
            load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
            store: wgpu::StoreOp::Store,
        },
    })
}

pub(crate) fn clear_depth_attachment(
    view: &wgpu::TextureView,
) -> Option<wgpu::RenderPassDepthStencilAttachment> {
    Some(wgpu::RenderPassDepthStencilAttachment {
        view,
        depth_ops: Some(wgpu::Operations {
            load: wgpu::LoadOp::Clear(1.0),
            store: wgpu::StoreOp::Store,
        }),
        stencil_ops: None,
    })
}
