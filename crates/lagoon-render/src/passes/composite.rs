//! Composite pass: sky, unclipped terrain, then the water surface sampling
//! the two offscreen targets, into the visible frame.

use crate::graph::{PassContext, PassResourceBuilder, RenderPass, ResourceHandle};
use crate::pipeline::TargetKind;
use crate::stage::StageMask;
use crate::Result;

use super::scene::{clear_color_attachment, clear_depth_attachment, draw_mesh, EnvironmentDraw};

pub struct CompositePass;

impl RenderPass for CompositePass {
    fn name(&self) -> &str {
        "composite"
    }

    fn declare_resources(&self, builder: &mut PassResourceBuilder) {
        builder
            .read(ResourceHandle::reflection())
            .read(ResourceHandle::refraction())
            .write(ResourceHandle::frame());
    }

    fn execute(&mut self, ctx: &mut PassContext) -> Result<()> {
        let pipelines = ctx.pipelines;
        let meshes = ctx.meshes;
        let stages = ctx.stages;
        let water_group = ctx.water_bind_group;
        let view_group = &ctx.view_groups.present.bind_group;
        let draw = EnvironmentDraw {
            pipelines,
            meshes,
            stages,
            view_group,
            sky_group: ctx.sky_bind_group,
            terrain_group: ctx.terrain_bind_group,
        };
        let color = clear_color_attachment(ctx.frame_view);
        let depth = clear_depth_attachment(ctx.frame_depth);

        let mut rpass = ctx.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Composite Pass"),
            color_attachments: &[color],
            depth_stencil_attachment: depth,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        draw.record(&mut rpass, TargetKind::Present);

        if stages.contains(StageMask::WATER) {
            rpass.set_pipeline(pipelines.water());
            rpass.set_bind_group(0, view_group, &[]);
            rpass.set_bind_group(1, water_group, &[]);
            draw_mesh(&mut rpass, &meshes.water);
        }
        Ok(())
    }
}
