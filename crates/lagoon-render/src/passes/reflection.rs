//! Reflection pass: the scene as seen by the camera mirrored across the
//! water plane, with terrain below the waterline discarded.

use crate::graph::{PassContext, PassResourceBuilder, RenderPass, ResourceHandle};
use crate::pipeline::TargetKind;
use crate::Result;

use super::scene::{clear_color_attachment, clear_depth_attachment, EnvironmentDraw};

pub struct ReflectionPass;

impl RenderPass for ReflectionPass {
    fn name(&self) -> &str {
        "reflection"
    }

    fn declare_resources(&self, builder: &mut PassResourceBuilder) {
        builder.write(ResourceHandle::reflection());
    }

    fn execute(&mut self, ctx: &mut PassContext) -> Result<()> {
        let draw = EnvironmentDraw {
            pipelines: ctx.pipelines,
            meshes: ctx.meshes,
            stages: ctx.stages,
            view_group: &ctx.view_groups.reflection.bind_group,
            sky_group: ctx.sky_bind_group,
            terrain_group: ctx.terrain_bind_group,
        };
        let color = clear_color_attachment(&ctx.reflection.color_view);
        let depth = clear_depth_attachment(&ctx.reflection.depth_view);

        let mut rpass = ctx.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Reflection Pass"),
            color_attachments: &[color],
            depth_stencil_attachment: depth,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        draw.record(&mut rpass, TargetKind::Offscreen);
        Ok(())
    }
}
