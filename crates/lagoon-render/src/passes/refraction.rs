//! Refraction pass: the scene from the unmirrored camera, with terrain
//! above the waterline discarded.

use crate::graph::{PassContext, PassResourceBuilder, RenderPass, ResourceHandle};
use crate::pipeline::TargetKind;
use crate::Result;

use super::scene::{clear_color_attachment, clear_depth_attachment, EnvironmentDraw};

pub struct RefractionPass;

impl RenderPass for RefractionPass {
    fn name(&self) -> &str {
        "refraction"
    }

    fn declare_resources(&self, builder: &mut PassResourceBuilder) {
        builder.write(ResourceHandle::refraction());
    }

    fn execute(&mut self, ctx: &mut PassContext) -> Result<()> {
        let draw = EnvironmentDraw {
            pipelines: ctx.pipelines,
            meshes: ctx.meshes,
            stages: ctx.stages,
            view_group: &ctx.view_groups.refraction.bind_group,
            sky_group: ctx.sky_bind_group,
            terrain_group: ctx.terrain_bind_group,
        };
        let color = clear_color_attachment(&ctx.refraction.color_view);
        let depth = clear_depth_attachment(&ctx.refraction.depth_view);

        let mut rpass = ctx.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Refraction Pass"),
            color_attachments: &[color],
            depth_stencil_attachment: depth,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        draw.record(&mut rpass, TargetKind::Offscreen);
        Ok(())
    }
}
