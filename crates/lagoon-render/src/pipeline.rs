//! Render pipeline construction.

use crate::bindings::BindGroupLayouts;
use crate::targets::OffscreenTarget;
use std::sync::Arc;

/// Which target format a pipeline renders to: the fixed-format offscreen
/// targets or the presentable surface.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum TargetKind {
    Offscreen,
    Present,
}

const GRID_VERTEX_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: 8,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: 0,
        shader_location: 0,
    }],
};

const SKY_VERTEX_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: 12,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    }],
};

/// All compiled pipelines: sky and terrain per target kind, water only for
/// the visible surface.
pub struct PipelineSet {
    sky: [Arc<wgpu::RenderPipeline>; 2],
    terrain: [Arc<wgpu::RenderPipeline>; 2],
    water: Arc<wgpu::RenderPipeline>,
}

struct PipelineParams<'a> {
    label: &'a str,
    shader: &'a wgpu::ShaderModule,
    group1: &'a wgpu::BindGroupLayout,
    vertex_layout: wgpu::VertexBufferLayout<'static>,
    target_format: wgpu::TextureFormat,
    depth_write: bool,
    depth_compare: wgpu::CompareFunction,
}

impl PipelineSet {
    pub fn new(
        device: &wgpu::Device,
        layouts: &BindGroupLayouts,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let sky_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sky"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/sky.wgsl").into()),
        });
        let terrain_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("terrain"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/terrain.wgsl").into()),
        });
        let water_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("water"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/water.wgsl").into()),
        });

        let formats = [OffscreenTarget::FORMAT, surface_format];

        let sky = formats.map(|format| {
            Arc::new(Self::create_pipeline(
                device,
                layouts,
                PipelineParams {
                    label: "Sky Pipeline",
                    shader: &sky_shader,
                    group1: &layouts.sky,
                    vertex_layout: SKY_VERTEX_LAYOUT,
                    target_format: format,
                    // The cube is emitted at far depth; draw it wherever the
                    // depth buffer is still clear.
                    depth_write: false,
                    depth_compare: wgpu::CompareFunction::LessEqual,
                },
            ))
        });

        let terrain = formats.map(|format| {
            Arc::new(Self::create_pipeline(
                device,
                layouts,
                PipelineParams {
                    label: "Terrain Pipeline",
                    shader: &terrain_shader,
                    group1: &layouts.terrain,
                    vertex_layout: GRID_VERTEX_LAYOUT,
                    target_format: format,
                    depth_write: true,
                    depth_compare: wgpu::CompareFunction::Less,
                },
            ))
        });

        let water = Arc::new(Self::create_pipeline(
            device,
            layouts,
            PipelineParams {
                label: "Water Pipeline",
                shader: &water_shader,
                group1: &layouts.water,
                vertex_layout: GRID_VERTEX_LAYOUT,
                target_format: surface_format,
                depth_write: true,
                depth_compare: wgpu::CompareFunction::Less,
            },
        ));

        Self { sky, terrain, water }
    }

    pub fn sky(&self, kind: TargetKind) -> &wgpu::RenderPipeline {
        &self.sky[kind as usize]
    }

    pub fn terrain(&self, kind: TargetKind) -> &wgpu::RenderPipeline {
        &self.terrain[kind as usize]
    }

    pub fn water(&self) -> &wgpu::RenderPipeline {
        &self.water
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layouts: &BindGroupLayouts,
        params: PipelineParams,
    ) -> wgpu::RenderPipeline {
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{} Layout", params.label)),
            bind_group_layouts: &[&layouts.view, params.group1],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(params.label),
            layout: Some(&pipeline_layout),
            cache: None,
            vertex: wgpu::VertexState {
                module: params.shader,
                entry_point: "vs_main",
                buffers: &[params.vertex_layout],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: params.shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: params.target_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The reflection pass views the terrain from below the water
                // plane and the camera sits inside the sky cube, so nothing
                // here can be backface-culled.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: params.depth_write,
                depth_compare: params.depth_compare,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        })
    }
}
