//! The renderer: owns every GPU resource a frame needs and drives the
//! render graph.
//!
//! Nothing here is global. Callers hand in a device/queue pair and a per
//! frame camera snapshot; everything else (targets, pipelines, materials,
//! in-flight asset decodes) lives on this struct.

use std::sync::Arc;

use lagoon_core::{GridMesh, SceneSnapshot, WaterState};

use crate::assets::{AssetKind, AssetLoader, DecodedImage};
use crate::bindings::{BindGroupLayouts, ClipMode, ViewBindGroups, ViewUniform};
use crate::graph::{PassContext, RenderGraph};
use crate::mesh::{GpuMesh, SceneMeshes};
use crate::passes::{CompositePass, ReflectionPass, RefractionPass};
use crate::pipeline::PipelineSet;
use crate::procedural;
use crate::stage::StageMask;
use crate::targets::{create_depth_texture, OffscreenTarget};
use crate::texture::GpuTexture;
use crate::Result;

/// Startup parameters. Everything except the surface has a usable default.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    pub width: u32,
    pub height: u32,
    pub surface_format: wgpu::TextureFormat,
    /// Side length of the square reflection/refraction targets.
    pub offscreen_size: u32,
    /// Vertices per side of the terrain/water grids.
    pub grid_resolution: u32,
    pub stages: StageMask,
}

impl RendererConfig {
    pub fn new(width: u32, height: u32, surface_format: wgpu::TextureFormat) -> Self {
        Self {
            width,
            height,
            surface_format,
            offscreen_size: 1024,
            grid_resolution: 100,
            stages: StageMask::default(),
        }
    }
}

pub struct Renderer {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    stages: StageMask,
    grid_resolution: u32,

    layouts: BindGroupLayouts,
    pipelines: PipelineSet,
    graph: RenderGraph,
    meshes: SceneMeshes,
    view_groups: ViewBindGroups,

    reflection: OffscreenTarget,
    refraction: OffscreenTarget,
    frame_depth: wgpu::TextureView,

    terrain_heightmap: GpuTexture,
    terrain_albedo: GpuTexture,
    water_normal: GpuTexture,
    water_distortion: GpuTexture,
    sky_cubemap: GpuTexture,

    terrain_sampler: wgpu::Sampler,
    sky_sampler: wgpu::Sampler,
    screen_sampler: wgpu::Sampler,
    detail_sampler: wgpu::Sampler,

    terrain_bind_group: wgpu::BindGroup,
    sky_bind_group: wgpu::BindGroup,
    water_bind_group: wgpu::BindGroup,

    assets: AssetLoader,
    pending_sky: [Option<DecodedImage>; 6],
    frame_count: u64,
}

impl Renderer {
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        config: RendererConfig,
    ) -> Result<Self> {
        log::info!(
            "Initializing renderer: {}x{} frame, {} offscreen, {} grid",
            config.width,
            config.height,
            config.offscreen_size,
            config.grid_resolution
        );

        let layouts = BindGroupLayouts::new(&device);
        let pipelines = PipelineSet::new(&device, &layouts, config.surface_format);
        let view_groups = ViewBindGroups::new(&device, &layouts);

        let grid = GridMesh::build(config.grid_resolution, config.grid_resolution)?;
        let meshes = SceneMeshes {
            terrain: GpuMesh::from_grid(&device, "Terrain", &grid),
            // The water plane is flat, a single quad is enough.
            water: GpuMesh::from_grid(&device, "Water", &GridMesh::unit_quad()),
            sky: GpuMesh::sky_cube(&device),
        };

        let reflection = OffscreenTarget::new(&device, "Reflection Target", config.offscreen_size);
        let refraction = OffscreenTarget::new(&device, "Refraction Target", config.offscreen_size);
        let (_frame_depth_tex, frame_depth) =
            create_depth_texture(&device, "Frame Depth", config.width, config.height);

        // Mid-gray heightmap keeps the terrain flat until the real one lands.
        let terrain_heightmap = GpuTexture::placeholder(
            &device,
            &queue,
            [128, 128, 128, 255],
            wgpu::TextureFormat::Rgba8Unorm,
            Some("Heightmap Placeholder"),
        );
        let terrain_albedo = GpuTexture::placeholder(
            &device,
            &queue,
            [255, 255, 255, 255],
            wgpu::TextureFormat::Rgba8UnormSrgb,
            Some("Albedo Placeholder"),
        );
        // Flat +Y normal in the map's encoding.
        let water_normal = GpuTexture::placeholder(
            &device,
            &queue,
            [128, 255, 128, 255],
            wgpu::TextureFormat::Rgba8Unorm,
            Some("Water Normal Placeholder"),
        );
        let water_distortion = GpuTexture::placeholder(
            &device,
            &queue,
            [0, 0, 0, 255],
            wgpu::TextureFormat::Rgba8Unorm,
            Some("Distortion Placeholder"),
        );
        let sky_cubemap = GpuTexture::placeholder_cube(
            &device,
            &queue,
            [96, 128, 160, 255],
            Some("Sky Placeholder"),
        );

        let terrain_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Terrain Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let sky_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Sky Sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        // The offscreen targets are read back at near-1:1 scale, filtering
        // them just smears the distortion.
        let screen_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Screen Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let detail_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Detail Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let terrain_bind_group = Self::create_terrain_bind_group(
            &device,
            &layouts,
            &terrain_heightmap,
            &terrain_albedo,
            &terrain_sampler,
        );
        let sky_bind_group =
            Self::create_sky_bind_group(&device, &layouts, &sky_cubemap, &sky_sampler);
        let water_bind_group = Self::create_water_bind_group(
            &device,
            &layouts,
            &reflection,
            &refraction,
            &water_distortion,
            &water_normal,
            &screen_sampler,
            &detail_sampler,
        );

        let graph = Self::build_graph(config.stages)?;

        Ok(Self {
            device,
            queue,
            stages: config.stages,
            grid_resolution: config.grid_resolution,
            layouts,
            pipelines,
            graph,
            meshes,
            view_groups,
            reflection,
            refraction,
            frame_depth,
            terrain_heightmap,
            terrain_albedo,
            water_normal,
            water_distortion,
            sky_cubemap,
            terrain_sampler,
            sky_sampler,
            screen_sampler,
            detail_sampler,
            terrain_bind_group,
            sky_bind_group,
            water_bind_group,
            assets: AssetLoader::new(),
            pending_sky: Default::default(),
            frame_count: 0,
        })
    }

    fn build_graph(stages: StageMask) -> Result<RenderGraph> {
        let mut graph = RenderGraph::new();
        // Without water nothing samples the offscreen targets, so the two
        // feeder passes are simply not registered.
        if stages.contains(StageMask::WATER) {
            graph.add_pass(ReflectionPass);
            graph.add_pass(RefractionPass);
        }
        graph.add_pass(CompositePass);
        graph.build()?;
        Ok(graph)
    }

    /// Record and submit one frame into `frame_view`.
    pub fn render(
        &mut self,
        snapshot: &SceneSnapshot,
        water: &WaterState,
        frame_view: &wgpu::TextureView,
        time: f32,
    ) -> Result<()> {
        self.apply_ready_assets();

        let grid_texel = 1.0 / (self.grid_resolution - 1) as f32;
        let mirrored = snapshot.mirrored_across_water(water.height);
        self.view_groups.reflection.write(
            &self.queue,
            &ViewUniform::new(&mirrored, water, ClipMode::BelowWater, grid_texel, time),
        );
        self.view_groups.refraction.write(
            &self.queue,
            &ViewUniform::new(snapshot, water, ClipMode::AboveWater, grid_texel, time),
        );
        self.view_groups.present.write(
            &self.queue,
            &ViewUniform::new(snapshot, water, ClipMode::None, grid_texel, time),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        let mut ctx = PassContext {
            encoder: &mut encoder,
            pipelines: &self.pipelines,
            meshes: &self.meshes,
            stages: self.stages,
            frame_view,
            frame_depth: &self.frame_depth,
            reflection: &self.reflection,
            refraction: &self.refraction,
            view_groups: &self.view_groups,
            terrain_bind_group: &self.terrain_bind_group,
            sky_bind_group: &self.sky_bind_group,
            water_bind_group: &self.water_bind_group,
        };
        self.graph.execute(&mut ctx)?;

        self.queue.submit(std::iter::once(encoder.finish()));
        self.frame_count += 1;
        Ok(())
    }

    /// Recreate the frame depth buffer after a surface resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        let (_tex, view) = create_depth_texture(&self.device, "Frame Depth", width, height);
        self.frame_depth = view;
    }

    /// Recreate the reflection/refraction targets at a new resolution.
    pub fn set_offscreen_resolution(&mut self, size: u32) {
        self.reflection = OffscreenTarget::new(&self.device, "Reflection Target", size);
        self.refraction = OffscreenTarget::new(&self.device, "Refraction Target", size);
        self.rebuild_water_bind_group();
    }

    /// Rebuild the terrain grid at a new vertex resolution.
    pub fn set_grid_resolution(&mut self, resolution: u32) -> Result<()> {
        let grid = GridMesh::build(resolution, resolution)?;
        self.meshes.terrain = GpuMesh::from_grid(&self.device, "Terrain", &grid);
        self.grid_resolution = resolution;
        Ok(())
    }

    /// Switch which stages the frame draws; rewires the pass graph.
    pub fn set_stages(&mut self, stages: StageMask) -> Result<()> {
        if stages != self.stages {
            self.graph = Self::build_graph(stages)?;
            self.stages = stages;
        }
        Ok(())
    }

    pub fn stages(&self) -> StageMask {
        self.stages
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Queue background decodes; placeholders draw until results land.
    pub fn assets_mut(&mut self) -> &mut AssetLoader {
        &mut self.assets
    }

    /// True once every queued asset has been uploaded.
    pub fn assets_ready(&self) -> bool {
        self.assets.is_idle() && self.pending_sky.iter().all(Option::is_none)
    }

    /// Queue seeded generators for every texture slot. The scene starts on
    /// placeholders and sharpens as each generator finishes.
    pub fn load_procedural_assets(&mut self, seed: u64) {
        self.assets.generate(move || procedural::heightmap(512, seed));
        self.assets.generate(move || procedural::terrain_albedo(512, seed));
        self.assets.generate(|| procedural::water_normal_map(256));
        self.assets.generate(move || procedural::water_distortion_map(256, seed));
        for face in procedural::sky_faces(256) {
            self.assets.generate(move || face);
        }
    }

    fn apply_ready_assets(&mut self) {
        for image in self.assets.poll() {
            match image.kind {
                AssetKind::TerrainHeightmap => {
                    self.terrain_heightmap = GpuTexture::from_image(
                        &self.device,
                        &self.queue,
                        &image,
                        wgpu::TextureFormat::Rgba8Unorm,
                        Some("Terrain Heightmap"),
                    );
                    self.rebuild_terrain_bind_group();
                }
                AssetKind::TerrainAlbedo => {
                    self.terrain_albedo = GpuTexture::from_image(
                        &self.device,
                        &self.queue,
                        &image,
                        wgpu::TextureFormat::Rgba8UnormSrgb,
                        Some("Terrain Albedo"),
                    );
                    self.rebuild_terrain_bind_group();
                }
                AssetKind::WaterNormal => {
                    self.water_normal = GpuTexture::from_image(
                        &self.device,
                        &self.queue,
                        &image,
                        wgpu::TextureFormat::Rgba8Unorm,
                        Some("Water Normal Map"),
                    );
                    self.rebuild_water_bind_group();
                }
                AssetKind::WaterDistortion => {
                    self.water_distortion = GpuTexture::from_image(
                        &self.device,
                        &self.queue,
                        &image,
                        wgpu::TextureFormat::Rgba8Unorm,
                        Some("Water Distortion Map"),
                    );
                    self.rebuild_water_bind_group();
                }
                AssetKind::SkyFace(index) if index < 6 => {
                    self.pending_sky[index] = Some(image);
                    self.try_assemble_sky();
                }
                AssetKind::SkyFace(index) => {
                    log::warn!("ignoring sky face index {index} out of range");
                }
            }
        }
    }

    /// Upload the cubemap once all six faces have arrived.
    fn try_assemble_sky(&mut self) {
        if self.pending_sky.iter().any(Option::is_none) {
            return;
        }
        let collected: Vec<DecodedImage> =
            self.pending_sky.iter_mut().filter_map(Option::take).collect();
        let Ok(faces) = <[DecodedImage; 6]>::try_from(collected) else {
            return;
        };
        if faces.iter().any(|f| f.width != faces[0].width || f.height != faces[0].height) {
            log::warn!("sky faces have mismatched resolutions, keeping placeholder");
            return;
        }
        self.sky_cubemap =
            GpuTexture::cubemap_from_faces(&self.device, &self.queue, &faces, Some("Sky Cubemap"));
        self.sky_bind_group = Self::create_sky_bind_group(
            &self.device,
            &self.layouts,
            &self.sky_cubemap,
            &self.sky_sampler,
        );
    }

    fn rebuild_terrain_bind_group(&mut self) {
        self.terrain_bind_group = Self::create_terrain_bind_group(
            &self.device,
            &self.layouts,
            &self.terrain_heightmap,
            &self.terrain_albedo,
            &self.terrain_sampler,
        );
    }

    fn rebuild_water_bind_group(&mut self) {
        self.water_bind_group = Self::create_water_bind_group(
            &self.device,
            &self.layouts,
            &self.reflection,
            &self.refraction,
            &self.water_distortion,
            &self.water_normal,
            &self.screen_sampler,
            &self.detail_sampler,
        );
    }

    fn create_terrain_bind_group(
        device: &wgpu::Device,
        layouts: &BindGroupLayouts,
        heightmap: &GpuTexture,
        albedo: &GpuTexture,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Terrain Bind Group"),
            layout: &layouts.terrain,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&heightmap.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&albedo.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    fn create_sky_bind_group(
        device: &wgpu::Device,
        layouts: &BindGroupLayouts,
        cubemap: &GpuTexture,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Sky Bind Group"),
            layout: &layouts.sky,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&cubemap.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn create_water_bind_group(
        device: &wgpu::Device,
        layouts: &BindGroupLayouts,
        reflection: &OffscreenTarget,
        refraction: &OffscreenTarget,
        distortion: &GpuTexture,
        normal: &GpuTexture,
        screen_sampler: &wgpu::Sampler,
        detail_sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Water Bind Group"),
            layout: &layouts.water,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&reflection.color_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&refraction.color_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&distortion.view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(&normal.view),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: wgpu::BindingResource::Sampler(screen_sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 5,
                    resource: wgpu::BindingResource::Sampler(detail_sampler),
                },
            ],
        })
    }
}
