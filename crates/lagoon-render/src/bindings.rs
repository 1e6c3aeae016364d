//! Standard bind group layouts and per-pass view uniforms.
//!
//! Every pipeline binds group 0 to a per-pass view/globals uniform and
//! group 1 to its stage's material resources:
//!
//! - Group 0: view matrices, eye, light, water height, time, clip mode
//! - Group 1 (terrain): heightmap + albedo + sampler
//! - Group 1 (sky): cubemap + sampler
//! - Group 1 (water): reflection/refraction targets + detail maps + samplers

use glam::{Mat4, Vec3};
use lagoon_core::{SceneSnapshot, WaterState};
use std::sync::Arc;

/// Terrain clip behavior per pass: reflection discards fragments under the
/// waterline, refraction those above it, the composite pass neither.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClipMode {
    None = 0,
    BelowWater = 1,
    AboveWater = 2,
}

/// Group-0 uniform contents, shared by all three shader programs.
/// Must match the `View` struct in the WGSL sources (240 bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ViewUniform {
    pub proj: Mat4,
    pub view: Mat4,
    pub sky_view_proj: Mat4,
    pub eye: Vec3,
    pub time: f32,
    pub light_position: Vec3,
    pub water_height: f32,
    pub clip_mode: u32,
    /// Heightmap texel step used for finite-difference terrain normals.
    pub grid_texel: f32,
    pub _pad: [f32; 2],
}

impl ViewUniform {
    pub fn new(
        snapshot: &SceneSnapshot,
        water: &WaterState,
        clip_mode: ClipMode,
        grid_texel: f32,
        time: f32,
    ) -> Self {
        Self {
            proj: snapshot.projection_matrix(),
            view: snapshot.view_matrix(),
            sky_view_proj: snapshot.sky_view_proj(),
            eye: snapshot.eye,
            time,
            light_position: water.light_position,
            water_height: water.height,
            clip_mode: clip_mode as u32,
            grid_texel,
            _pad: [0.0; 2],
        }
    }
}

/// Standard bind group layouts shared by all pipelines
#[derive(Clone)]
pub struct BindGroupLayouts {
    pub view: Arc<wgpu::BindGroupLayout>,
    pub terrain: Arc<wgpu::BindGroupLayout>,
    pub sky: Arc<wgpu::BindGroupLayout>,
    pub water: Arc<wgpu::BindGroupLayout>,
}

impl BindGroupLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            view: Arc::new(Self::create_view_layout(device)),
            terrain: Arc::new(Self::create_terrain_layout(device)),
            sky: Arc::new(Self::create_sky_layout(device)),
            water: Arc::new(Self::create_water_layout(device)),
        }
    }

    fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
        wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }
    }

    fn texture_entry(
        binding: u32,
        visibility: wgpu::ShaderStages,
        view_dimension: wgpu::TextureViewDimension,
    ) -> wgpu::BindGroupLayoutEntry {
        wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension,
                multisampled: false,
            },
            count: None,
        }
    }

    fn sampler_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
        wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        }
    }

    /// Group 0: per-pass view/globals uniform
    fn create_view_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("View Bind Group Layout"),
            entries: &[Self::uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        })
    }

    /// Group 1 (terrain): heightmap is sampled in the vertex stage for
    /// displacement, so it and the sampler are visible to both stages.
    fn create_terrain_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        let both = wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT;
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Terrain Bind Group Layout"),
            entries: &[
                Self::texture_entry(0, both, wgpu::TextureViewDimension::D2),
                Self::texture_entry(1, wgpu::ShaderStages::FRAGMENT, wgpu::TextureViewDimension::D2),
                Self::sampler_entry(2, both),
            ],
        })
    }

    /// Group 1 (sky): environment cubemap
    fn create_sky_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Sky Bind Group Layout"),
            entries: &[
                Self::texture_entry(
                    0,
                    wgpu::ShaderStages::FRAGMENT,
                    wgpu::TextureViewDimension::Cube,
                ),
                Self::sampler_entry(1, wgpu::ShaderStages::FRAGMENT),
            ],
        })
    }

    /// Group 1 (water): the two offscreen targets plus scrolling detail maps
    fn create_water_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        let fragment = wgpu::ShaderStages::FRAGMENT;
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Water Bind Group Layout"),
            entries: &[
                Self::texture_entry(0, fragment, wgpu::TextureViewDimension::D2), // reflection
                Self::texture_entry(1, fragment, wgpu::TextureViewDimension::D2), // refraction
                Self::texture_entry(2, fragment, wgpu::TextureViewDimension::D2), // distortion
                Self::texture_entry(3, fragment, wgpu::TextureViewDimension::D2), // normal map
                Self::sampler_entry(4, fragment), // screen-space (nearest, repeat)
                Self::sampler_entry(5, fragment), // detail maps (linear, repeat)
            ],
        })
    }
}

/// One uniform buffer and bind group per pass, all sharing the view layout.
pub struct ViewBindGroups {
    pub reflection: PassView,
    pub refraction: PassView,
    pub present: PassView,
}

pub struct PassView {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl PassView {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} View Uniform Buffer")),
            size: std::mem::size_of::<ViewUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} View Bind Group")),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }

    pub fn write(&self, queue: &wgpu::Queue, uniform: &ViewUniform) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(uniform));
    }
}

impl ViewBindGroups {
    pub fn new(device: &wgpu::Device, layouts: &BindGroupLayouts) -> Self {
        Self {
            reflection: PassView::new(device, &layouts.view, "Reflection"),
            refraction: PassView::new(device, &layouts.view, "Refraction"),
            present: PassView::new(device, &layouts.view, "Present"),
        }
    }
}
