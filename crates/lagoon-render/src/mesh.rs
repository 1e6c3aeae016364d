//! GPU-resident meshes uploaded from the core grid builder.

use lagoon_core::GridMesh;
use std::sync::Arc;
use wgpu::util::DeviceExt;

/// Vertex format for grid surfaces (terrain and water): a bare 2D position
/// in [0,1]². Height displacement happens in the vertex shaders.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GridVertex {
    pub position: [f32; 2],
}

/// Vertex format for the skybox cube.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SkyVertex {
    pub position: [f32; 3],
}

/// GPU-resident mesh (owns wgpu vertex + index buffers)
#[derive(Clone)]
pub struct GpuMesh {
    pub vertex_buffer: Arc<wgpu::Buffer>,
    pub index_buffer: Arc<wgpu::Buffer>,
    pub index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, label: &str, vertices: &[u8], indices: &[u32]) -> Self {
        let vertex_buffer = Arc::new(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: vertices,
            usage: wgpu::BufferUsages::VERTEX,
        }));
        let index_buffer = Arc::new(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
        Self { vertex_buffer, index_buffer, index_count: indices.len() as u32 }
    }

    /// Upload a built grid as-is.
    pub fn from_grid(device: &wgpu::Device, label: &str, grid: &GridMesh) -> Self {
        let vertices: Vec<GridVertex> = grid
            .vertices()
            .iter()
            .map(|&position| GridVertex { position })
            .collect();
        Self::upload(device, label, bytemuck::cast_slice(&vertices), grid.indices())
    }

    /// Unit cube around the origin, sampled by direction in the sky shader.
    /// Faces wind toward the inside since the camera sits within it.
    pub fn sky_cube(device: &wgpu::Device) -> Self {
        let corners: [[f32; 3]; 8] = [
            [-1.0, -1.0, -1.0],
            [1.0, -1.0, -1.0],
            [1.0, 1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, -1.0, 1.0],
            [1.0, -1.0, 1.0],
            [1.0, 1.0, 1.0],
            [-1.0, 1.0, 1.0],
        ];
        let vertices: Vec<SkyVertex> = corners
            .iter()
            .map(|&position| SkyVertex { position })
            .collect();
        let indices: [u32; 36] = [
            0, 2, 1, 0, 3, 2, // -z
            4, 5, 6, 4, 6, 7, // +z
            0, 1, 5, 0, 5, 4, // -y
            3, 6, 2, 3, 7, 6, // +y
            0, 4, 7, 0, 7, 3, // -x
            1, 2, 6, 1, 6, 5, // +x
        ];
        Self::upload(device, "Sky Cube", bytemuck::cast_slice(&vertices), &indices)
    }
}

/// The three static meshes a frame draws.
pub struct SceneMeshes {
    pub terrain: GpuMesh,
    pub water: GpuMesh,
    pub sky: GpuMesh,
}
