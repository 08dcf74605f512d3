use anyhow::{Context, Result};
use wgpu::util::DeviceExt;

use crate::mesh::MeshAsset;

use super::common::{color_buffer_size, depth_buffer_size, PresentUniform, RasterUniform};

/// Every GPU buffer used by the raster kernel and the present pass.
///
/// All buffers are created once. Mesh attributes and the present uniform are
/// uploaded at creation; the raster uniform, color and depth buffers are
/// rewritten every frame by explicit queue writes or by the kernel.
pub struct GpuBufferSet {
    pub positions: wgpu::Buffer,
    pub normals: wgpu::Buffer,
    pub uvs: wgpu::Buffer,
    pub indices: wgpu::Buffer,

    pub raster_uniform: wgpu::Buffer,
    pub present_uniform: wgpu::Buffer,

    /// `width * height * CHANNELS` `u32`.
    pub color: wgpu::Buffer,
    /// `width * height` `u32`, atomic in the kernel.
    pub depth: wgpu::Buffer,

    triangle_count: u32,
}

impl GpuBufferSet {
    pub fn new(device: &wgpu::Device, mesh: &MeshAsset, width: u32, height: u32) -> Self {
        let mesh_buffer = |label: &str, contents: &[u8]| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage: wgpu::BufferUsages::STORAGE,
            })
        };

        let positions = mesh_buffer("kiln positions", bytemuck::cast_slice(mesh.positions()));
        let normals = mesh_buffer("kiln normals", bytemuck::cast_slice(mesh.normals()));
        let uvs = mesh_buffer("kiln uvs", bytemuck::cast_slice(mesh.uvs()));
        let indices = mesh_buffer("kiln indices", bytemuck::cast_slice(mesh.indices()));

        let raster_uniform = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("kiln raster ubo"),
            size: RasterUniform::SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let present = PresentUniform {
            size: [width as f32, height as f32],
        };
        let present_uniform = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("kiln present ubo"),
            contents: bytemuck::bytes_of(&present),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        // COPY_SRC only serves the diagnostic readback.
        let frame_usage = wgpu::BufferUsages::STORAGE
            | wgpu::BufferUsages::COPY_DST
            | wgpu::BufferUsages::COPY_SRC;

        let color = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("kiln color buffer"),
            size: color_buffer_size(width, height),
            usage: frame_usage,
            mapped_at_creation: false,
        });

        let depth = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("kiln depth buffer"),
            size: depth_buffer_size(width, height),
            usage: frame_usage,
            mapped_at_creation: false,
        });

        log::debug!(
            "buffer set: {} vertices, {} triangles, color {} B, depth {} B",
            mesh.vertex_count(),
            mesh.triangle_count(),
            color.size(),
            depth.size(),
        );

        Self {
            positions,
            normals,
            uvs,
            indices,
            raster_uniform,
            present_uniform,
            color,
            depth,
            triangle_count: mesh.triangle_count(),
        }
    }

    pub fn triangle_count(&self) -> u32 {
        self.triangle_count
    }

    pub fn write_raster_uniform(&self, queue: &wgpu::Queue, uniform: &RasterUniform) {
        queue.write_buffer(&self.raster_uniform, 0, bytemuck::bytes_of(uniform));
    }

    /// Blocking copy of the color buffer to the CPU.
    ///
    /// Diagnostic only; never called from the frame loop.
    pub fn read_color(&self, device: &wgpu::Device, queue: &wgpu::Queue) -> Result<Vec<u32>> {
        read_u32s(device, queue, &self.color).context("color buffer readback failed")
    }

    /// Blocking copy of the depth buffer to the CPU.
    pub fn read_depth(&self, device: &wgpu::Device, queue: &wgpu::Queue) -> Result<Vec<u32>> {
        read_u32s(device, queue, &self.depth).context("depth buffer readback failed")
    }
}

fn read_u32s(device: &wgpu::Device, queue: &wgpu::Queue, source: &wgpu::Buffer) -> Result<Vec<u32>> {
    let size = source.size();
    let staging = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("kiln readback staging"),
        size,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("kiln readback encoder"),
    });
    encoder.copy_buffer_to_buffer(source, 0, &staging, 0, size);
    queue.submit(std::iter::once(encoder.finish()));

    let slice = staging.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });

    device
        .poll(wgpu::PollType::wait_indefinitely())
        .context("device poll failed")?;

    rx.recv()
        .context("map callback was dropped")?
        .context("failed to map staging buffer")?;

    let data = {
        let mapped = slice.get_mapped_range();
        bytemuck::cast_slice::<u8, u32>(&mapped).to_vec()
    };
    staging.unmap();

    Ok(data)
}
