use crate::geometry::workgroup_count;

use super::buffers::GpuBufferSet;
use super::common::{raster_binding, RasterUniform};

/// Compute rasterization kernel.
///
/// One invocation per triangle, dispatched twice per frame inside a single
/// compute pass:
/// - `depth_main` resolves the nearest depth key per pixel with `atomicMin`
/// - `color_main` lets exactly one invocation holding that key claim the
///   pixel and write its color
///
/// wgpu orders dispatches within a pass, so every depth write is visible to
/// the color dispatch.
pub struct RasterKernel {
    depth_pipeline: wgpu::ComputePipeline,
    color_pipeline: wgpu::ComputePipeline,
    bind_group: wgpu::BindGroup,
}

impl RasterKernel {
    pub fn new(device: &wgpu::Device, buffers: &GpuBufferSet) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("kiln raster shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/raster.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("kiln raster bgl"),
            entries: &[
                storage_entry(raster_binding::COLOR, false),
                storage_entry(raster_binding::POSITIONS, true),
                wgpu::BindGroupLayoutEntry {
                    binding: raster_binding::UNIFORM,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: RasterUniform::BINDING_SIZE,
                    },
                    count: None,
                },
                storage_entry(raster_binding::INDICES, true),
                storage_entry(raster_binding::UVS, true),
                storage_entry(raster_binding::NORMALS, true),
                storage_entry(raster_binding::DEPTH, false),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("kiln raster pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = |label: &str, entry_point: &str| {
            device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                module: &shader,
                entry_point: Some(entry_point),
                compilation_options: Default::default(),
                cache: None,
            })
        };

        let depth_pipeline = pipeline("kiln raster depth pipeline", "depth_main");
        let color_pipeline = pipeline("kiln raster color pipeline", "color_main");

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("kiln raster bind group"),
            layout: &bind_group_layout,
            entries: &[
                entry(raster_binding::COLOR, &buffers.color),
                entry(raster_binding::POSITIONS, &buffers.positions),
                entry(raster_binding::UNIFORM, &buffers.raster_uniform),
                entry(raster_binding::INDICES, &buffers.indices),
                entry(raster_binding::UVS, &buffers.uvs),
                entry(raster_binding::NORMALS, &buffers.normals),
                entry(raster_binding::DEPTH, &buffers.depth),
            ],
        });

        Self {
            depth_pipeline,
            color_pipeline,
            bind_group,
        }
    }

    /// Records the depth and color dispatches for `triangle_count` triangles.
    pub fn encode(&self, encoder: &mut wgpu::CommandEncoder, triangle_count: u32) {
        let groups = workgroup_count(triangle_count);
        if groups == 0 {
            return;
        }

        let mut cpass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("kiln raster pass"),
            timestamp_writes: None,
        });

        cpass.set_bind_group(0, &self.bind_group, &[]);

        cpass.set_pipeline(&self.depth_pipeline);
        cpass.dispatch_workgroups(groups, 1, 1);

        cpass.set_pipeline(&self.color_pipeline);
        cpass.dispatch_workgroups(groups, 1, 1);
    }
}

fn storage_entry(binding: u32, read_only: bool) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only },
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn entry(binding: u32, buffer: &wgpu::Buffer) -> wgpu::BindGroupEntry<'_> {
    wgpu::BindGroupEntry {
        binding,
        resource: buffer.as_entire_binding(),
    }
}
