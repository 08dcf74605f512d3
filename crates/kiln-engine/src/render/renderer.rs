use anyhow::{ensure, Result};
use glam::Vec2;

use crate::mesh::MeshAsset;
use crate::transform::TransformStage;

use super::buffers::GpuBufferSet;
use super::config::RasterConfig;
use super::ctx::{RenderCtx, RenderTarget};
use super::kernel::RasterKernel;
use super::present::PresentStage;
use super::reset::ResetStage;

/// All rendering state for one mesh: buffers, pipelines, the MVP
/// accumulator and the frame counter.
///
/// Per frame the host issues, in queue order:
/// 1. reset uploads (color to zero, depth to the clear key)
/// 2. the raster uniform upload
/// 3. one compute submission (depth dispatch, then color dispatch)
/// 4. the present pass, recorded by the caller into the surface encoder
pub struct Renderer {
    buffers: GpuBufferSet,
    reset: ResetStage,
    transform: TransformStage,
    kernel: RasterKernel,
    present: PresentStage,
    viewport: Vec2,
    frame: u64,
}

impl Renderer {
    pub fn new(ctx: &RenderCtx<'_>, mesh: &MeshAsset, config: RasterConfig) -> Result<Self> {
        ensure!(
            config.width > 0 && config.height > 0,
            "raster target must be non-empty (got {}x{})",
            config.width,
            config.height
        );

        let buffers = GpuBufferSet::new(ctx.device, mesh, config.width, config.height);
        let kernel = RasterKernel::new(ctx.device, &buffers);
        let present = PresentStage::new(ctx.device, ctx.surface_format, &buffers);

        log::info!(
            "renderer ready: {} triangles, {}x{} target, surface {:?}",
            buffers.triangle_count(),
            config.width,
            config.height,
            ctx.surface_format
        );

        Ok(Self {
            reset: ResetStage::new(config.width, config.height),
            transform: TransformStage::new(config.camera, config.projection, config.rotation_step),
            viewport: Vec2::new(config.width as f32, config.height as f32),
            buffers,
            kernel,
            present,
            frame: 0,
        })
    }

    /// Resets the frame buffers, advances the MVP and runs the raster kernel.
    pub fn advance_frame(&mut self, ctx: &RenderCtx<'_>) {
        self.reset.upload(ctx.queue, &self.buffers);

        self.transform.advance();
        self.buffers
            .write_raster_uniform(ctx.queue, &self.transform.uniform(self.viewport));

        let mut encoder = ctx.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("kiln raster encoder"),
        });
        self.kernel.encode(&mut encoder, self.buffers.triangle_count());
        ctx.queue.submit(std::iter::once(encoder.finish()));

        self.frame += 1;
        log::trace!("frame {} dispatched", self.frame);
    }

    /// Records the present pass into `target`.
    pub fn encode_present(&self, target: &mut RenderTarget<'_>) {
        self.present.encode(target);
    }

    /// Frames rasterized so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Blocking color readback; see [`GpuBufferSet::read_color`].
    pub fn read_color(&self, ctx: &RenderCtx<'_>) -> Result<Vec<u32>> {
        self.buffers.read_color(ctx.device, ctx.queue)
    }

    /// Blocking depth readback; see [`GpuBufferSet::read_depth`].
    pub fn read_depth(&self, ctx: &RenderCtx<'_>) -> Result<Vec<u32>> {
        self.buffers.read_depth(ctx.device, ctx.queue)
    }
}
