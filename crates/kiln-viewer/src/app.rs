use kiln_engine::core::{App, AppControl, FrameCtx};
use kiln_engine::geometry::DEPTH_CLEAR;
use kiln_engine::mesh::MeshAsset;
use kiln_engine::render::{RasterConfig, Renderer, CHANNELS};

/// Viewer application: one [`Renderer`] created on the first frame, then
/// rasterize + present every frame.
pub struct RasterApp {
    mesh: MeshAsset,
    config: RasterConfig,
    renderer: Option<Renderer>,
    readback_pending: bool,
}

impl RasterApp {
    pub fn new(mesh: MeshAsset, config: RasterConfig, readback: bool) -> Self {
        Self {
            mesh,
            config,
            renderer: None,
            readback_pending: readback,
        }
    }

    fn log_readback(&mut self, ctx: &FrameCtx<'_, '_>) {
        self.readback_pending = false;
        let Some(renderer) = &self.renderer else { return };
        let rctx = ctx.render_ctx();

        let buffers = renderer
            .read_color(&rctx)
            .and_then(|color| Ok((color, renderer.read_depth(&rctx)?)));
        match buffers {
            Ok((color, depth)) => {
                let stats = CoverageStats::from_buffers(&color, &depth);
                log::info!(
                    "frame {} readback: {} of {} pixels covered, {} lit, {} unclaimed",
                    renderer.frame(),
                    stats.covered,
                    stats.pixels,
                    stats.lit,
                    stats.unclaimed
                );
            }
            Err(e) => log::warn!("readback failed: {e:#}"),
        }
    }
}

impl App for RasterApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.renderer.is_none() {
            match Renderer::new(&ctx.render_ctx(), &self.mesh, self.config) {
                Ok(r) => self.renderer = Some(r),
                Err(e) => {
                    log::error!("failed to create renderer: {e:#}");
                    return AppControl::Exit;
                }
            }
        }
        let Some(renderer) = self.renderer.as_mut() else {
            return AppControl::Exit;
        };

        renderer.advance_frame(&ctx.render_ctx());
        if let Some(rate) = ctx.time.rate {
            log::info!(
                "{rate:.1} fps, {:.2} ms last frame, {} frames rasterized",
                ctx.time.dt * 1000.0,
                renderer.frame()
            );
        }

        if self.readback_pending {
            self.log_readback(ctx);
        }

        let Some(renderer) = self.renderer.as_ref() else {
            return AppControl::Exit;
        };
        ctx.present(|_, target| renderer.encode_present(target))
    }
}

/// Pixel statistics of one color/depth buffer pair.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct CoverageStats {
    pixels: usize,
    /// Depth below the clear value.
    covered: usize,
    /// Any non-zero color channel.
    lit: usize,
    /// Covered but never claimed by a color write (low key bit still set).
    unclaimed: usize,
}

impl CoverageStats {
    fn from_buffers(color: &[u32], depth: &[u32]) -> Self {
        let covered = depth.iter().filter(|&&d| d != DEPTH_CLEAR).count();
        let unclaimed = depth
            .iter()
            .filter(|&&d| d != DEPTH_CLEAR && d & 1 == 1)
            .count();
        let lit = color
            .chunks_exact(CHANNELS as usize)
            .filter(|rgb| rgb.iter().any(|&c| c != 0))
            .count();

        Self {
            pixels: depth.len(),
            covered,
            lit,
            unclaimed,
        }
    }
}
