//! GPU rendering subsystem.
//!
//! A compute kernel rasterizes the mesh into a storage color buffer; a
//! full-screen pass then blits that buffer to the surface. Every stage owns
//! its own GPU resources; [`Renderer`] ties them together per frame.
//!
//! Convention:
//! - screen pixels have a top-left origin, +Y down
//! - color is stored as three `u32` channels per pixel, values `0..=255`

mod buffers;
mod common;
mod config;
mod ctx;
mod kernel;
mod present;
mod renderer;
mod reset;

pub use buffers::GpuBufferSet;
pub use common::{
    color_buffer_size, depth_buffer_size, present_binding, raster_binding, PresentUniform,
    RasterUniform, CHANNELS, HEIGHT, PRESENT_VERTEX_COUNT, WIDTH,
};
pub use config::RasterConfig;
pub use ctx::{RenderCtx, RenderTarget};
pub use kernel::RasterKernel;
pub use present::{PresentStage, FALLBACK_COLOR};
pub use renderer::Renderer;
pub use reset::ResetStage;
