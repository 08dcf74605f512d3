//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu adapter, device and queue
//! - creating & configuring the window surface
//! - acquiring frames and mapping surface errors to per-frame actions

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
