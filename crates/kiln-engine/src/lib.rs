//! Kiln engine crate.
//!
//! A software rasterizer that runs on the GPU: a compute kernel projects and
//! rasterizes a triangle mesh into storage buffers (atomic depth, RGB color),
//! and a full-screen pass presents the color buffer. The same algorithm runs
//! on the CPU in [`software`] as the testable reference.

pub mod core;
pub mod device;
pub mod geometry;
pub mod logging;
pub mod mesh;
pub mod render;
pub mod software;
pub mod time;
pub mod transform;
pub mod window;
