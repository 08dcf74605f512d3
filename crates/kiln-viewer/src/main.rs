//! Kiln viewer: rasterizes a mesh with the compute kernel every frame and
//! shows the result in a fixed-size window.
//!
//! Usage: `kiln-viewer [mesh.gltf|mesh.glb]` (built-in cube when omitted).
//! Set `KILN_READBACK=1` to log coverage of the first frame.

mod app;

use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;

use kiln_engine::device::GpuInit;
use kiln_engine::logging::{init_logging, LoggingConfig};
use kiln_engine::mesh::{cube, load_gltf};
use kiln_engine::render::RasterConfig;
use kiln_engine::window::{Runtime, RuntimeConfig};

use app::RasterApp;

const READBACK_VAR: &str = "KILN_READBACK";

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mesh = match std::env::args_os().nth(1) {
        Some(path) => load_gltf(&path)
            .with_context(|| format!("failed to load mesh {}", path.to_string_lossy()))?,
        None => {
            log::info!("no mesh path given; using the built-in cube");
            cube()
        }
    };

    let raster = RasterConfig::default();
    let runtime = RuntimeConfig {
        size: PhysicalSize::new(raster.width, raster.height),
        ..Default::default()
    };
    let readback = std::env::var_os(READBACK_VAR).is_some();

    Runtime::run(runtime, GpuInit::default(), RasterApp::new(mesh, raster, readback))
}
