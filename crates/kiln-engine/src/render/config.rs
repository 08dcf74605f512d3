use crate::transform::{Camera, Projection};

use super::common::{HEIGHT, WIDTH};

/// Renderer configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterConfig {
    /// Color/depth buffer width in pixels.
    pub width: u32,
    /// Color/depth buffer height in pixels.
    pub height: u32,
    pub camera: Camera,
    pub projection: Projection,
    /// Model rotation about +Y per frame, in radians.
    pub rotation_step: f32,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            camera: Camera::default(),
            projection: Projection::for_viewport(WIDTH, HEIGHT),
            rotation_step: 0.01,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_square_frame() {
        let c = RasterConfig::default();
        assert_eq!((c.width, c.height), (800, 800));
        assert_eq!(c.projection.aspect, 1.0);
        assert_eq!(c.rotation_step, 0.01);
    }
}
