use crate::geometry::DEPTH_CLEAR;

use super::buffers::GpuBufferSet;
use super::common::CHANNELS;

/// Per-frame clear of the color and depth buffers.
///
/// Staging arrays are allocated once and refilled every frame, then uploaded
/// in full. The uploads are queue writes, so they land before any command
/// buffer submitted afterwards on the same queue (the raster dispatch).
pub struct ResetStage {
    color_staging: Vec<u32>,
    depth_staging: Vec<u32>,
}

impl ResetStage {
    pub fn new(width: u32, height: u32) -> Self {
        let pixels = width as usize * height as usize;
        Self {
            color_staging: vec![0; pixels * CHANNELS as usize],
            depth_staging: vec![DEPTH_CLEAR; pixels],
        }
    }

    /// Refills the staging arrays with their clear values.
    pub fn refill(&mut self) {
        self.color_staging.fill(0);
        self.depth_staging.fill(DEPTH_CLEAR);
    }

    /// Refills and uploads both staging arrays.
    pub fn upload(&mut self, queue: &wgpu::Queue, buffers: &GpuBufferSet) {
        self.refill();
        queue.write_buffer(&buffers.color, 0, bytemuck::cast_slice(&self.color_staging));
        queue.write_buffer(&buffers.depth, 0, bytemuck::cast_slice(&self.depth_staging));
    }

    pub fn color_staging(&self) -> &[u32] {
        &self.color_staging
    }

    pub fn depth_staging(&self) -> &[u32] {
        &self.depth_staging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_sizes_match_buffers() {
        let r = ResetStage::new(8, 4);
        assert_eq!(r.color_staging().len(), 8 * 4 * 3);
        assert_eq!(r.depth_staging().len(), 8 * 4);
    }

    #[test]
    fn refill_restores_clear_values_in_place() {
        let mut r = ResetStage::new(4, 4);
        let color_ptr = r.color_staging().as_ptr();
        r.color_staging[5] = 200;
        r.depth_staging[3] = 17;

        r.refill();

        assert!(r.color_staging().iter().all(|&c| c == 0));
        assert!(r.depth_staging().iter().all(|&d| d == DEPTH_CLEAR));
        assert_eq!(r.color_staging().as_ptr(), color_ptr);
    }
}
