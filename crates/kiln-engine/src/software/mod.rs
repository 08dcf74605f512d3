//! CPU rasterizer running the kernel algorithm over atomic buffers.
//!
//! Each triangle is one work item, exactly like a kernel invocation, and the
//! two phases run as two parallel passes over all triangles:
//! - depth: `fetch_min` of the candidate key on every covered pixel
//! - color: `compare_exchange(key, claimed_key(key))`; the single winner
//!   writes all three channels
//!
//! Buffers use the same layout as the GPU buffers, so snapshots compare
//! directly against a readback.

use std::sync::atomic::{AtomicU32, Ordering};

use glam::{Mat4, Vec2};
use rayon::prelude::*;

use crate::geometry::{claimed_key, depth_key, shade, ScreenTriangle, DEPTH_CLEAR};
use crate::mesh::MeshAsset;
use crate::render::CHANNELS;


pub struct SoftwareRasterizer {
    width: u32,
    height: u32,
    color: Vec<AtomicU32>,
    depth: Vec<AtomicU32>,
}

impl SoftwareRasterizer {
    /// Allocates cleared buffers for a `width x height` target.
    pub fn new(width: u32, height: u32) -> Self {
        let pixels = width as usize * height as usize;
        Self {
            width,
            height,
            color: (0..pixels * CHANNELS as usize).map(|_| AtomicU32::new(0)).collect(),
            depth: (0..pixels).map(|_| AtomicU32::new(DEPTH_CLEAR)).collect(),
        }
    }

    /// Color to zero, depth to [`DEPTH_CLEAR`].
    pub fn reset(&mut self) {
        for c in &mut self.color {
            *c.get_mut() = 0;
        }
        for d in &mut self.depth {
            *d.get_mut() = DEPTH_CLEAR;
        }
    }

    /// Rasterizes every triangle of `mesh`, triangles in parallel.
    pub fn rasterize(&self, mesh: &MeshAsset, mvp: &Mat4) {
        let n = mesh.triangle_count();
        (0..n).into_par_iter().for_each(|t| {
            self.depth_phase(mesh, mvp, t);
        });
        (0..n).into_par_iter().for_each(|t| {
            self.color_phase(mesh, mvp, t);
        });
    }

    /// Rasterizes the listed triangles sequentially, in `order`, per phase.
    pub fn rasterize_ordered(&self, mesh: &MeshAsset, mvp: &Mat4, order: &[u32]) {
        for &t in order {
            self.depth_phase(mesh, mvp, t);
        }
        for &t in order {
            self.color_phase(mesh, mvp, t);
        }
    }

    /// Depth pass for triangle `t`. Returns the number of fragments tested.
    pub fn depth_phase(&self, mesh: &MeshAsset, mvp: &Mat4, t: u32) -> u32 {
        let Some(tri) = self.setup(mesh, mvp, t) else { return 0 };

        let mut fragments = 0;
        tri.for_each_fragment(self.width, self.height, |x, y, _, z| {
            self.depth[self.pixel(x, y)].fetch_min(depth_key(z), Ordering::AcqRel);
            fragments += 1;
        });
        fragments
    }

    /// Color pass for triangle `t`. Returns the number of pixels it claimed.
    pub fn color_phase(&self, mesh: &MeshAsset, mvp: &Mat4, t: u32) -> u32 {
        let Some(tri) = self.setup(mesh, mvp, t) else { return 0 };
        let [i0, i1, i2] = mesh.triangle(t);

        let mut claimed = 0;
        tri.for_each_fragment(self.width, self.height, |x, y, w, z| {
            let pixel = self.pixel(x, y);
            let key = depth_key(z);
            if self.depth[pixel]
                .compare_exchange(key, claimed_key(key), Ordering::AcqRel, Ordering::Relaxed)
                .is_err()
            {
                return;
            }

            let uv = mesh.uv(i0) * w.x + mesh.uv(i1) * w.y + mesh.uv(i2) * w.z;
            let normal = mesh.normal(i0) * w.x + mesh.normal(i1) * w.y + mesh.normal(i2) * w.z;
            let base = pixel * CHANNELS as usize;
            for (channel, value) in shade(uv, normal).into_iter().enumerate() {
                self.color[base + channel].store(value, Ordering::Relaxed);
            }
            claimed += 1;
        });
        claimed
    }

    /// RGB at pixel `(x, y)`.
    pub fn color_at(&self, x: u32, y: u32) -> [u32; 3] {
        let base = self.pixel(x, y) * CHANNELS as usize;
        std::array::from_fn(|c| self.color[base + c].load(Ordering::Relaxed))
    }

    pub fn depth_at(&self, x: u32, y: u32) -> u32 {
        self.depth[self.pixel(x, y)].load(Ordering::Relaxed)
    }

    /// Copy of the color buffer in GPU layout.
    pub fn color_snapshot(&self) -> Vec<u32> {
        self.color.iter().map(|c| c.load(Ordering::Relaxed)).collect()
    }

    /// Copy of the depth buffer in GPU layout.
    pub fn depth_snapshot(&self) -> Vec<u32> {
        self.depth.iter().map(|d| d.load(Ordering::Relaxed)).collect()
    }

    fn setup(&self, mesh: &MeshAsset, mvp: &Mat4, t: u32) -> Option<ScreenTriangle> {
        if t >= mesh.triangle_count() {
            return None;
        }
        let [i0, i1, i2] = mesh.triangle(t);
        let viewport = Vec2::new(self.width as f32, self.height as f32);
        ScreenTriangle::project(
            mvp,
            [mesh.position(i0), mesh.position(i1), mesh.position(i2)],
            viewport,
        )
    }

    #[inline]
    fn pixel(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
