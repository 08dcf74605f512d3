//! Screen-space triangle math.
//!
//! This is the rasterization kernel written in Rust. `render/shaders/raster.wgsl`
//! implements the same steps in the same order; keep the two in sync.
//!
//! Conventions:
//! - screen origin top-left, +Y down, pixel `(x, y)` sampled at its center
//! - NDC z in `[0, 1]`, smaller is nearer
//! - coverage is inclusive on edges, both windings are covered

use glam::{Mat4, Vec2, Vec3};

/// Triangles per compute workgroup.
pub const WORKGROUP_SIZE: u32 = 256;

/// Depth buffer clear value ("no surface yet").
pub const DEPTH_CLEAR: u32 = u32::MAX;

/// Number of workgroups needed to cover `triangles` invocations.
#[inline]
pub const fn workgroup_count(triangles: u32) -> u32 {
    triangles.div_ceil(WORKGROUP_SIZE)
}

/// Depth buffer key for NDC depth `z`.
///
/// Non-negative IEEE-754 floats order the same as their bit patterns, so the
/// key compares like `z`. The low bit is set on every candidate key; the
/// single invocation allowed to write color clears it (see [`claimed_key`]).
#[inline]
pub fn depth_key(z: f32) -> u32 {
    if z <= 0.0 { 1 } else { z.to_bits() | 1 }
}

/// Depth value left behind once a candidate key has been claimed.
#[inline]
pub const fn claimed_key(key: u32) -> u32 {
    key & !1
}

/// Signed doubled area of `(a, b, p)`; positive when `p` is left of `a -> b`
/// in a +Y-up frame.
#[inline]
pub fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Projects an object-space point to screen pixels.
///
/// Returns the screen position and NDC depth, or `None` when the point is on
/// or behind the eye plane (`w <= 0`).
pub fn project(mvp: &Mat4, p: Vec3, viewport: Vec2) -> Option<(Vec2, f32)> {
    let clip = *mvp * p.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }

    let ndc = clip.truncate() / clip.w;
    let sx = (ndc.x * 0.5 + 0.5) * viewport.x;
    let sy = (1.0 - (ndc.y * 0.5 + 0.5)) * viewport.y;
    Some((Vec2::new(sx, sy), ndc.z))
}

/// Inclusive pixel rectangle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PixelBounds {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

/// A triangle after projection, ready for coverage tests.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenTriangle {
    pub points: [Vec2; 3],
    pub depths: [f32; 3],
    area: f32,
}

impl ScreenTriangle {
    /// Projects three object-space vertices.
    ///
    /// `None` when a vertex is behind the eye or the projected area is zero.
    pub fn project(mvp: &Mat4, vertices: [Vec3; 3], viewport: Vec2) -> Option<Self> {
        let (p0, z0) = project(mvp, vertices[0], viewport)?;
        let (p1, z1) = project(mvp, vertices[1], viewport)?;
        let (p2, z2) = project(mvp, vertices[2], viewport)?;
        Self::from_screen([p0, p1, p2], [z0, z1, z2])
    }

    /// Builds a triangle directly from screen positions and depths.
    pub fn from_screen(points: [Vec2; 3], depths: [f32; 3]) -> Option<Self> {
        let area = edge(points[0], points[1], points[2]);
        if area == 0.0 || !area.is_finite() {
            return None;
        }
        Some(Self { points, depths, area })
    }

    /// Screen-space bounding box clamped to `[0, width) x [0, height)`.
    ///
    /// `None` when the box lies entirely off-screen.
    pub fn bounds(&self, width: u32, height: u32) -> Option<PixelBounds> {
        let [a, b, c] = self.points;
        let min = a.min(b).min(c);
        let max = a.max(b).max(c);

        let (w, h) = (width as f32, height as f32);
        if max.x < 0.0 || max.y < 0.0 || min.x >= w || min.y >= h {
            return None;
        }

        Some(PixelBounds {
            x0: min.x.max(0.0).floor() as u32,
            y0: min.y.max(0.0).floor() as u32,
            x1: max.x.ceil().min(w - 1.0) as u32,
            y1: max.y.ceil().min(h - 1.0) as u32,
        })
    }

    /// Barycentric weights of `p`, or `None` when `p` is outside.
    #[inline]
    pub fn weights(&self, p: Vec2) -> Option<Vec3> {
        let [a, b, c] = self.points;
        let w0 = edge(b, c, p) / self.area;
        let w1 = edge(c, a, p) / self.area;
        let w2 = edge(a, b, p) / self.area;

        if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
            Some(Vec3::new(w0, w1, w2))
        } else {
            None
        }
    }

    /// NDC depth at the given weights.
    #[inline]
    pub fn depth(&self, w: Vec3) -> f32 {
        w.x * self.depths[0] + w.y * self.depths[1] + w.z * self.depths[2]
    }

    /// Visits every covered pixel inside the depth range.
    ///
    /// The callback receives the pixel, its barycentric weights and NDC depth.
    pub fn for_each_fragment<F>(&self, width: u32, height: u32, mut f: F)
    where
        F: FnMut(u32, u32, Vec3, f32),
    {
        let Some(bounds) = self.bounds(width, height) else { return };

        for y in bounds.y0..=bounds.y1 {
            for x in bounds.x0..=bounds.x1 {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let Some(w) = self.weights(center) else { continue };

                let z = self.depth(w);
                if !(0.0..=1.0).contains(&z) {
                    continue;
                }
                f(x, y, w, z);
            }
        }
    }
}

/// Placeholder shading: RGB channels in `0..=255`.
///
/// Red and green carry the interpolated UV, blue a clamped Lambert term
/// against a fixed light. A zero normal gets only the ambient term.
pub fn shade(uv: Vec2, normal: Vec3) -> [u32; 3] {
    let light = Vec3::new(0.4, 0.7, 0.6).normalize();
    let lambert = normal.try_normalize().map_or(0.0, |n| n.dot(light).max(0.0));

    [
        (uv.x.clamp(0.0, 1.0) * 255.0).round() as u32,
        (uv.y.clamp(0.0, 1.0) * 255.0).round() as u32,
        ((lambert * 0.75 + 0.25) * 255.0).round() as u32,
    ]
}
