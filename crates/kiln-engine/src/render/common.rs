//! Shared GPU types, constants and the binding ABI.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

// ── frame constants ───────────────────────────────────────────────────────

/// Color/depth buffer width in pixels.
pub const WIDTH: u32 = 800;

/// Color/depth buffer height in pixels.
pub const HEIGHT: u32 = 800;

/// Color channels per pixel (RGB, one `u32` each).
pub const CHANNELS: u32 = 3;

/// Vertices drawn by the present pass (two triangles).
pub const PRESENT_VERTEX_COUNT: u32 = 6;

// ── binding ABI ───────────────────────────────────────────────────────────

/// Compute bind group (group 0) binding indices.
///
/// Must match the `@binding` attributes in `shaders/raster.wgsl`.
pub mod raster_binding {
    pub const COLOR: u32 = 0;
    pub const POSITIONS: u32 = 1;
    pub const UNIFORM: u32 = 2;
    pub const INDICES: u32 = 3;
    pub const UVS: u32 = 4;
    pub const NORMALS: u32 = 5;
    pub const DEPTH: u32 = 6;
}

/// Present bind group (group 0) binding indices.
///
/// Must match the `@binding` attributes in `shaders/present.wgsl`.
pub mod present_binding {
    pub const UNIFORM: u32 = 0;
    pub const COLOR: u32 = 1;
}

// ── uniforms ──────────────────────────────────────────────────────────────

/// Raster kernel uniform block.
///
/// WGSL: `struct RasterUniform { mvp: mat4x4<f32>, viewport: vec2<f32>, _pad: vec2<f32> }`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct RasterUniform {
    /// Column-major MVP.
    pub mvp: [f32; 16],
    /// Viewport width/height in pixels.
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // struct size rounds to 16 bytes
}

impl RasterUniform {
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;
    pub const BINDING_SIZE: Option<wgpu::BufferSize> = wgpu::BufferSize::new(Self::SIZE);

    pub fn new(mvp: &Mat4, viewport: Vec2) -> Self {
        Self {
            mvp: mvp.to_cols_array(),
            viewport: viewport.to_array(),
            _pad: [0.0; 2],
        }
    }
}

/// Present pass uniform block: color buffer width/height.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PresentUniform {
    pub size: [f32; 2],
}

impl PresentUniform {
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;
    pub const BINDING_SIZE: Option<wgpu::BufferSize> = wgpu::BufferSize::new(Self::SIZE);
}

// ── buffer sizes ──────────────────────────────────────────────────────────

/// Color buffer size in bytes: `width * height * CHANNELS * 4`.
#[inline]
pub const fn color_buffer_size(width: u32, height: u32) -> u64 {
    width as u64 * height as u64 * CHANNELS as u64 * 4
}

/// Depth buffer size in bytes: `width * height * 4`.
#[inline]
pub const fn depth_buffer_size(width: u32, height: u32) -> u64 {
    width as u64 * height as u64 * 4
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use wgpu::naga::{AddressSpace, StorageAccess};

    use super::*;

    #[test]
    fn raster_uniform_is_eighty_bytes() {
        // 16 floats MVP + 2 floats viewport + 8 bytes padding.
        assert_eq!(RasterUniform::SIZE, 80);
        assert_eq!(std::mem::offset_of!(RasterUniform, viewport), 64);
    }

    #[test]
    fn present_uniform_is_eight_bytes() {
        assert_eq!(PresentUniform::SIZE, 8);
    }

    #[test]
    fn uniform_bytes_start_with_mvp() {
        let m = Mat4::from_cols_array(&std::array::from_fn(|i| i as f32));
        let u = RasterUniform::new(&m, Vec2::new(800.0, 800.0));
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&u));
        assert_eq!(&floats[..16], &m.to_cols_array());
        assert_eq!(&floats[16..], &[800.0, 800.0, 0.0, 0.0]);
    }

    #[test]
    fn buffer_sizes_for_default_frame() {
        assert_eq!(color_buffer_size(WIDTH, HEIGHT), 7_680_000);
        assert_eq!(depth_buffer_size(WIDTH, HEIGHT), 2_560_000);
    }

    #[test]
    fn uniform_binding_sizes_match_blocks() {
        assert_eq!(RasterUniform::BINDING_SIZE.map(|s| s.get()), Some(80));
        assert_eq!(PresentUniform::BINDING_SIZE.map(|s| s.get()), Some(8));
    }

    // ── shader ABI ────────────────────────────────────────────────────────

    /// `name -> (group, binding, space)` for every bound global of `source`.
    fn bound_globals(source: &str) -> HashMap<String, (u32, u32, AddressSpace)> {
        let module = wgpu::naga::front::wgsl::parse_str(source)
            .unwrap_or_else(|e| panic!("{}", e.emit_to_string(source)));
        module
            .global_variables
            .iter()
            .filter_map(|(_, var)| {
                let binding = var.binding.as_ref()?;
                let name = var.name.clone()?;
                Some((name, (binding.group, binding.binding, var.space)))
            })
            .collect()
    }

    fn read_only() -> AddressSpace {
        AddressSpace::Storage { access: StorageAccess::LOAD }
    }

    fn read_write() -> AddressSpace {
        AddressSpace::Storage { access: StorageAccess::LOAD | StorageAccess::STORE }
    }

    #[test]
    fn raster_shader_matches_binding_abi() {
        let globals = bound_globals(include_str!("shaders/raster.wgsl"));
        let expected = [
            ("color_buffer", raster_binding::COLOR, read_write()),
            ("positions", raster_binding::POSITIONS, read_only()),
            ("u", raster_binding::UNIFORM, AddressSpace::Uniform),
            ("indices", raster_binding::INDICES, read_only()),
            ("uvs", raster_binding::UVS, read_only()),
            ("normals", raster_binding::NORMALS, read_only()),
            ("depth_buffer", raster_binding::DEPTH, read_write()),
        ];

        assert_eq!(globals.len(), expected.len(), "{globals:?}");
        for (name, binding, space) in expected {
            assert_eq!(globals.get(name), Some(&(0, binding, space)), "{name}");
        }
    }

    #[test]
    fn present_shader_matches_binding_abi() {
        let globals = bound_globals(include_str!("shaders/present.wgsl"));
        let expected = [
            ("u", present_binding::UNIFORM, AddressSpace::Uniform),
            ("color_buffer", present_binding::COLOR, read_only()),
        ];

        assert_eq!(globals.len(), expected.len(), "{globals:?}");
        for (name, binding, space) in expected {
            assert_eq!(globals.get(name), Some(&(0, binding, space)), "{name}");
        }
    }
}
