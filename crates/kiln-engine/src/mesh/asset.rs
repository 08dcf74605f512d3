use glam::{Vec2, Vec3};

use super::MeshError;

/// One indexed vertex: position, normal and texture coordinate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    #[inline]
    pub const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, normal, uv }
    }
}

/// Triangle mesh as tightly packed attribute arrays.
///
/// The layout matches the storage buffers consumed by the raster kernel:
/// - `positions`: 3 floats per vertex
/// - `normals`: 3 floats per vertex
/// - `uvs`: 2 floats per vertex
/// - `indices`: 3 `u32` per triangle
///
/// A `MeshAsset` is validated on construction and immutable afterwards, so
/// every index is known to address an existing vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshAsset {
    positions: Vec<f32>,
    normals: Vec<f32>,
    uvs: Vec<f32>,
    indices: Vec<u32>,
}

impl MeshAsset {
    /// Builds a mesh from flat attribute arrays.
    pub fn new(
        positions: Vec<f32>,
        normals: Vec<f32>,
        uvs: Vec<f32>,
        indices: Vec<u32>,
    ) -> Result<Self, MeshError> {
        check_components("positions", positions.len(), 3)?;
        check_components("normals", normals.len(), 3)?;
        check_components("uvs", uvs.len(), 2)?;

        let vertex_count = positions.len() / 3;
        if vertex_count == 0 {
            return Err(MeshError::NoVertices);
        }
        check_vertex_count("normals", vertex_count, normals.len() / 3)?;
        check_vertex_count("uvs", vertex_count, uvs.len() / 2)?;

        if indices.is_empty() {
            return Err(MeshError::NoTriangles);
        }
        if indices.len() % 3 != 0 {
            return Err(MeshError::IndexCount(indices.len()));
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::IndexOutOfRange { index, vertex_count });
        }

        Ok(Self {
            positions,
            normals,
            uvs,
            indices,
        })
    }

    /// Builds a mesh from interleaved vertices.
    pub fn from_vertices(vertices: &[Vertex], indices: Vec<u32>) -> Result<Self, MeshError> {
        let mut positions = Vec::with_capacity(vertices.len() * 3);
        let mut normals = Vec::with_capacity(vertices.len() * 3);
        let mut uvs = Vec::with_capacity(vertices.len() * 2);

        for v in vertices {
            positions.extend_from_slice(&v.position);
            normals.extend_from_slice(&v.normal);
            uvs.extend_from_slice(&v.uv);
        }

        Self::new(positions, normals, uvs, indices)
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    pub fn uvs(&self) -> &[f32] {
        &self.uvs
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> u32 {
        (self.indices.len() / 3) as u32
    }

    /// Vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: u32) -> [u32; 3] {
        let base = t as usize * 3;
        [
            self.indices[base],
            self.indices[base + 1],
            self.indices[base + 2],
        ]
    }

    #[inline]
    pub fn position(&self, i: u32) -> Vec3 {
        let b = i as usize * 3;
        Vec3::new(self.positions[b], self.positions[b + 1], self.positions[b + 2])
    }

    #[inline]
    pub fn normal(&self, i: u32) -> Vec3 {
        let b = i as usize * 3;
        Vec3::new(self.normals[b], self.normals[b + 1], self.normals[b + 2])
    }

    #[inline]
    pub fn uv(&self, i: u32) -> Vec2 {
        let b = i as usize * 2;
        Vec2::new(self.uvs[b], self.uvs[b + 1])
    }

    /// Returns a mesh containing only the triangles selected by `keep`.
    ///
    /// Vertex arrays are shared unchanged; only the index list is filtered.
    pub fn filter_triangles<F>(&self, mut keep: F) -> Result<Self, MeshError>
    where
        F: FnMut(u32) -> bool,
    {
        let indices: Vec<u32> = (0..self.triangle_count())
            .filter(|&t| keep(t))
            .flat_map(|t| self.triangle(t))
            .collect();

        Self::new(
            self.positions.clone(),
            self.normals.clone(),
            self.uvs.clone(),
            indices,
        )
    }
}

fn check_components(
    attribute: &'static str,
    len: usize,
    components: usize,
) -> Result<(), MeshError> {
    if len % components == 0 {
        Ok(())
    } else {
        Err(MeshError::MisalignedAttribute {
            attribute,
            len,
            components,
        })
    }
}

fn check_vertex_count(
    attribute: &'static str,
    expected: usize,
    found: usize,
) -> Result<(), MeshError> {
    if expected == found {
        Ok(())
    } else {
        Err(MeshError::VertexCountMismatch {
            attribute,
            expected,
            found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri() -> MeshAsset {
        MeshAsset::new(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            vec![0, 1, 2],
        )
        .unwrap()
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn accepts_single_triangle() {
        let mesh = tri();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.triangle(0), [0, 1, 2]);
    }

    #[test]
    fn rejects_misaligned_positions() {
        let err = MeshAsset::new(vec![0.0; 8], vec![0.0; 9], vec![0.0; 6], vec![0, 1, 2])
            .unwrap_err();
        assert!(matches!(
            err,
            MeshError::MisalignedAttribute { attribute: "positions", len: 8, components: 3 }
        ));
    }

    #[test]
    fn rejects_uv_count_mismatch() {
        let err = MeshAsset::new(vec![0.0; 9], vec![0.0; 9], vec![0.0; 4], vec![0, 1, 2])
            .unwrap_err();
        assert!(matches!(
            err,
            MeshError::VertexCountMismatch { attribute: "uvs", expected: 3, found: 2 }
        ));
    }

    #[test]
    fn rejects_partial_triangle() {
        let err = MeshAsset::new(vec![0.0; 9], vec![0.0; 9], vec![0.0; 6], vec![0, 1, 2, 0])
            .unwrap_err();
        assert!(matches!(err, MeshError::IndexCount(4)));
    }

    #[test]
    fn rejects_out_of_range_index() {
        let err = MeshAsset::new(vec![0.0; 9], vec![0.0; 9], vec![0.0; 6], vec![0, 1, 3])
            .unwrap_err();
        assert!(matches!(err, MeshError::IndexOutOfRange { index: 3, vertex_count: 3 }));
    }

    #[test]
    fn rejects_empty_mesh() {
        assert!(matches!(
            MeshAsset::new(vec![], vec![], vec![], vec![]).unwrap_err(),
            MeshError::NoVertices
        ));
        assert!(matches!(
            MeshAsset::new(vec![0.0; 9], vec![0.0; 9], vec![0.0; 6], vec![]).unwrap_err(),
            MeshError::NoTriangles
        ));
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[test]
    fn from_vertices_packs_attributes() {
        let vs = [
            Vertex::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.25, 0.5]),
            Vertex::new([4.0, 5.0, 6.0], [0.0, 1.0, 0.0], [0.75, 1.0]),
            Vertex::new([7.0, 8.0, 9.0], [0.0, 1.0, 0.0], [0.0, 0.0]),
        ];
        let mesh = MeshAsset::from_vertices(&vs, vec![2, 1, 0]).unwrap();
        assert_eq!(mesh.position(1), Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(mesh.normal(2), Vec3::Y);
        assert_eq!(mesh.uv(0), Vec2::new(0.25, 0.5));
        assert_eq!(mesh.positions().len(), 9);
        assert_eq!(mesh.uvs().len(), 6);
    }

    #[test]
    fn filter_triangles_keeps_vertices() {
        let mesh = MeshAsset::new(
            vec![0.0; 12],
            vec![0.0; 12],
            vec![0.0; 8],
            vec![0, 1, 2, 1, 2, 3],
        )
        .unwrap();
        let second = mesh.filter_triangles(|t| t == 1).unwrap();
        assert_eq!(second.triangle_count(), 1);
        assert_eq!(second.triangle(0), [1, 2, 3]);
        assert_eq!(second.vertex_count(), 4);
    }
}
