//! Mesh assets.
//!
//! A mesh is the single input of the rasterizer: flat position, normal, UV
//! and index arrays. Meshes come either from a glTF document (first mesh,
//! first primitive) or from the built-in cube.

mod asset;
mod cube;
mod loader;

pub use asset::{MeshAsset, Vertex};
pub use cube::cube;
pub use loader::load_gltf;

/// Mesh loading or validation failure.
///
/// Any of these is fatal at startup: the pipeline has no fallback mesh.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("failed to import glTF document: {0}")]
    Import(#[from] ::gltf::Error),

    #[error("glTF document contains no mesh")]
    NoMesh,

    #[error("first glTF mesh has no primitive")]
    NoPrimitive,

    #[error("primitive mode {0:?} is not a triangle list")]
    NotTriangles(::gltf::mesh::Mode),

    #[error("primitive has no {0} attribute")]
    MissingAttribute(&'static str),

    #[error("{attribute} has {len} floats, not a multiple of {components}")]
    MisalignedAttribute {
        attribute: &'static str,
        len: usize,
        components: usize,
    },

    #[error("{attribute} describes {found} vertices, positions describe {expected}")]
    VertexCountMismatch {
        attribute: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("mesh has no vertices")]
    NoVertices,

    #[error("mesh has no triangles")]
    NoTriangles,

    #[error("index count {0} is not a multiple of 3")]
    IndexCount(usize),

    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}
