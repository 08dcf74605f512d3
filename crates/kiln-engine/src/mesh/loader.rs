use std::path::Path;

use gltf::mesh::Mode;

use super::{MeshAsset, MeshError};

/// Loads the first primitive of the first mesh in a glTF/GLB document.
///
/// Positions, normals and `TEXCOORD_0` are required. A non-indexed primitive
/// gets the identity index list.
pub fn load_gltf(path: impl AsRef<Path>) -> Result<MeshAsset, MeshError> {
    let path = path.as_ref();
    let (document, buffers, _images) = gltf::import(path)?;

    let mesh = document.meshes().next().ok_or(MeshError::NoMesh)?;
    let primitive = mesh.primitives().next().ok_or(MeshError::NoPrimitive)?;

    let mode = primitive.mode();
    if mode != Mode::Triangles {
        return Err(MeshError::NotTriangles(mode));
    }

    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

    let positions: Vec<f32> = reader
        .read_positions()
        .ok_or(MeshError::MissingAttribute("POSITION"))?
        .flatten()
        .collect();

    let normals: Vec<f32> = reader
        .read_normals()
        .ok_or(MeshError::MissingAttribute("NORMAL"))?
        .flatten()
        .collect();

    let uvs: Vec<f32> = reader
        .read_tex_coords(0)
        .ok_or(MeshError::MissingAttribute("TEXCOORD_0"))?
        .into_f32()
        .flatten()
        .collect();

    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..(positions.len() / 3) as u32).collect(),
    };

    let asset = MeshAsset::new(positions, normals, uvs, indices)?;

    log::info!(
        "loaded mesh '{}' from {}: {} vertices, {} triangles",
        mesh.name().unwrap_or("<unnamed>"),
        path.display(),
        asset.vertex_count(),
        asset.triangle_count(),
    );

    Ok(asset)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;

    const POSITIONS: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    const NORMALS: [f32; 9] = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
    const UVS: [f32; 6] = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
    const INDICES: [u32; 3] = [2, 1, 0];

    // Accessor indices in every generated document.
    const POSITION: usize = 0;
    const NORMAL: usize = 1;
    const TEXCOORD_0: usize = 2;
    const INDEX: usize = 3;

    const TRIANGLES: u32 = 4;
    const LINES: u32 = 1;

    /// Scratch directory removed on drop.
    struct Scratch(PathBuf);

    impl Scratch {
        fn new(name: &str) -> Self {
            let dir = std::env::temp_dir()
                .join(format!("kiln-loader-{}-{name}", std::process::id()));
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn write(&self, json: &str) -> PathBuf {
            let path = self.0.join("mesh.gltf");
            fs::write(&path, json).unwrap();
            path
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    /// One primitive: the listed attributes, optional indices, `mode`.
    fn primitive(attributes: &[&str], indexed: bool, mode: u32) -> String {
        let attributes: Vec<String> = attributes
            .iter()
            .map(|&semantic| {
                let accessor = match semantic {
                    "POSITION" => POSITION,
                    "NORMAL" => NORMAL,
                    "TEXCOORD_0" => TEXCOORD_0,
                    other => panic!("no accessor for {other}"),
                };
                format!(r#""{semantic}": {accessor}"#)
            })
            .collect();
        let indices = if indexed { format!(r#""indices": {INDEX}, "#) } else { String::new() };
        format!(r#"{{ "attributes": {{ {} }}, {indices}"mode": {mode} }}"#, attributes.join(", "))
    }

    /// glTF document with an embedded base64 buffer and the given meshes,
    /// each a list of primitives.
    fn document(meshes: &[Vec<String>]) -> String {
        let mut bytes: Vec<u8> = Vec::new();
        let mut view = |data: &[u8]| {
            let offset = bytes.len();
            bytes.extend_from_slice(data);
            format!(r#"{{ "buffer": 0, "byteOffset": {offset}, "byteLength": {} }}"#, data.len())
        };
        let views = [
            view(bytemuck::cast_slice(&POSITIONS)),
            view(bytemuck::cast_slice(&NORMALS)),
            view(bytemuck::cast_slice(&UVS)),
            view(bytemuck::cast_slice(&INDICES)),
        ];

        let meshes: Vec<String> = meshes
            .iter()
            .map(|primitives| format!(r#"{{ "primitives": [{}] }}"#, primitives.join(", ")))
            .collect();

        format!(
            r#"{{
                "asset": {{ "version": "2.0" }},
                "buffers": [{{
                    "byteLength": {len},
                    "uri": "data:application/octet-stream;base64,{data}"
                }}],
                "bufferViews": [{views}],
                "accessors": [
                    {{ "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
                       "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] }},
                    {{ "bufferView": 1, "componentType": 5126, "count": 3, "type": "VEC3" }},
                    {{ "bufferView": 2, "componentType": 5126, "count": 3, "type": "VEC2" }},
                    {{ "bufferView": 3, "componentType": 5125, "count": 3, "type": "SCALAR" }}
                ],
                "meshes": [{meshes}]
            }}"#,
            len = bytes.len(),
            data = base64::encode(&bytes),
            views = views.join(", "),
            meshes = meshes.join(", "),
        )
    }

    const ALL: [&str; 3] = ["POSITION", "NORMAL", "TEXCOORD_0"];

    // ── success ───────────────────────────────────────────────────────────

    #[test]
    fn indexed_triangle_loads_every_attribute() {
        let scratch = Scratch::new("indexed");
        let path = scratch.write(&document(&[vec![primitive(&ALL, true, TRIANGLES)]]));

        let mesh = load_gltf(&path).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.positions(), &POSITIONS);
        assert_eq!(mesh.normals(), &NORMALS);
        assert_eq!(mesh.uvs(), &UVS);
        assert_eq!(mesh.indices(), &INDICES);
    }

    #[test]
    fn non_indexed_primitive_gets_identity_indices() {
        let scratch = Scratch::new("non-indexed");
        let path = scratch.write(&document(&[vec![primitive(&ALL, false, TRIANGLES)]]));

        let mesh = load_gltf(&path).unwrap();
        assert_eq!(mesh.indices(), &[0, 1, 2]);
        assert_eq!(mesh.triangle(0), [0, 1, 2]);
    }

    #[test]
    fn only_first_mesh_and_primitive_are_read() {
        // Every later primitive is a line list, which would fail to load.
        let scratch = Scratch::new("first");
        let path = scratch.write(&document(&[
            vec![primitive(&ALL, true, TRIANGLES), primitive(&ALL, false, LINES)],
            vec![primitive(&ALL, false, LINES)],
        ]));

        let mesh = load_gltf(&path).unwrap();
        assert_eq!(mesh.indices(), &INDICES);
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn missing_file_is_an_import_error() {
        let err = load_gltf("this/path/does/not/exist.glb").unwrap_err();
        assert!(matches!(err, MeshError::Import(_)));
    }

    #[test]
    fn missing_normals_are_rejected() {
        let scratch = Scratch::new("no-normal");
        let path = scratch.write(&document(&[vec![primitive(
            &["POSITION", "TEXCOORD_0"],
            true,
            TRIANGLES,
        )]]));

        let err = load_gltf(&path).unwrap_err();
        assert!(matches!(err, MeshError::MissingAttribute("NORMAL")), "{err}");
    }

    #[test]
    fn missing_tex_coords_are_rejected() {
        let scratch = Scratch::new("no-uv");
        let path = scratch.write(&document(&[vec![primitive(
            &["POSITION", "NORMAL"],
            true,
            TRIANGLES,
        )]]));

        let err = load_gltf(&path).unwrap_err();
        assert!(matches!(err, MeshError::MissingAttribute("TEXCOORD_0")), "{err}");
    }

    #[test]
    fn line_primitive_is_rejected() {
        let scratch = Scratch::new("lines");
        let path = scratch.write(&document(&[vec![primitive(&ALL, false, LINES)]]));

        let err = load_gltf(&path).unwrap_err();
        assert!(matches!(err, MeshError::NotTriangles(Mode::Lines)), "{err}");
    }
}
