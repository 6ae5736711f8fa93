//! C++ source generation
//!
//! Emits the two artifacts the rendering demo compiles in: a header
//! declaring a static model class and a definition file populating its four
//! data members with literal arrays. The layout (`numVertices`,
//! `vertices[]`, `numIndices`, `indices[]`, with `ModelVertex` entries of
//! position / normal / color / texCoord) is a binding contract with the
//! consumer and must not drift.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ExportError;
use crate::mesh::FlattenedMesh;

/// Suffix appended to the derived class name.
pub const MODEL_SUFFIX: &str = "Model";

/// Common-types header the definition file includes (declares `ModelVertex`).
pub const DEFAULT_COMMON_HEADER: &str = "SoftShadowsCommon.h";

/// Class name and include guard derived from an input file's base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelName {
    pub class_name: String,
    pub guard: String,
}

impl ModelName {
    /// Derive naming from a file stem: `bunny` -> class `BunnyModel`,
    /// guard `BUNNY_MODEL_H`.
    ///
    /// Characters that are not valid in a C++ identifier become `_`, and a
    /// leading digit gets a `_` prefix, so any file stem yields compilable
    /// names.
    pub fn from_stem(stem: &str) -> Self {
        let mut stem: String = stem
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        if stem.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            stem.insert(0, '_');
        }

        let mut chars = stem.chars();
        let class_name = match chars.next() {
            Some(first) => format!(
                "{}{}{}",
                first.to_ascii_uppercase(),
                chars.as_str(),
                MODEL_SUFFIX
            ),
            None => MODEL_SUFFIX.to_string(),
        };

        let guard = format!(
            "{}_{}_H",
            stem.to_ascii_uppercase(),
            MODEL_SUFFIX.to_ascii_uppercase()
        );

        Self { class_name, guard }
    }
}

/// Generate the header file: a class exposing the four static data members.
pub fn generate_header(name: &ModelName) -> String {
    format!(
        "\
#pragma once
#ifndef {guard}
#define {guard}

class {class}
{{
public:
    static const uint32_t numVertices;
    static const ModelVertex vertices[];
    static const uint32_t numIndices;
    static const uint16_t indices[];
}};

#endif
",
        guard = name.guard,
        class = name.class_name,
    )
}

/// Generate the definition file embedding the flattened mesh.
///
/// Each vertex is emitted as `{ {x,y,z}, {nx,ny,nz}, {nx,ny,nz}, {u,v} }`:
/// the consumer's `ModelVertex` carries a color slot, and the source format
/// has no color channel, so the normal is copied into it. Indices are
/// grouped three per line, one triangle each.
pub fn generate_source(name: &ModelName, mesh: &FlattenedMesh, common_header: &str) -> String {
    let mut out = String::new();

    out.push_str(&format!("#include \"{common_header}\"\n"));
    out.push_str(&format!("#include \"{}.h\"\n\n", name.class_name));

    out.push_str(&format!(
        "const uint32_t {}::numVertices = {};\n",
        name.class_name,
        mesh.vertices.len()
    ));
    out.push_str(&format!(
        "const uint32_t {}::numIndices = {};\n\n",
        name.class_name,
        mesh.indices.len()
    ));

    out.push_str(&format!(
        "const ModelVertex {}::vertices[{}] = {{\n",
        name.class_name,
        mesh.vertices.len()
    ));
    for v in &mesh.vertices {
        let [x, y, z] = v.position;
        let [nx, ny, nz] = v.normal;
        let [u, w] = v.tex_coord;
        out.push_str(&format!(
            "    {{ {{{x}, {y}, {z}}}, {{{nx}, {ny}, {nz}}}, {{{nx}, {ny}, {nz}}}, {{{u}, {w}}} }},\n"
        ));
    }
    out.push_str("};\n\n");

    out.push_str(&format!(
        "const uint16_t {}::indices[{}] = {{\n",
        name.class_name,
        mesh.indices.len()
    ));
    for triangle in mesh.indices.chunks(3) {
        out.push_str("    ");
        for index in triangle {
            out.push_str(&format!("{index}, "));
        }
        out.pop();
        out.push('\n');
    }
    out.push_str("};\n");

    out
}

/// Write `<Class>.h` and `<Class>.cpp` into `dir`, overwriting any previous
/// run's output. Returns the two paths.
pub fn write_model(
    dir: &Path,
    name: &ModelName,
    mesh: &FlattenedMesh,
    common_header: &str,
) -> Result<(PathBuf, PathBuf), ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let header_path = dir.join(format!("{}.h", name.class_name));
    fs::write(&header_path, generate_header(name)).map_err(|source| ExportError::Write {
        path: header_path.clone(),
        source,
    })?;

    let source_path = dir.join(format!("{}.cpp", name.class_name));
    fs::write(&source_path, generate_source(name, mesh, common_header)).map_err(|source| {
        ExportError::Write {
            path: source_path.clone(),
            source,
        }
    })?;

    Ok((header_path, source_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::FlattenedVertex;

    fn sample_mesh() -> FlattenedMesh {
        let corner = |position, normal| FlattenedVertex {
            position,
            normal,
            tex_coord: [0.0, 0.0],
        };
        FlattenedMesh {
            vertices: vec![
                corner([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
                corner([1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
                corner([0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
            ],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn derives_class_name_and_guard() {
        let name = ModelName::from_stem("bunny");
        assert_eq!(name.class_name, "BunnyModel");
        assert_eq!(name.guard, "BUNNY_MODEL_H");
    }

    #[test]
    fn sanitizes_non_identifier_stems() {
        let name = ModelName::from_stem("my-mesh");
        assert_eq!(name.class_name, "My_meshModel");
        assert_eq!(name.guard, "MY_MESH_MODEL_H");

        let name = ModelName::from_stem("8ball");
        assert_eq!(name.class_name, "_8ballModel");
        assert_eq!(name.guard, "_8BALL_MODEL_H");
    }

    #[test]
    fn generates_header_template() {
        let header = generate_header(&ModelName::from_stem("bunny"));

        assert!(header.starts_with("#pragma once\n#ifndef BUNNY_MODEL_H\n#define BUNNY_MODEL_H\n"));
        assert!(header.contains("class BunnyModel\n{\npublic:\n"));
        assert!(header.contains("    static const uint32_t numVertices;\n"));
        assert!(header.contains("    static const ModelVertex vertices[];\n"));
        assert!(header.contains("    static const uint32_t numIndices;\n"));
        assert!(header.contains("    static const uint16_t indices[];\n"));
        assert!(header.ends_with("};\n\n#endif\n"));
    }

    #[test]
    fn generates_source_definitions() {
        let name = ModelName::from_stem("bunny");
        let source = generate_source(&name, &sample_mesh(), DEFAULT_COMMON_HEADER);

        assert!(source.starts_with("#include \"SoftShadowsCommon.h\"\n#include \"BunnyModel.h\"\n"));
        assert!(source.contains("const uint32_t BunnyModel::numVertices = 3;"));
        assert!(source.contains("const uint32_t BunnyModel::numIndices = 3;"));
        assert!(source.contains("const ModelVertex BunnyModel::vertices[3] = {"));
        assert!(source.contains("const uint16_t BunnyModel::indices[3] = {"));
        assert!(source.contains("    0, 1, 2,\n"));
    }

    #[test]
    fn copies_normal_into_color_slot() {
        let name = ModelName::from_stem("bunny");
        let source = generate_source(&name, &sample_mesh(), DEFAULT_COMMON_HEADER);

        // position, normal, color (= normal), texCoord
        assert!(source.contains("{ {0, 0, 0}, {0, 0, 1}, {0, 0, 1}, {0, 0} },"));
    }

    #[test]
    fn groups_indices_three_per_line() {
        let name = ModelName::from_stem("quad");
        let mesh = FlattenedMesh {
            vertices: sample_mesh().vertices,
            indices: vec![0, 1, 2, 0, 2, 1],
        };
        let source = generate_source(&name, &mesh, DEFAULT_COMMON_HEADER);

        assert!(source.contains("    0, 1, 2,\n    0, 2, 1,\n};\n"));
    }

    #[test]
    fn writes_both_files() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let name = ModelName::from_stem("bunny");

        let (header, source) =
            write_model(dir.path(), &name, &sample_mesh(), DEFAULT_COMMON_HEADER).unwrap();

        assert_eq!(header.file_name().unwrap(), "BunnyModel.h");
        assert_eq!(source.file_name().unwrap(), "BunnyModel.cpp");
        assert!(std::fs::read_to_string(&header)
            .unwrap()
            .contains("BUNNY_MODEL_H"));
        assert!(std::fs::read_to_string(&source)
            .unwrap()
            .contains("numVertices = 3"));
    }
}
