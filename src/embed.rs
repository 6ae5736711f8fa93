//! Single-mesh embed pipeline: parse, flatten, write

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::codegen::{self, ModelName, DEFAULT_COMMON_HEADER};
use crate::mesh::{flatten, parse_obj, FlattenPolicy};

/// Per-run configuration, passed in at call time rather than compiled in.
#[derive(Debug, Clone)]
pub struct EmbedConfig {
    /// Directory the generated .h/.cpp pair is written to.
    pub output_dir: PathBuf,
    /// Base name override; defaults to the input file's stem.
    pub name_override: Option<String>,
    /// Common-types header the generated .cpp includes.
    pub common_header: String,
    /// Vertex flattening policy.
    pub policy: FlattenPolicy,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            name_override: None,
            common_header: DEFAULT_COMMON_HEADER.to_string(),
            policy: FlattenPolicy::default(),
        }
    }
}

/// Convert one OBJ file into a generated header/source pair.
///
/// The input is parsed completely before any output is created, so a parse
/// failure leaves no files behind. Returns the two output paths.
pub fn embed_obj(input: &Path, config: &EmbedConfig) -> Result<(PathBuf, PathBuf)> {
    let stem = match &config.name_override {
        Some(name) => name.clone(),
        None => input
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_owned)
            .with_context(|| format!("Cannot derive a class name from {:?}", input))?,
    };
    let name = ModelName::from_stem(&stem);

    let raw = parse_obj(input).with_context(|| format!("Failed to parse OBJ: {:?}", input))?;
    let flat = flatten(&raw, config.policy)?;

    let (header_path, source_path) =
        codegen::write_model(&config.output_dir, &name, &flat, &config.common_header)?;

    tracing::info!(
        "Embedded {:?} as {}: {} vertices, {} indices",
        input,
        name.class_name,
        flat.vertices.len(),
        flat.indices.len()
    );

    Ok((header_path, source_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn embeds_triangle_obj() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let obj_path = dir.path().join("tri.obj");
        let mut file = std::fs::File::create(&obj_path).unwrap();
        writeln!(file, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3").unwrap();

        let config = EmbedConfig {
            output_dir: dir.path().join("generated"),
            ..EmbedConfig::default()
        };
        let (header, source) = embed_obj(&obj_path, &config).unwrap();

        assert_eq!(header.file_name().unwrap(), "TriModel.h");
        let source_text = std::fs::read_to_string(&source).unwrap();
        assert!(source_text.contains("const uint32_t TriModel::numVertices = 3;"));
        assert!(source_text.contains("    0, 1, 2,\n};"));
    }

    #[test]
    fn parse_failure_writes_nothing() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let obj_path = dir.path().join("bad.obj");
        std::fs::write(&obj_path, "v 0 0\n").unwrap();

        let out_dir = dir.path().join("generated");
        let config = EmbedConfig {
            output_dir: out_dir.clone(),
            ..EmbedConfig::default()
        };

        assert!(embed_obj(&obj_path, &config).is_err());
        assert!(!out_dir.exists());
    }
}
