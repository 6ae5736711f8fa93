//! meshes.toml manifest parsing
//!
//! Declares a batch of OBJ meshes to embed in one run, plus shared output
//! settings. Paths in the manifest are resolved relative to the manifest's
//! own directory.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::embed::{embed_obj, EmbedConfig};
use crate::mesh::FlattenPolicy;

/// meshes.toml manifest structure
#[derive(Debug, Deserialize)]
pub struct EmbedManifest {
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub meshes: Vec<MeshEntry>,
}

/// Shared output settings
#[derive(Debug, Default, Deserialize)]
pub struct OutputSection {
    /// Directory for the generated files (default: manifest directory)
    #[serde(default)]
    pub dir: Option<String>,

    /// Common-types header included by every generated .cpp
    /// (default: "SoftShadowsCommon.h")
    #[serde(default)]
    pub common_header: Option<String>,

    /// Share vertices with identical attribute references.
    /// Default: false (one emitted vertex per face-vertex)
    #[serde(default)]
    pub dedup: bool,
}

/// Single mesh entry
#[derive(Debug, Deserialize)]
pub struct MeshEntry {
    pub id: String,
    pub path: String,

    /// Base name override for class derivation (default: the entry id).
    #[serde(default)]
    pub name: Option<String>,

    /// Per-entry dedup override.
    #[serde(default)]
    pub dedup: Option<bool>,
}

impl EmbedManifest {
    /// Load and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Failed to parse manifest: {}", path.display()))
    }

    /// Parse manifest text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Validate entries without building: ids must be unique and non-empty,
    /// every input path must exist.
    pub fn validate(&self, base_dir: &Path) -> Result<()> {
        if self.meshes.is_empty() {
            bail!("Manifest declares no meshes");
        }

        let mut seen = hashbrown::HashSet::new();
        for entry in &self.meshes {
            if entry.id.is_empty() {
                bail!("Mesh entry with empty id (path: {})", entry.path);
            }
            if !seen.insert(entry.id.as_str()) {
                bail!("Duplicate mesh id: {}", entry.id);
            }

            let input = base_dir.join(&entry.path);
            if !input.is_file() {
                bail!("Mesh '{}' input not found: {}", entry.id, input.display());
            }
        }
        Ok(())
    }
}

/// Embed every mesh the manifest declares.
///
/// `output_override` replaces the manifest's output directory when set
/// (mirrors the CLI `-o` flag).
pub fn build_all(
    manifest: &EmbedManifest,
    base_dir: &Path,
    output_override: Option<&Path>,
) -> Result<()> {
    manifest.validate(base_dir)?;

    let output_dir: PathBuf = match output_override {
        Some(dir) => dir.to_path_buf(),
        None => match &manifest.output.dir {
            Some(dir) => base_dir.join(dir),
            None => base_dir.to_path_buf(),
        },
    };

    let common_header = manifest
        .output
        .common_header
        .clone()
        .unwrap_or_else(|| crate::codegen::DEFAULT_COMMON_HEADER.to_string());

    for entry in &manifest.meshes {
        let dedup = entry.dedup.unwrap_or(manifest.output.dedup);
        let config = EmbedConfig {
            output_dir: output_dir.clone(),
            name_override: Some(entry.name.clone().unwrap_or_else(|| entry.id.clone())),
            common_header: common_header.clone(),
            policy: if dedup {
                FlattenPolicy::Dedup
            } else {
                FlattenPolicy::Duplicate
            },
        };

        let input = base_dir.join(&entry.path);
        embed_obj(&input, &config)
            .with_context(|| format!("Failed to embed mesh '{}'", entry.id))?;
    }

    tracing::info!("Embedded {} meshes -> {}", manifest.meshes.len(), output_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_manifest() {
        let manifest_toml = r#"
            [output]
            dir = "generated"
            common_header = "DemoCommon.h"
            dedup = true

            [[meshes]]
            id = "bunny"
            path = "assets/bunny.obj"

            [[meshes]]
            id = "knight"
            path = "assets/knight.obj"
            name = "hero"
            dedup = false
        "#;

        let manifest = EmbedManifest::parse(manifest_toml).unwrap();
        assert_eq!(manifest.output.dir.as_deref(), Some("generated"));
        assert_eq!(manifest.output.common_header.as_deref(), Some("DemoCommon.h"));
        assert!(manifest.output.dedup);
        assert_eq!(manifest.meshes.len(), 2);
        assert_eq!(manifest.meshes[1].name.as_deref(), Some("hero"));
        assert_eq!(manifest.meshes[1].dedup, Some(false));
    }

    #[test]
    fn parses_minimal_manifest() {
        let manifest_toml = r#"
            [[meshes]]
            id = "bunny"
            path = "bunny.obj"
        "#;

        let manifest = EmbedManifest::parse(manifest_toml).unwrap();
        assert!(manifest.output.dir.is_none());
        assert!(!manifest.output.dedup);
        assert_eq!(manifest.meshes[0].id, "bunny");
    }

    #[test]
    fn rejects_entry_without_path() {
        let manifest_toml = r#"
            [[meshes]]
            id = "bunny"
        "#;

        assert!(EmbedManifest::parse(manifest_toml).is_err());
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("bunny.obj"), "v 0 0 0\nf 1 1 1\n").unwrap();

        let manifest = EmbedManifest::parse(
            r#"
            [[meshes]]
            id = "bunny"
            path = "bunny.obj"

            [[meshes]]
            id = "bunny"
            path = "bunny.obj"
        "#,
        )
        .unwrap();

        let err = manifest.validate(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Duplicate mesh id"));
    }

    #[test]
    fn validate_rejects_missing_input() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let manifest = EmbedManifest::parse(
            r#"
            [[meshes]]
            id = "bunny"
            path = "missing.obj"
        "#,
        )
        .unwrap();

        let err = manifest.validate(dir.path()).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
