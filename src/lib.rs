//! mesh-embed library
//!
//! Converts Wavefront OBJ meshes into C++ static-array source files, so a
//! rendering demo can compile its geometry in instead of loading it at
//! runtime. Each input mesh becomes a header declaring a static model class
//! and a definition file populating `numVertices`, `vertices[]`,
//! `numIndices`, and `indices[]`.

pub mod codegen;
pub mod embed;
pub mod error;
pub mod manifest;
pub mod mesh;

// Re-export the embed pipeline and its configuration
pub use embed::{embed_obj, EmbedConfig};
pub use error::ExportError;

// Re-export key types for mesh conversion
pub use codegen::{generate_header, generate_source, write_model, ModelName};
pub use mesh::{flatten, parse_obj, FlattenPolicy, FlattenedMesh, FlattenedVertex, RawMesh};
