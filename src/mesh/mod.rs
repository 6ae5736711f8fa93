//! Mesh import and index reconciliation (OBJ -> flattened vertex/index arrays)

mod flatten;
mod obj;
mod types;

// Re-export public API
pub use flatten::{flatten, FlattenPolicy};
pub use obj::parse_obj;
pub use types::{Face, FaceVertex, FlattenedMesh, FlattenedVertex, RawMesh};
