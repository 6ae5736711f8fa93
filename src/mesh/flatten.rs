//! Index reconciliation
//!
//! OBJ faces reference positions, texCoords, and normals through independent
//! index streams; the generated arrays need a single shared index per vertex.
//! Flattening reconciles the two by expanding each face-vertex into one
//! fixed-shape output record.

use hashbrown::HashMap;

use super::types::{FaceVertex, FlattenedMesh, FlattenedVertex, RawMesh, MAX_U16_COUNT};
use crate::error::ExportError;

/// How face-vertices map to emitted vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlattenPolicy {
    /// Every face-vertex becomes its own emitted vertex, even when an
    /// identical attribute combination already exists. Larger output, but
    /// never merges combinations that should stay distinct.
    #[default]
    Duplicate,
    /// Face-vertices with the same (position, texCoord, normal) index triple
    /// share one emitted vertex.
    Dedup,
}

/// Flatten a [`RawMesh`] into the canonical form consumed by codegen.
///
/// Attributes the source never declared are zero-filled so the emitted
/// record shape stays fixed. Fails if the result exceeds the u16 index
/// range instead of letting indices wrap.
pub fn flatten(mesh: &RawMesh, policy: FlattenPolicy) -> Result<FlattenedMesh, ExportError> {
    let mut vertices: Vec<FlattenedVertex> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    let mut seen: HashMap<FaceVertex, u32> = HashMap::new();

    for face in &mesh.faces {
        for fv in face {
            let slot = match policy {
                FlattenPolicy::Duplicate => None,
                FlattenPolicy::Dedup => seen.get(fv).copied(),
            };

            let index = match slot {
                Some(existing) => existing,
                None => {
                    let index = vertices.len() as u32;
                    vertices.push(lookup(mesh, fv));
                    if policy == FlattenPolicy::Dedup {
                        seen.insert(*fv, index);
                    }
                    index
                }
            };
            indices.push(index);
        }
    }

    if vertices.len() > MAX_U16_COUNT {
        return Err(ExportError::TooManyVertices {
            count: vertices.len(),
            max: MAX_U16_COUNT,
        });
    }
    if indices.len() > MAX_U16_COUNT {
        return Err(ExportError::TooManyIndices {
            count: indices.len(),
            max: MAX_U16_COUNT,
        });
    }

    Ok(FlattenedMesh {
        vertices,
        indices: indices.into_iter().map(|i| i as u16).collect(),
    })
}

/// Resolve one face-vertex against the raw attribute arrays.
///
/// Indices were range-checked at parse time, so the lookups cannot miss;
/// absent attributes become zeros.
fn lookup(mesh: &RawMesh, fv: &FaceVertex) -> FlattenedVertex {
    FlattenedVertex {
        position: mesh.positions[fv.position],
        normal: fv.normal.map_or([0.0; 3], |ni| mesh.normals[ni]),
        tex_coord: fv.tex_coord.map_or([0.0; 2], |ti| mesh.tex_coords[ti]),
    }
}
