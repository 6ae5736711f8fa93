//! Types and constants for mesh import and flattening

/// Maximum emitted vertex or index count (65535)
/// The generated index array is u16; larger meshes must be split before embedding.
pub(crate) const MAX_U16_COUNT: usize = u16::MAX as usize;

/// One corner of a triangle: independent 0-based references into the
/// position / texCoord / normal arrays of a [`RawMesh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceVertex {
    pub position: usize,
    pub tex_coord: Option<usize>,
    pub normal: Option<usize>,
}

/// A triangle, produced by fan triangulation of the source polygon.
pub type Face = [FaceVertex; 3];

/// Mesh as parsed from the OBJ file: raw attribute arrays plus a face list
/// whose entries carry independent indices per attribute.
#[derive(Debug, Default)]
pub struct RawMesh {
    pub positions: Vec<[f32; 3]>,
    pub tex_coords: Vec<[f32; 2]>,
    pub normals: Vec<[f32; 3]>,
    pub faces: Vec<Face>,
    pub has_uvs: bool,
    pub has_normals: bool,
}

/// One emitted vertex record: fixed shape regardless of which attributes
/// the source declared. Absent attributes are zero-filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlattenedVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

/// Canonical intermediate representation consumed by codegen: one shared
/// index stream over a single combined vertex array.
#[derive(Debug, Default)]
pub struct FlattenedMesh {
    pub vertices: Vec<FlattenedVertex>,
    pub indices: Vec<u16>,
}
