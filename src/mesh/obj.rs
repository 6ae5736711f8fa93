//! OBJ mesh import
//!
//! Line-oriented parser for the Wavefront OBJ subset the embed pipeline
//! consumes: `v`, `vt`, `vn`, and `f` records. Unknown record kinds are
//! skipped so files carrying groups, materials, or smoothing directives
//! still import.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::types::{FaceVertex, RawMesh};
use crate::error::ExportError;

/// Parse an OBJ file into a [`RawMesh`].
///
/// OBJ indices are 1-based and converted to 0-based on ingestion. Faces with
/// more than three vertices are fan-triangulated around the first vertex,
/// preserving winding order. Every face reference is range-checked against
/// the populated attribute arrays before the mesh is returned.
pub fn parse_obj(input: &Path) -> Result<RawMesh, ExportError> {
    let file = File::open(input)?;
    let reader = BufReader::new(file);

    let mut mesh = RawMesh::default();

    for (line_no, line) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "v" => {
                mesh.positions.push(parse_floats(input, line_no, &parts[1..])?);
            }
            "vt" => {
                mesh.tex_coords.push(parse_floats(input, line_no, &parts[1..])?);
            }
            "vn" => {
                mesh.normals.push(parse_floats(input, line_no, &parts[1..])?);
            }
            "f" => {
                let refs = parts[1..]
                    .iter()
                    .map(|s| {
                        parse_face_vertex(s).ok_or_else(|| {
                            ExportError::parse(
                                input,
                                line_no,
                                format!("malformed face vertex '{s}'"),
                            )
                        })
                    })
                    .collect::<Result<Vec<FaceVertex>, _>>()?;

                if refs.len() < 3 {
                    return Err(ExportError::parse(
                        input,
                        line_no,
                        format!("face has {} vertices, expected at least 3", refs.len()),
                    ));
                }

                // Fan triangulation (convex polygons)
                for i in 1..refs.len() - 1 {
                    mesh.faces.push([refs[0], refs[i], refs[i + 1]]);
                }
            }
            _ => {}
        }
    }

    if mesh.positions.is_empty() || mesh.faces.is_empty() {
        return Err(ExportError::EmptyMesh(input.to_path_buf()));
    }

    mesh.has_uvs = !mesh.tex_coords.is_empty();
    mesh.has_normals = !mesh.normals.is_empty();

    validate_faces(&mesh)?;

    Ok(mesh)
}

/// Parse exactly N leading float tokens of a record.
///
/// Extra trailing tokens are ignored (OBJ permits an optional w component);
/// missing or non-numeric tokens are parse errors rather than zeros.
fn parse_floats<const N: usize>(
    input: &Path,
    line_no: usize,
    tokens: &[&str],
) -> Result<[f32; N], ExportError> {
    if tokens.len() < N {
        return Err(ExportError::parse(
            input,
            line_no,
            format!("expected {N} numeric fields, found {}", tokens.len()),
        ));
    }

    let mut out = [0.0f32; N];
    for (slot, token) in out.iter_mut().zip(tokens) {
        let value: f32 = token.parse().map_err(|_| {
            ExportError::parse(input, line_no, format!("invalid number '{token}'"))
        })?;
        // NaN/inf parse as f32 but do not compile as C++ literals
        if !value.is_finite() {
            return Err(ExportError::parse(
                input,
                line_no,
                format!("non-finite number '{token}'"),
            ));
        }
        *slot = value;
    }
    Ok(out)
}

/// Parse an OBJ face vertex reference: "v", "v/vt", "v/vt/vn", or "v//vn"
fn parse_face_vertex(s: &str) -> Option<FaceVertex> {
    let mut parts = s.split('/');

    // OBJ indices are 1-based
    let position = parts.next()?.parse::<usize>().ok()?.checked_sub(1)?;
    let tex_coord = parse_sub_index(parts.next())?;
    let normal = parse_sub_index(parts.next())?;

    if parts.next().is_some() {
        return None;
    }

    Some(FaceVertex {
        position,
        tex_coord,
        normal,
    })
}

/// An absent or empty sub-index is fine; a present but non-numeric one is not.
fn parse_sub_index(part: Option<&str>) -> Option<Option<usize>> {
    match part {
        None | Some("") => Some(None),
        Some(s) => Some(Some(s.parse::<usize>().ok()?.checked_sub(1)?)),
    }
}

/// Range-check every face reference against the arrays that were populated.
fn validate_faces(mesh: &RawMesh) -> Result<(), ExportError> {
    let check = |face: usize, kind: &'static str, index: usize, len: usize| {
        if index < len {
            Ok(())
        } else {
            Err(ExportError::IndexOutOfRange {
                face,
                kind,
                index,
                len,
            })
        }
    };

    for (fi, face) in mesh.faces.iter().enumerate() {
        for fv in face {
            check(fi, "position", fv.position, mesh.positions.len())?;
            if let Some(ti) = fv.tex_coord {
                check(fi, "texCoord", ti, mesh.tex_coords.len())?;
            }
            if let Some(ni) = fv.normal {
                check(fi, "normal", ni, mesh.normals.len())?;
            }
        }
    }
    Ok(())
}
