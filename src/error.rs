//! Error taxonomy for the embed pipeline

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write {}: {}", path.display(), source)]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{}: {}", path.display(), line, msg)]
    Parse {
        path: PathBuf,
        line: usize,
        msg: String,
    },

    #[error("face {face} references {kind} index {index}, but only {len} entries exist")]
    IndexOutOfRange {
        face: usize,
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("no geometry found in {}", .0.display())]
    EmptyMesh(PathBuf),

    #[error("mesh has {count} vertices, exceeds maximum {max} for u16 indices. Split the mesh into smaller parts.")]
    TooManyVertices { count: usize, max: usize },

    #[error("mesh has {count} indices, exceeds maximum {max} for u16 index data")]
    TooManyIndices { count: usize, max: usize },
}

impl ExportError {
    pub(crate) fn parse(path: &std::path::Path, line: usize, msg: impl Into<String>) -> Self {
        ExportError::Parse {
            path: path.to_path_buf(),
            line,
            msg: msg.into(),
        }
    }
}
