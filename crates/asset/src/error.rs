//! Errors produced while loading model geometry and materials.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open OBJ file {}: {source}", .path.display())]
    GeometryOpen { path: PathBuf, source: io::Error },

    #[error("Failed to open MTL file {}: {source}", .path.display())]
    MaterialOpen { path: PathBuf, source: io::Error },

    #[error("Failed to read line {line}: {source}")]
    Read { line: usize, source: io::Error },

    #[error("Malformed line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

impl LoadError {
    /// `line_no` is the 0-based enumerate index; messages report 1-based lines.
    pub(crate) fn malformed(line_no: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            line: line_no + 1,
            reason: reason.into(),
        }
    }

    pub(crate) fn read(line_no: usize, source: io::Error) -> Self {
        Self::Read {
            line: line_no + 1,
            source,
        }
    }
}

pub type LoadResult<T> = Result<T, LoadError>;
