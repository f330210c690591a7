// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use neurite_reconstruction::ReconstructionError;
use neurite_structures::NeuriteDataError;
use std::path::PathBuf;

/// Result type for loading operations
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors that can occur while loading a morphology file
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("unsupported morphology format: {0:?}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Data(#[from] NeuriteDataError),

    #[error(transparent)]
    Build(#[from] ReconstructionError),

    /// Wraps any of the above with the file it came from, so a failed batch
    /// load can name the offending file
    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<LoadError>,
    },
}

impl LoadError {
    /// Attaches the source file to this error.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            already @ LoadError::File { .. } => already,
            other => LoadError::File {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }
}
