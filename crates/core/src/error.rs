// Copyright 2025 Test Observatory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the analysis pipeline.
//!
//! Almost everything in the pipeline is best-effort: missing inputs are
//! empty data, malformed logs are zero counts, and a failing coverage tool
//! is a recorded string. The variants here cover the few places a run can
//! actually fail, which is creating the analysis directory and writing the
//! report artifacts.

use std::path::PathBuf;
use thiserror::Error;

/// Failures at the report-writing boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem failure while creating a directory or writing an artifact.
    #[error("io error at {path}: {source}")]
    Io {
        /// Path being created or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The analysis report could not be serialized to JSON.
    #[error("failed to serialize analysis report: {0}")]
    Json(#[from] serde_json::Error),

    /// Chart rendering failed; callers treat this as skippable.
    #[error("chart rendering failed: {0}")]
    Chart(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
