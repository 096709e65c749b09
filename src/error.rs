//! Error types for the chart pipeline.
//!
//! Windowing never fails (missing references degrade to omitted branches);
//! only the I/O, parsing, dataset-mutation and solver boundaries return errors.

use std::path::PathBuf;

/// Failure reported by a [`LayoutSolver`](crate::layout::LayoutSolver).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout solver rejected the graph: {0}")]
    Rejected(String),
    #[error("edge {edge} references unknown endpoint '{endpoint}'")]
    UnknownEndpoint { edge: String, endpoint: String },
    #[error("layout task was interrupted: {0}")]
    Interrupted(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown union '{0}'")]
    UnknownUnion(String),
    #[error("unknown person '{0}'")]
    UnknownPerson(String),
    #[error("union '{0}' already has two recorded partners")]
    UnionFull(String),
    #[error("person '{0}' already exists")]
    DuplicatePerson(String),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
