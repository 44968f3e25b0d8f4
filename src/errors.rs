use std::io;

use thiserror::Error;

use crate::types::SourceId;

/// Error type for catalog queries, record sources, and report output.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The query needs records (or metric values) that the collection lacks.
    #[error("no data: {0}")]
    NoData(String),
    /// The source could not be reached or read.
    #[error("video source '{source_id}' is unavailable: {reason}")]
    SourceUnavailable {
        /// Failing source.
        source_id: SourceId,
        /// Underlying cause.
        reason: String,
    },
    #[error("video source '{source_id}' returned a malformed record: {details}")]
    /// The source produced a document that is not a valid video record.
    SourceInconsistent {
        /// Failing source.
        source_id: SourceId,
        /// Location and parse error.
        details: String,
    },
    /// Invalid query or runner parameters.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Output or filesystem failure.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// JSON encoding failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
