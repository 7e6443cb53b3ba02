use crate::document::DocumentId;
use sidedoc_chunker::ChunkerError;
use thiserror::Error;

/// Result type for alignment and session operations
pub type Result<T> = std::result::Result<T, AlignError>;

/// Errors that can occur while building or driving a side-by-side session
#[derive(Error, Debug)]
pub enum AlignError {
    /// Chunking failed (malformed provider spans, parse errors, ...)
    #[error(transparent)]
    Chunker(#[from] ChunkerError),

    /// A session is already displayed for this document
    #[error("Session already active for document {0}")]
    SessionAlreadyActive(DocumentId),

    /// The document does not belong to the session it was handed to
    #[error("Document {0} is not owned by this session")]
    UnknownDocument(DocumentId),

    /// The session cannot perform the requested transition
    #[error("Invalid session transition: {0}")]
    InvalidState(String),

    /// The layout collaborator failed
    #[error("Layout error: {0}")]
    Layout(String),
}

impl AlignError {
    /// Create a layout error
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Create an invalid transition error
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }
}
