// src/error.rs
//
// Failure taxonomy shared by both sources. Network trouble, a body of the
// wrong shape, and a well-formed but empty answer stay distinguishable all
// the way up to the presentation layer.

use thiserror::Error;

use crate::core::net::TransportError;

#[derive(Debug, Error)]
pub enum SourceError {
    /// Network failure, timeout, non-2xx, or a page missing its session state.
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    /// The body did not parse as the expected HTML/JSON shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Valid page, but no table wide enough to be the data table.
    #[error("no data table found")]
    NoTableFound,

    /// Valid JSON, but no records to work with.
    #[error("no data: {0}")]
    NoData(String),

    /// Stricter table selection found more than one candidate.
    #[error("ambiguous table: {candidates} tables qualify")]
    AmbiguousTable { candidates: usize },
}

/// Coarse class of a failure, for callers that only branch on the kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Unavailable,
    Malformed,
    Empty,
    Ambiguous,
}

impl SourceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SourceError::SourceUnavailable(_) => ErrorKind::Unavailable,
            SourceError::MalformedResponse(_) => ErrorKind::Malformed,
            SourceError::NoTableFound | SourceError::NoData(_) => ErrorKind::Empty,
            SourceError::AmbiguousTable { .. } => ErrorKind::Ambiguous,
        }
    }
}

impl From<TransportError> for SourceError {
    fn from(e: TransportError) -> Self {
        SourceError::SourceUnavailable(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;
