//! Item source error types.
//!
//! These error types represent failures when loading practice items. They
//! live in `vocaquiz-core` so the session engine and the shell can downcast
//! and classify failures without string matching.

use thiserror::Error;

/// Errors that can occur when fetching items or tags from a source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The access token was missing, expired, or rejected.
    #[error("not authorized: {0}")]
    Unauthorized(String),

    /// The requested resource (tag, deck) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl SourceError {
    /// Returns `true` if retrying the same request cannot succeed.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            SourceError::Unauthorized(_) | SourceError::NotFound(_)
        )
    }
}

/// A fetched item set that breaks the practice item invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemSetError {
    /// An item has an empty identifier.
    #[error("item at position {0} has an empty id")]
    EmptyId(usize),

    /// Both the front and the back of an item are empty.
    #[error("item '{0}' has neither a word nor a translation")]
    EmptySides(String),

    /// Two items share an identifier.
    #[error("duplicate item id: {0}")]
    DuplicateId(String),
}
