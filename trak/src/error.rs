/**
 * Error type shared by every operation of the SDK.
 *
 * Each variant identifies one failure kind. Argument problems are always
 * reported before any network I/O happens, so a `Validation` or
 * `NoDistinctId` error guarantees nothing was sent.
 */
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The client could not be configured (e.g. no API key available).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A required argument was missing or had the wrong shape.
    #[error("invalid argument: {0}")]
    Validation(&'static str),

    /// `track` / `page_view` could not resolve a distinct id.
    #[error("No distinct_id is set. Use 'identify' or 'alias' to set the current session distinct_id")]
    NoDistinctId,

    /// The free functions were used before `trak::init`.
    #[error("trak is not initialized; call trak::init first")]
    NotInitialized,

    /// The request body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The HTTP request failed before a response was received.
    #[error("request failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The response body was not valid JSON.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl Error {
    /// True for argument errors detected before any I/O.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        Error::Transport(Box::new(err))
    }
}
