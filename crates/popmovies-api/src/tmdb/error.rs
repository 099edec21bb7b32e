//! Fetch error taxonomy.

use thiserror::Error;

/// Terminal failure of a single fetch.
///
/// Every variant ends the fetch without a partial result.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No sort order was supplied, so no request was made.
    #[error("no sort order supplied")]
    NoInput,

    /// Connection, transport or non-2xx status failure.
    #[error("network failure: {0}")]
    NetworkFailure(#[source] NetworkError),

    /// The server answered with a zero-length body.
    #[error("empty response body")]
    EmptyResponse,

    /// Body is not JSON or misses required top-level fields.
    #[error("malformed response envelope: {0}")]
    MalformedEnvelope(#[source] serde_json::Error),
}

/// Cause of a `FetchError::NetworkFailure`.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Connection or body transfer failed.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status outside the 2xx class.
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),
}

/// A single movie in an otherwise valid page failed to decode.
///
/// Recovered locally; the movie is replaced by an absent slot.
#[derive(Debug, Error)]
#[error("invalid JSON for movie at position {index}: {source}")]
pub struct ElementParseError {
    /// Position of the entry in the `results` array.
    pub index: usize,
    /// Decoder error.
    #[source]
    pub source: serde_json::Error,
}
