//! Discover response decoding.

use super::error::{ElementParseError, FetchError};
use super::types::{DiscoverEnvelope, Movie, MovieSlot};

/// Decodes a raw response body into the discover envelope.
///
/// # Errors
///
/// - `FetchError::EmptyResponse` if `body` has zero length.
/// - `FetchError::MalformedEnvelope` if the body is not a JSON object with
///   `results`, `total_pages`, `total_results` and `page`.
pub fn parse_envelope(body: &[u8]) -> Result<DiscoverEnvelope, FetchError> {
    if body.is_empty() {
        return Err(FetchError::EmptyResponse);
    }
    let envelope: DiscoverEnvelope =
        serde_json::from_slice(body).map_err(FetchError::MalformedEnvelope)?;
    tracing::info!(
        page = envelope.page,
        total_results = envelope.total_results,
        total_pages = envelope.total_pages,
        count = envelope.results.len(),
        "parsed discover envelope"
    );
    Ok(envelope)
}

/// Decodes every raw result on its own, keeping order and length.
#[must_use]
pub fn parse_results(raw: Vec<serde_json::Value>) -> Vec<Result<Movie, ElementParseError>> {
    raw.into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value::<Movie>(value)
                .map_err(|source| ElementParseError { index, source })
        })
        .collect()
}

/// Turns per-movie results into slots, logging each failure with its index.
#[must_use]
pub fn into_slots(parsed: Vec<Result<Movie, ElementParseError>>) -> Vec<MovieSlot> {
    parsed
        .into_iter()
        .map(|result| match result {
            Ok(movie) => Some(movie),
            Err(e) => {
                tracing::warn!(index = e.index, error = %e.source, "invalid JSON for movie");
                None
            }
        })
        .collect()
}

/// Decodes a full discover body into an ordered page of slots.
///
/// # Errors
///
/// Returns the terminal errors of [`parse_envelope`]. Failures of single
/// movies are not errors; they become `None` at their position.
pub fn parse_discover_body(body: &[u8]) -> Result<Vec<MovieSlot>, FetchError> {
    let envelope = parse_envelope(body)?;
    Ok(into_slots(parse_results(envelope.results)))
}
