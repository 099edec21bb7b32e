//! `MovieCatalogApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::FetchError;
use super::types::{Movie, MovieSlot};

/// Movie catalog API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[trait_variant::make(MovieCatalogApi: Send)]
pub trait LocalMovieCatalogApi {
    /// Fetches page 1 of the discover listing for `sort_order`.
    ///
    /// The returned collection has one slot per raw result, with `None`
    /// where a single movie failed to decode.
    ///
    /// # Errors
    ///
    /// - `FetchError::NoInput` if `sort_order` is `None`.
    /// - `FetchError::NetworkFailure` on transport errors or non-2xx status.
    /// - `FetchError::EmptyResponse` if the body is empty.
    /// - `FetchError::MalformedEnvelope` if the envelope cannot be decoded.
    async fn discover_movies(
        &self,
        sort_order: Option<&str>,
    ) -> Result<Vec<MovieSlot>, FetchError>;

    /// Fetches a single movie by ID.
    ///
    /// # Errors
    ///
    /// Same transport and decoding errors as `discover_movies`; a body that
    /// is not a movie object is `FetchError::MalformedEnvelope`.
    async fn movie_details(&self, movie_id: u64) -> Result<Movie, FetchError>;
}
