//! TMDB API client module.
//!
//! Builds `discover/movie` requests, fetches one page, and decodes it into
//! movie slots.

mod api;
mod client;
mod error;
mod parse;
mod request;
mod types;

pub use api::{LocalMovieCatalogApi, MovieCatalogApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_SORT_ORDER, TmdbClient, TmdbClientBuilder};
pub use error::{ElementParseError, FetchError, NetworkError};
pub use parse::{into_slots, parse_discover_body, parse_envelope, parse_results};
pub use request::{build_discover_url, build_movie_url};
#[allow(clippy::module_name_repetitions)]
pub use types::{DiscoverEnvelope, Movie, MovieSlot, TmdbErrorResponse};
