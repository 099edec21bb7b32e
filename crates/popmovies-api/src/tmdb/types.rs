//! TMDB API response types.

use serde::{Deserialize, Deserializer};

// --- Discover Movie ---

/// Envelope returned by the `discover/movie` endpoint.
///
/// `results` is kept as raw JSON so that each movie can be decoded on its
/// own; one bad entry must not fail the whole page.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverEnvelope {
    /// Current page number.
    pub page: i64,
    /// Total number of pages.
    pub total_pages: i64,
    /// Total number of results.
    pub total_results: i64,
    /// Raw movie objects, in server order.
    pub results: Vec<serde_json::Value>,
}

/// A single movie record.
///
/// Only `id` and `title` are required; the catalog omits or nulls the
/// rest often enough that they fall back to defaults. A JSON `null` is
/// treated the same as a missing field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Movie {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: Option<String>,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Release date (YYYY-MM-DD or null).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Vote average.
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_count: u32,
    /// Popularity score.
    #[serde(default, deserialize_with = "null_as_default")]
    pub popularity: f64,
    /// Genre IDs.
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre_ids: Vec<u32>,
    /// Adult flag.
    #[serde(default, deserialize_with = "null_as_default")]
    pub adult: bool,
    /// Video flag.
    #[serde(default, deserialize_with = "null_as_default")]
    pub video: bool,
}

/// Deserializes `null` as `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One position of a delivered page: a movie, or `None` where the entry
/// failed to parse.
pub type MovieSlot = Option<Movie>;

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[serde(default)]
    pub success: bool,
}
