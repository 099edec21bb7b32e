//! `TmdbClient` - TMDB discover client implementation.

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::MovieCatalogApi;
use super::error::{FetchError, NetworkError};
use super::parse::parse_discover_body;
use super::request::{build_discover_url, build_movie_url};
use super::types::{Movie, MovieSlot, TmdbErrorResponse};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Sort order used when the caller passes an empty one.
pub const DEFAULT_SORT_ORDER: &str = "popularity.desc";

/// Discover requests always ask for the first page.
const DISCOVER_PAGE: i64 = 1;

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Full `discover/movie` endpoint.
    discover_url: Url,
    /// Prefix for single-movie lookups (`.../movie/`).
    movie_base_url: Url,
    /// API key sent as the `api_key` query parameter.
    api_key: String,
    /// Fallback for empty sort orders.
    default_sort_order: String,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
    default_sort_order: Option<String>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
            default_sort_order: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the fallback sort order (default: `popularity.desc`).
    #[must_use]
    pub fn default_sort_order(mut self, sort_order: impl Into<String>) -> Self {
        self.default_sort_order = Some(sort_order.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set or empty.
    /// - `user_agent` is not set.
    /// - the base URL cannot carry path segments.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_key = self.api_key.context("api_key is required")?;
        anyhow::ensure!(!api_key.is_empty(), "api_key must not be empty");
        let user_agent = self.user_agent.context("user_agent is required")?;

        let mut base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };
        anyhow::ensure!(
            !base_url.cannot_be_a_base(),
            "base URL cannot be a base: {base_url}"
        );
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let discover_url = base_url
            .join("discover/movie")
            .context("failed to join discover endpoint")?;
        let movie_base_url = base_url
            .join("movie/")
            .context("failed to join movie endpoint")?;

        let default_sort_order = self
            .default_sort_order
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| String::from(DEFAULT_SORT_ORDER));

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            discover_url,
            movie_base_url,
            api_key,
            default_sort_order,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Returns the fallback sort order.
    #[must_use]
    pub fn default_sort_order(&self) -> &str {
        &self.default_sort_order
    }

    /// Sends a GET request and reads the whole body.
    ///
    /// Any status outside the 2xx class is a `NetworkFailure`. The response
    /// and its connection are owned by this call and dropped on every
    /// return path.
    #[instrument(skip_all, fields(path = %url.path()))]
    async fn get_body(&self, url: Url) -> Result<Vec<u8>, FetchError> {
        tracing::debug!("TMDB API request");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::NetworkFailure(e.into()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            if let Ok(error_response) = serde_json::from_str::<TmdbErrorResponse>(&body) {
                tracing::error!(
                    %status,
                    code = error_response.status_code,
                    message = %error_response.status_message,
                    "TMDB API error"
                );
            } else {
                tracing::error!(%status, %body, "TMDB API error");
            }
            return Err(FetchError::NetworkFailure(NetworkError::Status(status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::NetworkFailure(e.into()))?;
        Ok(Vec::from(body))
    }
}

impl MovieCatalogApi for TmdbClient {
    #[instrument(skip_all)]
    async fn discover_movies(
        &self,
        sort_order: Option<&str>,
    ) -> Result<Vec<MovieSlot>, FetchError> {
        let Some(sort_order) = sort_order else {
            return Err(FetchError::NoInput);
        };
        tracing::info!(sort_order, "fetching discover listing");

        let url = build_discover_url(
            &self.discover_url,
            &self.api_key,
            Some(sort_order),
            DISCOVER_PAGE,
            &self.default_sort_order,
        );
        let body = self.get_body(url).await?;
        parse_discover_body(&body)
    }

    #[instrument(skip_all)]
    async fn movie_details(&self, movie_id: u64) -> Result<Movie, FetchError> {
        tracing::info!(movie_id, "fetching movie details");

        let url = build_movie_url(&self.movie_base_url, &self.api_key, movie_id);
        let body = self.get_body(url).await?;
        if body.is_empty() {
            return Err(FetchError::EmptyResponse);
        }
        serde_json::from_slice(&body).map_err(FetchError::MalformedEnvelope)
    }
}
