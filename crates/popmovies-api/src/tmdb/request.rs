//! Request URL construction for the TMDB endpoints.

use url::Url;

/// Query parameter carrying the API key.
const PARAM_API_KEY: &str = "api_key";
/// Query parameter carrying the sort order.
const PARAM_SORT_BY: &str = "sort_by";
/// Query parameter carrying the page number.
const PARAM_PAGE: &str = "page";

/// Builds the discover request URL.
///
/// - Empty or absent `sort_order` falls back to `default_sort_order`.
/// - `page <= 1` is sent as `"1"`.
///
/// `endpoint` is the full `.../discover/movie` URL; any query it already
/// carries is kept and the three parameters are appended after it.
#[must_use]
pub fn build_discover_url(
    endpoint: &Url,
    api_key: &str,
    sort_order: Option<&str>,
    page: i64,
    default_sort_order: &str,
) -> Url {
    let sort_order = match sort_order {
        Some(s) if !s.is_empty() => s,
        _ => default_sort_order,
    };
    let page_num = if page > 1 {
        page.to_string()
    } else {
        String::from("1")
    };

    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .append_pair(PARAM_API_KEY, api_key)
        .append_pair(PARAM_SORT_BY, sort_order)
        .append_pair(PARAM_PAGE, &page_num);
    url
}

/// Builds the single-movie request URL (`.../movie/{id}?api_key=...`).
///
/// `movie_base` must end with `/` so the ID lands as a new path segment.
#[must_use]
pub fn build_movie_url(movie_base: &Url, api_key: &str, movie_id: u64) -> Url {
    let mut url = movie_base.clone();
    let path = format!("{}{movie_id}", movie_base.path());
    url.set_path(&path);
    url.query_pairs_mut().append_pair(PARAM_API_KEY, api_key);
    url
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn endpoint() -> Url {
        Url::parse("https://api.themoviedb.org/3/discover/movie").unwrap()
    }

    fn query_value(url: &Url, key: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn test_build_discover_url_popularity() {
        // Arrange & Act
        let url = build_discover_url(
            &endpoint(),
            "abc123",
            Some("popularity.desc"),
            1,
            "vote_average.desc",
        );

        // Assert
        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/discover/movie?api_key=abc123&sort_by=popularity.desc&page=1"
        );
    }

    #[test]
    fn test_page_at_or_below_one_is_one() {
        // Arrange
        let pages = [1_i64, 0, -1, -100, i64::MIN];

        for page in pages {
            // Act
            let url = build_discover_url(&endpoint(), "k", Some("popularity.desc"), page, "d");

            // Assert
            assert_eq!(query_value(&url, "page").as_deref(), Some("1"), "page={page}");
        }
    }

    #[test]
    fn test_page_above_one_is_decimal() {
        // Arrange & Act
        let url = build_discover_url(&endpoint(), "k", Some("popularity.desc"), 42, "d");

        // Assert
        assert_eq!(query_value(&url, "page").as_deref(), Some("42"));
    }

    #[test]
    fn test_empty_sort_order_uses_default() {
        // Arrange & Act
        let url = build_discover_url(&endpoint(), "k", Some(""), 1, "vote_average.desc");

        // Assert
        assert_eq!(
            query_value(&url, "sort_by").as_deref(),
            Some("vote_average.desc")
        );
    }

    #[test]
    fn test_absent_sort_order_uses_default() {
        // Arrange & Act
        let url = build_discover_url(&endpoint(), "k", None, 1, "popularity.desc");

        // Assert
        assert_eq!(
            query_value(&url, "sort_by").as_deref(),
            Some("popularity.desc")
        );
    }

    #[test]
    fn test_api_key_is_encoded() {
        // Arrange & Act
        let url = build_discover_url(&endpoint(), "a b&c", Some("x"), 1, "d");

        // Assert
        assert_eq!(query_value(&url, "api_key").as_deref(), Some("a b&c"));
        assert!(!url.as_str().contains("a b&c"));
    }

    #[test]
    fn test_build_movie_url() {
        // Arrange
        let base = Url::parse("https://api.themoviedb.org/3/movie/").unwrap();

        // Act
        let url = build_movie_url(&base, "k", 550);

        // Assert
        assert_eq!(url.as_str(), "https://api.themoviedb.org/3/movie/550?api_key=k");
    }
}
