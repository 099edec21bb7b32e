//! Text grid standing in for the display layer.

use popmovies_api::consumer::MovieConsumer;
use popmovies_api::tmdb::MovieSlot;

/// Header row of the rendered grid.
const HEADER: &str = "#\tID\tRating\tReleaseDate\tTitle";

/// Holds the most recently delivered page and renders it as rows.
#[derive(Debug, Default)]
pub struct MovieGrid {
    /// Current page, including absent slots.
    movies: Vec<MovieSlot>,
}

impl MovieGrid {
    /// Creates an empty grid.
    #[must_use]
    pub const fn new() -> Self {
        Self { movies: Vec::new() }
    }

    /// Number of slots that hold a movie.
    #[must_use]
    pub fn available(&self) -> usize {
        self.movies.iter().filter(|m| m.is_some()).count()
    }

    /// Total number of slots, absent ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// Whether the grid holds no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Renders the header followed by one row per slot.
    ///
    /// Absent slots keep their position and show `-`.
    #[must_use]
    pub fn render(&self) -> Vec<String> {
        let mut rows = Vec::with_capacity(self.movies.len().saturating_add(1));
        rows.push(String::from(HEADER));
        for (i, slot) in self.movies.iter().enumerate() {
            let pos = i.saturating_add(1);
            let row = match slot {
                Some(movie) => format!(
                    "{pos}\t{}\t{:.1}\t{}\t{}",
                    movie.id,
                    movie.vote_average,
                    movie.release_date.as_deref().unwrap_or("-"),
                    movie.title,
                ),
                None => format!("{pos}\t-\t-\t-\t-"),
            };
            rows.push(row);
        }
        rows
    }
}

impl MovieConsumer for MovieGrid {
    fn update_results(&mut self, movies: Vec<MovieSlot>) {
        tracing::debug!(count = movies.len(), "grid updated");
        self.movies = movies;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use popmovies_api::tmdb::Movie;

    use super::*;

    fn make_movie(id: u64, title: &str, release: Option<&str>, vote: f64) -> Movie {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": title,
            "release_date": release,
            "vote_average": vote,
        }))
        .unwrap()
    }

    #[test]
    fn test_new_grid_is_empty() {
        // Arrange & Act
        let grid = MovieGrid::new();

        // Assert
        assert_eq!(grid.len(), 0);
        assert_eq!(grid.render(), vec![String::from(HEADER)]);
    }

    #[test]
    fn test_render_keeps_absent_positions() {
        // Arrange
        let mut grid = MovieGrid::new();

        // Act
        grid.update_results(vec![
            Some(make_movie(550, "Fight Club", Some("1999-10-15"), 8.433)),
            None,
            Some(make_movie(13, "Forrest Gump", None, 8.5)),
        ]);
        let rows = grid.render();

        // Assert
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1], "1\t550\t8.4\t1999-10-15\tFight Club");
        assert_eq!(rows[2], "2\t-\t-\t-\t-");
        assert_eq!(rows[3], "3\t13\t8.5\t-\tForrest Gump");
        assert_eq!(grid.available(), 2);
        assert_eq!(grid.len(), 3);
    }

    #[test]
    fn test_update_replaces_previous_page() {
        // Arrange
        let mut grid = MovieGrid::new();
        grid.update_results(vec![None, None]);

        // Act
        grid.update_results(vec![Some(make_movie(1, "A", None, 0.0))]);

        // Assert
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.available(), 1);
    }
}
