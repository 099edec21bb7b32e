//! Display-layer seam.

use crate::tmdb::MovieSlot;

/// Receives a fetched page of movies.
///
/// Called once per successful fetch, on the task that awaited it. Slots
/// that are `None` mark movies that failed to parse.
pub trait MovieConsumer {
    /// Replaces the displayed results with `movies`.
    fn update_results(&mut self, movies: Vec<MovieSlot>);
}
