//! API client library for popmovies.
//!
//! Fetches a page of movies from the TMDB discover endpoint, parses it
//! with per-movie failure isolation, and hands the result to a consumer.

/// Display-layer seam.
pub mod consumer;

/// Background fetch task and result hand-back.
pub mod task;

/// TMDB API client.
pub mod tmdb;
