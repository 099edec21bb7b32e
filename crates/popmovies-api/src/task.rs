//! Background discover task.
//!
//! Runs exactly one fetch on the tokio runtime, off the caller's task, and
//! hands the single result back to whoever awaits it. `DiscoverSession`
//! tracks the fetch as a `FetchState` for hosts that display progress.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::instrument;

use crate::consumer::MovieConsumer;
use crate::tmdb::{FetchError, MovieCatalogApi, MovieSlot};

/// Lifecycle of a discover fetch.
///
/// `Idle -> Fetching -> {Delivered | DeliveredEmpty}`; both delivered
/// states are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchState {
    /// No fetch has been started.
    #[default]
    Idle,
    /// A fetch is in flight.
    Fetching,
    /// The consumer received a collection of this many slots.
    Delivered(usize),
    /// The fetch failed; the consumer was not called.
    DeliveredEmpty,
}

impl FetchState {
    /// Returns `true` once the fetch has finished either way.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered(_) | Self::DeliveredEmpty)
    }
}

/// One in-flight discover fetch.
#[derive(Debug)]
pub struct DiscoverTask {
    /// Spawned pipeline run.
    handle: JoinHandle<Result<Vec<MovieSlot>, FetchError>>,
}

impl DiscoverTask {
    /// Spawns a discover fetch for `sort_order` on the current runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn<A>(api: Arc<A>, sort_order: Option<String>) -> Self
    where
        A: MovieCatalogApi + Send + Sync + 'static,
    {
        let handle =
            tokio::spawn(async move { api.discover_movies(sort_order.as_deref()).await });
        Self { handle }
    }

    /// Waits for the fetch and collapses every failure into `None`.
    ///
    /// The cause is logged; callers only see "no data".
    #[instrument(skip_all)]
    pub async fn outcome(self) -> Option<Vec<MovieSlot>> {
        match self.handle.await {
            Ok(Ok(movies)) => Some(movies),
            Ok(Err(FetchError::NoInput)) => {
                tracing::warn!("no sort order supplied, nothing fetched");
                None
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, "discover fetch failed");
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "discover task did not complete");
                None
            }
        }
    }

    /// Waits for the fetch and notifies `consumer` once if a collection
    /// exists. Returns the terminal state.
    pub async fn deliver_to<C>(self, consumer: &mut C) -> FetchState
    where
        C: MovieConsumer + ?Sized,
    {
        match self.outcome().await {
            Some(movies) => {
                let count = movies.len();
                consumer.update_results(movies);
                FetchState::Delivered(count)
            }
            None => FetchState::DeliveredEmpty,
        }
    }
}

/// Host-side handle that owns at most one fetch and reports its state.
#[derive(Debug, Default)]
pub struct DiscoverSession {
    /// Current lifecycle state.
    state: FetchState,
    /// Running fetch while `state` is `Fetching`.
    task: Option<DiscoverTask>,
}

impl DiscoverSession {
    /// Creates an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> FetchState {
        self.state
    }

    /// Starts the fetch. Only an idle session starts one; returns `false`
    /// and does nothing otherwise.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn start<A>(&mut self, api: Arc<A>, sort_order: Option<String>) -> bool
    where
        A: MovieCatalogApi + Send + Sync + 'static,
    {
        if self.state != FetchState::Idle {
            return false;
        }
        self.task = Some(DiscoverTask::spawn(api, sort_order));
        self.state = FetchState::Fetching;
        true
    }

    /// Waits for the running fetch, delivers it to `consumer` and returns
    /// the terminal state. Without a running fetch the current state is
    /// returned unchanged.
    pub async fn finish<C>(&mut self, consumer: &mut C) -> FetchState
    where
        C: MovieConsumer + ?Sized,
    {
        if let Some(task) = self.task.take() {
            self.state = task.deliver_to(consumer).await;
        }
        self.state
    }
}
