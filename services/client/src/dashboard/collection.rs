//! services/client/src/dashboard/collection.rs
//!
//! A locally held copy of one remote resource list. The collection is only
//! ever replaced wholesale by a refetch; it is never patched in place.

use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, error};
use tutorials_core::domain::{Transcript, Tutorial};
use tutorials_core::ports::PortResult;

/// Resources listed newest first by this timestamp.
pub trait Recency {
    fn recency(&self) -> DateTime<Utc>;
}

impl Recency for Transcript {
    fn recency(&self) -> DateTime<Utc> {
        Transcript::recency(self)
    }
}

impl Recency for Tutorial {
    fn recency(&self) -> DateTime<Utc> {
        Tutorial::recency(self)
    }
}

pub fn sort_newest_first<T: Recency>(items: &mut [T]) {
    items.sort_by(|a, b| b.recency().cmp(&a.recency()));
}

#[derive(Debug)]
struct CollectionState<T> {
    items: Vec<T>,
    loading: bool,
    /// Ticket of the most recently started fetch.
    latest: u64,
}

/// Shared handle; clones observe the same items.
pub struct Collection<T> {
    label: &'static str,
    state: Arc<RwLock<CollectionState<T>>>,
    mounted: Arc<OnceCell<()>>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            state: Arc::clone(&self.state),
            mounted: Arc::clone(&self.mounted),
        }
    }
}

impl<T: Recency + Clone + Send + Sync> Collection<T> {
    /// An empty collection that reports `loading` until its first fetch lands.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            state: Arc::new(RwLock::new(CollectionState {
                items: Vec::new(),
                loading: true,
                latest: 0,
            })),
            mounted: Arc::new(OnceCell::new()),
        }
    }

    pub async fn items(&self) -> Vec<T> {
        self.state.read().await.items.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn find<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.state
            .read()
            .await
            .items
            .iter()
            .find(|item| predicate(item))
            .cloned()
    }

    /// Fetches the full list, sorts it and replaces the held items.
    ///
    /// On failure the previous items stay available and the error is only
    /// logged. Only the most recently started fetch may apply its result and
    /// clear the loading flag; a slower, older one that lands afterwards is
    /// dropped. Returns whether the items were replaced.
    pub async fn refetch_with<F, Fut>(&self, fetch: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = PortResult<Vec<T>>>,
    {
        let ticket = {
            let mut state = self.state.write().await;
            state.latest += 1;
            state.loading = true;
            state.latest
        };
        let result = fetch().await;

        let mut state = self.state.write().await;
        if ticket != state.latest {
            debug!(collection = self.label, ticket, "Discarding superseded fetch");
            return false;
        }
        state.loading = false;
        match result {
            Ok(mut items) => {
                sort_newest_first(&mut items);
                debug!(collection = self.label, count = items.len(), "Collection refreshed");
                state.items = items;
                true
            }
            Err(e) => {
                error!(collection = self.label, "Failed to fetch: {}", e);
                false
            }
        }
    }

    /// Runs the first refetch; later calls are no-ops.
    pub async fn mount_with<F, Fut>(&self, fetch: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = PortResult<Vec<T>>>,
    {
        self.mounted
            .get_or_init(|| async {
                self.refetch_with(fetch).await;
            })
            .await;
    }
}
