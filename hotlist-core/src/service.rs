use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::model::CacheSnapshot;
use crate::refresh::{RefreshOutcome, Refresher};
use crate::store::CacheStore;

/// Query boundary over the cached trending list.
#[derive(Debug, Clone)]
pub struct TrendingService {
    refresher: Refresher,
    store: CacheStore,
    max_age: Option<Duration>,
    ready_tx: Arc<watch::Sender<bool>>,
    ready_rx: watch::Receiver<bool>,
}

impl TrendingService {
    /// `max_age` bounds how long a cached snapshot is served before
    /// `current` refreshes it; `None` serves it until an explicit refresh.
    pub fn new(refresher: Refresher, store: CacheStore, max_age: Option<Duration>) -> Self {
        let (ready_tx, ready_rx) = watch::channel(false);
        Self {
            refresher,
            store,
            max_age,
            ready_tx: Arc::new(ready_tx),
            ready_rx,
        }
    }

    /// Current trending list. Serves the cached snapshot when one exists
    /// and is fresh enough; otherwise runs a refresh and returns its
    /// outcome, so the first caller on an empty cache still gets data.
    pub async fn current(&self) -> RefreshOutcome {
        if let Some(snapshot) = self.store.read().await {
            if self.is_fresh(&snapshot) {
                return Ok(snapshot.items);
            }
            debug!("cached snapshot is stale, refreshing");
        }
        self.refresher.refresh().await
    }

    /// Always runs a refresh cycle, bypassing any cached snapshot.
    pub async fn force_refresh(&self) -> RefreshOutcome {
        self.refresher.refresh().await
    }

    fn is_fresh(&self, snapshot: &CacheSnapshot) -> bool {
        match self.max_age {
            None => true,
            Some(max_age) => snapshot.age().map_or(false, |age| age <= max_age),
        }
    }

    /// Runs the initial refresh in the background and flips the readiness
    /// signal once it completes. A failed first fetch leaves the service
    /// running; the next query retries because the cache is still empty.
    pub fn spawn_startup_refresh(&self) -> JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            match service.refresher.refresh().await {
                Ok(items) => info!(count = items.len(), "startup refresh complete"),
                Err(error) => warn!(%error, "startup refresh failed"),
            }
            let _ = service.ready_tx.send(true);
        })
    }

    /// True once the startup refresh has completed, successfully or not.
    pub fn is_ready(&self) -> bool {
        *self.ready_rx.borrow()
    }

    /// Watch end of the readiness signal, for callers that want to await it.
    pub fn ready_signal(&self) -> watch::Receiver<bool> {
        self.ready_rx.clone()
    }
}
