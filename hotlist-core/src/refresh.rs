use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::client::TrendingClient;
use crate::error::RefreshError;
use crate::model::{CacheSnapshot, TrendingItem};
use crate::normalize::normalize;
use crate::store::CacheStore;

/// What every caller of a refresh receives. The error side is `Arc`-shared
/// so all coalesced waiters get the leader's actual error.
pub type RefreshOutcome = Result<Vec<TrendingItem>, Arc<RefreshError>>;

/// Runs fetch → normalize → store cycles, at most one at a time.
///
/// A caller that arrives while a cycle is in flight does not start a second
/// upstream request; it waits for the running cycle and shares its outcome.
#[derive(Debug, Clone)]
pub struct Refresher {
    client: TrendingClient,
    store: CacheStore,
    in_flight: Arc<Mutex<Option<broadcast::Sender<RefreshOutcome>>>>,
}

impl Refresher {
    pub fn new(client: TrendingClient, store: CacheStore) -> Self {
        Self {
            client,
            store,
            in_flight: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        let mut rx = {
            let mut in_flight = self.in_flight.lock().await;
            match in_flight.as_ref() {
                Some(tx) => {
                    debug!("refresh already in flight, waiting for its outcome");
                    tx.subscribe()
                }
                None => {
                    let (tx, rx) = broadcast::channel(1);
                    *in_flight = Some(tx.clone());
                    let runner = self.clone();
                    // The cycle runs on its own task so a caller going away
                    // cannot abandon the waiters coalesced behind it.
                    tokio::spawn(async move {
                        let outcome = runner.run_cycle().await.map_err(Arc::new);
                        *runner.in_flight.lock().await = None;
                        if let Err(error) = &outcome {
                            warn!(%error, "refresh cycle failed");
                        }
                        let _ = tx.send(outcome);
                    });
                    rx
                }
            }
        };

        match rx.recv().await {
            Ok(outcome) => outcome,
            Err(_) => Err(Arc::new(RefreshError::Interrupted)),
        }
    }

    async fn run_cycle(&self) -> Result<Vec<TrendingItem>, RefreshError> {
        let raw = self.client.fetch().await?;
        let items = normalize(&raw)?;
        let snapshot = CacheSnapshot::new(items.clone());
        self.store.write(&snapshot).await?;
        info!(count = items.len(), "trending snapshot refreshed");
        Ok(items)
    }
}
