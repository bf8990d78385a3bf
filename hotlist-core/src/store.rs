use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::CacheError;
use crate::model::CacheSnapshot;

/// Holder of the most recent snapshot. Cheap to clone; clones share state.
///
/// The durable copy is a single JSON document. Writes land in `<file>.tmp`
/// first and are published with a rename, so readers never observe a partial
/// snapshot; loading falls back to the temp file when the main one is
/// corrupt.
#[derive(Debug, Clone)]
pub struct CacheStore {
    inner: Arc<RwLock<Option<CacheSnapshot>>>,
    path: Option<PathBuf>,
}

impl CacheStore {
    /// Store without a backing file. State lives only in memory.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
            path: None,
        }
    }

    /// Opens a store backed by `path`, loading any snapshot a previous run
    /// left behind. A missing file is an empty store, not an error.
    pub async fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let initial = load_snapshot(&path).await;
        Self {
            inner: Arc::new(RwLock::new(initial)),
            path: Some(path),
        }
    }

    /// Current snapshot, or `None` when no refresh has ever succeeded.
    pub async fn read(&self) -> Option<CacheSnapshot> {
        self.inner.read().await.clone()
    }

    /// Replaces the snapshot in full. The durable copy is written before
    /// the in-memory one is swapped, so a disk failure leaves both the old
    /// file and the old in-memory value untouched.
    pub async fn write(&self, snapshot: &CacheSnapshot) -> Result<(), CacheError> {
        if let Some(path) = &self.path {
            persist_snapshot(path, snapshot).await?;
        }
        let mut inner = self.inner.write().await;
        *inner = Some(snapshot.clone());
        Ok(())
    }
}

async fn persist_snapshot(path: &Path, snapshot: &CacheSnapshot) -> Result<(), CacheError> {
    let bytes = serde_json::to_vec_pretty(snapshot)?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, &bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

async fn load_snapshot(path: &Path) -> Option<CacheSnapshot> {
    match tokio::fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(snapshot) => Some(snapshot),
            Err(error) => {
                warn!(error = %error, path = %path.display(), "snapshot file is corrupt, trying tmp fallback");
                let tmp = path.with_extension("json.tmp");
                match tokio::fs::read(&tmp).await {
                    Ok(tmp_bytes) => serde_json::from_slice(&tmp_bytes).ok(),
                    Err(_) => None,
                }
            }
        },
        Err(_) => {
            debug!(path = %path.display(), "no snapshot file yet");
            None
        }
    }
}
