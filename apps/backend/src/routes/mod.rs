//! HTTP handlers

pub mod cards;
pub mod decks;
pub mod study;

use crate::error::{ApiError, Result};

/// Run a synchronous repository call on the blocking pool.
///
/// Store I/O and per-deck lock waits must not park the async workers.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("blocking task failed: {}", e)))?
}
