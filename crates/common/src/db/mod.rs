//! Data access layer for Rekayasa
//!
//! Provides:
//! - The `ContentStore` seam and its backends (PostgREST, Postgres, memory)
//! - Read-model entities
//! - The content repository with its degrade-to-empty contract

pub mod memory;
pub mod models;
pub mod postgres;
pub mod postgrest;
pub mod query;
mod repository;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use postgrest::PostgrestStore;
pub use query::{Collection, Direction, FilterValue, Query, Selection};
pub use repository::{ContentRepository, NewsFeed, StoreStatus};

use crate::config::{StoreBackend, StoreConfig};
use crate::errors::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// One row as returned by a store, always a JSON object
pub type Row = serde_json::Value;

/// Read-only access to the backing content store
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Execute a read and return matching rows in query order
    async fn fetch(&self, query: &Query) -> Result<Vec<Row>>;

    /// Check that the store is reachable
    async fn ping(&self) -> Result<()>;

    /// Short backend name for logs and metrics
    fn backend_name(&self) -> &'static str;
}

/// Build the configured store, or `None` when credentials are absent.
///
/// A missing configuration is not an error: the repository runs without a
/// store and serves empty results.
pub async fn connect_store(config: &StoreConfig) -> Result<Option<Arc<dyn ContentStore>>> {
    if !config.is_configured() {
        warn!(backend = ?config.backend, "Content store not configured, serving empty content");
        return Ok(None);
    }

    let store: Arc<dyn ContentStore> = match config.backend {
        StoreBackend::Postgrest => Arc::new(PostgrestStore::new(config)?),
        StoreBackend::Postgres => Arc::new(PostgresStore::connect(config).await?),
        StoreBackend::Memory => match config.fixtures_path.as_deref() {
            Some(path) => Arc::new(MemoryStore::from_fixtures(path)?),
            None => Arc::new(MemoryStore::new()),
        },
    };

    info!(backend = store.backend_name(), "Content store ready");
    Ok(Some(store))
}
