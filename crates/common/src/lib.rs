//! Rekayasa Common Library
//!
//! Shared code for the Rekayasa content service including:
//! - Content store backends and the content repository
//! - Listing engine (filter, search, sort, paginate)
//! - Stale-fetch guard and outbound link resolution
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability

pub mod config;
pub mod db;
pub mod errors;
pub mod fetch;
pub mod listing;
pub mod metrics;
pub mod outbound;

// Re-export commonly used types
pub use config::AppConfig;
pub use db::{ContentRepository, ContentStore, NewsFeed, StoreStatus};
pub use errors::{AppError, Result};
pub use fetch::FetchGuard;
pub use listing::{ListingPage, ListingParams, SortKey};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
