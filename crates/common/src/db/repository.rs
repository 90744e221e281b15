//! Content repository
//!
//! Typed reads per content kind with fixed ordering and visibility rules.
//! Every operation degrades to an empty list or `None`: a missing store,
//! a failed read and an undecodable row are all logged here and never
//! reach the caller as errors.

use super::models::{
    decode_rows, Ebook, Konsep, Module, NewsArticle, Paper, PaperStatus, PaperSummary, SiteConfig,
};
use super::query::{Collection, Query};
use super::{ContentStore, Row};
use crate::metrics;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error};

/// Articles for the news page, read concurrently
#[derive(Debug, Clone, Default)]
pub struct NewsFeed {
    pub featured: Option<NewsArticle>,
    pub articles: Vec<NewsArticle>,
}

/// Store reachability as seen by readiness probes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreStatus {
    Up,
    Down { error: String },
    Unconfigured,
}

/// Read access to all content kinds
#[derive(Clone)]
pub struct ContentRepository {
    store: Option<Arc<dyn ContentStore>>,
    include_drafts: bool,
}

impl ContentRepository {
    /// Create a repository over an optional store.
    ///
    /// `include_drafts` decides whether draft papers appear in summary
    /// listings; production deployments pass `false`.
    pub fn new(store: Option<Arc<dyn ContentStore>>, include_drafts: bool) -> Self {
        Self {
            store,
            include_drafts,
        }
    }

    /// Repository with no backing store; every read is empty
    pub fn unconfigured() -> Self {
        Self::new(None, false)
    }

    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    pub fn include_drafts(&self) -> bool {
        self.include_drafts
    }

    pub fn backend_name(&self) -> Option<&'static str> {
        self.store.as_ref().map(|s| s.backend_name())
    }

    // ========================================================================
    // Read plumbing
    // ========================================================================

    async fn rows(&self, operation: &'static str, query: &Query) -> Option<Vec<Row>> {
        let Some(store) = &self.store else {
            debug!(
                operation,
                collection = %query.collection,
                "Content store not configured"
            );
            return None;
        };

        let start = Instant::now();
        let result = store.fetch(query).await;
        metrics::record_store_query(
            query.collection.as_str(),
            store.backend_name(),
            start.elapsed().as_secs_f64(),
            result.is_ok(),
        );

        match result {
            Ok(rows) => {
                debug!(
                    operation,
                    collection = %query.collection,
                    rows = rows.len(),
                    "Content store read"
                );
                Some(rows)
            }
            Err(e) => {
                error!(
                    operation,
                    collection = %query.collection,
                    backend = store.backend_name(),
                    error = %e,
                    "Content store read failed"
                );
                None
            }
        }
    }

    async fn list<T: DeserializeOwned>(&self, operation: &'static str, query: Query) -> Vec<T> {
        self.rows(operation, &query)
            .await
            .map(|rows| decode_rows(query.collection, rows))
            .unwrap_or_default()
    }

    async fn first<T: DeserializeOwned>(&self, operation: &'static str, query: Query) -> Option<T> {
        self.list(operation, query.limit(1)).await.into_iter().next()
    }

    /// First row in query order that decodes; undecodable rows ahead of it are skipped
    async fn first_decodable<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        query: Query,
    ) -> Option<T> {
        self.list(operation, query).await.into_iter().next()
    }

    // ========================================================================
    // Papers
    // ========================================================================

    /// All papers, newest year first
    pub async fn list_papers(&self) -> Vec<Paper> {
        self.list("list_papers", Query::from(Collection::Papers).order_desc("year"))
            .await
    }

    /// Paper summaries, newest first; drafts only outside production
    pub async fn list_paper_summaries(&self) -> Vec<PaperSummary> {
        let mut query = Query::from(Collection::Papers)
            .select(PaperSummary::COLUMNS)
            .order_desc("created_at");

        if !self.include_drafts {
            query = query.eq("status", PaperStatus::Published.as_str());
        }

        self.list("list_paper_summaries", query).await
    }

    pub async fn get_paper(&self, id: &str) -> Option<Paper> {
        self.first("get_paper", Query::from(Collection::Papers).eq("id", id))
            .await
    }

    // ========================================================================
    // Konsep, e-books, modules
    // ========================================================================

    pub async fn list_konsep(&self) -> Vec<Konsep> {
        self.list("list_konsep", Query::from(Collection::Konsep).order_desc("created_at"))
            .await
    }

    pub async fn list_ebooks(&self) -> Vec<Ebook> {
        self.list("list_ebooks", Query::from(Collection::Ebooks).order_desc("created_at"))
            .await
    }

    pub async fn list_modules(&self) -> Vec<Module> {
        self.list("list_modules", Query::from(Collection::Modules).order_desc("created_at"))
            .await
    }

    pub async fn get_konsep(&self, id: &str) -> Option<Konsep> {
        self.first("get_konsep", Query::from(Collection::Konsep).eq("id", id))
            .await
    }

    pub async fn get_ebook(&self, id: &str) -> Option<Ebook> {
        self.first("get_ebook", Query::from(Collection::Ebooks).eq("id", id))
            .await
    }

    pub async fn get_module(&self, id: &str) -> Option<Module> {
        self.first("get_module", Query::from(Collection::Modules).eq("id", id))
            .await
    }

    // ========================================================================
    // News
    // ========================================================================

    /// All articles, most recently published first
    pub async fn list_news(&self) -> Vec<NewsArticle> {
        self.list(
            "list_news",
            Query::from(Collection::NewsArticles).order_desc("published_at"),
        )
        .await
    }

    /// The hero article.
    ///
    /// Prefers a flagged article (latest `published_at` among several
    /// flagged ones); falls back to the latest article overall when none is
    /// flagged or the flagged lookup fails.
    pub async fn featured_news(&self) -> Option<NewsArticle> {
        let flagged = Query::from(Collection::NewsArticles)
            .eq("is_featured", true)
            .order_desc("published_at");

        if let Some(article) = self.first_decodable("featured_news", flagged).await {
            return Some(article);
        }

        debug!("No featured article flagged, falling back to most recent");

        self.first_decodable(
            "featured_news_fallback",
            Query::from(Collection::NewsArticles).order_desc("published_at"),
        )
        .await
    }

    /// List and featured reads issued concurrently
    pub async fn news_feed(&self) -> NewsFeed {
        let (articles, featured) = tokio::join!(self.list_news(), self.featured_news());
        NewsFeed { featured, articles }
    }

    pub async fn get_news_article(&self, id: &str) -> Option<NewsArticle> {
        self.first(
            "get_news_article",
            Query::from(Collection::NewsArticles).eq("id", id),
        )
        .await
    }

    // ========================================================================
    // Site config
    // ========================================================================

    /// Value for a config key; empty values count as absent
    pub async fn site_config(&self, key: &str) -> Option<String> {
        let query = Query::from(Collection::SiteConfig)
            .select(&["key", "value"])
            .eq("key", key);

        self.first::<SiteConfig>("site_config", query)
            .await
            .and_then(|row| row.value)
            .filter(|value| !value.is_empty())
    }

    // ========================================================================
    // Health
    // ========================================================================

    pub async fn ping(&self) -> StoreStatus {
        match &self.store {
            None => StoreStatus::Unconfigured,
            Some(store) => match store.ping().await {
                Ok(()) => StoreStatus::Up,
                Err(e) => StoreStatus::Down {
                    error: e.to_string(),
                },
            },
        }
    }
}
