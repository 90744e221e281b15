//! PostgREST backend
//!
//! Talks to a hosted Supabase-style REST endpoint with the project's
//! public anon key. Only reads are issued.

use super::query::{Collection, Query, Selection};
use super::{ContentStore, Row};
use crate::config::StoreConfig;
use crate::errors::{AppError, Result};
use async_trait::async_trait;
use reqwest::StatusCode;

/// REST client for `{url}/rest/v1/{collection}`
pub struct PostgrestStore {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl PostgrestStore {
    /// Create a client from store configuration
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let url = config.url.as_deref().ok_or_else(|| AppError::Configuration {
            message: "store.url is required for the postgrest backend".to_string(),
        })?;
        let anon_key = config.anon_key.clone().ok_or_else(|| AppError::Configuration {
            message: "store.anon_key is required for the postgrest backend".to_string(),
        })?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }

    fn endpoint(&self, collection: Collection) -> String {
        format!("{}/rest/v1/{}", self.base_url, collection.as_str())
    }

    /// Render a query as PostgREST query-string parameters
    pub fn params(query: &Query) -> Vec<(String, String)> {
        let select = match &query.selection {
            Selection::All => "*".to_string(),
            Selection::Columns(cols) => cols.join(","),
        };

        let mut params = vec![("select".to_string(), select)];

        for filter in &query.filters {
            params.push((filter.field.to_string(), format!("eq.{}", filter.value)));
        }

        if let Some(order) = &query.order {
            params.push((
                "order".to_string(),
                format!("{}.{}.nullslast", order.field, order.direction.as_str()),
            ));
        }

        if let Some(limit) = query.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        params
    }

    /// A 503 means the store itself is down; anything else is a bad upstream reply
    fn status_error(status: StatusCode, body: String) -> AppError {
        if status == StatusCode::SERVICE_UNAVAILABLE {
            AppError::ServiceUnavailable { message: body }
        } else {
            AppError::Upstream {
                status: status.as_u16(),
                message: body,
            }
        }
    }
}

#[async_trait]
impl ContentStore for PostgrestStore {
    async fn fetch(&self, query: &Query) -> Result<Vec<Row>> {
        query.validate()?;

        let response = self
            .client
            .get(self.endpoint(query.collection))
            .query(&Self::params(query))
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Self::status_error(status, body));
        }

        let rows: Vec<Row> = response.json().await?;
        Ok(rows)
    }

    async fn ping(&self) -> Result<()> {
        let probe = Query::from(Collection::SiteConfig).select(&["key"]).limit(1);
        self.fetch(&probe).await.map(|_| ())
    }

    fn backend_name(&self) -> &'static str {
        "postgrest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_params_for_gated_summaries() {
        let query = Query::from(Collection::Papers)
            .select(&["id", "title", "status"])
            .eq("status", "published")
            .order_desc("created_at");

        let params = PostgrestStore::params(&query);
        assert_eq!(lookup(&params, "select"), Some("id,title,status"));
        assert_eq!(lookup(&params, "status"), Some("eq.published"));
        assert_eq!(lookup(&params, "order"), Some("created_at.desc.nullslast"));
        assert_eq!(lookup(&params, "limit"), None);
    }

    #[test]
    fn test_params_for_featured_lookup() {
        let query = Query::from(Collection::NewsArticles)
            .eq("is_featured", true)
            .order_desc("published_at")
            .limit(1);

        let params = PostgrestStore::params(&query);
        assert_eq!(lookup(&params, "select"), Some("*"));
        assert_eq!(lookup(&params, "is_featured"), Some("eq.true"));
        assert_eq!(lookup(&params, "limit"), Some("1"));
    }

    #[test]
    fn test_new_requires_credentials() {
        let config = StoreConfig::default();
        assert!(matches!(
            PostgrestStore::new(&config),
            Err(AppError::Configuration { .. })
        ));

        let config = StoreConfig {
            url: Some("https://demo.supabase.co/".into()),
            anon_key: Some("anon".into()),
            ..StoreConfig::default()
        };
        let store = PostgrestStore::new(&config).unwrap();
        assert_eq!(
            store.endpoint(Collection::NewsArticles),
            "https://demo.supabase.co/rest/v1/news_articles"
        );
    }

    #[test]
    fn test_unavailable_store_is_distinguished() {
        let err = PostgrestStore::status_error(StatusCode::SERVICE_UNAVAILABLE, "paused".into());
        assert!(matches!(err, AppError::ServiceUnavailable { .. }));

        let err = PostgrestStore::status_error(StatusCode::BAD_REQUEST, "bad column".into());
        assert!(matches!(err, AppError::Upstream { status: 400, .. }));
    }
}
