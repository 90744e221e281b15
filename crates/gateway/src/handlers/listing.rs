//! Listing query parameters shared by every listing endpoint

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use rekayasa_common::{
    errors::Result,
    listing::{self, Listable, ListingParams, SortKey},
    metrics,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Raw listing query string.
///
/// Selections are comma-separated: `?categories=LLM,Vision`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListingQuery {
    #[validate(length(max = 200))]
    pub q: Option<String>,

    pub categories: Option<String>,

    pub levels: Option<String>,

    pub sort: Option<String>,

    pub offset: Option<usize>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<usize>,
}

impl ListingQuery {
    pub fn into_params(self) -> Result<ListingParams> {
        self.validate()?;

        let sort = SortKey::parse(self.sort.as_deref().unwrap_or_default())?;

        let mut params = ListingParams::new()
            .search(self.q.unwrap_or_default())
            .categories(split(self.categories.as_deref()))
            .levels(split(self.levels.as_deref()))
            .sort(sort)
            .offset(self.offset.unwrap_or(0));

        if let Some(limit) = self.limit {
            params = params.limit(limit);
        }

        Ok(params)
    }
}

fn split(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Run the listing pipeline and serialize the page
pub fn render<T>(kind: &'static str, items: &[T], params: &ListingParams) -> Response
where
    T: Listable + Serialize,
{
    let page = listing::apply(items, params);
    metrics::record_listing(kind, page.total, page.matched);

    tracing::debug!(
        kind,
        total = page.total,
        matched = page.matched,
        sort = %page.sort,
        "Listing rendered"
    );

    Json(page).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rekayasa_common::errors::AppError;

    #[test]
    fn test_comma_separated_selections() {
        let query = ListingQuery {
            categories: Some("LLM, Vision,,Semua".to_string()),
            ..Default::default()
        };
        let params = query.into_params().unwrap();
        assert!(params.is_filtered());
    }

    #[test]
    fn test_limit_is_capped() {
        let query = ListingQuery {
            limit: Some(500),
            ..Default::default()
        };
        let err = query.into_params().unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn test_popular_sort_is_rejected() {
        let query = ListingQuery {
            sort: Some("populer".to_string()),
            ..Default::default()
        };
        let err = query.into_params().unwrap_err();
        assert!(matches!(err, AppError::UnsupportedSort { .. }));
    }

    #[test]
    fn test_defaults() {
        let params = ListingQuery::default().into_params().unwrap();
        assert!(!params.is_filtered());
        assert_eq!(params.sort_key(), SortKey::Latest);
    }
}
