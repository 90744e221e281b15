//! News handlers

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use rekayasa_common::{
    db::models::NewsArticle,
    errors::{AppError, Result},
    listing::{self, ListingPage},
    metrics,
};
use serde::Serialize;
use tracing::instrument;

use super::listing::ListingQuery;
use crate::AppState;

/// News page payload: hero article plus the filtered listing
#[derive(Serialize)]
pub struct NewsFeedResponse<'a> {
    pub featured: Option<&'a NewsArticle>,
    pub listing: ListingPage<'a, NewsArticle>,
}

/// Featured article and listing, read concurrently
#[instrument(skip(state))]
pub async fn news_feed(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Response> {
    let params = query.into_params()?;
    let feed = state.repo.news_feed().await;

    let page = listing::apply(&feed.articles, &params);
    metrics::record_listing("news", page.total, page.matched);

    Ok(Json(NewsFeedResponse {
        featured: feed.featured.as_ref(),
        listing: page,
    })
    .into_response())
}

pub async fn featured_news(State(state): State<AppState>) -> Result<Json<NewsArticle>> {
    state
        .repo
        .featured_news()
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound {
            resource_type: "featured article".to_string(),
            id: "featured".to_string(),
        })
}

#[instrument(skip(state))]
pub async fn get_news_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NewsArticle>> {
    state
        .repo
        .get_news_article(&id)
        .await
        .map(Json)
        .ok_or(AppError::ArticleNotFound { id })
}
