//! Paper handlers

use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};
use rekayasa_common::{
    db::models::Paper,
    errors::{AppError, Result},
};
use tracing::instrument;

use super::listing::{self, ListingQuery};
use crate::AppState;

/// Full papers, newest year first
#[instrument(skip(state))]
pub async fn list_papers(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Response> {
    let params = query.into_params()?;
    let papers = state.repo.list_papers().await;
    Ok(listing::render("papers", &papers, &params))
}

/// Paper summaries; drafts are hidden in production
#[instrument(skip(state))]
pub async fn list_paper_summaries(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Response> {
    let params = query.into_params()?;
    let summaries = state.repo.list_paper_summaries().await;
    Ok(listing::render("paper_summaries", &summaries, &params))
}

#[instrument(skip(state))]
pub async fn get_paper(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Paper>> {
    state
        .repo
        .get_paper(&id)
        .await
        .map(Json)
        .ok_or(AppError::PaperNotFound { id })
}
