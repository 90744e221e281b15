//! Konsep handlers

use axum::{
    extract::{Query, State},
    response::Response,
};
use rekayasa_common::errors::Result;

use super::listing::{self, ListingQuery};
use crate::AppState;

pub async fn list_konsep(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Response> {
    let params = query.into_params()?;
    let konsep = state.repo.list_konsep().await;
    Ok(listing::render("konsep", &konsep, &params))
}
