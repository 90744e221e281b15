//! Learning module handlers

use axum::{
    extract::{Query, State},
    response::Response,
};
use rekayasa_common::errors::Result;

use super::listing::{self, ListingQuery};
use crate::AppState;

/// Modules, newest first; supports `levels` in addition to `categories`
pub async fn list_modules(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Response> {
    let params = query.into_params()?;
    let modules = state.repo.list_modules().await;
    Ok(listing::render("modules", &modules, &params))
}
