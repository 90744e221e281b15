//! E-book handlers
//!
//! Purchase links are served as stored; click-throughs go via `/go/ebook/{id}`.

use axum::{
    extract::{Query, State},
    response::Response,
};
use rekayasa_common::errors::Result;

use super::listing::{self, ListingQuery};
use crate::AppState;

/// E-books, newest first; `categories` matches any tag
pub async fn list_ebooks(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Response> {
    let params = query.into_params()?;
    let ebooks = state.repo.list_ebooks().await;
    Ok(listing::render("ebooks", &ebooks, &params))
}
