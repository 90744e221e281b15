//! Outbound click-through redirects
//!
//! The redirect is the primary navigation. Recording the click runs on a
//! detached task and cannot delay or fail the redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use rekayasa_common::{
    errors::Result,
    metrics,
    outbound::{self, LinkKind},
};
use tracing::{info, instrument};

use crate::AppState;

#[instrument(skip(state))]
pub async fn redirect(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Redirect> {
    let kind = LinkKind::parse(&kind)?;
    let fallback = state.config.content.fallback_link.as_deref();
    let link = outbound::resolve(&state.repo, kind, &id, fallback).await?;

    tokio::spawn(async move {
        metrics::record_outbound(kind.as_str());
        info!(kind = %kind, id = %id, "Outbound click");
    });

    Ok(Redirect::temporary(&link.url))
}
