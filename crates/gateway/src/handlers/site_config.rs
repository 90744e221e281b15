//! Site config lookups

use axum::{
    extract::{Path, State},
    Json,
};
use rekayasa_common::errors::{AppError, Result};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SiteConfigResponse {
    pub key: String,
    /// `null` when the key is missing, empty or unreadable
    pub value: Option<String>,
}

pub async fn get_site_config(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<SiteConfigResponse>> {
    if key.is_empty() || key.len() > 100 {
        return Err(AppError::Validation {
            message: "Config key must be 1-100 characters".to_string(),
            field: Some("key".to_string()),
        });
    }

    let value = state.repo.site_config(&key).await;
    Ok(Json(SiteConfigResponse { key, value }))
}
