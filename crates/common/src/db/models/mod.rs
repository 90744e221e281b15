//! Read models for store rows
//!
//! All entities are immutable; the store is the only writer.

pub mod de;
mod ebook;
mod konsep;
mod module;
mod news;
mod paper;

pub use ebook::Ebook;
pub use konsep::{Konsep, KonsepCategory, KonsepSize};
pub use module::{Module, ModuleLevel};
pub use news::NewsArticle;
pub use paper::{BreakdownSection, GlossaryEntry, Paper, PaperCategory, PaperStatus, PaperSummary};

use super::{query::Collection, Row};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Key/value row of the `site_config` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// Decode rows one by one, skipping (and logging) any that do not fit `T`
pub fn decode_rows<T: DeserializeOwned>(collection: Collection, rows: Vec<Row>) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.get("id").map(|v| v.to_string()).unwrap_or_default();
            match serde_json::from_value::<T>(row) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(
                        collection = %collection,
                        id = %id,
                        error = %e,
                        "Skipping row that failed to decode"
                    );
                    None
                }
            }
        })
        .collect()
}
