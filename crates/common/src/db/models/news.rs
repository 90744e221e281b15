//! News articles

use super::de;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub excerpt: String,
    /// Long-form markdown body
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "de::or_default")]
    pub source_url: String,
    #[serde(default)]
    pub source_name: Option<String>,
    #[serde(deserialize_with = "de::timestamp")]
    pub published_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "de::or_default")]
    pub is_featured: bool,
    #[serde(default)]
    pub ai_generated: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_article() {
        let article: NewsArticle = serde_json::from_value(json!({
            "id": "n1",
            "title": "Model baru dirilis",
            "published_at": "2024-02-10",
            "is_featured": null
        }))
        .unwrap();

        assert!(!article.is_featured);
        assert!(article.content.is_none());
        assert!(article.created_at.is_none());
    }
}
